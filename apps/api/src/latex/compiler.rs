//! Resume Compiler: turns a `CvRecord` into a complete LaTeX source string.
//!
//! Output order is fixed: preamble → heading → Education → Experience → Projects →
//! Technical Skills → closing marker. Empty sections are omitted entirely.
//! The function is pure: identical records always produce byte-identical source.

use tracing::debug;

use crate::latex::escape::{escape_latex, escape_url};
use crate::latex::preamble::{CLOSING, PREAMBLE};
use crate::models::cv::{CvRecord, Education, Experience, PersonalInfo, Project, Skills};

/// Shown in the heading when the CV has no name yet.
const PLACEHOLDER_NAME: &str = "Your Name";

/// Separator between contact items on the heading line.
const CONTACT_SEPARATOR: &str = " $|$ ";

/// Compiles a CV record into LaTeX source ready for the external PDF service.
pub fn compile_resume(cv: &CvRecord) -> String {
    let mut latex = String::with_capacity(PREAMBLE.len() + 4096);

    latex.push_str(PREAMBLE);
    latex.push_str(&render_heading(&cv.personal_info));
    latex.push_str(&render_education(&cv.education));
    latex.push_str(&render_experience(&cv.experience));
    latex.push_str(&render_projects(&cv.projects));
    latex.push_str(&render_skills(&cv.skills));
    latex.push_str(CLOSING);

    debug!(
        "Compiled resume: {} education, {} experience, {} projects, {} bytes",
        cv.education.len(),
        cv.experience.len(),
        cv.projects.len(),
        latex.len()
    );

    latex
}

// ────────────────────────────────────────────────────────────────────────────
// Heading
// ────────────────────────────────────────────────────────────────────────────

fn render_heading(info: &PersonalInfo) -> String {
    let mut contacts: Vec<String> = Vec::new();

    if !info.phone.is_empty() {
        contacts.push(escape_latex(&info.phone));
    }
    if !info.email.is_empty() {
        contacts.push(format!(
            "\\href{{mailto:{}}}{{\\underline{{{}}}}}",
            escape_url(&info.email),
            escape_latex(&info.email)
        ));
    }
    for link in [&info.linkedin, &info.github, &info.website] {
        if !link.is_empty() {
            contacts.push(render_link(link));
        }
    }

    let name = if info.name.is_empty() {
        PLACEHOLDER_NAME
    } else {
        info.name.as_str()
    };

    format!(
        "\\begin{{document}}\n\n\
         %----------HEADING----------\n\
         \\begin{{center}}\n    \
         \\textbf{{\\Huge \\scshape {}}} \\\\ \\vspace{{1pt}}\n    \
         \\small {}\n\
         \\end{{center}}\n\n",
        escape_latex(name),
        contacts.join(CONTACT_SEPARATOR)
    )
}

/// Underlined hyperlink whose target always carries a scheme and whose visible
/// text never does.
fn render_link(link: &str) -> String {
    format!(
        "\\href{{{}}}{{\\underline{{{}}}}}",
        escape_url(&normalize_url(link)),
        escape_latex(display_url(link))
    )
}

/// Prefixes `https://` unless the link already starts with `http`.
pub fn normalize_url(link: &str) -> String {
    if link.starts_with("http") {
        link.to_string()
    } else {
        format!("https://{link}")
    }
}

/// Strips a leading `http://` or `https://`.
pub fn display_url(link: &str) -> &str {
    link.strip_prefix("https://")
        .or_else(|| link.strip_prefix("http://"))
        .unwrap_or(link)
}

// ────────────────────────────────────────────────────────────────────────────
// Sections
// ────────────────────────────────────────────────────────────────────────────

fn render_education(education: &[Education]) -> String {
    if education.is_empty() {
        return String::new();
    }

    let mut section = String::from(
        "%-----------EDUCATION-----------\n\
         \\section{Education}\n  \
         \\resumeSubHeadingListStart\n",
    );

    for edu in education {
        section.push_str(&format!(
            "    \\resumeSubheading\n      {{{}}}{{{}}}\n      {{{}}}{{{}}}\n",
            escape_latex(&edu.institution),
            escape_latex(&edu.location),
            escape_latex(&edu.degree),
            escape_latex(&edu.dates)
        ));
    }

    section.push_str("  \\resumeSubHeadingListEnd\n\n");
    section
}

fn render_experience(experience: &[Experience]) -> String {
    if experience.is_empty() {
        return String::new();
    }

    let mut section = String::from(
        "%-----------EXPERIENCE-----------\n\
         \\section{Experience}\n  \
         \\resumeSubHeadingListStart\n",
    );

    for exp in experience {
        section.push_str(&format!(
            "\n    \\resumeSubheading\n      {{{}}}{{{}}}\n      {{{}}}{{{}}}\n      \\resumeItemListStart\n",
            escape_latex(&exp.role),
            escape_latex(&exp.dates),
            escape_latex(&exp.company),
            escape_latex(&exp.location)
        ));
        for point in &exp.points {
            section.push_str(&format!(
                "        \\resumeItem{{{}}}\n",
                escape_latex(point)
            ));
        }
        section.push_str("      \\resumeItemListEnd\n");
    }

    section.push_str("\n  \\resumeSubHeadingListEnd\n\n");
    section
}

fn render_projects(projects: &[Project]) -> String {
    if projects.is_empty() {
        return String::new();
    }

    let mut section = String::from(
        "%-----------PROJECTS-----------\n\
         \\section{Projects}\n    \
         \\resumeSubHeadingListStart\n",
    );

    for proj in projects {
        let title = if proj.demo_link.is_empty() {
            format!("\\textbf{{{}}}", escape_latex(&proj.name))
        } else {
            format!(
                "\\href{{{}}}{{\\textbf{{{}}}}}",
                escape_url(&normalize_url(&proj.demo_link)),
                escape_latex(&proj.name)
            )
        };

        section.push_str(&format!(
            "      \\resumeProjectHeading\n          {{{} $|$ \\emph{{{}}}}}{{{}}}\n          \\resumeItemListStart\n",
            title,
            escape_latex(&proj.technologies),
            escape_latex(&proj.dates)
        ));
        for point in &proj.points {
            section.push_str(&format!(
                "            \\resumeItem{{{}}}\n",
                escape_latex(point)
            ));
        }
        section.push_str("          \\resumeItemListEnd\n");
    }

    section.push_str("    \\resumeSubHeadingListEnd\n\n");
    section
}

fn render_skills(skills: &Skills) -> String {
    if skills.is_empty() {
        return String::new();
    }

    let categories = [
        ("Languages", &skills.languages),
        ("Frameworks", &skills.frameworks),
        ("Developer Tools", &skills.tools),
        ("Libraries", &skills.libraries),
    ];

    let lines: Vec<String> = categories
        .iter()
        .filter(|(_, values)| !values.is_empty())
        .map(|(label, values)| {
            format!(
                "\\textbf{{{}}}{{: {}}}",
                label,
                escape_latex(&values.join(", "))
            )
        })
        .collect();

    format!(
        "%-----------TECHNICAL SKILLS-----------\n\
         \\section{{Technical Skills}}\n \
         \\begin{{itemize}}[leftmargin=0.15in, label={{}}]\n    \
         \\small{{\\item{{\n     \
         {}\n    \
         }}}}\n \
         \\end{{itemize}}\n\n",
        lines.join(" \\\\\n     ")
    )
}

// ────────────────────────────────────────────────────────────────────────────
// Tests
// ────────────────────────────────────────────────────────────────────────────
