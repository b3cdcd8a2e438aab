//! Standalone HTML rendering of a cover letter (preview and print-to-PDF).
//!
//! All letter text is HTML-escaped before it is embedded; the only raw markup in the
//! output comes from the fixed page template below.

use serde::Deserialize;

use crate::cover_letter::parser::parse_letter;

/// Colour scheme for the rendered page. Print output is always black on white.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
    #[default]
    Light,
    Dark,
}

struct Palette {
    background: &'static str,
    text: &'static str,
    muted: &'static str,
    divider: &'static str,
}

impl Theme {
    fn palette(self) -> Palette {
        match self {
            Theme::Light => Palette {
                background: "#ffffff",
                text: "#1a1a1a",
                muted: "#555555",
                divider: "#cccccc",
            },
            Theme::Dark => Palette {
                background: "#1a1a2e",
                text: "#e2e2e2",
                muted: "#aaaaaa",
                divider: "#444444",
            },
        }
    }
}

const STYLE_TEMPLATE: &str = r#"    *, *::before, *::after { box-sizing: border-box; margin: 0; padding: 0; }
    html, body {
      font-family: Calibri, 'Segoe UI', Arial, sans-serif;
      font-size: 12pt;
      line-height: 1.55;
      color: {text};
      background: {background};
    }
    .page { max-width: 720px; margin: 0 auto; padding: 1in 1.25in; }
    .cl-name { font-size: 20pt; font-weight: 700; margin-bottom: 5px; }
    .cl-contact { font-size: 10.5pt; color: {muted}; line-height: 1.7; }
    .cl-divider { border: none; border-top: 1.5px solid {divider}; margin: 12px 0 18px; }
    .pre-body p { margin-bottom: 4px; font-size: 11pt; }
    .letter-body { margin-top: 16px; }
    .letter-body p { margin-bottom: 12px; text-align: justify; }
    .cl-footer { margin-top: 28px; }
    .cl-footer .footer-line { margin-bottom: 2px; }
    @media print {
      html, body { background: #fff; color: #000; }
      .page { padding: 0.75in 1in; }
    }"#;

/// Escapes `& < > " '` for safe embedding in HTML text and attribute values.
pub fn escape_html(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#039;"),
            other => out.push(other),
        }
    }
    out
}

/// Renders the letter as a complete HTML document.
pub fn render_html(text: &str, theme: Theme) -> String {
    let letter = parse_letter(text);
    let palette = theme.palette();

    // Palette values are constants; no user text goes through these replacements.
    let style = STYLE_TEMPLATE
        .replace("{text}", palette.text)
        .replace("{background}", palette.background)
        .replace("{muted}", palette.muted)
        .replace("{divider}", palette.divider);

    let contact_html: String = letter
        .contact
        .iter()
        .map(|c| format!("<div class=\"cl-contact\">{}</div>", escape_html(c)))
        .collect();

    let pre_body_html: String = letter
        .pre_date
        .iter()
        .map(|l| format!("<p>{}</p>", escape_html(l)))
        .collect();

    let body_html: String = letter
        .body
        .iter()
        .map(|para| format!("<p>{}</p>", escape_html(para).replace('\n', "<br/>")))
        .collect();

    let footer_html: String = letter
        .footer
        .iter()
        .map(|l| format!("<p class=\"footer-line\">{}</p>", escape_html(l)))
        .collect();

    format!(
        r#"<!DOCTYPE html>
<html lang="en">
<head>
  <meta charset="UTF-8" />
  <title>Cover Letter</title>
  <style>
{style}
  </style>
</head>
<body>
  <div class="page">
    <div class="cl-name">{name}</div>
    {contact_html}
    <hr class="cl-divider" />
    <div class="pre-body">
      {pre_body_html}
    </div>
    <div class="letter-body">
      {body_html}
    </div>
    <div class="cl-footer">
      {footer_html}
    </div>
  </div>
</body>
</html>"#,
        name = escape_html(&letter.name),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Every `&` in the output must open one of the entities `escape_html` emits.
    fn all_ampersands_are_entities(html: &str) -> bool {
        html.match_indices('&').all(|(i, _)| {
            ["&amp;", "&lt;", "&gt;", "&quot;", "&#039;"]
                .iter()
                .any(|entity| html[i..].starts_with(entity))
        })
    }

    #[test]
    fn test_user_markup_never_reaches_output_raw() {
        let hostile = "<script>alert(1)</script>\nEmail: <b>&</b>\n<i>x</i>\n\
                       Dear Hiring Manager,\n<img src=x onerror=y> & more\nSincerely,\n</div>";
        // Same shape with the markup characters swapped for inert letters.
        let inert = hostile.replace('<', "L").replace('>', "G").replace('&', "A");

        let html = render_html(hostile, Theme::Light);
        let baseline = render_html(&inert, Theme::Light);

        assert_eq!(html.matches('<').count(), baseline.matches('<').count());
        assert_eq!(html.matches('>').count(), baseline.matches('>').count());
        assert!(all_ampersands_are_entities(&html));
        assert!(html.contains("&lt;script&gt;alert(1)&lt;/script&gt;"));
        assert!(html.contains("&lt;img src=x onerror=y&gt; &amp; more"));
    }

    #[test]
    fn test_themes_differ_only_in_palette() {
        let light = render_html("Jane", Theme::Light);
        let dark = render_html("Jane", Theme::Dark);
        assert!(light.contains("background: #ffffff;"));
        assert!(dark.contains("background: #1a1a2e;"));
        assert!(dark.contains("color: #e2e2e2;"));
        for placeholder in ["{text}", "{background}", "{muted}", "{divider}"] {
            assert!(!light.contains(placeholder));
            assert!(!dark.contains(placeholder));
        }
    }

    #[test]
    fn test_empty_input_renders_empty_page() {
        let html = render_html("", Theme::Light);
        assert!(html.starts_with("<!DOCTYPE html>"));
        assert!(html.contains("<div class=\"cl-name\"></div>"));
        assert!(html.ends_with("</html>"));
    }

    #[test]
    fn test_placeholder_like_user_text_is_not_substituted() {
        let html = render_html("{body_html} {text}", Theme::Light);
        assert!(html.contains("<div class=\"cl-name\">{body_html} {text}</div>"));
    }
}
