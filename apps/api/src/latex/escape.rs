//! LaTeX escaping for user-supplied CV text.
//!
//! Reserved characters: `\ & % $ # _ { } ~ ^`. The mapping is applied in a single
//! pass, so the braces introduced by `\textbackslash{}` and friends are never
//! re-escaped. Already-escaped input (e.g. a literal `\&`) is escaped again.

/// Escapes every LaTeX-reserved character in `text`. Total over all inputs.
pub fn escape_latex(text: &str) -> String {
    let mut out = String::with_capacity(text.len() + text.len() / 8);
    for c in text.chars() {
        match c {
            '\\' => out.push_str("\\textbackslash{}"),
            '&' => out.push_str("\\&"),
            '%' => out.push_str("\\%"),
            '$' => out.push_str("\\$"),
            '#' => out.push_str("\\#"),
            '_' => out.push_str("\\_"),
            '{' => out.push_str("\\{"),
            '}' => out.push_str("\\}"),
            '~' => out.push_str("\\textasciitilde{}"),
            '^' => out.push_str("\\textasciicircum{}"),
            other => out.push(other),
        }
    }
    out
}

/// Makes a URL safe to pass as the first argument of `\href` when that `\href` sits
/// inside another macro's argument: `%`, `#` and `&` get a backslash, and characters
/// that would unbalance the argument are percent-encoded. A raw `&` would be read as
/// an alignment tab when the link lands in a `tabular` cell.
pub fn escape_url(url: &str) -> String {
    let mut out = String::with_capacity(url.len());
    for c in url.chars() {
        match c {
            '%' => out.push_str("\\%"),
            '#' => out.push_str("\\#"),
            '&' => out.push_str("\\&"),
            '\\' => out.push_str("\\%5C"),
            '{' => out.push_str("\\%7B"),
            '}' => out.push_str("\\%7D"),
            other => out.push(other),
        }
    }
    out
}
