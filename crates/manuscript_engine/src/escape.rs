//! HTML escaping for text and double-quoted attribute values.

/// Escape `&`, `<`, `>`, `"` and `'` so the result is safe in text and in
/// double-quoted attributes.
pub(crate) fn escape_html(text: &str) -> String {
    let mut result = String::with_capacity(text.len() + text.len() / 8);
    for c in text.chars() {
        match c {
            '&' => result.push_str("&amp;"),
            '<' => result.push_str("&lt;"),
            '>' => result.push_str("&gt;"),
            '"' => result.push_str("&quot;"),
            '\'' => result.push_str("&#39;"),
            _ => result.push(c),
        }
    }
    result
}
