//! Markup escaping for the two contexts cards embed text into.

/// For values placed inside a double-quoted attribute.
pub fn escape_attr(value: &str) -> String {
    let mut out = String::with_capacity(value.len());
    for c in value.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '"' => out.push_str("&quot;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            _ => out.push(c),
        }
    }
    out
}

/// For text placed between tags. Also escapes `'`.
pub fn escape_html(value: &str) -> String {
    let mut out = String::with_capacity(value.len());
    for c in value.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn attr_leaves_single_quote() {
        assert_eq!(escape_attr(r#"a&b"<c>'"#), "a&amp;b&quot;&lt;c&gt;'");
    }

    #[test]
    fn html_escapes_single_quote() {
        assert_eq!(escape_html("it's <b>"), "it&#39;s &lt;b&gt;");
    }

    #[test]
    fn ampersand_is_not_double_escaped_on_first_pass() {
        assert_eq!(escape_html("&lt;"), "&amp;lt;");
    }
}
