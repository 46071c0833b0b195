//! Neutralising of markup in user supplied text before it is stored.

/// Replace the angle brackets in `text` with their HTML entities so stored
/// text cannot open or close tags.
///
/// Every other character, including `&` and quotes, is left as is.
pub fn escape_html(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());

    for c in text.chars() {
        match c {
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            c => escaped.push(c),
        }
    }

    escaped
}

#[cfg(test)]
mod escape_html_tests {
    use super::escape_html;

    #[test]
    fn plain_text_is_unchanged() {
        assert_eq!(escape_html("What is 2 + 2?"), "What is 2 + 2?");
        assert_eq!(escape_html("ööö"), "ööö");
    }

    #[test]
    fn ampersands_and_quotes_are_unchanged() {
        assert_eq!(escape_html("Tom & Jerry"), "Tom & Jerry");
        assert_eq!(
            escape_html("Who chases \"Jerry\"? It's Tom"),
            "Who chases \"Jerry\"? It's Tom"
        );
    }

    #[test]
    fn markup_is_escaped() {
        assert_eq!(
            escape_html("<script>alert(1)</script>"),
            "&lt;script&gt;alert(1)&lt;/script&gt;"
        );
        assert_eq!(escape_html("1 < 2 && 3 > 2"), "1 &lt; 2 && 3 &gt; 2");
    }
}
