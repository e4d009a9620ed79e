//! Rendering of the small markdown subset used in replies: `**bold**` and line breaks.

use std::sync::LazyLock;

static BOLD_RE: LazyLock<regex::Regex> =
    LazyLock::new(|| regex::Regex::new(r"\*\*(.*?)\*\*").expect("bold regex is valid"));

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Span<'a> {
    Text(&'a str),
    Bold(&'a str),
    LineBreak,
}

/// Split message text into spans. Unpaired `**` stays literal text.
pub fn parse_spans(text: &str) -> Vec<Span<'_>> {
    let mut spans = Vec::new();
    for (i, line) in text.split('\n').enumerate() {
        if i > 0 {
            spans.push(Span::LineBreak);
        }
        let mut cursor = 0;
        for caps in BOLD_RE.captures_iter(line) {
            let (Some(whole), Some(inner)) = (caps.get(0), caps.get(1)) else {
                continue;
            };
            if whole.start() > cursor {
                spans.push(Span::Text(&line[cursor..whole.start()]));
            }
            spans.push(Span::Bold(inner.as_str()));
            cursor = whole.end();
        }
        if cursor < line.len() {
            spans.push(Span::Text(&line[cursor..]));
        }
    }
    spans
}

/// HTML for the chat bubble. Everything outside the supported subset is escaped.
pub fn to_html(text: &str) -> String {
    let mut out = String::with_capacity(text.len() + 16);
    for span in parse_spans(text) {
        match span {
            Span::Text(t) => out.push_str(&escape_html(t)),
            Span::Bold(t) => {
                out.push_str("<strong>");
                out.push_str(&escape_html(t));
                out.push_str("</strong>");
            }
            Span::LineBreak => out.push_str("<br/>"),
        }
    }
    out
}

/// Terminal rendering with ANSI bold.
pub fn to_ansi(text: &str) -> String {
    let mut out = String::with_capacity(text.len() + 16);
    for span in parse_spans(text) {
        match span {
            Span::Text(t) => out.push_str(t),
            Span::Bold(t) => {
                out.push_str("\x1b[1m");
                out.push_str(t);
                out.push_str("\x1b[0m");
            }
            Span::LineBreak => out.push('\n'),
        }
    }
    out
}

fn escape_html(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
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
    fn test_bold_keeps_literal_word() {
        assert_eq!(to_html("I know **Rust**!"), "I know <strong>Rust</strong>!");
        assert_eq!(
            parse_spans("**IIT Guwahati**"),
            vec![Span::Bold("IIT Guwahati")]
        );
    }

    #[test]
    fn test_line_breaks() {
        assert_eq!(
            to_html("1. **Yoga AI**\n2. Sustainify"),
            "1. <strong>Yoga AI</strong><br/>2. Sustainify"
        );
        assert_eq!(
            parse_spans("a\n\nb"),
            vec![
                Span::Text("a"),
                Span::LineBreak,
                Span::LineBreak,
                Span::Text("b")
            ]
        );
    }

    #[test]
    fn test_unpaired_delimiters_stay_literal() {
        assert_eq!(to_html("5 ** 2 and *italic*"), "5 ** 2 and *italic*");
    }

    #[test]
    fn test_html_is_escaped() {
        assert_eq!(
            to_html("<script>**<b>**"),
            "&lt;script&gt;<strong>&lt;b&gt;</strong>"
        );
    }

    #[test]
    fn test_ansi_bold() {
        assert_eq!(to_ansi("**hi** there"), "\x1b[1mhi\x1b[0m there");
    }
}
