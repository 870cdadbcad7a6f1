//! Character Escaping
//!
//! Text and attribute values are escaped when written, never when stored, so
//! the element tree always holds the caller's original strings.

use std::borrow::Cow;

/// Replacement for characters XML 1.0 cannot carry, even escaped.
pub const REPLACEMENT_CHAR: char = '\u{FFFD}';

/// Returns true if `c` may appear in an XML 1.0 document.
pub fn is_xml_char(c: char) -> bool {
    matches!(c,
        '\u{9}' | '\u{A}' | '\u{D}'
        | '\u{20}'..='\u{D7FF}'
        | '\u{E000}'..='\u{FFFD}'
        | '\u{10000}'..='\u{10FFFF}')
}

/// Escapes character data for use between tags.
pub fn escape_text(input: &str) -> Cow<'_, str> {
    escape_with(input, false)
}

/// Escapes a value for use inside a double-quoted attribute.
///
/// Newlines and tabs are written as character references so attribute
/// normalization does not fold them into spaces.
pub fn escape_attr(input: &str) -> Cow<'_, str> {
    escape_with(input, true)
}

fn escape_with(input: &str, attr: bool) -> Cow<'_, str> {
    let needs_escape = input
        .chars()
        .any(|c| needs_rewrite(c, attr));
    if !needs_escape {
        return Cow::Borrowed(input);
    }

    let mut out = String::with_capacity(input.len() + 8);
    for c in input.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' if attr => out.push_str("&quot;"),
            '\'' if attr => out.push_str("&apos;"),
            '\n' if attr => out.push_str("&#10;"),
            '\r' => out.push_str("&#13;"),
            '\t' if attr => out.push_str("&#9;"),
            c if !is_xml_char(c) => out.push(REPLACEMENT_CHAR),
            c => out.push(c),
        }
    }
    Cow::Owned(out)
}

fn needs_rewrite(c: char, attr: bool) -> bool {
    match c {
        '&' | '<' | '>' | '\r' => true,
        '"' | '\'' | '\n' | '\t' => attr,
        c => !is_xml_char(c),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_plain_text_is_borrowed() {
        assert!(matches!(escape_text("Test Mission"), Cow::Borrowed(_)));
        assert!(matches!(escape_attr("flat"), Cow::Borrowed(_)));
    }

    #[test]
    fn test_escape_text_markup_characters() {
        assert_eq!(escape_text("a < b && c > d"), "a &lt; b &amp;&amp; c &gt; d");
    }

    #[test]
    fn test_text_keeps_quotes_and_newlines() {
        assert_eq!(escape_text("say \"hi\"\nit's"), "say \"hi\"\nit's");
    }

    #[test]
    fn test_escape_attr_quotes() {
        assert_eq!(
            escape_attr(r#"time's "up""#),
            "time&apos;s &quot;up&quot;"
        );
    }

    #[test]
    fn test_escape_attr_whitespace_references() {
        assert_eq!(escape_attr("a\nb\tc"), "a&#10;b&#9;c");
    }

    #[test]
    fn test_invalid_characters_replaced() {
        assert_eq!(escape_text("bad\u{0}byte"), "bad\u{FFFD}byte");
        assert_eq!(escape_attr("\u{1B}"), "\u{FFFD}");
    }

    #[test]
    fn test_is_xml_char() {
        assert!(is_xml_char('a'));
        assert!(is_xml_char('\t'));
        assert!(is_xml_char('\u{1F600}'));
        assert!(!is_xml_char('\u{0}'));
        assert!(!is_xml_char('\u{FFFE}'));
    }
}
