//! Character classes and string utilities shared by rules and the renderer.
//!
//! ## Modules
//!
//! - `html`: raw HTML tag patterns for the `html_block` and `html_inline` rules
//! - `links`: link normalisation and validation hooks

pub mod html;
pub mod links;

use std::borrow::Cow;
use std::sync::OnceLock;

use regex::{Captures, Regex};
use unicode_categories::UnicodeCategories;

/// Space or tab.
pub fn is_space(b: u8) -> bool {
    b == b' ' || b == b'\t'
}

/// Unicode whitespace as used by the flanking rules.
pub fn is_whitespace(c: char) -> bool {
    matches!(
        c,
        '\t'..='\r'
            | ' '
            | '\u{a0}'
            | '\u{1680}'
            | '\u{2000}'..='\u{200a}'
            | '\u{202f}'
            | '\u{205f}'
            | '\u{3000}'
    )
}

/// ASCII punctuation in the CommonMark sense.
pub fn is_md_ascii_punct(c: char) -> bool {
    c.is_ascii_punctuation()
}

/// ASCII or Unicode punctuation.
pub fn is_punct_char(c: char) -> bool {
    c.is_ascii_punctuation() || c.is_punctuation()
}

pub fn escape_html(s: &str) -> Cow<'_, str> {
    html_escape::encode_double_quoted_attribute(s)
}

pub fn is_valid_entity_code(c: u32) -> bool {
    !((0xD800..=0xDFFF).contains(&c)
        || (0xFDD0..=0xFDEF).contains(&c)
        || (c & 0xFFFF) == 0xFFFF
        || (c & 0xFFFF) == 0xFFFE
        || c <= 0x08
        || c == 0x0B
        || (0x0E..=0x1F).contains(&c)
        || (0x7F..=0x9F).contains(&c)
        || c > 0x10FFFF)
}

/// Decodes the body of an entity (`amp`, `#35`, `#x22`), returning `None`
/// for unknown names and out-of-range code points.
pub fn decode_entity(name: &str) -> Option<String> {
    if let Some(num) = name.strip_prefix('#') {
        let code = match num.strip_prefix(['x', 'X']) {
            Some(hex) => u32::from_str_radix(hex, 16).ok()?,
            None => num.parse::<u32>().ok()?,
        };
        if !is_valid_entity_code(code) {
            return None;
        }
        return char::from_u32(code).map(String::from);
    }

    let raw = format!("&{name};");
    let decoded = html_escape::decode_html_entities(&raw);
    // Legacy entities decode without their semicolon, leaving a tail behind.
    if decoded == raw.as_str() || (decoded.ends_with(';') && decoded != ";") {
        return None;
    }
    Some(decoded.into_owned())
}

fn unescape_all_re() -> &'static Regex {
    static UNESCAPE_ALL_RE: OnceLock<Regex> = OnceLock::new();
    UNESCAPE_ALL_RE.get_or_init(|| {
        Regex::new(r##"\\([!"#$%&'()*+,\-./:;<=>?@\[\\\]^_`{|}~])|&([A-Za-z#][A-Za-z0-9]{1,31});"##)
            .expect("Invalid unescape regex")
    })
}

/// Resolves backslash escapes and entities in link destinations, titles
/// and fence info strings.
pub fn unescape_all(s: &str) -> Cow<'_, str> {
    if !s.contains(['\\', '&']) {
        return Cow::Borrowed(s);
    }
    unescape_all_re().replace_all(s, |caps: &Captures| {
        if let Some(escaped) = caps.get(1) {
            return escaped.as_str().to_string();
        }
        let whole = &caps[0];
        decode_entity(&caps[2]).unwrap_or_else(|| whole.to_string())
    })
}

/// Canonical form of a link label for reference lookup.
pub fn normalize_reference(label: &str) -> String {
    label
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
        .to_lowercase()
        .to_uppercase()
}

/// Byte length of the char starting at `pos`, 1 on a non-boundary.
pub fn char_len_at(s: &str, pos: usize) -> usize {
    s.get(pos..)
        .and_then(|rest| rest.chars().next())
        .map_or(1, char::len_utf8)
}

/// The char ending just before byte `pos`.
pub fn char_before(s: &str, pos: usize) -> Option<char> {
    s.get(..pos).and_then(|head| head.chars().next_back())
}

pub fn char_at(s: &str, pos: usize) -> Option<char> {
    s.get(pos..).and_then(|rest| rest.chars().next())
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case('!', true)]
    #[case('~', true)]
    #[case('\u{2018}', true)]
    #[case('\u{3001}', true)]
    #[case('a', false)]
    #[case(' ', false)]
    fn punctuation(#[case] c: char, #[case] expected: bool) {
        assert_eq!(is_punct_char(c), expected);
    }

    #[rstest]
    #[case(' ', true)]
    #[case('\n', true)]
    #[case('\u{a0}', true)]
    #[case('\u{3000}', true)]
    #[case('x', false)]
    #[case('\u{200b}', false)]
    fn whitespace(#[case] c: char, #[case] expected: bool) {
        assert_eq!(is_whitespace(c), expected);
    }

    #[test]
    fn escape_html_covers_attribute_specials() {
        assert_eq!(escape_html(r#"a&b<c>"d"#), "a&amp;b&lt;c&gt;&quot;d");
        assert!(matches!(escape_html("plain"), Cow::Borrowed(_)));
    }

    #[rstest]
    #[case("amp", Some("&"))]
    #[case("#35", Some("#"))]
    #[case("#x22", Some("\""))]
    #[case("#X22", Some("\""))]
    #[case("#0", None)]
    #[case("#xD800", None)]
    #[case("nosuchentity", None)]
    fn entities(#[case] name: &str, #[case] expected: Option<&str>) {
        assert_eq!(decode_entity(name).as_deref(), expected);
    }

    #[test]
    fn unescape_all_handles_escapes_and_entities() {
        assert_eq!(unescape_all(r"\*foo\* &amp; &bogus; \a"), r"*foo* & &bogus; \a");
    }

    #[test]
    fn normalize_reference_folds_case_and_space() {
        assert_eq!(normalize_reference("  Foo \n  bar "), "FOO BAR");
        assert_eq!(normalize_reference("ẞ"), normalize_reference("SS"));
    }

    #[test]
    fn char_helpers_respect_utf8_boundaries() {
        let s = "aé*";
        assert_eq!(char_len_at(s, 1), 2);
        assert_eq!(char_before(s, 3), Some('é'));
        assert_eq!(char_at(s, 3), Some('*'));
        assert_eq!(char_before(s, 0), None);
    }
}
