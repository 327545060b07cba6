use super::ParsedLink;
use crate::common::unescape_all;

/// Parses a `"title"`, `'title'` or `(title)` starting at `pos`.
pub fn parse_link_title(src: &str, pos: usize, max: usize) -> Option<ParsedLink> {
    let bytes = src.as_bytes();
    let start = pos;
    let mut pos = pos;
    let mut lines = 0;

    if pos >= max {
        return None;
    }

    let marker = match bytes[pos] {
        b'"' => b'"',
        b'\'' => b'\'',
        b'(' => b')',
        _ => return None,
    };
    pos += 1;

    while pos < max {
        let code = bytes[pos];
        if code == marker {
            return Some(ParsedLink {
                pos: pos + 1,
                lines,
                str: unescape_all(&src[start + 1..pos]).into_owned(),
            });
        } else if code == b'(' && marker == b')' {
            return None;
        } else if code == b'\n' {
            lines += 1;
        } else if code == b'\\' && pos + 1 < max {
            pos += 1;
            if bytes[pos] == b'\n' {
                lines += 1;
            }
        }
        pos += 1;
    }

    None
}
