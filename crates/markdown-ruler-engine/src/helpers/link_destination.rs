use super::ParsedLink;
use crate::common::unescape_all;

/// Nesting limit for unescaped parentheses in a bare destination.
const MAX_PAREN_DEPTH: usize = 32;

/// Parses `<dest>` or a bare destination starting at `pos`.
pub fn parse_link_destination(src: &str, pos: usize, max: usize) -> Option<ParsedLink> {
    let bytes = src.as_bytes();
    let start = pos;
    let mut pos = pos;

    if bytes.get(pos) == Some(&b'<') {
        pos += 1;
        while pos < max {
            match bytes[pos] {
                b'\n' | b'<' => return None,
                b'>' => {
                    return Some(ParsedLink {
                        pos: pos + 1,
                        lines: 0,
                        str: unescape_all(&src[start + 1..pos]).into_owned(),
                    });
                }
                b'\\' if pos + 1 < max => pos += 2,
                _ => pos += 1,
            }
        }
        return None;
    }

    let mut level = 0;
    while pos < max {
        let code = bytes[pos];
        if code == b' ' || code < 0x20 || code == 0x7F {
            break;
        }
        if code == b'\\' && pos + 1 < max {
            if bytes[pos + 1] == b' ' {
                break;
            }
            pos += 2;
            continue;
        }
        if code == b'(' {
            level += 1;
            if level > MAX_PAREN_DEPTH {
                return None;
            }
        }
        if code == b')' {
            if level == 0 {
                break;
            }
            level -= 1;
        }
        pos += 1;
    }

    if start == pos || level != 0 {
        return None;
    }

    Some(ParsedLink {
        pos,
        lines: 0,
        str: unescape_all(&src[start..pos]).into_owned(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("<a b>", Some(("a b", 5)))]
    #[case("<a\nb>", None)]
    #[case("<unclosed", None)]
    #[case("/url rest", Some(("/url", 4)))]
    #[case("/a(b)c)", Some(("/a(b)c", 6)))]
    #[case("/a(b", None)]
    #[case(r"/a\)b", Some(("/a)b", 5)))]
    #[case("", None)]
    fn destinations(#[case] src: &str, #[case] expected: Option<(&str, usize)>) {
        let got = parse_link_destination(src, 0, src.len());
        assert_eq!(got.as_ref().map(|r| (r.str.as_str(), r.pos)), expected);
    }
}
