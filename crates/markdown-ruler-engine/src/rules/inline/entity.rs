use std::sync::OnceLock;

use regex::Regex;

use crate::common::{decode_entity, is_valid_entity_code};
use crate::parser::Mode;
use crate::state::StateInline;
use crate::token::Nesting;

fn digital_re() -> &'static Regex {
    static DIGITAL_RE: OnceLock<Regex> = OnceLock::new();
    DIGITAL_RE.get_or_init(|| {
        Regex::new(r"(?i)^&#(x[a-f0-9]{1,6}|[0-9]{1,7});").expect("Invalid entity regex")
    })
}

fn named_re() -> &'static Regex {
    static NAMED_RE: OnceLock<Regex> = OnceLock::new();
    NAMED_RE.get_or_init(|| {
        Regex::new(r"(?i)^&([a-z][a-z0-9]{1,31});").expect("Invalid entity regex")
    })
}

/// `&#123;`, `&#x7B;` and named entities. Code points that are not
/// allowed in HTML decode to U+FFFD.
pub fn entity(state: &mut StateInline<'_>, mode: Mode) -> bool {
    let pos = state.pos;
    let max = state.pos_max;

    if state.byte_at(pos) != b'&' || pos + 1 >= max {
        return false;
    }

    let src = &state.src[pos..max];
    let (markup, content) = if state.byte_at(pos + 1) == b'#' {
        let Some(caps) = digital_re().captures(src) else {
            return false;
        };
        let num = &caps[1];
        let code = match num.strip_prefix(['x', 'X']) {
            Some(hex) => u32::from_str_radix(hex, 16).unwrap_or(0),
            None => num.parse::<u32>().unwrap_or(0),
        };
        let decoded = if is_valid_entity_code(code) {
            char::from_u32(code).unwrap_or('\u{FFFD}')
        } else {
            '\u{FFFD}'
        };
        (caps[0].to_string(), decoded.to_string())
    } else {
        let Some(caps) = named_re().captures(src) else {
            return false;
        };
        let Some(decoded) = decode_entity(&caps[1]) else {
            return false;
        };
        (caps[0].to_string(), decoded)
    };

    state.pos += markup.len();

    if !mode.is_probe() {
        let token = state.push("text_special", "", Nesting::SelfClosing);
        token.content = content;
        token.markup = markup;
        token.info = "entity".to_string();
    }
    true
}
