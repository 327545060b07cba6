use std::sync::OnceLock;

use regex::Regex;

use crate::common::html::html_tag_re;
use crate::parser::Mode;
use crate::state::StateInline;
use crate::token::Nesting;

fn link_open_re() -> &'static Regex {
    static LINK_OPEN_RE: OnceLock<Regex> = OnceLock::new();
    LINK_OPEN_RE.get_or_init(|| Regex::new(r"(?i)^<a[>\s]").expect("Invalid link open regex"))
}

fn link_close_re() -> &'static Regex {
    static LINK_CLOSE_RE: OnceLock<Regex> = OnceLock::new();
    LINK_CLOSE_RE.get_or_init(|| Regex::new(r"(?i)^</a\s*>").expect("Invalid link close regex"))
}

pub(crate) fn is_link_open(tag: &str) -> bool {
    link_open_re().is_match(tag)
}

pub(crate) fn is_link_close(tag: &str) -> bool {
    link_close_re().is_match(tag)
}

/// Raw inline HTML; only with the `html` option. Raw `<a>` tags count
/// towards `link_level` so linkify stays out of them.
pub fn html_inline(state: &mut StateInline<'_>, mode: Mode) -> bool {
    if !state.md.options.html {
        return false;
    }

    let pos = state.pos;
    let max = state.pos_max;
    if state.byte_at(pos) != b'<' || pos + 2 >= max {
        return false;
    }

    let ch = state.byte_at(pos + 1);
    if ch != b'!' && ch != b'?' && ch != b'/' && !ch.is_ascii_alphabetic() {
        return false;
    }

    let src = state.src;
    let Some(m) = html_tag_re().find(&src[pos..max]) else {
        return false;
    };
    let tag = m.as_str();

    if !mode.is_probe() {
        let token = state.push("html_inline", "", Nesting::SelfClosing);
        token.content = tag.to_string();

        if is_link_open(tag) {
            state.link_level += 1;
        }
        if is_link_close(tag) {
            state.link_level = state.link_level.saturating_sub(1);
        }
    }

    state.pos += tag.len();
    true
}
