use crate::common::{char_len_at, is_space};
use crate::parser::Mode;
use crate::state::StateInline;
use crate::token::Nesting;

/// Backslash escapes. An escaped ASCII punctuation char becomes a
/// `text_special` token holding just that char; anything else keeps its
/// backslash. A backslash before a newline is a hard break.
pub fn escape(state: &mut StateInline<'_>, mode: Mode) -> bool {
    let mut pos = state.pos;
    let max = state.pos_max;

    if state.byte_at(pos) != b'\\' {
        return false;
    }
    pos += 1;

    // Trailing backslash stays literal.
    if pos >= max {
        return false;
    }

    let ch = state.byte_at(pos);
    if ch == b'\n' {
        if !mode.is_probe() {
            state.push("hardbreak", "br", Nesting::SelfClosing);
        }
        pos += 1;
        while pos < max && is_space(state.byte_at(pos)) {
            pos += 1;
        }
        state.pos = pos;
        return true;
    }

    let src = state.src;
    let len = char_len_at(src, pos);
    let escaped = &src[pos..pos + len];
    let orig = &src[pos - 1..pos + len];

    if !mode.is_probe() {
        let token = state.push("text_special", "", Nesting::SelfClosing);
        token.content = if ch.is_ascii_punctuation() {
            escaped.to_string()
        } else {
            orig.to_string()
        };
        token.markup = orig.to_string();
        token.info = "escape".to_string();
    }

    state.pos = pos + len;
    true
}
