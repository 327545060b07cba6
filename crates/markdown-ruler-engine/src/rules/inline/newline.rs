use crate::common::is_space;
use crate::parser::Mode;
use crate::state::StateInline;
use crate::token::Nesting;

/// Line break: hard after two or more trailing spaces, soft otherwise.
pub fn newline(state: &mut StateInline<'_>, mode: Mode) -> bool {
    let mut pos = state.pos;
    if state.byte_at(pos) != b'\n' {
        return false;
    }

    if !mode.is_probe() {
        if state.pending.ends_with("  ") {
            let trimmed = state.pending.trim_end_matches(' ').len();
            state.pending.truncate(trimmed);
            state.push("hardbreak", "br", Nesting::SelfClosing);
        } else {
            if state.pending.ends_with(' ') {
                state.pending.pop();
            }
            state.push("softbreak", "br", Nesting::SelfClosing);
        }
    }

    pos += 1;
    // Leading spaces of the next line.
    while pos < state.pos_max && is_space(state.byte_at(pos)) {
        pos += 1;
    }

    state.pos = pos;
    true
}
