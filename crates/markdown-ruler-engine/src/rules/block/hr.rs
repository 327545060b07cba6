use crate::common::is_space;
use crate::parser::Mode;
use crate::state::StateBlock;
use crate::token::Nesting;

/// Thematic break: three or more `*`, `-` or `_`, optionally spaced.
pub fn hr(state: &mut StateBlock<'_>, start_line: usize, _end_line: usize, mode: Mode) -> bool {
    let max = state.e_marks[start_line];

    if state.s_count[start_line] - state.blk_indent >= 4 {
        return false;
    }

    let mut pos = state.b_marks[start_line] + state.t_shift[start_line];
    let marker = state.byte_at(pos);
    pos += 1;

    if marker != b'*' && marker != b'-' && marker != b'_' {
        return false;
    }

    let mut count = 1;
    while pos < max {
        let ch = state.byte_at(pos);
        pos += 1;
        if ch != marker && !is_space(ch) {
            return false;
        }
        if ch == marker {
            count += 1;
        }
    }

    if count < 3 {
        return false;
    }

    if mode.is_probe() {
        return true;
    }

    state.line = start_line + 1;
    let line = state.line;
    let token = state.push("hr", "hr", Nesting::SelfClosing);
    token.map = Some((start_line, line));
    token.markup = (marker as char).to_string().repeat(count);
    true
}
