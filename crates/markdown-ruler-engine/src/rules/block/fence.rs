use crate::parser::Mode;
use crate::state::StateBlock;
use crate::token::Nesting;

/// Fenced code block opened by three or more backticks or tildes.
pub fn fence(state: &mut StateBlock<'_>, start_line: usize, end_line: usize, mode: Mode) -> bool {
    let mut pos = state.b_marks[start_line] + state.t_shift[start_line];
    let mut max = state.e_marks[start_line];

    if state.s_count[start_line] - state.blk_indent >= 4 {
        return false;
    }
    if pos + 3 > max {
        return false;
    }

    let marker = state.byte_at(pos);
    if marker != b'~' && marker != b'`' {
        return false;
    }

    let mut mem = pos;
    pos = state.skip_chars(pos, marker);
    let len = pos - mem;
    if len < 3 {
        return false;
    }

    let markup = state.src[mem..pos].to_string();
    let params = state.src[pos..max].to_string();

    // Backtick fences can't carry backticks in the info string, or inline
    // code spans would be misread as fences.
    if marker == b'`' && params.contains('`') {
        return false;
    }

    if mode.is_probe() {
        return true;
    }

    let mut next_line = start_line;
    let mut have_end_marker = false;

    loop {
        next_line += 1;
        if next_line >= end_line {
            // Unclosed fence runs to the end of the container.
            break;
        }

        pos = state.b_marks[next_line] + state.t_shift[next_line];
        mem = pos;
        max = state.e_marks[next_line];

        if pos < max && state.s_count[next_line] < state.blk_indent {
            // Non-empty line with negative indent ends the fence, e.g. a
            // list item that closes around it.
            break;
        }
        if state.byte_at(pos) != marker {
            continue;
        }
        if state.s_count[next_line] - state.blk_indent >= 4 {
            continue;
        }

        pos = state.skip_chars(pos, marker);
        if pos - mem < len {
            continue;
        }

        pos = state.skip_spaces(pos);
        if pos < max {
            continue;
        }

        have_end_marker = true;
        break;
    }

    let indent = state.s_count[start_line];
    state.line = next_line + usize::from(have_end_marker);

    let content = state.get_lines(start_line + 1, next_line, indent, true);
    let line = state.line;
    let token = state.push("fence", "code", Nesting::SelfClosing);
    token.info = params;
    token.content = content;
    token.markup = markup;
    token.map = Some((start_line, line));
    true
}
