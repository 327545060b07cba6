use crate::parser::Mode;
use crate::rules::block::terminated_by;
use crate::state::{ParentType, StateBlock};
use crate::token::Nesting;

/// Setext heading: paragraph text underlined with `=` or `-`.
pub fn lheading(
    state: &mut StateBlock<'_>,
    start_line: usize,
    end_line: usize,
    mode: Mode,
) -> bool {
    if state.s_count[start_line] - state.blk_indent >= 4 {
        return false;
    }

    let mut level = 0;
    let mut marker = 0u8;
    let mut next_line = start_line + 1;

    while next_line < end_line && !state.is_empty(next_line) {
        // Would be indented code, but after paragraph text it's a lazy
        // continuation.
        if state.s_count[next_line] - state.blk_indent > 3 {
            next_line += 1;
            continue;
        }

        if state.s_count[next_line] >= state.blk_indent {
            let mut pos = state.b_marks[next_line] + state.t_shift[next_line];
            let max = state.e_marks[next_line];

            if pos < max {
                marker = state.byte_at(pos);
                if marker == b'-' || marker == b'=' {
                    pos = state.skip_chars(pos, marker);
                    pos = state.skip_spaces(pos);
                    if pos >= max {
                        level = if marker == b'=' { 1 } else { 2 };
                        break;
                    }
                }
            }
        }

        // Lazy blockquote line, already checked there.
        if state.s_count[next_line] < 0 {
            next_line += 1;
            continue;
        }

        if terminated_by(state, "paragraph", ParentType::Paragraph, next_line, end_line) {
            break;
        }
        next_line += 1;
    }

    if level == 0 {
        return false;
    }

    if mode.is_probe() {
        return true;
    }

    let content = state
        .get_lines(start_line, next_line, state.blk_indent, false)
        .trim()
        .to_string();

    state.line = next_line + 1;
    let line = state.line;
    let tag = format!("h{level}");
    let markup = (marker as char).to_string();

    let token = state.push("heading_open", &tag, Nesting::Opening);
    token.markup = markup.clone();
    token.map = Some((start_line, line));

    let token = state.push("inline", "", Nesting::SelfClosing);
    token.content = content;
    token.map = Some((start_line, line - 1));
    token.children = Some(Vec::new());

    let token = state.push("heading_close", &tag, Nesting::Closing);
    token.markup = markup;
    true
}
