use crate::common::is_space;
use crate::parser::Mode;
use crate::rules::block::terminated_by;
use crate::state::{ParentType, StateBlock};
use crate::token::Nesting;

/// Line table entries overwritten while the quote's content is parsed.
struct SavedLine {
    b_mark: usize,
    bs_count: i32,
    s_count: i32,
    t_shift: usize,
}

/// Block quote. Rewrites the line tables so that `>` markers look like
/// indentation, tokenizes the content as a nested block, then restores
/// the tables.
pub fn blockquote(
    state: &mut StateBlock<'_>,
    start_line: usize,
    end_line: usize,
    mode: Mode,
) -> bool {
    let mut pos = state.b_marks[start_line] + state.t_shift[start_line];
    let old_line_max = state.line_max;

    if state.s_count[start_line] - state.blk_indent >= 4 {
        return false;
    }
    if state.byte_at(pos) != b'>' {
        return false;
    }
    if mode.is_probe() {
        return true;
    }

    let mut saved: Vec<SavedLine> = Vec::new();
    let old_parent_type = state.parent_type;
    state.parent_type = ParentType::Blockquote;

    let mut last_line_empty = false;
    let mut next_line = start_line;

    while next_line < end_line {
        let is_outdented = state.s_count[next_line] < state.blk_indent;
        pos = state.b_marks[next_line] + state.t_shift[next_line];
        let max = state.e_marks[next_line];

        if pos >= max {
            // Empty line outside the quote.
            break;
        }

        if state.byte_at(pos) == b'>' && !is_outdented {
            pos += 1;
            let mut initial = state.s_count[next_line] + 1;
            let space_after_marker;
            let mut adjust_tab = false;

            match state.byte_at(pos) {
                b' ' => {
                    pos += 1;
                    initial += 1;
                    space_after_marker = true;
                }
                b'\t' => {
                    space_after_marker = true;
                    if (state.bs_count[next_line] + initial) % 4 == 3 {
                        // The tab reaches exactly one column past the marker.
                        pos += 1;
                        initial += 1;
                    } else {
                        adjust_tab = true;
                    }
                }
                _ => space_after_marker = false,
            }

            let mut offset = initial;
            saved.push(SavedLine {
                b_mark: state.b_marks[next_line],
                bs_count: state.bs_count[next_line],
                s_count: state.s_count[next_line],
                t_shift: state.t_shift[next_line],
            });
            state.b_marks[next_line] = pos;

            while pos < max {
                let ch = state.byte_at(pos);
                if !is_space(ch) {
                    break;
                }
                if ch == b'\t' {
                    offset +=
                        4 - (offset + state.bs_count[next_line] + i32::from(adjust_tab)) % 4;
                } else {
                    offset += 1;
                }
                pos += 1;
            }

            last_line_empty = pos >= max;

            state.bs_count[next_line] =
                state.s_count[next_line] + 1 + i32::from(space_after_marker);
            state.s_count[next_line] = offset - initial;
            state.t_shift[next_line] = pos - state.b_marks[next_line];

            next_line += 1;
            continue;
        }

        // Not a quoted line, and the previous quoted line was blank.
        if last_line_empty {
            break;
        }

        if terminated_by(state, "blockquote", ParentType::Blockquote, next_line, end_line) {
            // Paragraphs inside the quote must not continue past this
            // line, so cap the line range they may look at.
            state.line_max = next_line;

            if state.blk_indent != 0 {
                // Content is parsed with blk_indent 0; shift this line so
                // its indent reads the same.
                saved.push(SavedLine {
                    b_mark: state.b_marks[next_line],
                    bs_count: state.bs_count[next_line],
                    s_count: state.s_count[next_line],
                    t_shift: state.t_shift[next_line],
                });
                state.s_count[next_line] -= state.blk_indent;
            }
            break;
        }

        saved.push(SavedLine {
            b_mark: state.b_marks[next_line],
            bs_count: state.bs_count[next_line],
            s_count: state.s_count[next_line],
            t_shift: state.t_shift[next_line],
        });

        // Lazy continuation line.
        state.s_count[next_line] = -1;
        next_line += 1;
    }

    let old_indent = state.blk_indent;
    state.blk_indent = 0;

    let open_idx = state.tokens.len();
    let token = state.push("blockquote_open", "blockquote", Nesting::Opening);
    token.markup = ">".to_string();

    let md = state.md;
    md.block.tokenize(state, start_line, next_line);

    let token = state.push("blockquote_close", "blockquote", Nesting::Closing);
    token.markup = ">".to_string();

    state.line_max = old_line_max;
    state.parent_type = old_parent_type;
    state.tokens[open_idx].map = Some((start_line, state.line));

    for (i, line) in saved.into_iter().enumerate() {
        let n = start_line + i;
        state.b_marks[n] = line.b_mark;
        state.t_shift[n] = line.t_shift;
        state.s_count[n] = line.s_count;
        state.bs_count[n] = line.bs_count;
    }
    state.blk_indent = old_indent;

    true
}
