use crate::common::is_space;
use crate::parser::Mode;
use crate::rules::block::terminated_by;
use crate::state::{ParentType, StateBlock};
use crate::token::Nesting;

/// Position after a `*`, `-` or `+` marker, if the line starts with one.
fn skip_bullet_list_marker(state: &StateBlock<'_>, start_line: usize) -> Option<usize> {
    let max = state.e_marks[start_line];
    let mut pos = state.b_marks[start_line] + state.t_shift[start_line];
    let marker = state.byte_at(pos);
    pos += 1;

    if marker != b'*' && marker != b'-' && marker != b'+' {
        return None;
    }
    // `-test` is not a list item.
    if pos < max && !is_space(state.byte_at(pos)) {
        return None;
    }
    Some(pos)
}

/// Position after a `1.` or `1)` marker of at most nine digits.
fn skip_ordered_list_marker(state: &StateBlock<'_>, start_line: usize) -> Option<usize> {
    let start = state.b_marks[start_line] + state.t_shift[start_line];
    let max = state.e_marks[start_line];
    let mut pos = start;

    if pos + 1 >= max {
        return None;
    }

    let ch = state.byte_at(pos);
    pos += 1;
    if !ch.is_ascii_digit() {
        return None;
    }

    loop {
        if pos >= max {
            return None;
        }
        let ch = state.byte_at(pos);
        pos += 1;

        if ch.is_ascii_digit() {
            if pos - start >= 10 {
                return None;
            }
            continue;
        }
        if ch == b')' || ch == b'.' {
            break;
        }
        return None;
    }

    if pos < max && !is_space(state.byte_at(pos)) {
        return None;
    }
    Some(pos)
}

/// Hides the paragraphs directly inside the items of a tight list.
fn mark_tight_paragraphs(state: &mut StateBlock<'_>, idx: usize) {
    let level = state.level + 2;
    let len = state.tokens.len().saturating_sub(2);
    let mut i = idx + 2;
    while i < len {
        if state.tokens[i].level == level && state.tokens[i].kind == "paragraph_open" {
            state.tokens[i + 2].hidden = true;
            state.tokens[i].hidden = true;
            i += 2;
        }
        i += 1;
    }
}

/// Bullet and ordered lists, including all of their items.
pub fn list(state: &mut StateBlock<'_>, start_line: usize, end_line: usize, mode: Mode) -> bool {
    let mut next_line = start_line;
    let mut tight = true;

    if state.s_count[next_line] - state.blk_indent >= 4 {
        return false;
    }

    // Too indented relative to the enclosing item to start a sibling:
    // it is code in that item instead.
    if state.list_indent >= 0
        && state.s_count[next_line] - state.list_indent >= 4
        && state.s_count[next_line] < state.blk_indent
    {
        return false;
    }

    // Lists may interrupt a paragraph only under extra conditions.
    let is_terminating_paragraph = mode.is_probe()
        && state.parent_type == ParentType::Paragraph
        && state.s_count[next_line] >= state.blk_indent;

    let mut start = 0;
    let mut marker_value = 0u64;
    let (is_ordered, mut pos_after_marker) =
        if let Some(pos) = skip_ordered_list_marker(state, next_line) {
            start = state.b_marks[next_line] + state.t_shift[next_line];
            marker_value = state.src[start..pos - 1].parse().unwrap_or(0);
            if is_terminating_paragraph && marker_value != 1 {
                return false;
            }
            (true, pos)
        } else if let Some(pos) = skip_bullet_list_marker(state, next_line) {
            (false, pos)
        } else {
            return false;
        };

    // An empty item can't interrupt a paragraph.
    if is_terminating_paragraph && state.skip_spaces(pos_after_marker) >= state.e_marks[next_line]
    {
        return false;
    }

    if mode.is_probe() {
        return true;
    }

    // A change of marker character starts a new list.
    let marker_char = state.byte_at(pos_after_marker - 1);
    let markup = (marker_char as char).to_string();

    let list_tok_idx = state.tokens.len();
    let token = if is_ordered {
        let token = state.push("ordered_list_open", "ol", Nesting::Opening);
        if marker_value != 1 {
            token.attr_push("start", marker_value.to_string());
        }
        token
    } else {
        state.push("bullet_list_open", "ul", Nesting::Opening)
    };
    token.markup = markup.clone();

    let mut prev_empty_end = false;
    let old_parent_type = state.parent_type;
    state.parent_type = ParentType::List;

    while next_line < end_line {
        let mut pos = pos_after_marker;
        let max = state.e_marks[next_line];

        let initial = state.s_count[next_line] + pos_after_marker as i32
            - (state.b_marks[next_line] + state.t_shift[next_line]) as i32;
        let mut offset = initial;

        while pos < max {
            match state.byte_at(pos) {
                b'\t' => offset += 4 - (offset + state.bs_count[next_line]) % 4,
                b' ' => offset += 1,
                _ => break,
            }
            pos += 1;
        }

        let content_start = pos;
        // `-    \n  3`: an item that starts empty is indented by one.
        let mut indent_after_marker = if content_start >= max {
            1
        } else {
            offset - initial
        };
        // Five or more spaces start indented code inside the item.
        if indent_after_marker > 4 {
            indent_after_marker = 1;
        }
        let indent = initial + indent_after_marker;

        let item_idx = state.tokens.len();
        let item_start = next_line;
        let info = if is_ordered {
            state.src[start..pos_after_marker - 1].to_string()
        } else {
            String::new()
        };
        let token = state.push("list_item_open", "li", Nesting::Opening);
        token.markup = markup.clone();
        token.info = info;

        let old_tight = state.tight;
        let old_t_shift = state.t_shift[next_line];
        let old_s_count = state.s_count[next_line];
        let old_list_indent = state.list_indent;

        state.list_indent = state.blk_indent;
        state.blk_indent = indent;
        state.tight = true;
        state.t_shift[next_line] = content_start - state.b_marks[next_line];
        state.s_count[next_line] = offset;

        if content_start >= max && state.is_empty(next_line + 1) {
            // An empty item followed by a blank line ends the list:
            // `-\n\n  foo` is a list and a paragraph.
            state.line = (state.line + 2).min(end_line);
        } else {
            let md = state.md;
            md.block.tokenize(state, next_line, end_line);
        }

        // Any loose item makes the whole list loose.
        if !state.tight || prev_empty_end {
            tight = false;
        }
        // A trailing blank line loosens the item unless it ends the list.
        prev_empty_end = (state.line - next_line) > 1 && state.is_empty(state.line - 1);

        state.blk_indent = state.list_indent;
        state.list_indent = old_list_indent;
        state.t_shift[next_line] = old_t_shift;
        state.s_count[next_line] = old_s_count;
        state.tight = old_tight;

        let token = state.push("list_item_close", "li", Nesting::Closing);
        token.markup = markup.clone();

        next_line = state.line;
        state.tokens[item_idx].map = Some((item_start, next_line));

        if next_line >= end_line {
            break;
        }
        if state.s_count[next_line] < state.blk_indent {
            break;
        }
        if state.s_count[next_line] - state.blk_indent >= 4 {
            break;
        }
        if terminated_by(state, "list", ParentType::List, next_line, end_line) {
            break;
        }

        let next_marker = if is_ordered {
            skip_ordered_list_marker(state, next_line)
        } else {
            skip_bullet_list_marker(state, next_line)
        };
        let Some(pos) = next_marker else {
            break;
        };
        pos_after_marker = pos;
        if is_ordered {
            start = state.b_marks[next_line] + state.t_shift[next_line];
        }
        if state.byte_at(pos_after_marker - 1) != marker_char {
            break;
        }
    }

    let token = if is_ordered {
        state.push("ordered_list_close", "ol", Nesting::Closing)
    } else {
        state.push("bullet_list_close", "ul", Nesting::Closing)
    };
    token.markup = markup;

    state.tokens[list_tok_idx].map = Some((start_line, next_line));
    state.line = next_line;
    state.parent_type = old_parent_type;

    if tight {
        mark_tight_paragraphs(state, list_tok_idx);
    }

    true
}

