use crate::common::{is_space, normalize_reference};
use crate::helpers::{parse_link_destination, parse_link_title};
use crate::markdown::LinkReference;
use crate::parser::Mode;
use crate::rules::block::terminated_by;
use crate::state::{ParentType, StateBlock};

/// Link reference definition: `[label]: destination "title"`.
///
/// Stores the definition in `env.references` (first definition wins) and
/// emits no tokens.
pub fn reference(
    state: &mut StateBlock<'_>,
    start_line: usize,
    _end_line: usize,
    mode: Mode,
) -> bool {
    let pos = state.b_marks[start_line] + state.t_shift[start_line];
    let end_line = state.line_max;
    let mut next_line = start_line + 1;

    if state.s_count[start_line] - state.blk_indent >= 4 {
        return false;
    }
    if state.byte_at(pos) != b'[' {
        return false;
    }

    // Collect the paragraph-like run of lines the definition may span.
    while next_line < end_line && !state.is_empty(next_line) {
        // Over-indented lines and lazy quote lines just continue.
        if state.s_count[next_line] - state.blk_indent > 3 || state.s_count[next_line] < 0 {
            next_line += 1;
            continue;
        }
        if terminated_by(state, "reference", ParentType::Reference, next_line, end_line) {
            break;
        }
        next_line += 1;
    }

    let text = state.get_lines(start_line, next_line, state.blk_indent, false);
    let text = text.trim();
    let bytes = text.as_bytes();
    let max = bytes.len();
    let mut lines = 0;

    let mut label_end = None;
    let mut pos = 1;
    while pos < max {
        match bytes[pos] {
            b'[' => return false,
            b']' => {
                label_end = Some(pos);
                break;
            }
            b'\n' => lines += 1,
            b'\\' => {
                pos += 1;
                if pos < max && bytes[pos] == b'\n' {
                    lines += 1;
                }
            }
            _ => {}
        }
        pos += 1;
    }

    let Some(label_end) = label_end else {
        return false;
    };
    if bytes.get(label_end + 1) != Some(&b':') {
        return false;
    }

    // [label]:   destination   'title'
    //         ^^^ optional whitespace, at most one newline
    pos = label_end + 2;
    while pos < max {
        match bytes[pos] {
            b'\n' => lines += 1,
            b if is_space(b) => {}
            _ => break,
        }
        pos += 1;
    }

    let Some(dest) = parse_link_destination(text, pos, max) else {
        return false;
    };
    let href = (state.md.normalize_link)(&dest.str);
    if !(state.md.validate_link)(&href) {
        return false;
    }
    pos = dest.pos;
    lines += dest.lines;

    // Rollback point if the title turns out to be invalid.
    let dest_end_pos = pos;
    let dest_end_lines = lines;

    let start = pos;
    while pos < max {
        match bytes[pos] {
            b'\n' => lines += 1,
            b if is_space(b) => {}
            _ => break,
        }
        pos += 1;
    }

    let mut title = String::new();
    match parse_link_title(text, pos, max) {
        Some(parsed) if pos < max && start != pos => {
            title = parsed.str;
            pos = parsed.pos;
            lines += parsed.lines;
        }
        _ => {
            pos = dest_end_pos;
            lines = dest_end_lines;
        }
    }

    // Only spaces may follow on the last line.
    while pos < max && is_space(bytes[pos]) {
        pos += 1;
    }

    if pos < max && bytes[pos] != b'\n' && !title.is_empty() {
        // Garbage after the title; the definition may still be valid
        // without it.
        title.clear();
        pos = dest_end_pos;
        lines = dest_end_lines;
        while pos < max && is_space(bytes[pos]) {
            pos += 1;
        }
    }

    if pos < max && bytes[pos] != b'\n' {
        return false;
    }

    let label = normalize_reference(&text[1..label_end]);
    if label.is_empty() {
        return false;
    }

    // A definition never interrupts anything.
    if mode.is_probe() {
        return true;
    }

    state
        .env
        .references
        .entry(label)
        .or_insert(LinkReference { href, title });

    state.line = start_line + lines + 1;
    true
}
