use crate::common::is_space;
use crate::parser::Mode;
use crate::state::StateBlock;
use crate::token::Nesting;

/// ATX heading, `#` through `######`.
pub fn heading(
    state: &mut StateBlock<'_>,
    start_line: usize,
    _end_line: usize,
    mode: Mode,
) -> bool {
    let mut pos = state.b_marks[start_line] + state.t_shift[start_line];
    let mut max = state.e_marks[start_line];

    if state.s_count[start_line] - state.blk_indent >= 4 {
        return false;
    }

    let mut ch = state.byte_at(pos);
    if ch != b'#' || pos >= max {
        return false;
    }

    let mut level = 1;
    pos += 1;
    ch = state.byte_at(pos);
    while ch == b'#' && pos < max && level <= 6 {
        level += 1;
        pos += 1;
        ch = state.byte_at(pos);
    }

    if level > 6 || (pos < max && !is_space(ch)) {
        return false;
    }

    if mode.is_probe() {
        return true;
    }

    // Strip an optional closing sequence: `## title ##  `.
    max = state.skip_spaces_back(max, pos);
    let tmp = state.skip_chars_back(max, b'#', pos);
    if tmp > pos && is_space(state.byte_at(tmp - 1)) {
        max = tmp;
    }

    state.line = start_line + 1;
    let line = state.line;
    let tag = format!("h{level}");
    let markup = "#".repeat(level);
    let content = state.src[pos..max].trim().to_string();

    let token = state.push("heading_open", &tag, Nesting::Opening);
    token.markup = markup.clone();
    token.map = Some((start_line, line));

    let token = state.push("inline", "", Nesting::SelfClosing);
    token.content = content;
    token.map = Some((start_line, line));
    token.children = Some(Vec::new());

    let token = state.push("heading_close", &tag, Nesting::Closing);
    token.markup = markup;
    true
}
