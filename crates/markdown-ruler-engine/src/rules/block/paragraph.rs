use crate::parser::Mode;
use crate::rules::block::terminated_by;
use crate::state::{ParentType, StateBlock};
use crate::token::Nesting;

/// Fallback rule: everything up to a blank line or an interrupting block
/// becomes a paragraph.
pub fn paragraph(
    state: &mut StateBlock<'_>,
    start_line: usize,
    end_line: usize,
    _mode: Mode,
) -> bool {
    let old_parent_type = state.parent_type;
    state.parent_type = ParentType::Paragraph;
    let mut next_line = start_line + 1;

    while next_line < end_line && !state.is_empty(next_line) {
        // Over-indented lines and lazy quote lines continue the paragraph.
        if state.s_count[next_line] - state.blk_indent > 3 || state.s_count[next_line] < 0 {
            next_line += 1;
            continue;
        }
        if terminated_by(state, "paragraph", ParentType::Paragraph, next_line, end_line) {
            break;
        }
        next_line += 1;
    }

    let content = state
        .get_lines(start_line, next_line, state.blk_indent, false)
        .trim()
        .to_string();

    state.line = next_line;

    let token = state.push("paragraph_open", "p", Nesting::Opening);
    token.map = Some((start_line, next_line));

    let token = state.push("inline", "", Nesting::SelfClosing);
    token.content = content;
    token.map = Some((start_line, next_line));
    token.children = Some(Vec::new());

    state.push("paragraph_close", "p", Nesting::Closing);

    state.parent_type = old_parent_type;
    true
}
