//! Block rules. Each takes `(state, start_line, end_line, mode)` and, on
//! success, advances `state.line` past the lines it consumed.
//!
//! Rules listed in an alt chain (`paragraph`, `reference`, `blockquote`,
//! `list`) are probed by that container to decide whether a line ends it.

pub mod blockquote;
pub mod code;
pub mod fence;
pub mod heading;
pub mod hr;
pub mod html_block;
pub mod lheading;
pub mod list;
pub mod paragraph;
pub mod reference;

use crate::parser::Mode;
use crate::state::{ParentType, StateBlock};

/// Probes the rules of `chain` at `line`; true when one of them would
/// start a block there. `parent` is the container type they should see.
pub(crate) fn terminated_by(
    state: &mut StateBlock<'_>,
    chain: &str,
    parent: ParentType,
    line: usize,
    end_line: usize,
) -> bool {
    let md = state.md;
    let old_parent = state.parent_type;
    state.parent_type = parent;
    let terminate = md
        .block
        .ruler
        .get_rules(chain)
        .iter()
        .any(|rule| rule(state, line, end_line, Mode::Probe));
    state.parent_type = old_parent;
    terminate
}
