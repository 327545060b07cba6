//! Inline chain rules and the post-processing passes of `ruler2`.

pub mod autolink;
pub mod backticks;
pub mod balance_pairs;
pub mod emphasis;
pub mod entity;
pub mod escape;
pub mod fragments_join;
pub mod html_inline;
pub mod image;
pub mod link;
pub mod linkify;
pub mod newline;
pub mod strikethrough;
pub mod text;

use crate::common::is_space;
use crate::state::StateInline;

/// Position of the first char at or after `pos` that is neither a space,
/// a tab nor a newline.
pub(crate) fn skip_link_whitespace(state: &StateInline<'_>, mut pos: usize) -> usize {
    while pos < state.pos_max {
        let ch = state.byte_at(pos);
        if !is_space(ch) && ch != b'\n' {
            break;
        }
        pos += 1;
    }
    pos
}
