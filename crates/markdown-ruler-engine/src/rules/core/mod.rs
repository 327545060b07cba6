//! Core chain: source cleanup, the block and inline stages, and the
//! typographer passes over finished inline children.

pub mod block;
pub mod inline;
pub mod linkify;
pub mod normalize;
pub mod replacements;
pub mod smartquotes;
pub mod text_join;
