//! Built-in rules, grouped by the stage whose chain they are registered on.

pub mod block;
pub mod core;
pub mod inline;
