//! Per-stage parse contexts.
//!
//! Each stage owns its tokens while it runs and hands them to the next
//! stage when done. Rule functions receive the state explicitly.

pub mod block;
pub mod core;
pub mod inline;

pub use self::block::{ParentType, StateBlock};
pub use self::core::StateCore;
pub use self::inline::{Delimiter, ScanResult, StateInline};
