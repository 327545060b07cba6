//! Stage drivers: each owns a [`Ruler`](crate::ruler::Ruler) and runs its
//! chain over a parse context.
//!
//! ## Modules
//!
//! - `core`: top-level chain (normalize, block, inline, typographer)
//! - `block`: line-oriented block tokenizer
//! - `inline`: character-oriented inline tokenizer and pair post-processing

pub mod block;
pub mod core;
pub mod inline;

pub use self::block::{BlockRule, ParserBlock};
pub use self::core::{CoreRule, ParserCore};
pub use self::inline::{InlinePostRule, InlineRule, ParserInline};

/// How a rule is being invoked.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    /// Report whether the rule would match, advancing the cursor but
    /// emitting no tokens.
    Probe,
    /// Match and emit tokens.
    Commit,
}

impl Mode {
    pub fn is_probe(self) -> bool {
        self == Mode::Probe
    }
}
