use crate::markdown::{Env, Markdown};
use crate::token::Token;

/// Top-level context passed through the core chain.
pub struct StateCore<'a> {
    pub src: String,
    pub md: &'a Markdown,
    pub env: &'a mut Env,
    pub tokens: Vec<Token>,
    /// Parse `src` as a single inline container, skipping block rules.
    pub inline_mode: bool,
}

impl<'a> StateCore<'a> {
    pub fn new(src: &str, md: &'a Markdown, env: &'a mut Env) -> Self {
        Self {
            src: src.to_string(),
            md,
            env,
            tokens: Vec::new(),
            inline_mode: false,
        }
    }
}
