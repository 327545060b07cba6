//! # markdown-ruler-engine
//!
//! A Markdown to HTML engine built from ordered chains of named rules.
//! Three stages run in sequence: the core chain drives the block stage
//! (lines into block tokens) and the inline stage (inline containers into
//! child tokens), then the renderer turns the token stream into HTML.
//! Every stage can be extended by inserting, replacing or toggling rules.
//!
//! ## Modules
//!
//! - **`markdown`**: The [`Markdown`] facade, presets and per-parse [`Env`]
//! - **`ruler`**: Ordered, named rule registry with alternate chains
//! - **`parser`**: Stage drivers for the core, block and inline chains
//! - **`rules`**: Built-in core, block and inline rules
//! - **`state`**: Mutable parse contexts handed to rules
//! - **`renderer`**: Token stream to HTML, with per-kind overrides
//! - **`helpers`**: Link label, destination and title parsers
//! - **`common`**: Character classes, escaping, entities and link hooks
//! - **`snapshot`**: Token dumps and invariant checks for tests

pub mod common;
pub mod error;
pub mod helpers;
pub mod markdown;
pub mod options;
pub mod parser;
pub mod presets;
pub mod renderer;
pub mod ruler;
pub mod rules;
pub mod snapshot;
pub mod state;
pub mod token;

pub use error::{ConfigError, RulerError};
pub use markdown::{Env, LinkReference, Markdown};
pub use options::{Highlighter, Options};
pub use parser::Mode;
pub use presets::Preset;
pub use renderer::{RenderRule, Renderer};
pub use ruler::Ruler;
pub use token::{Nesting, Token};
