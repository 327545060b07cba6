//! # Snapshot Testing Support
//!
//! Utilities for testing the engine via snapshot assertions and invariant
//! checks.
//!
//! ## Modules
//!
//! - **`dump`**: Renders a token stream as stable, indented text for `insta`
//!   snapshots
//! - **`invariants`**: Structural checks every token stream must pass
//!   (balanced nesting, consistent levels, children only on containers)

pub mod dump;
pub mod invariants;

pub use dump::dump;
pub use invariants::check as invariants;
