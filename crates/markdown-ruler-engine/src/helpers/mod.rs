//! Link component parsers shared by the `link`, `image` and `reference`
//! rules.

mod link_destination;
mod link_label;
mod link_title;

pub use link_destination::parse_link_destination;
pub use link_label::parse_link_label;
pub use link_title::parse_link_title;

/// A successfully parsed destination or title.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsedLink {
    /// Position just past the parsed text.
    pub pos: usize,
    /// Newlines crossed.
    pub lines: usize,
    /// Unescaped value.
    pub str: String,
}
