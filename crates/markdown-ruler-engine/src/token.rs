//! The token: the single unit of output shared by every stage.
//!
//! Block rules emit block-level tokens, the inline tokenizer fills the
//! `children` of `inline` containers, and the renderer walks the result.

use std::any::Any;
use std::fmt;
use std::sync::Arc;

/// Whether a token opens, closes or stands alone.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Nesting {
    Opening,
    #[default]
    SelfClosing,
    Closing,
}

impl Nesting {
    /// Change in nesting level this token contributes (+1, 0, -1).
    pub fn delta(self) -> i32 {
        match self {
            Nesting::Opening => 1,
            Nesting::SelfClosing => 0,
            Nesting::Closing => -1,
        }
    }
}

/// Opaque payload attached by rules or plugins.
pub type TokenMeta = Arc<dyn Any + Send + Sync>;

#[derive(Clone, Default)]
pub struct Token {
    /// Open-ended type tag, e.g. `"paragraph_open"`, `"text"`.
    pub kind: String,
    /// HTML tag name, empty for tokens that render no element.
    pub tag: String,
    pub nesting: Nesting,
    pub level: usize,
    /// Ordered `(name, value)` pairs; names are unique.
    pub attrs: Vec<(String, String)>,
    /// Half-open `(start_line, end_line)` source range for block tokens.
    pub map: Option<(usize, usize)>,
    /// Present only on `inline` containers and images.
    pub children: Option<Vec<Token>>,
    pub content: String,
    /// Source markers, e.g. `*` or the fence string.
    pub markup: String,
    /// Fence info string, autolink/escape/entity discriminator.
    pub info: String,
    pub meta: Option<TokenMeta>,
    pub block: bool,
    pub hidden: bool,
}

impl Token {
    pub fn new(kind: impl Into<String>, tag: impl Into<String>, nesting: Nesting) -> Self {
        Self {
            kind: kind.into(),
            tag: tag.into(),
            nesting,
            ..Self::default()
        }
    }

    pub fn attr_index(&self, name: &str) -> Option<usize> {
        self.attrs.iter().position(|(n, _)| n == name)
    }

    pub fn attr_get(&self, name: &str) -> Option<&str> {
        self.attr_index(name).map(|i| self.attrs[i].1.as_str())
    }

    /// Appends without checking for an existing attribute of the same name.
    /// Callers that may collide should use [`Token::attr_set`].
    pub fn attr_push(&mut self, name: impl Into<String>, value: impl Into<String>) {
        self.attrs.push((name.into(), value.into()));
    }

    /// Replaces the value in place, or appends if absent.
    pub fn attr_set(&mut self, name: &str, value: impl Into<String>) {
        match self.attr_index(name) {
            Some(i) => self.attrs[i].1 = value.into(),
            None => self.attrs.push((name.to_string(), value.into())),
        }
    }

    /// Appends `value` to an existing attribute separated by a space,
    /// e.g. for accumulating class names.
    pub fn attr_join(&mut self, name: &str, value: &str) {
        match self.attr_index(name) {
            Some(i) => {
                let existing = &mut self.attrs[i].1;
                existing.push(' ');
                existing.push_str(value);
            }
            None => self.attrs.push((name.to_string(), value.to_string())),
        }
    }
}

impl fmt::Debug for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Token")
            .field("kind", &self.kind)
            .field("tag", &self.tag)
            .field("nesting", &self.nesting)
            .field("level", &self.level)
            .field("attrs", &self.attrs)
            .field("map", &self.map)
            .field("children", &self.children)
            .field("content", &self.content)
            .field("markup", &self.markup)
            .field("info", &self.info)
            .field("meta", &self.meta.as_ref().map(|_| "<opaque>"))
            .field("block", &self.block)
            .field("hidden", &self.hidden)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn attr_set_keeps_position_and_last_value() {
        let mut t = Token::new("link_open", "a", Nesting::Opening);
        t.attr_push("href", "/a");
        t.attr_push("title", "x");
        t.attr_set("href", "/b");
        assert_eq!(
            t.attrs,
            vec![
                ("href".to_string(), "/b".to_string()),
                ("title".to_string(), "x".to_string())
            ]
        );
    }

    #[test]
    fn attr_join_appends_with_single_space() {
        let mut t = Token::new("fence", "code", Nesting::SelfClosing);
        t.attr_join("class", "a");
        t.attr_join("class", "b");
        assert_eq!(t.attr_get("class"), Some("a b"));
    }

    #[test]
    fn missing_attr_is_none() {
        let t = Token::default();
        assert_eq!(t.attr_index("id"), None);
        assert_eq!(t.attr_get("id"), None);
    }

    #[test]
    fn nesting_delta() {
        assert_eq!(Nesting::Opening.delta(), 1);
        assert_eq!(Nesting::SelfClosing.delta(), 0);
        assert_eq!(Nesting::Closing.delta(), -1);
    }
}
