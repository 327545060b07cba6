use std::fmt;
use std::sync::Arc;

use serde::{Deserialize, Serialize};

/// Syntax highlighter callback: `(code, lang, attrs) -> html`.
///
/// Returning an empty string tells the renderer to escape the code itself.
/// A result starting with `<pre` is emitted as-is.
pub type Highlighter = Arc<dyn Fn(&str, &str, &str) -> String + Send + Sync>;

pub const DEFAULT_QUOTES: [&str; 4] = ["\u{201C}", "\u{201D}", "\u{2018}", "\u{2019}"];

/// Parser and renderer switches.
#[derive(Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Options {
    /// Allow raw HTML in the source to pass through.
    pub html: bool,
    /// Close void elements with ` />`.
    pub xhtml_out: bool,
    /// Render soft line breaks as `<br>`.
    pub breaks: bool,
    /// Class prefix for fenced code blocks.
    pub lang_prefix: String,
    /// Turn bare URLs into links.
    pub linkify: bool,
    /// Enable typographic replacements and smart quotes.
    pub typographer: bool,
    /// Double open, double close, single open, single close.
    pub quotes: [String; 4],
    #[serde(skip)]
    pub highlight: Option<Highlighter>,
    /// Depth limit for block containers, inline containers and nested parses.
    pub max_nesting: usize,
}

impl Default for Options {
    fn default() -> Self {
        Self {
            html: false,
            xhtml_out: false,
            breaks: false,
            lang_prefix: "language-".to_string(),
            linkify: false,
            typographer: false,
            quotes: DEFAULT_QUOTES.map(str::to_string),
            highlight: None,
            max_nesting: 100,
        }
    }
}

impl fmt::Debug for Options {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Options")
            .field("html", &self.html)
            .field("xhtml_out", &self.xhtml_out)
            .field("breaks", &self.breaks)
            .field("lang_prefix", &self.lang_prefix)
            .field("linkify", &self.linkify)
            .field("typographer", &self.typographer)
            .field("quotes", &self.quotes)
            .field("highlight", &self.highlight.as_ref().map(|_| "<fn>"))
            .field("max_nesting", &self.max_nesting)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults() {
        let o = Options::default();
        assert!(!o.html);
        assert_eq!(o.lang_prefix, "language-");
        assert_eq!(o.max_nesting, 100);
        assert_eq!(o.quotes[0], "\u{201C}");
    }

    #[test]
    fn debug_hides_highlighter() {
        let o = Options {
            highlight: Some(Arc::new(|code: &str, _: &str, _: &str| code.to_string())),
            ..Options::default()
        };
        assert!(format!("{o:?}").contains("highlight: Some(\"<fn>\")"));
    }
}
