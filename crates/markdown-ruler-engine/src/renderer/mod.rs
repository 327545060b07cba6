//! Token stream to HTML.
//!
//! ## Modules
//!
//! - `rules`: default per-kind overrides (code, fences, images, breaks, text, raw HTML)

pub mod rules;

use std::collections::HashMap;
use std::fmt;

use crate::common::escape_html;
use crate::markdown::Env;
use crate::options::Options;
use crate::token::{Nesting, Token};

/// `(tokens, idx, options, env, renderer) -> html`
pub type RenderRule = fn(&[Token], usize, &Options, &Env, &Renderer) -> String;

#[derive(Clone)]
pub struct Renderer {
    /// Overrides keyed by token kind. Kinds without an entry go through
    /// [`Renderer::render_token`].
    pub rules: HashMap<String, RenderRule>,
}

impl Default for Renderer {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for Renderer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut kinds: Vec<_> = self.rules.keys().collect();
        kinds.sort();
        f.debug_struct("Renderer").field("rules", &kinds).finish()
    }
}

impl Renderer {
    pub fn new() -> Self {
        let mut rules: HashMap<String, RenderRule> = HashMap::new();
        rules.insert("code_inline".into(), rules::code_inline);
        rules.insert("code_block".into(), rules::code_block);
        rules.insert("fence".into(), rules::fence);
        rules.insert("image".into(), rules::image);
        rules.insert("hardbreak".into(), rules::hardbreak);
        rules.insert("softbreak".into(), rules::softbreak);
        rules.insert("text".into(), rules::text);
        rules.insert("text_special".into(), rules::text);
        rules.insert("html_block".into(), rules::html_block);
        rules.insert("html_inline".into(), rules::html_inline);
        Self { rules }
    }

    /// Installs or replaces the override for `kind`.
    pub fn set_rule(&mut self, kind: &str, rule: RenderRule) {
        self.rules.insert(kind.to_string(), rule);
    }

    /// ` name="value"` for every attribute, both sides escaped.
    pub fn render_attrs(&self, token: &Token) -> String {
        let mut result = String::new();
        for (name, value) in &token.attrs {
            result.push(' ');
            result.push_str(&escape_html(name));
            result.push_str("=\"");
            result.push_str(&escape_html(value));
            result.push('"');
        }
        result
    }

    /// Generic rendering of one token as an opening, closing or void tag.
    pub fn render_token(&self, tokens: &[Token], idx: usize, options: &Options) -> String {
        let token = &tokens[idx];
        if token.hidden {
            return String::new();
        }

        let mut result = String::new();

        // Tight list items drop their paragraphs; keep block tags that
        // follow on their own line.
        if token.block && token.nesting != Nesting::Closing && idx > 0 && tokens[idx - 1].hidden {
            result.push('\n');
        }

        result.push_str(if token.nesting == Nesting::Closing {
            "</"
        } else {
            "<"
        });
        result.push_str(&token.tag);
        result.push_str(&self.render_attrs(token));

        if token.nesting == Nesting::SelfClosing && options.xhtml_out {
            result.push_str(" /");
        }

        let mut need_lf = false;
        if token.block {
            need_lf = true;
            if token.nesting == Nesting::Opening {
                if let Some(next) = tokens.get(idx + 1) {
                    if next.kind == "inline" || next.hidden {
                        need_lf = false;
                    } else if next.nesting == Nesting::Closing && next.tag == token.tag {
                        // `<li></li>`
                        need_lf = false;
                    }
                }
            }
        }

        result.push_str(if need_lf { ">\n" } else { ">" });
        result
    }

    /// Renders the children of an `inline` token.
    pub fn render_inline(&self, tokens: &[Token], options: &Options, env: &Env) -> String {
        let mut result = String::new();
        for (i, token) in tokens.iter().enumerate() {
            match self.rules.get(&token.kind) {
                Some(rule) => result.push_str(&rule(tokens, i, options, env, self)),
                None => result.push_str(&self.render_token(tokens, i, options)),
            }
        }
        result
    }

    /// Plain text of inline tokens, as used for image `alt` attributes.
    /// Markup is dropped and line breaks become `\n`.
    pub fn render_inline_as_text(&self, tokens: &[Token], options: &Options, env: &Env) -> String {
        let mut result = String::new();
        for token in tokens {
            match token.kind.as_str() {
                "text" | "text_special" | "html_inline" | "html_block" => {
                    result.push_str(&token.content);
                }
                "image" => {
                    if let Some(children) = &token.children {
                        result.push_str(&self.render_inline_as_text(children, options, env));
                    }
                }
                "softbreak" | "hardbreak" => result.push('\n'),
                _ => {}
            }
        }
        result
    }

    /// Renders a full token stream.
    pub fn render(&self, tokens: &[Token], options: &Options, env: &Env) -> String {
        let mut result = String::new();
        for (i, token) in tokens.iter().enumerate() {
            if token.kind == "inline" {
                if let Some(children) = &token.children {
                    result.push_str(&self.render_inline(children, options, env));
                }
            } else if let Some(rule) = self.rules.get(&token.kind) {
                result.push_str(&rule(tokens, i, options, env, self));
            } else {
                result.push_str(&self.render_token(tokens, i, options));
            }
        }
        result
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn block(kind: &str, tag: &str, nesting: Nesting) -> Token {
        let mut t = Token::new(kind, tag, nesting);
        t.block = true;
        t
    }

    #[test]
    fn attrs_are_escaped() {
        let mut t = Token::new("link_open", "a", Nesting::Opening);
        t.attr_push("href", "/a?b=1&c=\"2\"");
        assert_eq!(
            Renderer::new().render_attrs(&t),
            " href=\"/a?b=1&amp;c=&quot;2&quot;\""
        );
    }

    #[test]
    fn void_tags_follow_xhtml_option() {
        let tokens = vec![block("hr", "hr", Nesting::SelfClosing)];
        let r = Renderer::new();
        let mut options = Options::default();
        assert_eq!(r.render_token(&tokens, 0, &options), "<hr>\n");
        options.xhtml_out = true;
        assert_eq!(r.render_token(&tokens, 0, &options), "<hr />\n");
    }

    #[test]
    fn empty_element_stays_on_one_line() {
        let tokens = vec![
            block("list_item_open", "li", Nesting::Opening),
            block("list_item_close", "li", Nesting::Closing),
        ];
        let html = Renderer::new().render(&tokens, &Options::default(), &Env::default());
        assert_eq!(html, "<li></li>\n");
    }

    #[test]
    fn hidden_tokens_render_nothing() {
        let mut p = block("paragraph_open", "p", Nesting::Opening);
        p.hidden = true;
        let tokens = vec![p, block("hr", "hr", Nesting::SelfClosing)];
        let html = Renderer::new().render(&tokens, &Options::default(), &Env::default());
        assert_eq!(html, "\n<hr>\n");
    }

    #[test]
    fn custom_rule_overrides_default() {
        fn shout(tokens: &[Token], idx: usize, _: &Options, _: &Env, _: &Renderer) -> String {
            tokens[idx].content.to_uppercase()
        }
        let mut r = Renderer::new();
        r.set_rule("text", shout);
        let mut t = Token::new("text", "", Nesting::SelfClosing);
        t.content = "hi".into();
        assert_eq!(r.render_inline(&[t], &Options::default(), &Env::default()), "HI");
    }
}
