//! The facade tying the three stages, the renderer and the options
//! together.

use std::collections::HashMap;

use crate::common::links;
use crate::error::{ConfigError, RulerError};
use crate::options::Options;
use crate::parser::{ParserBlock, ParserCore, ParserInline};
use crate::presets::{Components, Preset};
use crate::renderer::Renderer;
use crate::ruler::Ruler;
use crate::state::StateCore;
use crate::token::Token;

/// A resolved link reference definition.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct LinkReference {
    pub href: String,
    pub title: String,
}

/// Per-document state shared by all stages of one parse.
#[derive(Debug, Clone, Default)]
pub struct Env {
    /// Definitions keyed by normalised label.
    pub references: HashMap<String, LinkReference>,
}

/// A configured Markdown engine.
///
/// Parsing only borrows the instance, so one engine can serve concurrent
/// parses. Changing rules or options needs `&mut self`.
///
/// ```
/// use markdown_ruler_engine::Markdown;
///
/// let md = Markdown::new();
/// assert_eq!(md.render("*hi*"), "<p><em>hi</em></p>\n");
/// ```
#[derive(Debug, Clone)]
pub struct Markdown {
    pub core: ParserCore,
    pub block: ParserBlock,
    pub inline: ParserInline,
    pub renderer: Renderer,
    pub options: Options,
    /// Rejects dangerous link targets after normalisation.
    pub validate_link: fn(&str) -> bool,
    /// Percent-encodes link targets for `href` / `src`.
    pub normalize_link: fn(&str) -> String,
    /// Decodes link targets for display as link text.
    pub normalize_link_text: fn(&str) -> String,
}

impl Default for Markdown {
    fn default() -> Self {
        Self::new()
    }
}

/// Enables exactly `names` (or everything for `None`), skipping names the
/// ruler doesn't know.
fn restrict<F: Copy>(ruler: &mut Ruler<F>, names: Option<&[&str]>) {
    match names {
        // With ignore_invalid set this can't fail.
        Some(names) => {
            let _ = ruler.enable_only(names, true);
        }
        None => ruler.enable_all(),
    }
}

impl Markdown {
    /// The `default` preset: every rule on, raw HTML off.
    pub fn new() -> Self {
        Self {
            core: ParserCore::new(),
            block: ParserBlock::new(),
            inline: ParserInline::new(),
            renderer: Renderer::new(),
            options: Preset::Default.options(),
            validate_link: links::validate_link,
            normalize_link: links::normalize_link,
            normalize_link_text: links::normalize_link_text,
        }
    }

    pub fn with_preset(preset: Preset) -> Self {
        let mut md = Self::new();
        md.options = preset.options();
        md.apply_components(preset.components());
        md
    }

    /// Switches to `preset`, replacing options and the set of enabled
    /// rules. Fails without changing anything when the preset names a rule
    /// that has been removed from its chain.
    pub fn configure(&mut self, preset: Preset) -> Result<(), ConfigError> {
        let components = preset.components();

        let mut missing = Vec::new();
        let chains: [(Option<&[&str]>, Vec<&str>); 4] = [
            (components.core, self.core.ruler.names()),
            (components.block, self.block.ruler.names()),
            (components.inline, self.inline.ruler.names()),
            (components.inline_post, self.inline.ruler2.names()),
        ];
        for (wanted, known) in &chains {
            for name in wanted.unwrap_or_default() {
                if !known.contains(name) {
                    missing.push(name.to_string());
                }
            }
        }
        if !missing.is_empty() {
            return Err(RulerError::InvalidRuleNames(missing).into());
        }

        self.options = preset.options();
        self.apply_components(components);
        log::debug!("configured preset {preset}");
        Ok(())
    }

    fn apply_components(&mut self, components: Components) {
        restrict(&mut self.core.ruler, components.core);
        restrict(&mut self.block.ruler, components.block);
        restrict(&mut self.inline.ruler, components.inline);
        restrict(&mut self.inline.ruler2, components.inline_post);
    }

    pub fn set(&mut self, options: Options) -> &mut Self {
        self.options = options;
        self
    }

    /// Names unknown to every chain.
    fn unknown_rules<S: AsRef<str>>(&self, names: &[S]) -> Vec<String> {
        names
            .iter()
            .map(|name| name.as_ref())
            .filter(|name| {
                !self.core.ruler.contains(name)
                    && !self.block.ruler.contains(name)
                    && !self.inline.ruler.contains(name)
                    && !self.inline.ruler2.contains(name)
            })
            .map(str::to_string)
            .collect()
    }

    /// Validates `names` against all chains before anything changes.
    fn check_rules<S: AsRef<str>>(
        &self,
        names: &[S],
        ignore_invalid: bool,
    ) -> Result<(), RulerError> {
        let missing = self.unknown_rules(names);
        if !missing.is_empty() && !ignore_invalid {
            return Err(RulerError::InvalidRuleNames(missing));
        }
        Ok(())
    }

    /// Enables the named rules in every chain that has them. Returns the
    /// names found, once per chain.
    pub fn enable<S: AsRef<str>>(
        &mut self,
        names: &[S],
        ignore_invalid: bool,
    ) -> Result<Vec<String>, RulerError> {
        self.check_rules(names, ignore_invalid)?;
        let mut found = self.core.ruler.enable(names, true)?;
        found.extend(self.block.ruler.enable(names, true)?);
        found.extend(self.inline.ruler.enable(names, true)?);
        found.extend(self.inline.ruler2.enable(names, true)?);
        log::debug!("enabled rules {found:?}");
        Ok(found)
    }

    pub fn disable<S: AsRef<str>>(
        &mut self,
        names: &[S],
        ignore_invalid: bool,
    ) -> Result<Vec<String>, RulerError> {
        self.check_rules(names, ignore_invalid)?;
        let mut found = self.core.ruler.disable(names, true)?;
        found.extend(self.block.ruler.disable(names, true)?);
        found.extend(self.inline.ruler.disable(names, true)?);
        found.extend(self.inline.ruler2.disable(names, true)?);
        log::debug!("disabled rules {found:?}");
        Ok(found)
    }

    /// Disables every rule in every chain except `names`.
    pub fn enable_only<S: AsRef<str>>(
        &mut self,
        names: &[S],
        ignore_invalid: bool,
    ) -> Result<Vec<String>, RulerError> {
        self.check_rules(names, ignore_invalid)?;
        let mut found = self.core.ruler.enable_only(names, true)?;
        found.extend(self.block.ruler.enable_only(names, true)?);
        found.extend(self.inline.ruler.enable_only(names, true)?);
        found.extend(self.inline.ruler2.enable_only(names, true)?);
        Ok(found)
    }

    /// Applies a plugin: any function that edits the engine, typically by
    /// inserting rules into the chains or the renderer.
    pub fn use_plugin<P>(&mut self, plugin: P) -> &mut Self
    where
        P: FnOnce(&mut Markdown),
    {
        plugin(self);
        self
    }

    /// Runs the core chain and returns the token stream. Link reference
    /// definitions found along the way are stored in `env`.
    pub fn parse(&self, src: &str, env: &mut Env) -> Vec<Token> {
        let mut state = StateCore::new(src, self, env);
        self.core.process(&mut state);
        state.tokens
    }

    /// Like [`Markdown::parse`] but treats the whole source as a single
    /// inline container: no paragraphs or other blocks.
    pub fn parse_inline(&self, src: &str, env: &mut Env) -> Vec<Token> {
        let mut state = StateCore::new(src, self, env);
        state.inline_mode = true;
        self.core.process(&mut state);
        state.tokens
    }

    pub fn render(&self, src: &str) -> String {
        let mut env = Env::default();
        self.render_with_env(src, &mut env)
    }

    pub fn render_with_env(&self, src: &str, env: &mut Env) -> String {
        let tokens = self.parse(src, env);
        self.renderer.render(&tokens, &self.options, env)
    }

    /// Renders without a paragraph wrapper.
    pub fn render_inline(&self, src: &str) -> String {
        let mut env = Env::default();
        let tokens = self.parse_inline(src, &mut env);
        self.renderer.render(&tokens, &self.options, &env)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn assert_send_sync<T: Send + Sync>() {}

    #[test]
    fn engine_is_shareable_across_threads() {
        assert_send_sync::<Markdown>();
    }

    #[test]
    fn enable_unknown_rule_fails_atomically() {
        let mut md = Markdown::new();
        md.disable(&["emphasis"], false).unwrap();
        let err = md.enable(&["emphasis", "nope"], false).unwrap_err();
        assert_eq!(err, RulerError::InvalidRuleNames(vec!["nope".into()]));
        assert!(!md.inline.ruler.is_enabled("emphasis"));
    }

    #[test]
    fn disable_reports_names_per_chain() {
        let mut md = Markdown::new();
        let found = md.disable(&["emphasis", "nope"], true).unwrap();
        // `emphasis` lives in both the inline chain and its post-pass.
        assert_eq!(found, vec!["emphasis".to_string(), "emphasis".to_string()]);
    }

    #[test]
    fn zero_preset_keeps_only_paragraph_and_text() {
        let md = Markdown::with_preset(Preset::Zero);
        assert_eq!(md.render("# *a*"), "<p># *a*</p>\n");
    }

    #[test]
    fn configure_restores_rules_disabled_earlier() {
        let mut md = Markdown::new();
        md.disable(&["heading"], false).unwrap();
        md.configure(Preset::Default).unwrap();
        assert_eq!(md.render("# a"), "<h1>a</h1>\n");
    }

    #[test]
    fn configure_rejects_preset_naming_removed_rule() {
        let mut md = Markdown::new();
        md.block.ruler = Ruler::new();
        let err = md.configure(Preset::Zero).unwrap_err();
        assert_eq!(
            err,
            ConfigError::Ruler(RulerError::InvalidRuleNames(vec!["paragraph".into()]))
        );
    }

    #[test]
    fn parse_inline_has_no_paragraph() {
        let md = Markdown::new();
        assert_eq!(md.render_inline("a *b*"), "a <em>b</em>");
    }

    #[test]
    fn references_are_collected_into_env() {
        let md = Markdown::new();
        let mut env = Env::default();
        md.parse("[Foo  Bar]: /url 'T'\n", &mut env);
        assert_eq!(
            env.references.get("FOO BAR"),
            Some(&LinkReference {
                href: "/url".into(),
                title: "T".into()
            })
        );
    }

    #[test]
    fn plugin_can_replace_a_render_rule() {
        fn upper(tokens: &[Token], idx: usize, _: &Options, _: &Env, _: &Renderer) -> String {
            tokens[idx].content.to_uppercase()
        }
        let mut md = Markdown::new();
        md.use_plugin(|md| md.renderer.set_rule("text", upper));
        assert_eq!(md.render("abc"), "<p>ABC</p>\n");
    }
}
