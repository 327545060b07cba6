use crate::common::char_len_at;
use crate::markdown::{Env, Markdown};
use crate::parser::Mode;
use crate::ruler::Ruler;
use crate::rules::inline::{
    autolink, backticks, balance_pairs, emphasis, entity, escape, fragments_join, html_inline,
    image, link, linkify, newline, strikethrough, text,
};
use crate::state::StateInline;
use crate::token::Token;

/// `(state, mode) -> matched`
pub type InlineRule = fn(&mut StateInline<'_>, Mode) -> bool;

/// Runs once over the finished token list of a container.
pub type InlinePostRule = fn(&mut StateInline<'_>);

#[derive(Debug, Clone)]
pub struct ParserInline {
    pub ruler: Ruler<InlineRule>,
    /// Pair resolution and text coalescing, run after tokenizing.
    pub ruler2: Ruler<InlinePostRule>,
}

impl Default for ParserInline {
    fn default() -> Self {
        Self::new()
    }
}

impl ParserInline {
    pub fn new() -> Self {
        let mut ruler: Ruler<InlineRule> = Ruler::new();
        ruler.push("text", text::text, &[]);
        ruler.push("linkify", linkify::linkify, &[]);
        ruler.push("newline", newline::newline, &[]);
        ruler.push("escape", escape::escape, &[]);
        ruler.push("backticks", backticks::backticks, &[]);
        ruler.push("strikethrough", strikethrough::tokenize, &[]);
        ruler.push("emphasis", emphasis::tokenize, &[]);
        ruler.push("link", link::link, &[]);
        ruler.push("image", image::image, &[]);
        ruler.push("autolink", autolink::autolink, &[]);
        ruler.push("html_inline", html_inline::html_inline, &[]);
        ruler.push("entity", entity::entity, &[]);

        let mut ruler2: Ruler<InlinePostRule> = Ruler::new();
        ruler2.push("balance_pairs", balance_pairs::balance_pairs, &[]);
        ruler2.push("strikethrough", strikethrough::post_process, &[]);
        ruler2.push("emphasis", emphasis::post_process, &[]);
        ruler2.push("fragments_join", fragments_join::fragments_join, &[]);

        Self { ruler, ruler2 }
    }

    /// Advances `state.pos` past exactly one token without emitting
    /// anything. Results are memoised per start position.
    ///
    /// # Panics
    ///
    /// When a rule reports a match without advancing `state.pos`.
    pub fn skip_token(&self, state: &mut StateInline<'_>) {
        let pos = state.pos;
        if let Some(&cached) = state.cache.get(&pos) {
            state.pos = cached;
            return;
        }

        let max_nesting = state.md.options.max_nesting;
        if state.level < max_nesting {
            let mut ok = false;
            for rule in self.ruler.get_rules("") {
                // No tokens are created while probing, so the level can
                // double as the recursion guard.
                state.level += 1;
                ok = rule(state, Mode::Probe);
                state.level -= 1;

                if ok {
                    if state.pos <= pos {
                        panic!("inline rule didn't increment state.pos (stuck at {pos})");
                    }
                    break;
                }
            }
            if !ok {
                state.pos += char_len_at(state.src, state.pos);
            }
        } else {
            // Too deep: treat the rest of the container as one token.
            log::debug!("inline nesting limit {max_nesting} reached at {pos}");
            state.pos = state.pos_max;
        }

        state.cache.insert(pos, state.pos);
    }

    /// Generates tokens for `[state.pos, state.pos_max)`.
    ///
    /// # Panics
    ///
    /// When a rule reports a match without advancing `state.pos`.
    pub fn tokenize(&self, state: &mut StateInline<'_>) {
        let rules = self.ruler.get_rules("");
        let end = state.pos_max;
        let max_nesting = state.md.options.max_nesting;

        while state.pos < end {
            let prev_pos = state.pos;
            let mut ok = false;

            if state.level < max_nesting {
                for rule in rules {
                    if rule(state, Mode::Commit) {
                        if state.pos <= prev_pos {
                            panic!("inline rule didn't increment state.pos (stuck at {prev_pos})");
                        }
                        ok = true;
                        break;
                    }
                }
            }

            if ok {
                if state.pos >= end {
                    break;
                }
                continue;
            }

            let len = char_len_at(state.src, state.pos);
            state.pending.push_str(&state.src[state.pos..state.pos + len]);
            state.pos += len;
        }

        if !state.pending.is_empty() {
            state.push_pending();
        }
    }

    /// Tokenizes `src` and runs the post-processing chain, appending the
    /// result to `out`.
    pub fn parse(&self, src: &str, md: &Markdown, env: &mut Env, out: &mut Vec<Token>) {
        self.parse_nested(src, md, env, 0, out);
    }

    /// Like [`ParserInline::parse`] but starting at nesting `level`, so
    /// that nested parses (image descriptions) share the depth limit.
    pub fn parse_nested(
        &self,
        src: &str,
        md: &Markdown,
        env: &mut Env,
        level: usize,
        out: &mut Vec<Token>,
    ) {
        let mut state = StateInline::new(src, md, env);
        state.level = level;
        state.pending_level = level;

        self.tokenize(&mut state);
        state.close_all_scopes();

        for rule in self.ruler2.get_rules("") {
            rule(&mut state);
        }

        out.append(&mut state.tokens);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::helpers::parse_link_label;
    use pretty_assertions::assert_eq;

    fn stuck(_state: &mut StateInline<'_>, _mode: Mode) -> bool {
        true
    }

    #[test]
    fn skip_token_memoises_probed_positions() {
        let md = Markdown::new();
        let mut env = Env::default();
        let mut state = StateInline::new("[[[a]]]", &md, &mut env);

        assert_eq!(parse_link_label(&mut state, 0, false), Some(6));
        assert_eq!(state.pos, 0);
        assert_eq!(state.cache.get(&1), Some(&2));
        assert_eq!(state.cache.get(&3), Some(&4));
        assert_eq!(state.cache.get(&5), Some(&6));
        assert!(!state.cache.contains_key(&0));
    }

    #[test]
    fn skip_token_jumps_to_cached_end() {
        let md = Markdown::new();
        let mut env = Env::default();
        let mut state = StateInline::new("[[[a]]]", &md, &mut env);

        // An entry no rule would produce shows the lookup wins.
        state.cache.insert(1, 6);
        state.pos = 1;
        md.inline.skip_token(&mut state);
        assert_eq!(state.pos, 6);
        assert_eq!(state.cache.len(), 1);
    }

    #[test]
    #[should_panic(expected = "inline rule didn't increment state.pos")]
    fn rule_that_does_not_advance_panics() {
        let mut md = Markdown::new();
        md.inline.ruler.before("text", "stuck", stuck, &[]).unwrap();
        md.render("a");
    }

    #[test]
    #[should_panic(expected = "inline rule didn't increment state.pos")]
    fn probe_that_does_not_advance_panics() {
        let mut md = Markdown::new();
        md.inline.ruler.before("text", "stuck", stuck, &[]).unwrap();
        let mut env = Env::default();
        let mut state = StateInline::new("a", &md, &mut env);
        md.inline.skip_token(&mut state);
    }
}
