use crate::markdown::{Env, Markdown};
use crate::parser::Mode;
use crate::ruler::Ruler;
use crate::rules::block::{
    blockquote, code, fence, heading, hr, html_block, lheading, list, paragraph, reference,
};
use crate::state::StateBlock;
use crate::token::Token;

/// `(state, start_line, end_line, mode) -> matched`
pub type BlockRule = fn(&mut StateBlock<'_>, usize, usize, Mode) -> bool;

#[derive(Debug, Clone)]
pub struct ParserBlock {
    pub ruler: Ruler<BlockRule>,
}

impl Default for ParserBlock {
    fn default() -> Self {
        Self::new()
    }
}

impl ParserBlock {
    pub fn new() -> Self {
        let mut ruler: Ruler<BlockRule> = Ruler::new();
        ruler.push("code", code::code, &[]);
        ruler.push(
            "fence",
            fence::fence,
            &["paragraph", "reference", "blockquote", "list"],
        );
        ruler.push(
            "blockquote",
            blockquote::blockquote,
            &["paragraph", "reference", "blockquote", "list"],
        );
        ruler.push(
            "hr",
            hr::hr,
            &["paragraph", "reference", "blockquote", "list"],
        );
        ruler.push("list", list::list, &["paragraph", "reference", "blockquote"]);
        ruler.push("reference", reference::reference, &[]);
        ruler.push(
            "html_block",
            html_block::html_block,
            &["paragraph", "reference", "blockquote"],
        );
        ruler.push(
            "heading",
            heading::heading,
            &["paragraph", "reference", "blockquote"],
        );
        ruler.push("lheading", lheading::lheading, &[]);
        ruler.push("paragraph", paragraph::paragraph, &[]);
        Self { ruler }
    }

    /// Runs the block chain over lines `[start_line, end_line)`.
    ///
    /// # Panics
    ///
    /// When a rule reports a match without advancing `state.line`, or when
    /// no rule matches a non-empty line. Both indicate a defective rule.
    pub fn tokenize(&self, state: &mut StateBlock<'_>, start_line: usize, end_line: usize) {
        let rules = self.ruler.get_rules("");
        let max_nesting = state.md.options.max_nesting;
        let mut line = start_line;
        let mut has_empty_lines = false;

        while line < end_line {
            line = state.skip_empty_lines(line);
            state.line = line;
            if line >= end_line {
                break;
            }

            // Dedent below the container's indent ends it.
            if state.s_count[line] < state.blk_indent {
                break;
            }

            if state.level >= max_nesting {
                log::debug!("block nesting limit {max_nesting} reached at line {line}");
                state.line = end_line;
                break;
            }

            let prev_line = state.line;
            let matched = rules
                .iter()
                .any(|rule| rule(state, line, end_line, Mode::Commit));

            if !matched {
                panic!("none of the block rules matched at line {line}");
            }
            if state.line <= prev_line {
                panic!("block rule didn't increment state.line (stuck at line {line})");
            }

            state.tight = !has_empty_lines;

            if state.is_empty(state.line - 1) {
                has_empty_lines = true;
            }

            line = state.line;

            if line < end_line && state.is_empty(line) {
                has_empty_lines = true;
                line += 1;
                state.line = line;
            }
        }
    }

    pub fn parse(&self, src: &str, md: &Markdown, env: &mut Env, out: &mut Vec<Token>) {
        if src.is_empty() {
            return;
        }
        let mut state = StateBlock::new(src, md, env);
        let (start_line, end_line) = (state.line, state.line_max);
        self.tokenize(&mut state, start_line, end_line);
        out.append(&mut state.tokens);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn stuck(_state: &mut StateBlock<'_>, _start: usize, _end: usize, _mode: Mode) -> bool {
        true
    }

    #[test]
    #[should_panic(expected = "block rule didn't increment state.line")]
    fn rule_that_does_not_advance_panics() {
        let mut md = Markdown::new();
        md.block.ruler.before("code", "stuck", stuck, &[]).unwrap();
        md.render("a");
    }

    #[test]
    #[should_panic(expected = "none of the block rules matched")]
    fn missing_paragraph_fallback_panics() {
        let mut md = Markdown::new();
        md.disable(&["paragraph"], false).unwrap();
        md.render("a");
    }
}
