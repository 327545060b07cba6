use std::sync::OnceLock;

use regex::Regex;

use crate::common::html::{BLOCK_NAMES, open_close_tag_source};
use crate::parser::Mode;
use crate::state::StateBlock;
use crate::token::Nesting;

/// One of the seven CommonMark HTML block kinds.
struct HtmlSequence {
    open: Regex,
    close: Regex,
    /// Whether this kind may interrupt a paragraph.
    can_terminate: bool,
}

fn html_sequences() -> &'static [HtmlSequence] {
    static SEQUENCES: OnceLock<Vec<HtmlSequence>> = OnceLock::new();
    SEQUENCES.get_or_init(|| {
        let seq = |open: &str, close: &str, can_terminate: bool| HtmlSequence {
            open: Regex::new(open).expect("Invalid HTML block regex"),
            close: Regex::new(close).expect("Invalid HTML block regex"),
            can_terminate,
        };
        vec![
            seq(
                r"(?i)^<(script|pre|style|textarea)(?:\s|>|$)",
                r"(?i)</(script|pre|style|textarea)>",
                true,
            ),
            seq(r"^<!--", r"-->", true),
            seq(r"^<\?", r"\?>", true),
            seq(r"^<![A-Z]", r">", true),
            seq(r"^<!\[CDATA\[", r"\]\]>", true),
            seq(
                &format!(r"(?i)^</?({})(?:\s|/?>|$)", BLOCK_NAMES.join("|")),
                r"^$",
                true,
            ),
            seq(&format!(r"^{}\s*$", open_close_tag_source()), r"^$", false),
        ]
    })
}

/// Raw HTML block; only with the `html` option.
pub fn html_block(
    state: &mut StateBlock<'_>,
    start_line: usize,
    end_line: usize,
    mode: Mode,
) -> bool {
    let pos = state.b_marks[start_line] + state.t_shift[start_line];
    let max = state.e_marks[start_line];

    if state.s_count[start_line] - state.blk_indent >= 4 {
        return false;
    }
    if !state.md.options.html {
        return false;
    }
    if state.byte_at(pos) != b'<' {
        return false;
    }

    let line_text = &state.src[pos..max];
    let Some(sequence) = html_sequences().iter().find(|s| s.open.is_match(line_text)) else {
        return false;
    };

    if mode.is_probe() {
        return sequence.can_terminate;
    }

    let mut next_line = start_line + 1;

    // Scan for the end condition unless the first line already meets it.
    if !sequence.close.is_match(line_text) {
        while next_line < end_line {
            if state.s_count[next_line] < state.blk_indent {
                break;
            }

            let pos = state.b_marks[next_line] + state.t_shift[next_line];
            let max = state.e_marks[next_line];
            let line_text = &state.src[pos..max];

            if sequence.close.is_match(line_text) {
                if !line_text.is_empty() {
                    next_line += 1;
                }
                break;
            }
            next_line += 1;
        }
    }

    state.line = next_line;
    let content = state.get_lines(start_line, next_line, state.blk_indent, true);
    let token = state.push("html_block", "", Nesting::SelfClosing);
    token.map = Some((start_line, next_line));
    token.content = content;
    true
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    fn kind_of(line: &str) -> Option<usize> {
        html_sequences().iter().position(|s| s.open.is_match(line))
    }

    #[rstest]
    #[case("<script>", Some(0))]
    #[case("<PRE class=x>", Some(0))]
    #[case("<!-- c", Some(1))]
    #[case("<?xml", Some(2))]
    #[case("<!DOCTYPE html>", Some(3))]
    #[case("<![CDATA[", Some(4))]
    #[case("<div>", Some(5))]
    #[case("</table>", Some(5))]
    #[case("<custom-tag attr=\"1\">", Some(6))]
    #[case("<custom-tag> trailing", None)]
    #[case("<scripts>", Some(6))]
    fn classifies_start_lines(#[case] line: &str, #[case] expected: Option<usize>) {
        assert_eq!(kind_of(line), expected);
    }
}
