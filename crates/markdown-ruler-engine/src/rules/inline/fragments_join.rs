use crate::state::StateInline;
use crate::token::{Nesting, Token};

/// Merges each run of adjacent `text` tokens into its first token.
pub(crate) fn merge_adjacent_text(tokens: &mut Vec<Token>) {
    let mut merged: Vec<Token> = Vec::with_capacity(tokens.len());
    for token in tokens.drain(..) {
        if token.kind == "text" {
            if let Some(last) = merged.last_mut().filter(|last| last.kind == "text") {
                last.content.push_str(&token.content);
                continue;
            }
        }
        merged.push(token);
    }
    *tokens = merged;
}

/// Joins the text fragments left behind by unpaired delimiters and
/// recomputes levels, which pair conversion may have invalidated.
pub fn fragments_join(state: &mut StateInline<'_>) {
    let mut level = 0usize;
    for token in &mut state.tokens {
        if token.nesting == Nesting::Closing {
            level = level.saturating_sub(1);
        }
        token.level = level;
        if token.nesting == Nesting::Opening {
            level += 1;
        }
    }

    merge_adjacent_text(&mut state.tokens);
}

#[cfg(test)]
mod tests {
    use super::*;

    fn text(content: &str) -> Token {
        let mut t = Token::new("text", "", Nesting::SelfClosing);
        t.content = content.to_string();
        t
    }

    #[test]
    fn merges_runs_only() {
        let mut tokens = vec![
            text("a"),
            text("*"),
            Token::new("softbreak", "br", Nesting::SelfClosing),
            text("b"),
            text("c"),
        ];
        merge_adjacent_text(&mut tokens);
        let contents: Vec<_> = tokens.iter().map(|t| t.content.as_str()).collect();
        assert_eq!(contents, vec!["a*", "", "bc"]);
    }
}
