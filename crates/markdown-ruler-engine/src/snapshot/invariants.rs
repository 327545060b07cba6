use crate::token::{Nesting, Token};

/// Panics when `tokens` breaks a structural invariant:
///
/// - every opening token is closed by a token with the same tag, in order
/// - `level` equals the nesting depth at the token
/// - only `inline` and `image` tokens carry children
/// - the nesting deltas of the stream sum to zero
///
/// Children are checked recursively, starting again from level 0.
pub fn check(tokens: &[Token]) {
    let mut open: Vec<&str> = Vec::new();

    for (i, token) in tokens.iter().enumerate() {
        if token.nesting == Nesting::Closing {
            let opener = open.pop();
            assert_eq!(
                opener,
                Some(token.tag.as_str()),
                "token {i} ({}) closes {:?} but {:?} is open",
                token.kind,
                token.tag,
                opener
            );
        }

        assert_eq!(
            token.level,
            open.len(),
            "token {i} ({}) has level {} at depth {}",
            token.kind,
            token.level,
            open.len()
        );

        if token.nesting == Nesting::Opening {
            open.push(&token.tag);
        }

        match &token.children {
            Some(children) => {
                assert!(
                    token.kind == "inline" || token.kind == "image",
                    "token {i} ({}) must not have children",
                    token.kind
                );
                check(children);
            }
            None => assert_ne!(token.kind, "inline", "inline token {i} has no children"),
        }
    }

    assert!(open.is_empty(), "unclosed tags at end of stream: {open:?}");

    let net: i32 = tokens.iter().map(|token| token.nesting.delta()).sum();
    assert_eq!(net, 0, "stream nesting nets to {net}");
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::markdown::{Env, Markdown};
    use crate::options::Options;

    #[test]
    fn accepts_parser_output() {
        let md = Markdown::new();
        let tokens = md.parse("> - a\n>   - *b*\n\n1. [x](y)\n", &mut Env::default());
        check(&tokens);
    }

    #[test]
    fn accepts_linkified_stream() {
        let mut md = Markdown::new();
        md.set(Options {
            linkify: true,
            ..Options::default()
        });
        let tokens = md.parse("see www.a.com and *b@c.org*\n", &mut Env::default());
        check(&tokens);
    }

    #[test]
    #[should_panic(expected = "unclosed tags")]
    fn rejects_unbalanced_stream() {
        check(&[Token::new("paragraph_open", "p", Nesting::Opening)]);
    }
}
