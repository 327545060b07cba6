use std::fmt::Write;

use crate::token::Token;

/// One line per token, indented by nesting; children follow their parent
/// one step deeper.
///
/// ```text
/// paragraph_open p @0..1
///   inline "a *b*" @0..1
///     text "a "
///     em_open em
///       text "b"
///     em_close em
/// paragraph_close p
/// ```
pub fn dump(tokens: &[Token]) -> String {
    let mut out = String::new();
    dump_into(&mut out, tokens, 0);
    out
}

fn dump_into(out: &mut String, tokens: &[Token], depth: usize) {
    for token in tokens {
        let indent = depth + token.level;
        write!(out, "{:width$}{}", "", token.kind, width = indent * 2).unwrap();
        if !token.tag.is_empty() {
            write!(out, " {}", token.tag).unwrap();
        }
        for (name, value) in &token.attrs {
            write!(out, " {name}={value:?}").unwrap();
        }
        if !token.content.is_empty() {
            write!(out, " {:?}", token.content).unwrap();
        }
        if !token.info.is_empty() {
            write!(out, " info={:?}", token.info).unwrap();
        }
        if let Some((start, end)) = token.map {
            write!(out, " @{start}..{end}").unwrap();
        }
        if token.hidden {
            out.push_str(" (hidden)");
        }
        out.push('\n');

        if let Some(children) = &token.children {
            dump_into(out, children, indent + 1);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::markdown::{Env, Markdown};
    use pretty_assertions::assert_eq;

    #[test]
    fn dumps_nested_structure() {
        let md = Markdown::new();
        let tokens = md.parse("a *b*", &mut Env::default());
        assert_eq!(
            dump(&tokens),
            "paragraph_open p @0..1\n  inline \"a *b*\" @0..1\n    text \"a \"\n    em_open em\n      text \"b\"\n    em_close em\nparagraph_close p\n"
        );
    }
}
