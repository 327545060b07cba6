use crate::state::StateCore;

/// Parses the content of every `inline` container into its children.
pub fn inline(state: &mut StateCore<'_>) {
    let md = state.md;
    for token in state.tokens.iter_mut().filter(|t| t.kind == "inline") {
        let mut children = Vec::new();
        md.inline
            .parse(&token.content, md, state.env, &mut children);
        token.children = Some(children);
    }
}
