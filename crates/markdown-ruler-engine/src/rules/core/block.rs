use crate::state::StateCore;
use crate::token::{Nesting, Token};

/// Runs the block stage, or wraps the whole source in one inline container
/// in inline mode.
pub fn block(state: &mut StateCore<'_>) {
    if state.inline_mode {
        let mut token = Token::new("inline", "", Nesting::SelfClosing);
        token.content = state.src.clone();
        token.map = Some((0, 1));
        token.children = Some(Vec::new());
        state.tokens.push(token);
        return;
    }

    let md = state.md;
    md.block.parse(&state.src, md, state.env, &mut state.tokens);
}
