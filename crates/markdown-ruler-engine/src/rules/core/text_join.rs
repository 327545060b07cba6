use crate::rules::inline::fragments_join::merge_adjacent_text;
use crate::state::StateCore;

/// Turns `text_special` tokens (escapes, entities) back into plain text
/// and merges neighbouring text runs. Plugins that need to see escapes
/// should run before this rule.
pub fn text_join(state: &mut StateCore<'_>) {
    for token in state.tokens.iter_mut().filter(|t| t.kind == "inline") {
        let Some(children) = token.children.as_mut() else {
            continue;
        };
        for child in children.iter_mut() {
            if child.kind == "text_special" {
                child.kind = "text".to_string();
            }
        }
        merge_adjacent_text(children);
    }
}
