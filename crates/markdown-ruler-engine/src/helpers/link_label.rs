use crate::state::StateInline;

/// Finds the `]` closing the label that opens at `start`, skipping over
/// nested inline constructs. Returns its position, leaving `state.pos`
/// unchanged.
///
/// With `disable_nested`, a nested link inside the label makes the whole
/// label invalid.
pub fn parse_link_label(
    state: &mut StateInline<'_>,
    start: usize,
    disable_nested: bool,
) -> Option<usize> {
    let max = state.pos_max;
    let old_pos = state.pos;
    let md = state.md;

    state.pos = start + 1;
    let mut level = 1;
    let mut found = false;

    while state.pos < max {
        let marker = state.byte_at(state.pos);
        if marker == b']' {
            level -= 1;
            if level == 0 {
                found = true;
                break;
            }
        }

        let prev_pos = state.pos;
        md.inline.skip_token(state);

        if marker == b'[' {
            if prev_pos == state.pos - 1 {
                // A bare `[` that no rule claimed.
                level += 1;
            } else if disable_nested {
                state.pos = old_pos;
                return None;
            }
        }
    }

    let label_end = found.then_some(state.pos);
    state.pos = old_pos;
    label_end
}
