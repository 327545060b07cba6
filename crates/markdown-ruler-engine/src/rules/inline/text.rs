use crate::parser::Mode;
use crate::state::StateInline;

/// Chars that may start some other inline construct. Anything else is
/// plain text and gets appended to `pending` in bulk.
fn is_terminator_char(ch: u8) -> bool {
    matches!(
        ch,
        b'\n'
            | b'!'
            | b'#'
            | b'$'
            | b'%'
            | b'&'
            | b'*'
            | b'+'
            | b'-'
            | b':'
            | b'<'
            | b'='
            | b'>'
            | b'@'
            | b'['
            | b'\\'
            | b']'
            | b'^'
            | b'_'
            | b'`'
            | b'{'
            | b'}'
            | b'~'
    )
}

pub fn text(state: &mut StateInline<'_>, mode: Mode) -> bool {
    let mut pos = state.pos;
    while pos < state.pos_max && !is_terminator_char(state.byte_at(pos)) {
        pos += 1;
    }

    if pos == state.pos {
        return false;
    }

    if !mode.is_probe() {
        let src = state.src;
        state.pending.push_str(&src[state.pos..pos]);
    }
    state.pos = pos;
    true
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::markdown::{Env, Markdown};

    #[test]
    fn stops_at_first_terminator() {
        let md = Markdown::new();
        let mut env = Env::default();
        let mut state = StateInline::new("héllo *world*", &md, &mut env);
        assert!(text(&mut state, Mode::Commit));
        assert_eq!(state.pending, "héllo ");
        assert!(!text(&mut state, Mode::Commit));
    }

    #[test]
    fn probe_leaves_pending_alone() {
        let md = Markdown::new();
        let mut env = Env::default();
        let mut state = StateInline::new("abc", &md, &mut env);
        assert!(text(&mut state, Mode::Probe));
        assert_eq!(state.pos, 3);
        assert!(state.pending.is_empty());
    }
}
