use crate::parser::Mode;
use crate::state::StateInline;
use crate::token::Nesting;

/// Code spans. Closers already seen are recorded per run length in
/// `state.backticks`, so an unmatched opener costs one scan per container.
pub fn backticks(state: &mut StateInline<'_>, mode: Mode) -> bool {
    let src = state.src;
    let start = state.pos;
    let max = state.pos_max;

    if state.byte_at(start) != b'`' {
        return false;
    }

    let mut pos = start + 1;
    while pos < max && state.byte_at(pos) == b'`' {
        pos += 1;
    }

    let marker = &src[start..pos];
    let opener_length = marker.len();

    if state.backticks_scanned
        && state.backticks.get(&opener_length).copied().unwrap_or(0) <= start
    {
        // No closer of this length further on.
        if !mode.is_probe() {
            state.pending.push_str(marker);
        }
        state.pos += opener_length;
        return true;
    }

    let mut match_end = pos;
    while let Some(offset) = src[match_end..max].find('`') {
        let match_start = match_end + offset;
        match_end = match_start + 1;
        while match_end < max && state.byte_at(match_end) == b'`' {
            match_end += 1;
        }

        let closer_length = match_end - match_start;
        if closer_length == opener_length {
            if !mode.is_probe() {
                let mut content = src[pos..match_start].replace('\n', " ");
                if content.len() > 2
                    && content.starts_with(' ')
                    && content.ends_with(' ')
                    && content.bytes().any(|b| b != b' ')
                {
                    content = content[1..content.len() - 1].to_string();
                }
                let token = state.push("code_inline", "code", Nesting::SelfClosing);
                token.markup = marker.to_string();
                token.content = content;
            }
            state.pos = match_end;
            return true;
        }

        state.backticks.insert(closer_length, match_start);
    }

    state.backticks_scanned = true;

    if !mode.is_probe() {
        state.pending.push_str(marker);
    }
    state.pos += opener_length;
    true
}
