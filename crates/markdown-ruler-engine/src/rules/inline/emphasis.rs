//! `*` and `_` emphasis: delimiter collection while tokenizing, and the
//! conversion of paired delimiters into `em` / `strong` tokens afterwards.

use crate::parser::Mode;
use crate::state::{Delimiter, StateInline};
use crate::token::Nesting;

/// Pushes one placeholder text token and one delimiter per marker char.
pub fn tokenize(state: &mut StateInline<'_>, mode: Mode) -> bool {
    let start = state.pos;
    let marker = state.byte_at(start);

    if mode.is_probe() {
        return false;
    }
    if marker != b'_' && marker != b'*' {
        return false;
    }

    let scanned = state.scan_delims(start, marker == b'*');

    for _ in 0..scanned.length {
        let token = state.push("text", "", Nesting::SelfClosing);
        token.content = (marker as char).to_string();

        let token = state.tokens.len() - 1;
        state.delimiters.push(Delimiter {
            marker: marker as char,
            length: scanned.length,
            token,
            end: None,
            open: scanned.can_open,
            close: scanned.can_close,
        });
    }

    state.pos += scanned.length;
    true
}

fn process_delimiters(state: &mut StateInline<'_>, delimiters: &[Delimiter]) {
    let mut i = delimiters.len();
    while i > 0 {
        i -= 1;
        let start_delim = &delimiters[i];

        if start_delim.marker != '_' && start_delim.marker != '*' {
            continue;
        }
        let Some(end) = start_delim.end.filter(|&end| end > i) else {
            continue;
        };
        let end_delim = &delimiters[end];

        // `<em><em>a</em></em>` collapses to `<strong>a</strong>` when the
        // outer pair wraps the inner one with no gap on either side.
        let is_strong = i > 0
            && delimiters[i - 1].end == Some(end + 1)
            && delimiters[i - 1].marker == start_delim.marker
            && delimiters[i - 1].token + 1 == start_delim.token
            && delimiters[end + 1].token == end_delim.token + 1;

        let ch = start_delim.marker.to_string();
        let markup = if is_strong { ch.repeat(2) } else { ch };
        let (open_kind, close_kind, tag) = if is_strong {
            ("strong_open", "strong_close", "strong")
        } else {
            ("em_open", "em_close", "em")
        };

        let token = &mut state.tokens[start_delim.token];
        token.kind = open_kind.to_string();
        token.tag = tag.to_string();
        token.nesting = Nesting::Opening;
        token.markup = markup.clone();
        token.content.clear();

        let token = &mut state.tokens[end_delim.token];
        token.kind = close_kind.to_string();
        token.tag = tag.to_string();
        token.nesting = Nesting::Closing;
        token.markup = markup;
        token.content.clear();

        if is_strong {
            state.tokens[delimiters[i - 1].token].content.clear();
            state.tokens[delimiters[end + 1].token].content.clear();
            i -= 1;
        }
    }
}

/// Rewrites paired delimiters of every nesting level into tags.
pub fn post_process(state: &mut StateInline<'_>) {
    let delimiters = std::mem::take(&mut state.delimiters);
    process_delimiters(state, &delimiters);
    state.delimiters = delimiters;

    let tokens_meta = std::mem::take(&mut state.tokens_meta);
    for delimiters in tokens_meta.iter().flatten() {
        process_delimiters(state, delimiters);
    }
    state.tokens_meta = tokens_meta;
}
