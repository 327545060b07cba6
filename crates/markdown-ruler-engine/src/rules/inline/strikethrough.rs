//! `~~strikethrough~~`, collected like emphasis but without the rule of
//! three.

use crate::parser::Mode;
use crate::state::{Delimiter, StateInline};
use crate::token::Nesting;

/// Delimiters are pushed per `~~` pair; an odd leading `~` stays text.
pub fn tokenize(state: &mut StateInline<'_>, mode: Mode) -> bool {
    let start = state.pos;

    if mode.is_probe() {
        return false;
    }
    if state.byte_at(start) != b'~' {
        return false;
    }

    let scanned = state.scan_delims(start, true);
    let mut len = scanned.length;
    if len < 2 {
        return false;
    }

    if len % 2 == 1 {
        let token = state.push("text", "", Nesting::SelfClosing);
        token.content = "~".to_string();
        len -= 1;
    }

    for _ in 0..len / 2 {
        let token = state.push("text", "", Nesting::SelfClosing);
        token.content = "~~".to_string();

        let token = state.tokens.len() - 1;
        state.delimiters.push(Delimiter {
            marker: '~',
            length: 0,
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
    let mut lone_markers = Vec::new();

    for (i, start_delim) in delimiters.iter().enumerate() {
        if start_delim.marker != '~' {
            continue;
        }
        let Some(end) = start_delim.end.filter(|&end| end > i) else {
            continue;
        };
        let end_delim = &delimiters[end];

        let token = &mut state.tokens[start_delim.token];
        token.kind = "s_open".to_string();
        token.tag = "s".to_string();
        token.nesting = Nesting::Opening;
        token.markup = "~~".to_string();
        token.content.clear();

        let token = &mut state.tokens[end_delim.token];
        token.kind = "s_close".to_string();
        token.tag = "s".to_string();
        token.nesting = Nesting::Closing;
        token.markup = "~~".to_string();
        token.content.clear();

        let before = end_delim.token - 1;
        if state.tokens[before].kind == "text" && state.tokens[before].content == "~" {
            lone_markers.push(before);
        }
    }

    // `~~~a~~~` leaves a lone `~` inside the closing tag; move it past the
    // run of closers so it renders outside.
    while let Some(i) = lone_markers.pop() {
        let mut j = i + 1;
        while j < state.tokens.len() && state.tokens[j].kind == "s_close" {
            j += 1;
        }
        j -= 1;
        if i != j {
            state.tokens.swap(i, j);
        }
    }
}

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

#[cfg(test)]
mod tests {
    use super::*;
    use crate::markdown::{Env, Markdown};
    use crate::rules::inline::balance_pairs::balance_pairs;
    use pretty_assertions::assert_eq;

    fn post_processed(src: &str) -> Vec<(String, String)> {
        let md = Markdown::new();
        let mut env = Env::default();
        let mut state = StateInline::new(src, &md, &mut env);
        md.inline.tokenize(&mut state);
        state.close_all_scopes();
        balance_pairs(&mut state);
        post_process(&mut state);
        state
            .tokens
            .iter()
            .map(|t| (t.kind.clone(), t.content.clone()))
            .collect()
    }

    fn pair(kind: &str, content: &str) -> (String, String) {
        (kind.to_string(), content.to_string())
    }

    #[test]
    fn lone_tilde_moves_outside_closer() {
        assert_eq!(
            post_processed("~~~a~~~"),
            vec![
                pair("text", "~"),
                pair("s_open", ""),
                pair("text", "a"),
                pair("s_close", ""),
                pair("text", "~"),
            ]
        );
    }

    #[test]
    fn unpaired_runs_stay_text() {
        assert_eq!(
            post_processed("a~~~~b"),
            vec![
                pair("text", "a"),
                pair("text", "~~"),
                pair("text", "~~"),
                pair("text", "b"),
            ]
        );
    }
}
