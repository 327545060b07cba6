//! Bare URLs such as `https://example.com`, with the `linkify` option.
//!
//! The rule fires on the `:` of `://`; the scheme has already been
//! collected into `pending` by the text rule and is taken back from there.
//! Scheme-less hosts and emails are left to the core `linkify` pass.

use std::sync::OnceLock;

use linkify::LinkKind;
use regex::Regex;

use crate::common::links::link_finder;
use crate::parser::Mode;
use crate::state::StateInline;
use crate::token::Nesting;

const SCHEMES: &[&str] = &["http", "https", "ftp"];

fn scheme_re() -> &'static Regex {
    static SCHEME_RE: OnceLock<Regex> = OnceLock::new();
    SCHEME_RE.get_or_init(|| {
        Regex::new(r"(?i)(?:^|[^a-z0-9.+-])([a-z][a-z0-9.+-]*)$").expect("Invalid scheme regex")
    })
}

/// The URL at the very start of `s`, without trailing `*` (emphasis
/// markers, not part of the link).
fn match_at_start(s: &str) -> Option<&str> {
    let link = link_finder().links(s).next()?;
    if link.start() != 0 || !matches!(link.kind(), LinkKind::Url) {
        return None;
    }
    Some(link.as_str().trim_end_matches('*'))
}

pub fn linkify(state: &mut StateInline<'_>, mode: Mode) -> bool {
    if !state.md.options.linkify || state.link_level > 0 {
        return false;
    }

    let pos = state.pos;
    let max = state.pos_max;
    if pos + 3 > max || !state.src[pos..max].starts_with("://") {
        return false;
    }

    let Some(caps) = scheme_re().captures(&state.pending) else {
        return false;
    };
    let proto = caps[1].to_string();
    if !SCHEMES.iter().any(|s| s.eq_ignore_ascii_case(&proto)) {
        return false;
    }

    let src = state.src;
    let Some(start) = pos.checked_sub(proto.len()) else {
        return false;
    };
    if !src
        .get(start..pos)
        .is_some_and(|s| s.eq_ignore_ascii_case(&proto))
    {
        return false;
    }

    let Some(url) = match_at_start(&src[start..max]) else {
        return false;
    };
    // Nothing found past the scheme; consuming it would not advance.
    if url.len() <= proto.len() + 3 {
        return false;
    }

    let full_url = (state.md.normalize_link)(url);
    if !(state.md.validate_link)(&full_url) {
        return false;
    }

    if !mode.is_probe() {
        let keep = state.pending.len() - proto.len();
        state.pending.truncate(keep);
        let text = (state.md.normalize_link_text)(url);

        let token = state.push("link_open", "a", Nesting::Opening);
        token.attr_push("href", full_url);
        token.markup = "linkify".to_string();
        token.info = "auto".to_string();

        let token = state.push("text", "", Nesting::SelfClosing);
        token.content = text;

        let token = state.push("link_close", "a", Nesting::Closing);
        token.markup = "linkify".to_string();
        token.info = "auto".to_string();
    }

    state.pos = start + url.len();
    true
}
