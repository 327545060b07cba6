use std::sync::OnceLock;

use regex::Regex;

use crate::parser::Mode;
use crate::state::StateInline;
use crate::token::Nesting;

fn autolink_re() -> &'static Regex {
    static AUTOLINK_RE: OnceLock<Regex> = OnceLock::new();
    AUTOLINK_RE.get_or_init(|| {
        Regex::new(r"^[a-zA-Z][a-zA-Z0-9+.\-]{1,31}:[^<>\x00-\x20]*$")
            .expect("Invalid autolink regex")
    })
}

fn email_re() -> &'static Regex {
    static EMAIL_RE: OnceLock<Regex> = OnceLock::new();
    EMAIL_RE.get_or_init(|| {
        Regex::new(
            r"^[a-zA-Z0-9.!#$%&'*+/=?^_`{|}~\-]+@[a-zA-Z0-9](?:[a-zA-Z0-9\-]{0,61}[a-zA-Z0-9])?(?:\.[a-zA-Z0-9](?:[a-zA-Z0-9\-]{0,61}[a-zA-Z0-9])?)*$",
        )
        .expect("Invalid email regex")
    })
}

/// `<scheme:...>` and `<user@host>`.
pub fn autolink(state: &mut StateInline<'_>, mode: Mode) -> bool {
    let start = state.pos;
    let max = state.pos_max;

    if state.byte_at(start) != b'<' {
        return false;
    }

    let mut pos = start;
    loop {
        pos += 1;
        if pos >= max {
            return false;
        }
        match state.byte_at(pos) {
            b'<' => return false,
            b'>' => break,
            _ => {}
        }
    }

    let src = state.src;
    let url = &src[start + 1..pos];

    let full_url = if autolink_re().is_match(url) {
        (state.md.normalize_link)(url)
    } else if email_re().is_match(url) {
        (state.md.normalize_link)(&format!("mailto:{url}"))
    } else {
        return false;
    };
    if !(state.md.validate_link)(&full_url) {
        return false;
    }

    if !mode.is_probe() {
        let text = (state.md.normalize_link_text)(url);

        let token = state.push("link_open", "a", Nesting::Opening);
        token.attr_push("href", full_url);
        token.markup = "autolink".to_string();
        token.info = "auto".to_string();

        let token = state.push("text", "", Nesting::SelfClosing);
        token.content = text;

        let token = state.push("link_close", "a", Nesting::Closing);
        token.markup = "autolink".to_string();
        token.info = "auto".to_string();
    }

    state.pos += url.len() + 2;
    true
}
