//! Links without a scheme (`www.example.com`) and email addresses found
//! in finished text tokens, with the `linkify` option.
//!
//! Runs after the inline stage, so text inside markdown links and raw
//! `<a>` tags is already known and skipped.

use std::sync::OnceLock;

use linkify::{Link, LinkKind};
use regex::Regex;

use crate::common::links::link_finder;
use crate::markdown::Markdown;
use crate::rules::inline::html_inline::{is_link_close, is_link_open};
use crate::state::StateCore;
use crate::token::{Nesting, Token};

const GENERIC_TLDS: &[&str] = &[
    "biz", "com", "edu", "gov", "net", "org", "pro", "web", "xxx", "aero", "asia", "coop", "info",
    "museum", "name", "shop", "рф",
];

fn country_tld_re() -> &'static Regex {
    static COUNTRY_TLD_RE: OnceLock<Regex> = OnceLock::new();
    COUNTRY_TLD_RE.get_or_init(|| {
        Regex::new(concat!(
            "^(?:a[cdefgilmnoqrstuwxz]|b[abdefghijmnorstvwyz]|c[acdfghiklmnoruvwxyz]|d[ejkmoz]",
            "|e[cegrstu]|f[ijkmor]|g[abdefghilmnpqrstuwy]|h[kmnrtu]|i[delmnoqrst]|j[emop]",
            "|k[eghimnprwyz]|l[abcikrstuvy]|m[acdeghklmnopqrstuvwxyz]|n[acefgilopruz]|om",
            "|p[aefghklmnrstwy]|qa|r[eosuw]|s[abcdeghijklmnortuvxyz]|t[cdfghjklmnortvwz]",
            "|u[agksyz]|v[aceginu]|w[fs]|y[et]|z[amw])$",
        ))
        .expect("Invalid country TLD regex")
    })
}

/// Scheme-less hosts must end in a known top-level domain, so that
/// `file.txt` or `Node.js` stay text.
fn has_known_tld(host: &str) -> bool {
    let Some((_, tld)) = host.rsplit_once('.') else {
        return false;
    };
    let tld = tld.to_lowercase();
    GENERIC_TLDS.contains(&tld.as_str()) || country_tld_re().is_match(&tld)
}

fn has_scheme(url: &str) -> bool {
    if url.get(..7).is_some_and(|p| p.eq_ignore_ascii_case("mailto:")) {
        return true;
    }
    url.split_once("://").is_some_and(|(scheme, _)| {
        scheme.starts_with(|c: char| c.is_ascii_alphabetic())
            && scheme
                .bytes()
                .all(|b| b.is_ascii_alphanumeric() || b == b'+' || b == b'-' || b == b'.')
    })
}

/// `(url, text)` for a finder match: the URL to normalise into `href` and
/// the text to show.
fn link_target(link: &Link<'_>, md: &Markdown) -> Option<(String, String)> {
    let found = link.as_str();
    match link.kind() {
        LinkKind::Email => {
            let (_, domain) = found.rsplit_once('@')?;
            if !has_known_tld(domain) {
                return None;
            }
            let url = format!("mailto:{found}");
            let text = (md.normalize_link_text)(&url);
            let text = text.strip_prefix("mailto:").unwrap_or(&text).to_string();
            Some((url, text))
        }
        LinkKind::Url if has_scheme(found) => {
            Some((found.to_string(), (md.normalize_link_text)(found)))
        }
        LinkKind::Url => {
            let host = found.split(['/', '?', '#', ':']).next().unwrap_or(found);
            if !has_known_tld(host) {
                return None;
            }
            let url = format!("http://{found}");
            let text = (md.normalize_link_text)(&url);
            let text = text.strip_prefix("http://").unwrap_or(&text).to_string();
            Some((url, text))
        }
        _ => None,
    }
}

/// Replacement tokens for one text token, or `None` when it holds no
/// usable link. After an escape (`http\://x.org`) a link right at the
/// start is left alone.
fn split_text(token: &Token, after_escape: bool, md: &Markdown) -> Option<Vec<Token>> {
    let text = token.content.as_str();
    let level = token.level;
    let mut nodes = Vec::new();
    let mut last_pos = 0;

    for link in link_finder().links(text) {
        if after_escape && text[..link.start()].bytes().all(|b| b == b'/') {
            continue;
        }
        let Some((url, link_text)) = link_target(&link, md) else {
            continue;
        };
        let full_url = (md.normalize_link)(&url);
        if !(md.validate_link)(&full_url) {
            continue;
        }

        if link.start() > last_pos {
            let mut token = Token::new("text", "", Nesting::SelfClosing);
            token.content = text[last_pos..link.start()].to_string();
            token.level = level;
            nodes.push(token);
        }

        let mut token = Token::new("link_open", "a", Nesting::Opening);
        token.attr_push("href", full_url);
        token.level = level;
        token.markup = "linkify".to_string();
        token.info = "auto".to_string();
        nodes.push(token);

        let mut token = Token::new("text", "", Nesting::SelfClosing);
        token.content = link_text;
        token.level = level + 1;
        nodes.push(token);

        let mut token = Token::new("link_close", "a", Nesting::Closing);
        token.level = level;
        token.markup = "linkify".to_string();
        token.info = "auto".to_string();
        nodes.push(token);

        last_pos = link.end();
    }

    if nodes.is_empty() {
        return None;
    }
    if last_pos < text.len() {
        let mut token = Token::new("text", "", Nesting::SelfClosing);
        token.content = text[last_pos..].to_string();
        token.level = level;
        nodes.push(token);
    }
    Some(nodes)
}

fn linkify_children(tokens: &mut Vec<Token>, md: &Markdown) {
    let mut html_link_level = 0usize;

    // Backwards, so splicing never shifts the tokens still to visit.
    let mut i = tokens.len();
    while i > 0 {
        i -= 1;

        if tokens[i].kind == "link_close" {
            let level = tokens[i].level;
            while i > 0 {
                i -= 1;
                if tokens[i].kind == "link_open" && tokens[i].level == level {
                    break;
                }
            }
            continue;
        }

        if tokens[i].kind == "html_inline" {
            if is_link_open(&tokens[i].content) && html_link_level > 0 {
                html_link_level -= 1;
            }
            if is_link_close(&tokens[i].content) {
                html_link_level += 1;
            }
        }
        if html_link_level > 0 || tokens[i].kind != "text" {
            continue;
        }

        let after_escape = i > 0 && tokens[i - 1].kind == "text_special";
        if let Some(nodes) = split_text(&tokens[i], after_escape, md) {
            tokens.splice(i..=i, nodes);
        }
    }
}

pub fn linkify(state: &mut StateCore<'_>) {
    if !state.md.options.linkify {
        return;
    }
    let md = state.md;

    for token in state.tokens.iter_mut() {
        if token.kind != "inline" || !token.content.contains(['.', '@']) {
            continue;
        }
        if let Some(children) = token.children.as_mut() {
            linkify_children(children, md);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use rstest::rstest;

    #[rstest]
    #[case("www.example.com", true)]
    #[case("example.org", true)]
    #[case("example.de", true)]
    #[case("notes.txt", false)]
    #[case("Node.js", false)]
    #[case("localhost", false)]
    fn recognises_top_level_domains(#[case] host: &str, #[case] expected: bool) {
        assert_eq!(has_known_tld(host), expected);
    }

    #[rstest]
    #[case("https://x.org", true)]
    #[case("mailto:a@b.com", true)]
    #[case("www.x.org", false)]
    #[case("www.x.org/a:b", false)]
    #[case("www.x.org:8080", false)]
    fn detects_scheme(#[case] url: &str, #[case] expected: bool) {
        assert_eq!(has_scheme(url), expected);
    }

    #[test]
    fn splits_text_around_links() {
        let md = Markdown::new();
        let mut token = Token::new("text", "", Nesting::SelfClosing);
        token.content = "go to www.x.org now".to_string();

        let nodes = split_text(&token, false, &md).unwrap();
        let kinds: Vec<&str> = nodes.iter().map(|t| t.kind.as_str()).collect();
        assert_eq!(kinds, ["text", "link_open", "text", "link_close", "text"]);
        assert_eq!(nodes[1].attr_get("href"), Some("http://www.x.org"));
        assert_eq!(nodes[2].content, "www.x.org");
        assert_eq!(nodes[2].level, 1);
        assert_eq!(nodes[4].content, " now");
    }

    #[test]
    fn leaves_plain_text_alone() {
        let md = Markdown::new();
        let mut token = Token::new("text", "", Nesting::SelfClosing);
        token.content = "see notes.txt".to_string();
        assert!(split_text(&token, false, &md).is_none());
    }
}
