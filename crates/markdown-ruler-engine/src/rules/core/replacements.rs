//! Typographic replacements: `(c)` to ©, `+-` to ±, ellipses, dashes.
//!
//! Text inside autolinks is left alone.

use std::sync::OnceLock;

use regex::{Captures, Regex};

use crate::state::StateCore;
use crate::token::Token;

fn rare_re() -> &'static Regex {
    static RARE_RE: OnceLock<Regex> = OnceLock::new();
    RARE_RE.get_or_init(|| {
        Regex::new(r"\+-|\.\.|\?\?\?\?|!!!!|,,|--").expect("Invalid rare replacement regex")
    })
}

fn scoped_abbr_re() -> &'static Regex {
    static SCOPED_ABBR_RE: OnceLock<Regex> = OnceLock::new();
    SCOPED_ABBR_RE
        .get_or_init(|| Regex::new(r"(?i)\((c|tm|r)\)").expect("Invalid abbreviation regex"))
}

struct RareRegexes {
    ellipsis: Regex,
    punct_ellipsis: Regex,
    repeated_punct: Regex,
    commas: Regex,
}

fn rare_regexes() -> &'static RareRegexes {
    static RARE: OnceLock<RareRegexes> = OnceLock::new();
    RARE.get_or_init(|| RareRegexes {
        ellipsis: Regex::new(r"\.{2,}").expect("Invalid ellipsis regex"),
        punct_ellipsis: Regex::new(r"([?!])…").expect("Invalid ellipsis regex"),
        repeated_punct: Regex::new(r"([?!]){4,}").expect("Invalid punctuation regex"),
        commas: Regex::new(r",{2,}").expect("Invalid comma regex"),
    })
}

pub fn replace(state: &mut StateCore<'_>) {
    if !state.md.options.typographer {
        return;
    }

    for token in state.tokens.iter_mut().rev().filter(|t| t.kind == "inline") {
        let scoped = scoped_abbr_re().is_match(&token.content);
        let rare = rare_re().is_match(&token.content);
        let Some(children) = token.children.as_mut() else {
            continue;
        };
        if scoped {
            for_text_outside_autolinks(children, replace_scoped);
        }
        if rare {
            for_text_outside_autolinks(children, replace_rare);
        }
    }
}

/// Applies `f` to every text token that is not inside an autolink,
/// walking backwards like the rest of the typographer.
fn for_text_outside_autolinks(tokens: &mut [Token], f: fn(&str) -> Option<String>) {
    let mut inside_autolink = 0i32;
    for token in tokens.iter_mut().rev() {
        if token.kind == "text" && inside_autolink == 0 {
            if let Some(replaced) = f(&token.content) {
                token.content = replaced;
            }
        }
        if token.info == "auto" {
            match token.kind.as_str() {
                "link_open" => inside_autolink -= 1,
                "link_close" => inside_autolink += 1,
                _ => {}
            }
        }
    }
}

fn replace_scoped(text: &str) -> Option<String> {
    if !scoped_abbr_re().is_match(text) {
        return None;
    }
    let replaced = scoped_abbr_re().replace_all(text, |caps: &Captures| {
        match caps[1].to_ascii_lowercase().as_str() {
            "c" => "©",
            "r" => "®",
            _ => "™",
        }
        .to_string()
    });
    Some(replaced.into_owned())
}

fn replace_rare(text: &str) -> Option<String> {
    if !rare_re().is_match(text) {
        return None;
    }
    let re = rare_regexes();
    let s = text.replace("+-", "±");
    let s = re.ellipsis.replace_all(&s, "…");
    let s = re.punct_ellipsis.replace_all(&s, "$1..");
    let s = re.repeated_punct.replace_all(&s, "$1$1$1");
    let s = re.commas.replace_all(&s, ",");
    Some(replace_dashes(&s))
}

/// `---` becomes an em dash and `--` an en dash. Longer runs are left as
/// written, as is `--` with whitespace on exactly one side.
fn replace_dashes(text: &str) -> String {
    let chars: Vec<char> = text.chars().collect();
    let mut out = String::with_capacity(text.len());
    let mut i = 0;

    while i < chars.len() {
        if chars[i] != '-' {
            out.push(chars[i]);
            i += 1;
            continue;
        }

        let start = i;
        while i < chars.len() && chars[i] == '-' {
            i += 1;
        }
        let run = i - start;
        let prev = start.checked_sub(1).map(|p| chars[p]);
        let next = chars.get(i).copied();

        match run {
            3 => out.push('\u{2014}'),
            2 => {
                let one_sided = (prev.is_some_and(char::is_whitespace)
                    && next.is_some_and(|c| !c.is_whitespace()))
                    || (prev.is_some_and(|c| !c.is_whitespace())
                        && next.is_some_and(char::is_whitespace));
                if one_sided {
                    out.push_str("--");
                } else {
                    out.push('\u{2013}');
                }
            }
            _ => out.extend(std::iter::repeat_n('-', run)),
        }
    }

    out
}
