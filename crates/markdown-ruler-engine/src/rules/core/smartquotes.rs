//! Converts straight quotes into typographic ones.

use crate::common::{char_at, char_before, is_md_ascii_punct, is_punct_char, is_whitespace};
use crate::state::StateCore;
use crate::token::Token;

const APOSTROPHE: &str = "\u{2019}";

struct OpenQuote {
    token: usize,
    pos: usize,
    single: bool,
    level: usize,
}

pub fn smartquotes(state: &mut StateCore<'_>) {
    if !state.md.options.typographer {
        return;
    }
    let md = state.md;
    let quotes = &md.options.quotes;

    for token in state.tokens.iter_mut().rev() {
        if token.kind != "inline" || !token.content.contains(['\'', '"']) {
            continue;
        }
        if let Some(children) = token.children.as_mut() {
            process_inlines(children, quotes);
        }
    }
}

fn replace_at(s: &str, index: usize, with: &str) -> String {
    let mut out = String::with_capacity(s.len() + with.len());
    out.push_str(&s[..index]);
    out.push_str(with);
    out.push_str(&s[index + 1..]);
    out
}

fn is_break(token: &Token) -> bool {
    token.kind == "softbreak" || token.kind == "hardbreak"
}

/// Last char of the nearest preceding token with content on this line.
fn char_before_token(tokens: &[Token], i: usize) -> char {
    for token in tokens[..i].iter().rev() {
        if is_break(token) {
            break;
        }
        if let Some(c) = token.content.chars().next_back() {
            return c;
        }
    }
    ' '
}

/// First char of the nearest following token with content on this line.
fn char_after_token(tokens: &[Token], i: usize) -> char {
    for token in &tokens[i + 1..] {
        if is_break(token) {
            break;
        }
        if let Some(c) = token.content.chars().next() {
            return c;
        }
    }
    ' '
}

fn process_inlines(tokens: &mut [Token], quotes: &[String; 4]) {
    let mut stack: Vec<OpenQuote> = Vec::new();

    for i in 0..tokens.len() {
        let this_level = tokens[i].level;

        let keep = stack
            .iter()
            .rposition(|q| q.level <= this_level)
            .map_or(0, |j| j + 1);
        stack.truncate(keep);

        if tokens[i].kind != "text" {
            continue;
        }

        let mut pos = 0;
        'outer: loop {
            let text = &tokens[i].content;
            let Some(offset) = text[pos..].find(['\'', '"']) else {
                break;
            };
            let index = pos + offset;
            let is_single = text.as_bytes()[index] == b'\'';
            pos = index + 1;

            let last_char = if index > 0 {
                char_before(text, index).unwrap_or(' ')
            } else {
                char_before_token(tokens, i)
            };
            let next_char = if pos < text.len() {
                char_at(text, pos).unwrap_or(' ')
            } else {
                char_after_token(tokens, i)
            };

            let is_last_punct = is_md_ascii_punct(last_char) || is_punct_char(last_char);
            let is_next_punct = is_md_ascii_punct(next_char) || is_punct_char(next_char);
            let is_last_whitespace = is_whitespace(last_char);
            let is_next_whitespace = is_whitespace(next_char);

            let mut can_open = !(is_next_whitespace
                || (is_next_punct && !(is_last_whitespace || is_last_punct)));
            let mut can_close = !(is_last_whitespace
                || (is_last_punct && !(is_next_whitespace || is_next_punct)));

            // 1"" reads as an inch mark followed by a quote.
            if next_char == '"' && !is_single && last_char.is_ascii_digit() {
                can_open = false;
                can_close = false;
            }

            if can_open && can_close {
                // Inside a punctuation run, but not between word chars.
                can_open = is_last_punct;
                can_close = is_next_punct;
            }

            if !can_open && !can_close {
                if is_single {
                    tokens[i].content = replace_at(&tokens[i].content, index, APOSTROPHE);
                    pos += APOSTROPHE.len() - 1;
                }
                continue;
            }

            if can_close {
                for j in (0..stack.len()).rev() {
                    if stack[j].level < this_level {
                        break;
                    }
                    if stack[j].single != is_single || stack[j].level != this_level {
                        continue;
                    }

                    let (open_quote, close_quote) = if is_single {
                        (&quotes[2], &quotes[3])
                    } else {
                        (&quotes[0], &quotes[1])
                    };
                    let opener = &stack[j];

                    // Closing side first: both may sit in the same token.
                    tokens[i].content = replace_at(&tokens[i].content, index, close_quote);
                    tokens[opener.token].content =
                        replace_at(&tokens[opener.token].content, opener.pos, open_quote);

                    pos += close_quote.len() - 1;
                    if opener.token == i {
                        pos += open_quote.len() - 1;
                    }

                    stack.truncate(j);
                    continue 'outer;
                }
            }

            if can_open {
                stack.push(OpenQuote {
                    token: i,
                    pos: index,
                    single: is_single,
                    level: this_level,
                });
            } else if can_close && is_single {
                tokens[i].content = replace_at(&tokens[i].content, index, APOSTROPHE);
                pos += APOSTROPHE.len() - 1;
            }
        }
    }
}
