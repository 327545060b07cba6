use std::collections::HashMap;

use crate::common::{char_at, char_before, is_md_ascii_punct, is_punct_char, is_whitespace};
use crate::markdown::{Env, Markdown};
use crate::token::{Nesting, Token};

/// One marker from a delimiter run, waiting to be paired.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Delimiter {
    pub marker: char,
    /// Total length of the run this marker came from; 0 disables the
    /// rule of three (strikethrough, plugins).
    pub length: usize,
    /// Index of the placeholder text token in `StateInline::tokens`.
    pub token: usize,
    /// Index of the paired delimiter, set on both sides of a pair.
    pub end: Option<usize>,
    pub open: bool,
    pub close: bool,
}

impl Delimiter {
    /// Whether this delimiter is the opening half of a resolved pair.
    pub fn opens_pair(&self, own_index: usize) -> bool {
        self.end.is_some_and(|end| end > own_index)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScanResult {
    pub can_open: bool,
    pub can_close: bool,
    pub length: usize,
}

/// Delimiters of an enclosing container, saved while a nested one is open.
#[derive(Debug)]
struct DelimiterScope {
    parent: Vec<Delimiter>,
    opener: usize,
}

/// Character-oriented parse context for one inline container.
pub struct StateInline<'a> {
    pub src: &'a str,
    pub md: &'a Markdown,
    pub env: &'a mut Env,
    pub tokens: Vec<Token>,
    /// Delimiter lists of closed nested containers, aligned with `tokens`.
    pub tokens_meta: Vec<Option<Vec<Delimiter>>>,

    pub pos: usize,
    pub pos_max: usize,
    pub level: usize,
    pub pending: String,
    pub pending_level: usize,

    /// Probe memo: start position to position after one skipped token.
    pub cache: HashMap<usize, usize>,
    /// Delimiters of the current nesting level.
    pub delimiters: Vec<Delimiter>,
    scopes: Vec<DelimiterScope>,

    /// Code span closers by run length, filled on first use.
    pub backticks: HashMap<usize, usize>,
    pub backticks_scanned: bool,
    /// Depth of link nesting; linkify stays quiet inside links.
    pub link_level: usize,
}

impl<'a> StateInline<'a> {
    pub fn new(src: &'a str, md: &'a Markdown, env: &'a mut Env) -> Self {
        Self {
            src,
            md,
            env,
            tokens: Vec::new(),
            tokens_meta: Vec::new(),
            pos: 0,
            pos_max: src.len(),
            level: 0,
            pending: String::new(),
            pending_level: 0,
            cache: HashMap::new(),
            delimiters: Vec::new(),
            scopes: Vec::new(),
            backticks: HashMap::new(),
            backticks_scanned: false,
            link_level: 0,
        }
    }

    /// Flushes buffered characters as one `text` token.
    pub fn push_pending(&mut self) {
        let mut token = Token::new("text", "", Nesting::SelfClosing);
        token.content = std::mem::take(&mut self.pending);
        token.level = self.pending_level;
        self.tokens.push(token);
        self.tokens_meta.push(None);
    }

    /// Pushes a token, flushing pending text first. Opening tokens start a
    /// fresh delimiter scope; closing tokens restore the enclosing one.
    pub fn push(&mut self, kind: &str, tag: &str, nesting: Nesting) -> &mut Token {
        if !self.pending.is_empty() {
            self.push_pending();
        }

        let mut token = Token::new(kind, tag, nesting);

        if nesting == Nesting::Closing {
            self.level = self.level.saturating_sub(1);
            self.close_scope();
        }
        token.level = self.level;
        if nesting == Nesting::Opening {
            self.level += 1;
            self.scopes.push(DelimiterScope {
                parent: std::mem::take(&mut self.delimiters),
                opener: self.tokens.len(),
            });
        }

        self.pending_level = self.level;
        self.tokens.push(token);
        self.tokens_meta.push(None);
        let last = self.tokens.len() - 1;
        &mut self.tokens[last]
    }

    fn close_scope(&mut self) {
        if let Some(scope) = self.scopes.pop() {
            let inner = std::mem::replace(&mut self.delimiters, scope.parent);
            if let Some(meta) = self.tokens_meta.get_mut(scope.opener) {
                *meta = Some(inner);
            }
        }
    }

    /// Files the delimiters of any container left open, so that the
    /// post-processing pass sees every list.
    pub fn close_all_scopes(&mut self) {
        while !self.scopes.is_empty() {
            self.close_scope();
        }
    }

    /// Measures the delimiter run at `start` and classifies it as
    /// left/right flanking.
    pub fn scan_delims(&self, start: usize, can_split_word: bool) -> ScanResult {
        let bytes = self.src.as_bytes();
        let marker = bytes[start];
        let mut pos = start;
        while pos < self.pos_max && bytes[pos] == marker {
            pos += 1;
        }
        let length = pos - start;

        let last_char = char_before(self.src, start).unwrap_or(' ');
        let next_char = if pos < self.pos_max {
            char_at(self.src, pos).unwrap_or(' ')
        } else {
            ' '
        };

        let is_last_punct = is_md_ascii_punct(last_char) || is_punct_char(last_char);
        let is_next_punct = is_md_ascii_punct(next_char) || is_punct_char(next_char);
        let is_last_whitespace = is_whitespace(last_char);
        let is_next_whitespace = is_whitespace(next_char);

        let left_flanking =
            !is_next_whitespace && (!is_next_punct || is_last_whitespace || is_last_punct);
        let right_flanking =
            !is_last_whitespace && (!is_last_punct || is_next_whitespace || is_next_punct);

        let (can_open, can_close) = if can_split_word {
            (left_flanking, right_flanking)
        } else {
            (
                left_flanking && (!right_flanking || is_last_punct),
                right_flanking && (!left_flanking || is_next_punct),
            )
        };

        ScanResult {
            can_open,
            can_close,
            length,
        }
    }

    pub fn byte_at(&self, pos: usize) -> u8 {
        self.src.as_bytes().get(pos).copied().unwrap_or(0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    fn scan(src: &str, start: usize, can_split_word: bool) -> ScanResult {
        let md = Markdown::new();
        let mut env = Env::default();
        let state = StateInline::new(src, &md, &mut env);
        state.scan_delims(start, can_split_word)
    }

    #[rstest]
    #[case("*a*", 0, true, false, 1)]
    #[case("*a*", 2, false, true, 1)]
    #[case("a * b", 2, false, false, 1)]
    #[case("**a", 0, true, false, 2)]
    #[case("a*\"b\"", 1, false, true, 1)]
    fn flanking_for_emphasis(
        #[case] src: &str,
        #[case] start: usize,
        #[case] can_open: bool,
        #[case] can_close: bool,
        #[case] length: usize,
    ) {
        let r = scan(src, start, true);
        assert_eq!((r.can_open, r.can_close, r.length), (can_open, can_close, length));
    }

    #[test]
    fn intraword_underscore_neither_opens_nor_closes() {
        let r = scan("snake_case", 5, false);
        assert!(!r.can_open);
        assert!(!r.can_close);
    }

    #[test]
    fn intraword_tilde_may_split_words() {
        let r = scan("a~~b", 1, true);
        assert!(r.can_open);
        assert!(r.can_close);
    }

    #[test]
    fn scopes_file_inner_delimiters_under_opener() {
        let md = Markdown::new();
        let mut env = Env::default();
        let mut state = StateInline::new("", &md, &mut env);
        state.delimiters.push(Delimiter {
            marker: '*',
            length: 1,
            token: 0,
            end: None,
            open: true,
            close: false,
        });
        state.push("link_open", "a", Nesting::Opening);
        assert!(state.delimiters.is_empty());
        state.delimiters.push(Delimiter {
            marker: '_',
            length: 1,
            token: 1,
            end: None,
            open: true,
            close: true,
        });
        state.push("link_close", "a", Nesting::Closing);

        assert_eq!(state.delimiters.len(), 1);
        assert_eq!(state.delimiters[0].marker, '*');
        let inner = state.tokens_meta[0].as_ref().unwrap();
        assert_eq!(inner[0].marker, '_');
        assert_eq!(state.tokens_meta.len(), state.tokens.len());
    }
}
