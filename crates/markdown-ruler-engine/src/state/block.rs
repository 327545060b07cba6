use crate::common::is_space;
use crate::markdown::{Env, Markdown};
use crate::token::{Nesting, Token};

/// The container a block rule is currently running inside.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ParentType {
    #[default]
    Root,
    Blockquote,
    List,
    Paragraph,
    Reference,
}

/// Line-oriented block parse context.
///
/// Line tables are indexed by line number and carry one extra sentinel
/// entry at `line_max` so that `line + 1` lookups never go out of bounds.
pub struct StateBlock<'a> {
    pub src: &'a str,
    pub md: &'a Markdown,
    pub env: &'a mut Env,
    pub tokens: Vec<Token>,

    /// Byte offset of each line start.
    pub b_marks: Vec<usize>,
    /// Byte offset of each line end (the `\n`, or the end of input).
    pub e_marks: Vec<usize>,
    /// Bytes of leading whitespace (or rewritten markers) on each line.
    pub t_shift: Vec<usize>,
    /// Tab-expanded indent of each line. `-1` marks a lazy blockquote line.
    pub s_count: Vec<i32>,
    /// Column correction for tabs following a container marker.
    pub bs_count: Vec<i32>,

    /// Required indent for the current container.
    pub blk_indent: i32,
    pub line: usize,
    pub line_max: usize,
    pub tight: bool,
    /// Indent of the current list item, `-1` outside lists.
    pub list_indent: i32,
    pub parent_type: ParentType,
    pub level: usize,
}

impl<'a> StateBlock<'a> {
    pub fn new(src: &'a str, md: &'a Markdown, env: &'a mut Env) -> Self {
        let mut state = Self {
            src,
            md,
            env,
            tokens: Vec::new(),
            b_marks: Vec::new(),
            e_marks: Vec::new(),
            t_shift: Vec::new(),
            s_count: Vec::new(),
            bs_count: Vec::new(),
            blk_indent: 0,
            line: 0,
            line_max: 0,
            tight: false,
            list_indent: -1,
            parent_type: ParentType::Root,
            level: 0,
        };
        state.scan_lines();
        state
    }

    fn scan_lines(&mut self) {
        let bytes = self.src.as_bytes();
        let len = bytes.len();
        let mut start = 0;
        let mut indent = 0;
        let mut offset: i32 = 0;
        let mut indent_found = false;
        let mut pos = 0;

        while pos < len {
            let ch = bytes[pos];
            if !indent_found {
                if is_space(ch) {
                    indent += 1;
                    if ch == b'\t' {
                        offset += 4 - offset % 4;
                    } else {
                        offset += 1;
                    }
                    pos += 1;
                    continue;
                }
                indent_found = true;
            }

            if ch == b'\n' || pos == len - 1 {
                let end = if ch == b'\n' { pos } else { pos + 1 };
                self.b_marks.push(start);
                self.e_marks.push(end);
                self.t_shift.push(indent);
                self.s_count.push(offset);
                self.bs_count.push(0);

                indent_found = false;
                indent = 0;
                offset = 0;
                start = end + 1;
            }
            pos += 1;
        }

        self.b_marks.push(len);
        self.e_marks.push(len);
        self.t_shift.push(0);
        self.s_count.push(0);
        self.bs_count.push(0);

        self.line_max = self.b_marks.len() - 1;
    }

    /// Pushes a block token, tracking nesting level.
    pub fn push(&mut self, kind: &str, tag: &str, nesting: Nesting) -> &mut Token {
        let mut token = Token::new(kind, tag, nesting);
        token.block = true;

        if nesting == Nesting::Closing {
            self.level = self.level.saturating_sub(1);
        }
        token.level = self.level;
        if nesting == Nesting::Opening {
            self.level += 1;
        }

        self.tokens.push(token);
        let last = self.tokens.len() - 1;
        &mut self.tokens[last]
    }

    pub fn is_empty(&self, line: usize) -> bool {
        self.b_marks[line] + self.t_shift[line] >= self.e_marks[line]
    }

    pub fn skip_empty_lines(&self, mut from: usize) -> usize {
        while from < self.line_max {
            if self.b_marks[from] + self.t_shift[from] < self.e_marks[from] {
                break;
            }
            from += 1;
        }
        from
    }

    pub fn skip_spaces(&self, mut pos: usize) -> usize {
        let bytes = self.src.as_bytes();
        while pos < bytes.len() && is_space(bytes[pos]) {
            pos += 1;
        }
        pos
    }

    /// Skips spaces backwards from `pos`, never going below `min`.
    pub fn skip_spaces_back(&self, mut pos: usize, min: usize) -> usize {
        let bytes = self.src.as_bytes();
        while pos > min {
            if !is_space(bytes[pos - 1]) {
                return pos;
            }
            pos -= 1;
        }
        pos
    }

    pub fn skip_chars(&self, mut pos: usize, ch: u8) -> usize {
        let bytes = self.src.as_bytes();
        while pos < bytes.len() && bytes[pos] == ch {
            pos += 1;
        }
        pos
    }

    pub fn skip_chars_back(&self, mut pos: usize, ch: u8, min: usize) -> usize {
        let bytes = self.src.as_bytes();
        while pos > min {
            if bytes[pos - 1] != ch {
                return pos;
            }
            pos -= 1;
        }
        pos
    }

    /// Text of lines `[begin, end)` with `indent` columns stripped from
    /// each. Tabs straddling the indent are partially expanded.
    pub fn get_lines(&self, begin: usize, end: usize, indent: i32, keep_last_lf: bool) -> String {
        if begin >= end {
            return String::new();
        }

        let bytes = self.src.as_bytes();
        let mut out = String::new();

        for line in begin..end {
            let mut line_indent: i32 = 0;
            let line_start = self.b_marks[line];
            let mut first = line_start;
            let last = if line + 1 < end || keep_last_lf {
                (self.e_marks[line] + 1).min(self.src.len())
            } else {
                self.e_marks[line]
            };

            while first < last && line_indent < indent {
                let ch = bytes[first];
                if is_space(ch) {
                    if ch == b'\t' {
                        line_indent += 4 - (line_indent + self.bs_count[line]) % 4;
                    } else {
                        line_indent += 1;
                    }
                } else if first - line_start < self.t_shift[line] {
                    // Container markers rewritten as indentation.
                    line_indent += 1;
                } else {
                    break;
                }
                first += 1;
            }

            if line_indent > indent {
                out.push_str(&" ".repeat((line_indent - indent) as usize));
            }
            out.push_str(&self.src[first..last]);
        }

        out
    }

    /// Byte at `pos`, or 0 past the end.
    pub fn byte_at(&self, pos: usize) -> u8 {
        self.src.as_bytes().get(pos).copied().unwrap_or(0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn with_state<R>(src: &str, f: impl FnOnce(&StateBlock<'_>) -> R) -> R {
        let md = Markdown::new();
        let mut env = Env::default();
        let state = StateBlock::new(src, &md, &mut env);
        f(&state)
    }

    #[test]
    fn line_tables_include_sentinel() {
        with_state("a\n  b\n\tc", |s| {
            assert_eq!(s.line_max, 3);
            assert_eq!(s.b_marks, vec![0, 2, 6, 8]);
            assert_eq!(s.e_marks, vec![1, 5, 8, 8]);
            assert_eq!(s.t_shift, vec![0, 2, 1, 0]);
            assert_eq!(s.s_count, vec![0, 2, 4, 0]);
        });
    }

    #[test]
    fn empty_lines_are_skipped() {
        with_state("a\n\n   \nb", |s| {
            assert!(s.is_empty(1));
            assert!(s.is_empty(2));
            assert_eq!(s.skip_empty_lines(1), 3);
        });
    }

    #[test]
    fn get_lines_strips_indent_and_expands_partial_tabs() {
        with_state("    a\n\t\tb\n", |s| {
            assert_eq!(s.get_lines(0, 2, 4, false), "a\n\tb");
            assert_eq!(s.get_lines(1, 2, 2, true), "  \tb\n");
        });
    }

    #[test]
    fn skip_helpers_stop_at_bounds() {
        with_state("##  x  ", |s| {
            assert_eq!(s.skip_chars(0, b'#'), 2);
            assert_eq!(s.skip_spaces(2), 4);
            assert_eq!(s.skip_spaces_back(7, 5), 5);
            assert_eq!(s.skip_chars_back(2, b'#', 0), 0);
        });
    }
}
