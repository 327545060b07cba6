use crate::common::normalize_reference;
use crate::helpers::{parse_link_destination, parse_link_label, parse_link_title};
use crate::parser::Mode;
use crate::rules::inline::skip_link_whitespace;
use crate::state::StateInline;
use crate::token::Nesting;

/// Where a resolved link or image points.
pub(crate) struct LinkTarget {
    pub href: String,
    pub title: String,
    /// Position just past the whole construct.
    pub pos: usize,
}

/// Parses `(dest "title")` starting at the `(` at `pos`. `None` when the
/// parens don't close.
fn parse_inline_target(state: &StateInline<'_>, pos: usize) -> Option<LinkTarget> {
    let max = state.pos_max;
    let md = state.md;
    let mut href = String::new();
    let mut title = String::new();

    // [link](  <href>  "title"  )
    //        ^^ skipping these spaces
    let mut pos = skip_link_whitespace(state, pos + 1);
    if pos >= max {
        return None;
    }

    if let Some(dest) = parse_link_destination(state.src, pos, max) {
        let normalized = (md.normalize_link)(&dest.str);
        if (md.validate_link)(&normalized) {
            href = normalized;
            pos = dest.pos;
        }

        let start = pos;
        pos = skip_link_whitespace(state, pos);

        if pos < max && start != pos {
            if let Some(parsed) = parse_link_title(state.src, pos, max) {
                title = parsed.str;
                pos = skip_link_whitespace(state, parsed.pos);
            }
        }
    }

    if pos >= max || state.byte_at(pos) != b')' {
        return None;
    }
    Some(LinkTarget {
        href,
        title,
        pos: pos + 1,
    })
}

/// Resolves `[text][label]`, `[text][]` and `[text]` against the
/// reference definitions. `label_start..label_end` is the link text.
fn resolve_reference(
    state: &mut StateInline<'_>,
    label_start: usize,
    label_end: usize,
) -> Option<LinkTarget> {
    let src = state.src;
    let max = state.pos_max;
    let mut pos = label_end + 1;
    let mut label = "";

    if pos < max && state.byte_at(pos) == b'[' {
        let start = pos + 1;
        match parse_link_label(state, pos, false) {
            Some(end) => {
                label = &src[start..end];
                pos = end + 1;
            }
            None => pos = label_end + 1,
        }
    }

    // Collapsed `[]` and shortcut references use the link text.
    if label.is_empty() {
        label = &src[label_start..label_end];
    }

    let reference = state.env.references.get(&normalize_reference(label))?;
    Some(LinkTarget {
        href: reference.href.clone(),
        title: reference.title.clone(),
        pos,
    })
}

/// Inline and reference links: `[text](dest "title")`, `[text][label]`.
pub fn link(state: &mut StateInline<'_>, mode: Mode) -> bool {
    if state.byte_at(state.pos) != b'[' {
        return false;
    }

    let old_pos = state.pos;
    let max = state.pos_max;
    let label_start = state.pos + 1;
    let Some(label_end) = parse_link_label(state, state.pos, true) else {
        return false;
    };

    let pos = label_end + 1;
    let mut target = None;
    if pos < max && state.byte_at(pos) == b'(' {
        target = parse_inline_target(state, pos);
    }
    // A failed inline form may still be a shortcut reference.
    if target.is_none() {
        target = resolve_reference(state, label_start, label_end);
    }
    let Some(target) = target else {
        state.pos = old_pos;
        return false;
    };

    if !mode.is_probe() {
        state.pos = label_start;
        state.pos_max = label_end;

        let token = state.push("link_open", "a", Nesting::Opening);
        token.attr_push("href", target.href);
        if !target.title.is_empty() {
            token.attr_push("title", target.title);
        }

        state.link_level += 1;
        let md = state.md;
        md.inline.tokenize(state);
        state.link_level -= 1;

        state.push("link_close", "a", Nesting::Closing);
    }

    state.pos = target.pos;
    state.pos_max = max;
    true
}

/// Images share link syntax behind a leading `!`; the description is
/// parsed into the token's children.
pub(crate) fn image_target(
    state: &mut StateInline<'_>,
    label_start: usize,
    label_end: usize,
) -> Option<LinkTarget> {
    let pos = label_end + 1;
    if pos < state.pos_max && state.byte_at(pos) == b'(' {
        parse_inline_target(state, pos)
    } else {
        resolve_reference(state, label_start, label_end)
    }
}
