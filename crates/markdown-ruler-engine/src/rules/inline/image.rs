use crate::helpers::parse_link_label;
use crate::parser::Mode;
use crate::rules::inline::link::image_target;
use crate::state::StateInline;
use crate::token::Nesting;

/// `![alt](src "title")` and `![alt][label]`.
pub fn image(state: &mut StateInline<'_>, mode: Mode) -> bool {
    let old_pos = state.pos;
    let max = state.pos_max;

    if state.byte_at(state.pos) != b'!' || state.byte_at(state.pos + 1) != b'[' {
        return false;
    }

    let label_start = state.pos + 2;
    let Some(label_end) = parse_link_label(state, state.pos + 1, false) else {
        return false;
    };

    let Some(target) = image_target(state, label_start, label_end) else {
        state.pos = old_pos;
        return false;
    };

    if !mode.is_probe() {
        let src = state.src;
        let content = &src[label_start..label_end];
        let md = state.md;

        let mut children = Vec::new();
        md.inline
            .parse_nested(content, md, state.env, state.level + 1, &mut children);

        let token = state.push("image", "img", Nesting::SelfClosing);
        token.attr_push("src", target.href);
        token.attr_push("alt", "");
        if !target.title.is_empty() {
            token.attr_push("title", target.title);
        }
        token.children = Some(children);
        token.content = content.to_string();
    }

    state.pos = target.pos;
    state.pos_max = max;
    true
}
