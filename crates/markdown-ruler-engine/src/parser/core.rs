use crate::ruler::Ruler;
use crate::rules::core::{
    block, inline, linkify, normalize, replacements, smartquotes, text_join,
};
use crate::state::StateCore;

pub type CoreRule = fn(&mut StateCore<'_>);

#[derive(Debug, Clone)]
pub struct ParserCore {
    pub ruler: Ruler<CoreRule>,
}

impl Default for ParserCore {
    fn default() -> Self {
        Self::new()
    }
}

impl ParserCore {
    pub fn new() -> Self {
        let mut ruler: Ruler<CoreRule> = Ruler::new();
        ruler.push("normalize", normalize::normalize, &[]);
        ruler.push("block", block::block, &[]);
        ruler.push("inline", inline::inline, &[]);
        ruler.push("linkify", linkify::linkify, &[]);
        ruler.push("replacements", replacements::replace, &[]);
        ruler.push("smartquotes", smartquotes::smartquotes, &[]);
        ruler.push("text_join", text_join::text_join, &[]);
        Self { ruler }
    }

    pub fn process(&self, state: &mut StateCore<'_>) {
        for rule in self.ruler.get_rules("") {
            rule(state);
        }
    }
}
