//! Named bundles of options and enabled rules.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;
use crate::options::Options;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Preset {
    /// Everything enabled, raw HTML off.
    #[default]
    Default,
    /// Strict CommonMark: no linkify, typographer or strikethrough.
    CommonMark,
    /// Paragraphs and text only; a base for whitelisting rules.
    Zero,
}

/// Rules each chain is restricted to. `None` enables the whole chain.
#[derive(Debug, Clone, Copy)]
pub struct Components {
    pub core: Option<&'static [&'static str]>,
    pub block: Option<&'static [&'static str]>,
    pub inline: Option<&'static [&'static str]>,
    pub inline_post: Option<&'static [&'static str]>,
}

impl Preset {
    pub fn name(self) -> &'static str {
        match self {
            Preset::Default => "default",
            Preset::CommonMark => "commonmark",
            Preset::Zero => "zero",
        }
    }

    pub fn options(self) -> Options {
        match self {
            Preset::Default => Options::default(),
            Preset::CommonMark => Options {
                html: true,
                xhtml_out: true,
                max_nesting: 20,
                ..Options::default()
            },
            Preset::Zero => Options {
                max_nesting: 20,
                ..Options::default()
            },
        }
    }

    pub fn components(self) -> Components {
        match self {
            Preset::Default => Components {
                core: None,
                block: None,
                inline: None,
                inline_post: None,
            },
            Preset::CommonMark => Components {
                core: Some(&["normalize", "block", "inline", "text_join"]),
                block: Some(&[
                    "blockquote",
                    "code",
                    "fence",
                    "heading",
                    "hr",
                    "html_block",
                    "lheading",
                    "list",
                    "reference",
                    "paragraph",
                ]),
                inline: Some(&[
                    "autolink",
                    "backticks",
                    "emphasis",
                    "entity",
                    "escape",
                    "html_inline",
                    "image",
                    "link",
                    "newline",
                    "text",
                ]),
                inline_post: Some(&["balance_pairs", "emphasis", "fragments_join"]),
            },
            Preset::Zero => Components {
                core: Some(&["normalize", "block", "inline", "text_join"]),
                block: Some(&["paragraph"]),
                inline: Some(&["text"]),
                inline_post: Some(&["balance_pairs", "fragments_join"]),
            },
        }
    }
}

impl fmt::Display for Preset {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Preset {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "default" => Ok(Preset::Default),
            "commonmark" => Ok(Preset::CommonMark),
            "zero" => Ok(Preset::Zero),
            other => Err(ConfigError::UnknownPreset(other.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("default", Preset::Default)]
    #[case("commonmark", Preset::CommonMark)]
    #[case("zero", Preset::Zero)]
    fn parses_known_names(#[case] name: &str, #[case] expected: Preset) {
        assert_eq!(name.parse::<Preset>().unwrap(), expected);
        assert_eq!(expected.to_string(), name);
    }

    #[test]
    fn unknown_name_is_rejected() {
        let err = "gfm".parse::<Preset>().unwrap_err();
        assert_eq!(err, ConfigError::UnknownPreset("gfm".into()));
    }

    #[test]
    fn strict_presets_lower_the_nesting_limit() {
        assert_eq!(Preset::Default.options().max_nesting, 100);
        assert_eq!(Preset::CommonMark.options().max_nesting, 20);
        assert!(Preset::CommonMark.options().xhtml_out);
        assert_eq!(Preset::Zero.options().max_nesting, 20);
    }
}
