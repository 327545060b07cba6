use thiserror::Error;

/// Errors raised while editing a rule chain.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum RulerError {
    #[error("Rule not found: {0}")]
    RuleNotFound(String),

    #[error("Rule manager is unable to find rule(s): {}", .0.join(", "))]
    InvalidRuleNames(Vec<String>),
}

/// Errors raised while configuring a [`crate::Markdown`] instance.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("Unknown preset: {0} (expected default, commonmark or zero)")]
    UnknownPreset(String),

    #[error(transparent)]
    Ruler(#[from] RulerError),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn invalid_rule_names_lists_every_name() {
        let err = RulerError::InvalidRuleNames(vec!["foo".into(), "bar".into()]);
        assert_eq!(
            err.to_string(),
            "Rule manager is unable to find rule(s): foo, bar"
        );
    }

    #[test]
    fn ruler_error_converts_into_config_error() {
        let err: ConfigError = RulerError::RuleNotFound("emphasis".into()).into();
        assert_eq!(err.to_string(), "Rule not found: emphasis");
    }
}
