//! Error types for filter registration and configuration loading.

use thiserror::Error;

/// Filter registration errors.
///
/// Every variant is a configuration mistake raised eagerly by
/// [`FilterRegistry::apply`](crate::filter::FilterRegistry::apply) or
/// [`FilterRegistry::skip`](crate::filter::FilterRegistry::skip). The host is
/// expected to abort controller setup when it sees one.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FilterError {
    #[error("Unable to run filter '{0}'. Filter does not exist")]
    UnknownFilter(String),

    #[error("Unable to skip filter '{0}'. Filter has not been applied")]
    FilterNotApplied(String),

    #[error("Filter applied with invalid options. '{key}' isn't a valid option key (expected 'only' or 'except')")]
    InvalidOptionKey { key: String },

    #[error("Filter applied with invalid options. 'except' and 'only' can not be combined")]
    ConflictingCondition,
}

impl FilterError {
    pub fn unknown_filter(name: impl Into<String>) -> Self {
        Self::UnknownFilter(name.into())
    }

    pub fn not_applied(name: impl Into<String>) -> Self {
        Self::FilterNotApplied(name.into())
    }

    pub fn invalid_option_key(key: impl Into<String>) -> Self {
        Self::InvalidOptionKey { key: key.into() }
    }

    /// The filter name this error refers to, if any.
    pub fn filter_name(&self) -> Option<&str> {
        match self {
            Self::UnknownFilter(name) | Self::FilterNotApplied(name) => Some(name),
            Self::InvalidOptionKey { .. } | Self::ConflictingCondition => None,
        }
    }
}

/// Errors raised while loading a declarative filter configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("Filter error: {0}")]
    Filter(#[from] FilterError),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_messages_name_the_filter() {
        assert_eq!(
            FilterError::unknown_filter("authenticate").to_string(),
            "Unable to run filter 'authenticate'. Filter does not exist"
        );
        assert_eq!(
            FilterError::not_applied("load_post").to_string(),
            "Unable to skip filter 'load_post'. Filter has not been applied"
        );
    }

    #[test]
    fn test_filter_name() {
        assert_eq!(FilterError::unknown_filter("a").filter_name(), Some("a"));
        assert_eq!(FilterError::not_applied("b").filter_name(), Some("b"));
        assert_eq!(FilterError::invalid_option_key("bogus").filter_name(), None);
        assert_eq!(FilterError::ConflictingCondition.filter_name(), None);
    }

    #[test]
    fn test_config_error_wraps_filter_error() {
        let err: ConfigError = FilterError::ConflictingCondition.into();
        assert!(matches!(err, ConfigError::Filter(FilterError::ConflictingCondition)));
        assert!(err.to_string().starts_with("Filter error: "));
    }
}
