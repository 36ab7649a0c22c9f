//! Factory configuration.

use serde::{Deserialize, Serialize};

use crate::foundation::{ConstraintError, ConstraintResult};

/// Default compiled-size limit for regular expressions (10 MiB).
pub const DEFAULT_REGEX_SIZE_LIMIT: usize = 10 * (1 << 20);

/// Settings applied by a [`Constraints`](crate::factory::Constraints) factory
/// to the constraints it builds.
///
/// Every field has a default, so a partial JSON document is enough:
///
/// ```
/// use nebula_rules::config::ConstraintsConfig;
///
/// let config = ConstraintsConfig::from_json_str(r#"{ "case_insensitive_like": true }"#)?;
/// assert!(config.case_insensitive_like);
/// assert_eq!(config.regex_size_limit, nebula_rules::config::DEFAULT_REGEX_SIZE_LIMIT);
/// # Ok::<(), nebula_rules::foundation::ConstraintError>(())
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ConstraintsConfig {
    /// Compiled-size limit for regular expressions, in bytes
    pub regex_size_limit: usize,

    /// Whether `like` constraints ignore case
    pub case_insensitive_like: bool,
}

impl Default for ConstraintsConfig {
    fn default() -> Self {
        Self {
            regex_size_limit: DEFAULT_REGEX_SIZE_LIMIT,
            case_insensitive_like: false,
        }
    }
}

impl ConstraintsConfig {
    /// Parses and validates a JSON document.
    ///
    /// # Errors
    ///
    /// [`ConstraintError::InvalidConfig`] if the document is malformed or
    /// fails [`validate`](Self::validate).
    pub fn from_json_str(json: &str) -> ConstraintResult<Self> {
        let config: Self =
            serde_json::from_str(json).map_err(|e| ConstraintError::InvalidConfig(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Reads overrides from the environment.
    ///
    /// - `NEBULA_RULES_REGEX_SIZE_LIMIT`: bytes
    /// - `NEBULA_RULES_LIKE_CASE_INSENSITIVE`: `true` / `false`
    ///
    /// Unset or unparsable variables keep their defaults.
    #[must_use]
    pub fn from_env() -> Self {
        let mut config = Self::default();

        if let Some(limit) = std::env::var("NEBULA_RULES_REGEX_SIZE_LIMIT")
            .ok()
            .and_then(|v| v.parse().ok())
        {
            config.regex_size_limit = limit;
        }

        if let Some(enabled) = std::env::var("NEBULA_RULES_LIKE_CASE_INSENSITIVE")
            .ok()
            .and_then(|v| v.parse().ok())
        {
            config.case_insensitive_like = enabled;
        }

        config
    }

    /// Checks that the settings are usable.
    ///
    /// # Errors
    ///
    /// [`ConstraintError::InvalidConfig`] if `regex_size_limit` is zero.
    pub fn validate(&self) -> ConstraintResult<()> {
        if self.regex_size_limit == 0 {
            return Err(ConstraintError::InvalidConfig(
                "regex_size_limit must be greater than zero".to_owned(),
            ));
        }
        Ok(())
    }
}
