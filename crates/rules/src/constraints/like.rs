//! SQL-style `%` wildcard matching.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::foundation::Predicate;
use crate::value::Value;

/// Wildcard marker recognised by [`Like::parse`].
pub const WILDCARD: char = '%';

/// Where the literal must appear.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LikeType {
    /// `"foo%"`
    StartsWith,
    /// `"%foo"`
    EndsWith,
    /// `"%foo%"`, or no marker at all
    Contains,
}

/// Matches text against a literal prefix, suffix or substring.
///
/// Numbers and booleans are matched through their text form. Null, lists and
/// maps never match.
///
/// # Examples
///
/// ```
/// use nebula_rules::prelude::*;
///
/// assert!(Like::parse("%foo%").test(&Value::from("xxfooyy")));
/// assert!(Like::parse("foo%").test(&Value::from("fooxx")));
/// assert!(!Like::parse("foo%").test(&Value::from("xxfoo")));
/// assert!(Like::parse("%foo").test(&Value::from("xxfoo")));
/// assert!(!Like::parse("%foo").test(&Value::from("fooxx")));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Like {
    like_type: LikeType,
    literal: String,
    case_insensitive: bool,
}

impl Like {
    /// Type tag reported by [`Like`].
    pub const TYPE_TAG: &'static str = "like";

    /// Matches `literal` as given by `like_type`.
    pub fn new(literal: impl Into<String>, like_type: LikeType) -> Self {
        Self {
            like_type,
            literal: literal.into(),
            case_insensitive: false,
        }
    }

    /// Decodes `%` markers at either end of `encoded`.
    #[must_use]
    pub fn parse(encoded: &str) -> Self {
        let (leading, rest) = encoded
            .strip_prefix(WILDCARD)
            .map_or((false, encoded), |rest| (true, rest));
        let (trailing, literal) = rest
            .strip_suffix(WILDCARD)
            .map_or((false, rest), |literal| (true, literal));

        let like_type = match (leading, trailing) {
            (false, true) => LikeType::StartsWith,
            (true, false) => LikeType::EndsWith,
            (true, true) | (false, false) => LikeType::Contains,
        };
        Self::new(literal, like_type)
    }

    /// Ignores case when matching.
    #[must_use = "builder methods must be chained or built"]
    pub fn case_insensitive(mut self, enabled: bool) -> Self {
        self.case_insensitive = enabled;
        self
    }

    /// The match position.
    #[must_use]
    pub fn like_type(&self) -> LikeType {
        self.like_type
    }

    /// The literal without markers.
    #[must_use]
    pub fn literal(&self) -> &str {
        &self.literal
    }

    /// Whether matching ignores case.
    #[must_use]
    pub fn is_case_insensitive(&self) -> bool {
        self.case_insensitive
    }

    fn matches(&self, text: &str) -> bool {
        if self.case_insensitive {
            let text = text.to_lowercase();
            let literal = self.literal.to_lowercase();
            Self::matches_as(self.like_type, &text, &literal)
        } else {
            Self::matches_as(self.like_type, text, &self.literal)
        }
    }

    fn matches_as(like_type: LikeType, text: &str, literal: &str) -> bool {
        match like_type {
            LikeType::StartsWith => text.starts_with(literal),
            LikeType::EndsWith => text.ends_with(literal),
            LikeType::Contains => text.contains(literal),
        }
    }
}

impl fmt::Display for Like {
    /// The encoded form, which [`Like::parse`] reads back.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.like_type {
            LikeType::StartsWith => write!(f, "{}{WILDCARD}", self.literal),
            LikeType::EndsWith => write!(f, "{WILDCARD}{}", self.literal),
            LikeType::Contains => write!(f, "{WILDCARD}{}{WILDCARD}", self.literal),
        }
    }
}

impl Predicate for Like {
    fn test(&self, value: &Value) -> bool {
        value
            .text_rendering()
            .is_some_and(|text| self.matches(&text))
    }

    fn type_tag(&self) -> Option<&str> {
        Some(Self::TYPE_TAG)
    }
}
