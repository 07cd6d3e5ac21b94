//! String criteria

use serde::{Deserialize, Serialize};
use std::fmt;

/// How a string qualifier is compared against a candidate value
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StringCompareType {
    /// Matches every value; explanations omit clauses using it
    Any,
    #[default]
    Is,
    IsNot,
    Contains,
    DoesNotContain,
    StartsWith,
    DoesNotStartWith,
    EndsWith,
    DoesNotEndWith,
}

impl StringCompareType {
    pub fn description(&self) -> &'static str {
        match self {
            StringCompareType::Any => "is anything",
            StringCompareType::Is => "is",
            StringCompareType::IsNot => "is not",
            StringCompareType::Contains => "contains",
            StringCompareType::DoesNotContain => "does not contain",
            StringCompareType::StartsWith => "starts with",
            StringCompareType::DoesNotStartWith => "does not start with",
            StringCompareType::EndsWith => "ends with",
            StringCompareType::DoesNotEndWith => "does not end with",
        }
    }

    /// Case-insensitive comparison of `data` against `qualifier`
    pub fn matches(&self, qualifier: &str, data: &str) -> bool {
        let qualifier = qualifier.to_lowercase();
        let data = data.to_lowercase();
        match self {
            StringCompareType::Any => true,
            StringCompareType::Is => data == qualifier,
            StringCompareType::IsNot => data != qualifier,
            StringCompareType::Contains => data.contains(&qualifier),
            StringCompareType::DoesNotContain => !data.contains(&qualifier),
            StringCompareType::StartsWith => data.starts_with(&qualifier),
            StringCompareType::DoesNotStartWith => !data.starts_with(&qualifier),
            StringCompareType::EndsWith => data.ends_with(&qualifier),
            StringCompareType::DoesNotEndWith => !data.ends_with(&qualifier),
        }
    }
}

/// A string comparison with its qualifier
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct StringCriteria {
    #[serde(default)]
    compare: StringCompareType,
    #[serde(default)]
    qualifier: String,
}

impl StringCriteria {
    pub fn new(compare: StringCompareType, qualifier: impl Into<String>) -> Self {
        Self {
            compare,
            qualifier: qualifier.into(),
        }
    }

    /// Criteria that accepts every value
    pub fn any() -> Self {
        Self::new(StringCompareType::Any, "")
    }

    /// Exact (case-insensitive) match
    pub fn is(qualifier: impl Into<String>) -> Self {
        Self::new(StringCompareType::Is, qualifier)
    }

    pub fn compare(&self) -> StringCompareType {
        self.compare
    }

    pub fn set_compare(&mut self, compare: StringCompareType) {
        self.compare = compare;
    }

    pub fn qualifier(&self) -> &str {
        &self.qualifier
    }

    pub fn set_qualifier(&mut self, qualifier: impl Into<String>) {
        self.qualifier = qualifier.into();
    }

    /// True when the comparison is the matches-anything sentinel
    pub fn is_any(&self) -> bool {
        self.compare == StringCompareType::Any
    }

    pub fn matches(&self, data: &str) -> bool {
        self.compare.matches(&self.qualifier, data)
    }
}

impl fmt::Display for StringCriteria {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_any() {
            write!(f, "{}", self.compare.description())
        } else {
            write!(f, "{} {}", self.compare.description(), self.qualifier)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_is_ignores_case() {
        let criteria = StringCriteria::is("Climbing");
        assert!(criteria.matches("climbing"));
        assert!(criteria.matches("CLIMBING"));
        assert!(!criteria.matches("Climbing Gear"));
    }

    #[test]
    fn test_any_matches_everything() {
        let criteria = StringCriteria::any();
        assert!(criteria.matches(""));
        assert!(criteria.matches("whatever"));
        assert!(criteria.is_any());
    }

    #[test]
    fn test_containment_family() {
        let contains = StringCriteria::new(StringCompareType::Contains, "fire");
        assert!(contains.matches("Fireball"));
        assert!(!StringCriteria::new(StringCompareType::DoesNotContain, "fire").matches("Fireball"));
        assert!(StringCriteria::new(StringCompareType::StartsWith, "fire").matches("Fireball"));
        assert!(StringCriteria::new(StringCompareType::EndsWith, "BALL").matches("Fireball"));
        assert!(StringCriteria::new(StringCompareType::DoesNotEndWith, "x").matches("Fireball"));
        assert!(!StringCriteria::new(StringCompareType::DoesNotStartWith, "f").matches("Fireball"));
        assert!(StringCriteria::new(StringCompareType::IsNot, "Ice").matches("Fireball"));
    }

    #[test]
    fn test_display() {
        assert_eq!(StringCriteria::is("Climbing").to_string(), "is Climbing");
        assert_eq!(StringCriteria::any().to_string(), "is anything");
        assert_eq!(
            StringCriteria::new(StringCompareType::StartsWith, "Fire").to_string(),
            "starts with Fire"
        );
    }

    #[test]
    fn test_toml_shape() {
        let criteria: StringCriteria =
            toml::from_str("compare = \"contains\"\nqualifier = \"Magery\"").unwrap();
        assert_eq!(criteria.compare(), StringCompareType::Contains);
        assert_eq!(criteria.qualifier(), "Magery");
    }
}
