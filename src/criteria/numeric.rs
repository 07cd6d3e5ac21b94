//! Numeric criteria

use serde::{Deserialize, Serialize};
use std::fmt;

/// How a numeric qualifier is compared against a candidate value
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NumericCompareType {
    Is,
    IsNot,
    #[default]
    AtLeast,
    AtMost,
}

impl NumericCompareType {
    pub fn description(&self) -> &'static str {
        match self {
            NumericCompareType::Is => "exactly",
            NumericCompareType::IsNot => "not",
            NumericCompareType::AtLeast => "at least",
            NumericCompareType::AtMost => "at most",
        }
    }

    pub fn matches<T: PartialOrd>(&self, qualifier: &T, data: &T) -> bool {
        match self {
            NumericCompareType::Is => data == qualifier,
            NumericCompareType::IsNot => data != qualifier,
            NumericCompareType::AtLeast => data >= qualifier,
            NumericCompareType::AtMost => data <= qualifier,
        }
    }
}

/// An integer comparison with its qualifier
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct IntegerCriteria {
    #[serde(default)]
    compare: NumericCompareType,
    #[serde(default)]
    qualifier: i32,
}

impl IntegerCriteria {
    pub const fn new(compare: NumericCompareType, qualifier: i32) -> Self {
        Self { compare, qualifier }
    }

    pub fn at_least(qualifier: i32) -> Self {
        Self::new(NumericCompareType::AtLeast, qualifier)
    }

    pub fn at_most(qualifier: i32) -> Self {
        Self::new(NumericCompareType::AtMost, qualifier)
    }

    pub fn exactly(qualifier: i32) -> Self {
        Self::new(NumericCompareType::Is, qualifier)
    }

    pub fn compare(&self) -> NumericCompareType {
        self.compare
    }

    pub fn set_compare(&mut self, compare: NumericCompareType) {
        self.compare = compare;
    }

    pub fn qualifier(&self) -> i32 {
        self.qualifier
    }

    pub fn set_qualifier(&mut self, qualifier: i32) {
        self.qualifier = qualifier;
    }

    pub fn matches(&self, data: i32) -> bool {
        self.compare.matches(&self.qualifier, &data)
    }
}

impl fmt::Display for IntegerCriteria {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.compare.description(), self.qualifier)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_at_least_boundary() {
        let criteria = IntegerCriteria::at_least(12);
        assert!(criteria.matches(12));
        assert!(criteria.matches(14));
        assert!(!criteria.matches(11));
    }

    #[test]
    fn test_at_most_and_exactly() {
        assert!(IntegerCriteria::at_most(3).matches(-5));
        assert!(!IntegerCriteria::at_most(3).matches(4));
        assert!(IntegerCriteria::exactly(3).matches(3));
        assert!(!IntegerCriteria::exactly(3).matches(2));
        assert!(IntegerCriteria::new(NumericCompareType::IsNot, 3).matches(2));
    }

    #[test]
    fn test_min_sentinel_matches_everything() {
        let criteria = IntegerCriteria::at_least(i32::MIN);
        assert!(criteria.matches(i32::MIN));
        assert!(criteria.matches(0));
    }

    #[test]
    fn test_display() {
        assert_eq!(IntegerCriteria::at_least(15).to_string(), "at least 15");
        assert_eq!(IntegerCriteria::exactly(3).to_string(), "exactly 3");
    }
}
