//! Weight values and weight criteria

use ordered_float::OrderedFloat;
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::fmt;
use std::hash::{Hash, Hasher};
use std::str::FromStr;

use super::NumericCompareType;
use crate::core::error::PrereqError;

/// Units a weight can be expressed in
///
/// Conversions follow the tabletop convention of 1 kg = 2 lb.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum WeightUnits {
    #[default]
    Lb,
    Oz,
    Tn,
    Kg,
    G,
    T,
}

impl WeightUnits {
    pub fn abbreviation(&self) -> &'static str {
        match self {
            WeightUnits::Lb => "lb",
            WeightUnits::Oz => "oz",
            WeightUnits::Tn => "tn",
            WeightUnits::Kg => "kg",
            WeightUnits::G => "g",
            WeightUnits::T => "t",
        }
    }

    /// Multiplier converting a value in these units to pounds
    pub fn pounds_per_unit(&self) -> f64 {
        match self {
            WeightUnits::Lb => 1.0,
            WeightUnits::Oz => 1.0 / 16.0,
            WeightUnits::Tn => 2000.0,
            WeightUnits::Kg => 2.0,
            WeightUnits::G => 1.0 / 500.0,
            WeightUnits::T => 2000.0,
        }
    }

    fn from_abbreviation(text: &str) -> Option<Self> {
        match text.to_lowercase().as_str() {
            "lb" | "lbs" => Some(WeightUnits::Lb),
            "oz" => Some(WeightUnits::Oz),
            "tn" => Some(WeightUnits::Tn),
            "kg" => Some(WeightUnits::Kg),
            "g" => Some(WeightUnits::G),
            "t" => Some(WeightUnits::T),
            _ => None,
        }
    }
}

/// A weight amount tagged with its units
///
/// Serialized as text such as `"5 lb"`; a bare number uses the configured
/// default units. Equality, hashing and ordering all go through the
/// amount in pounds, so `1 kg == 2 lb`.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Weight {
    value: OrderedFloat<f64>,
    units: WeightUnits,
}

impl Weight {
    pub fn new(value: f64, units: WeightUnits) -> Self {
        Self {
            value: OrderedFloat(value),
            units,
        }
    }

    pub fn pounds(value: f64) -> Self {
        Self::new(value, WeightUnits::Lb)
    }

    pub fn zero() -> Self {
        Self::pounds(0.0)
    }

    pub fn value(&self) -> f64 {
        self.value.into_inner()
    }

    pub fn units(&self) -> WeightUnits {
        self.units
    }

    pub fn to_pounds(&self) -> f64 {
        self.value() * self.units.pounds_per_unit()
    }

    /// Express this weight in other units
    pub fn convert(&self, units: WeightUnits) -> Self {
        Self::new(self.to_pounds() / units.pounds_per_unit(), units)
    }

    /// Sum kept in the units of `self`
    pub fn add(&self, other: &Weight) -> Self {
        Self::new(self.value() + other.convert(self.units).value(), self.units)
    }

    /// Difference kept in the units of `self`
    pub fn subtract(&self, other: &Weight) -> Self {
        Self::new(self.value() - other.convert(self.units).value(), self.units)
    }

    pub fn scale(&self, factor: f64) -> Self {
        Self::new(self.value() * factor, self.units)
    }
}

impl Default for Weight {
    fn default() -> Self {
        Self::zero()
    }
}

impl Weight {
    fn normalized(&self) -> OrderedFloat<f64> {
        OrderedFloat(self.to_pounds())
    }
}

impl PartialEq for Weight {
    fn eq(&self, other: &Self) -> bool {
        self.normalized() == other.normalized()
    }
}

impl Eq for Weight {}

impl Hash for Weight {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.normalized().hash(state);
    }
}

impl PartialOrd for Weight {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Weight {
    fn cmp(&self, other: &Self) -> Ordering {
        self.normalized().cmp(&other.normalized())
    }
}

impl fmt::Display for Weight {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.value(), self.units.abbreviation())
    }
}

impl FromStr for Weight {
    type Err = PrereqError;

    fn from_str(text: &str) -> Result<Self, Self::Err> {
        let text = text.trim();
        let split = text
            .find(|c: char| c.is_ascii_alphabetic())
            .unwrap_or(text.len());
        let (amount, unit) = text.split_at(split);
        let value: f64 = amount
            .trim()
            .parse()
            .map_err(|_| PrereqError::InvalidWeight(text.to_string()))?;
        let units = if unit.trim().is_empty() {
            crate::core::config::config().default_weight_units
        } else {
            WeightUnits::from_abbreviation(unit.trim())
                .ok_or_else(|| PrereqError::InvalidWeight(text.to_string()))?
        };
        Ok(Weight::new(value, units))
    }
}

impl TryFrom<String> for Weight {
    type Error = PrereqError;

    fn try_from(text: String) -> Result<Self, Self::Error> {
        text.parse()
    }
}

impl From<Weight> for String {
    fn from(weight: Weight) -> Self {
        weight.to_string()
    }
}

/// A weight comparison with its qualifier
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct WeightCriteria {
    #[serde(default)]
    compare: NumericCompareType,
    qualifier: Weight,
}

impl WeightCriteria {
    pub fn new(compare: NumericCompareType, qualifier: Weight) -> Self {
        Self { compare, qualifier }
    }

    pub fn compare(&self) -> NumericCompareType {
        self.compare
    }

    pub fn set_compare(&mut self, compare: NumericCompareType) {
        self.compare = compare;
    }

    pub fn qualifier(&self) -> Weight {
        self.qualifier
    }

    pub fn set_qualifier(&mut self, qualifier: Weight) {
        self.qualifier = qualifier;
    }

    pub fn matches(&self, data: &Weight) -> bool {
        self.compare
            .matches(&self.qualifier.to_pounds(), &data.to_pounds())
    }
}

impl Default for WeightCriteria {
    fn default() -> Self {
        Self::new(NumericCompareType::AtMost, Weight::pounds(5.0))
    }
}

impl fmt::Display for WeightCriteria {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.compare.description(), self.qualifier)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_with_units() {
        let weight: Weight = "2.5 kg".parse().unwrap();
        assert_eq!(weight.units(), WeightUnits::Kg);
        assert!((weight.to_pounds() - 5.0).abs() < 1e-9);
    }

    #[test]
    fn test_parse_without_units_uses_default() {
        let weight: Weight = "3".parse().unwrap();
        assert_eq!(weight.units(), WeightUnits::Lb);
        assert_eq!(weight.value(), 3.0);
    }

    #[test]
    fn test_parse_rejects_garbage() {
        assert!("heavy".parse::<Weight>().is_err());
        assert!("3 stone".parse::<Weight>().is_err());
    }

    #[test]
    fn test_arithmetic_keeps_left_units() {
        let total = Weight::pounds(1.0).add(&Weight::new(8.0, WeightUnits::Oz));
        assert_eq!(total.units(), WeightUnits::Lb);
        assert!((total.value() - 1.5).abs() < 1e-9);

        let rest = Weight::pounds(4.0).subtract(&Weight::new(1.0, WeightUnits::Kg));
        assert!((rest.value() - 2.0).abs() < 1e-9);
    }

    #[test]
    fn test_criteria_compares_across_units() {
        let criteria = WeightCriteria::new(NumericCompareType::AtMost, Weight::pounds(5.0));
        assert!(criteria.matches(&Weight::new(2.0, WeightUnits::Kg)));
        assert!(!criteria.matches(&Weight::new(3.0, WeightUnits::Kg)));
    }

    #[test]
    fn test_display() {
        assert_eq!(WeightCriteria::default().to_string(), "at most 5 lb");
        assert_eq!(Weight::new(0.5, WeightUnits::Oz).to_string(), "0.5 oz");
    }

    #[test]
    fn test_equality_agrees_with_ordering() {
        use std::collections::hash_map::DefaultHasher;

        let kilo = Weight::new(1.0, WeightUnits::Kg);
        let pounds = Weight::pounds(2.0);
        assert_eq!(kilo, pounds);
        assert_eq!(kilo.partial_cmp(&pounds), Some(Ordering::Equal));
        assert_eq!(Weight::new(16.0, WeightUnits::Oz), Weight::pounds(1.0));

        let hash = |weight: &Weight| {
            let mut hasher = DefaultHasher::new();
            weight.hash(&mut hasher);
            hasher.finish()
        };
        assert_eq!(hash(&kilo), hash(&pounds));

        assert_ne!(kilo, Weight::pounds(2.5));
        assert!(kilo < Weight::pounds(2.5));
    }
}
