//! Typed comparison predicates
//!
//! Every prerequisite leaf is configured with one or more criteria. A
//! criteria both decides `matches(value)` and renders itself for the
//! human-readable explanation of a failed prerequisite.

pub mod numeric;
pub mod string;
pub mod weight;

pub use numeric::{IntegerCriteria, NumericCompareType};
pub use string::{StringCompareType, StringCriteria};
pub use weight::{Weight, WeightCriteria, WeightUnits};
