//! Name and level criteria shared by advantage and skill prerequisites

use serde::{Deserialize, Serialize};

use crate::criteria::{IntegerCriteria, StringCriteria};

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct NameLevel {
    pub name: StringCriteria,
    pub level: IntegerCriteria,
}

impl NameLevel {
    pub fn new(name: StringCriteria, level: IntegerCriteria) -> Self {
        Self { name, level }
    }

    pub fn matches_name(&self, name: &str) -> bool {
        self.name.matches(name)
    }

    pub fn matches_level(&self, level: i32) -> bool {
        self.level.matches(level)
    }
}
