//! Contained weight prerequisite

use serde::{Deserialize, Serialize};

use super::{has_text, LeafPrereq, Request};
use crate::character::RowRef;
use crate::criteria::WeightCriteria;

/// Limits what a container row may hold
///
/// Only meaningful when the row being evaluated is container equipment;
/// for any other row nothing is found.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ContainedWeightPrereq {
    pub has: bool,
    pub qualifier: WeightCriteria,
}

impl Default for ContainedWeightPrereq {
    fn default() -> Self {
        Self::new(WeightCriteria::default())
    }
}

impl ContainedWeightPrereq {
    pub fn new(qualifier: WeightCriteria) -> Self {
        Self {
            has: true,
            qualifier,
        }
    }

    pub fn with_has(mut self, has: bool) -> Self {
        self.has = has;
        self
    }
}

impl LeafPrereq for ContainedWeightPrereq {
    fn tag(&self) -> &'static str {
        super::record::TAG_CONTAINED_WEIGHT
    }

    fn has(&self) -> bool {
        self.has
    }

    fn found(&self, request: &Request<'_>) -> bool {
        match request.exclude {
            Some(RowRef::Equipment(equipment)) if equipment.can_contain() => {
                self.qualifier.matches(&equipment.contained_weight())
            }
            _ => false,
        }
    }

    fn describe(&self, prefix: &str, _request: &Request<'_>) -> String {
        format!(
            "{}{} a contained weight which is {}",
            prefix,
            has_text(self.has),
            self.qualifier
        )
    }
}
