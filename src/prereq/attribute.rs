//! Attribute prerequisite

use serde::{Deserialize, Serialize};

use super::{has_text, LeafPrereq, Request};
use crate::character::AttributeKind;
use crate::criteria::IntegerCriteria;

/// Requires an attribute, optionally summed with a second one, to meet a
/// threshold
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AttributePrereq {
    pub has: bool,
    pub which: AttributeKind,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub combined_with: Option<AttributeKind>,
    pub qualifier: IntegerCriteria,
}

impl Default for AttributePrereq {
    fn default() -> Self {
        Self {
            has: true,
            which: AttributeKind::Iq,
            combined_with: None,
            qualifier: IntegerCriteria::at_least(10),
        }
    }
}

impl AttributePrereq {
    pub fn new(which: AttributeKind, qualifier: IntegerCriteria) -> Self {
        Self {
            which,
            qualifier,
            ..Self::default()
        }
    }

    pub fn combined_with(mut self, other: AttributeKind) -> Self {
        self.combined_with = Some(other);
        self
    }

    pub fn with_has(mut self, has: bool) -> Self {
        self.has = has;
        self
    }

    /// The value the qualifier is compared against
    pub fn value(&self, request: &Request<'_>) -> i32 {
        let base = request.character.attribute(self.which);
        let extra = self
            .combined_with
            .map_or(0, |other| request.character.attribute(other));
        base.saturating_add(extra)
    }
}

impl LeafPrereq for AttributePrereq {
    fn tag(&self) -> &'static str {
        super::record::TAG_ATTRIBUTE
    }

    fn has(&self) -> bool {
        self.has
    }

    fn found(&self, request: &Request<'_>) -> bool {
        self.qualifier.matches(self.value(request))
    }

    fn describe(&self, prefix: &str, _request: &Request<'_>) -> String {
        match self.combined_with {
            Some(other) => format!(
                "{}{} {} combined with {} which is {}",
                prefix,
                has_text(self.has),
                self.which.display_name(),
                other.display_name(),
                self.qualifier
            ),
            None => format!(
                "{}{} {} which is {}",
                prefix,
                has_text(self.has),
                self.which.display_name(),
                self.qualifier
            ),
        }
    }
}
