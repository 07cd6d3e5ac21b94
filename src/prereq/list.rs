//! AND/OR prerequisite lists

use crate::character::CharacterView;
use crate::core::types::parse_tech_level;
use crate::criteria::{IntegerCriteria, NumericCompareType};

use super::NodeId;

/// Tech-level gate value meaning "no gate"
pub const WHEN_TL_DISABLED: IntegerCriteria =
    IntegerCriteria::new(NumericCompareType::AtLeast, i32::MIN);

/// Composite node combining its children with AND (`requires_all`) or OR
///
/// Children are owned by the [`PrereqTree`](super::PrereqTree) arena; the
/// list only records their order.
#[derive(Debug, Clone)]
pub struct PrereqList {
    requires_all: bool,
    when_tl: IntegerCriteria,
    pub(crate) children: Vec<NodeId>,
}

impl Default for PrereqList {
    fn default() -> Self {
        Self::new(true)
    }
}

impl PrereqList {
    pub fn new(requires_all: bool) -> Self {
        Self {
            requires_all,
            when_tl: WHEN_TL_DISABLED,
            children: Vec::new(),
        }
    }

    /// List that only applies to characters whose tech level matches
    pub fn with_when_tl(mut self, when_tl: IntegerCriteria) -> Self {
        self.when_tl = when_tl;
        self
    }

    pub fn requires_all(&self) -> bool {
        self.requires_all
    }

    pub fn set_requires_all(&mut self, requires_all: bool) {
        self.requires_all = requires_all;
    }

    pub fn when_tl(&self) -> &IntegerCriteria {
        &self.when_tl
    }

    pub fn set_when_tl(&mut self, when_tl: IntegerCriteria) {
        self.when_tl = when_tl;
    }

    pub fn is_when_tl_enabled(&self) -> bool {
        self.when_tl != WHEN_TL_DISABLED
    }

    /// Toggle the gate; enabling starts from tech level 0
    pub fn set_when_tl_enabled(&mut self, enabled: bool) {
        if self.is_when_tl_enabled() != enabled {
            self.when_tl
                .set_qualifier(if enabled { 0 } else { i32::MIN });
            if !enabled {
                self.when_tl.set_compare(NumericCompareType::AtLeast);
            }
        }
    }

    pub fn children(&self) -> &[NodeId] {
        &self.children
    }

    pub fn len(&self) -> usize {
        self.children.len()
    }

    pub fn is_empty(&self) -> bool {
        self.children.is_empty()
    }

    /// False when the gate is enabled and the character's tech level fails it
    pub fn applies_to(&self, character: &dyn CharacterView) -> bool {
        !self.is_when_tl_enabled()
            || self
                .when_tl
                .matches(parse_tech_level(character.tech_level()))
    }

    /// Aggregate child verdicts
    pub fn combine(&self, satisfied_count: usize, total: usize) -> bool {
        if self.requires_all {
            satisfied_count == total
        } else {
            satisfied_count > 0
        }
    }

    pub fn header(&self, prefix: &str) -> String {
        if self.requires_all {
            format!("{}Requires all of:", prefix)
        } else {
            format!("{}Requires at least one of:", prefix)
        }
    }
}
