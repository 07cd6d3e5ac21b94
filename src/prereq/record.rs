//! Persisted shape of prerequisite trees
//!
//! Records are plain nested data, the form a tree takes in TOML or JSON
//! files. [`PrereqTree::from_record`](super::PrereqTree::from_record) turns a
//! record into an arena with parent links; `to_record` goes back.
//!
//! ```toml
//! type = "prereq_list"
//! all = false
//!
//! [[prereqs]]
//! type = "skill_prereq"
//! name = { compare = "is", qualifier = "Climbing" }
//! level = { compare = "at_least", qualifier = 12 }
//! ```

use serde::{Deserialize, Serialize};

use super::{AdvantagePrereq, AttributePrereq, ContainedWeightPrereq, SkillPrereq, SpellPrereq};
use crate::criteria::IntegerCriteria;

pub const TAG_LIST: &str = "prereq_list";
pub const TAG_ADVANTAGE: &str = "advantage_prereq";
pub const TAG_SKILL: &str = "skill_prereq";
pub const TAG_SPELL: &str = "spell_prereq";
pub const TAG_ATTRIBUTE: &str = "attribute_prereq";
pub const TAG_CONTAINED_WEIGHT: &str = "contained_weight_prereq";

/// One node of a persisted tree, tagged by `type`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum PrereqRecord {
    #[serde(rename = "prereq_list")]
    List(ListRecord),
    #[serde(rename = "advantage_prereq")]
    Advantage(AdvantagePrereq),
    #[serde(rename = "skill_prereq")]
    Skill(SkillPrereq),
    #[serde(rename = "spell_prereq")]
    Spell(SpellPrereq),
    #[serde(rename = "attribute_prereq")]
    Attribute(AttributePrereq),
    #[serde(rename = "contained_weight_prereq")]
    ContainedWeight(ContainedWeightPrereq),
}

impl PrereqRecord {
    pub fn tag(&self) -> &'static str {
        match self {
            PrereqRecord::List(_) => TAG_LIST,
            PrereqRecord::Advantage(_) => TAG_ADVANTAGE,
            PrereqRecord::Skill(_) => TAG_SKILL,
            PrereqRecord::Spell(_) => TAG_SPELL,
            PrereqRecord::Attribute(_) => TAG_ATTRIBUTE,
            PrereqRecord::ContainedWeight(_) => TAG_CONTAINED_WEIGHT,
        }
    }

    /// Number of records in this subtree, itself included
    pub fn count(&self) -> usize {
        match self {
            PrereqRecord::List(list) => 1 + list.prereqs.iter().map(Self::count).sum::<usize>(),
            _ => 1,
        }
    }
}

/// Persisted list: its flag, optional tech-level gate and children
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ListRecord {
    pub all: bool,
    /// Absent when the gate is disabled
    #[serde(skip_serializing_if = "Option::is_none")]
    pub when_tl: Option<IntegerCriteria>,
    pub prereqs: Vec<PrereqRecord>,
}

impl Default for ListRecord {
    fn default() -> Self {
        Self {
            all: true,
            when_tl: None,
            prereqs: Vec::new(),
        }
    }
}
