//! Prerequisite trees
//!
//! A prerequisite tree decides whether a character qualifies for a feature
//! (advantage, skill, spell, equipment) and explains why when it does not.
//!
//! The node family is closed: one [`PrereqList`] composite plus five leaf
//! kinds. Nodes live in a [`PrereqTree`] arena and reference their parent by
//! [`NodeId`], so detaching and re-parenting never fights ownership.
//!
//! Evaluation is pure: it borrows the tree and the character and returns an
//! [`Outcome`] carrying the verdict and, on request, explanation lines.

pub mod advantage;
pub mod attribute;
pub mod contained_weight;
pub mod list;
pub mod name_level;
pub mod record;
pub mod skill;
pub mod spell;
pub mod tree;

pub use advantage::AdvantagePrereq;
pub use attribute::AttributePrereq;
pub use contained_weight::ContainedWeightPrereq;
pub use list::PrereqList;
pub use name_level::NameLevel;
pub use record::PrereqRecord;
pub use skill::SkillPrereq;
pub use spell::{SpellMode, SpellPrereq};
pub use tree::{LeafMut, NodeId, PrereqTree};

use serde::Serialize;

use crate::character::{CharacterView, RowRef};
use crate::core::types::RowId;
use crate::criteria::StringCriteria;

/// One node of a prerequisite tree
#[derive(Debug, Clone)]
pub enum Prereq {
    List(PrereqList),
    Advantage(AdvantagePrereq),
    Skill(SkillPrereq),
    Spell(SpellPrereq),
    Attribute(AttributePrereq),
    ContainedWeight(ContainedWeightPrereq),
}

impl Prereq {
    /// Tag of the persisted record for this node kind
    pub fn tag(&self) -> &'static str {
        match self {
            Prereq::List(_) => record::TAG_LIST,
            Prereq::Advantage(_) => record::TAG_ADVANTAGE,
            Prereq::Skill(_) => record::TAG_SKILL,
            Prereq::Spell(_) => record::TAG_SPELL,
            Prereq::Attribute(_) => record::TAG_ATTRIBUTE,
            Prereq::ContainedWeight(_) => record::TAG_CONTAINED_WEIGHT,
        }
    }

    pub fn is_list(&self) -> bool {
        matches!(self, Prereq::List(_))
    }

    pub fn as_list(&self) -> Option<&PrereqList> {
        match self {
            Prereq::List(list) => Some(list),
            _ => None,
        }
    }

    pub fn as_list_mut(&mut self) -> Option<&mut PrereqList> {
        match self {
            Prereq::List(list) => Some(list),
            _ => None,
        }
    }

    /// Polarity of a leaf; lists have none
    pub fn has(&self) -> Option<bool> {
        match self {
            Prereq::List(_) => None,
            Prereq::Advantage(p) => Some(p.has),
            Prereq::Skill(p) => Some(p.has),
            Prereq::Spell(p) => Some(p.has),
            Prereq::Attribute(p) => Some(p.has),
            Prereq::ContainedWeight(p) => Some(p.has),
        }
    }

    /// Compare node payloads, ignoring list membership
    pub(crate) fn same_payload(&self, other: &Prereq) -> bool {
        match (self, other) {
            (Prereq::List(a), Prereq::List(b)) => {
                a.requires_all() == b.requires_all() && a.when_tl() == b.when_tl()
            }
            (Prereq::Advantage(a), Prereq::Advantage(b)) => a == b,
            (Prereq::Skill(a), Prereq::Skill(b)) => a == b,
            (Prereq::Spell(a), Prereq::Spell(b)) => a == b,
            (Prereq::Attribute(a), Prereq::Attribute(b)) => a == b,
            (Prereq::ContainedWeight(a), Prereq::ContainedWeight(b)) => a == b,
            _ => false,
        }
    }

    /// Visit every string criteria this node owns
    pub(crate) fn for_each_string(&self, f: &mut dyn FnMut(&StringCriteria)) {
        match self {
            Prereq::List(_) | Prereq::Attribute(_) | Prereq::ContainedWeight(_) => {}
            Prereq::Advantage(p) => {
                f(&p.name_level.name);
                f(&p.notes);
            }
            Prereq::Skill(p) => {
                f(&p.name_level.name);
                f(&p.specialization);
            }
            Prereq::Spell(p) => {
                if p.mode != SpellMode::CollegeCount {
                    f(&p.qualifier);
                }
            }
        }
    }

    pub(crate) fn for_each_string_mut(&mut self, f: &mut dyn FnMut(&mut StringCriteria)) {
        match self {
            Prereq::List(_) | Prereq::Attribute(_) | Prereq::ContainedWeight(_) => {}
            Prereq::Advantage(p) => {
                f(&mut p.name_level.name);
                f(&mut p.notes);
            }
            Prereq::Skill(p) => {
                f(&mut p.name_level.name);
                f(&mut p.specialization);
            }
            Prereq::Spell(p) => {
                if p.mode != SpellMode::CollegeCount {
                    f(&mut p.qualifier);
                }
            }
        }
    }
}

impl Default for Prereq {
    fn default() -> Self {
        Prereq::List(PrereqList::default())
    }
}

impl From<PrereqList> for Prereq {
    fn from(list: PrereqList) -> Self {
        Prereq::List(list)
    }
}

impl From<AdvantagePrereq> for Prereq {
    fn from(prereq: AdvantagePrereq) -> Self {
        Prereq::Advantage(prereq)
    }
}

impl From<SkillPrereq> for Prereq {
    fn from(prereq: SkillPrereq) -> Self {
        Prereq::Skill(prereq)
    }
}

impl From<SpellPrereq> for Prereq {
    fn from(prereq: SpellPrereq) -> Self {
        Prereq::Spell(prereq)
    }
}

impl From<AttributePrereq> for Prereq {
    fn from(prereq: AttributePrereq) -> Self {
        Prereq::Attribute(prereq)
    }
}

impl From<ContainedWeightPrereq> for Prereq {
    fn from(prereq: ContainedWeightPrereq) -> Self {
        Prereq::ContainedWeight(prereq)
    }
}

/// Inputs of one evaluation
#[derive(Clone, Copy)]
pub struct Request<'a> {
    pub character: &'a dyn CharacterView,
    /// The row whose prerequisites are evaluated; never matches itself
    pub exclude: Option<RowRef<'a>>,
    /// Line prefix; `Some` requests explanation lines for failures
    pub explain: Option<&'a str>,
}

impl<'a> Request<'a> {
    pub fn new(character: &'a dyn CharacterView) -> Self {
        Self {
            character,
            exclude: None,
            explain: None,
        }
    }

    pub fn excluding(mut self, row: RowRef<'a>) -> Self {
        self.exclude = Some(row);
        self
    }

    pub fn explained(mut self, prefix: &'a str) -> Self {
        self.explain = Some(prefix);
        self
    }

    pub(crate) fn is_excluded(&self, id: RowId) -> bool {
        self.exclude.map_or(false, |row| row.is(id))
    }
}

/// Verdict of evaluating one node
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Outcome {
    pub satisfied: bool,
    /// Explanation lines, empty unless the node failed and explanations
    /// were requested
    pub lines: Vec<String>,
}

impl Outcome {
    pub fn pass() -> Self {
        Self {
            satisfied: true,
            lines: Vec::new(),
        }
    }

    /// Lines joined into one block of text
    pub fn explanation(&self) -> Option<String> {
        if self.lines.is_empty() {
            None
        } else {
            Some(self.lines.join("\n"))
        }
    }
}

/// Shared shape of every leaf: match locally, then apply polarity once
pub(crate) trait LeafPrereq {
    fn tag(&self) -> &'static str;

    fn has(&self) -> bool;

    /// Local match before polarity is applied
    fn found(&self, request: &Request<'_>) -> bool;

    /// One explanation line for a failed evaluation
    fn describe(&self, prefix: &str, request: &Request<'_>) -> String;
}

pub(crate) fn evaluate_leaf(leaf: &dyn LeafPrereq, request: &Request<'_>) -> Outcome {
    let found = leaf.found(request);
    let satisfied = if leaf.has() { found } else { !found };
    tracing::trace!(tag = leaf.tag(), found, satisfied, "leaf evaluated");

    let lines = match request.explain {
        Some(prefix) if !satisfied => vec![leaf.describe(prefix, request)],
        _ => Vec::new(),
    };
    Outcome { satisfied, lines }
}

pub(crate) fn has_text(has: bool) -> &'static str {
    if has {
        "Has"
    } else {
        "Does not have"
    }
}
