//! Character snapshot consumed by prerequisite evaluation
//!
//! Evaluation only reads from a character through [`CharacterView`], so
//! callers with their own sheet model can implement the trait directly.
//! [`Character`] is the serde-backed snapshot used by the loader and CLI.

pub mod attributes;
pub mod rows;

pub use attributes::{AttributeKind, Attributes};
pub use rows::{Advantage, Equipment, RowRef, Skill, Spell};

use serde::{Deserialize, Serialize};

use crate::core::types::RowId;

/// Read access to everything a prerequisite may inspect
pub trait CharacterView {
    fn advantages(&self) -> &[Advantage];

    fn skills(&self) -> &[Skill];

    fn spells(&self) -> &[Spell];

    /// Current value of a scalar attribute
    fn attribute(&self, kind: AttributeKind) -> i32;

    /// Tech level as free text; parsing is the evaluator's concern
    fn tech_level(&self) -> &str;
}

/// A character snapshot
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Character {
    pub name: String,
    pub tech_level: String,
    pub attributes: Attributes,
    pub advantages: Vec<Advantage>,
    pub skills: Vec<Skill>,
    pub spells: Vec<Spell>,
    pub equipment: Vec<Equipment>,
}

impl Character {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }

    pub fn with_tech_level(mut self, tech_level: impl Into<String>) -> Self {
        self.tech_level = tech_level.into();
        self
    }

    pub fn with_attribute(mut self, kind: AttributeKind, value: i32) -> Self {
        self.attributes.set(kind, value);
        self
    }

    pub fn with_advantage(mut self, advantage: Advantage) -> Self {
        self.advantages.push(advantage);
        self
    }

    pub fn with_skill(mut self, skill: Skill) -> Self {
        self.skills.push(skill);
        self
    }

    pub fn with_spell(mut self, spell: Spell) -> Self {
        self.spells.push(spell);
        self
    }

    pub fn with_equipment(mut self, equipment: Equipment) -> Self {
        self.equipment.push(equipment);
        self
    }

    /// Locate any row by id, descending into equipment containers
    pub fn find_row(&self, id: RowId) -> Option<RowRef<'_>> {
        if let Some(advantage) = self.advantages.iter().find(|a| a.id == id) {
            return Some(RowRef::Advantage(advantage));
        }
        if let Some(skill) = self.skills.iter().find(|s| s.id == id) {
            return Some(RowRef::Skill(skill));
        }
        if let Some(spell) = self.spells.iter().find(|s| s.id == id) {
            return Some(RowRef::Spell(spell));
        }
        self.equipment
            .iter()
            .find_map(|e| e.find(id))
            .map(RowRef::Equipment)
    }
}

impl CharacterView for Character {
    fn advantages(&self) -> &[Advantage] {
        &self.advantages
    }

    fn skills(&self) -> &[Skill] {
        &self.skills
    }

    fn spells(&self) -> &[Spell] {
        &self.spells
    }

    fn attribute(&self, kind: AttributeKind) -> i32 {
        self.attributes.get(kind)
    }

    fn tech_level(&self) -> &str {
        &self.tech_level
    }
}
