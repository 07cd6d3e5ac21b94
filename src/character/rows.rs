//! Character rows: advantages, skills, spells and equipment

use serde::{Deserialize, Serialize};

use crate::core::types::RowId;
use crate::criteria::Weight;

fn not_leveled() -> i32 {
    -1
}

fn one() -> u32 {
    1
}

/// An advantage or disadvantage
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Advantage {
    #[serde(default)]
    pub id: RowId,
    pub name: String,
    #[serde(default)]
    pub notes: String,
    /// Notes contributed by enabled modifiers
    #[serde(default)]
    pub modifier_notes: String,
    /// Purchased levels; negative when the advantage is not leveled
    #[serde(default = "not_leveled")]
    pub levels: i32,
}

impl Advantage {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            id: RowId::new(),
            name: name.into(),
            notes: String::new(),
            modifier_notes: String::new(),
            levels: not_leveled(),
        }
    }

    pub fn with_levels(mut self, levels: i32) -> Self {
        self.levels = levels;
        self
    }

    pub fn with_notes(mut self, notes: impl Into<String>) -> Self {
        self.notes = notes.into();
        self
    }

    pub fn with_modifier_notes(mut self, notes: impl Into<String>) -> Self {
        self.modifier_notes = notes.into();
        self
    }

    /// Modifier notes and notes joined the way notes criteria see them
    pub fn combined_notes(&self) -> String {
        if self.modifier_notes.is_empty() {
            self.notes.clone()
        } else {
            format!("{}\n{}", self.modifier_notes, self.notes)
        }
    }
}

/// A skill with its computed level
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Skill {
    #[serde(default)]
    pub id: RowId,
    pub name: String,
    #[serde(default)]
    pub specialization: String,
    /// Present only for tech-level dependent skills
    #[serde(default)]
    pub tech_level: Option<String>,
    #[serde(default)]
    pub level: i32,
}

impl Skill {
    pub fn new(name: impl Into<String>, level: i32) -> Self {
        Self {
            id: RowId::new(),
            name: name.into(),
            specialization: String::new(),
            tech_level: None,
            level,
        }
    }

    pub fn with_specialization(mut self, specialization: impl Into<String>) -> Self {
        self.specialization = specialization.into();
        self
    }

    pub fn with_tech_level(mut self, tech_level: impl Into<String>) -> Self {
        self.tech_level = Some(tech_level.into());
        self
    }
}

/// A spell
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Spell {
    #[serde(default)]
    pub id: RowId,
    pub name: String,
    #[serde(default)]
    pub college: String,
    #[serde(default)]
    pub tech_level: Option<String>,
    #[serde(default)]
    pub points: i32,
}

impl Spell {
    pub fn new(name: impl Into<String>, college: impl Into<String>, points: i32) -> Self {
        Self {
            id: RowId::new(),
            name: name.into(),
            college: college.into(),
            tech_level: None,
            points,
        }
    }

    pub fn with_tech_level(mut self, tech_level: impl Into<String>) -> Self {
        self.tech_level = Some(tech_level.into());
        self
    }
}

/// A piece of equipment, possibly a container
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Equipment {
    #[serde(default)]
    pub id: RowId,
    pub name: String,
    #[serde(default = "one")]
    pub quantity: u32,
    /// Weight of a single unit, modifiers already applied
    #[serde(default)]
    pub weight: Weight,
    #[serde(default)]
    pub container: bool,
    #[serde(default)]
    pub children: Vec<Equipment>,
}

impl Equipment {
    pub fn new(name: impl Into<String>, weight: Weight) -> Self {
        Self {
            id: RowId::new(),
            name: name.into(),
            quantity: 1,
            weight,
            container: false,
            children: Vec::new(),
        }
    }

    pub fn container(name: impl Into<String>, weight: Weight) -> Self {
        Self {
            container: true,
            ..Self::new(name, weight)
        }
    }

    pub fn with_quantity(mut self, quantity: u32) -> Self {
        self.quantity = quantity;
        self
    }

    /// Add a contained item, turning this row into a container
    pub fn with_child(mut self, child: Equipment) -> Self {
        self.container = true;
        self.children.push(child);
        self
    }

    pub fn can_contain(&self) -> bool {
        self.container
    }

    /// Own weight times quantity plus everything contained
    pub fn extended_weight(&self) -> Weight {
        self.children.iter().fold(
            self.weight.scale(f64::from(self.quantity)),
            |total, child| total.add(&child.extended_weight()),
        )
    }

    /// Weight of the contents alone
    pub fn contained_weight(&self) -> Weight {
        self.extended_weight().subtract(&self.weight)
    }

    pub(crate) fn find(&self, id: RowId) -> Option<&Equipment> {
        if self.id == id {
            return Some(self);
        }
        self.children.iter().find_map(|child| child.find(id))
    }
}

/// Borrowed handle to the row whose prerequisites are being evaluated
#[derive(Debug, Clone, Copy)]
pub enum RowRef<'a> {
    Advantage(&'a Advantage),
    Skill(&'a Skill),
    Spell(&'a Spell),
    Equipment(&'a Equipment),
}

impl<'a> RowRef<'a> {
    pub fn id(&self) -> RowId {
        match self {
            RowRef::Advantage(row) => row.id,
            RowRef::Skill(row) => row.id,
            RowRef::Spell(row) => row.id,
            RowRef::Equipment(row) => row.id,
        }
    }

    pub fn is(&self, id: RowId) -> bool {
        self.id() == id
    }
}
