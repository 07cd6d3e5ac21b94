//! Spell prerequisite

use ahash::AHashSet;
use serde::{Deserialize, Serialize};

use super::{has_text, LeafPrereq, Request};
use crate::character::{RowRef, Spell};
use crate::criteria::{IntegerCriteria, StringCriteria};

/// What a spell prerequisite counts
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SpellMode {
    /// Spells whose name matches the qualifier
    #[default]
    Name,
    /// Every qualifying spell
    Any,
    /// Spells whose college matches the qualifier
    College,
    /// Distinct colleges among qualifying spells
    CollegeCount,
}

/// Requires (or forbids) a number of spells
///
/// Only spells with points invested count. When the row being evaluated is
/// a tech-level dependent spell, candidates with a different tech level are
/// ignored.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SpellPrereq {
    pub has: bool,
    #[serde(rename = "sub_type")]
    pub mode: SpellMode,
    /// Name or college qualifier; unused by `any` and `college_count`
    pub qualifier: StringCriteria,
    pub quantity: IntegerCriteria,
}

impl Default for SpellPrereq {
    fn default() -> Self {
        Self {
            has: true,
            mode: SpellMode::Name,
            qualifier: StringCriteria::is(""),
            quantity: IntegerCriteria::at_least(1),
        }
    }
}

impl SpellPrereq {
    pub fn new(mode: SpellMode, qualifier: StringCriteria, quantity: IntegerCriteria) -> Self {
        Self {
            has: true,
            mode,
            qualifier,
            quantity,
        }
    }

    pub fn named(name: StringCriteria) -> Self {
        Self::new(SpellMode::Name, name, IntegerCriteria::at_least(1))
    }

    pub fn college(college: StringCriteria, quantity: IntegerCriteria) -> Self {
        Self::new(SpellMode::College, college, IntegerCriteria::at_least(1)).with_quantity(quantity)
    }

    pub fn any(quantity: IntegerCriteria) -> Self {
        Self::new(SpellMode::Any, StringCriteria::is(""), quantity)
    }

    pub fn college_count(quantity: IntegerCriteria) -> Self {
        Self::new(SpellMode::CollegeCount, StringCriteria::is(""), quantity)
    }

    pub fn with_quantity(mut self, quantity: IntegerCriteria) -> Self {
        self.quantity = quantity;
        self
    }

    pub fn with_has(mut self, has: bool) -> Self {
        self.has = has;
        self
    }

    /// Number the quantity criteria is compared against
    pub fn count(&self, request: &Request<'_>) -> usize {
        let tech_level = match request.exclude {
            Some(RowRef::Spell(spell)) => spell.tech_level.as_deref(),
            _ => None,
        };
        let qualifying = request.character.spells().iter().filter(|spell: &&Spell| {
            let tech_level_ok = match (tech_level, spell.tech_level.as_deref()) {
                (Some(wanted), Some(other)) => wanted == other,
                _ => true,
            };
            !request.is_excluded(spell.id) && spell.points > 0 && tech_level_ok
        });

        match self.mode {
            SpellMode::Name => qualifying
                .filter(|spell| self.qualifier.matches(&spell.name))
                .count(),
            SpellMode::Any => qualifying.count(),
            SpellMode::College => qualifying
                .filter(|spell| self.qualifier.matches(&spell.college))
                .count(),
            SpellMode::CollegeCount => qualifying
                .map(|spell| spell.college.as_str())
                .collect::<AHashSet<_>>()
                .len(),
        }
    }
}

impl LeafPrereq for SpellPrereq {
    fn tag(&self) -> &'static str {
        super::record::TAG_SPELL
    }

    fn has(&self) -> bool {
        self.has
    }

    fn found(&self, request: &Request<'_>) -> bool {
        let count = i32::try_from(self.count(request)).unwrap_or(i32::MAX);
        self.quantity.matches(count)
    }

    fn describe(&self, prefix: &str, _request: &Request<'_>) -> String {
        let has = has_text(self.has);
        let noun = if self.quantity.qualifier() == 1 {
            "spell"
        } else {
            "spells"
        };
        match self.mode {
            SpellMode::Name => format!(
                "{}{} {} {} whose name {}",
                prefix, has, self.quantity, noun, self.qualifier
            ),
            SpellMode::Any => format!("{}{} {} {} of any kind", prefix, has, self.quantity, noun),
            SpellMode::College => format!(
                "{}{} {} {} whose college {}",
                prefix, has, self.quantity, noun, self.qualifier
            ),
            SpellMode::CollegeCount => format!(
                "{}{} a college count which is {}",
                prefix, has, self.quantity
            ),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::character::Character;
    use crate::prereq::evaluate_leaf;

    fn wizard() -> Character {
        Character::new("Mira")
            .with_spell(Spell::new("Ignite Fire", "Fire", 1))
            .with_spell(Spell::new("Create Fire", "Fire", 2))
            .with_spell(Spell::new("Light", "Light and Darkness", 1))
            .with_spell(Spell::new("Purify Air", "Air", 0))
    }

    #[test]
    fn test_name_mode_counts_matches() {
        let character = wizard();
        let prereq = SpellPrereq::named(StringCriteria::is("Ignite Fire"));
        assert_eq!(prereq.count(&Request::new(&character)), 1);
        assert!(evaluate_leaf(&prereq, &Request::new(&character)).satisfied);
    }

    #[test]
    fn test_zero_point_spells_do_not_count() {
        let character = wizard();
        let prereq = SpellPrereq::named(StringCriteria::is("Purify Air"));
        assert_eq!(prereq.count(&Request::new(&character)), 0);
        assert!(!evaluate_leaf(&prereq, &Request::new(&character)).satisfied);
    }

    #[test]
    fn test_any_and_college_modes() {
        let character = wizard();
        let request = Request::new(&character);
        assert_eq!(SpellPrereq::any(IntegerCriteria::at_least(3)).count(&request), 3);
        assert_eq!(
            SpellPrereq::college(StringCriteria::is("fire"), IntegerCriteria::at_least(2)).count(&request),
            2
        );
    }

    #[test]
    fn test_college_count_is_distinct() {
        let character = wizard();
        let prereq = SpellPrereq::college_count(IntegerCriteria::at_least(2));
        assert_eq!(prereq.count(&Request::new(&character)), 2);
        assert!(evaluate_leaf(&prereq, &Request::new(&character)).satisfied);

        let three = SpellPrereq::college_count(IntegerCriteria::at_least(3));
        let outcome = evaluate_leaf(&three, &Request::new(&character).explained(""));
        assert_eq!(outcome.lines, vec!["Has a college count which is at least 3"]);
    }

    #[test]
    fn test_excluded_spell_and_tech_level() {
        let excluded = Spell::new("Steam Engine", "Technological", 1).with_tech_level("5");
        let character = Character::new("Mira")
            .with_spell(Spell::new("Seek Machine", "Technological", 1).with_tech_level("6"))
            .with_spell(Spell::new("Reveal Function", "Technological", 1).with_tech_level("5"))
            .with_spell(Spell::new("Glue", "Technological", 1));
        let prereq = SpellPrereq::college(
            StringCriteria::is("Technological"),
            IntegerCriteria::at_least(1),
        );
        let request = Request::new(&character).excluding(RowRef::Spell(&excluded));
        assert_eq!(prereq.count(&request), 2);
    }

    #[test]
    fn test_singular_and_plural_phrasing() {
        let character = Character::new("Mira");
        let request = Request::new(&character).explained("* ");

        let one = SpellPrereq::named(StringCriteria::is("Fireball"));
        assert_eq!(
            evaluate_leaf(&one, &request).lines,
            vec!["* Has at least 1 spell whose name is Fireball"]
        );

        let many = SpellPrereq::any(IntegerCriteria::at_least(5));
        assert_eq!(
            evaluate_leaf(&many, &request).lines,
            vec!["* Has at least 5 spells of any kind"]
        );

        let college = SpellPrereq::college(StringCriteria::is("Fire"), IntegerCriteria::at_least(2));
        assert_eq!(
            evaluate_leaf(&college, &request).lines,
            vec!["* Has at least 2 spells whose college is Fire"]
        );
    }

    #[test]
    fn test_does_not_have_inverts_count() {
        let character = wizard();
        let prereq = SpellPrereq::college(StringCriteria::is("Fire"), IntegerCriteria::at_least(1))
            .with_has(false);
        let outcome = evaluate_leaf(&prereq, &Request::new(&character).explained(""));
        assert!(!outcome.satisfied);
        assert_eq!(
            outcome.lines,
            vec!["Does not have at least 1 spell whose college is Fire"]
        );
    }
}
