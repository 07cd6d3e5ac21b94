//! Advantage prerequisite

use serde::{Deserialize, Serialize};

use super::{has_text, LeafPrereq, NameLevel, Request};
use crate::criteria::{IntegerCriteria, StringCriteria};

/// Requires (or forbids) an advantage by name, notes and level
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AdvantagePrereq {
    pub has: bool,
    #[serde(flatten)]
    pub name_level: NameLevel,
    /// Matched against the modifier notes and notes joined by a newline
    pub notes: StringCriteria,
}

impl Default for AdvantagePrereq {
    fn default() -> Self {
        Self {
            has: true,
            name_level: NameLevel::new(StringCriteria::is(""), IntegerCriteria::at_least(0)),
            notes: StringCriteria::any(),
        }
    }
}

impl AdvantagePrereq {
    pub fn named(name: StringCriteria) -> Self {
        Self {
            name_level: NameLevel::new(name, IntegerCriteria::at_least(0)),
            ..Self::default()
        }
    }

    pub fn with_level(mut self, level: IntegerCriteria) -> Self {
        self.name_level.level = level;
        self
    }

    pub fn with_notes(mut self, notes: StringCriteria) -> Self {
        self.notes = notes;
        self
    }

    pub fn with_has(mut self, has: bool) -> Self {
        self.has = has;
        self
    }
}

impl LeafPrereq for AdvantagePrereq {
    fn tag(&self) -> &'static str {
        super::record::TAG_ADVANTAGE
    }

    fn has(&self) -> bool {
        self.has
    }

    fn found(&self, request: &Request<'_>) -> bool {
        request
            .character
            .advantages()
            .iter()
            .filter(|advantage| !request.is_excluded(advantage.id))
            .any(|advantage| {
                self.name_level.matches_name(&advantage.name)
                    && self.notes.matches(&advantage.combined_notes())
                    && self.name_level.matches_level(advantage.levels.max(0))
            })
    }

    fn describe(&self, prefix: &str, _request: &Request<'_>) -> String {
        let mut text = format!(
            "{}{} an advantage whose name {}",
            prefix,
            has_text(self.has),
            self.name_level.name
        );
        if !self.notes.is_any() {
            text.push_str(&format!(", notes {},", self.notes));
        }
        text.push_str(&format!(" and level {}", self.name_level.level));
        text
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::character::{Advantage, Character, RowRef};
    use crate::criteria::StringCompareType;
    use crate::prereq::evaluate_leaf;

    fn magery_character() -> Character {
        Character::new("Mira")
            .with_advantage(Advantage::new("Magery").with_levels(2))
            .with_advantage(Advantage::new("Ally").with_notes("Squire").with_modifier_notes("Summonable"))
    }

    #[test]
    fn test_name_and_level_match() {
        let character = magery_character();
        let prereq = AdvantagePrereq::named(StringCriteria::is("magery"))
            .with_level(IntegerCriteria::at_least(2));
        assert!(evaluate_leaf(&prereq, &Request::new(&character)).satisfied);

        let too_high = prereq.with_level(IntegerCriteria::at_least(3));
        assert!(!evaluate_leaf(&too_high, &Request::new(&character)).satisfied);
    }

    #[test]
    fn test_unleveled_advantage_counts_as_level_zero() {
        let character = Character::new("Mira").with_advantage(Advantage::new("Luck"));
        let exactly_zero = AdvantagePrereq::named(StringCriteria::is("Luck"))
            .with_level(IntegerCriteria::exactly(0));
        assert!(evaluate_leaf(&exactly_zero, &Request::new(&character)).satisfied);
    }

    #[test]
    fn test_notes_see_modifier_notes() {
        let character = magery_character();
        let prereq = AdvantagePrereq::named(StringCriteria::is("Ally"))
            .with_notes(StringCriteria::new(StringCompareType::StartsWith, "summon"));
        assert!(evaluate_leaf(&prereq, &Request::new(&character)).satisfied);

        let squire = AdvantagePrereq::named(StringCriteria::is("Ally"))
            .with_notes(StringCriteria::new(StringCompareType::EndsWith, "squire"));
        assert!(evaluate_leaf(&squire, &Request::new(&character)).satisfied);
    }

    #[test]
    fn test_excluded_row_never_satisfies_itself() {
        let character = magery_character();
        let prereq = AdvantagePrereq::named(StringCriteria::is("Magery"));
        let request = Request::new(&character).excluding(RowRef::Advantage(&character.advantages[0]));
        assert!(!evaluate_leaf(&prereq, &request).satisfied);
    }

    #[test]
    fn test_explanation_text() {
        let character = Character::new("Mira");
        let prereq = AdvantagePrereq::named(StringCriteria::is("Magery"))
            .with_notes(StringCriteria::new(StringCompareType::Contains, "One College"))
            .with_level(IntegerCriteria::at_least(1));
        let outcome = evaluate_leaf(&prereq, &Request::new(&character).explained("- "));
        assert_eq!(
            outcome.lines,
            vec!["- Has an advantage whose name is Magery, notes contains One College, and level at least 1"]
        );
    }

    #[test]
    fn test_does_not_have_phrasing() {
        let character = magery_character();
        let prereq = AdvantagePrereq::named(StringCriteria::is("Magery")).with_has(false);
        let outcome = evaluate_leaf(&prereq, &Request::new(&character).explained(""));
        assert!(!outcome.satisfied);
        assert!(outcome.lines[0].starts_with("Does not have an advantage whose name is Magery"));
    }
}
