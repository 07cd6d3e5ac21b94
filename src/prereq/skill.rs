//! Skill prerequisite

use serde::{Deserialize, Serialize};

use super::{has_text, LeafPrereq, NameLevel, Request};
use crate::character::RowRef;
use crate::criteria::{IntegerCriteria, StringCriteria};

/// Requires (or forbids) a skill by name, specialization and level
///
/// When the row being evaluated is itself a tech-level dependent skill, a
/// candidate that also carries a tech level must carry the same one.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SkillPrereq {
    pub has: bool,
    #[serde(flatten)]
    pub name_level: NameLevel,
    pub specialization: StringCriteria,
}

impl Default for SkillPrereq {
    fn default() -> Self {
        Self {
            has: true,
            name_level: NameLevel::new(StringCriteria::is(""), IntegerCriteria::at_least(0)),
            specialization: StringCriteria::any(),
        }
    }
}

impl SkillPrereq {
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

    pub fn with_specialization(mut self, specialization: StringCriteria) -> Self {
        self.specialization = specialization;
        self
    }

    pub fn with_has(mut self, has: bool) -> Self {
        self.has = has;
        self
    }
}

fn excluded_tech_level<'a>(request: &Request<'a>) -> Option<&'a str> {
    match request.exclude {
        Some(RowRef::Skill(skill)) => skill.tech_level.as_deref(),
        _ => None,
    }
}

impl LeafPrereq for SkillPrereq {
    fn tag(&self) -> &'static str {
        super::record::TAG_SKILL
    }

    fn has(&self) -> bool {
        self.has
    }

    fn found(&self, request: &Request<'_>) -> bool {
        let tech_level = excluded_tech_level(request);
        request
            .character
            .skills()
            .iter()
            .filter(|skill| !request.is_excluded(skill.id))
            .any(|skill| {
                let tech_level_ok = match (tech_level, skill.tech_level.as_deref()) {
                    (Some(wanted), Some(other)) => wanted == other,
                    _ => true,
                };
                self.name_level.matches_name(&skill.name)
                    && self.specialization.matches(&skill.specialization)
                    && self.name_level.matches_level(skill.level)
                    && tech_level_ok
            })
    }

    fn describe(&self, prefix: &str, request: &Request<'_>) -> String {
        let mut text = format!(
            "{}{} a skill whose name {}",
            prefix,
            has_text(self.has),
            self.name_level.name
        );
        if !self.specialization.is_any() {
            text.push_str(&format!(", specialization {},", self.specialization));
        }
        if excluded_tech_level(request).is_some() {
            text.push_str(&format!(
                ", level {} and tech level matches",
                self.name_level.level
            ));
        } else {
            text.push_str(&format!(" and level {}", self.name_level.level));
        }
        text
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::character::{Character, Skill};
    use crate::prereq::evaluate_leaf;

    fn climber() -> Character {
        Character::new("Aldric").with_skill(Skill::new("Climbing", 14))
    }

    #[test]
    fn test_climbing_at_least_twelve() {
        let character = climber();
        let prereq = SkillPrereq::named(StringCriteria::is("Climbing"))
            .with_level(IntegerCriteria::at_least(12));
        let outcome = evaluate_leaf(&prereq, &Request::new(&character).explained(""));
        assert!(outcome.satisfied);
        assert!(outcome.lines.is_empty());
    }

    #[test]
    fn test_climbing_at_least_fifteen_explains() {
        let character = climber();
        let prereq = SkillPrereq::named(StringCriteria::is("Climbing"))
            .with_level(IntegerCriteria::at_least(15));
        let outcome = evaluate_leaf(&prereq, &Request::new(&character).explained(""));
        assert!(!outcome.satisfied);
        assert_eq!(
            outcome.explanation().as_deref(),
            Some("Has a skill whose name is Climbing and level at least 15")
        );
    }

    #[test]
    fn test_specialization_must_match() {
        let character = Character::new("Aldric")
            .with_skill(Skill::new("Guns", 13).with_specialization("Pistol"));
        let rifle = SkillPrereq::named(StringCriteria::is("Guns"))
            .with_specialization(StringCriteria::is("Rifle"));
        let outcome = evaluate_leaf(&rifle, &Request::new(&character).explained(""));
        assert!(!outcome.satisfied);
        assert_eq!(
            outcome.lines[0],
            "Has a skill whose name is Guns, specialization is Rifle, and level at least 0"
        );

        let pistol = SkillPrereq::named(StringCriteria::is("Guns"))
            .with_specialization(StringCriteria::is("pistol"));
        assert!(evaluate_leaf(&pistol, &Request::new(&character)).satisfied);
    }

    #[test]
    fn test_tech_level_must_match_excluded_skill() {
        let excluded = Skill::new("Armoury", 12).with_tech_level("3");
        let character = Character::new("Aldric")
            .with_skill(Skill::new("Metallurgy", 12).with_tech_level("4"));
        let prereq = SkillPrereq::named(StringCriteria::is("Metallurgy"));

        let request = Request::new(&character)
            .excluding(RowRef::Skill(&excluded))
            .explained("");
        let outcome = evaluate_leaf(&prereq, &request);
        assert!(!outcome.satisfied);
        assert!(outcome.lines[0].ends_with(", level at least 0 and tech level matches"));

        // Without a tech-level excluded row the same skill qualifies
        assert!(evaluate_leaf(&prereq, &Request::new(&character)).satisfied);
    }

    #[test]
    fn test_candidate_without_tech_level_is_compatible() {
        let excluded = Skill::new("Armoury", 12).with_tech_level("3");
        let character = Character::new("Aldric").with_skill(Skill::new("Smithing", 11));
        let prereq = SkillPrereq::named(StringCriteria::is("Smithing"));
        let request = Request::new(&character).excluding(RowRef::Skill(&excluded));
        assert!(evaluate_leaf(&prereq, &request).satisfied);
    }

    #[test]
    fn test_second_candidate_can_satisfy() {
        let character = Character::new("Aldric")
            .with_skill(Skill::new("Climbing", 9))
            .with_skill(Skill::new("Climbing", 16).with_specialization("Ice"));
        let prereq = SkillPrereq::named(StringCriteria::is("Climbing"))
            .with_level(IntegerCriteria::at_least(15));
        assert!(evaluate_leaf(&prereq, &Request::new(&character)).satisfied);
    }
}
