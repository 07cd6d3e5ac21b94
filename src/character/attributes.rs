//! Scalar attributes

use serde::{Deserialize, Serialize};

/// Attributes a prerequisite can test
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AttributeKind {
    St,
    Dx,
    Iq,
    Ht,
    Will,
    Per,
}

impl AttributeKind {
    pub const ALL: [AttributeKind; 6] = [
        AttributeKind::St,
        AttributeKind::Dx,
        AttributeKind::Iq,
        AttributeKind::Ht,
        AttributeKind::Will,
        AttributeKind::Per,
    ];

    /// Name used in explanations
    pub fn display_name(&self) -> &'static str {
        match self {
            AttributeKind::St => "ST",
            AttributeKind::Dx => "DX",
            AttributeKind::Iq => "IQ",
            AttributeKind::Ht => "HT",
            AttributeKind::Will => "Will",
            AttributeKind::Per => "Perception",
        }
    }
}

/// Attribute values, all starting at the human baseline of 10
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Attributes {
    pub st: i32,
    pub dx: i32,
    pub iq: i32,
    pub ht: i32,
    pub will: i32,
    pub per: i32,
}

impl Default for Attributes {
    fn default() -> Self {
        Self {
            st: 10,
            dx: 10,
            iq: 10,
            ht: 10,
            will: 10,
            per: 10,
        }
    }
}

impl Attributes {
    pub fn get(&self, kind: AttributeKind) -> i32 {
        match kind {
            AttributeKind::St => self.st,
            AttributeKind::Dx => self.dx,
            AttributeKind::Iq => self.iq,
            AttributeKind::Ht => self.ht,
            AttributeKind::Will => self.will,
            AttributeKind::Per => self.per,
        }
    }

    pub fn set(&mut self, kind: AttributeKind, value: i32) {
        match kind {
            AttributeKind::St => self.st = value,
            AttributeKind::Dx => self.dx = value,
            AttributeKind::Iq => self.iq = value,
            AttributeKind::Ht => self.ht = value,
            AttributeKind::Will => self.will = value,
            AttributeKind::Per => self.per = value,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_get_set_round_every_kind() {
        let mut attributes = Attributes::default();
        for (offset, kind) in AttributeKind::ALL.iter().enumerate() {
            attributes.set(*kind, 20 + offset as i32);
        }
        assert_eq!(attributes.st, 20);
        assert_eq!(attributes.per, 25);
        assert_eq!(attributes.get(AttributeKind::Will), 24);
    }

    #[test]
    fn test_display_names() {
        assert_eq!(AttributeKind::Per.display_name(), "Perception");
        assert_eq!(AttributeKind::Iq.display_name(), "IQ");
    }
}
