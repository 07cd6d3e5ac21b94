//! `@key@` placeholders in template text
//!
//! A template item can mark parts of its text as nameable, e.g. a skill
//! prerequisite on `@Weapon@`. Instantiating the template collects the keys,
//! asks for a value per key, and substitutes them back.

use std::collections::{BTreeSet, HashMap};

/// Add every `@key@` found in `text` to `keys`
pub fn extract(keys: &mut BTreeSet<String>, text: &str) {
    let mut rest = text;
    while let Some(start) = rest.find('@') {
        let after = &rest[start + 1..];
        match after.find('@') {
            Some(end) => {
                keys.insert(after[..end].to_string());
                rest = &after[end + 1..];
            }
            None => break,
        }
    }
}

/// Replace known `@key@` tokens in `text`; unknown tokens stay verbatim
pub fn apply(map: &HashMap<String, String>, text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut rest = text;
    while let Some(start) = rest.find('@') {
        let after = &rest[start + 1..];
        let Some(end) = after.find('@') else {
            break;
        };
        let key = &after[..end];
        out.push_str(&rest[..start]);
        match map.get(key) {
            Some(replacement) => out.push_str(replacement),
            None => {
                out.push('@');
                out.push_str(key);
                out.push('@');
            }
        }
        rest = &after[end + 1..];
    }
    out.push_str(rest);
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    fn map(pairs: &[(&str, &str)]) -> HashMap<String, String> {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    #[test]
    fn test_extract_multiple_keys() {
        let mut keys = BTreeSet::new();
        extract(&mut keys, "@Weapon@ Art (@Style@)");
        assert_eq!(keys.into_iter().collect::<Vec<_>>(), vec!["Style", "Weapon"]);
    }

    #[test]
    fn test_extract_ignores_unpaired_marker() {
        let mut keys = BTreeSet::new();
        extract(&mut keys, "mail@example");
        assert!(keys.is_empty());
    }

    #[test]
    fn test_apply_known_and_unknown() {
        let replaced = apply(&map(&[("Weapon", "Broadsword")]), "@Weapon@ vs @Shield@!");
        assert_eq!(replaced, "Broadsword vs @Shield@!");
    }

    #[test]
    fn test_apply_without_tokens_is_identity() {
        assert_eq!(apply(&map(&[]), "Climbing"), "Climbing");
        assert_eq!(apply(&map(&[("a", "b")]), "tail @"), "tail @");
    }

    #[test]
    fn test_apply_adjacent_tokens() {
        let replaced = apply(&map(&[("A", "1"), ("B", "2")]), "@A@@B@");
        assert_eq!(replaced, "12");
    }
}
