//! Load characters, prerequisite trees and engine config from TOML or JSON

use std::fs;
use std::path::Path;

use serde::de::DeserializeOwned;

use crate::character::Character;
use crate::core::config::EngineConfig;
use crate::core::error::{PrereqError, Result};
use crate::prereq::{PrereqRecord, PrereqTree};

/// Serialization formats understood by the loader
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Format {
    Toml,
    Json,
}

impl Format {
    /// Pick a format from the file extension
    pub fn from_path(path: &Path) -> Result<Self> {
        match path.extension().and_then(|ext| ext.to_str()) {
            Some(ext) if ext.eq_ignore_ascii_case("toml") => Ok(Format::Toml),
            Some(ext) if ext.eq_ignore_ascii_case("json") => Ok(Format::Json),
            _ => Err(PrereqError::UnsupportedFormat(path.display().to_string())),
        }
    }
}

/// Parse `content` in the given format
pub fn parse<T: DeserializeOwned>(content: &str, format: Format) -> Result<T> {
    Ok(match format {
        Format::Toml => toml::from_str(content)?,
        Format::Json => serde_json::from_str(content)?,
    })
}

fn load<T: DeserializeOwned>(path: &Path) -> Result<T> {
    let format = Format::from_path(path)?;
    let content = fs::read_to_string(path)?;
    parse(&content, format)
}

/// Load a character snapshot
pub fn load_character(path: &Path) -> Result<Character> {
    let character: Character = load(path)?;
    tracing::info!(
        path = %path.display(),
        name = %character.name,
        advantages = character.advantages.len(),
        skills = character.skills.len(),
        spells = character.spells.len(),
        equipment = character.equipment.len(),
        "loaded character"
    );
    Ok(character)
}

/// Load a prerequisite tree
pub fn load_prereqs(path: &Path) -> Result<PrereqTree> {
    let record: PrereqRecord = load(path)?;
    let tree = PrereqTree::from_record(&record);
    tracing::info!(path = %path.display(), nodes = tree.len(), "loaded prerequisites");
    Ok(tree)
}

/// Load and validate an engine config
pub fn load_config(path: &Path) -> Result<EngineConfig> {
    let config: EngineConfig = load(path)?;
    config.validate().map_err(PrereqError::InvalidConfig)?;
    tracing::info!(path = %path.display(), "loaded engine config");
    Ok(config)
}
