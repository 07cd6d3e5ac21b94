use thiserror::Error;

use crate::core::types::RowId;
use crate::prereq::NodeId;

#[derive(Error, Debug)]
pub enum PrereqError {
    #[error("Prerequisite node not found: {0}")]
    NodeNotFound(NodeId),

    #[error("Prerequisite node {0} is not a list and cannot own children")]
    NotAList(NodeId),

    #[error("Index {index} out of bounds for list {list} with {len} children")]
    IndexOutOfBounds { list: NodeId, index: usize, len: usize },

    #[error("Prerequisite node {0} already has a parent")]
    AlreadyAttached(NodeId),

    #[error("Attaching {child} under {parent} would create a cycle")]
    WouldCreateCycle { parent: NodeId, child: NodeId },

    #[error("The root of a prerequisite tree cannot be detached or removed")]
    RootImmutable,

    #[error("A list payload must be inserted without children; add them through the tree")]
    ListNotEmpty,

    #[error("No character row with id {0}")]
    RowNotFound(RowId),

    #[error("Invalid weight: {0}")]
    InvalidWeight(String),

    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("TOML parse error: {0}")]
    TomlError(#[from] toml::de::Error),

    #[error("JSON error: {0}")]
    SerdeError(#[from] serde_json::Error),

    #[error("Unsupported file format: {0}")]
    UnsupportedFormat(String),
}

pub type Result<T> = std::result::Result<T, PrereqError>;
