//! Engine configuration with documented defaults
//!
//! Only presentation and scheduling knobs live here. Matching semantics are
//! fixed and never configurable.

use serde::{Deserialize, Serialize};

use crate::criteria::WeightUnits;

/// Configuration for prerequisite evaluation and rendering
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    // === EXPLANATIONS ===
    /// Text prepended to a child's explanation lines for each level of
    /// nesting below the list that reports them
    ///
    /// Must be non-empty, otherwise nested failures become indistinguishable
    /// from their parent's header.
    pub explanation_indent: String,

    /// Prefix used by the CLI when the caller does not supply one
    pub default_line_prefix: String,

    // === UNITS ===
    /// Units assumed for weights written without an explicit unit
    pub default_weight_units: WeightUnits,

    // === PARALLELIZATION ===
    /// Minimum batch size before evaluating characters on the rayon pool
    ///
    /// A single evaluation is a few microseconds, so small batches are
    /// cheaper to run inline than to schedule.
    pub parallel_threshold: usize,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            explanation_indent: "  ".to_string(),
            default_line_prefix: "• ".to_string(),
            default_weight_units: WeightUnits::Lb,
            parallel_threshold: 256,
        }
    }
}

impl EngineConfig {
    /// Create a new config with default values
    pub fn new() -> Self {
        Self::default()
    }

    /// Validate configuration for internal consistency
    pub fn validate(&self) -> Result<(), String> {
        if self.explanation_indent.is_empty() {
            return Err("explanation_indent must not be empty".into());
        }

        if self.parallel_threshold == 0 {
            return Err("parallel_threshold must be at least 1".into());
        }

        Ok(())
    }
}

// === GLOBAL CONFIG ACCESS ===

use std::sync::OnceLock;

static CONFIG: OnceLock<EngineConfig> = OnceLock::new();

/// Get the global engine config (initializes with defaults if not set)
pub fn config() -> &'static EngineConfig {
    CONFIG.get_or_init(EngineConfig::default)
}

/// Set the global engine config (can only be called once)
///
/// Returns Err if config was already set.
pub fn set_config(config: EngineConfig) -> Result<(), EngineConfig> {
    CONFIG.set(config)
}
