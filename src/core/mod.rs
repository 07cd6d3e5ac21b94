pub mod config;
pub mod error;
pub mod types;

pub use config::{config, set_config, EngineConfig};
pub use error::{PrereqError, Result};
pub use types::{parse_tech_level, RowId};
