// Checkrun Infrastructure - Agent Configuration
// Loads `[plugin.checks.<name>]` tables into CheckSpecs

pub mod agent_config;
pub mod error;

pub use agent_config::{load_check_specs, parse_check_specs};
pub use error::ConfigError;
