// Agent configuration file - check plugin definitions
//
// ```toml
// [plugin.checks.ssh]
// command = ["check-procs", "--pattern", "sshd"]
// memo = "sshd must be running"
//
// [plugin.checks.disk]
// command = "check-disk --warning 80"
// ```

use std::collections::BTreeMap;
use std::path::Path;

use serde::Deserialize;
use tracing::{debug, info};

use checkrun_core::domain::{CheckSpec, CommandLine};

use crate::error::{ConfigError, Result};

#[derive(Debug, Default, Deserialize)]
struct AgentConfig {
    #[serde(default)]
    plugin: PluginSection,
}

/// Everything under `[plugin]`; metric plugins and the like are ignored
#[derive(Debug, Default, Deserialize)]
struct PluginSection {
    #[serde(default)]
    checks: BTreeMap<String, CheckPluginConfig>,
}

#[derive(Debug, Deserialize)]
struct CheckPluginConfig {
    /// String runs through the shell, array runs directly
    #[serde(default)]
    command: Option<CommandLine>,
    #[serde(default)]
    memo: String,
    #[serde(default)]
    env: BTreeMap<String, String>,
}

impl CheckPluginConfig {
    fn into_spec(self, name: String) -> CheckSpec {
        CheckSpec {
            name,
            memo: self.memo,
            command: self.command.unwrap_or_default(),
            env: self.env,
        }
    }
}

/// Load check definitions from an agent configuration file
///
/// The file is TOML regardless of its extension. Checks come back sorted by
/// name, with names and env keys exactly as written.
///
/// # Errors
/// - ConfigError::NotFound if `path` does not exist
/// - ConfigError::Read if the file cannot be read
/// - ConfigError::Parse if the file is not valid TOML
pub fn load_check_specs(path: &Path) -> Result<Vec<CheckSpec>> {
    if !path.exists() {
        return Err(ConfigError::NotFound(path.display().to_string()));
    }

    info!(path = %path.display(), "Loading agent configuration");
    let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
        path: path.display().to_string(),
        source,
    })?;
    parse_check_specs(&text)
}

/// Parse check definitions from TOML text
pub fn parse_check_specs(text: &str) -> Result<Vec<CheckSpec>> {
    let agent: AgentConfig = toml::from_str(text)?;

    let specs: Vec<CheckSpec> = agent
        .plugin
        .checks
        .into_iter()
        .map(|(name, plugin)| plugin.into_spec(name))
        .collect();

    debug!(checks = specs.len(), "Check plugins loaded");
    Ok(specs)
}
