// Check Spec - input boundary from configuration loading

use std::collections::BTreeMap;

use super::command::CommandLine;

/// Definition of one check as supplied by configuration
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CheckSpec {
    /// Unique within a run
    pub name: String,
    pub memo: String,
    pub command: CommandLine,
    /// Extra environment variables for the child process
    pub env: BTreeMap<String, String>,
}

impl CheckSpec {
    pub fn new(name: impl Into<String>, command: CommandLine) -> Self {
        Self {
            name: name.into(),
            command,
            ..Default::default()
        }
    }

    pub fn with_memo(mut self, memo: impl Into<String>) -> Self {
        self.memo = memo.into();
        self
    }

    pub fn with_env(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.env.insert(key.into(), value.into());
        self
    }
}
