// Command line of a check: what gets executed

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::application::report::yaml;

/// What to run for a check
///
/// Deserializes from either a string (`Shell`) or an array of strings
/// (`Args`), matching the two shapes allowed in the agent configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum CommandLine {
    /// Literal command line, run through the platform shell
    Shell(String),
    /// Argument vector; the first element is the program
    Args(Vec<String>),
}

impl CommandLine {
    pub fn shell(command: impl Into<String>) -> Self {
        Self::Shell(command.into())
    }

    pub fn args<I, S>(args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self::Args(args.into_iter().map(Into::into).collect())
    }

    /// True when there is nothing to execute
    pub fn is_empty(&self) -> bool {
        match self {
            Self::Shell(command) => command.trim().is_empty(),
            Self::Args(args) => args.first().map_or(true, |program| program.is_empty()),
        }
    }

    /// True when the rendered text is a flow sequence rather than a scalar
    pub fn renders_as_list(&self) -> bool {
        match self {
            Self::Shell(command) => command.is_empty(),
            Self::Args(_) => true,
        }
    }
}

impl Default for CommandLine {
    fn default() -> Self {
        Self::Args(Vec::new())
    }
}

impl fmt::Display for CommandLine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Shell(command) if !command.is_empty() => f.write_str(command),
            Self::Shell(_) => f.write_str("[]"),
            Self::Args(args) => f.write_str(&yaml::flow_sequence(args.as_slice())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_shell_renders_verbatim() {
        let command = CommandLine::shell("perl -E \"say 'Hello'\"");
        assert_eq!(command.to_string(), "perl -E \"say 'Hello'\"");
        assert!(!command.renders_as_list());
    }

    #[test]
    fn test_args_render_as_flow_sequence() {
        let command = CommandLine::args(["perl", "-E", "say 'Hello'"]);
        assert_eq!(command.to_string(), "[perl, -E, say 'Hello']");
        assert!(command.renders_as_list());
    }

    #[test]
    fn test_args_quote_ambiguous_items() {
        let command = CommandLine::args(["check-log", "--pattern", "a, b", ""]);
        assert_eq!(command.to_string(), "[check-log, --pattern, \"a, b\", '']");
    }

    #[test]
    fn test_missing_command_renders_empty_list() {
        assert_eq!(CommandLine::default().to_string(), "[]");
        assert_eq!(CommandLine::shell("").to_string(), "[]");
        assert!(CommandLine::default().is_empty());
        assert!(CommandLine::shell("   ").is_empty());
        assert!(!CommandLine::args(["true"]).is_empty());
    }

    #[test]
    fn test_deserialize_both_shapes() {
        let shell: CommandLine = serde_json::from_str("\"echo hi\"").unwrap();
        assert_eq!(shell, CommandLine::shell("echo hi"));

        let args: CommandLine = serde_json::from_str("[\"echo\", \"hi\"]").unwrap();
        assert_eq!(args, CommandLine::args(["echo", "hi"]));
    }
}
