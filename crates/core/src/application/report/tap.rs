// TAP version 13 report with YAML diagnostic blocks

use super::yaml;
use super::ReportFormatter;
use crate::domain::CheckResult;

/// Protocol version announced in the header
pub const TAP_VERSION: u32 = 13;

/// Indentation of the diagnostic block
const MARGIN: &str = "  ";

const BLOCK_OPEN: &str = "---";
const BLOCK_CLOSE: &str = "...";

/// TAP formatter
///
/// ```text
/// TAP version 13
/// 1..1
/// ok 1 - hoge
///   ---
///   command: [perl, -E, say 'Hello']
///   stdout: Hello
///   ...
/// ```
#[derive(Debug, Clone, Copy, Default)]
pub struct TapFormatter;

impl TapFormatter {
    pub fn new() -> Self {
        Self
    }
}

impl ReportFormatter for TapFormatter {
    fn header(&self, total: usize) -> String {
        format!("TAP version {}\n1..{}\n", TAP_VERSION, total)
    }

    fn record(&self, seq: usize, result: &CheckResult) -> String {
        let status = if result.is_failing() { "not ok" } else { "ok" };
        // A line break in the name would end the status line early
        let name = result.name().replace(['\r', '\n'], " ");

        let mut out = format!("{} {} - {}\n{}{}\n", status, seq, name, MARGIN, BLOCK_OPEN);

        if !result.memo().is_empty() {
            push_scalar(&mut out, "memo", result.memo());
        }

        let command = result.command();
        if command.renders_as_list() {
            push_raw(&mut out, "command", &command.to_string());
        } else {
            push_scalar(&mut out, "command", &command.to_string());
        }

        if !result.stdout().is_empty() {
            push_scalar(&mut out, "stdout", result.stdout());
        }
        if !result.stderr().is_empty() {
            push_scalar(&mut out, "stderr", result.stderr());
        }
        if let Some(code) = result.exit_code().filter(|code| *code != 0) {
            push_raw(&mut out, "exitCode", &code.to_string());
        }
        if !result.error_message().is_empty() {
            push_scalar(&mut out, "error", result.error_message());
        }

        out.push_str(MARGIN);
        out.push_str(BLOCK_CLOSE);
        out.push('\n');
        out
    }
}

/// `key: value` with a value that is already valid YAML
fn push_raw(out: &mut String, key: &str, value: &str) {
    out.push_str(&format!("{}{}: {}\n", MARGIN, key, value));
}

/// `key: value` with the value rendered as a YAML string
fn push_scalar(out: &mut String, key: &str, value: &str) {
    out.push_str(&yaml::field(MARGIN, key, value));
}
