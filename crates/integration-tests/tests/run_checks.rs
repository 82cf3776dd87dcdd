// End-to-end: agent configuration -> CommandCheckTask -> TAP report
#![cfg(unix)]

use std::io::Write;
use std::sync::Arc;

use checkrun_core::application::{ConcurrentRunner, RunSummary, TapFormatter};
use checkrun_core::domain::{CheckSpec, CommandLine};
use checkrun_core::port::CheckTask;
use checkrun_infra_config::load_check_specs;
use checkrun_infra_system::CommandCheckTask;

fn command_tasks(specs: Vec<CheckSpec>) -> Vec<Arc<dyn CheckTask>> {
    specs
        .into_iter()
        .map(|spec| Arc::new(CommandCheckTask::new(spec)) as Arc<dyn CheckTask>)
        .collect()
}

async fn run(specs: Vec<CheckSpec>) -> (RunSummary, String) {
    let mut buf = Vec::new();
    let summary = ConcurrentRunner::new(TapFormatter::new())
        .run(command_tasks(specs), &mut buf)
        .await
        .expect("report should be written");
    (summary, String::from_utf8(buf).unwrap())
}

/// Split a report into (status line, block lines) per record
fn records(report: &str) -> Vec<(String, Vec<String>)> {
    let mut records: Vec<(String, Vec<String>)> = Vec::new();
    for line in report.lines().skip(2) {
        if line.starts_with("ok ") || line.starts_with("not ok ") {
            records.push((line.to_string(), Vec::new()));
        } else if let Some((_, block)) = records.last_mut() {
            block.push(line.to_string());
        }
    }
    records
}

fn record_for<'a>(records: &'a [(String, Vec<String>)], name: &str) -> &'a (String, Vec<String>) {
    let suffix = format!(" - {}", name);
    records
        .iter()
        .find(|(status, _)| status.ends_with(&suffix))
        .unwrap_or_else(|| panic!("no record for {}", name))
}

#[tokio::test]
async fn test_single_real_command_report() {
    let spec = CheckSpec::new("hoge", CommandLine::args(["echo", "Hello"]));

    let (summary, report) = run(vec![spec]).await;

    let expect = "TAP version 13
1..1
ok 1 - hoge
  ---
  command: [echo, Hello]
  stdout: Hello
  ...
";
    assert_eq!(report, expect);
    assert!(summary.all_passed());
}

#[tokio::test]
async fn test_config_to_report() {
    let mut conf = tempfile::Builder::new().suffix(".conf").tempfile().unwrap();
    write!(
        conf,
        r#"
[plugin.checks.healthy]
command = ["echo", "fine"]
memo = "always passes"

[plugin.checks.warning]
command = "echo low disk >&2; exit 1"

[plugin.checks.missing]
command = ["checkrun-integration-no-such-binary"]

[plugin.checks.empty]
memo = "nothing to run"
"#
    )
    .unwrap();

    let specs = load_check_specs(conf.path()).unwrap();
    let (summary, report) = run(specs).await;

    assert!(report.starts_with("TAP version 13\n1..4\n"));
    assert_eq!(summary.total, 4);
    assert_eq!(summary.passed, 1);
    assert_eq!(summary.failed, 3);

    let records = records(&report);
    assert_eq!(records.len(), 4);

    let (status, block) = record_for(&records, "healthy");
    assert!(status.starts_with("ok "));
    assert_eq!(
        block,
        &[
            "  ---",
            "  memo: always passes",
            "  command: [echo, fine]",
            "  stdout: fine",
            "  ...",
        ]
    );

    let (status, block) = record_for(&records, "warning");
    assert!(status.starts_with("not ok "));
    assert_eq!(
        block,
        &[
            "  ---",
            "  command: echo low disk >&2; exit 1",
            "  stderr: low disk",
            "  exitCode: 1",
            "  ...",
        ]
    );

    let (status, block) = record_for(&records, "missing");
    assert!(status.starts_with("not ok "));
    assert!(block.contains(&"  command: [checkrun-integration-no-such-binary]".to_string()));
    assert!(block.iter().any(|line| line.starts_with("  error: ")));
    assert!(!block.iter().any(|line| line.starts_with("  exitCode: ")));

    let (status, block) = record_for(&records, "empty");
    assert!(status.starts_with("not ok "));
    assert!(block.contains(&"  command: []".to_string()));
    assert!(block.contains(&"  error: command is empty".to_string()));
}

#[tokio::test]
async fn test_config_names_and_env_keep_their_case() {
    let mut conf = tempfile::Builder::new().suffix(".conf").tempfile().unwrap();
    write!(
        conf,
        r#"
[plugin.checks.Disk_Usage]
command = "printf %s \"$CHECKRUN_LABEL\""
env = {{ CHECKRUN_LABEL = "Root" }}
"#
    )
    .unwrap();

    let specs = load_check_specs(conf.path()).unwrap();
    let (summary, report) = run(specs).await;

    assert!(summary.all_passed());
    let records = records(&report);
    let (status, block) = record_for(&records, "Disk_Usage");
    assert_eq!(status, "ok 1 - Disk_Usage");
    assert!(block.contains(&"  stdout: Root".to_string()));
}

#[tokio::test]
async fn test_failure_does_not_hide_later_success() {
    let failing = CheckSpec::new("fails-fast", CommandLine::shell("exit 2"));
    let later = CheckSpec::new("passes-late", CommandLine::shell("sleep 0.3; echo done"));

    let (summary, report) = run(vec![failing, later]).await;

    let records = records(&report);
    assert_eq!(records[0].0, "not ok 1 - fails-fast");
    assert_eq!(records[1].0, "ok 2 - passes-late");
    assert!(records[1].1.contains(&"  stdout: done".to_string()));
    assert_eq!(summary.failed, 1);
}
