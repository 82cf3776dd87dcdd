// Concurrent Runner - fans checks out, funnels results into the report

use std::sync::Arc;

use tokio::io::{AsyncWrite, AsyncWriteExt};
use tokio::sync::mpsc;
use tracing::{debug, info, warn};

use super::panic_guard::{execute_guarded_async, PanicGuardResult};
use super::report::ReportFormatter;
use crate::domain::CheckResult;
use crate::error::Result;
use crate::port::CheckTask;

/// Lifecycle of a single run
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunState {
    NotStarted,
    HeaderEmitted,
    Running { emitted: usize },
    AllEmitted,
}

/// Counts reported by a finished run
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RunSummary {
    pub total: usize,
    pub passed: usize,
    pub failed: usize,
}

impl RunSummary {
    pub fn all_passed(&self) -> bool {
        self.failed == 0
    }
}

/// Runs every check at once and streams one record per result
///
/// A runner is single-use: [`ConcurrentRunner::run`] consumes it.
pub struct ConcurrentRunner<F: ReportFormatter> {
    formatter: F,
    state: RunState,
}

impl<F: ReportFormatter> ConcurrentRunner<F> {
    pub fn new(formatter: F) -> Self {
        Self {
            formatter,
            state: RunState::NotStarted,
        }
    }

    /// Run all `tasks` concurrently and write the report to `sink`
    ///
    /// Records are numbered in the order results arrive. Failing checks are
    /// report data; the returned error only covers writing to the sink.
    /// There is no timeout: a check that never finishes stalls the run.
    pub async fn run<W>(mut self, tasks: Vec<Arc<dyn CheckTask>>, sink: &mut W) -> Result<RunSummary>
    where
        W: AsyncWrite + Unpin + ?Sized,
    {
        let total = tasks.len();
        info!(total = total, "Starting check run");

        // Plan goes out before anything can complete
        self.emit(sink, &self.formatter.header(total)).await?;
        self.transition(RunState::HeaderEmitted);

        let mut completions = spawn_checks(tasks);
        let mut summary = RunSummary {
            total,
            ..Default::default()
        };

        while let Some(result) = completions.recv().await {
            let seq = summary.passed + summary.failed + 1;
            if result.is_failing() {
                summary.failed += 1;
            } else {
                summary.passed += 1;
            }

            debug!(
                seq = seq,
                name = %result.name(),
                failing = result.is_failing(),
                "Check result received"
            );

            let record = self.formatter.record(seq, &result);
            self.emit(sink, &record).await?;
            self.transition(RunState::Running { emitted: seq });
        }

        if summary.passed + summary.failed != total {
            warn!(
                total = total,
                emitted = summary.passed + summary.failed,
                "Result funnel closed before every check reported"
            );
        }
        self.transition(RunState::AllEmitted);

        info!(
            total = summary.total,
            passed = summary.passed,
            failed = summary.failed,
            "Check run completed"
        );

        Ok(summary)
    }

    /// Write one complete chunk and flush so consumers see it immediately
    async fn emit<W>(&self, sink: &mut W, chunk: &str) -> Result<()>
    where
        W: AsyncWrite + Unpin + ?Sized,
    {
        sink.write_all(chunk.as_bytes()).await?;
        sink.flush().await?;
        Ok(())
    }

    fn transition(&mut self, next: RunState) {
        debug_assert!(
            matches!(
                (self.state, next),
                (RunState::NotStarted, RunState::HeaderEmitted)
                    | (RunState::HeaderEmitted, RunState::Running { emitted: 1 })
                    | (RunState::HeaderEmitted, RunState::AllEmitted)
                    | (RunState::Running { .. }, RunState::Running { .. })
                    | (RunState::Running { .. }, RunState::AllEmitted)
            ),
            "invalid run state transition: {:?} -> {:?}",
            self.state,
            next
        );
        debug!(from = ?self.state, to = ?next, "Run state transition");
        self.state = next;
    }
}

/// Spawn one tokio task per check; results arrive on the returned receiver
///
/// The channel closes once every spawned task has dropped its sender, which
/// is the join point of the run.
fn spawn_checks(tasks: Vec<Arc<dyn CheckTask>>) -> mpsc::UnboundedReceiver<CheckResult> {
    let (tx, rx) = mpsc::unbounded_channel();

    for task in tasks {
        let tx = tx.clone();
        tokio::spawn(async move {
            let result = match execute_guarded_async(task.check()).await {
                PanicGuardResult::Success(result) => result,
                PanicGuardResult::Panicked(msg) => task.aborted(format!("check panicked: {}", msg)),
            };

            // Send only fails when the runner gave up on a broken sink
            if tx.send(result).is_err() {
                debug!(name = %task.name(), "Runner stopped listening, dropping result");
            }
        });
    }

    rx
}
