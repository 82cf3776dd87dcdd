// Check Task Port
// Abstraction for anything that can produce a CheckResult (subprocess or in-process)

use crate::domain::{CheckResult, CommandLine};
use async_trait::async_trait;

/// Check Task trait
///
/// Implementations:
/// - CommandCheckTask: spawns an external command (infra-system)
/// - in-process checks (future)
///
/// `check` never fails: launch errors, non-zero exits and the like are
/// recorded in the returned [`CheckResult`].
#[async_trait]
pub trait CheckTask: Send + Sync {
    /// Name of the check, unique within a run
    fn name(&self) -> &str;

    /// Execute the check once and report its outcome
    async fn check(&self) -> CheckResult;

    /// Failing result for a check that never produced an exit status
    ///
    /// Used by the runner when `check` panics. Implementations that know
    /// their memo and command should report them here.
    fn aborted(&self, error: String) -> CheckResult {
        CheckResult::aborted(self.name(), "", CommandLine::default(), error)
    }
}

// ============================================================================
// Mock Implementations for Testing
// ============================================================================

pub mod mocks {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;
    use std::time::Duration;
    use tokio::sync::Notify;

    /// Mock check behavior
    #[derive(Debug, Clone)]
    pub enum MockBehavior {
        /// Return a fixed result
        Return(CheckResult),
        /// Panic with message (for panic isolation testing)
        Panic(String),
    }

    /// Mock Check Task for testing
    pub struct MockCheckTask {
        name: String,
        memo: String,
        command: CommandLine,
        behavior: MockBehavior,
        delay: Duration,
        gate: Option<Arc<Notify>>,
        call_count: AtomicUsize,
    }

    impl MockCheckTask {
        pub fn new(name: impl Into<String>, behavior: MockBehavior) -> Self {
            Self {
                name: name.into(),
                memo: String::new(),
                command: CommandLine::args(["mock"]),
                behavior,
                delay: Duration::ZERO,
                gate: None,
                call_count: AtomicUsize::new(0),
            }
        }

        /// Exits 0 with "mock output" on stdout
        pub fn new_success(name: impl Into<String>) -> Self {
            let name = name.into();
            let result = CheckResult::exited(&name, "", CommandLine::args(["mock"]), 0)
                .with_output("mock output", "");
            Self::new(name, MockBehavior::Return(result))
        }

        /// Exits with `exit_code` and "mock failure" on stderr
        pub fn new_fail(name: impl Into<String>, exit_code: i32) -> Self {
            let name = name.into();
            let result = CheckResult::exited(&name, "", CommandLine::args(["mock"]), exit_code)
                .with_output("", "mock failure");
            Self::new(name, MockBehavior::Return(result))
        }

        pub fn new_panic_inducing(name: impl Into<String>, message: impl Into<String>) -> Self {
            Self::new(name, MockBehavior::Panic(message.into()))
        }

        /// Memo reported when the check aborts
        pub fn with_memo(mut self, memo: impl Into<String>) -> Self {
            self.memo = memo.into();
            self
        }

        /// Sleep before returning
        pub fn with_delay(mut self, delay: Duration) -> Self {
            self.delay = delay;
            self
        }

        /// Block until the given notify fires
        pub fn with_gate(mut self, gate: Arc<Notify>) -> Self {
            self.gate = Some(gate);
            self
        }

        pub fn call_count(&self) -> usize {
            self.call_count.load(Ordering::SeqCst)
        }
    }

    #[async_trait]
    impl CheckTask for MockCheckTask {
        fn name(&self) -> &str {
            &self.name
        }

        async fn check(&self) -> CheckResult {
            self.call_count.fetch_add(1, Ordering::SeqCst);

            if let Some(gate) = &self.gate {
                gate.notified().await;
            }
            if !self.delay.is_zero() {
                tokio::time::sleep(self.delay).await;
            }

            match &self.behavior {
                MockBehavior::Return(result) => result.clone(),
                MockBehavior::Panic(msg) => {
                    panic!("{}", msg); // Actually panic for panic isolation testing
                }
            }
        }

        fn aborted(&self, error: String) -> CheckResult {
            CheckResult::aborted(&self.name, &self.memo, self.command.clone(), error)
        }
    }
}
