// Application Layer - Use Cases and Orchestration

mod panic_guard;
pub mod report;
pub mod runner;

// Re-exports
pub use panic_guard::{execute_guarded_async, PanicGuardResult};
pub use report::{ReportFormatter, TapFormatter};
pub use runner::{ConcurrentRunner, RunState, RunSummary};
