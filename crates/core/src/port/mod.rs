// Port Layer - Interfaces for external dependencies

pub mod check_task;

// Re-exports
pub use check_task::CheckTask;
