// Checkrun Infrastructure - System Adapters
// Implements: CheckTask backed by external processes

pub mod command_check_task;

pub use command_check_task::CommandCheckTask;
