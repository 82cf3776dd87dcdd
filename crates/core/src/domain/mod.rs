// Domain Layer - Pure data of a check run

pub mod command;
pub mod result;
pub mod spec;

// Re-exports
pub use command::CommandLine;
pub use result::CheckResult;
pub use spec::CheckSpec;
