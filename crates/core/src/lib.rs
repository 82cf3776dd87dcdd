// Checkrun Core - Domain Logic, Ports & the concurrent runner
// NO infrastructure dependencies (ports and adapters)

pub mod application;
pub mod domain;
pub mod error;
pub mod port;

pub use error::{AppError, Result};
