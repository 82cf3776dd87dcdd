// Central Error Type for the Application

use thiserror::Error;

/// Application-level error type
///
/// Only orchestration faults end up here. Check failures are reported as
/// data inside [`CheckResult`](crate::domain::CheckResult).
#[derive(Error, Debug)]
pub enum AppError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type alias using AppError
pub type Result<T> = std::result::Result<T, AppError>;
