// Panic isolation for spawned checks
use futures::FutureExt;
use std::any::Any;
use std::future::Future;
use std::panic::AssertUnwindSafe;
use tracing::error;

/// Result of a panic-guarded execution
#[derive(Debug)]
pub enum PanicGuardResult<T> {
    /// Execution completed successfully
    Success(T),
    /// Execution panicked
    Panicked(String),
}

/// Drive a future to completion with panic isolation
///
/// If the future panics, the panic is caught and returned as
/// `PanicGuardResult::Panicked`, so one broken check cannot take the
/// whole run down with it.
///
/// # Example
/// ```text
/// let result = execute_guarded_async(async {
///     tokio::time::sleep(std::time::Duration::from_millis(10)).await;
///     42
/// }).await;
/// ```
pub async fn execute_guarded_async<F, T>(future: F) -> PanicGuardResult<T>
where
    F: Future<Output = T>,
{
    match AssertUnwindSafe(future).catch_unwind().await {
        Ok(value) => PanicGuardResult::Success(value),
        Err(panic_info) => {
            let panic_msg = panic_message(panic_info.as_ref());
            error!(panic_msg = %panic_msg, "Check task panicked");
            PanicGuardResult::Panicked(panic_msg)
        }
    }
}

fn panic_message(panic_info: &(dyn Any + Send)) -> String {
    if let Some(s) = panic_info.downcast_ref::<&str>() {
        s.to_string()
    } else if let Some(s) = panic_info.downcast_ref::<String>() {
        s.clone()
    } else {
        "Unknown panic".to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_guarded_success() {
        let result = execute_guarded_async(async {
            tokio::time::sleep(std::time::Duration::from_millis(1)).await;
            42
        })
        .await;

        assert!(matches!(result, PanicGuardResult::Success(42)));
    }

    #[tokio::test]
    async fn test_guarded_panic_with_str() {
        let result: PanicGuardResult<()> = execute_guarded_async(async {
            panic!("boom");
        })
        .await;

        match result {
            PanicGuardResult::Panicked(msg) => assert_eq!(msg, "boom"),
            PanicGuardResult::Success(_) => panic!("expected panic to be caught"),
        }
    }

    #[tokio::test]
    async fn test_guarded_panic_with_string() {
        let code = 7;
        let result: PanicGuardResult<()> = execute_guarded_async(async move {
            panic!("exit code {}", code);
        })
        .await;

        match result {
            PanicGuardResult::Panicked(msg) => assert_eq!(msg, "exit code 7"),
            PanicGuardResult::Success(_) => panic!("expected panic to be caught"),
        }
    }
}
