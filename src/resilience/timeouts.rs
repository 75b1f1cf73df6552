//! Timeout enforcement.
//!
//! # Responsibilities
//! - Wrap outbound calls with a deadline
//! - Cancel operations cleanly on timeout
//!
//! # Design Decisions
//! - Uses Tokio's timeout facilities; dropping the future aborts the call
//! - Timeout errors are distinct from the wrapped operation's errors

use std::future::Future;
use std::time::Duration;

use thiserror::Error;

/// Either the deadline passed or the operation failed on its own.
#[derive(Debug, Error)]
pub enum TimeoutError<E> {
    #[error("operation timed out after {}ms", .0.as_millis())]
    Elapsed(Duration),

    #[error("{0}")]
    Inner(E),
}

/// Run `fut` with a hard deadline.
pub async fn with_timeout<T, E, F>(limit: Duration, fut: F) -> Result<T, TimeoutError<E>>
where
    F: Future<Output = Result<T, E>>,
{
    match tokio::time::timeout(limit, fut).await {
        Ok(Ok(value)) => Ok(value),
        Ok(Err(e)) => Err(TimeoutError::Inner(e)),
        Err(_) => Err(TimeoutError::Elapsed(limit)),
    }
}
