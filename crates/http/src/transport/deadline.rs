//! Races an I/O future against an optional deadline.
//!
//! Cancellation is implemented by dropping the raced future when
//! `tokio::time::timeout` elapses, rather than by shutting down the socket
//! from a timer thread. The in-flight read/write simply never completes; the
//! connection is torn down by whoever owns it once the timeout error
//! propagates up.

use crate::protocol::HttpError;
use std::future::Future;
use std::time::Duration;
use tokio::time::timeout;

/// Awaits `fut`, failing with [`HttpError::Timeout`] if `duration` elapses
/// first. A `None` duration awaits `fut` with no deadline.
pub async fn with_deadline<F, T, E>(duration: Option<Duration>, operation: &'static str, fut: F) -> Result<T, HttpError>
where
    F: Future<Output = Result<T, E>>,
    HttpError: From<E>,
{
    match duration {
        None => fut.await.map_err(Into::into),
        Some(duration) => match timeout(duration, fut).await {
            Ok(result) => result.map_err(Into::into),
            Err(_) => Err(HttpError::timeout(operation)),
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::protocol::TransportError;

    #[tokio::test]
    async fn passes_through_fast_future() {
        let result: Result<u8, HttpError> = with_deadline(Some(Duration::from_millis(50)), "test", async { Ok::<u8, TransportError>(1) }).await;
        assert_eq!(result.unwrap(), 1);
    }

    #[tokio::test]
    async fn times_out_slow_future() {
        let result: Result<u8, HttpError> = with_deadline(Some(Duration::from_millis(10)), "test", async {
            tokio::time::sleep(Duration::from_secs(5)).await;
            Ok::<u8, TransportError>(1)
        })
        .await;
        assert!(matches!(result, Err(HttpError::Timeout { operation: "test" })));
    }
}
