use std::future::Future;
use std::net::SocketAddr;
use std::time::Duration;

use crate::error::TraceError;

/// Runs a fallible exchange with `server`, giving up after `duration`.
///
/// # Errors
///
/// - [`TraceError::QueryTimeout`] if the deadline passes
/// - Whatever error `future` itself resolves to
pub async fn with_timeout<T>(
    duration: Duration,
    server: SocketAddr,
    future: impl Future<Output = Result<T, TraceError>>,
) -> Result<T, TraceError> {
    tokio::time::timeout(duration, future)
        .await
        .map_err(|_elapsed| TraceError::QueryTimeout {
            server,
            timeout: duration,
        })?
}
