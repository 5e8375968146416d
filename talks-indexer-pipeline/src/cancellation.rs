//! Racing gateway calls against a cancellation token.

use std::future::Future;

use tokio_util::sync::CancellationToken;

use crate::errors::ReindexError;

/// Run `future` unless `cancel` fires first.
///
/// The token is polled first, so an already cancelled token never starts the
/// call. On cancellation the in-flight future is dropped.
pub(crate) async fn until_cancelled<F>(
    cancel: &CancellationToken,
    future: F,
) -> Result<F::Output, ReindexError>
where
    F: Future,
{
    tokio::select! {
        biased;
        _ = cancel.cancelled() => Err(ReindexError::Cancelled),
        output = future => Ok(output),
    }
}
