//! Retry policy for oEmbed lookups.

use std::future::Future;

use tracing::warn;

use crate::error::ResolveError;

/// Extra attempts after the first when a lookup fails transiently.
/// Attempts follow each other immediately, without backoff.
pub const MAX_RETRIES: u32 = 3;

/// Run `attempt` until it succeeds, fails permanently, or the transient
/// retry budget is spent. Returns the last outcome.
pub(crate) async fn with_retries<T, F, Fut>(url: &str, mut attempt: F) -> Result<T, ResolveError>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = Result<T, ResolveError>>,
{
    let mut retries = 0;
    loop {
        match attempt().await {
            Err(e) if e.is_transient() && retries < MAX_RETRIES => {
                retries += 1;
                warn!(%url, retry = retries, error = %e, "transient lookup failure, retrying");
            }
            outcome => return outcome,
        }
    }
}
