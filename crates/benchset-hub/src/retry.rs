use std::future::Future;
use std::time::Duration;

use rand::Rng;

/// Execute an async operation with exponential backoff and jitter.
///
/// Only errors accepted by `retryable` are retried, up to `max_retries` times,
/// with delays of 200ms, 400ms, 800ms... plus up to 100ms of jitter.
pub async fn with_retry<F, Fut, T, E, P>(max_retries: u32, retryable: P, f: F) -> Result<T, E>
where
    F: Fn() -> Fut,
    Fut: Future<Output = Result<T, E>>,
    P: Fn(&E) -> bool,
{
    let mut retries = 0;
    loop {
        match f().await {
            Ok(v) => return Ok(v),
            Err(e) if retries < max_retries && retryable(&e) => {
                retries += 1;
                let base_ms = 200u64 * (1u64 << (retries - 1));
                let jitter_ms = rand::thread_rng().gen_range(0..100u64);
                tracing::debug!(attempt = retries, delay_ms = base_ms + jitter_ms, "retrying");
                tokio::time::sleep(Duration::from_millis(base_ms + jitter_ms)).await;
            }
            Err(e) => return Err(e),
        }
    }
}
