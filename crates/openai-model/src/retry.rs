use std::time::Duration;

use backoff::ExponentialBackoffBuilder;
use reloop_model::ModelProviderError;

use crate::Error;

const MAX_RETRY_INTERVAL: Duration = Duration::from_secs(30);

/// Runs `op`, retrying transient failures up to `max_retries` times with
/// exponential backoff.
///
/// Non-transient errors and the error of the last attempt are returned as
/// they are.
pub async fn with_retry<T, F, Fut>(
    max_retries: u32,
    initial_interval: Duration,
    mut op: F,
) -> Result<T, Error>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = Result<T, Error>>,
{
    if max_retries == 0 {
        return op().await;
    }

    let policy = ExponentialBackoffBuilder::new()
        .with_initial_interval(initial_interval)
        .with_max_interval(MAX_RETRY_INTERVAL.max(initial_interval))
        .with_max_elapsed_time(None)
        .build();

    let mut attempts = 0;
    backoff::future::retry(policy, || {
        attempts += 1;
        let retries_left = attempts <= max_retries;
        let fut = op();
        async move {
            fut.await.map_err(|err| {
                if retries_left && err.kind().is_transient() {
                    warn!("transient error, retrying: {err}");
                    backoff::Error::transient(err)
                } else {
                    backoff::Error::permanent(err)
                }
            })
        }
    })
    .await
}
