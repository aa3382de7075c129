use anyhow::Error;
use reqwest::Response;
use std::future::Future;
use std::time::Duration;
use tracing::debug;

/// Sends a request, retrying on transport errors and 5xx responses
///
/// # Parameters
/// - `send`: Closure issuing the request
/// - `retries`: Number of retry attempts (total runs = 1 initial + retries)
/// - `delay_ms`: Milliseconds between retry attempts
///
/// # Returns
/// The first non-5xx response, the last response once retries run out, or the
/// transport error of the final attempt
pub async fn send_with_retry<F, Fut>(
    mut send: F,
    retries: usize,
    delay_ms: u64,
) -> Result<Response, Error>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = Result<Response, reqwest::Error>>,
{
    let mut attempt = 1;
    loop {
        let outcome = send().await;
        let retryable = match &outcome {
            Ok(response) => response.status().is_server_error(),
            Err(_) => true,
        };
        if !retryable || attempt > retries {
            return outcome.map_err(Error::from);
        }

        match &outcome {
            Ok(response) => debug!(
                "Attempt {}/{} returned {}. Retrying...",
                attempt,
                retries,
                response.status()
            ),
            Err(err) => debug!("Attempt {}/{} failed: {}. Retrying...", attempt, retries, err),
        }
        attempt += 1;
        tokio::time::sleep(Duration::from_millis(delay_ms)).await;
    }
}
