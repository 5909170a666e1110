use crate::Generation;
use anyhow::{Context, Result};
use serde::de::DeserializeOwned;
use tracing::warn;

/// Turns a provider HTTP response into a [`Generation`].
///
/// Non-2xx statuses become `Generation::Failure` carrying the raw body.
/// A 2xx body is decoded as `T` and handed to `extract`; decoding or
/// extraction failures are errors, not failures.
pub(crate) async fn into_generation<T, F>(
    provider: &str,
    response: reqwest::Response,
    extract: F,
) -> Result<Generation>
where
    T: DeserializeOwned,
    F: FnOnce(T) -> Result<String>,
{
    let status = response.status();

    if !status.is_success() {
        let error = response
            .text()
            .await
            .with_context(|| format!("Failed to read {} error body", provider))?;
        warn!(provider, status = status.as_u16(), "LLM API returned an error");
        return Ok(Generation::Failure {
            status: status.as_u16(),
            error,
        });
    }

    let body: T = response
        .json()
        .await
        .with_context(|| format!("Failed to parse {} API response", provider))?;

    Ok(Generation::Success {
        text: extract(body)?,
    })
}

/// Joins a base URL and an API path without doubling the slash.
pub(crate) fn endpoint(base_url: &str, path: &str) -> String {
    format!("{}{}", base_url.trim_end_matches('/'), path)
}
