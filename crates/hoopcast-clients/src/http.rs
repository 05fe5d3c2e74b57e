//! Shared HTTP plumbing for the vendor clients.

use std::time::Duration;

use reqwest::{Client, Response};
use tracing::warn;

use crate::error::{ClientError, ClientResult, Collaborator};

pub(crate) fn build_client(collaborator: Collaborator, timeout: Duration) -> ClientResult<Client> {
    Client::builder()
        .timeout(timeout)
        .build()
        .map_err(|e| ClientError::network(collaborator, e))
}

/// Turn a non-2xx response into [`ClientError::Api`], keeping the body text.
pub(crate) async fn ensure_success(
    collaborator: Collaborator,
    response: Response,
) -> ClientResult<Response> {
    if response.status().is_success() {
        return Ok(response);
    }

    let status = response.status();
    let body = response.text().await.unwrap_or_default();
    warn!(
        collaborator = collaborator.as_str(),
        status = status.as_u16(),
        "Upstream request failed"
    );
    Err(ClientError::Api {
        collaborator,
        status: status.as_u16(),
        body,
    })
}

/// Read a required variable, failing with a configuration error.
pub(crate) fn required_env(collaborator: Collaborator, name: &str) -> ClientResult<String> {
    std::env::var(name)
        .ok()
        .filter(|v| !v.trim().is_empty())
        .ok_or_else(|| ClientError::config(collaborator, format!("{} environment variable is not set", name)))
}

pub(crate) fn env_or(name: &str, default: &str) -> String {
    std::env::var(name).unwrap_or_else(|_| default.to_string())
}

pub(crate) fn env_secs(name: &str, default: u64) -> Duration {
    Duration::from_secs(
        std::env::var(name)
            .ok()
            .and_then(|s| s.parse().ok())
            .unwrap_or(default),
    )
}

pub(crate) fn trim_base_url(url: &str) -> String {
    url.trim_end_matches('/').to_string()
}
