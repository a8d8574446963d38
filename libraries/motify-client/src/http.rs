//! Shared HTTP plumbing.

use crate::error::{ClientError, Result};
use reqwest::{Client, Response};
use std::time::Duration;

/// Build an HTTP client with reasonable defaults.
pub(crate) fn build_client(timeout: Duration) -> Result<Client> {
    Client::builder()
        .timeout(timeout)
        .connect_timeout(Duration::from_secs(10))
        .user_agent(format!("MotiFy/{}", env!("CARGO_PKG_VERSION")))
        .build()
        .map_err(ClientError::Request)
}

/// Parse and validate an http(s) URL.
pub(crate) fn parse_http_url(raw: &str) -> Result<url::Url> {
    if raw.is_empty() {
        return Err(ClientError::InvalidUrl("URL cannot be empty".into()));
    }
    let url = url::Url::parse(raw).map_err(|e| ClientError::InvalidUrl(format!("{raw}: {e}")))?;
    match url.scheme() {
        "http" | "https" => Ok(url),
        _ => Err(ClientError::InvalidUrl(
            "URL must start with http:// or https://".into(),
        )),
    }
}

/// Map transport failures and reject non-success responses.
pub(crate) async fn send(request: reqwest::RequestBuilder) -> Result<Response> {
    let response = request.send().await.map_err(|e| {
        if e.is_connect() || e.is_timeout() {
            ClientError::ServerUnreachable(e.to_string())
        } else {
            ClientError::Request(e)
        }
    })?;

    let status = response.status();
    if status.is_success() {
        Ok(response)
    } else {
        let message = response.text().await.unwrap_or_default();
        Err(ClientError::ServerError {
            status: status.as_u16(),
            message,
        })
    }
}
