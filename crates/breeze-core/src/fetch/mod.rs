//! Thin clients for the public HTTP services.
//!
//! Every fetcher performs a single request with a per-request timeout. No
//! retries. Failures come back as a [`FetchError`] so callers can tell a bad
//! status from a broken body or a dead network.

pub mod advice;
pub mod chat;
pub mod joke;
pub mod weather;

use std::time::Duration;

use anyhow::{Context, Result};
use reqwest::{Client, StatusCode};
use serde_json::Value;
use thiserror::Error;

pub use advice::AdviceClient;
pub use chat::{ChatClient, ChatReply};
pub use joke::JokeClient;
pub use weather::{CurrentConditions, DaySummary, WeatherClient};

const USER_AGENT: &str = concat!("breeze/", env!("CARGO_PKG_VERSION"));

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FetchError {
    /// The service answered with something other than 200 OK.
    #[error("HTTP {status}")]
    Status { status: u16, body: String },
    /// The body was not JSON or had an unexpected shape.
    #[error("malformed response: {0}")]
    Malformed(String),
    /// Valid JSON that carries no data for the request.
    #[error("no data in response")]
    NoData,
    /// Connect, timeout or transport failure.
    #[error("network error: {0}")]
    Network(String),
}

impl From<reqwest::Error> for FetchError {
    fn from(e: reqwest::Error) -> Self {
        if e.is_decode() {
            FetchError::Malformed(e.to_string())
        } else {
            FetchError::Network(e.to_string())
        }
    }
}

pub type FetchResult<T> = std::result::Result<T, FetchError>;

/// Build the HTTP client shared by all fetchers.
pub fn http_client() -> Result<Client> {
    Client::builder()
        .user_agent(USER_AGENT)
        .build()
        .context("failed to build HTTP client")
}

/// GET `url` and parse the body as JSON. Anything but 200 is an error.
pub(crate) async fn get_json(
    client: &Client,
    url: &str,
    query: &[(&str, &str)],
    timeout: Duration,
) -> FetchResult<Value> {
    let resp = client.get(url).query(query).timeout(timeout).send().await?;
    let status = resp.status();
    if status != StatusCode::OK {
        let body = resp.text().await.unwrap_or_default();
        tracing::debug!("GET {url} failed ({status}): {body}");
        return Err(FetchError::Status {
            status: status.as_u16(),
            body,
        });
    }
    let text = resp.text().await?;
    serde_json::from_str(&text).map_err(|e| FetchError::Malformed(e.to_string()))
}

/// JSON that counts as "nothing": null, false, zero, or an empty string,
/// array or object.
pub(crate) fn is_blank(value: &Value) -> bool {
    match value {
        Value::Null => true,
        Value::Bool(b) => !b,
        Value::Number(n) => n.as_f64() == Some(0.0),
        Value::String(s) => s.is_empty(),
        Value::Array(a) => a.is_empty(),
        Value::Object(o) => o.is_empty(),
    }
}

/// Read `key` from a JSON object as text, accepting strings or numbers.
pub(crate) fn text_field(value: &Value, key: &str) -> Option<String> {
    match value.get(key)? {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    }
}

/// First `value` of a wttr-style `[{"value": ...}]` description list.
pub(crate) fn first_description(value: &Value, key: &str) -> Option<String> {
    value
        .get(key)?
        .as_array()?
        .first()?
        .get("value")?
        .as_str()
        .map(String::from)
}
