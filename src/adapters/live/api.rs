//! Live adapter for the `RecordSource` port using `reqwest`.

use reqwest::{Client, StatusCode};
use serde_json::Value;

use crate::error::FetchError;
use crate::ports::api::{FetchFuture, RecordSource};

/// Live record source that issues real HTTP GET requests.
pub struct LiveRecordSource {
    client: Client,
}

impl LiveRecordSource {
    /// Creates a new live record source with a default client.
    #[must_use]
    pub fn new() -> Self {
        Self { client: Client::new() }
    }

    /// Creates a live record source using a preconfigured client.
    #[must_use]
    pub fn with_client(client: Client) -> Self {
        Self { client }
    }
}

impl Default for LiveRecordSource {
    fn default() -> Self {
        Self::new()
    }
}

impl RecordSource for LiveRecordSource {
    fn fetch<'a>(&'a self, url: &'a str) -> FetchFuture<'a> {
        Box::pin(async move {
            tracing::debug!(url, "fetching records");

            let response =
                self.client.get(url).send().await.map_err(|e| classify_transport(url, &e))?;

            let status = response.status();
            if status != StatusCode::OK {
                return Err(FetchError::HttpStatus { status: status.as_u16() });
            }

            let body = response.text().await.map_err(|e| classify_transport(url, &e))?;
            let value: Value = serde_json::from_str(&body)
                .map_err(|e| FetchError::Decode { url: url.to_string(), cause: e.to_string() })?;

            match value {
                Value::Array(records) => {
                    tracing::debug!(url, count = records.len(), "fetched records");
                    Ok(records)
                }
                other => Err(FetchError::Decode {
                    url: url.to_string(),
                    cause: format!("expected a JSON array, got {}", json_kind(&other)),
                }),
            }
        })
    }
}

/// Maps a transport error onto the fetch taxonomy.
fn classify_transport(url: &str, err: &reqwest::Error) -> FetchError {
    if err.is_connect() || err.is_timeout() {
        FetchError::network(err)
    } else {
        FetchError::Other { url: url.to_string(), cause: err.to_string() }
    }
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}
