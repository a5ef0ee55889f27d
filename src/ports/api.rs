//! Record source port for fetching JSON record lists.

use std::future::Future;
use std::pin::Pin;

use serde_json::Value;

use crate::error::FetchError;

/// Boxed future type alias used by [`RecordSource`] to keep the trait dyn-compatible.
pub type FetchFuture<'a> =
    Pin<Box<dyn Future<Output = Result<Vec<Value>, FetchError>> + Send + 'a>>;

/// Fetches a list of raw JSON records from an endpoint.
pub trait RecordSource: Send + Sync {
    /// Issues a GET against `url` and returns the top-level JSON array.
    ///
    /// # Errors
    ///
    /// Returns a [`FetchError`] describing why the list could not be obtained.
    fn fetch<'a>(&'a self, url: &'a str) -> FetchFuture<'a>;
}
