//! json-server over HTTP.
//!
//! [`HttpStore`] issues blocking requests with `attohttpc`. Every request is
//! JSON in and JSON out against a single base origin.
//!
//! # Status Mapping
//!
//! | Response | Error |
//! |---|---|
//! | 404 | [`SnapshareError::NotFound`] |
//! | 409, or 500 mentioning a duplicate id on create | [`SnapshareError::Conflict`] |
//! | any other non-2xx, transport failure, bad JSON | [`SnapshareError::Network`] |

use crate::domain::error::{Result, SnapshareError};
use crate::domain::Id;
use crate::remote::backend::{Collection, RemoteStore};
use crate::remote::query::Query;
use attohttpc::{Response, StatusCode};
use serde_json::Value;
use std::time::Duration;
use url::Url;

/// Default request timeout.
const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);

/// Blocking HTTP client for a json-server origin.
#[derive(Debug, Clone)]
pub struct HttpStore {
    base_url: Url,
    timeout: Duration,
}

impl HttpStore {
    /// Creates a client for `base_url` (e.g. `http://localhost:3001`).
    ///
    /// # Errors
    ///
    /// Returns a configuration error if the URL does not parse or cannot carry
    /// path segments.
    pub fn new(base_url: &str) -> Result<Self> {
        let base_url = Url::parse(base_url)
            .map_err(|e| SnapshareError::Config(format!("invalid base URL {base_url:?}: {e}")))?;
        if base_url.cannot_be_a_base() {
            return Err(SnapshareError::Config(format!("{base_url} cannot be a base URL")));
        }
        Ok(Self {
            base_url,
            timeout: DEFAULT_TIMEOUT,
        })
    }

    #[must_use]
    pub const fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    #[must_use]
    pub const fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// Builds `<base>/<collection>[/<id>][?query]`, percent-encoding every part.
    ///
    /// ```
    /// use snapshare::remote::{Collection, HttpStore, Query};
    ///
    /// let store = HttpStore::new("http://localhost:3001").unwrap();
    /// let url = store.collection_url(
    ///     Collection::Users,
    ///     None,
    ///     &Query::new().eq("email", "a+b@example.com"),
    /// );
    /// assert_eq!(url.as_str(), "http://localhost:3001/users?email=a%2Bb%40example.com");
    /// ```
    #[must_use]
    pub fn collection_url(&self, collection: Collection, id: Option<&Id>, query: &Query) -> Url {
        let mut url = self.base_url.clone();
        if let Ok(mut segments) = url.path_segments_mut() {
            segments.pop_if_empty().push(collection.as_str());
            if let Some(id) = id {
                segments.push(id.as_str());
            }
        }
        let pairs = query.to_pairs();
        if !pairs.is_empty() {
            url.query_pairs_mut().extend_pairs(pairs);
        }
        url
    }

    fn record_url(&self, collection: Collection, id: &Id) -> Url {
        self.collection_url(collection, Some(id), &Query::new())
    }
}

impl RemoteStore for HttpStore {
    fn list(&self, collection: Collection, query: &Query) -> Result<Vec<Value>> {
        let url = self.collection_url(collection, None, query);
        let _span = tracing::debug_span!("http_list", url = %url).entered();

        let response = attohttpc::get(url.as_str())
            .header("Accept", "application/json")
            .timeout(self.timeout)
            .send()
            .map_err(transport)?;
        let records: Vec<Value> = read_json(check(response, &url)?)?;

        tracing::debug!(count = records.len(), "listed records");
        Ok(records)
    }

    fn get(&self, collection: Collection, id: &Id) -> Result<Value> {
        let url = self.record_url(collection, id);
        let _span = tracing::debug_span!("http_get", url = %url).entered();

        let response = attohttpc::get(url.as_str())
            .header("Accept", "application/json")
            .timeout(self.timeout)
            .send()
            .map_err(transport)?;
        read_json(check(response, &url)?)
    }

    fn create(&self, collection: Collection, record: &Value) -> Result<Value> {
        let url = self.collection_url(collection, None, &Query::new());
        let _span = tracing::debug_span!("http_create", url = %url).entered();

        let response = attohttpc::post(url.as_str())
            .header("Accept", "application/json")
            .timeout(self.timeout)
            .json(record)
            .map_err(transport)?
            .send()
            .map_err(transport)?;

        let status = response.status();
        if status == StatusCode::CONFLICT {
            return Err(SnapshareError::Conflict(format!("{url}: {status}")));
        }
        if status == StatusCode::INTERNAL_SERVER_ERROR {
            let body = response.text().unwrap_or_default();
            if body.to_lowercase().contains("duplicate") {
                tracing::debug!("store reported duplicate id");
                return Err(SnapshareError::Conflict(format!("{url}: duplicate id")));
            }
            return Err(SnapshareError::Network(format!("{url}: {status}")));
        }
        read_json(check(response, &url)?)
    }

    fn patch(&self, collection: Collection, id: &Id, changes: &Value) -> Result<Value> {
        let url = self.record_url(collection, id);
        let _span = tracing::debug_span!("http_patch", url = %url).entered();

        let response = attohttpc::patch(url.as_str())
            .header("Accept", "application/json")
            .timeout(self.timeout)
            .json(changes)
            .map_err(transport)?
            .send()
            .map_err(transport)?;
        read_json(check(response, &url)?)
    }

    fn delete(&self, collection: Collection, id: &Id) -> Result<()> {
        let url = self.record_url(collection, id);
        let _span = tracing::debug_span!("http_delete", url = %url).entered();

        let response = attohttpc::delete(url.as_str())
            .timeout(self.timeout)
            .send()
            .map_err(transport)?;
        check(response, &url)?;
        Ok(())
    }
}

fn transport(error: attohttpc::Error) -> SnapshareError {
    SnapshareError::Network(error.to_string())
}

fn check(response: Response, url: &Url) -> Result<Response> {
    let status = response.status();
    if status.is_success() {
        Ok(response)
    } else if status == StatusCode::NOT_FOUND {
        Err(SnapshareError::NotFound(url.path().to_string()))
    } else {
        tracing::debug!(%status, "unexpected status");
        Err(SnapshareError::Network(format!("{url}: {status}")))
    }
}

fn read_json<T: serde::de::DeserializeOwned>(response: Response) -> Result<T> {
    response
        .json()
        .map_err(|e| SnapshareError::Network(format!("invalid JSON response: {e}")))
}
