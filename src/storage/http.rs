//! HTTP storage - resources in an object store served over HTTP(S).
//!
//! Probing issues a `HEAD` request; bytes are streamed with `GET` only
//! when the caller reads the resource. Object stores have no directories,
//! so listing is unsupported.

use std::io::{self, Read};
use std::time::Duration;

use reqwest::blocking::Client;
use reqwest::StatusCode;
use url::Url;

use crate::core::{Location, LocationKind, Resource, ResourceHandle};
use crate::storage::{Lookup, Storage, StorageError};
use crate::util::path_safety::is_within;

/// Default request timeout.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// Storage for `http://` and `https://` locations.
#[derive(Debug, Clone)]
pub struct HttpStorage {
    client: Client,
}

impl HttpStorage {
    /// Create an HTTP storage with the given request timeout.
    pub fn new(timeout: Duration) -> Result<Self, StorageError> {
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| StorageError::Http {
                url: String::new(),
                message: format!("failed to build HTTP client: {}", e),
            })?;
        Ok(HttpStorage { client })
    }
}

/// Join a candidate onto a base URL.
///
/// Returns `None` when the joined URL is not on the base's host or not
/// below its path. `Url::join` reads `\\host` and `//host` as a new
/// authority, so no request may be sent for such a candidate.
pub fn candidate_url(base: &Url, candidate: &str) -> Option<Url> {
    let joined = base.join(candidate.trim_start_matches('/')).ok()?;
    is_within(base, &joined).then_some(joined)
}

impl Storage for HttpStorage {
    fn name(&self) -> &str {
        "http"
    }

    fn schemes(&self) -> &'static [&'static str] {
        &["http", "https"]
    }

    fn resolve_relative(
        &self,
        location: &Location,
        candidate: &str,
    ) -> Result<Lookup, StorageError> {
        let base = match location.kind() {
            Ok(LocationKind::Http(url)) => url,
            Ok(LocationKind::File(_)) => {
                return Err(StorageError::Unsupported {
                    backend: "http",
                    operation: "file location",
                })
            }
            Err(e) => {
                return Err(StorageError::Unavailable {
                    location: location.to_string(),
                    reason: e.to_string(),
                })
            }
        };

        let Some(url) = candidate_url(&base, candidate) else {
            tracing::warn!(
                "Skipping `{}` in {}: resolves outside the location",
                candidate,
                location
            );
            return Ok(Lookup::NotFound);
        };

        let response = self
            .client
            .head(url.clone())
            .send()
            .map_err(|e| http_error(&url, e))?;

        match response.status() {
            status if status.is_success() => {
                let length = header_length(&response);
                Ok(Lookup::Found(Box::new(HttpResource {
                    client: self.client.clone(),
                    url,
                    length,
                })))
            }
            // Buckets without list permission answer 403 for missing keys.
            StatusCode::NOT_FOUND | StatusCode::FORBIDDEN | StatusCode::GONE => {
                Ok(Lookup::NotFound)
            }
            status => Err(StorageError::Http {
                url: url.to_string(),
                message: format!("unexpected status {}", status),
            }),
        }
    }

    fn list_recursive(
        &self,
        _dir: &dyn Resource,
        _max_depth: usize,
    ) -> Result<Vec<ResourceHandle>, StorageError> {
        Err(StorageError::Unsupported {
            backend: "http",
            operation: "list_recursive",
        })
    }
}

fn http_error(url: &Url, e: reqwest::Error) -> StorageError {
    StorageError::Http {
        url: url.to_string(),
        message: e.to_string(),
    }
}

/// `Content-Length` as sent by the server. `HEAD` responses carry no body,
/// so the body size hint cannot be used.
fn header_length(response: &reqwest::blocking::Response) -> Option<u64> {
    response
        .headers()
        .get(reqwest::header::CONTENT_LENGTH)
        .and_then(|value| value.to_str().ok())
        .and_then(|value| value.parse().ok())
}

/// An object reachable over HTTP.
#[derive(Debug, Clone)]
pub struct HttpResource {
    client: Client,
    url: Url,
    /// Length reported by the HEAD request
    length: Option<u64>,
}

impl HttpResource {
    fn head(&self) -> Option<reqwest::blocking::Response> {
        self.client.head(self.url.clone()).send().ok()
    }
}

impl Resource for HttpResource {
    fn url(&self) -> &Url {
        &self.url
    }

    fn exists(&self) -> bool {
        self.head().is_some_and(|r| r.status().is_success())
    }

    fn is_readable(&self) -> bool {
        self.exists()
    }

    fn file_name(&self) -> Option<String> {
        self.url
            .path_segments()
            .and_then(|mut segments| segments.next_back())
            .filter(|name| !name.is_empty())
            .map(str::to_string)
    }

    fn content_length(&self) -> io::Result<u64> {
        if let Some(length) = self.length {
            return Ok(length);
        }
        self.head()
            .and_then(|r| header_length(&r))
            .ok_or_else(|| io::Error::other(format!("no content length for {}", self.url)))
    }

    fn open(&self) -> io::Result<Box<dyn Read + '_>> {
        let response = self
            .client
            .get(self.url.clone())
            .send()
            .and_then(|r| r.error_for_status())
            .map_err(io::Error::other)?;
        Ok(Box::new(response))
    }
}
