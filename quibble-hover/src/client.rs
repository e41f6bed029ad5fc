//! Client for the review server's hover endpoint.
//!
//! The server exposes semantic information about a symbol at
//! `GET /api/lsp/hover/{repository}/{commit}/{encoded-file}/{offset}`, where
//! the file path is URL-safe Base64 and the response body is a pre-rendered
//! markup fragment. The client performs exactly one request per call: no
//! retries, no timeouts, no deduplication. Every call is triggered by a
//! discrete pointer interaction and only the most recent outcome matters to
//! the UI, so overlapping requests are resolved by the controller's
//! generation check rather than here.

use async_trait::async_trait;
use base64::engine::general_purpose::URL_SAFE;
use base64::Engine as _;
use thiserror::Error;

use crate::location::SymbolLocation;

/// Path prefix of the hover endpoint on the review server.
pub const HOVER_ENDPOINT_PREFIX: &str = "/api/lsp/hover";

/// Transport-level failure while talking to the hover endpoint.
///
/// A completed HTTP exchange is never an error: non-2xx responses are logged
/// and reported as "no content". Only failures to complete the exchange at
/// all surface here.
#[derive(Debug, Error)]
pub enum HoverError {
    /// The request could not be sent or the response body could not be read.
    #[error("hover request failed: {0}")]
    Transport(#[from] reqwest::Error),
    /// The host adapter could not reach the transport at all.
    #[error("hover transport unavailable: {0}")]
    Unavailable(String),
}

/// Something that can answer hover lookups.
///
/// [`HoverClient`] is the production implementation; tests substitute
/// scripted sources to control response content and timing.
#[async_trait]
pub trait HoverSource: Send + Sync {
    /// Fetch hover content for a resolved location.
    ///
    /// `Ok(Some(markup))` on a 2xx response, `Ok(None)` when the service has
    /// nothing to say (including error statuses), `Err` only for transport
    /// failures.
    async fn fetch(
        &self,
        repository: &str,
        location: &SymbolLocation,
    ) -> Result<Option<String>, HoverError>;
}

/// HTTP client for the hover endpoint.
#[derive(Debug, Clone)]
pub struct HoverClient {
    http: reqwest::Client,
    origin: String,
}

impl HoverClient {
    /// Create a client against the given server origin.
    ///
    /// An empty origin produces origin-relative URLs; hosts whose transport
    /// resolves those against the current page (a webview shell) may pass
    /// `""`, everything else passes `https://host[:port]`.
    #[must_use]
    pub fn new(origin: impl Into<String>) -> Self {
        Self {
            http: reqwest::Client::new(),
            origin: origin.into(),
        }
    }

    /// The URL a hover lookup for `location` in `repository` is sent to.
    #[must_use]
    pub fn hover_url(&self, repository: &str, location: &SymbolLocation) -> String {
        format!(
            "{}{}/{}/{}/{}/{}",
            self.origin,
            HOVER_ENDPOINT_PREFIX,
            repository,
            location.commit,
            encode_file_path(&location.file),
            location.start,
        )
    }
}

#[async_trait]
impl HoverSource for HoverClient {
    async fn fetch(
        &self,
        repository: &str,
        location: &SymbolLocation,
    ) -> Result<Option<String>, HoverError> {
        let url = self.hover_url(repository, location);
        log::debug!("requesting hover from {url}");

        let response = self.http.get(&url).send().await?;
        let status = response.status();
        if status.is_success() {
            Ok(Some(response.text().await?))
        } else {
            let body = response.text().await.unwrap_or_default();
            log::error!("hover endpoint returned {status}: {body}");
            Ok(None)
        }
    }
}

/// Extract the repository name from the current page path.
///
/// Review pages live under `/x/{repository}/...`; the repository is the
/// third `/`-separated segment. Paths too short to carry one yield `None`.
#[must_use]
pub fn repository_from_path(path: &str) -> Option<&str> {
    path.split('/').nth(2).filter(|segment| !segment.is_empty())
}

/// Encode a file path for use as a URL segment.
///
/// URL-safe Base64: the standard alphabet with `+` → `-` and `/` → `_`,
/// padding preserved. This is the form the server's decoder expects.
#[must_use]
pub fn encode_file_path(path: &str) -> String {
    URL_SAFE.encode(path)
}

/// Decode a file path segment produced by [`encode_file_path`].
#[must_use]
pub fn decode_file_path(encoded: &str) -> Option<String> {
    let bytes = URL_SAFE.decode(encoded).ok()?;
    String::from_utf8(bytes).ok()
}
