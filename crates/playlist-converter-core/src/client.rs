//! HTTP client for the conversion backend.
//!
//! Each submission is exactly one `GET` to the endpoint of the source
//! platform, with the session cookies attached. There is no retry: a failed
//! attempt is classified and handed back to the caller.

use std::future::Future;

use reqwest::{Client, Url};
use thiserror::Error;
use tracing::{debug, error, info, warn};

use crate::error::{Error, Result};
use crate::result::ConversionResult;
use crate::wizard::Platform;

/// Default conversion backend.
pub const DEFAULT_BASE_URL: &str = "https://player-backend-qz31.onrender.com";

/// A conversion request built by the wizard.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConversionRequest {
    platform: Platform,
    params: Vec<(&'static str, String)>,
}

impl ConversionRequest {
    /// Empty request for `platform`.
    #[must_use]
    pub const fn new(platform: Platform) -> Self {
        Self {
            platform,
            params: Vec::new(),
        }
    }

    /// Add a query parameter.
    #[must_use]
    pub fn with_param(mut self, name: &'static str, value: impl Into<String>) -> Self {
        self.params.push((name, value.into()));
        self
    }

    /// Source platform.
    pub const fn platform(&self) -> Platform {
        self.platform
    }

    /// Query parameters in the order they will be sent.
    pub fn params(&self) -> &[(&'static str, String)] {
        &self.params
    }

    /// Value of a single parameter.
    pub fn param(&self, name: &str) -> Option<&str> {
        self.params
            .iter()
            .find(|(key, _)| *key == name)
            .map(|(_, value)| value.as_str())
    }

    /// Full endpoint URL against `base_url`.
    pub fn url(&self, base_url: &str) -> Result<Url> {
        let raw = format!(
            "{}{}",
            base_url.trim_end_matches('/'),
            self.platform.endpoint_path()
        );
        let mut url = Url::parse(&raw).map_err(|e| Error::InvalidUrl(format!("{raw}: {e}")))?;
        if !self.params.is_empty() {
            url.query_pairs_mut()
                .extend_pairs(self.params.iter().map(|(k, v)| (*k, v.as_str())));
        }
        Ok(url)
    }
}

/// Raw HTTP response.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpResponse {
    /// Status code.
    pub status: u16,
    /// Response body as text.
    pub body: String,
}

impl HttpResponse {
    /// Whether the status is 2xx.
    #[must_use]
    pub const fn is_success(&self) -> bool {
        self.status >= 200 && self.status < 300
    }
}

/// Failure below the HTTP layer.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TransportError {
    /// No response: connection refused, timeout, CORS rejection.
    #[error("Network error: {0}")]
    Network(String),
    /// Anything else (body read failure, builder error).
    #[error("Request failed: {0}")]
    Other(String),
}

/// Sends GET requests with credentials attached.
pub trait HttpTransport {
    /// Issue a single GET to `url`.
    fn get(
        &self,
        url: Url,
    ) -> impl Future<Output = std::result::Result<HttpResponse, TransportError>>;
}

/// [`HttpTransport`] backed by `reqwest` (the Fetch API on wasm32).
#[derive(Debug, Clone, Default)]
pub struct ReqwestTransport {
    client: Client,
}

impl ReqwestTransport {
    /// Create a transport with a fresh client.
    #[must_use]
    pub fn new() -> Self {
        Self::with_client(Client::new())
    }

    /// Create a transport with a custom `reqwest::Client`.
    #[must_use]
    pub const fn with_client(client: Client) -> Self {
        Self { client }
    }
}

fn classify_reqwest_error(err: &reqwest::Error) -> TransportError {
    #[cfg(not(target_arch = "wasm32"))]
    let unreachable = err.is_connect() || err.is_timeout() || err.is_request();
    #[cfg(target_arch = "wasm32")]
    let unreachable = err.is_timeout() || err.is_request();

    if unreachable {
        TransportError::Network(err.to_string())
    } else {
        TransportError::Other(err.to_string())
    }
}

impl HttpTransport for ReqwestTransport {
    async fn get(&self, url: Url) -> std::result::Result<HttpResponse, TransportError> {
        let request = self.client.get(url);
        #[cfg(target_arch = "wasm32")]
        let request = request.fetch_credentials_include();

        let response = request
            .send()
            .await
            .map_err(|e| classify_reqwest_error(&e))?;
        let status = response.status().as_u16();
        let body = response
            .text()
            .await
            .map_err(|e| TransportError::Other(e.to_string()))?;
        Ok(HttpResponse { status, body })
    }
}

/// Coarse error classes driving the UI reaction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// The server answered with an error status.
    Server,
    /// No response; the session may have expired.
    Network,
    /// Anything else.
    Unexpected,
}

/// Why a conversion attempt failed.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConversionError {
    /// Non-2xx status.
    #[error("Server error {status}: {body}")]
    Server {
        /// Status code.
        status: u16,
        /// Response body.
        body: String,
    },
    /// No response received (network failure or CORS rejection).
    #[error("Network error or no response received: {0}")]
    Network(String),
    /// The body was not the expected JSON.
    #[error("Failed to parse response: {0}")]
    Decode(String),
    /// Anything else.
    #[error("Unexpected error: {0}")]
    Unexpected(String),
}

impl ConversionError {
    /// Coarse class of this error.
    #[must_use]
    pub const fn kind(&self) -> ErrorKind {
        match self {
            Self::Server { .. } => ErrorKind::Server,
            Self::Network(_) => ErrorKind::Network,
            Self::Decode(_) | Self::Unexpected(_) => ErrorKind::Unexpected,
        }
    }

    /// Whether the caller should re-check the session cookies.
    #[must_use]
    pub const fn requires_session_recheck(&self) -> bool {
        matches!(self.kind(), ErrorKind::Network)
    }
}

impl From<TransportError> for ConversionError {
    fn from(err: TransportError) -> Self {
        match err {
            TransportError::Network(msg) => Self::Network(msg),
            TransportError::Other(msg) => Self::Unexpected(msg),
        }
    }
}

/// Client for the two conversion endpoints.
#[derive(Debug, Clone)]
pub struct ConversionClient<T> {
    transport: T,
    base_url: String,
}

impl ConversionClient<ReqwestTransport> {
    /// Client against [`DEFAULT_BASE_URL`] using `reqwest`.
    #[must_use]
    pub fn new() -> Self {
        Self::with_transport(ReqwestTransport::new(), DEFAULT_BASE_URL)
    }
}

impl Default for ConversionClient<ReqwestTransport> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: HttpTransport> ConversionClient<T> {
    /// Client against `base_url` over `transport`.
    pub fn with_transport(transport: T, base_url: impl Into<String>) -> Self {
        Self {
            transport,
            base_url: base_url.into(),
        }
    }

    /// Get the base URL.
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Get the transport.
    pub const fn transport(&self) -> &T {
        &self.transport
    }

    /// Send `request` and parse the result.
    pub async fn convert(
        &self,
        request: &ConversionRequest,
    ) -> std::result::Result<ConversionResult, ConversionError> {
        let url = request
            .url(&self.base_url)
            .map_err(|e| ConversionError::Unexpected(e.to_string()))?;
        info!("Requesting {} conversion", request.platform());
        debug!("Conversion URL: {}", url);

        let response = self.transport.get(url).await.map_err(|e| {
            error!("Conversion request failed: {}", e);
            ConversionError::from(e)
        })?;

        if !response.is_success() {
            warn!(
                "Server error: status={} body={}",
                response.status, response.body
            );
            return Err(ConversionError::Server {
                status: response.status,
                body: response.body,
            });
        }

        ConversionResult::from_json(&response.body).map_err(|e| {
            error!("Failed to parse JSON response: {}", e);
            ConversionError::Decode(e.to_string())
        })
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
mod tests {
    use std::cell::RefCell;

    use super::*;

    struct StubTransport {
        response: std::result::Result<HttpResponse, TransportError>,
        requests: RefCell<Vec<Url>>,
    }

    impl StubTransport {
        fn new(response: std::result::Result<HttpResponse, TransportError>) -> Self {
            Self {
                response,
                requests: RefCell::new(Vec::new()),
            }
        }
    }

    impl HttpTransport for StubTransport {
        async fn get(&self, url: Url) -> std::result::Result<HttpResponse, TransportError> {
            self.requests.borrow_mut().push(url);
            self.response.clone()
        }
    }

    fn ok(body: &str) -> std::result::Result<HttpResponse, TransportError> {
        Ok(HttpResponse {
            status: 200,
            body: body.to_string(),
        })
    }

    #[test]
    fn test_url_spotify_endpoint() {
        let request = ConversionRequest::new(Platform::Spotify)
            .with_param("param", "abc")
            .with_param("name", "My Mix");
        let url = request.url("https://backend.example/").unwrap();
        assert_eq!(
            url.as_str(),
            "https://backend.example/player/convertSpotifyToYoutube?param=abc&name=My+Mix"
        );
    }

    #[test]
    fn test_url_youtube_endpoint_without_params() {
        let url = ConversionRequest::new(Platform::YouTube)
            .url(DEFAULT_BASE_URL)
            .unwrap();
        assert_eq!(
            url.as_str(),
            "https://player-backend-qz31.onrender.com/player/convertYoutubeToSpotify"
        );
    }

    #[test]
    fn test_url_invalid_base() {
        let result = ConversionRequest::new(Platform::YouTube).url("not a base");
        assert!(matches!(result, Err(Error::InvalidUrl(_))));
    }

    #[tokio::test]
    async fn test_convert_success() {
        let client = ConversionClient::with_transport(
            StubTransport::new(ok(
                r#"{"result":{"status":"ok","message":"done"},"Tracks Deleted":[],"New Tracks Detected":[{"track":"t","artist":"a"}]}"#,
            )),
            "https://backend.example",
        );
        let request = ConversionRequest::new(Platform::YouTube).with_param("param", "x");

        let result = client.convert(&request).await.unwrap();
        assert_eq!(result.result.status, "ok");
        assert_eq!(result.new_tracks.len(), 1);
        assert_eq!(client.transport().requests.borrow().len(), 1);
    }

    #[tokio::test]
    async fn test_convert_server_error() {
        let client = ConversionClient::with_transport(
            StubTransport::new(Ok(HttpResponse {
                status: 500,
                body: "boom".to_string(),
            })),
            "https://backend.example",
        );
        let err = client
            .convert(&ConversionRequest::new(Platform::Spotify))
            .await
            .unwrap_err();
        assert_eq!(
            err,
            ConversionError::Server {
                status: 500,
                body: "boom".to_string()
            }
        );
        assert_eq!(err.kind(), ErrorKind::Server);
        assert!(!err.requires_session_recheck());
    }

    #[tokio::test]
    async fn test_convert_network_error_requires_recheck() {
        let client = ConversionClient::with_transport(
            StubTransport::new(Err(TransportError::Network("CORS".to_string()))),
            "https://backend.example",
        );
        let err = client
            .convert(&ConversionRequest::new(Platform::Spotify))
            .await
            .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Network);
        assert!(err.requires_session_recheck());
    }

    #[tokio::test]
    async fn test_convert_bad_json_is_decode_error() {
        let client = ConversionClient::with_transport(
            StubTransport::new(ok("<html>oops</html>")),
            "https://backend.example",
        );
        let err = client
            .convert(&ConversionRequest::new(Platform::Spotify))
            .await
            .unwrap_err();
        assert!(matches!(err, ConversionError::Decode(_)));
        assert_eq!(err.kind(), ErrorKind::Unexpected);
    }

    #[tokio::test]
    async fn test_convert_invalid_base_url_sends_nothing() {
        let client = ConversionClient::with_transport(StubTransport::new(ok("{}")), "nope");
        let err = client
            .convert(&ConversionRequest::new(Platform::Spotify))
            .await
            .unwrap_err();
        assert!(matches!(err, ConversionError::Unexpected(_)));
        assert!(client.transport().requests.borrow().is_empty());
    }

    #[test]
    fn test_transport_error_conversion() {
        assert_eq!(
            ConversionError::from(TransportError::Other("x".to_string())),
            ConversionError::Unexpected("x".to_string())
        );
    }
}
