//! Single-shot HTTP fetching for scouting stages.
//!
//! A fetch is one GET with a browser-like User-Agent and a per-request
//! timeout. There is no retry: any timeout, connection failure, or non-2xx
//! status comes back as [`IntelError::Network`] for the caller to absorb.

use std::time::Duration;

use intelscout_shared::{IntelError, Result, ScoutConfig};
use reqwest::Client;
use tracing::{debug, instrument};
use url::Url;

/// Maximum number of redirects to follow.
const MAX_REDIRECTS: usize = 5;

/// Maximum response size we accept (10 MB).
const MAX_RESPONSE_SIZE: u64 = 10 * 1024 * 1024;

// ---------------------------------------------------------------------------
// Trait
// ---------------------------------------------------------------------------

/// Retrieves raw page bodies for the pipeline.
pub trait Fetcher: Send + Sync {
    /// GET `url`, giving up after `timeout`. Returns the body bytes.
    fn fetch(&self, url: &str, timeout: Duration)
    -> impl Future<Output = Result<Vec<u8>>> + Send;
}

// ---------------------------------------------------------------------------
// HttpFetcher
// ---------------------------------------------------------------------------

/// [`Fetcher`] backed by a shared `reqwest` client.
#[derive(Debug, Clone)]
pub struct HttpFetcher {
    client: Client,
    max_response_bytes: u64,
}

impl HttpFetcher {
    /// Build a fetcher that identifies itself with `config.user_agent`.
    pub fn new(config: &ScoutConfig) -> Result<Self> {
        let client = Client::builder()
            .user_agent(config.user_agent.as_str())
            .redirect(reqwest::redirect::Policy::limited(MAX_REDIRECTS))
            .build()
            .map_err(|e| IntelError::network(format!("failed to build HTTP client: {e}")))?;

        Ok(Self {
            client,
            max_response_bytes: MAX_RESPONSE_SIZE,
        })
    }

    /// Override the response size cap.
    pub fn with_max_response_bytes(mut self, max: u64) -> Self {
        self.max_response_bytes = max;
        self
    }
}

impl Fetcher for HttpFetcher {
    #[instrument(skip_all, fields(url = %url))]
    async fn fetch(&self, url: &str, timeout: Duration) -> Result<Vec<u8>> {
        let parsed =
            Url::parse(url).map_err(|e| IntelError::network(format!("{url}: invalid URL: {e}")))?;

        debug!(timeout_ms = timeout.as_millis() as u64, "fetching page");

        let response = self
            .client
            .get(parsed)
            .timeout(timeout)
            .send()
            .await
            .map_err(|e| {
                if e.is_timeout() {
                    IntelError::network(format!(
                        "{url}: timed out after {}ms",
                        timeout.as_millis()
                    ))
                } else {
                    IntelError::network(format!("{url}: {e}"))
                }
            })?;

        let status = response.status();
        if !status.is_success() {
            return Err(IntelError::network(format!("{url}: HTTP {status}")));
        }

        // Check content-length if available
        if let Some(len) = response.content_length() {
            if len > self.max_response_bytes {
                return Err(IntelError::network(format!(
                    "{url}: response too large ({len} bytes, max {})",
                    self.max_response_bytes
                )));
            }
        }

        let body = response
            .bytes()
            .await
            .map_err(|e| IntelError::network(format!("{url}: failed to read body: {e}")))?;

        if body.len() as u64 > self.max_response_bytes {
            return Err(IntelError::network(format!(
                "{url}: response too large ({} bytes, max {})",
                body.len(),
                self.max_response_bytes
            )));
        }

        debug!(status = status.as_u16(), bytes = body.len(), "page fetched");
        Ok(body.to_vec())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use intelscout_shared::DEFAULT_USER_AGENT;
    use wiremock::matchers::{header, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn fetcher() -> HttpFetcher {
        HttpFetcher::new(&ScoutConfig::default()).expect("build fetcher")
    }

    #[tokio::test]
    async fn test_fetch_returns_body_bytes() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/careers"))
            .respond_with(ResponseTemplate::new(200).set_body_string("<h1>Careers</h1>"))
            .expect(1)
            .mount(&server)
            .await;

        let url = format!("{}/careers", server.uri());
        let body = fetcher()
            .fetch(&url, Duration::from_secs(5))
            .await
            .expect("fetch succeeds");

        assert_eq!(body, b"<h1>Careers</h1>");
    }

    #[tokio::test]
    async fn test_fetch_sends_browser_user_agent() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(header("user-agent", DEFAULT_USER_AGENT))
            .respond_with(ResponseTemplate::new(200).set_body_string("ok"))
            .mount(&server)
            .await;

        let url = format!("{}/blog", server.uri());
        let result = fetcher().fetch(&url, Duration::from_secs(5)).await;
        assert!(result.is_ok(), "unexpected error: {result:?}");
    }

    #[tokio::test]
    async fn test_non_success_status_is_network_error() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(404))
            .expect(1)
            .mount(&server)
            .await;

        let url = format!("{}/careers", server.uri());
        let err = fetcher()
            .fetch(&url, Duration::from_secs(5))
            .await
            .unwrap_err();

        assert!(matches!(err, IntelError::Network(_)));
        assert!(err.to_string().contains("404"));
    }

    #[tokio::test]
    async fn test_server_error_is_not_retried() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(503))
            .expect(1)
            .mount(&server)
            .await;

        let url = format!("{}/blog", server.uri());
        assert!(fetcher().fetch(&url, Duration::from_secs(5)).await.is_err());
        // `expect(1)` is verified when the server drops.
    }

    #[tokio::test]
    async fn test_slow_response_times_out() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_string("late")
                    .set_delay(Duration::from_secs(3)),
            )
            .mount(&server)
            .await;

        let url = format!("{}/careers", server.uri());
        let err = fetcher()
            .fetch(&url, Duration::from_millis(200))
            .await
            .unwrap_err();

        assert!(err.to_string().contains("timed out"), "got: {err}");
    }

    #[tokio::test]
    async fn test_oversized_body_is_rejected() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(200).set_body_string("x".repeat(64)))
            .mount(&server)
            .await;

        let url = format!("{}/blog", server.uri());
        let err = fetcher()
            .with_max_response_bytes(16)
            .fetch(&url, Duration::from_secs(5))
            .await
            .unwrap_err();

        assert!(err.to_string().contains("too large"));
    }

    #[tokio::test]
    async fn test_invalid_url_is_network_error() {
        let err = fetcher()
            .fetch("https://www.acme corp.com/careers", Duration::from_secs(1))
            .await
            .unwrap_err();

        assert!(matches!(err, IntelError::Network(_)));
        assert!(err.to_string().contains("invalid URL"));
    }
}
