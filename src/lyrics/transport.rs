//! HTTP transport used by the lyrics client.
//!
//! The client only needs "GET this URL, give me status and body". Keeping
//! that behind a trait lets tests count and script requests without a
//! server.

use std::time::Duration;

use async_trait::async_trait;

use super::LyricsError;

/// Status and body of a completed request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpResponse {
    pub status: u16,
    pub body: String,
}

impl HttpResponse {
    pub fn ok(body: impl Into<String>) -> Self {
        Self {
            status: 200,
            body: body.into(),
        }
    }

    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

#[async_trait]
pub trait HttpTransport: Send + Sync {
    /// Issue a GET request. Transport failures (DNS, connect, timeout) are
    /// errors; any HTTP status is a response.
    async fn get(&self, url: &str) -> Result<HttpResponse, LyricsError>;
}

/// reqwest-backed transport with a bounded per-request timeout.
pub struct ReqwestTransport {
    http_client: reqwest::Client,
    timeout: Duration,
}

impl ReqwestTransport {
    /// Build a client that:
    /// - Gives up on any request after `timeout`
    /// - Accepts gzip-compressed responses
    /// - Sends a User-Agent identifying the application
    pub fn new(timeout: Duration) -> Result<Self, LyricsError> {
        let http_client = reqwest::Client::builder()
            .gzip(true)
            .timeout(timeout)
            .user_agent(concat!(
                env!("CARGO_PKG_NAME"),
                "/",
                env!("CARGO_PKG_VERSION")
            ))
            .build()
            .map_err(|e| LyricsError::Client(e.to_string()))?;

        Ok(Self {
            http_client,
            timeout,
        })
    }

    pub fn timeout(&self) -> Duration {
        self.timeout
    }
}

#[async_trait]
impl HttpTransport for ReqwestTransport {
    async fn get(&self, url: &str) -> Result<HttpResponse, LyricsError> {
        let response = self.http_client.get(url).send().await.map_err(|e| {
            if e.is_timeout() {
                LyricsError::Timeout(format!("{:?}", self.timeout))
            } else {
                LyricsError::Network(e.to_string())
            }
        })?;

        let status = response.status().as_u16();
        let body = response
            .text()
            .await
            .map_err(|e| LyricsError::Network(e.to_string()))?;

        Ok(HttpResponse { status, body })
    }
}
