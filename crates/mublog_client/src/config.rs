//! Configuration for the client engines.

use std::time::Duration;

use crate::error::{ClientError, ClientResult};

/// Number of items requested per page when no override is given.
pub const DEFAULT_PAGE_SIZE: u32 = 50;

/// Configuration shared by the sync, publish, and media engines.
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// Base URL of the remote service, without a trailing slash.
    pub base_url: String,
    /// Bearer token. Sourced by the caller; treated as an opaque string.
    pub token: String,
    /// Page size for the sync walk.
    pub page_size: u32,
    /// Request timeout.
    pub timeout: Duration,
}

impl ClientConfig {
    /// Creates a new configuration with default page size and timeout.
    pub fn new(base_url: impl Into<String>, token: impl Into<String>) -> Self {
        let mut base_url = base_url.into();
        while base_url.ends_with('/') {
            base_url.pop();
        }
        Self {
            base_url,
            token: token.into(),
            page_size: DEFAULT_PAGE_SIZE,
            timeout: Duration::from_secs(30),
        }
    }

    /// Sets the page size.
    pub fn with_page_size(mut self, size: u32) -> Self {
        self.page_size = size;
        self
    }

    /// Sets the request timeout.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// URL of one read-API page.
    pub fn query_url(&self, limit: u32, offset: u32) -> String {
        format!(
            "{}/query?q=source&limit={}&offset={}",
            self.base_url, limit, offset
        )
    }

    /// URL of the write endpoint.
    pub fn publish_url(&self) -> String {
        format!("{}/publish", self.base_url)
    }

    /// URL of the media endpoint.
    pub fn media_url(&self) -> String {
        format!("{}/publish/media", self.base_url)
    }

    /// The bearer token, or a precondition error when none was supplied.
    ///
    /// Every engine calls this before its first network request.
    pub fn require_token(&self) -> ClientResult<&str> {
        if self.token.is_empty() {
            return Err(ClientError::precondition("no credential configured"));
        }
        Ok(&self.token)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn config_builder() {
        let config = ClientConfig::new("https://mb.example.com/", "secret")
            .with_page_size(25)
            .with_timeout(Duration::from_secs(60));

        assert_eq!(config.base_url, "https://mb.example.com");
        assert_eq!(config.token, "secret");
        assert_eq!(config.page_size, 25);
        assert_eq!(config.timeout, Duration::from_secs(60));
    }

    #[test]
    fn endpoint_urls() {
        let config = ClientConfig::new("https://mb.example.com", "t");

        assert_eq!(
            config.query_url(50, 100),
            "https://mb.example.com/query?q=source&limit=50&offset=100"
        );
        assert_eq!(config.publish_url(), "https://mb.example.com/publish");
        assert_eq!(config.media_url(), "https://mb.example.com/publish/media");
    }

    #[test]
    fn empty_token_is_a_precondition_error() {
        let config = ClientConfig::new("https://mb.example.com", "");
        let err = config.require_token().unwrap_err();
        assert_eq!(err.kind(), "precondition");
    }
}
