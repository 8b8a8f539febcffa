//! Media upload engine.
//!
//! Uploads one local file via multipart form POST. The created resource's
//! URL comes back in a `Location` response header, not the body, which is
//! why the transport surfaces headers and not just status and body.

use std::path::Path;

use crate::config::ClientConfig;
use crate::error::{ClientError, ClientResult};
use crate::http::HttpClient;

/// Statuses under which the media endpoint reports a stored upload.
const ACCEPTED_STATUSES: [u16; 2] = [201, 202];

/// Form field name the endpoint expects the file under.
const FILE_FIELD: &str = "file";

/// Uploads media attachments.
pub struct MediaEngine<'a, C: HttpClient> {
    config: &'a ClientConfig,
    client: &'a C,
}

impl<'a, C: HttpClient> MediaEngine<'a, C> {
    /// Creates a media engine over the given configuration and transport.
    pub fn new(config: &'a ClientConfig, client: &'a C) -> Self {
        Self { config, client }
    }

    /// Uploads the file at `path` and returns the created resource's URL.
    ///
    /// Fails with a protocol error on any status other than 201/202, and
    /// with [`ClientError::MissingLocation`] when an accepted response
    /// carries no `Location` header. The two are distinct so callers can
    /// tell a rejected upload from a server that stored the file but lost
    /// the pointer to it.
    pub fn upload(&self, path: &Path) -> ClientResult<String> {
        let token = self.config.require_token()?;

        if !path.is_file() {
            return Err(ClientError::precondition(format!(
                "no such file: {}",
                path.display()
            )));
        }

        tracing::debug!(path = %path.display(), "uploading media");

        let response = self
            .client
            .post_file(&self.config.media_url(), token, FILE_FIELD, path)
            .map_err(ClientError::Transport)?;

        if !ACCEPTED_STATUSES.contains(&response.status) {
            return Err(ClientError::Protocol {
                status: response.status,
                body: response.body,
            });
        }

        let url = response
            .header("location")
            .map(|value| value.trim().to_string())
            .ok_or(ClientError::MissingLocation)?;

        tracing::info!(url, "media uploaded");
        Ok(url)
    }
}

/// Formats an uploaded URL and alt text as an inline image reference.
///
/// Caller-side glue: the engine itself deals only in URLs.
pub fn image_markup(url: &str, alt: &str) -> String {
    format!("![{alt}]({url})")
}
