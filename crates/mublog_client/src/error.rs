//! Error types for the client engines.

use mublog_store::StoreError;
use thiserror::Error;

/// Result type for client operations.
pub type ClientResult<T> = Result<T, ClientError>;

/// Errors that can occur while syncing, publishing, or uploading.
///
/// The variants fall into four diagnostic kinds (see [`ClientError::kind`]):
/// precondition failures caught before any network call, transport failures,
/// protocol failures (unexpected HTTP status), and data failures (malformed
/// or incomplete response bodies).
#[derive(Error, Debug)]
pub enum ClientError {
    /// Required input was missing or malformed; detected before any
    /// network call is made.
    #[error("precondition failed: {0}")]
    Precondition(String),

    /// Network or process failure while executing a request.
    #[error("transport error: {0}")]
    Transport(String),

    /// The server answered with an unexpected HTTP status. The body is
    /// carried verbatim as diagnostic context.
    #[error("server returned {status}: {body}")]
    Protocol {
        /// HTTP status code.
        status: u16,
        /// Response body, unmodified.
        body: String,
    },

    /// A response body could not be parsed, or lacked a required field.
    #[error("data error: {0}")]
    Data(String),

    /// An upload was accepted but the response carried no Location header,
    /// so the created resource's URL cannot be recovered.
    #[error("upload accepted but response has no Location header")]
    MissingLocation,

    /// Local cache failure.
    #[error(transparent)]
    Store(#[from] StoreError),
}

impl ClientError {
    /// The diagnostic kind of this error, for logging.
    pub fn kind(&self) -> &'static str {
        match self {
            ClientError::Precondition(_) => "precondition",
            ClientError::Transport(_) => "transport",
            ClientError::Protocol { .. } => "protocol",
            ClientError::Data(_) => "data",
            ClientError::MissingLocation => "protocol",
            ClientError::Store(_) => "store",
        }
    }

    /// Creates a data error.
    pub fn data(message: impl Into<String>) -> Self {
        ClientError::Data(message.into())
    }

    /// Creates a precondition error.
    pub fn precondition(message: impl Into<String>) -> Self {
        ClientError::Precondition(message.into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_kinds() {
        assert_eq!(ClientError::precondition("no token").kind(), "precondition");
        assert_eq!(ClientError::Transport("refused".into()).kind(), "transport");
        assert_eq!(
            ClientError::Protocol {
                status: 500,
                body: String::new()
            }
            .kind(),
            "protocol"
        );
        assert_eq!(ClientError::data("bad page").kind(), "data");
        assert_eq!(ClientError::MissingLocation.kind(), "protocol");
    }

    #[test]
    fn protocol_display_carries_body() {
        let err = ClientError::Protocol {
            status: 400,
            body: "invalid_request: unknown action".into(),
        };
        let text = err.to_string();
        assert!(text.contains("400"));
        assert!(text.contains("unknown action"));
    }
}
