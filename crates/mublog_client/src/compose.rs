//! Compose-document parsing.
//!
//! A compose document is the text a caller hands over from an editor
//! buffer: header lines (`title:`, `categories:`), a `---` separator
//! line, then the body. Parsing happens before any network call, so a
//! malformed document is a precondition failure and nothing is submitted.

use crate::error::{ClientError, ClientResult};
use crate::publish::{EditSession, PostAction};

/// Line that divides headers from body.
const SEPARATOR: &str = "---";

/// A parsed compose document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EditDocument {
    /// Post title. Empty when no `title:` header was given.
    pub title: String,
    /// Raw comma-separated category text from the `categories:` header.
    pub categories: String,
    /// Markup body below the separator.
    pub body: String,
}

impl EditDocument {
    /// Parses a compose document.
    ///
    /// Header keys are matched case-insensitively; blank lines above the
    /// separator are ignored. A document without a separator line, or
    /// with an unrecognized header line, fails as a precondition error:
    /// an unknown header indicates a malformed document, not prose.
    pub fn parse(text: &str) -> ClientResult<Self> {
        let mut title = String::new();
        let mut categories = String::new();

        let mut lines = text.lines();
        let mut found_separator = false;

        for line in lines.by_ref() {
            let trimmed = line.trim();
            if trimmed == SEPARATOR {
                found_separator = true;
                break;
            }
            if trimmed.is_empty() {
                continue;
            }
            match trimmed.split_once(':') {
                Some((key, value)) if key.trim().eq_ignore_ascii_case("title") => {
                    title = value.trim().to_string();
                }
                Some((key, value)) if key.trim().eq_ignore_ascii_case("categories") => {
                    categories = value.trim().to_string();
                }
                _ => {
                    return Err(ClientError::precondition(format!(
                        "unrecognized header line before separator: {trimmed:?}"
                    )));
                }
            }
        }

        if !found_separator {
            return Err(ClientError::precondition(
                "compose document has no --- separator between headers and body",
            ));
        }

        let body = lines.collect::<Vec<_>>().join("\n");

        Ok(Self {
            title,
            categories,
            body,
        })
    }

    /// Converts this document into the session the publish engine consumes.
    pub fn into_session(self, action: PostAction) -> EditSession {
        EditSession {
            action,
            title: self.title,
            categories: self.categories,
            body: self.body,
        }
    }
}
