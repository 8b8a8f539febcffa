//! HTTP transport abstraction.
//!
//! The engines never name a concrete HTTP library. They talk to the
//! [`HttpClient`] trait, which returns the full response surface (status,
//! headers, body) because the media sub-protocol recovers its result from a
//! header rather than the body. [`AttoClient`] is the production
//! implementation; [`MockClient`] scripts responses for tests.

use std::collections::VecDeque;
use std::path::Path;
use std::sync::Mutex;
use std::time::Duration;

/// A complete HTTP response: status code, headers, and body text.
#[derive(Debug, Clone)]
pub struct HttpResponse {
    /// HTTP status code.
    pub status: u16,
    /// Response headers in arrival order. Names keep whatever casing the
    /// transport produced; use [`HttpResponse::header`] for lookups.
    pub headers: Vec<(String, String)>,
    /// Response body.
    pub body: String,
}

impl HttpResponse {
    /// Creates a response with a status and body and no headers.
    pub fn new(status: u16, body: impl Into<String>) -> Self {
        Self {
            status,
            headers: Vec::new(),
            body: body.into(),
        }
    }

    /// Adds a header.
    pub fn with_header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.push((name.into(), value.into()));
        self
    }

    /// First header with the given name, compared case-insensitively.
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(n, _)| n.eq_ignore_ascii_case(name))
            .map(|(_, v)| v.as_str())
    }

    /// True for any 2xx status.
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

/// HTTP client abstraction.
///
/// Implementations execute one blocking request per call. Errors are plain
/// strings; the engines wrap them into their own error type.
pub trait HttpClient: Send + Sync {
    /// Executes a bearer-authenticated GET.
    fn get(&self, url: &str, token: &str) -> Result<HttpResponse, String>;

    /// Executes a bearer-authenticated POST with a JSON body.
    fn post_json(&self, url: &str, token: &str, body: &serde_json::Value)
        -> Result<HttpResponse, String>;

    /// Executes a bearer-authenticated multipart POST attaching the file at
    /// `path` as the single form field `field`.
    fn post_file(
        &self,
        url: &str,
        token: &str,
        field: &str,
        path: &Path,
    ) -> Result<HttpResponse, String>;
}

/// Production client backed by attohttpc.
#[derive(Debug, Clone)]
pub struct AttoClient {
    timeout: Duration,
}

impl AttoClient {
    /// Creates a client with the given per-request timeout.
    pub fn new(timeout: Duration) -> Self {
        Self { timeout }
    }
}

fn bearer(token: &str) -> String {
    format!("Bearer {token}")
}

fn split_response(response: attohttpc::Response) -> Result<HttpResponse, String> {
    let (status, headers, reader) = response.split();
    let headers = headers
        .iter()
        .map(|(name, value)| {
            (
                name.as_str().to_string(),
                String::from_utf8_lossy(value.as_bytes()).into_owned(),
            )
        })
        .collect();
    let body = reader.text().map_err(|e| e.to_string())?;
    Ok(HttpResponse {
        status: status.as_u16(),
        headers,
        body,
    })
}

impl HttpClient for AttoClient {
    fn get(&self, url: &str, token: &str) -> Result<HttpResponse, String> {
        let response = attohttpc::get(url)
            .timeout(self.timeout)
            .header("Authorization", bearer(token))
            .send()
            .map_err(|e| e.to_string())?;
        split_response(response)
    }

    fn post_json(
        &self,
        url: &str,
        token: &str,
        body: &serde_json::Value,
    ) -> Result<HttpResponse, String> {
        let response = attohttpc::post(url)
            .timeout(self.timeout)
            .header("Authorization", bearer(token))
            .json(body)
            .map_err(|e| e.to_string())?
            .send()
            .map_err(|e| e.to_string())?;
        split_response(response)
    }

    fn post_file(
        &self,
        url: &str,
        token: &str,
        field: &str,
        path: &Path,
    ) -> Result<HttpResponse, String> {
        // attohttpc takes the file contents, not a path; the read happens
        // here, before anything goes on the wire.
        let bytes = std::fs::read(path).map_err(|e| e.to_string())?;
        let filename = path
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_else(|| "upload".to_string());

        let form = attohttpc::MultipartBuilder::new()
            .with_file(attohttpc::MultipartFile::new(field, &bytes).with_filename(filename.as_str()))
            .build()
            .map_err(|e| e.to_string())?;

        let response = attohttpc::post(url)
            .timeout(self.timeout)
            .header("Authorization", bearer(token))
            .body(form)
            .send()
            .map_err(|e| e.to_string())?;
        split_response(response)
    }
}

/// One request as seen by [`MockClient`].
#[derive(Debug, Clone)]
pub struct RecordedRequest {
    /// `"GET"`, `"POST"`, or `"POST_FILE"`.
    pub method: &'static str,
    /// Request URL.
    pub url: String,
    /// Token the engine supplied.
    pub token: String,
    /// JSON body, for `post_json` requests.
    pub body: Option<serde_json::Value>,
}

/// A scripted client for tests.
///
/// Responses are consumed in FIFO order regardless of method; running out
/// of scripted responses is an error. Every issued request is recorded.
#[derive(Debug, Default)]
pub struct MockClient {
    responses: Mutex<VecDeque<HttpResponse>>,
    requests: Mutex<Vec<RecordedRequest>>,
}

impl MockClient {
    /// Creates an empty mock client.
    pub fn new() -> Self {
        Self::default()
    }

    /// Queues the next response.
    pub fn push_response(&self, response: HttpResponse) {
        self.responses.lock().unwrap().push_back(response);
    }

    /// All requests issued so far.
    pub fn requests(&self) -> Vec<RecordedRequest> {
        self.requests.lock().unwrap().clone()
    }

    fn record(&self, request: RecordedRequest) -> Result<HttpResponse, String> {
        self.requests.lock().unwrap().push(request);
        self.responses
            .lock()
            .unwrap()
            .pop_front()
            .ok_or_else(|| "no scripted response left".to_string())
    }
}

impl HttpClient for MockClient {
    fn get(&self, url: &str, token: &str) -> Result<HttpResponse, String> {
        self.record(RecordedRequest {
            method: "GET",
            url: url.to_string(),
            token: token.to_string(),
            body: None,
        })
    }

    fn post_json(
        &self,
        url: &str,
        token: &str,
        body: &serde_json::Value,
    ) -> Result<HttpResponse, String> {
        self.record(RecordedRequest {
            method: "POST",
            url: url.to_string(),
            token: token.to_string(),
            body: Some(body.clone()),
        })
    }

    fn post_file(
        &self,
        url: &str,
        token: &str,
        _field: &str,
        path: &Path,
    ) -> Result<HttpResponse, String> {
        self.record(RecordedRequest {
            method: "POST_FILE",
            url: url.to_string(),
            token: token.to_string(),
            body: Some(serde_json::Value::String(path.display().to_string())),
        })
    }
}
