//! HTTP transport types shared by the worker and the session.
//!
//! # Design
//! Requests and responses are plain data. The worker builds an `HttpRequest`
//! from an endpoint, a `NetworkSession` executes it, and the resulting
//! `HttpResponse` is classified by status before any payload is handed to a
//! parser. Keeping these as data lets tests drive the worker with canned
//! responses and never touch the network.

use std::fmt;
use std::time::Duration;

/// HTTP method for a request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum HttpMethod {
    Get,
    Post,
    Put,
    Patch,
    Delete,
}

impl HttpMethod {
    pub fn as_str(self) -> &'static str {
        match self {
            HttpMethod::Get => "GET",
            HttpMethod::Post => "POST",
            HttpMethod::Put => "PUT",
            HttpMethod::Patch => "PATCH",
            HttpMethod::Delete => "DELETE",
        }
    }
}

impl fmt::Display for HttpMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A pending HTTP request described as plain data.
///
/// `url` is kept as a string until the encoder resolves it, so a request
/// built from a malformed endpoint surfaces as `NetworkError::MissingUrl`
/// rather than failing at construction time.
#[derive(Debug, Clone, PartialEq)]
pub struct HttpRequest {
    pub method: HttpMethod,
    pub url: String,
    pub headers: Vec<(String, String)>,
    pub timeout: Duration,
}

impl HttpRequest {
    pub fn new(method: HttpMethod, url: impl Into<String>, timeout: Duration) -> Self {
        Self {
            method,
            url: url.into(),
            headers: Vec::new(),
            timeout,
        }
    }

    /// Look up a header value. Header names compare case-insensitively.
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(key, _)| key.eq_ignore_ascii_case(name))
            .map(|(_, value)| value.as_str())
    }

    /// Set a header, replacing any existing value under the same name.
    pub fn set_header(&mut self, name: &str, value: impl Into<String>) {
        let value = value.into();
        match self
            .headers
            .iter_mut()
            .find(|(key, _)| key.eq_ignore_ascii_case(name))
        {
            Some(entry) => entry.1 = value,
            None => self.headers.push((name.to_string(), value)),
        }
    }
}

/// An HTTP response described as plain data.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpResponse {
    pub status: u16,
    pub headers: Vec<(String, String)>,
    pub body: Vec<u8>,
}

impl HttpResponse {
    pub fn new(status: u16, body: impl Into<Vec<u8>>) -> Self {
        Self {
            status,
            headers: Vec::new(),
            body: body.into(),
        }
    }
}

/// Coarse outcome category derived from a numeric HTTP status.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ResponseStatus {
    /// 2xx.
    Success,
    /// 400.
    BadRequest,
    /// 401 and 403.
    AuthenticationError,
    /// 404, 405 and 406.
    NotFound,
    /// 5xx.
    ServerError,
    /// Everything else, including 1xx, 3xx and unlisted 4xx codes.
    Failed,
}

impl ResponseStatus {
    pub fn classify(status: u16) -> Self {
        match status {
            200..=299 => ResponseStatus::Success,
            400 => ResponseStatus::BadRequest,
            401 | 403 => ResponseStatus::AuthenticationError,
            404..=406 => ResponseStatus::NotFound,
            500..=599 => ResponseStatus::ServerError,
            _ => ResponseStatus::Failed,
        }
    }

    pub fn is_success(self) -> bool {
        self == ResponseStatus::Success
    }
}

impl fmt::Display for ResponseStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let text = match self {
            ResponseStatus::Success => "success",
            ResponseStatus::BadRequest => "bad request",
            ResponseStatus::AuthenticationError => "authentication error",
            ResponseStatus::NotFound => "not found",
            ResponseStatus::ServerError => "server error",
            ResponseStatus::Failed => "failed",
        };
        f.write_str(text)
    }
}
