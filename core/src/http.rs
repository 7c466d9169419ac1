//! HTTP transport types described as plain data.
//!
//! # Design
//! Requests and responses are plain owned values. The assertion helpers
//! and the deployment client build `HttpRequest` values and inspect
//! `HttpResponse` values; the actual round-trip happens in `transport`.
//! Keeping the two sides as data makes request construction trivially
//! unit-testable without a running server.

/// HTTP method for a request. The deployment service is only ever
/// exercised with GET and POST.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HttpMethod {
    Get,
    Post,
}

/// An HTTP request described as plain data.
#[derive(Debug, Clone)]
pub struct HttpRequest {
    pub method: HttpMethod,
    pub url: String,
    pub headers: Vec<(String, String)>,
    pub body: Option<String>,
}

impl HttpRequest {
    /// A bare GET with no extra headers or body.
    pub fn get(url: &str) -> Self {
        Self {
            method: HttpMethod::Get,
            url: url.to_string(),
            headers: Vec::new(),
            body: None,
        }
    }
}

/// An HTTP response reduced to what the assertions consume.
#[derive(Debug, Clone)]
pub struct HttpResponse {
    pub status: u16,
    pub body: String,
}

impl HttpResponse {
    /// True for any 2xx status.
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}
