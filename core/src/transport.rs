//! Blocking executor for [`HttpRequest`] values.
//!
//! # Design
//! Every call builds a fresh `ureq` agent, so there is no cross-call
//! connection sharing and no state to poison between test cases.
//! Status-as-error is disabled: 4xx/5xx responses come back as data and
//! the caller decides what a given status means. Only genuine transport
//! failures (connection refused, TLS, DNS) become errors here.

use base64::{engine::general_purpose::STANDARD, Engine as _};

use crate::error::ApiError;
use crate::http::{HttpMethod, HttpRequest, HttpResponse};
use crate::types::Credentials;

/// User-agent token attached to every outgoing request, so test
/// traffic is identifiable in service logs.
pub const USER_AGENT: &str = "Deploy-Verify-Test/1.0";

/// Execute a request and return the response, blocking until the full
/// body has been read.
pub fn execute(req: HttpRequest) -> Result<HttpResponse, ApiError> {
    let agent = ureq::Agent::config_builder()
        .http_status_as_error(false)
        .build()
        .new_agent();

    let result = match (req.method, req.body) {
        (HttpMethod::Get, _) => {
            let mut builder = agent.get(&req.url).header("User-Agent", USER_AGENT);
            for (name, value) in &req.headers {
                builder = builder.header(name.as_str(), value.as_str());
            }
            builder.call()
        }
        (HttpMethod::Post, body) => {
            let mut builder = agent
                .post(&req.url)
                .header("User-Agent", USER_AGENT)
                .content_type("application/json");
            for (name, value) in &req.headers {
                builder = builder.header(name.as_str(), value.as_str());
            }
            builder.send(body.unwrap_or_default().as_bytes())
        }
    };

    let mut response = result.map_err(|e| ApiError::Transport(e.to_string()))?;
    let status = response.status().as_u16();
    let body = response
        .body_mut()
        .read_to_string()
        .map_err(|e| ApiError::Transport(e.to_string()))?;

    Ok(HttpResponse { status, body })
}

/// The `Authorization` header for a set of basic credentials.
pub fn basic_auth_header(credentials: &Credentials) -> (String, String) {
    let token = STANDARD.encode(format!(
        "{}:{}",
        credentials.username, credentials.password
    ));
    ("Authorization".to_string(), format!("Basic {token}"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn basic_auth_header_encodes_user_and_password() {
        // RFC 7617 example value.
        let (name, value) = basic_auth_header(&Credentials::new("Aladdin", "open sesame"));
        assert_eq!(name, "Authorization");
        assert_eq!(value, "Basic QWxhZGRpbjpvcGVuIHNlc2FtZQ==");
    }

    #[test]
    fn execute_surfaces_connection_failures_as_transport_errors() {
        // Port 1 is never listening.
        let err = execute(crate::http::HttpRequest::get("http://127.0.0.1:1/")).unwrap_err();
        assert_eq!(err.kind(), crate::error::ErrorKind::Transport);
    }
}
