//! Assertion helpers for tests against a running deployment service.
//!
//! # Design
//! Every helper blocks until the response is fully received, then
//! panics with a descriptive diagnostic on any failed expectation, so
//! a failed check terminates the calling test and the harness reports
//! the message. A single request attempt per call, no retries; client
//! timeouts stay at the transport's defaults. Substring checks are
//! ordinal (exact byte containment, case-sensitive).

use std::fmt::Display;

use crate::client::DeploymentClient;
use crate::error::{ApiError, ErrorKind};
use crate::http::{HttpMethod, HttpRequest};
use crate::transport;
use crate::types::{Credentials, LogEntry};

/// Body text served by the deployment platform's default placeholder
/// page for a freshly created site.
pub const DEFAULT_PAGE_CONTENT: &str = "This web site has been successfully created";

/// Run `action`, expect it to fail, peel one layer of wrapping from the
/// error and assert the unwrapped error's kind.
///
/// Returns the unwrapped error for further inspection. Panics if the
/// action succeeds or the unwrapped kind differs from `expected`. An
/// error that is not wrapped is classified as-is: wrapping is peeled
/// when present, never required.
pub fn throws_unwrapped<T>(
    expected: ErrorKind,
    action: impl FnOnce() -> Result<T, ApiError>,
) -> ApiError {
    let err = match action() {
        Ok(_) => panic!("expected an error of kind {expected:?}, but the action succeeded"),
        Err(err) => err.unwrapped(),
    };
    assert_eq!(
        err.kind(),
        expected,
        "expected unwrapped error of kind {expected:?}, got {err}"
    );
    err
}

/// Run `action`, expect it to fail with an error whose message contains
/// `expected`, and return that error.
///
/// Panics with `"Not throw, expected: …"` when the action succeeds.
pub fn throws_message<T, E: Display>(
    expected: &str,
    action: impl FnOnce() -> Result<T, E>,
) -> E {
    match action() {
        Ok(_) => panic!("Not throw, expected: {expected}"),
        Err(err) => {
            let message = err.to_string();
            assert!(
                message.contains(expected),
                "expected error message containing {expected:?}, got: {message}"
            );
            err
        }
    }
}

/// Expectations checked by [`verify_url`].
#[derive(Debug, Clone)]
pub struct UrlCheck {
    /// Substring that must appear in the response body, if set.
    pub expected_body: Option<String>,
    pub expected_status: u16,
    pub method: HttpMethod,
    /// Payload sent as `application/json` when `method` is POST.
    pub json_payload: String,
}

impl Default for UrlCheck {
    fn default() -> Self {
        Self {
            expected_body: None,
            expected_status: 200,
            method: HttpMethod::Get,
            json_payload: String::new(),
        }
    }
}

impl UrlCheck {
    /// GET expecting 200, no body expectation.
    pub fn ok() -> Self {
        Self::default()
    }

    /// GET expecting 200 and `expected` somewhere in the body.
    pub fn body(expected: &str) -> Self {
        Self {
            expected_body: Some(expected.to_string()),
            ..Self::default()
        }
    }

    /// GET expecting the given status code.
    pub fn status(expected: u16) -> Self {
        Self {
            expected_status: expected,
            ..Self::default()
        }
    }

    /// POST with a JSON payload, expecting 200.
    pub fn post(json_payload: &str) -> Self {
        Self {
            method: HttpMethod::Post,
            json_payload: json_payload.to_string(),
            ..Self::default()
        }
    }

    pub fn with_body(mut self, expected: &str) -> Self {
        self.expected_body = Some(expected.to_string());
        self
    }

    pub fn with_status(mut self, expected: u16) -> Self {
        self.expected_status = expected;
        self
    }
}

/// Blocking GET against `url` with basic credentials; requires a 2xx
/// response and asserts every string in `contents` appears in the body.
pub fn verify_url_with_credentials(url: &str, credentials: &Credentials, contents: &[&str]) {
    let mut req = HttpRequest::get(url);
    req.headers.push(transport::basic_auth_header(credentials));

    let response = transport::execute(req)
        .unwrap_or_else(|e| panic!("request to {url} failed: {e}"));
    assert!(
        response.is_success(),
        "For {url}, expected a successful status, got {}.\nResponse: {}",
        response.status,
        response.body
    );

    for content in contents {
        assert!(
            response.body.contains(content),
            "For {url}, expected body to contain {content:?}.\nResponse: {}",
            response.body
        );
    }
}

/// Blocking GET or POST against `url`, asserting status and optional
/// body containment per `check`.
pub fn verify_url(url: &str, check: &UrlCheck) {
    let req = match check.method {
        HttpMethod::Get => HttpRequest::get(url),
        HttpMethod::Post => HttpRequest {
            method: HttpMethod::Post,
            url: url.to_string(),
            headers: Vec::new(),
            body: Some(check.json_payload.clone()),
        },
    };

    let response = transport::execute(req)
        .unwrap_or_else(|e| panic!("request to {url} failed: {e}"));

    assert!(
        check.expected_status == response.status,
        "For {url}, Expected Status Code: {} Actual Status Code: {}.\nResponse: {}",
        check.expected_status,
        response.status,
        response.body
    );

    if let Some(expected) = &check.expected_body {
        assert!(
            response.body.contains(expected),
            "For {url}, expected body to contain {expected:?}.\nResponse: {}",
            response.body
        );
    }
}

/// Fetch a deployment's log entries, flatten in the detail entries of
/// every entry that links to a detail resource, and assert each string
/// in `expected_matches` appears in at least one combined message.
///
/// Top-level and detail entries are matched interchangeably.
pub fn verify_log_output(
    client: &DeploymentClient,
    deployment_id: &str,
    expected_matches: &[&str],
) {
    let entries = client
        .get_log_entries(deployment_id)
        .unwrap_or_else(|e| panic!("fetching log entries for {deployment_id} failed: {e}"));
    assert!(
        !entries.is_empty(),
        "no log entries for deployment {deployment_id}"
    );

    let mut combined: Vec<LogEntry> = entries.clone();
    for entry in entries.iter().filter(|e| e.details_url.is_some()) {
        let details = client
            .get_log_entry_details(deployment_id, &entry.id)
            .unwrap_or_else(|e| {
                panic!(
                    "fetching details for entry {} of deployment {deployment_id} failed: {e}",
                    entry.id
                )
            });
        combined.extend(details);
    }

    for expected in expected_matches {
        assert!(
            combined.iter().any(|e| e.message.contains(expected)),
            "expected {expected:?} in the log output of deployment {deployment_id}, \
             but none of the {} entries matched",
            combined.len()
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn throws_message_returns_matching_error() {
        let err = throws_message("not found", || -> Result<(), ApiError> {
            Err(ApiError::NotFound)
        });
        assert!(matches!(err, ApiError::NotFound));
    }

    #[test]
    #[should_panic(expected = "Not throw, expected: boom")]
    fn throws_message_panics_when_action_succeeds() {
        throws_message("boom", || Ok::<_, ApiError>(42));
    }

    #[test]
    #[should_panic(expected = "expected error message containing")]
    fn throws_message_panics_on_message_mismatch() {
        throws_message("different text", || -> Result<(), ApiError> {
            Err(ApiError::NotFound)
        });
    }

    #[test]
    fn throws_unwrapped_peels_and_classifies() {
        let err = throws_unwrapped(ErrorKind::Http, || -> Result<(), ApiError> {
            Err(ApiError::Http {
                status: 502,
                body: "bad gateway".to_string(),
            }
            .wrapped())
        });
        assert!(matches!(err, ApiError::Http { status: 502, .. }));
    }

    #[test]
    fn throws_unwrapped_accepts_an_error_that_was_never_wrapped() {
        let err = throws_unwrapped(ErrorKind::NotFound, || -> Result<(), ApiError> {
            Err(ApiError::NotFound)
        });
        assert!(matches!(err, ApiError::NotFound));
    }

    #[test]
    #[should_panic(expected = "but the action succeeded")]
    fn throws_unwrapped_panics_when_action_succeeds() {
        throws_unwrapped(ErrorKind::NotFound, || Ok::<_, ApiError>(()));
    }

    #[test]
    #[should_panic(expected = "expected unwrapped error of kind")]
    fn throws_unwrapped_panics_on_kind_mismatch() {
        throws_unwrapped(ErrorKind::NotFound, || -> Result<(), ApiError> {
            Err(ApiError::Transport("refused".to_string()).wrapped())
        });
    }

    #[test]
    fn url_check_defaults_to_get_200() {
        let check = UrlCheck::ok();
        assert_eq!(check.method, HttpMethod::Get);
        assert_eq!(check.expected_status, 200);
        assert!(check.expected_body.is_none());
        assert!(check.json_payload.is_empty());
    }

    #[test]
    fn url_check_constructors_compose() {
        let check = UrlCheck::post(r#"{"a":1}"#).with_status(201).with_body("created");
        assert_eq!(check.method, HttpMethod::Post);
        assert_eq!(check.expected_status, 201);
        assert_eq!(check.json_payload, r#"{"a":1}"#);
        assert_eq!(check.expected_body.as_deref(), Some("created"));
    }
}
