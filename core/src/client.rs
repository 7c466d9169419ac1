//! Client for the deployment-management service's log resources.
//!
//! # Design
//! `DeploymentClient` holds only a `base_url` and carries no mutable
//! state between calls. Each operation is split into a `build_*` method
//! that produces an `HttpRequest` and a parse method that consumes an
//! `HttpResponse`, so request construction and status interpretation
//! stay unit-testable without a server. The `get_*` composites perform
//! the blocking round-trip; a failure crossing that join boundary is
//! wrapped one level so callers can peel and classify it.

use crate::error::ApiError;
use crate::http::{HttpRequest, HttpResponse};
use crate::transport;
use crate::types::LogEntry;

/// Synchronous, stateless client for a deployment's log entries.
#[derive(Debug, Clone)]
pub struct DeploymentClient {
    base_url: String,
}

impl DeploymentClient {
    pub fn new(base_url: &str) -> Self {
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    pub fn build_get_log_entries(&self, deployment_id: &str) -> HttpRequest {
        HttpRequest::get(&format!(
            "{}/deployments/{deployment_id}/log",
            self.base_url
        ))
    }

    pub fn build_get_log_entry_details(&self, deployment_id: &str, entry_id: &str) -> HttpRequest {
        HttpRequest::get(&format!(
            "{}/deployments/{deployment_id}/log/{entry_id}",
            self.base_url
        ))
    }

    pub fn parse_log_entries(&self, response: HttpResponse) -> Result<Vec<LogEntry>, ApiError> {
        check_status(&response, 200)?;
        serde_json::from_str(&response.body).map_err(|e| ApiError::Deserialization(e.to_string()))
    }

    /// Fetch the top-level log entries for a deployment, blocking until
    /// the response is in.
    pub fn get_log_entries(&self, deployment_id: &str) -> Result<Vec<LogEntry>, ApiError> {
        let req = self.build_get_log_entries(deployment_id);
        let response = transport::execute(req).map_err(ApiError::wrapped)?;
        self.parse_log_entries(response).map_err(ApiError::wrapped)
    }

    /// Fetch the detail entries nested under one log entry.
    pub fn get_log_entry_details(
        &self,
        deployment_id: &str,
        entry_id: &str,
    ) -> Result<Vec<LogEntry>, ApiError> {
        let req = self.build_get_log_entry_details(deployment_id, entry_id);
        let response = transport::execute(req).map_err(ApiError::wrapped)?;
        self.parse_log_entries(response).map_err(ApiError::wrapped)
    }
}

/// Map non-success status codes to the appropriate `ApiError` variant.
fn check_status(response: &HttpResponse, expected: u16) -> Result<(), ApiError> {
    if response.status == expected {
        return Ok(());
    }
    if response.status == 404 {
        return Err(ApiError::NotFound);
    }
    Err(ApiError::Http {
        status: response.status,
        body: response.body.clone(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;
    use crate::http::HttpMethod;

    fn client() -> DeploymentClient {
        DeploymentClient::new("http://localhost:3000")
    }

    #[test]
    fn build_get_log_entries_produces_correct_request() {
        let req = client().build_get_log_entries("d1");
        assert_eq!(req.method, HttpMethod::Get);
        assert_eq!(req.url, "http://localhost:3000/deployments/d1/log");
        assert!(req.body.is_none());
        assert!(req.headers.is_empty());
    }

    #[test]
    fn build_get_log_entry_details_produces_correct_request() {
        let req = client().build_get_log_entry_details("d1", "e7");
        assert_eq!(req.method, HttpMethod::Get);
        assert_eq!(req.url, "http://localhost:3000/deployments/d1/log/e7");
    }

    #[test]
    fn trailing_slash_is_stripped() {
        let client = DeploymentClient::new("http://localhost:3000/");
        let req = client.build_get_log_entries("d1");
        assert_eq!(req.url, "http://localhost:3000/deployments/d1/log");
    }

    #[test]
    fn parse_log_entries_success() {
        let response = HttpResponse {
            status: 200,
            body: r#"[{"id":"e1","message":"Build started"}]"#.to_string(),
        };
        let entries = client().parse_log_entries(response).unwrap();
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].message, "Build started");
        assert!(entries[0].details_url.is_none());
    }

    #[test]
    fn parse_log_entries_not_found() {
        let response = HttpResponse {
            status: 404,
            body: String::new(),
        };
        let err = client().parse_log_entries(response).unwrap_err();
        assert!(matches!(err, ApiError::NotFound));
    }

    #[test]
    fn parse_log_entries_unexpected_status() {
        let response = HttpResponse {
            status: 500,
            body: "internal error".to_string(),
        };
        let err = client().parse_log_entries(response).unwrap_err();
        assert!(matches!(err, ApiError::Http { status: 500, .. }));
    }

    #[test]
    fn parse_log_entries_bad_json() {
        let response = HttpResponse {
            status: 200,
            body: "not json".to_string(),
        };
        let err = client().parse_log_entries(response).unwrap_err();
        assert!(matches!(err, ApiError::Deserialization(_)));
    }

    #[test]
    fn get_log_entries_wraps_failures_once() {
        // Nothing listens on port 1, so the composite fails at the
        // transport and the error arrives wrapped one level.
        let client = DeploymentClient::new("http://127.0.0.1:1");
        let err = client.get_log_entries("d1").unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Wrapped);
        assert_eq!(err.unwrapped().kind(), ErrorKind::Transport);
    }
}
