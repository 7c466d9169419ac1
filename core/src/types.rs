//! Domain DTOs for the deployment-management service.
//!
//! # Design
//! These types mirror the service's wire schema but are defined
//! independently from the mock-server crate; the live integration test
//! catches any schema drift between the two. Ids are opaque strings on
//! this wire (deployment ids are commit-like hashes, entry ids are
//! whatever the service mints), so no structured id type is imposed.

use serde::{Deserialize, Serialize};

/// A single log entry attached to a deployment.
///
/// `details_url` is set when the entry has a nested detail resource;
/// the helpers treat it purely as a presence flag and fetch details by
/// entry id.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct LogEntry {
    pub id: String,
    pub message: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub details_url: Option<String>,
}

/// Basic credentials attached to a request as an `Authorization` header.
#[derive(Debug, Clone)]
pub struct Credentials {
    pub username: String,
    pub password: String,
}

impl Credentials {
    pub fn new(username: &str, password: &str) -> Self {
        Self {
            username: username.to_string(),
            password: password.to_string(),
        }
    }
}
