//! Blocking HTTP assertion helpers for tests against a running
//! deployment-management service.
//!
//! # Overview
//! The `assert` module is the surface tests consume: it issues one
//! blocking HTTP request per call and panics with a descriptive
//! diagnostic when an expectation fails, so failures land in the test
//! harness unchanged.
//!
//! # Design
//! - Requests and responses are plain data (`http`); the round-trip
//!   lives in `transport`, one fresh agent per call.
//! - `DeploymentClient` is stateless and splits each operation into
//!   `build_*` / parse halves, with blocking composites on top.
//! - Errors carry a kind tag and an explicit one-level unwrap for
//!   failures that crossed a blocking-join boundary.
//! - DTOs are defined independently from the mock-server crate; the
//!   live integration test catches schema drift.

pub mod assert;
pub mod client;
pub mod error;
pub mod http;
pub mod transport;
pub mod types;

pub use assert::{
    throws_message, throws_unwrapped, verify_log_output, verify_url, verify_url_with_credentials,
    UrlCheck, DEFAULT_PAGE_CONTENT,
};
pub use client::DeploymentClient;
pub use error::{ApiError, ErrorKind};
pub use http::{HttpMethod, HttpRequest, HttpResponse};
pub use types::{Credentials, LogEntry};
