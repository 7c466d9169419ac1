//! Error types for the deployment-management client.
//!
//! # Design
//! `NotFound` gets a dedicated variant because tests frequently
//! distinguish "the resource does not exist" from "the server returned
//! an unexpected status." `Wrapped` marks errors that crossed the
//! blocking-join boundary of the client's composite operations; it
//! carries exactly one inner error, peeled by [`ApiError::unwrapped`]
//! so assertions can classify the underlying failure by kind.

use std::fmt;

/// Errors returned by the transport and the deployment client.
#[derive(Debug)]
pub enum ApiError {
    /// The HTTP call itself failed (connection refused, TLS failure).
    Transport(String),

    /// The server returned 404 — the requested resource does not exist.
    NotFound,

    /// The server returned a non-2xx status other than 404.
    Http { status: u16, body: String },

    /// The response body could not be deserialized into the expected type.
    Deserialization(String),

    /// A failure that crossed a blocking-join boundary, wrapping the
    /// underlying error one level.
    Wrapped(Box<ApiError>),
}

/// Tag identifying an [`ApiError`] variant without its payload.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    Transport,
    NotFound,
    Http,
    Deserialization,
    Wrapped,
}

impl ApiError {
    /// The kind tag for this error.
    pub fn kind(&self) -> ErrorKind {
        match self {
            ApiError::Transport(_) => ErrorKind::Transport,
            ApiError::NotFound => ErrorKind::NotFound,
            ApiError::Http { .. } => ErrorKind::Http,
            ApiError::Deserialization(_) => ErrorKind::Deserialization,
            ApiError::Wrapped(_) => ErrorKind::Wrapped,
        }
    }

    /// Peel exactly one `Wrapped` layer; identity for anything else.
    pub fn unwrapped(self) -> ApiError {
        match self {
            ApiError::Wrapped(inner) => *inner,
            other => other,
        }
    }

    /// Wrap this error one level, marking a blocking-join boundary.
    pub fn wrapped(self) -> ApiError {
        ApiError::Wrapped(Box::new(self))
    }
}

impl fmt::Display for ApiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ApiError::Transport(msg) => write!(f, "transport error: {msg}"),
            ApiError::NotFound => write!(f, "resource not found"),
            ApiError::Http { status, body } => {
                write!(f, "HTTP {status}: {body}")
            }
            ApiError::Deserialization(msg) => {
                write!(f, "deserialization failed: {msg}")
            }
            ApiError::Wrapped(inner) => {
                write!(f, "operation failed: {inner}")
            }
        }
    }
}

impl std::error::Error for ApiError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ApiError::Wrapped(inner) => Some(inner.as_ref()),
            _ => None,
        }
    }
}
