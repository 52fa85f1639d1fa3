//! Error classification for calls to the catalog service.

use reqwest::StatusCode;

/// Message used when an error body has no usable `detail`.
pub const GENERIC_FAILURE: &str = "API request failed";
/// Message used when an error body is not JSON at all.
pub const UNREADABLE_FAILURE: &str = "Unknown error";

/// Why a call to the catalog service did not produce a value.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    /// No session is stored; the request was never sent.
    #[error("No authentication token found")]
    Unauthenticated,
    /// The service rejected the bearer token. The stored session has been cleared.
    #[error("Session expired. Please login again.")]
    SessionExpired,
    /// Any other non-2xx response.
    #[error("{message}")]
    RequestFailed { status: u16, message: String },
    /// The request could not be delivered or the response could not be read.
    #[error("network error: {0}")]
    Network(#[from] reqwest::Error),
    /// A 2xx response whose body did not match the expected shape.
    #[error("unexpected response body: {0}")]
    Decode(String),
}

impl ApiError {
    pub fn request_failed(status: StatusCode, message: impl Into<String>) -> Self {
        Self::RequestFailed {
            status: status.as_u16(),
            message: message.into(),
        }
    }

    /// Whether the caller should send the user back to the login screen.
    pub fn requires_login(&self) -> bool {
        matches!(self, Self::Unauthenticated | Self::SessionExpired)
    }

    pub fn status(&self) -> Option<u16> {
        match self {
            Self::RequestFailed { status, .. } => Some(*status),
            Self::SessionExpired => Some(StatusCode::UNAUTHORIZED.as_u16()),
            Self::Network(e) => e.status().map(|s| s.as_u16()),
            _ => None,
        }
    }
}
