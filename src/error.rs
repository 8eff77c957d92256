//! API error types with HTTP status code mapping.
//!
//! [`ApiError`] is the central error type for the request handlers. Each
//! variant maps to exactly one HTTP status code. Error responses carry the
//! bare status and no body; the detail goes to the server log.
//!
//! # Status mapping
//!
//! | Variant            | HTTP Status               |
//! |--------------------|---------------------------|
//! | `MalformedBody`    | 400 Bad Request           |
//! | `ExtraPathSegment` | 400 Bad Request           |
//! | `InsertFailed`     | 400 Bad Request           |
//! | `InvalidId`        | 404 Not Found             |
//! | `Absent`           | 500 Internal Server Error |
//! | `Store`            | 500 Internal Server Error |
//! | `Encode`           | 500 Internal Server Error |

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};

use crate::domain::EmployeeId;
use crate::persistence::StoreError;

/// Handler-level failure.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    /// The request body is not a valid employee JSON document.
    #[error("malformed request body: {0}")]
    MalformedBody(#[source] serde_json::Error),

    /// The item path carries more than one trailing segment.
    #[error("unexpected path segments: {0:?}")]
    ExtraPathSegment(String),

    /// The trailing path segment is not an integer.
    #[error("invalid employee id: {0:?}")]
    InvalidId(String),

    /// Inserting a new employee failed. Reported as a client error since
    /// the usual cause is a duplicate id.
    #[error("insert failed: {0}")]
    InsertFailed(#[source] StoreError),

    /// No employee matched the requested id.
    ///
    /// Reported as 500 rather than 404; existing clients depend on this.
    #[error("employee {0} not found")]
    Absent(EmployeeId),

    /// Any other store failure.
    #[error("store error: {0}")]
    Store(#[from] StoreError),

    /// A response body could not be encoded.
    #[error("response encoding failed: {0}")]
    Encode(#[source] serde_json::Error),
}

impl ApiError {
    /// Returns the HTTP status code for this variant.
    #[must_use]
    pub const fn status_code(&self) -> StatusCode {
        match self {
            Self::MalformedBody(_) | Self::ExtraPathSegment(_) | Self::InsertFailed(_) => {
                StatusCode::BAD_REQUEST
            }
            Self::InvalidId(_) => StatusCode::NOT_FOUND,
            Self::Absent(_) | Self::Store(_) | Self::Encode(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        if status.is_server_error() {
            tracing::error!(error = %self, status = status.as_u16(), "request failed");
        } else {
            tracing::warn!(error = %self, status = status.as_u16(), "request rejected");
        }
        status.into_response()
    }
}
