//! Handler errors and their HTTP mapping.
//!
//! Every variant renders as `{"error": "<message>"}`:
//!
//! | Variant | Status |
//! |---|---|
//! | `InvalidQuery`, `MissingParameter`, `InvalidUid`, `UnsupportedRegion` | 400 |
//! | `UpstreamAuth`, `Encoding` | 500 |
//! | `UpstreamRequest` | 502 |

use axum::Json;
use axum::extract::rejection::QueryRejection;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use backpack_core::EncodingError;
use serde::Serialize;
use thiserror::Error;

use crate::upstream::{ForwardError, TokenError};

#[derive(Debug, Error)]
pub enum AppError {
    #[error(transparent)]
    InvalidQuery(#[from] QueryRejection),

    #[error("Missing '{0}' parameter")]
    MissingParameter(&'static str),

    #[error("Invalid UID format")]
    InvalidUid,

    #[error("Unsupported region: {0}")]
    UnsupportedRegion(String),

    #[error("Failed to obtain upstream token: {0}")]
    UpstreamAuth(#[from] TokenError),

    #[error("Failed to contact upstream server: {0}")]
    UpstreamRequest(#[from] ForwardError),

    #[error("Failed to encode player data: {0}")]
    Encoding(#[from] EncodingError),
}

#[derive(Debug, Serialize)]
pub struct ErrorBody {
    pub error: String,
}

impl AppError {
    pub fn status(&self) -> StatusCode {
        match self {
            Self::InvalidQuery(_)
            | Self::MissingParameter(_)
            | Self::InvalidUid
            | Self::UnsupportedRegion(_) => StatusCode::BAD_REQUEST,
            Self::UpstreamAuth(_) | Self::Encoding(_) => StatusCode::INTERNAL_SERVER_ERROR,
            Self::UpstreamRequest(_) => StatusCode::BAD_GATEWAY,
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status();

        if status.is_server_error() {
            tracing::error!(error = %self, status = status.as_u16(), "Request failed");
        } else {
            tracing::debug!(error = %self, status = status.as_u16(), "Rejected request");
        }

        (
            status,
            Json(ErrorBody {
                error: self.to_string(),
            }),
        )
            .into_response()
    }
}
