// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// HTTP error mapping for the conversion endpoint.

use axum::extract::multipart::MultipartError;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Serialize;
use thiserror::Error;

use imprint_core::error::{ConversionError, InputError};

/// Everything the endpoint can answer with instead of a PDF.
#[derive(Debug, Error)]
pub enum ApiError {
    #[error(transparent)]
    Input(#[from] InputError),

    #[error(transparent)]
    Conversion(#[from] ConversionError),

    /// The multipart body itself could not be read.
    #[error("failed to read upload: {message}")]
    Multipart { status: StatusCode, message: String },

    #[error("internal error: {0}")]
    Internal(String),
}

impl ApiError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            Self::Input(_) => StatusCode::BAD_REQUEST,
            Self::Conversion(err) if err.is_client_error() => StatusCode::BAD_REQUEST,
            Self::Conversion(_) => StatusCode::INTERNAL_SERVER_ERROR,
            Self::Multipart { status, .. } => *status,
            Self::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Stable machine-readable code for the JSON body.
    pub fn code(&self) -> &'static str {
        match self {
            Self::Input(InputError::MissingFile) => "MISSING_FILE",
            Self::Input(InputError::EmptyFile) => "EMPTY_FILE",
            Self::Conversion(ConversionError::DecodeFailure(_)) => "DECODE_FAILED",
            Self::Conversion(ConversionError::EncodeFailure(_)) => "ENCODE_FAILED",
            Self::Multipart { .. } => "INVALID_MULTIPART",
            Self::Internal(_) => "INTERNAL_ERROR",
        }
    }
}

impl From<MultipartError> for ApiError {
    fn from(err: MultipartError) -> Self {
        Self::Multipart {
            status: err.status(),
            message: err.body_text(),
        }
    }
}

#[derive(Serialize)]
struct ErrorResponse {
    error: String,
    code: &'static str,
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        if status.is_server_error() {
            tracing::error!(error = %self, "Conversion request failed");
        } else {
            tracing::debug!(error = %self, %status, "Conversion request rejected");
        }

        let body = Json(ErrorResponse {
            error: self.to_string(),
            code: self.code(),
        });

        (status, body).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn input_errors_are_bad_request() {
        assert_eq!(
            ApiError::from(InputError::MissingFile).status_code(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            ApiError::from(InputError::EmptyFile).status_code(),
            StatusCode::BAD_REQUEST
        );
    }

    #[test]
    fn decode_failure_is_bad_request() {
        let err = ApiError::from(ConversionError::DecodeFailure("bad magic".into()));
        assert_eq!(err.status_code(), StatusCode::BAD_REQUEST);
        assert_eq!(err.code(), "DECODE_FAILED");
    }

    #[test]
    fn encode_failure_is_server_error() {
        let err = ApiError::from(ConversionError::EncodeFailure("no output".into()));
        assert_eq!(err.status_code(), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(err.code(), "ENCODE_FAILED");
    }

    #[test]
    fn multipart_keeps_extractor_status() {
        let err = ApiError::Multipart {
            status: StatusCode::PAYLOAD_TOO_LARGE,
            message: "length limit exceeded".into(),
        };
        assert_eq!(err.status_code(), StatusCode::PAYLOAD_TOO_LARGE);
        assert_eq!(err.into_response().status(), StatusCode::PAYLOAD_TOO_LARGE);
    }
}
