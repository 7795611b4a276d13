//! # HTTP Errors
//!
//! Handler failures rendered as HTML error pages. Form validation failures
//! are not errors here: handlers re-render the form instead.

use axum::extract::multipart::MultipartError;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use thiserror::Error;
use tracing::{error, warn};

use crate::blog::BlogError;
use crate::media::MediaError;
use crate::templates::error_page;

/// Result type for blog handlers
pub type HttpResult<T> = Result<T, HttpError>;

#[derive(Debug, Error)]
pub enum HttpError {
    /// No entry with this id
    #[error("Blog {0} not found")]
    EntryNotFound(u64),

    #[error("Request payload exceeds the configured limit")]
    PayloadTooLarge,

    #[error("Bad request: {0}")]
    BadRequest(String),

    /// The blog document could not be read or written
    #[error("Blog storage is unavailable: {0}")]
    Store(#[from] BlogError),

    /// An upload or snapshot could not be written
    #[error("Media storage failed: {0}")]
    Media(#[from] MediaError),
}

impl HttpError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            HttpError::EntryNotFound(_) => StatusCode::NOT_FOUND,
            HttpError::PayloadTooLarge => StatusCode::PAYLOAD_TOO_LARGE,
            HttpError::BadRequest(_) => StatusCode::BAD_REQUEST,
            HttpError::Store(_) => StatusCode::SERVICE_UNAVAILABLE,
            HttpError::Media(err) => {
                StatusCode::from_u16(err.status_code()).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR)
            }
        }
    }

    /// Message shown to the user; storage details stay in the logs
    fn public_message(&self) -> String {
        match self {
            HttpError::Store(_) => "Blog storage is unavailable. Please try again later.".to_string(),
            HttpError::Media(_) => "Saving a file failed.".to_string(),
            other => other.to_string(),
        }
    }
}

impl From<MultipartError> for HttpError {
    fn from(err: MultipartError) -> Self {
        if err.status() == StatusCode::PAYLOAD_TOO_LARGE {
            HttpError::PayloadTooLarge
        } else {
            HttpError::BadRequest(err.body_text())
        }
    }
}

impl IntoResponse for HttpError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        if status.is_server_error() {
            error!(status = status.as_u16(), error = %self, "request failed");
        } else {
            warn!(status = status.as_u16(), error = %self, "request rejected");
        }
        let body = error_page(status.as_u16(), &self.public_message());
        (status, body).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_codes() {
        assert_eq!(HttpError::EntryNotFound(9).status_code(), StatusCode::NOT_FOUND);
        assert_eq!(HttpError::PayloadTooLarge.status_code(), StatusCode::PAYLOAD_TOO_LARGE);
        assert_eq!(
            HttpError::BadRequest("x".into()).status_code(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            HttpError::from(BlogError::DocumentMissing("blogs.json".into())).status_code(),
            StatusCode::SERVICE_UNAVAILABLE
        );
        assert_eq!(
            HttpError::from(MediaError::IoError("disk".into())).status_code(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[test]
    fn test_store_details_not_exposed() {
        let err = HttpError::from(BlogError::Malformed("/secret/path/blogs.json".into()));
        assert!(!err.public_message().contains("/secret/path"));
    }

    #[test]
    fn test_into_response_status() {
        let response = HttpError::EntryNotFound(3).into_response();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }
}
