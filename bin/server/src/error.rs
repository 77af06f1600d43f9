//! HTTP error mapping for server routes.
//!
//! Full failure detail is logged server-side; the response body carries a
//! single `{"error": ...}` message.

use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use deskrelay_provision::ProvisionError;
use serde_json::json;

/// A registration failure as the HTTP caller sees it.
#[derive(Debug)]
pub struct ApiError(ProvisionError);

impl From<ProvisionError> for ApiError {
    fn from(e: ProvisionError) -> Self {
        Self(e)
    }
}

impl ApiError {
    fn status(&self) -> StatusCode {
        match self.0 {
            ProvisionError::Validation { .. } => StatusCode::BAD_REQUEST,
            ProvisionError::ContactStore(_) | ProvisionError::Directory(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        if status.is_server_error() {
            tracing::error!(error = %self.0, "registration failed");
        }
        (status, Json(json!({ "error": self.0.to_string() }))).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use deskrelay_directory::DirectoryError;

    #[test]
    fn validation_maps_to_bad_request() {
        let err = ApiError::from(ProvisionError::Validation { field: "email" });
        assert_eq!(err.status(), StatusCode::BAD_REQUEST);
    }

    #[test]
    fn upstream_failures_map_to_internal_error() {
        let err = ApiError::from(ProvisionError::Directory(DirectoryError::Timeout));
        assert_eq!(err.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[test]
    fn response_body_is_an_error_object() {
        let response =
            ApiError::from(ProvisionError::Validation { field: "email" }).into_response();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }
}
