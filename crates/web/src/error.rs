//! HTTP error responses

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use chessboard_core::MoveRejection;
use serde_json::json;
use thiserror::Error;
use tracing::debug;

#[derive(Error, Debug)]
pub enum AppError {
    /// Malformed square or coordinate in the request.
    #[error(transparent)]
    BadRequest(#[from] chessboard_core::Error),

    #[error(transparent)]
    Rejected(#[from] MoveRejection),

    #[error("template error: {0}")]
    Render(#[from] askama::Error),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = match self {
            AppError::BadRequest(_) => StatusCode::BAD_REQUEST,
            AppError::Rejected(_) => StatusCode::UNPROCESSABLE_ENTITY,
            AppError::Render(_) => StatusCode::INTERNAL_SERVER_ERROR,
        };
        debug!(%status, error = %self, "request refused");

        (status, Json(json!({ "error": self.to_string() }))).into_response()
    }
}
