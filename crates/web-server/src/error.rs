use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use fred_client::ApiError;
use serde_json::json;
use thiserror::Error;
use transforms::TransformError;

/// A failure confined to a single dashboard panel.
///
/// These never become HTTP errors: the panel carries the message and the
/// remaining panels still render.
#[derive(Error, Debug)]
pub enum PanelError {
    #[error(transparent)]
    Api(#[from] ApiError),

    #[error(transparent)]
    Transform(#[from] TransformError),
}

/// A request-level failure, converted into an HTTP response.
#[derive(Error, Debug)]
pub enum AppError {
    #[error("Bad request: {0}")]
    BadRequest(String),
}

/// Converts our custom `AppError` into an HTTP response.
impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, error_message) = match self {
            AppError::BadRequest(message) => (StatusCode::BAD_REQUEST, message),
        };

        let body = Json(json!({ "error": error_message }));
        (status, body).into_response()
    }
}
