/// Server error types
use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use datastore_client::DatastoreError;
use serde_json::json;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, ServerError>;

#[derive(Debug, Error)]
pub enum ServerError {
    #[error("Not authenticated: {0}")]
    Unauthenticated(String),

    #[error("Not authorized: {0}")]
    Forbidden(String),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    #[error("Datastore error: {0}")]
    Datastore(#[from] DatastoreError),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("JWT error: {0}")]
    Jwt(#[from] jsonwebtoken::errors::Error),
}

impl IntoResponse for ServerError {
    fn into_response(self) -> Response {
        // The wire contract predates this implementation: auth, lookup
        // and argument failures all surface as 400, while a valid caller
        // hitting someone else's playlist gets 401.
        let (status, error_message) = match self {
            ServerError::Unauthenticated(msg) => (StatusCode::BAD_REQUEST, msg),
            ServerError::NotFound(msg) => (StatusCode::BAD_REQUEST, msg),
            ServerError::InvalidArgument(msg) => (StatusCode::BAD_REQUEST, msg),
            ServerError::Forbidden(msg) => (StatusCode::UNAUTHORIZED, msg),
            ServerError::Jwt(ref e) => {
                tracing::warn!("JWT error: {:?}", e);
                (StatusCode::BAD_REQUEST, "Invalid token".to_string())
            }
            ServerError::Datastore(ref e) => {
                tracing::error!("Datastore error: {:?}", e);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Datastore error".to_string(),
                )
            }
            ServerError::Config(ref msg) => {
                tracing::error!("Config error: {}", msg);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Configuration error".to_string(),
                )
            }
        };

        let body = Json(json!({
            "error": error_message,
        }));

        (status, body).into_response()
    }
}
