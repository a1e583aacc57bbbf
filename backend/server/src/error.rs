use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde_json::json;
use thiserror::Error;
use tracing::error;

use crate::{baas::BaasError, checkout::CheckoutError};

#[derive(Error, Debug)]
pub enum AppError {
    #[error("Malformed payload: {0}")]
    MalformedPayload(String),

    #[error("Enter an address or postal code")]
    EmptyInput,

    #[error("Sign in required")]
    Unauthorized,

    #[error("Not allowed")]
    Forbidden,

    #[error("Not found: {0}")]
    NotFound(String),

    #[error(transparent)]
    Checkout(#[from] CheckoutError),

    #[error("Upstream error: {0}")]
    Upstream(String),

    #[error("Internal error: {0}")]
    InternalError(#[from] Box<dyn std::error::Error + Send + Sync>),
}

impl From<BaasError> for AppError {
    fn from(err: BaasError) -> Self {
        match err.status() {
            Some(StatusCode::BAD_REQUEST) => AppError::MalformedPayload(err.to_string()),
            Some(StatusCode::UNAUTHORIZED) => AppError::Unauthorized,
            Some(StatusCode::FORBIDDEN) => AppError::Forbidden,
            Some(StatusCode::NOT_FOUND) => AppError::NotFound(err.to_string()),
            Some(StatusCode::UNPROCESSABLE_ENTITY) => AppError::MalformedPayload(err.to_string()),
            _ => AppError::Upstream(err.to_string()),
        }
    }
}

impl AppError {
    /// Credential checks answer 400 for a bad password or token, which means "sign in" here.
    pub fn from_auth(err: BaasError) -> Self {
        match err.status() {
            Some(StatusCode::BAD_REQUEST | StatusCode::UNAUTHORIZED) => AppError::Unauthorized,
            _ => err.into(),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = match self {
            AppError::MalformedPayload { .. } => StatusCode::BAD_REQUEST,
            AppError::EmptyInput => StatusCode::UNPROCESSABLE_ENTITY,
            AppError::Unauthorized => StatusCode::UNAUTHORIZED,
            AppError::Forbidden => StatusCode::FORBIDDEN,
            AppError::NotFound { .. } => StatusCode::NOT_FOUND,
            AppError::Checkout(CheckoutError::NetworkMismatch { .. }) => StatusCode::CONFLICT,
            AppError::Checkout { .. } => StatusCode::BAD_REQUEST,
            AppError::Upstream { .. } => StatusCode::BAD_GATEWAY,
            AppError::InternalError { .. } => StatusCode::INTERNAL_SERVER_ERROR,
        };

        if status.is_server_error() {
            error!("{self}");
        }

        (status, Json(json!({ "error": self.to_string() }))).into_response()
    }
}
