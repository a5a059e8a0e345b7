use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;
use tracing::error;

use crate::config::ConfigError;
use crate::meals::MealStoreError;

/// Anything that keeps the service from starting.
#[derive(Debug, Error)]
pub enum StartupError {
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error("open database connection: {0}")]
    Connect(#[source] sqlx::Error),
    #[error("database did not answer ping: {0}")]
    Ping(#[source] sqlx::Error),
}

#[derive(Debug, Error)]
pub enum ApiError {
    #[error("{0}")]
    NotFound(String),
    #[error("{0}")]
    BadRequest(String),
    #[error("{0}")]
    Conflict(String),
    #[error("internal error: {0}")]
    Internal(String),
}

impl From<MealStoreError> for ApiError {
    fn from(err: MealStoreError) -> Self {
        match err {
            MealStoreError::InvalidMealId => ApiError::BadRequest(err.to_string()),
            MealStoreError::NoMealFound => ApiError::NotFound(err.to_string()),
            MealStoreError::DuplicateId(_) => ApiError::Conflict(err.to_string()),
            MealStoreError::Database(_) => ApiError::Internal(err.to_string()),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            ApiError::NotFound(msg) => (StatusCode::NOT_FOUND, msg),
            ApiError::BadRequest(msg) => (StatusCode::BAD_REQUEST, msg),
            ApiError::Conflict(msg) => (StatusCode::CONFLICT, msg),
            ApiError::Internal(msg) => {
                error!(error = %msg, "request failed");
                (StatusCode::INTERNAL_SERVER_ERROR, "internal server error".into())
            }
        };
        (status, Json(json!({ "error": message }))).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn store_errors_map_to_client_statuses() {
        let cases = [
            (MealStoreError::InvalidMealId, StatusCode::BAD_REQUEST),
            (MealStoreError::NoMealFound, StatusCode::NOT_FOUND),
            (MealStoreError::DuplicateId("m1".into()), StatusCode::CONFLICT),
            (
                MealStoreError::Database(sqlx::Error::PoolTimedOut),
                StatusCode::INTERNAL_SERVER_ERROR,
            ),
        ];
        for (err, status) in cases {
            assert_eq!(ApiError::from(err).into_response().status(), status);
        }
    }

    #[tokio::test]
    async fn internal_errors_hide_backend_detail() {
        let resp = ApiError::from(MealStoreError::Database(sqlx::Error::PoolTimedOut)).into_response();
        let body = axum::body::to_bytes(resp.into_body(), usize::MAX).await.unwrap();
        let text = String::from_utf8(body.to_vec()).unwrap();
        assert!(text.contains("internal server error"));
        assert!(!text.contains("pool"));
    }
}
