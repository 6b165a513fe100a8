//! Sistema de manejo de errores
//!
//! Este módulo define todos los tipos de errores del sistema
//! y su conversión a respuestas HTTP apropiadas.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::clients::UpstreamError;
use crate::repositories::StoreError;

/// Errores principales de la aplicación
#[derive(Error, Debug)]
pub enum AppError {
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("Validation error: {0}")]
    Validation(#[from] validator::ValidationErrors),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Bad request: {0}")]
    BadRequest(String),

    #[error("Empty aggregate: {0}")]
    EmptyAggregate(String),

    #[error("Upstream error: {0}")]
    Upstream(String),

    #[error("Upstream timeout: {0}")]
    UpstreamTimeout(String),

    #[error("Internal server error: {0}")]
    Internal(String),
}

/// Cuerpo de error uniforme: {timestamp, status, error, message}
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ErrorResponse {
    pub timestamp: DateTime<Utc>,
    pub status: u16,
    pub error: String,
    pub message: String,
}

impl ErrorResponse {
    pub fn new(status: StatusCode, message: impl Into<String>) -> Self {
        Self {
            timestamp: Utc::now(),
            status: status.as_u16(),
            error: status.canonical_reason().unwrap_or("Unknown").to_string(),
            message: message.into(),
        }
    }
}

impl AppError {
    pub fn status(&self) -> StatusCode {
        match self {
            AppError::Database(_) | AppError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
            AppError::Validation(_) | AppError::BadRequest(_) => StatusCode::BAD_REQUEST,
            AppError::NotFound(_) | AppError::EmptyAggregate(_) => StatusCode::NOT_FOUND,
            AppError::Upstream(_) => StatusCode::BAD_GATEWAY,
            AppError::UpstreamTimeout(_) => StatusCode::GATEWAY_TIMEOUT,
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status();
        let message = match self {
            AppError::Database(e) => {
                log::error!("❌ Database error: {}", e);
                "An error occurred while accessing the database".to_string()
            }
            AppError::Validation(e) => {
                log::warn!("Validation error: {}", e);
                e.to_string()
            }
            AppError::NotFound(msg) => {
                log::debug!("Resource not found: {}", msg);
                msg
            }
            AppError::BadRequest(msg) => {
                log::warn!("Bad request: {}", msg);
                msg
            }
            AppError::EmptyAggregate(msg) => msg,
            AppError::Upstream(msg) => {
                log::error!("❌ Upstream error: {}", msg);
                format!("Upstream service failure: {}", msg)
            }
            AppError::UpstreamTimeout(msg) => {
                log::error!("⏱️ Upstream timeout: {}", msg);
                format!("Upstream service timed out: {}", msg)
            }
            AppError::Internal(msg) => {
                log::error!("❌ Internal error: {}", msg);
                "An unexpected error occurred".to_string()
            }
        };

        (status, Json(ErrorResponse::new(status, message))).into_response()
    }
}

impl From<StoreError> for AppError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::Database(e) => AppError::Database(e),
            StoreError::Corrupt(msg) => AppError::Internal(msg),
        }
    }
}

impl From<UpstreamError> for AppError {
    fn from(err: UpstreamError) -> Self {
        match err {
            UpstreamError::NotFound(msg) => AppError::NotFound(msg),
            UpstreamError::Timeout(_) => AppError::UpstreamTimeout(err.to_string()),
            other => AppError::Upstream(other.to_string()),
        }
    }
}

/// Resultado tipado para operaciones que pueden fallar
pub type AppResult<T> = Result<T, AppError>;

/// Función helper para crear errores de recurso no encontrado
pub fn not_found_error(resource: &str, id: impl std::fmt::Display) -> AppError {
    AppError::NotFound(format!("{} with id '{}' not found", resource, id))
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::to_bytes;

    #[tokio::test]
    async fn test_error_body_shape() {
        let response = not_found_error("Vehicle", 12).into_response();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);

        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let body: ErrorResponse = serde_json::from_slice(&bytes).unwrap();
        assert_eq!(body.status, 404);
        assert_eq!(body.error, "Not Found");
        assert_eq!(body.message, "Vehicle with id '12' not found");
    }

    #[test]
    fn test_upstream_mapping() {
        assert_eq!(
            AppError::from(UpstreamError::NotFound("vehicle 3".into())).status(),
            StatusCode::NOT_FOUND
        );
        assert_eq!(
            AppError::from(UpstreamError::Transport("connection refused".into())).status(),
            StatusCode::BAD_GATEWAY
        );
        assert_eq!(
            AppError::from(UpstreamError::Timeout(std::time::Duration::from_secs(1))).status(),
            StatusCode::GATEWAY_TIMEOUT
        );
    }

    #[test]
    fn test_empty_aggregate_is_not_found() {
        assert_eq!(
            AppError::EmptyAggregate("No vehicles in collection".into()).status(),
            StatusCode::NOT_FOUND
        );
    }
}
