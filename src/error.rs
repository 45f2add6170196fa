use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;

use crate::validate::FieldErrors;

#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("Authentication required")]
    Unauthorized,

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Validation failed")]
    Validation(FieldErrors),

    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("Internal error: {0}")]
    Internal(#[from] anyhow::Error),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, body) = match self {
            // Fixed body, matches what the mobile client expects verbatim.
            AppError::Unauthorized => (
                StatusCode::UNAUTHORIZED,
                json!({
                    "error": "Unauthorized",
                    "message": "Anda tidak memiliki apiKey",
                    "status": 401,
                }),
            ),
            AppError::NotFound(message) => {
                (StatusCode::NOT_FOUND, json!({ "message": message }))
            }
            AppError::Validation(errors) => (
                StatusCode::UNPROCESSABLE_ENTITY,
                json!({
                    "message": "Validation failed",
                    "errors": errors,
                }),
            ),
            AppError::Database(e) => {
                tracing::error!(error = %e, "Database error");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    json!({ "message": "Internal server error" }),
                )
            }
            AppError::Internal(e) => {
                tracing::error!(error = %e, "Internal error");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    json!({ "message": "Internal server error" }),
                )
            }
        };

        (status, Json(body)).into_response()
    }
}

pub type AppResult<T> = Result<T, AppError>;

#[cfg(test)]
mod tests {
    use super::*;
    use http_body_util::BodyExt;

    async fn body_json(err: AppError) -> (StatusCode, serde_json::Value) {
        let response = err.into_response();
        let status = response.status();
        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        (status, serde_json::from_slice(&bytes).unwrap())
    }

    #[tokio::test]
    async fn test_unauthorized_body_is_fixed() {
        let (status, body) = body_json(AppError::Unauthorized).await;
        assert_eq!(status, StatusCode::UNAUTHORIZED);
        assert_eq!(
            body,
            json!({
                "error": "Unauthorized",
                "message": "Anda tidak memiliki apiKey",
                "status": 401,
            })
        );
    }

    #[tokio::test]
    async fn test_not_found_body() {
        let (status, body) = body_json(AppError::NotFound("mood not found".into())).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body, json!({ "message": "mood not found" }));
    }

    #[tokio::test]
    async fn test_validation_body_carries_field_errors() {
        let mut errors = FieldErrors::new();
        errors.insert("title".into(), vec!["Judul minimal harus 3 karakter".into()]);
        let (status, body) = body_json(AppError::Validation(errors)).await;
        assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
        assert_eq!(body["message"], "Validation failed");
        assert_eq!(body["errors"]["title"][0], "Judul minimal harus 3 karakter");
    }

    #[tokio::test]
    async fn test_database_error_hides_detail() {
        let (status, body) = body_json(AppError::Database(sqlx::Error::RowNotFound)).await;
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body, json!({ "message": "Internal server error" }));
    }
}
