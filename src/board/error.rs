use axum::{http::StatusCode, response::IntoResponse, Json};
use log::error;

use crate::board::repository::RepositoryError;

#[derive(Debug, thiserror::Error)]
pub enum BoardError {
    #[error("{entity} with ID {id} not found")]
    NotFound { entity: &'static str, id: i32 },
    #[error("Cannot delete canvas with associated cards")]
    CannotDeleteWithDependents,
    #[error("Canvas with ID {0} does not exist")]
    InvalidReference(i32),
    #[error("{0}")]
    Validation(String),
    #[error("Storage error: {0}")]
    Storage(#[from] RepositoryError),
}

pub type BoardResult<T> = Result<T, BoardError>;

impl BoardError {
    pub fn canvas_not_found(id: i32) -> Self {
        Self::NotFound {
            entity: "Canvas",
            id,
        }
    }

    pub fn card_not_found(id: i32) -> Self {
        Self::NotFound { entity: "Card", id }
    }

    pub fn status(&self) -> StatusCode {
        match self {
            Self::NotFound { .. } => StatusCode::NOT_FOUND,
            Self::CannotDeleteWithDependents | Self::InvalidReference(_) | Self::Validation(_) => {
                StatusCode::BAD_REQUEST
            }
            Self::Storage(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

/// JSON error body shared by every failing route.
pub fn error_body(status: StatusCode, message: &str) -> serde_json::Value {
    serde_json::json!({
        "statusCode": status.as_u16(),
        "message": message,
        "error": status.canonical_reason().unwrap_or("Error"),
    })
}

impl IntoResponse for BoardError {
    fn into_response(self) -> axum::response::Response {
        let status = self.status();
        let message = match &self {
            Self::Storage(e) => {
                error!("Storage failure while serving request: {e}");
                "Internal server error".to_string()
            }
            other => other.to_string(),
        };
        (status, Json(error_body(status, &message))).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    async fn response_json(err: BoardError) -> (StatusCode, serde_json::Value) {
        let response = err.into_response();
        let status = response.status();
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        (status, serde_json::from_slice(&bytes).unwrap())
    }

    #[tokio::test]
    async fn test_storage_error_hides_detail() {
        let err = BoardError::Storage(RepositoryError::Query("pg secret detail".to_string()));
        let (status, body) = response_json(err).await;

        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(
            body,
            serde_json::json!({
                "statusCode": 500,
                "message": "Internal server error",
                "error": "Internal Server Error"
            })
        );
        assert!(!body.to_string().contains("pg secret detail"));
    }

    #[tokio::test]
    async fn test_client_errors_keep_their_message() {
        let (status, body) = response_json(BoardError::card_not_found(12)).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body["message"], "Card with ID 12 not found");
        assert_eq!(body["error"], "Not Found");

        let (status, body) = response_json(BoardError::InvalidReference(5)).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["statusCode"], 400);
    }
}
