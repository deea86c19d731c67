use actix_web::{http::StatusCode, HttpResponse, ResponseError};
use serde_json::json;

// Failures of the document store
#[derive(Debug, thiserror::Error)]
pub enum DbError {
    #[error("Document not found")]
    NotFound,

    #[error("Database connection is closed")]
    Closed,

    #[error("Database error: {0}")]
    Sqlite(#[from] rusqlite::Error),

    #[error("Document serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl DbError {
    pub fn is_not_found(&self) -> bool {
        matches!(self, DbError::NotFound)
    }
}

// Outcome of a failed reCAPTCHA check
#[derive(Debug, thiserror::Error)]
pub enum VerificationError {
    #[error("No verification token was supplied")]
    MissingToken,

    #[error("Verification request failed: {0}")]
    Transport(#[source] reqwest::Error),

    #[error("Verification service answered with status {0}")]
    Status(reqwest::StatusCode),

    #[error("Verification response could not be read: {0}")]
    Malformed(#[source] reqwest::Error),

    #[error("Verification denied ({})", .0.join(", "))]
    Denied(Vec<String>),
}

impl VerificationError {
    /// True when the service itself could not give an answer, as opposed to
    /// answering "no".
    pub fn is_service_failure(&self) -> bool {
        matches!(
            self,
            VerificationError::Transport(_)
                | VerificationError::Status(_)
                | VerificationError::Malformed(_)
        )
    }
}

/// Errors surfaced by the JSON routes. Every variant renders as `{"error": "..."}`.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    #[error("Restaurant doesn't exist!")]
    RestaurantNotFound,

    #[error("Invalid request body: {0}")]
    InvalidBody(String),

    #[error("Internal server error")]
    Storage(#[source] DbError),
}

impl From<DbError> for ApiError {
    fn from(err: DbError) -> Self {
        match err {
            DbError::NotFound => ApiError::RestaurantNotFound,
            other => ApiError::Storage(other),
        }
    }
}

impl ResponseError for ApiError {
    fn status_code(&self) -> StatusCode {
        match self {
            ApiError::RestaurantNotFound => StatusCode::NOT_FOUND,
            ApiError::InvalidBody(_) => StatusCode::BAD_REQUEST,
            ApiError::Storage(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_response(&self) -> HttpResponse {
        if let ApiError::Storage(err) = self {
            tracing::error!(error = %err, "Restaurant store failure");
        }
        HttpResponse::build(self.status_code()).json(json!({ "error": self.to_string() }))
    }
}
