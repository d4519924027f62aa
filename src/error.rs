use actix_web::{http::StatusCode, HttpResponse, ResponseError};
use serde_json::json;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, AppError>;

#[derive(Debug, Error)]
pub enum AppError {
    /// A lookup by id did not resolve to a live row.
    #[error("{0}")]
    NotFound(&'static str),

    /// A write touched no rows where one was expected.
    #[error("{0}")]
    StoreFailure(&'static str),

    #[error("{0}")]
    InvalidInput(&'static str),

    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),
}

// Clients only ever see `{ "msg": ... }` with a 500, whatever the kind.
impl ResponseError for AppError {
    fn status_code(&self) -> StatusCode {
        StatusCode::INTERNAL_SERVER_ERROR
    }

    fn error_response(&self) -> HttpResponse {
        log::error!("Request failed: {}", self);
        HttpResponse::build(self.status_code()).json(json!({ "msg": self.to_string() }))
    }
}
