use actix_web::error::BlockingError;
use actix_web::http::header::ContentType;
use actix_web::http::StatusCode;
use actix_web::{HttpResponse, ResponseError};
use thiserror::Error;

use crate::core::LoadError;
use crate::services::html;

/// Shown for every internal failure; details go to the log only
pub const GENERIC_ERROR_MESSAGE: &str =
    "We could not check your eligibility right now. Please try again later.";

/// Ways a submission can fail, converted into a page only at the HTTP boundary
#[derive(Debug, Error)]
pub enum AppError {
    /// The applicant's input was rejected; the form is shown again with this message
    #[error("{0}")]
    Validation(String),

    #[error("Failed to load eligibility rules: {0}")]
    Rules(#[from] LoadError),

    #[error("Background task failed: {0}")]
    Blocking(#[from] BlockingError),
}

impl ResponseError for AppError {
    fn status_code(&self) -> StatusCode {
        match self {
            AppError::Validation(_) => StatusCode::BAD_REQUEST,
            AppError::Rules(_) | AppError::Blocking(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_response(&self) -> HttpResponse {
        let body = match self {
            AppError::Validation(message) => html::index_page(Some(message)),
            other => {
                tracing::error!("Eligibility request failed: {}", other);
                html::error_page(GENERIC_ERROR_MESSAGE)
            }
        };

        HttpResponse::build(self.status_code())
            .content_type(ContentType::html())
            .body(body)
    }
}
