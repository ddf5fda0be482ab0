// Route exports
pub mod eligibility;
pub mod error;

use actix_web::{error::UrlencodedError, web, HttpRequest};

pub use eligibility::{AppState, Presentation};
pub use error::AppError;

pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.app_data(web::FormConfig::default().error_handler(handle_form_payload_error));
    eligibility::configure(cfg);
}

/// Undecodable form bodies re-render the form like any other invalid input
pub fn handle_form_payload_error(err: UrlencodedError, req: &HttpRequest) -> actix_web::Error {
    tracing::info!("Form payload error on {}: {}", req.path(), err);
    AppError::Validation("We could not read the submitted form. Please try again.".to_string()).into()
}
