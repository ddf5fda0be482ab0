use actix_web::body::BoxBody;
use actix_web::http::header::{ContentDisposition, ContentType, DispositionParam, DispositionType};
use actix_web::{web, HttpRequest, HttpResponse, Responder};
use std::path::PathBuf;
use std::sync::Arc;

use crate::config::Settings;
use crate::core::{load_rules, match_schemes};
use crate::models::{describe_errors, EligibilityForm, HealthResponse, OutputFormat, SchemeListing};
use crate::routes::error::AppError;
use crate::services::{attachment_file_name, html, DocumentRenderer, PdfRenderer};

/// Application state shared across all handlers
#[derive(Clone)]
pub struct AppState {
    pub rules_path: PathBuf,
    pub renderer: Arc<dyn DocumentRenderer>,
}

impl AppState {
    pub fn new(rules_path: impl Into<PathBuf>, renderer: Arc<dyn DocumentRenderer>) -> Self {
        Self {
            rules_path: rules_path.into(),
            renderer,
        }
    }

    /// State for the configured rule source with the PDF renderer
    pub fn from_settings(settings: &Settings) -> Self {
        Self::new(settings.rules.path.clone(), Arc::new(PdfRenderer))
    }
}

/// Configure the form and health routes
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::resource("/")
            .route(web::get().to(index))
            .route(web::post().to(submit)),
    )
    .route("/health", web::get().to(health_check));
}

/// A successful submission, ready to be sent
#[derive(Debug)]
pub enum Presentation {
    /// HTML page listing the matched schemes
    Listing(SchemeListing),
    /// Downloadable document
    Document {
        file_name: String,
        content_type: &'static str,
        bytes: Vec<u8>,
    },
}

impl Responder for Presentation {
    type Body = BoxBody;

    fn respond_to(self, _req: &HttpRequest) -> HttpResponse<Self::Body> {
        match self {
            Presentation::Listing(listing) => HttpResponse::Ok()
                .content_type(ContentType::html())
                .body(html::results_page(&listing)),
            Presentation::Document {
                file_name,
                content_type,
                bytes,
            } => HttpResponse::Ok()
                .content_type(content_type)
                .insert_header(ContentDisposition {
                    disposition: DispositionType::Attachment,
                    parameters: vec![DispositionParam::Filename(file_name)],
                })
                .body(bytes),
        }
    }
}

/// Empty form
///
/// GET /
async fn index() -> HttpResponse {
    HttpResponse::Ok()
        .content_type(ContentType::html())
        .body(html::index_page(None))
}

/// Process a form submission
///
/// POST /
///
/// Form fields: `name`, `age`, `income`, `employment`, `residency` and an
/// optional `format` of `html` (default) or `pdf`.
async fn submit(
    state: web::Data<AppState>,
    form: web::Form<EligibilityForm>,
) -> Result<Presentation, AppError> {
    evaluate(&state, form.into_inner()).await
}

/// Validate the form, match it against a freshly loaded rule table and
/// produce the requested presentation.
///
/// Validation happens before the rule source is touched.
pub async fn evaluate(state: &AppState, form: EligibilityForm) -> Result<Presentation, AppError> {
    let format = form.format;

    let profile = form.into_profile().map_err(|errors| {
        let message = describe_errors(&errors);
        tracing::info!("Validation failed for eligibility form: {}", message);
        AppError::Validation(message)
    })?;

    let rules_path = state.rules_path.clone();
    let lookup = profile.clone();
    let result = web::block(move || {
        load_rules(&rules_path).map(|table| match_schemes(&table.records, &lookup))
    })
    .await??;

    tracing::info!(
        "Matched {} schemes for applicant aged {} ({:?} requested)",
        result.len(),
        profile.age,
        format
    );

    let listing = SchemeListing::new(profile.name, result);

    Ok(match format {
        OutputFormat::Html => Presentation::Listing(listing),
        OutputFormat::Pdf => render_document(state.renderer.as_ref(), listing),
    })
}

/// Render the listing as a document, falling back to the HTML listing on failure
fn render_document(renderer: &dyn DocumentRenderer, listing: SchemeListing) -> Presentation {
    match renderer.render(&listing) {
        Ok(bytes) => Presentation::Document {
            file_name: attachment_file_name(&listing.name, renderer.extension()),
            content_type: renderer.content_type(),
            bytes,
        },
        Err(e) => {
            tracing::warn!("Document rendering failed, serving HTML listing instead: {}", e);
            Presentation::Listing(listing)
        }
    }
}

/// Health check endpoint
///
/// GET /health
async fn health_check(state: web::Data<AppState>) -> impl Responder {
    let rules_path = state.rules_path.clone();

    let (status, rules_loaded, rows_skipped) = match web::block(move || load_rules(&rules_path)).await {
        Ok(Ok(table)) => ("healthy", table.records.len(), table.diagnostics.len()),
        Ok(Err(e)) => {
            tracing::warn!("Health check could not load rules: {}", e);
            ("degraded", 0, 0)
        }
        Err(e) => {
            tracing::warn!("Health check task failed: {}", e);
            ("degraded", 0, 0)
        }
    };

    HttpResponse::Ok().json(HealthResponse {
        status: status.to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        rules_loaded,
        rows_skipped,
        timestamp: chrono::Utc::now(),
    })
}
