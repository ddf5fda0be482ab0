// Integration tests for the HTTP surface

use actix_web::http::header::CONTENT_DISPOSITION;
use actix_web::http::StatusCode;
use actix_web::{test, web, App};
use scheme_eligibility::models::{HealthResponse, SchemeListing};
use scheme_eligibility::routes::{configure_routes, AppState};
use scheme_eligibility::services::{DocumentRenderer, PdfRenderer, RenderError};
use std::io::Write;
use std::path::Path;
use std::sync::Arc;
use tempfile::NamedTempFile;

struct BrokenRenderer;

impl DocumentRenderer for BrokenRenderer {
    fn content_type(&self) -> &'static str {
        "application/pdf"
    }

    fn extension(&self) -> &'static str {
        "pdf"
    }

    fn render(&self, _listing: &SchemeListing) -> Result<Vec<u8>, RenderError> {
        Err(RenderError::Unavailable("printer on fire".to_string()))
    }
}

fn rules_file() -> NamedTempFile {
    let mut file = NamedTempFile::new().unwrap();
    writeln!(file, "Age,Income Range,Employment Status,Residency,Eligible Schemes").unwrap();
    writeln!(file, "18-35,Low,Unemployed,Citizen,\"SchemeA, SchemeB\"").unwrap();
    writeln!(file, "not-an-age,Low,Unemployed,Citizen,Ignored").unwrap();
    writeln!(file, "60-99,Low,Retired,Citizen,Pension").unwrap();
    file
}

fn form(name: &str, age: &str, format: &str) -> Vec<(&'static str, String)> {
    vec![
        ("name", name.to_string()),
        ("age", age.to_string()),
        ("income", "Low".to_string()),
        ("employment", "unemployed".to_string()),
        ("residency", "citizen".to_string()),
        ("format", format.to_string()),
    ]
}

macro_rules! app {
    ($path:expr, $renderer:expr) => {
        test::init_service(
            App::new()
                .app_data(web::Data::new(AppState::new($path, $renderer)))
                .configure(configure_routes),
        )
        .await
    };
}

fn body_text(bytes: &[u8]) -> String {
    String::from_utf8_lossy(bytes).into_owned()
}

#[actix_web::test]
async fn test_get_renders_empty_form() {
    let rules = rules_file();
    let app = app!(rules.path(), Arc::new(PdfRenderer));

    let resp = test::call_service(&app, test::TestRequest::get().uri("/").to_request()).await;

    assert_eq!(resp.status(), StatusCode::OK);
    let body = body_text(&test::read_body(resp).await);
    assert!(body.contains("<form method=\"post\""));
    assert!(!body.contains("class=\"error\""));
}

#[actix_web::test]
async fn test_post_lists_matching_schemes() {
    let rules = rules_file();
    let app = app!(rules.path(), Arc::new(PdfRenderer));

    let req = test::TestRequest::post()
        .uri("/")
        .set_form(form("Asha", "25", "html"))
        .to_request();
    let resp = test::call_service(&app, req).await;

    assert_eq!(resp.status(), StatusCode::OK);
    let body = body_text(&test::read_body(resp).await);
    assert!(body.contains("Eligible schemes for Asha"));
    let a = body.find("<li>SchemeA</li>").expect("SchemeA listed");
    let b = body.find("<li>SchemeB</li>").expect("SchemeB listed");
    assert!(a < b);
    assert!(!body.contains("Pension"));
}

#[actix_web::test]
async fn test_post_without_matches_shows_notice() {
    let rules = rules_file();
    let app = app!(rules.path(), Arc::new(PdfRenderer));

    let req = test::TestRequest::post()
        .uri("/")
        .set_form(form("Asha", "45", "html"))
        .to_request();
    let resp = test::call_service(&app, req).await;

    assert_eq!(resp.status(), StatusCode::OK);
    let body = body_text(&test::read_body(resp).await);
    assert!(body.contains("No eligible schemes"));
}

#[actix_web::test]
async fn test_pdf_download() {
    let rules = rules_file();
    let app = app!(rules.path(), Arc::new(PdfRenderer));

    let req = test::TestRequest::post()
        .uri("/")
        .set_form(form("Asha", "25", "pdf"))
        .to_request();
    let resp = test::call_service(&app, req).await;

    assert_eq!(resp.status(), StatusCode::OK);
    let disposition = resp
        .headers()
        .get(CONTENT_DISPOSITION)
        .and_then(|v| v.to_str().ok())
        .unwrap_or_default()
        .to_string();
    assert!(disposition.starts_with("attachment"));
    assert!(disposition.contains("Asha_eligible_schemes.pdf"));

    let body = test::read_body(resp).await;
    assert!(body.starts_with(b"%PDF"));
}

#[actix_web::test]
async fn test_pdf_failure_falls_back_to_html() {
    let rules = rules_file();
    let app = app!(rules.path(), Arc::new(BrokenRenderer));

    let req = test::TestRequest::post()
        .uri("/")
        .set_form(form("Asha", "25", "pdf"))
        .to_request();
    let resp = test::call_service(&app, req).await;

    assert_eq!(resp.status(), StatusCode::OK);
    assert!(resp.headers().get(CONTENT_DISPOSITION).is_none());
    let body = body_text(&test::read_body(resp).await);
    assert!(body.contains("<li>SchemeA</li>"));
}

#[actix_web::test]
async fn test_zero_age_rerenders_form_without_loading_rules() {
    // A missing rule source would produce a 500 if it were read
    let app = app!(Path::new("no/such/rules.csv"), Arc::new(PdfRenderer));

    let req = test::TestRequest::post()
        .uri("/")
        .set_form(form("Asha", "0", "html"))
        .to_request();
    let resp = test::call_service(&app, req).await;

    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    let body = body_text(&test::read_body(resp).await);
    assert!(body.contains("<form method=\"post\""));
    assert!(body.contains("Age must be a whole number greater than zero."));
}

#[actix_web::test]
async fn test_empty_name_rerenders_form() {
    let rules = rules_file();
    let app = app!(rules.path(), Arc::new(PdfRenderer));

    let req = test::TestRequest::post()
        .uri("/")
        .set_form(form("   ", "25", "html"))
        .to_request();
    let resp = test::call_service(&app, req).await;

    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    let body = body_text(&test::read_body(resp).await);
    assert!(body.contains("Please fill in every field."));
}

#[actix_web::test]
async fn test_missing_fields_rerender_form() {
    let rules = rules_file();
    let app = app!(rules.path(), Arc::new(PdfRenderer));

    let req = test::TestRequest::post()
        .uri("/")
        .set_form([("name", "Asha")])
        .to_request();
    let resp = test::call_service(&app, req).await;

    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    let body = body_text(&test::read_body(resp).await);
    assert!(body.contains("<form method=\"post\""));
}

#[actix_web::test]
async fn test_unknown_format_rerenders_form() {
    let rules = rules_file();
    let app = app!(rules.path(), Arc::new(PdfRenderer));

    let req = test::TestRequest::post()
        .uri("/")
        .set_form(form("Asha", "25", "docx"))
        .to_request();
    let resp = test::call_service(&app, req).await;

    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    let body = body_text(&test::read_body(resp).await);
    assert!(body.contains("We could not read the submitted form."));
}

#[actix_web::test]
async fn test_missing_rule_source_shows_generic_error() {
    let app = app!(Path::new("no/such/rules.csv"), Arc::new(PdfRenderer));

    let req = test::TestRequest::post()
        .uri("/")
        .set_form(form("Asha", "25", "html"))
        .to_request();
    let resp = test::call_service(&app, req).await;

    assert_eq!(resp.status(), StatusCode::INTERNAL_SERVER_ERROR);
    let body = body_text(&test::read_body(resp).await);
    assert!(body.contains("Something went wrong"));
    assert!(!body.contains("no/such/rules.csv"));
}

#[actix_web::test]
async fn test_health_reports_rule_counts() {
    let rules = rules_file();
    let app = app!(rules.path(), Arc::new(PdfRenderer));

    let req = test::TestRequest::get().uri("/health").to_request();
    let health: HealthResponse = test::call_and_read_body_json(&app, req).await;

    assert_eq!(health.status, "healthy");
    assert_eq!(health.rules_loaded, 2);
    assert_eq!(health.rows_skipped, 1);
}

#[actix_web::test]
async fn test_health_degraded_without_rules() {
    let app = app!(Path::new("no/such/rules.csv"), Arc::new(PdfRenderer));

    let req = test::TestRequest::get().uri("/health").to_request();
    let health: HealthResponse = test::call_and_read_body_json(&app, req).await;

    assert_eq!(health.status, "degraded");
    assert_eq!(health.rules_loaded, 0);
}
