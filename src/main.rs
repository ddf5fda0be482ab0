use actix_web::{middleware, web, App, HttpServer};
use scheme_eligibility::config::{LoggingSettings, Settings};
use scheme_eligibility::routes::{self, AppState};
use tracing::info;
use tracing_subscriber::EnvFilter;

/// Initialize logging. `RUST_LOG` takes precedence over the configured level.
fn init_logging(settings: &LoggingSettings) {
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(&settings.level))
        .unwrap_or_else(|_| EnvFilter::new("info"));

    let subscriber = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_level(true);

    if settings.format == "pretty" {
        subscriber.pretty().init();
    } else {
        subscriber.json().init();
    }
}

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    // Load .env file if present
    dotenv::dotenv().ok();

    let settings = Settings::load().map_err(|e| {
        std::io::Error::new(
            std::io::ErrorKind::InvalidInput,
            format!("Configuration error: {}", e),
        )
    })?;

    init_logging(&settings.logging);

    info!("Starting scheme eligibility service...");
    info!("Rules will be read from {}", settings.rules.path.display());

    if !settings.rules.path.is_file() {
        tracing::warn!(
            "Rule source {} is not present yet; submissions will fail until it is",
            settings.rules.path.display()
        );
    }

    let app_state = AppState::from_settings(&settings);

    let host = settings.server.host.clone();
    let port = settings.server.port;

    info!("Starting HTTP server on {}:{}", host, port);

    let mut server = HttpServer::new(move || {
        App::new()
            .app_data(web::Data::new(app_state.clone()))
            .wrap(middleware::Logger::default())
            .wrap(middleware::Compress::default())
            .configure(routes::configure_routes)
    });

    if let Some(workers) = settings.server.workers {
        server = server.workers(workers);
    }

    server.bind((host, port))?.run().await
}
