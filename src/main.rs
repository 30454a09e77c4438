use actix_cors::Cors;
use actix_web::{middleware::Logger, web, App, HttpServer};
use std::sync::Arc;
use tracing::{error, info};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use instant_search::config::{Config, SecurityConfig};
use instant_search::routes;
use instant_search::services::UpstreamSearch;
use instant_search::AppState;

fn cors(security: &SecurityConfig) -> Cors {
    let cors = Cors::default()
        .allow_any_method()
        .allow_any_header()
        .max_age(3600);

    if security.allowed_origins.iter().any(|origin| origin == "*") {
        return cors.allow_any_origin();
    }
    security
        .allowed_origins
        .iter()
        .fold(cors, |cors, origin| cors.allowed_origin(origin))
}

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(
            std::env::var("RUST_LOG").unwrap_or_else(|_| "info".to_string()),
        ))
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Load configuration
    let config = match Config::from_env() {
        Ok(config) => {
            info!("Configuration loaded successfully");
            config
        }
        Err(e) => {
            error!("Failed to load configuration: {}", e);
            std::process::exit(1);
        }
    };

    let upstream = match UpstreamSearch::new(config.upstream.clone()) {
        Ok(upstream) => upstream,
        Err(e) => {
            error!("Failed to build upstream search client: {}", e);
            std::process::exit(1);
        }
    };

    info!(
        "Starting Instant Search on port {} (upstream {})",
        config.server.port, config.upstream.search_url
    );

    let state = AppState::new(config.clone(), Arc::new(upstream));
    let max_form_payload_size = config.server.max_form_payload_size;

    // Create HTTP server
    let server = HttpServer::new(move || {
        App::new()
            .app_data(web::Data::new(state.clone()))
            .wrap(cors(&state.config.security))
            .wrap(Logger::default())
            .configure(|cfg| routes::configure(cfg, max_form_payload_size))
    })
    .bind(format!("{}:{}", config.server.host, config.server.port))?;

    info!(
        "Server started successfully at http://{}:{}/instant-search",
        config.server.host, config.server.port
    );

    // Run the server
    server.workers(config.server.workers).run().await
}
