//! Devine Senior Living Backend
//!
//! REST backend serving the marketing site's testimonials, services and events
//! from an in-memory content store, and accepting contact inquiries that trigger
//! transactional email.

mod api;
mod auth;
mod config;
mod errors;
mod mail;
mod middleware;
mod models;
mod store;

use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use axum::{
    extract::DefaultBodyLimit,
    http::{header, HeaderName, HeaderValue, Method},
    routing::{get, post},
    Router,
};
use tower_http::cors::{AllowOrigin, Any, CorsLayer};
use tower_http::set_header::SetResponseHeaderLayer;
use tower_http::trace::TraceLayer;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use config::{Config, LogFormat, RATE_LIMIT_WINDOW_SECS};
use mail::{LogMailer, Mailer, SendGridMailer};
use middleware::RateLimiter;
use store::{ContentStore, MemStore};

/// Largest accepted request body.
const MAX_BODY_BYTES: usize = 100 * 1024;

/// Application state shared across all handlers.
#[derive(Clone)]
pub struct AppState {
    pub store: Arc<dyn ContentStore>,
    pub mailer: Arc<dyn Mailer>,
    pub config: Arc<Config>,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Load configuration
    let config = Config::from_env()?;

    init_logging(&config);

    tracing::info!(
        "Starting Devine backend in {:?} mode",
        config.environment
    );
    tracing::info!("Bind address: {}", config.bind_addr);

    if config.admin_api_key.is_none() {
        tracing::warn!("No ADMIN_API_KEY configured. Admin routes will refuse every request.");
    }

    // Initialize content store
    let store = if config.seed_fixtures {
        MemStore::seeded().await?
    } else {
        MemStore::new()
    };

    // Initialize mailer
    let mailer: Arc<dyn Mailer> = match &config.sendgrid_api_key {
        Some(key) => Arc::new(SendGridMailer::new(
            key.clone(),
            config.mail_from.clone(),
            &config.sendgrid_api_url,
        )?),
        None => {
            tracing::warn!("SENDGRID_API_KEY not found. Emails will be logged, not sent.");
            Arc::new(LogMailer::new(config.mail_from.clone()))
        }
    };

    let state = AppState {
        store: Arc::new(store),
        mailer,
        config: Arc::new(config.clone()),
    };

    // Build router
    let app = create_router(state);

    // Start server
    let listener = tokio::net::TcpListener::bind(&config.bind_addr).await?;
    tracing::info!("Server listening on {}", config.bind_addr);

    axum::serve(
        listener,
        app.into_make_service_with_connect_info::<SocketAddr>(),
    )
    .with_graceful_shutdown(shutdown_signal())
    .await?;

    tracing::info!("Server stopped");
    Ok(())
}

/// Install the global tracing subscriber.
fn init_logging(config: &Config) {
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&config.log_level));

    let registry = tracing_subscriber::registry().with(env_filter);
    match config.log_format {
        LogFormat::Json => registry.with(tracing_subscriber::fmt::layer().json()).init(),
        LogFormat::Pretty => registry.with(tracing_subscriber::fmt::layer()).init(),
    }
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("Failed to listen for shutdown signal: {}", e);
        std::future::pending::<()>().await;
    }
    tracing::info!("Shutdown signal received");
}

/// Create the application router with all routes.
pub fn create_router(state: AppState) -> Router {
    let config = Arc::clone(&state.config);

    let limiter = Arc::new(RateLimiter::new(
        config.rate_limit_max,
        Duration::from_secs(RATE_LIMIT_WINDOW_SECS),
    ));
    let admin_key = config.admin_api_key.clone();

    // Staff routes
    let admin_routes = Router::new()
        .route("/inquiries", get(api::list_inquiries))
        .route("/inquiries/{id}", get(api::get_inquiry))
        .layer(axum::middleware::from_fn(move |req, next| {
            auth::admin_auth_layer(admin_key.clone(), req, next)
        }));

    // Public API routes
    let api_routes = Router::new()
        .route("/testimonials", get(api::list_testimonials))
        .route("/services", get(api::list_services))
        .route("/services/{slug}", get(api::get_service))
        .route("/events", get(api::list_events))
        .route("/inquiries", post(api::create_inquiry))
        .route("/guide-download", post(api::request_guide))
        .nest("/admin", admin_routes)
        .layer(axum::middleware::from_fn(move |req, next| {
            middleware::rate_limit_layer(Arc::clone(&limiter), req, next)
        }));

    // Health check (no rate limit)
    let health_routes = Router::new().route("/health", get(health_check));

    let mut app = Router::new()
        .nest("/api", api_routes)
        .merge(health_routes)
        .layer(DefaultBodyLimit::max(MAX_BODY_BYTES))
        .layer(SetResponseHeaderLayer::overriding(
            header::X_CONTENT_TYPE_OPTIONS,
            HeaderValue::from_static("nosniff"),
        ));

    if config.is_production() {
        app = app
            .layer(SetResponseHeaderLayer::overriding(
                header::X_FRAME_OPTIONS,
                HeaderValue::from_static("DENY"),
            ))
            .layer(SetResponseHeaderLayer::overriding(
                header::X_XSS_PROTECTION,
                HeaderValue::from_static("1; mode=block"),
            ));
    }

    app.layer(cors_layer(&config))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Any origin in development; the configured allowlist in production.
fn cors_layer(config: &Config) -> CorsLayer {
    if !config.is_production() {
        return CorsLayer::new()
            .allow_origin(Any)
            .allow_methods(Any)
            .allow_headers(Any);
    }

    let origins: Vec<HeaderValue> = config
        .cors_allowed_origins
        .iter()
        .filter_map(|origin| match HeaderValue::from_str(origin) {
            Ok(value) => Some(value),
            Err(_) => {
                tracing::warn!("Ignoring invalid CORS origin: {}", origin);
                None
            }
        })
        .collect();

    CorsLayer::new()
        .allow_origin(AllowOrigin::list(origins))
        .allow_methods([Method::GET, Method::POST])
        .allow_headers([
            header::CONTENT_TYPE,
            header::AUTHORIZATION,
            HeaderName::from_static(auth::API_KEY_HEADER),
        ])
}

/// Health check endpoint.
async fn health_check() -> &'static str {
    "OK"
}
