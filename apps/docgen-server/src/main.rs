//! Document generation server
//!
//! Serves the site issue report templates over HTTP:
//!
//! - Template listing
//! - Payload validation against a template
//! - `.docx` generation (returned base64-encoded)
//!
//! Generation runs on the blocking pool under a timeout; the engine itself
//! has no notion of time limits.

use std::net::SocketAddr;

use axum::{
    routing::{get, post},
    Router,
};
use clap::Parser;
use tower::ServiceBuilder;
use tower_http::cors::{Any, CorsLayer};
use tracing::{info, Level};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

mod api;
mod error;

use api::{handle_generate, handle_health, handle_list_templates, handle_validate};

/// Command-line arguments for the document generation server
#[derive(Parser, Debug)]
#[command(name = "docgen-server")]
#[command(about = "HTTP host for site issue report generation")]
struct Args {
    /// Port to listen on
    #[arg(short, long, default_value = "3000")]
    port: u16,

    /// Host address to bind to
    #[arg(long, default_value = "0.0.0.0")]
    host: String,

    /// Generation timeout in milliseconds
    #[arg(long, default_value = "10000")]
    timeout_ms: u64,

    /// Largest issue list accepted in one request
    #[arg(long, default_value = "500")]
    max_issues: usize,

    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,
}

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    /// Generation timeout in milliseconds
    pub timeout_ms: u64,
    pub max_issues: usize,
}

/// All routes, without middleware
pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(handle_health))
        .route("/api/templates", get(handle_list_templates))
        .route("/api/templates/:id/validate", post(handle_validate))
        .route("/api/documents", post(handle_generate))
        .with_state(state)
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    // Initialize logging
    let log_level = if args.verbose {
        Level::DEBUG
    } else {
        Level::INFO
    };

    tracing_subscriber::registry()
        .with(EnvFilter::from_default_env().add_directive(log_level.into()))
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting docgen server on {}:{}", args.host, args.port);

    let state = AppState {
        timeout_ms: args.timeout_ms,
        max_issues: args.max_issues,
    };

    // Configure CORS
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let app = router(state).layer(ServiceBuilder::new().layer(cors));

    let addr: SocketAddr = format!("{}:{}", args.host, args.port).parse()?;
    let listener = tokio::net::TcpListener::bind(addr).await?;

    info!("Server listening on http://{}", addr);
    info!("Generation timeout: {}ms", args.timeout_ms);
    info!("Max issues per request: {}", args.max_issues);

    axum::serve(listener, app).await?;

    Ok(())
}
