//! HTTP server wiring the routes to the delegate chains

use axum::{
    routing::{get, post},
    Router,
};
use crate::chain::{GraphQaChain, VizCodeChain};
use crate::viz::CodeRunner;
use rust_embed::RustEmbed;
use std::sync::Arc;
use tower_http::cors::CorsLayer;
use tower_http::services::ServeDir;
use tracing::info;

use super::handler::{index_handler, query_handler, visualize_handler};

#[derive(RustEmbed)]
#[folder = "src/http/static/"]
struct Assets;

/// Embedded index page template.
pub(crate) fn index_template() -> String {
    let index_html = Assets::get("index.html").unwrap();
    std::str::from_utf8(index_html.data.as_ref())
        .unwrap()
        .to_string()
}

/// Shared per-process state: the database handle and LLM clients are created
/// once at startup and read by every request.
pub struct AppState {
    pub qa: GraphQaChain,
    pub viz: VizCodeChain,
    pub runner: CodeRunner,
}

/// Build the application router. Separate from [`HttpServer::start`] so tests
/// can drive it without binding a socket.
pub fn router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/", get(index_handler))
        .route("/query", post(query_handler))
        .route("/visualize", post(visualize_handler))
        .nest_service("/static", ServeDir::new("static"))
        .layer(CorsLayer::permissive())
        .with_state(state)
}

/// HTTP server serving the web UI and the two query routes
pub struct HttpServer {
    state: Arc<AppState>,
    port: u16,
}

impl HttpServer {
    /// Create a new HTTP server
    pub fn new(state: Arc<AppState>, port: u16) -> Self {
        Self { state, port }
    }

    /// Start the HTTP server
    pub async fn start(&self) -> Result<(), Box<dyn std::error::Error>> {
        let app = router(Arc::clone(&self.state));

        let addr = format!("0.0.0.0:{}", self.port);
        let listener = tokio::net::TcpListener::bind(&addr).await?;

        info!("GraphTalk available at http://localhost:{}", self.port);

        axum::serve(listener, app).await?;

        Ok(())
    }
}
