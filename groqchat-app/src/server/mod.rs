//! Web UI and JSON API.
//!
//! | Route | Purpose |
//! |-------|---------|
//! | `GET /` | chat page |
//! | `POST /api/chat` | multipart `text` / `image` / `audio` -> [`ChatReply`](crate::reply::ChatReply) |
//! | `GET /api/status` | provider and model information |

pub mod handlers;
pub mod page;
pub mod types;

use std::future::Future;
use std::sync::Arc;

use axum::{
    Router,
    extract::DefaultBodyLimit,
    routing::{get, post},
};
use groqchat::llms::Groq;
use groqchat::processor::MultimodalProcessor;
use tokio::net::TcpListener;
use tower_http::trace::TraceLayer;

use crate::config::AppConfig;
use crate::error::{AppError, Result};

/// Shared, read-only state of the server.
#[derive(Debug)]
pub struct AppState {
    /// Pipeline used for every request.
    pub processor: MultimodalProcessor<Groq>,
}

impl AppState {
    /// Wrap a processor.
    #[must_use]
    pub const fn new(processor: MultimodalProcessor<Groq>) -> Self {
        Self { processor }
    }

    /// Build the Groq client and pipeline from configuration.
    pub fn from_config(config: &AppConfig) -> Result<Self> {
        let groq = Groq::new(config.groq_config()?)?;
        Ok(Self::new(MultimodalProcessor::new(
            groq,
            config.processor_options(),
        )))
    }
}

/// Build the application router.
pub fn router(state: Arc<AppState>, max_upload_bytes: usize) -> Router {
    Router::new()
        .route("/", get(handlers::index))
        .route("/api/status", get(handlers::status))
        .route("/api/chat", post(handlers::chat))
        .layer(DefaultBodyLimit::max(max_upload_bytes))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Serve on an already bound listener until `shutdown` resolves.
pub async fn serve_on<F>(listener: TcpListener, app: Router, shutdown: F) -> Result<()>
where
    F: Future<Output = ()> + Send + 'static,
{
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown)
        .await?;
    Ok(())
}

/// Bind the configured address and serve until Ctrl+C.
pub async fn serve(config: &AppConfig) -> Result<()> {
    let state = Arc::new(AppState::from_config(config)?);
    let app = router(state, config.server.max_upload_bytes);

    let addr = config.server.bind_addr();
    let listener = TcpListener::bind(&addr)
        .await
        .map_err(|e| AppError::server(format!("failed to bind {addr}: {e}")))?;

    tracing::info!("groqchat listening on http://{addr}");
    serve_on(listener, app, shutdown_signal()).await?;
    tracing::info!("server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %e, "failed to listen for Ctrl+C");
        std::future::pending::<()>().await;
    }
    tracing::info!("shutting down");
}
