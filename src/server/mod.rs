//! HTTP surface: router assembly, shared state, and serving.

pub mod error;
pub mod routes;

use std::net::SocketAddr;
use std::sync::Arc;

use axum::routing::{get, post};
use axum::Router;
use tokio::net::TcpListener;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use tracing::info;

use crate::config::DefaultsConfig;
use crate::context::{RecordingSession, ServiceContext};

/// Shared handler state.
#[derive(Clone)]
pub struct AppState {
    /// The port bundle.
    pub ctx: Arc<ServiceContext>,
    /// Generation parameter defaults from the config file.
    pub defaults: DefaultsConfig,
}

impl AppState {
    /// Bundle a context with generation defaults.
    #[must_use]
    pub fn new(ctx: ServiceContext, defaults: DefaultsConfig) -> Self {
        Self { ctx: Arc::new(ctx), defaults }
    }
}

/// Build the application router.
pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(routes::health::health))
        .route(
            "/api/generate-story",
            post(routes::story::generate_story).get(routes::story::describe),
        )
        .route(
            "/api/generate-images",
            post(routes::images::generate_images).get(routes::images::describe),
        )
        .route("/api/upload-image", post(routes::upload::upload_image))
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state)
}

/// Serve the application until Ctrl-C, then finish an active recording
/// session if one exists.
///
/// # Errors
///
/// Returns an error if the listener cannot bind or the server fails.
pub async fn serve(
    addr: SocketAddr,
    state: AppState,
    recording_session: Option<RecordingSession>,
) -> Result<(), std::io::Error> {
    let app = router(state);
    let listener = TcpListener::bind(addr).await?;
    info!(%addr, "storybloom listening");

    axum::serve(listener, app)
        .with_graceful_shutdown(async {
            let _ = tokio::signal::ctrl_c().await;
            info!("shutdown signal received");
        })
        .await?;

    if let Some(session) = recording_session {
        match session.finish() {
            Ok(path) => info!(path = %path.display(), "cassette saved"),
            Err(e) => tracing::warn!(error = %e, "failed to save cassette"),
        }
    }

    Ok(())
}
