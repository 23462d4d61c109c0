use axum::{
    http::Uri,
    middleware,
    routing::{get, post},
    Router,
};
use std::sync::Arc;
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};

use crate::controllers::{
    health, script::ScriptController, skit::SkitController, voice::VoiceController,
};
use crate::error::AppError;
use crate::infrastructure::config::Config;

pub mod request_id;

pub use request_id::{request_id_middleware, RequestId, X_REQUEST_ID};

/// Build the application router with all routes and layers
pub fn build_router(
    config: Arc<Config>,
    skit_controller: Arc<SkitController>,
    script_controller: Arc<ScriptController>,
    voice_controller: Arc<VoiceController>,
) -> Router {
    let skit_routes = Router::new()
        .route("/api/skits/generate", post(SkitController::generate))
        .route("/api/skits/download", post(SkitController::download))
        .with_state(skit_controller);

    let script_routes = Router::new()
        .route("/api/scripts/generate", post(ScriptController::generate))
        .route("/api/scripts/parse", post(ScriptController::parse))
        .with_state(script_controller);

    let voice_routes = Router::new()
        .route("/api/voices", get(VoiceController::list))
        .route("/api/voices/suggest", post(VoiceController::suggest))
        .with_state(voice_controller);

    let app = Router::new()
        .route("/health", get(health::health))
        .route("/health/ready", get(health::health_ready))
        .with_state(config.clone())
        .merge(skit_routes)
        .merge(script_routes)
        .merge(voice_routes)
        .fallback(not_found)
        .layer(middleware::from_fn(request_id_middleware))
        .layer(TraceLayer::new_for_http());

    if config.cors_allow_any_origin {
        app.layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any)
                .expose_headers(Any),
        )
    } else {
        app
    }
}

async fn not_found(uri: Uri) -> AppError {
    AppError::NotFound(uri.path().to_string())
}

/// Start the HTTP server with all routes configured
pub async fn start_http_server(
    config: Arc<Config>,
    app: Router,
) -> Result<(), Box<dyn std::error::Error>> {
    let listener =
        tokio::net::TcpListener::bind(format!("{}:{}", config.host, config.port)).await?;

    tracing::info!("Server listening on {}", listener.local_addr()?);

    axum::serve(listener, app).await?;

    Ok(())
}
