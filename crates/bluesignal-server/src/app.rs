//! Router assembly and server entry

use crate::state::AppState;
use crate::{routes, sse};
use axum::{
    http::HeaderValue,
    routing::{get, post},
    Router,
};
use std::net::SocketAddr;
use tower_http::cors::{AllowOrigin, Any, CorsLayer};

/// Build the Axum application
pub fn build_app(state: AppState) -> Router {
    // CORS defaults to local dashboard origins; override only for explicit use.
    let allow_any_origin = std::env::var("BLUESIGNAL_ALLOW_ANY_ORIGIN")
        .ok()
        .is_some_and(|v| v == "1" || v.eq_ignore_ascii_case("true"));
    let cors = if allow_any_origin {
        CorsLayer::new()
            .allow_origin(Any)
            .allow_methods(Any)
            .allow_headers(Any)
    } else {
        CorsLayer::new()
            .allow_origin(AllowOrigin::list([
                HeaderValue::from_static("http://localhost:5173"),
                HeaderValue::from_static("http://127.0.0.1:5173"),
            ]))
            .allow_methods(Any)
            .allow_headers(Any)
    };

    let api_routes = Router::new()
        // Health
        .route("/health", get(routes::health))
        // Report intake
        .route("/reports", post(routes::submit_report))
        // Authority views
        .route("/hotspots", get(routes::get_hotspots))
        .route("/hotspots/stream", get(sse::hotspots_stream))
        // Post feed
        .route("/posts/stream", get(sse::posts_stream))
        // Single-shot classification
        .route("/classify/text", post(routes::classify_text))
        .route("/classify/image", post(routes::classify_image));

    Router::new()
        .nest("/api", api_routes)
        .layer(cors)
        .with_state(state)
}

/// Run the server
pub async fn run_server(state: AppState, addr: SocketAddr) -> anyhow::Result<()> {
    let app = build_app(state);

    tracing::info!("Starting BlueSignal server on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
