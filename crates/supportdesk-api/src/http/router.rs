//! Axum router configuration with middleware.
//!
//! Routes:
//! - `POST /api/chat/message`, `GET /api/chat/history`
//! - `GET /health`
//! - `GET /` serves the chat widget
//!
//! Middleware: CORS, tracing.
//!
//! The widget page is compiled into the binary. When a web directory is
//! configured (`SUPPORTDESK_WEB_DIR` or `web_dir` in config.toml) and exists,
//! it is served instead, with unknown paths falling back to its `index.html`.

use std::path::PathBuf;

use axum::Router;
use axum::response::Html;
use axum::routing::{get, post};
use tower_http::cors::{Any, CorsLayer};
use tower_http::services::{ServeDir, ServeFile};
use tower_http::trace::TraceLayer;

use crate::http::handlers;
use crate::state::AppState;

/// Environment variable overriding the widget directory.
pub const WEB_DIR_ENV: &str = "SUPPORTDESK_WEB_DIR";

const INDEX_HTML: &str = include_str!("../../web/index.html");

/// Build the complete router with all routes and middleware.
pub fn build_router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let api_routes = Router::new()
        .route(
            "/chat/message",
            post(handlers::message::send_message).fallback(handlers::method_not_allowed),
        )
        .route(
            "/chat/history",
            get(handlers::history::get_history).fallback(handlers::method_not_allowed),
        );

    let mut router = Router::new()
        .nest("/api", api_routes)
        .route("/health", get(health_check));

    match resolve_web_dir(state.config.web_dir.as_deref()) {
        Some(web_dir) => {
            let serve_dir =
                ServeDir::new(&web_dir).fallback(ServeFile::new(web_dir.join("index.html")));
            router = router.fallback_service(serve_dir);
            tracing::info!(path = %web_dir.display(), "Serving widget from directory");
        }
        None => {
            router = router
                .route("/", get(widget_page))
                .fallback(handlers::not_found);
        }
    }

    router
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Widget directory to serve, if one is configured and present on disk.
fn resolve_web_dir(configured: Option<&str>) -> Option<PathBuf> {
    let dir = std::env::var(WEB_DIR_ENV)
        .ok()
        .or_else(|| configured.map(str::to_string))?;
    let path = PathBuf::from(dir);
    if path.is_dir() {
        Some(path)
    } else {
        tracing::warn!(path = %path.display(), "Web directory not found, using built-in widget");
        None
    }
}

/// GET / - the embedded chat widget.
async fn widget_page() -> Html<&'static str> {
    Html(INDEX_HTML)
}

/// GET /health - liveness plus whether a completion provider is configured.
async fn health_check(
    axum::extract::State(state): axum::extract::State<AppState>,
) -> axum::Json<serde_json::Value> {
    axum::Json(serde_json::json!({
        "status": "ok",
        "version": env!("CARGO_PKG_VERSION"),
        "provider": state.chat_service.provider_name(),
    }))
}
