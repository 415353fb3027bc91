//! Route configuration and setup.
//!
//! Health checks live in [health](health).

mod health;

use crate::constants::API_PREFIX;
use crate::handlers::{auth, content, create, files, password, raw, stream, upload, view};
use crate::state::AppState;
use axum::{
    extract::DefaultBodyLimit,
    http::{HeaderValue, Method},
    routing::{get, post},
    Json, Router,
};
use pastegate_core::Config;
use pastegate_infra::request_id_middleware;
use std::sync::Arc;
use tower::limit::ConcurrencyLimitLayer;
use tower_http::cors::{Any, CorsLayer};
use tower_http::limit::RequestBodyLimitLayer;
use tower_http::trace::TraceLayer;

/// Room for multipart framing on top of the file itself.
const MULTIPART_OVERHEAD_BYTES: usize = 64 * 1024;

/// Setup all application routes
pub fn setup_routes(config: &Config, state: Arc<AppState>) -> Result<Router<()>, anyhow::Error> {
    let cors = setup_cors(config)?;

    let http_concurrency_limit = std::env::var("HTTP_CONCURRENCY_LIMIT")
        .ok()
        .and_then(|s| s.parse::<usize>().ok())
        .unwrap_or(10_000)
        .max(1);
    tracing::info!(
        http_concurrency_limit = http_concurrency_limit,
        "HTTP concurrency limit layer enabled"
    );

    let app = public_routes(state.clone())
        .merge(file_routes())
        .merge(access_routes())
        .layer(ConcurrencyLimitLayer::new(http_concurrency_limit))
        .layer(RequestBodyLimitLayer::new(
            config.max_upload_size_bytes() + MULTIPART_OVERHEAD_BYTES,
        ))
        .layer(DefaultBodyLimit::disable())
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .layer(axum::middleware::from_fn(request_id_middleware))
        .with_state(state);

    Ok(app)
}

fn setup_cors(config: &Config) -> Result<CorsLayer, anyhow::Error> {
    let cors = if config.cors_origins().iter().any(|o| o == "*") {
        CorsLayer::new()
            .allow_origin(Any)
            .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
            .allow_headers(Any)
    } else {
        let origins = config
            .cors_origins()
            .iter()
            .map(|o| {
                o.parse::<HeaderValue>()
                    .map_err(|e| anyhow::anyhow!("Invalid CORS origin {:?}: {}", o, e))
            })
            .collect::<Result<Vec<_>, _>>()?;
        CorsLayer::new()
            .allow_origin(origins)
            .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
            .allow_headers(Any)
    };
    Ok(cors)
}

fn public_routes(state: Arc<AppState>) -> Router<Arc<AppState>> {
    Router::new()
        .route(
            "/health",
            get({
                let state = state.clone();
                move || {
                    let state = state.clone();
                    async { health::health_check(state).await }
                }
            }),
        )
        .route(
            "/live",
            get({
                let state = state.clone();
                move || async { health::liveness_check(state).await }
            }),
        )
        .route(
            &format!("{}/openapi.json", API_PREFIX),
            get(|| async { Json(crate::api_doc::get_openapi_spec()) }),
        )
}

/// Upload, listing, lock and content routes.
fn file_routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/upload", post(upload::upload_file))
        .route(&format!("{}/upload", API_PREFIX), post(upload::upload_file))
        .route(&format!("{}/create", API_PREFIX), post(create::create_code))
        .route(&format!("{}/files", API_PREFIX), get(files::list_files))
        .route(
            &format!("{}/toggle-lock/{{id}}", API_PREFIX),
            post(files::toggle_lock),
        )
        .route(
            &format!("{}/content/{{id}}", API_PREFIX),
            get(content::get_content),
        )
        .route("/view/{id}", get(view::view_file))
}

/// Gated fetch, sessions and the rotating password.
fn access_routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/raw/{id}", get(raw::get_raw))
        .route(&format!("{}/raw/{{id}}", API_PREFIX), get(raw::get_raw))
        .route("/auth/{id}", post(auth::authenticate))
        .route("/stream/{id}", get(stream::stream_file))
        .route(
            &format!("{}/verify-password", API_PREFIX),
            post(password::verify_password),
        )
        .route(
            &format!("{}/password-info", API_PREFIX),
            get(password::password_info),
        )
}
