//! Stride storefront library.
//!
//! The public shoe catalog: listing with filters, product pages with reviews
//! and related products, a session-scoped recently viewed list and a
//! cookie-backed wishlist. The binary in `main.rs` adds configuration,
//! tracing and Sentry around [`app`].

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod config;
pub mod db;
pub mod error;
mod filters;
pub mod middleware;
pub mod models;
pub mod routes;
pub mod services;
pub mod state;

use std::time::Duration;

use axum::{Router, middleware::from_fn, routing::get};
use tower_http::services::ServeDir;
use tower_http::trace::{DefaultOnResponse, OnResponse, TraceLayer};
use tracing::Span;

use crate::state::AppState;

/// Build the storefront router with its middleware stack.
///
/// Sentry layers are left to the caller so tests can run without a client.
pub fn app(state: AppState) -> Router {
    let session_layer = middleware::create_session_layer(state.config());
    let static_dir = ServeDir::new(&state.config().static_dir);

    Router::new()
        .route("/health", get(health))
        .merge(routes::routes())
        .nest_service("/static", static_dir)
        .layer(session_layer)
        .layer(from_fn(middleware::security_headers_middleware))
        .layer(from_fn(middleware::request_id_middleware))
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(|request: &axum::http::Request<_>| {
                    tracing::info_span!(
                        "http_request",
                        method = %request.method(),
                        uri = %request.uri(),
                        request_id = tracing::field::Empty,
                        status = tracing::field::Empty,
                        latency_ms = tracing::field::Empty,
                    )
                })
                .on_response(
                    |response: &axum::http::Response<_>, latency: Duration, span: &Span| {
                        span.record("status", response.status().as_u16());
                        span.record(
                            "latency_ms",
                            u64::try_from(latency.as_millis()).unwrap_or(u64::MAX),
                        );
                        DefaultOnResponse::default().on_response(response, latency, span);
                    },
                ),
        )
        .with_state(state)
}

/// Liveness health check endpoint.
async fn health() -> &'static str {
    "ok"
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::indexing_slicing)]
mod tests {
    use axum::body::Body;
    use axum::http::{Request, StatusCode};
    use stride_core::catalog::CatalogBackend;
    use stride_core::{Product, ProductId};
    use tower::ServiceExt;

    use super::*;
    use crate::config::StorefrontConfig;
    use crate::db::JsonFileBackend;

    fn test_app() -> (Router, std::path::PathBuf) {
        let dir = std::env::temp_dir().join(format!("stride-app-{}", uuid::Uuid::new_v4()));
        let path = dir.join("products.json");
        JsonFileBackend::new(&path)
            .save(&[
                Product::new(ProductId::new(1), "Pegasus", "100".parse().unwrap()).with_brand("Nike")
            ])
            .unwrap();

        let state = AppState::from_config(StorefrontConfig::for_catalog(&path));
        (app(state), dir)
    }

    #[tokio::test]
    async fn test_health() {
        let (app, dir) = test_app();
        let response = app
            .oneshot(Request::get("/health").body(Body::empty()).unwrap())
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        assert!(response.headers().contains_key("x-request-id"));
        assert_eq!(response.headers()["x-frame-options"], "DENY");

        std::fs::remove_dir_all(dir).unwrap();
    }

    #[tokio::test]
    async fn test_unknown_product_is_not_found() {
        let (app, dir) = test_app();
        let response = app
            .oneshot(Request::get("/api/products/42").body(Body::empty()).unwrap())
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::NOT_FOUND);

        std::fs::remove_dir_all(dir).unwrap();
    }
}
