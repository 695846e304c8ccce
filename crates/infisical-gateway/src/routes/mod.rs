//! HTTP route handlers, grouped by resource.

pub mod docs;
pub mod dynamic_secrets;
pub mod health;
pub mod kms;
pub mod projects;
pub mod secrets;

use std::sync::Arc;

use axum::Router;
use axum::http::{HeaderValue, Method, header};
use axum::middleware as axum_mw;
use tower::limit::GlobalConcurrencyLimitLayer;
use tower_http::cors::{Any, CorsLayer};
use tower_http::set_header::SetResponseHeaderLayer;
use tower_http::trace::TraceLayer;

use crate::middleware::{REQUEST_ID_HEADER, request_id};
use crate::state::AppState;

/// Build the Axum router with all routes and middleware.
///
/// API routes share one semaphore of `max_concurrent_requests` permits.
/// Health and docs stay outside it so health checks answer under load.
pub fn router(state: Arc<AppState>) -> Router {
    let api_routes = Router::new()
        .merge(secrets::router())
        .merge(dynamic_secrets::router())
        .merge(projects::router())
        .merge(kms::router())
        .layer(GlobalConcurrencyLimitLayer::new(
            state.max_concurrent_requests,
        ));

    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods([Method::GET, Method::POST, Method::PUT, Method::DELETE])
        .allow_headers([
            header::CONTENT_TYPE,
            header::AUTHORIZATION,
            REQUEST_ID_HEADER.clone(),
        ])
        .expose_headers([REQUEST_ID_HEADER.clone()]);

    let mut app = Router::new()
        .merge(api_routes)
        .merge(health::router());

    if state.docs_enabled {
        app = app.merge(docs::router());
    }

    app.layer(TraceLayer::new_for_http())
        .layer(axum_mw::from_fn(request_id))
        .layer(cors)
        .layer(SetResponseHeaderLayer::overriding(
            header::X_CONTENT_TYPE_OPTIONS,
            HeaderValue::from_static("nosniff"),
        ))
        .layer(SetResponseHeaderLayer::overriding(
            header::X_FRAME_OPTIONS,
            HeaderValue::from_static("DENY"),
        ))
        .layer(SetResponseHeaderLayer::overriding(
            header::CACHE_CONTROL,
            HeaderValue::from_static("no-store"),
        ))
        .with_state(state)
}
