//! Shared application state for the gateway.
//!
//! A single [`AppState`] is constructed at startup and shared across all
//! Axum handlers via `Arc`.

use crate::service::GatewayService;

/// Shared application state passed to all HTTP handlers.
#[derive(Debug)]
pub struct AppState {
    /// Forwarding layer over the Infisical client.
    pub service: GatewayService,
    /// Whether `/openapi.json` and the Swagger UI are served.
    pub docs_enabled: bool,
    /// In-flight cap shared by every API route.
    pub max_concurrent_requests: usize,
}
