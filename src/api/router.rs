//! API router.
//!
//! Returns a composable `Router` that can be mounted on any axum
//! server. Routes are nested under `/api/`. Verification is public by
//! design — certificates are meant to be checkable by anyone holding
//! the number — so there is no auth layer, only permissive CORS for
//! browser-based breeder sites.

use axum::routing::{get, post};
use axum::Router;
use tower_http::cors::{Any, CorsLayer};

use crate::api::endpoints;
use crate::api::types::ApiContext;

/// Build the API router with all endpoints under `/api/`.
pub fn api_router(ctx: ApiContext) -> Router {
    let routes = Router::new()
        .route("/health", get(endpoints::health::check))
        .route(
            "/verification",
            get(endpoints::verification::lookup).post(endpoints::verification::submit),
        )
        .route("/dogs", post(endpoints::dogs::register))
        .route("/dogs/:id/clearances", get(endpoints::dogs::clearances))
        .with_state(ctx.clone());

    // Externally published certificate-check URL; printed on clearance
    // paperwork, so it lives at the root rather than under /api
    let published = Router::new()
        .route(
            "/health-clearance-verification",
            get(endpoints::verification::lookup).post(endpoints::verification::submit),
        )
        .with_state(ctx);

    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new().nest("/api", routes).merge(published).layer(cors)
}
