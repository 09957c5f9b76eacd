//! Axum router wiring.
//!
//! The badge handler answers any method on `/` and on `server.route`.

use axum::{
    routing::{any, get},
    Router,
};

use crate::{app_state::AppState, http, ops};

pub fn build_router(state: AppState) -> Router {
    let route = state.cfg().server.route.clone();

    let mut router = Router::new().route("/", any(http::views));
    if route != "/" {
        router = router.route(&route, any(http::views));
    }

    router
        .route("/healthz", get(ops::healthz))
        .route("/readyz", get(ops::readyz))
        .route("/metrics", get(ops::metrics))
        .with_state(state)
}
