//! `views` handler: bump the counter, answer with a badge.
//!
//! Request method, query, headers, and body are all ignored. Every failure
//! collapses to HTTP 500 with the error badge; the stage is only visible in
//! logs and metrics.

use std::time::Instant;

use axum::{
    extract::State,
    http::{header, StatusCode},
    response::{IntoResponse, Response},
    Json,
};

use viewbadge_core::error::Result;
use viewbadge_core::{record_view, Badge};

use crate::app_state::AppState;

pub const CACHE_CONTROL_VALUE: &str = "s-maxage=5, stale-while-revalidate";

pub async fn views(State(state): State<AppState>) -> Response {
    let (status, badge) = match count_view(&state).await {
        Ok(count) => {
            state.metrics().requests.inc(&[("outcome", "ok")]);
            (StatusCode::OK, Badge::count(count))
        }
        Err(e) => {
            let stage = e.stage().as_str();
            tracing::error!(stage, error = %e, "view counter update failed");
            state.metrics().requests.inc(&[("outcome", "error")]);
            state.metrics().failures.inc(&[("stage", stage)]);
            (StatusCode::INTERNAL_SERVER_ERROR, Badge::error())
        }
    };

    (
        status,
        [
            (header::ACCESS_CONTROL_ALLOW_ORIGIN, "*"),
            (header::CACHE_CONTROL, CACHE_CONTROL_VALUE),
        ],
        Json(badge),
    )
        .into_response()
}

async fn count_view(state: &AppState) -> Result<i64> {
    let store = state.store()?;
    let mode = state.cfg().counter.increment_mode;

    let started = Instant::now();
    let res = record_view(store.as_ref(), mode).await;
    state
        .metrics()
        .store_duration
        .observe(&[("mode", mode.as_str())], started.elapsed());
    res
}
