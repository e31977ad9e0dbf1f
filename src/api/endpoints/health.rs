//! Service health endpoint.

use axum::extract::State;
use axum::Json;
use serde::Serialize;

use crate::api::error::ApiError;
use crate::api::types::ApiContext;
use crate::db::sqlite;

#[derive(Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub version: &'static str,
    pub schema_version: i64,
}

/// `GET /api/health` — liveness + schema check.
pub async fn check(State(ctx): State<ApiContext>) -> Result<Json<HealthResponse>, ApiError> {
    let conn = ctx.lock_db()?;
    let schema_version = sqlite::get_current_version(&conn);

    Ok(Json(HealthResponse {
        status: "ok",
        version: crate::config::APP_VERSION,
        schema_version,
    }))
}
