use axum::{extract::State, http::StatusCode, Json};
use serde_json::{json, Value};

use crate::AppState;

pub async fn health_check() -> Json<Value> {
    Json(json!({
        "status": "ok",
        "service": "health-whisperer-api",
        "version": env!("CARGO_PKG_VERSION"),
    }))
}

/// Pings the database when running on Postgres. File and memory storage are
/// ready as soon as the process is up.
pub async fn readyz(State(state): State<AppState>) -> (StatusCode, Json<Value>) {
    let backend = state.config.storage_backend.as_str();

    let Some(pool) = state.stores.pool.as_ref() else {
        return (
            StatusCode::OK,
            Json(json!({
                "status": "ready",
                "checks": { "storage": backend },
            })),
        );
    };

    let db_ok = sqlx::query_scalar::<_, i32>("SELECT 1")
        .fetch_one(pool)
        .await
        .is_ok();

    if db_ok {
        (
            StatusCode::OK,
            Json(json!({
                "status": "ready",
                "checks": { "storage": backend, "database": "ok" },
            })),
        )
    } else {
        (
            StatusCode::SERVICE_UNAVAILABLE,
            Json(json!({
                "status": "not_ready",
                "checks": { "storage": backend, "database": "failed" },
            })),
        )
    }
}
