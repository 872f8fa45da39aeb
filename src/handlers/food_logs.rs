use axum::{
    extract::{Query, State},
    Extension, Json,
};
use chrono::Utc;
use validator::Validate;

use crate::auth::middleware::AuthUser;
use crate::dto::{FoodLogRequest, FoodLogResponse};
use crate::error::{AppError, AppResult};
use crate::models::food_log::{FoodLogEntry, FoodLogQuery};
use crate::wellness::nutrition::analyze_intake;
use crate::AppState;

const DEFAULT_RANGE_DAYS: i64 = 30;

pub(crate) fn require_meals(raw: &str) -> AppResult<&str> {
    let meals = raw.trim();
    if meals.is_empty() {
        return Err(AppError::Validation("Please describe what you ate.".into()));
    }
    Ok(meals)
}

pub async fn upsert_food_log(
    State(state): State<AppState>,
    Extension(auth_user): Extension<AuthUser>,
    Json(body): Json<FoodLogRequest>,
) -> AppResult<Json<FoodLogResponse>> {
    body.validate()?;
    let meals = require_meals(&body.meals)?;
    let log_date = body.log_date.unwrap_or_else(|| Utc::now().date_naive());

    let analysis = analyze_intake(meals, body.water_glasses);
    let entry = FoodLogEntry::from_analysis(
        auth_user.id,
        log_date,
        body.water_glasses,
        meals,
        &analysis,
    );
    let entry = state.stores.food_logs.save(&entry).await?;

    tracing::info!(
        user_id = %auth_user.id,
        log_date = %log_date,
        total_calories = analysis.total_calories,
        "Food log saved"
    );

    Ok(Json(FoodLogResponse { entry, analysis }))
}

pub async fn list_food_logs(
    State(state): State<AppState>,
    Extension(auth_user): Extension<AuthUser>,
    Query(query): Query<FoodLogQuery>,
) -> AppResult<Json<Vec<FoodLogEntry>>> {
    let end = query.end_date.unwrap_or_else(|| Utc::now().date_naive());
    let start = query
        .start_date
        .unwrap_or_else(|| end - chrono::Duration::days(DEFAULT_RANGE_DAYS));
    if start > end {
        return Err(AppError::Validation(
            "start_date must not be after end_date.".into(),
        ));
    }

    let logs = state
        .stores
        .food_logs
        .list_for(auth_user.id, start, end)
        .await?;
    Ok(Json(logs))
}
