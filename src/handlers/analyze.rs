//! Stateless endpoints: classify or analyze without an account or storage.

use axum::{extract::State, Json};
use validator::Validate;

use crate::dto::{AnalyzeFoodRequest, AnalyzeMoodResponse, CheckInRequest};
use crate::error::AppResult;
use crate::handlers::{check_ins::require_mood_input, food_logs::require_meals};
use crate::services::suggester::suggest_or_fallback;
use crate::wellness::mood::classify;
use crate::wellness::nutrition::{analyze_intake, IntakeAnalysis};
use crate::AppState;

pub async fn analyze_mood(
    State(state): State<AppState>,
    Json(body): Json<CheckInRequest>,
) -> AppResult<Json<AnalyzeMoodResponse>> {
    let mood_input = require_mood_input(&body.mood_input)?;
    let category = classify(mood_input);
    let suggestion = suggest_or_fallback(state.suggester.as_ref(), mood_input, category).await;

    Ok(Json(AnalyzeMoodResponse {
        category,
        suggestion: suggestion.text,
        source: suggestion.source,
    }))
}

pub async fn analyze_food(Json(body): Json<AnalyzeFoodRequest>) -> AppResult<Json<IntakeAnalysis>> {
    body.validate()?;
    let meals = require_meals(&body.meals)?;
    Ok(Json(analyze_intake(meals, body.water_glasses)))
}
