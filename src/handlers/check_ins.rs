use axum::{
    extract::{Query, State},
    Extension, Json,
};

use crate::auth::middleware::AuthUser;
use crate::dto::{CheckInRequest, CheckInResponse, HistoryQuery};
use crate::error::{AppError, AppResult};
use crate::models::mood_entry::MoodEntry;
use crate::services::suggester::suggest_or_fallback;
use crate::wellness::mood::classify;
use crate::AppState;

const SAVE_WARNING: &str = "We couldn't save this check-in, but here's your suggestion.";

pub(crate) fn require_mood_input(raw: &str) -> AppResult<&str> {
    let text = raw.trim();
    if text.is_empty() {
        return Err(AppError::Validation(
            "Please tell us how you're feeling.".into(),
        ));
    }
    Ok(text)
}

pub async fn create_check_in(
    State(state): State<AppState>,
    Extension(auth_user): Extension<AuthUser>,
    Json(body): Json<CheckInRequest>,
) -> AppResult<Json<CheckInResponse>> {
    let mood_input = require_mood_input(&body.mood_input)?;

    let category = classify(mood_input);
    let suggestion = suggest_or_fallback(state.suggester.as_ref(), mood_input, category).await;
    let entry = MoodEntry::new(
        auth_user.id,
        mood_input,
        category,
        suggestion.text.clone(),
        suggestion.source,
    );

    // Storage trouble must not cost the user their suggestion.
    let (logged, warning) = match state.stores.moods.save(&entry).await {
        Ok(()) => {
            tracing::info!(user_id = %auth_user.id, category = %category, "Check-in recorded");
            (true, None)
        }
        Err(e) => {
            tracing::error!(user_id = %auth_user.id, error = %e, "Failed to store check-in");
            (false, Some(SAVE_WARNING.to_string()))
        }
    };

    Ok(Json(CheckInResponse {
        category,
        suggestion: suggestion.text,
        source: suggestion.source,
        entry,
        logged,
        warning,
    }))
}

pub async fn list_check_ins(
    State(state): State<AppState>,
    Extension(auth_user): Extension<AuthUser>,
    Query(query): Query<HistoryQuery>,
) -> AppResult<Json<Vec<MoodEntry>>> {
    if matches!(query.limit, Some(n) if n < 1) {
        return Err(AppError::Validation("Limit must be at least 1.".into()));
    }
    let entries = state.stores.moods.list_for(auth_user.id, query.limit).await?;
    Ok(Json(entries))
}

pub async fn latest_check_in(
    State(state): State<AppState>,
    Extension(auth_user): Extension<AuthUser>,
) -> AppResult<Json<MoodEntry>> {
    state
        .stores
        .moods
        .list_for(auth_user.id, Some(1))
        .await?
        .into_iter()
        .next()
        .map(Json)
        .ok_or_else(|| AppError::NotFound("Please complete a check-in first.".into()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_blank_input_rejected() {
        assert!(matches!(require_mood_input("   \n"), Err(AppError::Validation(_))));
        assert_eq!(require_mood_input("  tired  ").unwrap(), "tired");
    }
}
