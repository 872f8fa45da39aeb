use axum::{extract::State, Extension, Json};

use crate::auth::middleware::AuthUser;
use crate::dto::DashboardResponse;
use crate::error::AppResult;
use crate::wellness::chart::{mood_chart, CHART_WINDOW};
use crate::AppState;

const RECENT_COUNT: usize = 5;

pub async fn get_dashboard(
    State(state): State<AppState>,
    Extension(auth_user): Extension<AuthUser>,
) -> AppResult<Json<DashboardResponse>> {
    let total_checkins = state.stores.moods.count_for(auth_user.id).await?;
    let window = state
        .stores
        .moods
        .list_for(auth_user.id, Some(CHART_WINDOW))
        .await?;

    let chart = mood_chart(&window);
    let recent = window.into_iter().take(RECENT_COUNT).collect();

    Ok(Json(DashboardResponse {
        total_checkins,
        recent,
        mood_counts: chart.mood_counts,
        mood_timeline: chart.mood_timeline,
    }))
}
