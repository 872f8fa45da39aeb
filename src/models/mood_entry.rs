use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

use crate::wellness::mood::MoodCategory;

/// One check-in: what the user wrote and what they were told. Never updated.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, PartialEq)]
pub struct MoodEntry {
    pub id: Uuid,
    pub user_id: Uuid,
    pub mood_input: String,
    pub category: MoodCategory,
    pub suggestion: String,
    /// "keyword", "general" or "fallback"
    pub suggestion_source: String,
    pub created_at: DateTime<Utc>,
}

impl MoodEntry {
    pub fn new(
        user_id: Uuid,
        mood_input: &str,
        category: MoodCategory,
        suggestion: String,
        suggestion_source: &str,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            user_id,
            mood_input: mood_input.to_string(),
            category,
            suggestion,
            suggestion_source: suggestion_source.to_string(),
            created_at: Utc::now(),
        }
    }
}
