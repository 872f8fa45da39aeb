//! # Health Whisperer: request and response DTOs
//!
//! All API contract types in one module.
//!
//! Conventions:
//! - `*Request`  → deserialized from client JSON body or query params
//! - `*Response` → serialized to client JSON
//! - Field rules are expressed via `validator` derive macros; blank free text
//!   is rejected in the handlers after trimming

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::models::{food_log::FoodLogEntry, mood_entry::MoodEntry};
use crate::wellness::chart::{MoodCount, TimelinePoint};
use crate::wellness::mood::MoodCategory;
use crate::wellness::nutrition::IntakeAnalysis;

// ============================================================================
// Auth
// ============================================================================

/// POST /api/auth/register
#[derive(Debug, Deserialize, Validate)]
pub struct RegisterRequest {
    #[validate(length(min = 1, max = 80, message = "Username must be 1-80 characters."))]
    pub username: String,

    #[validate(email(message = "Please enter a valid email address."))]
    #[validate(length(max = 254, message = "Email too long."))]
    pub email: String,

    #[validate(length(min = 6, message = "Password must be at least 6 characters long."))]
    pub password: String,
}

/// POST /api/auth/login
#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub username: String,
    pub password: String,
}

/// POST /api/auth/refresh
#[derive(Debug, Deserialize)]
pub struct RefreshRequest {
    pub refresh_token: String,
}

// ============================================================================
// Check-ins
// ============================================================================

/// POST /api/check-ins and POST /api/analyze/mood
#[derive(Debug, Deserialize)]
pub struct CheckInRequest {
    #[serde(default)]
    pub mood_input: String,
}

/// GET /api/check-ins query params
#[derive(Debug, Deserialize)]
pub struct HistoryQuery {
    pub limit: Option<i64>,
}

/// Response for POST /api/check-ins
#[derive(Debug, Serialize)]
pub struct CheckInResponse {
    pub category: MoodCategory,
    pub suggestion: String,
    pub source: &'static str,
    pub entry: MoodEntry,
    /// False when the entry could not be stored; the result is still valid.
    pub logged: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub warning: Option<String>,
}

/// Response for POST /api/analyze/mood
#[derive(Debug, Serialize)]
pub struct AnalyzeMoodResponse {
    pub category: MoodCategory,
    pub suggestion: String,
    pub source: &'static str,
}

// ============================================================================
// Dashboard
// ============================================================================

/// GET /api/dashboard
#[derive(Debug, Serialize)]
pub struct DashboardResponse {
    pub total_checkins: i64,
    /// Five most recent check-ins, newest first.
    pub recent: Vec<MoodEntry>,
    pub mood_counts: Vec<MoodCount>,
    pub mood_timeline: Vec<TimelinePoint>,
}

// ============================================================================
// Food logs
// ============================================================================

/// POST /api/food-logs
#[derive(Debug, Deserialize, Validate)]
pub struct FoodLogRequest {
    /// Defaults to today (UTC).
    pub log_date: Option<NaiveDate>,

    #[serde(default)]
    #[validate(range(min = 0, max = 100, message = "Water glasses must be between 0 and 100."))]
    pub water_glasses: i32,

    #[serde(default)]
    pub meals: String,
}

/// Response for POST /api/food-logs
#[derive(Debug, Serialize)]
pub struct FoodLogResponse {
    pub entry: FoodLogEntry,
    pub analysis: IntakeAnalysis,
}

/// POST /api/analyze/food
#[derive(Debug, Deserialize, Validate)]
pub struct AnalyzeFoodRequest {
    #[serde(default)]
    #[validate(range(min = 0, max = 100, message = "Water glasses must be between 0 and 100."))]
    pub water_glasses: i32,

    #[serde(default)]
    pub meals: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_register_rules() {
        let ok = RegisterRequest {
            username: "mira".into(),
            email: "mira@example.com".into(),
            password: "secret1".into(),
        };
        assert!(ok.validate().is_ok());

        let short = RegisterRequest {
            password: "abc".into(),
            ..ok
        };
        assert!(short.validate().is_err());

        let bad_email = RegisterRequest {
            username: "mira".into(),
            email: "not-an-email".into(),
            password: "secret1".into(),
        };
        assert!(bad_email.validate().is_err());
    }

    #[test]
    fn test_negative_water_rejected() {
        let req: FoodLogRequest =
            serde_json::from_str(r#"{"water_glasses": -1, "meals": "rice"}"#).unwrap();
        assert!(req.validate().is_err());

        let req: FoodLogRequest = serde_json::from_str(r#"{"meals": "rice"}"#).unwrap();
        assert!(req.validate().is_ok());
        assert_eq!(req.water_glasses, 0);
        assert!(req.log_date.is_none());
    }
}
