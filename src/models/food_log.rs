use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

use crate::wellness::nutrition::IntakeAnalysis;

/// A user's food and water record for one day. At most one per (user, date).
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, PartialEq)]
pub struct FoodLogEntry {
    pub id: Uuid,
    pub user_id: Uuid,
    pub log_date: NaiveDate,
    pub water_glasses: i32,
    pub meals: String,
    pub total_calories: i32,
    pub advice: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl FoodLogEntry {
    pub fn from_analysis(
        user_id: Uuid,
        log_date: NaiveDate,
        water_glasses: i32,
        meals: &str,
        analysis: &IntakeAnalysis,
    ) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4(),
            user_id,
            log_date,
            water_glasses,
            meals: meals.to_string(),
            total_calories: i32::try_from(analysis.total_calories).unwrap_or(i32::MAX),
            advice: analysis.advice.clone(),
            created_at: now,
            updated_at: now,
        }
    }

    /// Copy the submitted fields onto an existing same-day record, keeping its
    /// identity and creation time.
    pub fn overwrite(&mut self, newer: &FoodLogEntry) {
        self.water_glasses = newer.water_glasses;
        self.meals = newer.meals.clone();
        self.total_calories = newer.total_calories;
        self.advice = newer.advice.clone();
        self.updated_at = newer.updated_at;
    }
}

#[derive(Debug, Deserialize)]
pub struct FoodLogQuery {
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::wellness::nutrition::analyze_intake;

    #[test]
    fn test_overwrite_keeps_identity() {
        let user = Uuid::new_v4();
        let day = NaiveDate::from_ymd_opt(2026, 3, 1).unwrap();
        let mut first =
            FoodLogEntry::from_analysis(user, day, 2, "rice", &analyze_intake("rice", 2));
        let second =
            FoodLogEntry::from_analysis(user, day, 9, "2 eggs", &analyze_intake("2 eggs", 9));

        let (id, created) = (first.id, first.created_at);
        first.overwrite(&second);

        assert_eq!(first.id, id);
        assert_eq!(first.created_at, created);
        assert_eq!(first.water_glasses, 9);
        assert_eq!(first.meals, "2 eggs");
        assert_eq!(first.total_calories, 140);
        assert_eq!(first.advice, second.advice);
    }
}
