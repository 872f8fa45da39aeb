use async_trait::async_trait;
use chrono::NaiveDate;
use sqlx::PgPool;
use uuid::Uuid;

use super::{FoodLogStore, MoodStore, UserStore};
use crate::error::{AppError, AppResult};
use crate::models::{food_log::FoodLogEntry, mood_entry::MoodEntry, user::User};

pub struct PgStore {
    db: PgPool,
}

impl PgStore {
    pub fn new(db: PgPool) -> Self {
        Self { db }
    }
}

#[async_trait]
impl UserStore for PgStore {
    async fn create(&self, user: &User) -> AppResult<()> {
        let result = sqlx::query(
            r#"
            INSERT INTO users (id, username, email, password_hash, is_guest, created_at)
            VALUES ($1, $2, $3, $4, $5, $6)
            "#,
        )
        .bind(user.id)
        .bind(&user.username)
        .bind(&user.email)
        .bind(&user.password_hash)
        .bind(user.is_guest)
        .bind(user.created_at)
        .execute(&self.db)
        .await;

        match result {
            Ok(_) => Ok(()),
            Err(sqlx::Error::Database(e)) if e.is_unique_violation() => Err(AppError::Conflict(
                "Username or email already registered.".into(),
            )),
            Err(e) => Err(e.into()),
        }
    }

    async fn find_by_id(&self, id: Uuid) -> AppResult<Option<User>> {
        let user = sqlx::query_as::<_, User>("SELECT * FROM users WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.db)
            .await?;
        Ok(user)
    }

    async fn find_by_username(&self, username: &str) -> AppResult<Option<User>> {
        let user = sqlx::query_as::<_, User>("SELECT * FROM users WHERE username = $1")
            .bind(username)
            .fetch_optional(&self.db)
            .await?;
        Ok(user)
    }

    async fn find_by_email(&self, email: &str) -> AppResult<Option<User>> {
        let user = sqlx::query_as::<_, User>("SELECT * FROM users WHERE email = $1")
            .bind(email)
            .fetch_optional(&self.db)
            .await?;
        Ok(user)
    }
}

#[async_trait]
impl MoodStore for PgStore {
    async fn save(&self, entry: &MoodEntry) -> AppResult<()> {
        sqlx::query(
            r#"
            INSERT INTO mood_entries (id, user_id, mood_input, category, suggestion, suggestion_source, created_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7)
            "#,
        )
        .bind(entry.id)
        .bind(entry.user_id)
        .bind(&entry.mood_input)
        .bind(entry.category)
        .bind(&entry.suggestion)
        .bind(&entry.suggestion_source)
        .bind(entry.created_at)
        .execute(&self.db)
        .await?;
        Ok(())
    }

    async fn list_for(&self, user_id: Uuid, limit: Option<i64>) -> AppResult<Vec<MoodEntry>> {
        // LIMIT NULL means no limit in Postgres.
        let entries = sqlx::query_as::<_, MoodEntry>(
            r#"
            SELECT * FROM mood_entries
            WHERE user_id = $1
            ORDER BY created_at DESC
            LIMIT $2
            "#,
        )
        .bind(user_id)
        .bind(limit)
        .fetch_all(&self.db)
        .await?;
        Ok(entries)
    }

    async fn count_for(&self, user_id: Uuid) -> AppResult<i64> {
        let count =
            sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM mood_entries WHERE user_id = $1")
                .bind(user_id)
                .fetch_one(&self.db)
                .await?;
        Ok(count)
    }
}

#[async_trait]
impl FoodLogStore for PgStore {
    async fn save(&self, entry: &FoodLogEntry) -> AppResult<FoodLogEntry> {
        let stored = sqlx::query_as::<_, FoodLogEntry>(
            r#"
            INSERT INTO food_logs (id, user_id, log_date, water_glasses, meals, total_calories, advice, created_at, updated_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9)
            ON CONFLICT (user_id, log_date) DO UPDATE SET
                water_glasses = EXCLUDED.water_glasses,
                meals = EXCLUDED.meals,
                total_calories = EXCLUDED.total_calories,
                advice = EXCLUDED.advice,
                updated_at = EXCLUDED.updated_at
            RETURNING *
            "#,
        )
        .bind(entry.id)
        .bind(entry.user_id)
        .bind(entry.log_date)
        .bind(entry.water_glasses)
        .bind(&entry.meals)
        .bind(entry.total_calories)
        .bind(&entry.advice)
        .bind(entry.created_at)
        .bind(entry.updated_at)
        .fetch_one(&self.db)
        .await?;
        Ok(stored)
    }

    async fn list_for(
        &self,
        user_id: Uuid,
        start: NaiveDate,
        end: NaiveDate,
    ) -> AppResult<Vec<FoodLogEntry>> {
        let logs = sqlx::query_as::<_, FoodLogEntry>(
            r#"
            SELECT * FROM food_logs
            WHERE user_id = $1 AND log_date BETWEEN $2 AND $3
            ORDER BY log_date DESC
            "#,
        )
        .bind(user_id)
        .bind(start)
        .bind(end)
        .fetch_all(&self.db)
        .await?;
        Ok(logs)
    }
}
