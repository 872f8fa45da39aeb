//! Storage capabilities injected into handlers.
//!
//! Each backend implements all three traits; `Stores` hands them out as trait
//! objects so handlers never know which one is running.

use std::sync::Arc;

use anyhow::Context;
use async_trait::async_trait;
use chrono::NaiveDate;
use sqlx::PgPool;
use uuid::Uuid;

use crate::config::{Config, StorageBackend};
use crate::error::AppResult;
use crate::models::{food_log::FoodLogEntry, mood_entry::MoodEntry, user::User};

pub mod csv_file;
pub mod memory;
pub mod pool;
pub mod postgres;

#[async_trait]
pub trait UserStore: Send + Sync {
    /// Fails with `AppError::Conflict` when the username or email is taken.
    async fn create(&self, user: &User) -> AppResult<()>;
    async fn find_by_id(&self, id: Uuid) -> AppResult<Option<User>>;
    async fn find_by_username(&self, username: &str) -> AppResult<Option<User>>;
    async fn find_by_email(&self, email: &str) -> AppResult<Option<User>>;
}

#[async_trait]
pub trait MoodStore: Send + Sync {
    /// Append one check-in.
    async fn save(&self, entry: &MoodEntry) -> AppResult<()>;
    /// Newest first, at most `limit` entries when given.
    async fn list_for(&self, user_id: Uuid, limit: Option<i64>) -> AppResult<Vec<MoodEntry>>;
    async fn count_for(&self, user_id: Uuid) -> AppResult<i64>;
}

#[async_trait]
pub trait FoodLogStore: Send + Sync {
    /// Insert, or overwrite the existing entry for the same (user, date).
    /// Returns what is stored afterwards.
    async fn save(&self, entry: &FoodLogEntry) -> AppResult<FoodLogEntry>;
    /// Entries with `start <= log_date <= end`, latest date first.
    async fn list_for(
        &self,
        user_id: Uuid,
        start: NaiveDate,
        end: NaiveDate,
    ) -> AppResult<Vec<FoodLogEntry>>;
}

#[derive(Clone)]
pub struct Stores {
    pub users: Arc<dyn UserStore>,
    pub moods: Arc<dyn MoodStore>,
    pub food_logs: Arc<dyn FoodLogStore>,
    /// Present for the Postgres backend; used for readiness checks.
    pub pool: Option<PgPool>,
}

impl Stores {
    pub fn from_backend<B>(backend: Arc<B>, pool: Option<PgPool>) -> Self
    where
        B: UserStore + MoodStore + FoodLogStore + 'static,
    {
        Self {
            users: backend.clone(),
            moods: backend.clone(),
            food_logs: backend,
            pool,
        }
    }

    pub fn memory() -> Self {
        Self::from_backend(Arc::new(memory::MemoryStore::default()), None)
    }

    /// Open whichever backend the config selects. Postgres runs migrations.
    pub async fn open(config: &Config) -> anyhow::Result<Self> {
        match config.storage_backend {
            StorageBackend::Postgres => {
                let url = config
                    .database_url
                    .as_deref()
                    .context("DATABASE_URL is required for the postgres backend")?;
                let pool = pool::create_pool(url).await?;
                sqlx::migrate!("./migrations")
                    .run(&pool)
                    .await
                    .context("run database migrations")?;
                tracing::info!("Database migrations applied");
                let store = Arc::new(postgres::PgStore::new(pool.clone()));
                Ok(Self::from_backend(store, Some(pool)))
            }
            StorageBackend::Csv => {
                let store = csv_file::CsvStore::open(&config.data_dir)?;
                tracing::info!(data_dir = %config.data_dir.display(), "Using CSV storage");
                Ok(Self::from_backend(Arc::new(store), None))
            }
            StorageBackend::Memory => {
                tracing::warn!("Using in-memory storage; data is lost on restart");
                Ok(Self::memory())
            }
        }
    }
}
