use std::fs::{self, OpenOptions};
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};

use anyhow::Context;
use async_trait::async_trait;
use chrono::{DateTime, NaiveDate, Utc};
use serde::{de::DeserializeOwned, Deserialize, Serialize};
use uuid::Uuid;

use super::{FoodLogStore, MoodStore, UserStore};
use crate::error::{AppError, AppResult};
use crate::models::{food_log::FoodLogEntry, mood_entry::MoodEntry, user::User};

const USERS_FILE: &str = "users.csv";
const MOODS_FILE: &str = "mood_entries.csv";
const FOOD_LOGS_FILE: &str = "food_logs.csv";

/// Flat-file storage: one CSV per table under a data directory.
///
/// Check-ins are appended. Food logs are rewritten through a temp file and a
/// rename so a crash never leaves a half-written table. All file access is
/// serialized through one lock and runs on the blocking pool.
pub struct CsvStore {
    dir: PathBuf,
    lock: Arc<Mutex<()>>,
}

// `User` hides the password hash from JSON, so users get their own row type.
#[derive(Debug, Serialize, Deserialize)]
struct UserRow {
    id: Uuid,
    username: String,
    email: Option<String>,
    password_hash: Option<String>,
    is_guest: bool,
    created_at: DateTime<Utc>,
}

impl From<&User> for UserRow {
    fn from(u: &User) -> Self {
        Self {
            id: u.id,
            username: u.username.clone(),
            email: u.email.clone(),
            password_hash: u.password_hash.clone(),
            is_guest: u.is_guest,
            created_at: u.created_at,
        }
    }
}

impl From<UserRow> for User {
    fn from(r: UserRow) -> Self {
        Self {
            id: r.id,
            username: r.username,
            email: r.email,
            password_hash: r.password_hash,
            is_guest: r.is_guest,
            created_at: r.created_at,
        }
    }
}

impl CsvStore {
    pub fn open(dir: impl AsRef<Path>) -> anyhow::Result<Self> {
        let dir = dir.as_ref().to_path_buf();
        fs::create_dir_all(&dir)
            .with_context(|| format!("create data dir {}", dir.display()))?;
        Ok(Self {
            dir,
            lock: Arc::new(Mutex::new(())),
        })
    }

    async fn with_files<T, F>(&self, f: F) -> AppResult<T>
    where
        F: FnOnce(&Path) -> anyhow::Result<T> + Send + 'static,
        T: Send + 'static,
    {
        let dir = self.dir.clone();
        let lock = self.lock.clone();
        let out = tokio::task::spawn_blocking(move || {
            let _guard = lock
                .lock()
                .map_err(|_| anyhow::anyhow!("csv store lock poisoned"))?;
            f(&dir)
        })
        .await
        .context("csv store task failed")??;
        Ok(out)
    }
}

fn read_rows<T: DeserializeOwned>(path: &Path) -> anyhow::Result<Vec<T>> {
    if !path.exists() {
        return Ok(Vec::new());
    }
    let mut rdr = csv::Reader::from_path(path)
        .with_context(|| format!("open {}", path.display()))?;
    let mut rows = Vec::new();
    for row in rdr.deserialize() {
        rows.push(row.with_context(|| format!("parse row in {}", path.display()))?);
    }
    Ok(rows)
}

fn append_row<T: Serialize>(path: &Path, row: &T) -> anyhow::Result<()> {
    let file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .with_context(|| format!("open {} for append", path.display()))?;
    let is_new = file.metadata()?.len() == 0;

    let mut wtr = csv::WriterBuilder::new()
        .has_headers(is_new)
        .from_writer(file);
    wtr.serialize(row)?;
    wtr.flush()?;
    Ok(())
}

fn rewrite_rows<T: Serialize>(path: &Path, rows: &[T]) -> anyhow::Result<()> {
    let tmp = path.with_extension("csv.tmp");
    {
        let mut wtr = csv::Writer::from_path(&tmp)
            .with_context(|| format!("create {}", tmp.display()))?;
        for row in rows {
            wtr.serialize(row)?;
        }
        wtr.flush()?;
    }
    fs::rename(&tmp, path).with_context(|| format!("replace {}", path.display()))?;
    Ok(())
}

#[async_trait]
impl UserStore for CsvStore {
    async fn create(&self, user: &User) -> AppResult<()> {
        let row = UserRow::from(user);
        let taken = self
            .with_files(move |dir| {
                let path = dir.join(USERS_FILE);
                let rows: Vec<UserRow> = read_rows(&path)?;
                let taken = rows.iter().any(|r| {
                    r.username == row.username || (row.email.is_some() && r.email == row.email)
                });
                if !taken {
                    append_row(&path, &row)?;
                }
                Ok(taken)
            })
            .await?;

        if taken {
            return Err(AppError::Conflict(
                "Username or email already registered.".into(),
            ));
        }
        Ok(())
    }

    async fn find_by_id(&self, id: Uuid) -> AppResult<Option<User>> {
        self.find_user(move |r| r.id == id).await
    }

    async fn find_by_username(&self, username: &str) -> AppResult<Option<User>> {
        let username = username.to_string();
        self.find_user(move |r| r.username == username).await
    }

    async fn find_by_email(&self, email: &str) -> AppResult<Option<User>> {
        let email = email.to_string();
        self.find_user(move |r| r.email.as_deref() == Some(email.as_str()))
            .await
    }
}

impl CsvStore {
    async fn find_user<P>(&self, pred: P) -> AppResult<Option<User>>
    where
        P: Fn(&UserRow) -> bool + Send + 'static,
    {
        self.with_files(move |dir| {
            let rows: Vec<UserRow> = read_rows(&dir.join(USERS_FILE))?;
            Ok(rows.into_iter().find(|r| pred(r)).map(User::from))
        })
        .await
    }
}

#[async_trait]
impl MoodStore for CsvStore {
    async fn save(&self, entry: &MoodEntry) -> AppResult<()> {
        let entry = entry.clone();
        self.with_files(move |dir| append_row(&dir.join(MOODS_FILE), &entry))
            .await
    }

    async fn list_for(&self, user_id: Uuid, limit: Option<i64>) -> AppResult<Vec<MoodEntry>> {
        self.with_files(move |dir| {
            let mut entries: Vec<MoodEntry> = read_rows::<MoodEntry>(&dir.join(MOODS_FILE))?
                .into_iter()
                .filter(|e| e.user_id == user_id)
                .collect();
            entries.sort_by(|a, b| b.created_at.cmp(&a.created_at));
            if let Some(limit) = limit {
                entries.truncate(usize::try_from(limit.max(0)).unwrap_or(usize::MAX));
            }
            Ok(entries)
        })
        .await
    }

    async fn count_for(&self, user_id: Uuid) -> AppResult<i64> {
        self.with_files(move |dir| {
            let entries: Vec<MoodEntry> = read_rows(&dir.join(MOODS_FILE))?;
            Ok(entries.iter().filter(|e| e.user_id == user_id).count() as i64)
        })
        .await
    }
}

#[async_trait]
impl FoodLogStore for CsvStore {
    async fn save(&self, entry: &FoodLogEntry) -> AppResult<FoodLogEntry> {
        let entry = entry.clone();
        self.with_files(move |dir| {
            let path = dir.join(FOOD_LOGS_FILE);
            let mut rows: Vec<FoodLogEntry> = read_rows(&path)?;

            let stored = match rows
                .iter()
                .position(|r| r.user_id == entry.user_id && r.log_date == entry.log_date)
            {
                Some(idx) => {
                    rows[idx].overwrite(&entry);
                    rows[idx].clone()
                }
                None => {
                    rows.push(entry.clone());
                    entry
                }
            };

            rewrite_rows(&path, &rows)?;
            Ok(stored)
        })
        .await
    }

    async fn list_for(
        &self,
        user_id: Uuid,
        start: NaiveDate,
        end: NaiveDate,
    ) -> AppResult<Vec<FoodLogEntry>> {
        self.with_files(move |dir| {
            let mut logs: Vec<FoodLogEntry> = read_rows::<FoodLogEntry>(&dir.join(FOOD_LOGS_FILE))?
                .into_iter()
                .filter(|e| e.user_id == user_id && e.log_date >= start && e.log_date <= end)
                .collect();
            logs.sort_by(|a, b| b.log_date.cmp(&a.log_date));
            Ok(logs)
        })
        .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::wellness::mood::{classify, MoodCategory};
    use crate::wellness::nutrition::analyze_intake;

    fn temp_store() -> (CsvStore, PathBuf) {
        let dir = std::env::temp_dir().join(format!("health-whisperer-{}", Uuid::new_v4()));
        (CsvStore::open(&dir).unwrap(), dir)
    }

    #[tokio::test]
    async fn test_users_persist_across_reopen() {
        let (store, dir) = temp_store();
        let user = User::registered("rio", "rio@example.com", "$argon2id$h".into());
        store.create(&user).await.unwrap();
        store.create(&User::guest()).await.unwrap();

        let reopened = CsvStore::open(&dir).unwrap();
        let found = reopened.find_by_username("rio").await.unwrap().unwrap();
        assert_eq!(found.id, user.id);
        assert_eq!(found.password_hash.as_deref(), Some("$argon2id$h"));
        assert!(reopened.find_by_email("rio@example.com").await.unwrap().is_some());
        assert!(reopened.find_by_id(Uuid::new_v4()).await.unwrap().is_none());

        let dup = reopened
            .create(&User::registered("rio", "x@example.com", "h".into()))
            .await;
        assert!(matches!(dup, Err(AppError::Conflict(_))));

        fs::remove_dir_all(dir).ok();
    }

    #[tokio::test]
    async fn test_mood_entries_append_and_read_back() {
        let (store, dir) = temp_store();
        let user = Uuid::new_v4();
        let text = "I'm feeling stressed and overwhelmed";
        let entry = MoodEntry::new(user, text, classify(text), "breathe".into(), "keyword");
        MoodStore::save(&store, &entry).await.unwrap();
        MoodStore::save(
            &store,
            &MoodEntry::new(user, "fine, thanks", MoodCategory::Neutral, "ok".into(), "keyword"),
        )
        .await
        .unwrap();

        let entries = MoodStore::list_for(&store, user, None).await.unwrap();
        assert_eq!(entries.len(), 2);
        assert!(entries.iter().any(|e| *e == entry));
        assert_eq!(MoodStore::count_for(&store, user).await.unwrap(), 2);

        // Only one header line no matter how many appends.
        let raw = fs::read_to_string(dir.join(MOODS_FILE)).unwrap();
        assert_eq!(raw.lines().filter(|l| l.starts_with("id,")).count(), 1);

        fs::remove_dir_all(dir).ok();
    }

    #[tokio::test]
    async fn test_food_log_upsert_by_date() {
        let (store, dir) = temp_store();
        let user = Uuid::new_v4();
        let day = NaiveDate::from_ymd_opt(2026, 6, 1).unwrap();

        for (meals, water) in [("rice", 2), ("large pizza and fries", 5)] {
            let e = FoodLogEntry::from_analysis(user, day, water, meals, &analyze_intake(meals, water));
            FoodLogStore::save(&store, &e).await.unwrap();
        }

        let logs = FoodLogStore::list_for(&store, user, day, day).await.unwrap();
        assert_eq!(logs.len(), 1);
        assert_eq!(logs[0].meals, "large pizza and fries");
        assert_eq!(logs[0].total_calories, 975);
        assert_eq!(logs[0].water_glasses, 5);
        assert!(!dir.join("food_logs.csv.tmp").exists());

        fs::remove_dir_all(dir).ok();
    }
}
