use async_trait::async_trait;
use chrono::NaiveDate;
use tokio::sync::RwLock;
use uuid::Uuid;

use super::{FoodLogStore, MoodStore, UserStore};
use crate::error::{AppError, AppResult};
use crate::models::{food_log::FoodLogEntry, mood_entry::MoodEntry, user::User};

#[derive(Default)]
struct Tables {
    users: Vec<User>,
    moods: Vec<MoodEntry>,
    food_logs: Vec<FoodLogEntry>,
}

/// Process-local storage for tests and throwaway runs.
#[derive(Default)]
pub struct MemoryStore {
    tables: RwLock<Tables>,
}

#[async_trait]
impl UserStore for MemoryStore {
    async fn create(&self, user: &User) -> AppResult<()> {
        let mut t = self.tables.write().await;
        let taken = t.users.iter().any(|u| {
            u.username == user.username || (user.email.is_some() && u.email == user.email)
        });
        if taken {
            return Err(AppError::Conflict(
                "Username or email already registered.".into(),
            ));
        }
        t.users.push(user.clone());
        Ok(())
    }

    async fn find_by_id(&self, id: Uuid) -> AppResult<Option<User>> {
        let t = self.tables.read().await;
        Ok(t.users.iter().find(|u| u.id == id).cloned())
    }

    async fn find_by_username(&self, username: &str) -> AppResult<Option<User>> {
        let t = self.tables.read().await;
        Ok(t.users.iter().find(|u| u.username == username).cloned())
    }

    async fn find_by_email(&self, email: &str) -> AppResult<Option<User>> {
        let t = self.tables.read().await;
        Ok(t
            .users
            .iter()
            .find(|u| u.email.as_deref() == Some(email))
            .cloned())
    }
}

#[async_trait]
impl MoodStore for MemoryStore {
    async fn save(&self, entry: &MoodEntry) -> AppResult<()> {
        self.tables.write().await.moods.push(entry.clone());
        Ok(())
    }

    async fn list_for(&self, user_id: Uuid, limit: Option<i64>) -> AppResult<Vec<MoodEntry>> {
        let t = self.tables.read().await;
        let mut entries: Vec<MoodEntry> = t
            .moods
            .iter()
            .filter(|e| e.user_id == user_id)
            .cloned()
            .collect();
        entries.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        if let Some(limit) = limit {
            entries.truncate(usize::try_from(limit.max(0)).unwrap_or(usize::MAX));
        }
        Ok(entries)
    }

    async fn count_for(&self, user_id: Uuid) -> AppResult<i64> {
        let t = self.tables.read().await;
        Ok(t.moods.iter().filter(|e| e.user_id == user_id).count() as i64)
    }
}

#[async_trait]
impl FoodLogStore for MemoryStore {
    async fn save(&self, entry: &FoodLogEntry) -> AppResult<FoodLogEntry> {
        let mut t = self.tables.write().await;
        let existing = t
            .food_logs
            .iter()
            .position(|e| e.user_id == entry.user_id && e.log_date == entry.log_date);

        let stored = match existing {
            Some(idx) => {
                t.food_logs[idx].overwrite(entry);
                t.food_logs[idx].clone()
            }
            None => {
                t.food_logs.push(entry.clone());
                entry.clone()
            }
        };
        Ok(stored)
    }

    async fn list_for(
        &self,
        user_id: Uuid,
        start: NaiveDate,
        end: NaiveDate,
    ) -> AppResult<Vec<FoodLogEntry>> {
        let t = self.tables.read().await;
        let mut logs: Vec<FoodLogEntry> = t
            .food_logs
            .iter()
            .filter(|e| e.user_id == user_id && e.log_date >= start && e.log_date <= end)
            .cloned()
            .collect();
        logs.sort_by(|a, b| b.log_date.cmp(&a.log_date));
        Ok(logs)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::wellness::mood::MoodCategory;
    use crate::wellness::nutrition::analyze_intake;

    fn day(d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 5, d).unwrap()
    }

    fn food_entry(user: Uuid, date: NaiveDate, meals: &str, water: i32) -> FoodLogEntry {
        FoodLogEntry::from_analysis(user, date, water, meals, &analyze_intake(meals, water))
    }

    #[tokio::test]
    async fn test_same_day_food_log_is_overwritten() {
        let store = MemoryStore::default();
        let user = Uuid::new_v4();

        let first = FoodLogStore::save(&store, &food_entry(user, day(1), "rice", 3))
            .await
            .unwrap();
        let second = FoodLogStore::save(&store, &food_entry(user, day(1), "2 eggs and rice", 8))
            .await
            .unwrap();

        assert_eq!(second.id, first.id);
        let logs = FoodLogStore::list_for(&store, user, day(1), day(1)).await.unwrap();
        assert_eq!(logs.len(), 1);
        assert_eq!(logs[0].meals, "2 eggs and rice");
        assert_eq!(logs[0].water_glasses, 8);
        assert_eq!(logs[0].total_calories, 270);
    }

    #[tokio::test]
    async fn test_food_logs_are_per_user_and_ranged() {
        let store = MemoryStore::default();
        let (a, b) = (Uuid::new_v4(), Uuid::new_v4());
        for d in 1..=3 {
            FoodLogStore::save(&store, &food_entry(a, day(d), "apple", 4)).await.unwrap();
        }
        FoodLogStore::save(&store, &food_entry(b, day(2), "pizza", 1)).await.unwrap();

        let logs = FoodLogStore::list_for(&store, a, day(2), day(3)).await.unwrap();
        let dates: Vec<NaiveDate> = logs.iter().map(|l| l.log_date).collect();
        assert_eq!(dates, vec![day(3), day(2)]);
    }

    #[tokio::test]
    async fn test_mood_entries_newest_first_with_limit() {
        let store = MemoryStore::default();
        let user = Uuid::new_v4();
        for i in 0..4 {
            let mut e = MoodEntry::new(user, &format!("entry {i}"), MoodCategory::Neutral, "s".into(), "keyword");
            e.created_at += chrono::Duration::seconds(i);
            MoodStore::save(&store, &e).await.unwrap();
        }
        MoodStore::save(
            &store,
            &MoodEntry::new(Uuid::new_v4(), "other", MoodCategory::Sad, "s".into(), "keyword"),
        )
        .await
        .unwrap();

        let latest = MoodStore::list_for(&store, user, Some(2)).await.unwrap();
        assert_eq!(latest.len(), 2);
        assert_eq!(latest[0].mood_input, "entry 3");
        assert_eq!(MoodStore::count_for(&store, user).await.unwrap(), 4);
        assert_eq!(MoodStore::list_for(&store, user, None).await.unwrap().len(), 4);
    }

    #[tokio::test]
    async fn test_duplicate_username_conflicts() {
        let store = MemoryStore::default();
        store
            .create(&User::registered("kai", "kai@example.com", "h".into()))
            .await
            .unwrap();
        let err = store
            .create(&User::registered("kai", "other@example.com", "h".into()))
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::Conflict(_)));

        // Guests share no email, so two of them never collide on it.
        store.create(&User::guest()).await.unwrap();
        store.create(&User::guest()).await.unwrap();
        assert!(store.find_by_email("kai@example.com").await.unwrap().is_some());
    }
}
