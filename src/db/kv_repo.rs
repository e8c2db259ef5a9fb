use async_trait::async_trait;
use chrono::Utc;
use sqlx::SqlitePool;

use liftlog_core::{KeyValueStore, KvError};

/// Key-value substrate backed by the `kv_store` table.
#[derive(Clone)]
pub struct SqliteKeyValueStore {
    pool: SqlitePool,
}

fn backend(e: sqlx::Error) -> KvError {
    KvError::Backend(e.to_string())
}

impl SqliteKeyValueStore {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl KeyValueStore for SqliteKeyValueStore {
    async fn get(&self, key: &str) -> Result<Option<String>, KvError> {
        let row: Option<(String,)> = sqlx::query_as("SELECT value FROM kv_store WHERE key = ?")
            .bind(key)
            .fetch_optional(&self.pool)
            .await
            .map_err(backend)?;
        Ok(row.map(|(value,)| value))
    }

    async fn set(&self, key: &str, value: &str) -> Result<(), KvError> {
        let updated_at = Utc::now().to_rfc3339();

        sqlx::query(
            r#"
            INSERT INTO kv_store (key, value, updated_at)
            VALUES (?, ?, ?)
            ON CONFLICT(key) DO UPDATE SET value = excluded.value, updated_at = excluded.updated_at
            "#,
        )
        .bind(key)
        .bind(value)
        .bind(&updated_at)
        .execute(&self.pool)
        .await
        .map_err(backend)?;

        Ok(())
    }

    async fn remove(&self, key: &str) -> Result<(), KvError> {
        sqlx::query("DELETE FROM kv_store WHERE key = ?")
            .bind(key)
            .execute(&self.pool)
            .await
            .map_err(backend)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::init_db;
    use chrono::NaiveDate;
    use liftlog_core::{Exercise, RetryPolicy, Set, SetUnit, Workout, WorkoutRepository, WorkoutStore};
    use std::sync::Arc;
    use tempfile::TempDir;

    struct TestContext {
        store: SqliteKeyValueStore,
        _temp_dir: TempDir,
    }

    async fn setup() -> TestContext {
        let temp_dir = TempDir::new().unwrap();
        let db_path = temp_dir.path().join("test.db");
        let pool = init_db(&db_path).await.unwrap();
        TestContext {
            store: SqliteKeyValueStore::new(pool),
            _temp_dir: temp_dir,
        }
    }

    #[tokio::test]
    async fn test_get_missing_key() {
        let ctx = setup().await;
        assert!(ctx.store.get("workouts").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_set_upserts() {
        let ctx = setup().await;
        ctx.store.set("theme", "light").await.unwrap();
        ctx.store.set("theme", "dark").await.unwrap();

        assert_eq!(ctx.store.get("theme").await.unwrap().as_deref(), Some("dark"));
    }

    #[tokio::test]
    async fn test_remove() {
        let ctx = setup().await;
        ctx.store.set("weight_unit", "lbs").await.unwrap();
        ctx.store.remove("weight_unit").await.unwrap();
        assert!(ctx.store.get("weight_unit").await.unwrap().is_none());

        // Removing a missing key is fine
        ctx.store.remove("weight_unit").await.unwrap();
    }

    #[tokio::test]
    async fn test_workouts_persist_through_sqlite() {
        let ctx = setup().await;
        let kv = Arc::new(ctx.store.clone());
        let store = Arc::new(WorkoutStore::new(kv).with_retry_policy(RetryPolicy::none()));
        let repo = WorkoutRepository::open(store.clone()).await;

        let date = NaiveDate::from_ymd_opt(2025, 9, 15).unwrap();
        let workout = Workout::new("1", "Leg Day", date).with_exercise(
            Exercise::new("e1", "Squats").with_set(Set::new(5, 100.0, SetUnit::Kilograms)),
        );
        repo.add_workout(workout.clone()).await.unwrap();

        assert_eq!(store.get_workouts_for_date(date).await, vec![workout]);
        let raw = ctx.store.get("workouts").await.unwrap().unwrap();
        assert!(raw.starts_with('['));
        assert!(raw.contains("\"2025-09-15\""));
    }
}
