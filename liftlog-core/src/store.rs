//! Durable storage of the workout list.
//!
//! The whole list lives under one key as a JSON array. Every mutation is a
//! read-modify-write of that entire value; there are no row-level updates.
//! Reads degrade to an empty list on failure, writes propagate their error.

use chrono::NaiveDate;
use std::future::Future;
use std::sync::Arc;
use std::time::Duration;
use thiserror::Error;
use tokio::sync::Mutex;

use crate::dates::{self, WorkoutDatesIndex};
use crate::kv::{KeyValueStore, KvError};
use crate::models::Workout;

/// Key holding the serialized workout list.
pub const WORKOUTS_KEY: &str = "workouts";

/// Errors surfaced by workout store mutations.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("Storage error: {0}")]
    Kv(#[from] KvError),

    #[error("Invalid workout data: {0}")]
    Json(#[from] serde_json::Error),
}

/// Bounded retry with exponential backoff for failed writes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetryPolicy {
    pub max_retries: u32,
    pub base_delay: Duration,
}

impl RetryPolicy {
    pub const fn none() -> Self {
        Self {
            max_retries: 0,
            base_delay: Duration::ZERO,
        }
    }

    pub const fn new(max_retries: u32, base_delay: Duration) -> Self {
        Self {
            max_retries,
            base_delay,
        }
    }

    /// Delay before retry number `attempt` (zero-based).
    pub fn delay_for(&self, attempt: u32) -> Duration {
        self.base_delay
            .saturating_mul(2u32.saturating_pow(attempt.min(16)))
    }
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self::new(2, Duration::from_millis(50))
    }
}

/// Sole owner of the persisted workout list.
///
/// Mutations through one `WorkoutStore` are serialized, so concurrent
/// callers never lose each other's writes. Two stores over the same key
/// are not coordinated and the last write wins.
pub struct WorkoutStore {
    kv: Arc<dyn KeyValueStore>,
    retry: RetryPolicy,
    write_lock: Mutex<()>,
}

impl WorkoutStore {
    pub fn new(kv: Arc<dyn KeyValueStore>) -> Self {
        Self {
            kv,
            retry: RetryPolicy::default(),
            write_lock: Mutex::new(()),
        }
    }

    pub fn with_retry_policy(mut self, retry: RetryPolicy) -> Self {
        self.retry = retry;
        self
    }

    pub fn retry_policy(&self) -> RetryPolicy {
        self.retry
    }

    /// Reads and parses the persisted list, surfacing failures.
    ///
    /// An absent key is an empty list, not an error.
    pub async fn load_workouts(&self) -> Result<Vec<Workout>, StoreError> {
        match self.kv.get(WORKOUTS_KEY).await? {
            Some(json) => Ok(serde_json::from_str(&json)?),
            None => Ok(Vec::new()),
        }
    }

    /// All workouts in insertion order. Failures are logged and read as
    /// an empty list.
    pub async fn get_workouts(&self) -> Vec<Workout> {
        match self.load_workouts().await {
            Ok(workouts) => workouts,
            Err(e) => {
                tracing::warn!(error = %e, "Failed to load workouts, treating store as empty");
                Vec::new()
            }
        }
    }

    pub async fn get_workouts_for_date(&self, date: NaiveDate) -> Vec<Workout> {
        dates::workouts_on(&self.get_workouts().await, date)
    }

    pub async fn get_workout_dates(&self) -> WorkoutDatesIndex {
        WorkoutDatesIndex::from_workouts(&self.get_workouts().await)
    }

    /// Appends a workout. Unnamed exercises are dropped before writing.
    pub async fn save_workout(&self, workout: Workout) -> Result<(), StoreError> {
        let workout = workout.sanitized();
        let id = workout.id.clone();
        self.mutate("save", move |workouts| workouts.push(workout))
            .await?;
        tracing::debug!(workout_id = %id, "Saved workout");
        Ok(())
    }

    /// Removes every workout with this id. Unknown ids are a no-op.
    pub async fn delete_workout(&self, id: &str) -> Result<(), StoreError> {
        self.mutate("delete", |workouts| workouts.retain(|w| w.id != id))
            .await?;
        tracing::debug!(workout_id = %id, "Deleted workout");
        Ok(())
    }

    /// Replaces every workout with this id by `workout` (no merging).
    /// Unknown ids are a no-op.
    pub async fn update_workout(&self, id: &str, workout: Workout) -> Result<(), StoreError> {
        let replacement = workout.sanitized();
        self.mutate("update", |workouts| {
            for existing in workouts.iter_mut().filter(|w| w.id == id) {
                *existing = replacement.clone();
            }
        })
        .await?;
        tracing::debug!(workout_id = %id, "Updated workout");
        Ok(())
    }

    /// Removes the persisted list entirely.
    pub async fn clear_all_workouts(&self) -> Result<(), StoreError> {
        let _guard = self.write_lock.lock().await;
        self.with_retry("clear", || self.kv.remove(WORKOUTS_KEY))
            .await
            .map_err(|e| {
                tracing::error!(error = %e, "Failed to clear workouts");
                StoreError::from(e)
            })?;
        tracing::info!("Cleared all workouts");
        Ok(())
    }

    /// Waits for any in-flight mutation to finish.
    pub async fn wait_idle(&self) {
        drop(self.write_lock.lock().await);
    }

    async fn mutate<F>(&self, op: &'static str, apply: F) -> Result<(), StoreError>
    where
        F: FnOnce(&mut Vec<Workout>) + Send,
    {
        let _guard = self.write_lock.lock().await;

        // Unparseable data is replaced; an unreachable backend aborts the write.
        let mut workouts = match self.load_workouts().await {
            Ok(workouts) => workouts,
            Err(StoreError::Json(e)) => {
                tracing::warn!(op, error = %e, "Stored workouts are unreadable, starting from an empty list");
                Vec::new()
            }
            Err(e) => {
                tracing::error!(op, error = %e, "Failed to read workouts before writing");
                return Err(e);
            }
        };
        apply(&mut workouts);
        let json = serde_json::to_string(&workouts)?;

        self.with_retry(op, || self.kv.set(WORKOUTS_KEY, &json))
            .await
            .map_err(|e| {
                tracing::error!(op, error = %e, "Failed to write workouts");
                StoreError::from(e)
            })
    }

    async fn with_retry<F, Fut>(&self, op: &'static str, mut write: F) -> Result<(), KvError>
    where
        F: FnMut() -> Fut,
        Fut: Future<Output = Result<(), KvError>>,
    {
        let mut attempt = 0;
        loop {
            match write().await {
                Ok(()) => return Ok(()),
                Err(e) if attempt < self.retry.max_retries => {
                    let delay = self.retry.delay_for(attempt);
                    tracing::warn!(op, attempt = attempt + 1, error = %e, "Write failed, retrying in {:?}", delay);
                    tokio::time::sleep(delay).await;
                    attempt += 1;
                }
                Err(e) => return Err(e),
            }
        }
    }
}
