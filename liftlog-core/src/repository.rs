//! Application-facing workout repository.
//!
//! Holds the current workout snapshot and keeps it in step with the
//! [`WorkoutStore`]. Every successful mutation reloads the whole snapshot
//! from the store; there are no optimistic updates.

use chrono::NaiveDate;
use serde::Serialize;
use std::sync::Arc;
use tokio::sync::{watch, Mutex};

use crate::dates::{self, WorkoutDatesIndex};
use crate::models::Workout;
use crate::store::{StoreError, WorkoutStore};

/// Immutable view published to subscribers. Replaced wholesale on change.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct WorkoutSnapshot {
    pub workouts: Arc<Vec<Workout>>,
    pub workout_dates: Arc<WorkoutDatesIndex>,
    pub is_loading: bool,
}

impl WorkoutSnapshot {
    pub fn workouts_for_date(&self, date: NaiveDate) -> Vec<Workout> {
        dates::workouts_on(&self.workouts, date)
    }

    pub fn find(&self, id: &str) -> Option<&Workout> {
        self.workouts.iter().find(|w| w.id == id)
    }
}

pub struct WorkoutRepository {
    store: Arc<WorkoutStore>,
    state: watch::Sender<WorkoutSnapshot>,
    refresh_lock: Mutex<()>,
}

impl WorkoutRepository {
    /// Creates the repository and performs the initial load.
    pub async fn open(store: Arc<WorkoutStore>) -> Self {
        let initial = WorkoutSnapshot {
            is_loading: true,
            ..WorkoutSnapshot::default()
        };
        let (state, _) = watch::channel(initial);
        let repo = Self {
            store,
            state,
            refresh_lock: Mutex::new(()),
        };
        repo.refresh().await;
        repo
    }

    pub fn store(&self) -> &WorkoutStore {
        &self.store
    }

    /// Current snapshot.
    pub fn snapshot(&self) -> WorkoutSnapshot {
        self.state.borrow().clone()
    }

    /// Receiver that observes every published snapshot.
    pub fn subscribe(&self) -> watch::Receiver<WorkoutSnapshot> {
        self.state.subscribe()
    }

    pub fn workouts_for_date(&self, date: NaiveDate) -> Vec<Workout> {
        self.state.borrow().workouts_for_date(date)
    }

    /// Reloads workouts from the store and derives their dates index.
    ///
    /// On a failed load the previous workouts and dates stay in place;
    /// the loading flag is cleared either way.
    pub async fn refresh(&self) {
        let _guard = self.refresh_lock.lock().await;

        self.state.send_if_modified(|s| {
            let changed = !s.is_loading;
            s.is_loading = true;
            changed
        });

        match self.store.load_workouts().await {
            Ok(workouts) => {
                let workout_dates = WorkoutDatesIndex::from_workouts(&workouts);
                tracing::debug!(
                    workouts = workouts.len(),
                    dates = workout_dates.len(),
                    "Loaded workout snapshot"
                );
                self.state.send_replace(WorkoutSnapshot {
                    workouts: Arc::new(workouts),
                    workout_dates: Arc::new(workout_dates),
                    is_loading: false,
                });
            }
            Err(e) => {
                tracing::error!(error = %e, "Failed to load workouts, keeping previous snapshot");
                self.state.send_modify(|s| s.is_loading = false);
            }
        }
    }

    pub async fn add_workout(&self, workout: Workout) -> Result<(), StoreError> {
        let id = workout.id.clone();
        if let Err(e) = self.store.save_workout(workout).await {
            tracing::error!(workout_id = %id, error = %e, "Failed to add workout");
            return Err(e);
        }
        self.refresh().await;
        Ok(())
    }

    pub async fn delete_workout(&self, id: &str) -> Result<(), StoreError> {
        if let Err(e) = self.store.delete_workout(id).await {
            tracing::error!(workout_id = %id, error = %e, "Failed to delete workout");
            return Err(e);
        }
        self.refresh().await;
        Ok(())
    }

    pub async fn update_workout(&self, id: &str, workout: Workout) -> Result<(), StoreError> {
        if let Err(e) = self.store.update_workout(id, workout).await {
            tracing::error!(workout_id = %id, error = %e, "Failed to update workout");
            return Err(e);
        }
        self.refresh().await;
        Ok(())
    }

    /// Removes every workout and refreshes.
    pub async fn clear(&self) -> Result<(), StoreError> {
        self.store.clear_all_workouts().await?;
        self.refresh().await;
        Ok(())
    }

    /// Waits for in-flight writes and refreshes, then drops the repository.
    pub async fn close(self) {
        let _guard = self.refresh_lock.lock().await;
        self.store.wait_idle().await;
        tracing::debug!("Workout repository closed");
    }
}
