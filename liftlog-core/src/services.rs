//! Application root: builds every service over one key-value store.

use std::sync::Arc;

use crate::ids::IdGenerator;
use crate::kv::KeyValueStore;
use crate::preferences::Preferences;
use crate::repository::WorkoutRepository;
use crate::store::{RetryPolicy, WorkoutStore};

/// The services a front end needs, passed explicitly to whatever uses them.
pub struct Services {
    pub workouts: WorkoutRepository,
    pub preferences: Preferences,
    ids: IdGenerator,
}

impl Services {
    /// Builds the services and performs their initial loads.
    pub async fn init(kv: Arc<dyn KeyValueStore>, retry: RetryPolicy) -> Self {
        let store = Arc::new(WorkoutStore::new(kv.clone()).with_retry_policy(retry));
        let (workouts, preferences) =
            futures::join!(WorkoutRepository::open(store), Preferences::load(kv));

        let snapshot = workouts.snapshot();
        tracing::info!(
            workouts = snapshot.workouts.len(),
            active_days = snapshot.workout_dates.len(),
            "Services initialized"
        );

        Self {
            workouts,
            preferences,
            ids: IdGenerator::new(),
        }
    }

    pub fn ids(&self) -> &IdGenerator {
        &self.ids
    }

    /// Waits for pending writes, then releases everything.
    pub async fn shutdown(self) {
        self.workouts.close().await;
        tracing::info!("Services shut down");
    }
}
