//! LiftLog Core Library
//!
//! Workout models, the key-value persistence substrate, the workout store
//! and repository, preferences, and the calendar/heatmap read models.

pub mod activity;
pub mod catalog;
pub mod dates;
pub mod draft;
pub mod ids;
pub mod kv;
pub mod models;
pub mod preferences;
pub mod repository;
pub mod services;
pub mod store;

pub use activity::{CalendarDay, Heatmap, HeatmapCell, MonthCalendar};
pub use dates::WorkoutDatesIndex;
pub use draft::{SetEdit, WorkoutDraft};
pub use ids::IdGenerator;
pub use kv::{FileStore, KeyValueStore, KvError, MemoryStore};
pub use models::{Exercise, Set, SetUnit, Theme, WeightUnit, Workout};
pub use preferences::{Preferences, PreferencesError, PreferencesSnapshot};
pub use repository::{WorkoutRepository, WorkoutSnapshot};
pub use services::Services;
pub use store::{RetryPolicy, StoreError, WorkoutStore};

pub fn version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
