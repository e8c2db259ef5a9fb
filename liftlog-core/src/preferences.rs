//! Persisted display preferences: weight unit and theme.

use serde::Serialize;
use std::str::FromStr;
use std::sync::Arc;
use thiserror::Error;
use tokio::sync::watch;

use crate::kv::{KeyValueStore, KvError};
use crate::models::{Theme, WeightUnit};

pub const WEIGHT_UNIT_KEY: &str = "weight_unit";
pub const THEME_KEY: &str = "theme";

#[derive(Debug, Error)]
pub enum PreferencesError {
    #[error("Failed to save preference '{key}': {source}")]
    Save {
        key: &'static str,
        #[source]
        source: KvError,
    },
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct PreferencesSnapshot {
    pub weight_unit: WeightUnit,
    pub theme: Theme,
    pub is_loading: bool,
}

pub struct Preferences {
    kv: Arc<dyn KeyValueStore>,
    state: watch::Sender<PreferencesSnapshot>,
}

impl Preferences {
    /// Loads stored preferences. Missing, unrecognized or unreadable values
    /// fall back to the defaults.
    pub async fn load(kv: Arc<dyn KeyValueStore>) -> Self {
        let (state, _) = watch::channel(PreferencesSnapshot {
            is_loading: true,
            ..PreferencesSnapshot::default()
        });

        let (weight_unit, theme) = futures::join!(
            read_value::<WeightUnit>(kv.as_ref(), WEIGHT_UNIT_KEY),
            read_value::<Theme>(kv.as_ref(), THEME_KEY)
        );

        state.send_replace(PreferencesSnapshot {
            weight_unit: weight_unit.unwrap_or_default(),
            theme: theme.unwrap_or_default(),
            is_loading: false,
        });

        Self { kv, state }
    }

    pub fn snapshot(&self) -> PreferencesSnapshot {
        *self.state.borrow()
    }

    pub fn subscribe(&self) -> watch::Receiver<PreferencesSnapshot> {
        self.state.subscribe()
    }

    pub fn weight_unit(&self) -> WeightUnit {
        self.state.borrow().weight_unit
    }

    pub fn theme(&self) -> Theme {
        self.state.borrow().theme
    }

    /// Persists the unit, then makes it current.
    pub async fn set_weight_unit(&self, unit: WeightUnit) -> Result<(), PreferencesError> {
        self.write(WEIGHT_UNIT_KEY, unit.as_str()).await?;
        self.state.send_modify(|s| s.weight_unit = unit);
        Ok(())
    }

    /// Persists the theme, then makes it current.
    pub async fn set_theme(&self, theme: Theme) -> Result<(), PreferencesError> {
        self.write(THEME_KEY, theme.as_str()).await?;
        self.state.send_modify(|s| s.theme = theme);
        Ok(())
    }

    /// Switches between light and dark, returning the new theme.
    pub async fn toggle_theme(&self) -> Result<Theme, PreferencesError> {
        let next = self.theme().toggled();
        self.set_theme(next).await?;
        Ok(next)
    }

    async fn write(&self, key: &'static str, value: &str) -> Result<(), PreferencesError> {
        self.kv.set(key, value).await.map_err(|source| {
            tracing::error!(key, error = %source, "Failed to save preference");
            PreferencesError::Save { key, source }
        })
    }
}

async fn read_value<T: FromStr>(kv: &dyn KeyValueStore, key: &str) -> Option<T> {
    match kv.get(key).await {
        Ok(Some(raw)) => match raw.trim().parse() {
            Ok(value) => Some(value),
            Err(_) => {
                tracing::warn!(key, value = %raw, "Ignoring unrecognized preference value");
                None
            }
        },
        Ok(None) => None,
        Err(e) => {
            tracing::warn!(key, error = %e, "Failed to load preference");
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::kv::testing::FlakyStore;
    use crate::kv::MemoryStore;

    #[tokio::test]
    async fn test_defaults_when_empty() {
        let prefs = Preferences::load(Arc::new(MemoryStore::new())).await;
        let snapshot = prefs.snapshot();
        assert_eq!(snapshot.weight_unit, WeightUnit::Kg);
        assert_eq!(snapshot.theme, Theme::Light);
        assert!(!snapshot.is_loading);
    }

    #[tokio::test]
    async fn test_loads_stored_values() {
        let kv = MemoryStore::with_entries([(WEIGHT_UNIT_KEY, "lbs"), (THEME_KEY, "dark")]);
        let prefs = Preferences::load(Arc::new(kv)).await;
        assert_eq!(prefs.weight_unit(), WeightUnit::Lbs);
        assert_eq!(prefs.theme(), Theme::Dark);
    }

    #[tokio::test]
    async fn test_unrecognized_value_falls_back() {
        let kv = MemoryStore::with_entries([(WEIGHT_UNIT_KEY, "stone")]);
        let prefs = Preferences::load(Arc::new(kv)).await;
        assert_eq!(prefs.weight_unit(), WeightUnit::Kg);
    }

    #[tokio::test]
    async fn test_read_failure_falls_back() {
        let kv = Arc::new(FlakyStore::new());
        kv.fail_reads(true);
        let prefs = Preferences::load(kv).await;
        assert_eq!(prefs.snapshot(), PreferencesSnapshot::default());
    }

    #[tokio::test]
    async fn test_set_weight_unit_persists() {
        let kv = Arc::new(MemoryStore::new());
        let prefs = Preferences::load(kv.clone()).await;

        prefs.set_weight_unit(WeightUnit::Lbs).await.unwrap();

        assert_eq!(prefs.weight_unit(), WeightUnit::Lbs);
        assert_eq!(
            kv.get(WEIGHT_UNIT_KEY).await.unwrap().as_deref(),
            Some("lbs")
        );

        let reloaded = Preferences::load(kv).await;
        assert_eq!(reloaded.weight_unit(), WeightUnit::Lbs);
    }

    #[tokio::test]
    async fn test_toggle_theme_persists() {
        let kv = Arc::new(MemoryStore::new());
        let prefs = Preferences::load(kv.clone()).await;
        let mut rx = prefs.subscribe();

        assert_eq!(prefs.toggle_theme().await.unwrap(), Theme::Dark);
        assert!(rx.has_changed().unwrap());
        assert_eq!(rx.borrow_and_update().theme, Theme::Dark);
        assert_eq!(kv.get(THEME_KEY).await.unwrap().as_deref(), Some("dark"));

        assert_eq!(prefs.toggle_theme().await.unwrap(), Theme::Light);
    }

    #[tokio::test]
    async fn test_failed_write_keeps_current_value() {
        let kv = Arc::new(FlakyStore::new());
        let prefs = Preferences::load(kv.clone()).await;

        kv.fail_all_writes(true);
        let err = prefs.set_theme(Theme::Dark).await.unwrap_err();

        assert!(err.to_string().contains("theme"));
        assert_eq!(prefs.theme(), Theme::Light);
    }
}
