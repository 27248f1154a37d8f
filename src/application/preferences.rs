// src/application/preferences.rs
//
// User preferences
//
// Owned by the application layer; the core only sees the derived views
// (fairness config, ingestion mode, storage profile).

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use crate::domain::{FairnessConfig, FairnessRule};
use crate::error::{AppError, AppResult};
use crate::infrastructure::json_file::{read_json, write_json_atomic};
use crate::infrastructure::{default_storage_dir, StorageProfile};
use crate::services::IngestionMode;

pub const PREFERENCES_FILE_NAME: &str = "preferences.json";

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ChancesRule {
    #[default]
    AllEqualChances,
    ChancesByTier,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Preferences {
    pub chances_rule: ChancesRule,
    pub chances_per_member: u32,
    /// Tier title -> chances; unset tiers get one
    pub tier_weights: BTreeMap<String, u32>,
    pub exclude_winners: bool,

    pub test_mode: bool,
    pub use_real_data: bool,

    pub campaign_id: Option<String>,
    pub client_id: Option<String>,
    pub client_secret: Option<String>,
    pub redirect_uri: Option<String>,
    pub access_token: Option<String>,
    pub refresh_token: Option<String>,

    /// Overrides the data directory location
    pub storage_dir: Option<PathBuf>,
}

impl Default for Preferences {
    fn default() -> Self {
        Self {
            chances_rule: ChancesRule::default(),
            chances_per_member: 1,
            tier_weights: BTreeMap::new(),
            exclude_winners: false,
            test_mode: false,
            use_real_data: false,
            campaign_id: None,
            client_id: None,
            client_secret: None,
            redirect_uri: None,
            access_token: None,
            refresh_token: None,
            storage_dir: None,
        }
    }
}

impl Preferences {
    pub fn fairness_config(&self) -> FairnessConfig {
        let rule = match self.chances_rule {
            ChancesRule::AllEqualChances => FairnessRule::AllEqualChances {
                chances_per_member: self.chances_per_member,
            },
            ChancesRule::ChancesByTier => FairnessRule::ChancesByTier {
                weights: self.tier_weights.clone(),
            },
        };
        FairnessConfig {
            rule,
            exclude_winners: self.exclude_winners,
        }
    }

    pub fn ingestion_mode(&self) -> IngestionMode {
        IngestionMode::from_flags(self.test_mode, self.use_real_data)
    }

    pub fn storage_profile(&self) -> StorageProfile {
        StorageProfile::from_test_mode(self.test_mode)
    }

    pub fn storage_root(&self) -> AppResult<PathBuf> {
        match &self.storage_dir {
            Some(dir) => Ok(dir.clone()),
            None => default_storage_dir(),
        }
    }

    /// Campaign ID, required for live ingestion
    pub fn require_campaign_id(&self) -> AppResult<&str> {
        self.campaign_id
            .as_deref()
            .filter(|id| !id.trim().is_empty())
            .ok_or_else(|| AppError::MissingData("No campaign ID configured".to_string()))
    }
}

/// Persistence of the preferences document
pub trait PreferencesStore: Send + Sync {
    /// Stored preferences, or defaults when none were saved
    fn load(&self) -> AppResult<Preferences>;
    fn save(&self, preferences: &Preferences) -> AppResult<()>;
}

pub struct JsonPreferencesStore {
    path: PathBuf,
}

impl JsonPreferencesStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Store under the user's configuration directory
    pub fn in_config_dir() -> AppResult<Self> {
        let config_dir = dirs::config_dir()
            .ok_or_else(|| AppError::Other("Could not determine config directory".to_string()))?;
        Ok(Self::new(
            config_dir.join("patron-raffle").join(PREFERENCES_FILE_NAME),
        ))
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl PreferencesStore for JsonPreferencesStore {
    fn load(&self) -> AppResult<Preferences> {
        Ok(read_json(&self.path)?.unwrap_or_default())
    }

    fn save(&self, preferences: &Preferences) -> AppResult<()> {
        write_json_atomic(&self.path, preferences)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_file_gives_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let store = JsonPreferencesStore::new(dir.path().join(PREFERENCES_FILE_NAME));

        let preferences = store.load().unwrap();

        assert_eq!(preferences, Preferences::default());
        assert_eq!(preferences.fairness_config(), FairnessConfig::default());
    }

    #[test]
    fn test_save_and_load() {
        let dir = tempfile::tempdir().unwrap();
        let store = JsonPreferencesStore::new(dir.path().join("nested").join(PREFERENCES_FILE_NAME));
        let preferences = Preferences {
            chances_rule: ChancesRule::ChancesByTier,
            tier_weights: BTreeMap::from([("Wizard".to_string(), 3)]),
            exclude_winners: true,
            campaign_id: Some("42".to_string()),
            ..Preferences::default()
        };

        store.save(&preferences).unwrap();

        assert_eq!(store.load().unwrap(), preferences);
    }

    #[test]
    fn test_partial_document_fills_defaults() {
        let preferences: Preferences =
            serde_json::from_str(r#"{"chances_rule": "chances_by_tier", "test_mode": true}"#)
                .unwrap();
        assert_eq!(preferences.chances_rule, ChancesRule::ChancesByTier);
        assert_eq!(preferences.chances_per_member, 1);
        assert!(preferences.tier_weights.is_empty());
        assert_eq!(preferences.storage_profile(), StorageProfile::Rehearsal);
        assert_eq!(preferences.ingestion_mode(), IngestionMode::Fixture);
    }

    #[test]
    fn test_fairness_config_by_tier() {
        let preferences = Preferences {
            chances_rule: ChancesRule::ChancesByTier,
            tier_weights: BTreeMap::from([("Gold".to_string(), 4)]),
            exclude_winners: true,
            ..Preferences::default()
        };
        let config = preferences.fairness_config();
        assert!(config.exclude_winners);
        assert_eq!(config.rule.chances_for("Gold"), 4);
        assert_eq!(config.rule.chances_for("Bronze"), 1);
    }

    #[test]
    fn test_real_data_in_test_mode_is_live_ingestion() {
        let preferences = Preferences {
            test_mode: true,
            use_real_data: true,
            ..Preferences::default()
        };
        assert_eq!(preferences.ingestion_mode(), IngestionMode::Live);
        assert_eq!(preferences.storage_profile(), StorageProfile::Rehearsal);
    }

    #[test]
    fn test_blank_campaign_id_is_missing() {
        let preferences = Preferences {
            campaign_id: Some("  ".to_string()),
            ..Preferences::default()
        };
        assert!(matches!(
            preferences.require_campaign_id(),
            Err(AppError::MissingData(_))
        ));
    }
}
