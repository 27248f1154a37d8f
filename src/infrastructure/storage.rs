// src/infrastructure/storage.rs
//
// Where the snapshot, the ledger and the log live on disk.
//
// Path structure: {APP_DATA}/patron-raffle/structured_data/<file>
// Rehearsal (test mode) and live runs use distinct snapshot files so the two
// never collide. The ledger is shared.

use std::path::{Path, PathBuf};

use crate::error::{AppError, AppResult};

pub const LIVE_MEMBERS_FILE: &str = "eligible_patrons.json";
pub const REHEARSAL_MEMBERS_FILE: &str = "eligible_patrons_test.json";
pub const LIVE_TIERS_FILE: &str = "tiers.json";
pub const REHEARSAL_TIERS_FILE: &str = "tiers_test.json";
pub const WINNERS_FILE: &str = "winners.json";

/// Which snapshot files a run reads and writes
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StorageProfile {
    Rehearsal,
    Live,
}

impl StorageProfile {
    pub fn from_test_mode(test_mode: bool) -> Self {
        if test_mode {
            StorageProfile::Rehearsal
        } else {
            StorageProfile::Live
        }
    }
}

impl std::fmt::Display for StorageProfile {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            StorageProfile::Rehearsal => write!(f, "rehearsal"),
            StorageProfile::Live => write!(f, "live"),
        }
    }
}

/// File layout under one storage root
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StorageLayout {
    root: PathBuf,
}

impl StorageLayout {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn members_path(&self, profile: StorageProfile) -> PathBuf {
        match profile {
            StorageProfile::Rehearsal => self.root.join(REHEARSAL_MEMBERS_FILE),
            StorageProfile::Live => self.root.join(LIVE_MEMBERS_FILE),
        }
    }

    pub fn tiers_path(&self, profile: StorageProfile) -> PathBuf {
        match profile {
            StorageProfile::Rehearsal => self.root.join(REHEARSAL_TIERS_FILE),
            StorageProfile::Live => self.root.join(LIVE_TIERS_FILE),
        }
    }

    pub fn winners_path(&self) -> PathBuf {
        self.root.join(WINNERS_FILE)
    }

    pub fn log_path(&self) -> PathBuf {
        self.root.join(super::LOG_FILE_NAME)
    }
}

/// Default storage root in the application data directory
pub fn default_storage_dir() -> AppResult<PathBuf> {
    let app_data_dir = dirs::data_dir()
        .ok_or_else(|| AppError::Other("Could not determine app data directory".to_string()))?;

    Ok(app_data_dir.join("patron-raffle").join("structured_data"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_profiles_never_share_snapshot_files() {
        let layout = StorageLayout::new("/data");
        assert_ne!(
            layout.members_path(StorageProfile::Rehearsal),
            layout.members_path(StorageProfile::Live)
        );
        assert_ne!(
            layout.tiers_path(StorageProfile::Rehearsal),
            layout.tiers_path(StorageProfile::Live)
        );
    }

    #[test]
    fn test_profile_from_test_mode() {
        assert_eq!(StorageProfile::from_test_mode(true), StorageProfile::Rehearsal);
        assert_eq!(StorageProfile::from_test_mode(false), StorageProfile::Live);
    }

    #[test]
    fn test_winners_path() {
        let layout = StorageLayout::new("/data");
        assert_eq!(layout.winners_path(), PathBuf::from("/data/winners.json"));
    }
}
