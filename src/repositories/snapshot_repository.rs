// src/repositories/snapshot_repository.rs

use crate::domain::{Member, TierMap};
use crate::error::AppResult;
use crate::infrastructure::json_file::{read_json, write_json_atomic};
use crate::infrastructure::{StorageLayout, StorageProfile};

/// Members and tiers exactly as persisted
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoredSnapshot {
    pub members: Vec<Member>,
    pub tiers: TierMap,
}

pub trait SnapshotRepository: Send + Sync {
    /// Persist the tier map, then the member list
    fn save(&self, profile: StorageProfile, members: &[Member], tiers: &TierMap) -> AppResult<()>;

    /// `None` unless both files exist
    fn load(&self, profile: StorageProfile) -> AppResult<Option<StoredSnapshot>>;
}

pub struct JsonSnapshotRepository {
    layout: StorageLayout,
}

impl JsonSnapshotRepository {
    pub fn new(layout: StorageLayout) -> Self {
        Self { layout }
    }
}

impl SnapshotRepository for JsonSnapshotRepository {
    fn save(&self, profile: StorageProfile, members: &[Member], tiers: &TierMap) -> AppResult<()> {
        // Tiers first: a members file must never reference a tier file that isn't there
        write_json_atomic(&self.layout.tiers_path(profile), tiers)?;
        write_json_atomic(&self.layout.members_path(profile), members)?;
        Ok(())
    }

    fn load(&self, profile: StorageProfile) -> AppResult<Option<StoredSnapshot>> {
        let members: Option<Vec<Member>> = read_json(&self.layout.members_path(profile))?;
        let tiers: Option<TierMap> = read_json(&self.layout.tiers_path(profile))?;

        match (members, tiers) {
            (Some(members), Some(tiers)) => Ok(Some(StoredSnapshot { members, tiers })),
            _ => Ok(None),
        }
    }
}
