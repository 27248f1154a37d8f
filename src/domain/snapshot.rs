// src/domain/snapshot.rs
//
// Membership Snapshot
//
// The persisted result of one ingestion run. Superseded wholesale by the
// next run; never patched member by member.

use serde::{Deserialize, Serialize};

use crate::domain::member::{validate_member, Member};
use crate::domain::tier::{assign_colors, validate_tiers, TierColors, TierMap};
use crate::domain::DomainResult;

/// Members, their tiers and the presentation color of each tier
///
/// INVARIANT: every `member.tier` is a title present in `tiers`
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MembershipSnapshot {
    pub members: Vec<Member>,
    pub tiers: TierMap,
    pub tier_colors: TierColors,
}

impl MembershipSnapshot {
    /// Build a snapshot and assign tier colors
    pub fn new(members: Vec<Member>, tiers: TierMap) -> Self {
        let tier_colors = assign_colors(&tiers);
        Self {
            members,
            tiers,
            tier_colors,
        }
    }

    pub fn empty() -> Self {
        Self::default()
    }

    /// Swap the tier set and recompute colors
    pub fn replace_tiers(&mut self, tiers: TierMap) {
        self.tier_colors = assign_colors(&tiers);
        self.tiers = tiers;
    }

    pub fn member_count(&self) -> usize {
        self.members.len()
    }

    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }
}

/// Validates the snapshot: tiers are well formed and every member resolves
pub fn validate_snapshot(snapshot: &MembershipSnapshot) -> DomainResult<()> {
    validate_tiers(&snapshot.tiers)?;
    for member in &snapshot.members {
        validate_member(member, &snapshot.tiers)?;
    }
    Ok(())
}
