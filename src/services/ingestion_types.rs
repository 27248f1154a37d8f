// src/services/ingestion_types.rs
//
// Ingestion Value Objects
//
// Pure outcomes of normalizing raw member pages. No I/O.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::domain::{Member, TierMap};
use crate::integrations::{MemberResource, MembersPage};

/// Where member pages come from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum IngestionMode {
    /// Bundled sample dataset, for rehearsals
    Fixture,
    /// Paginated remote API
    Live,
}

impl IngestionMode {
    /// Fixture data only in test mode without a request for real data
    pub fn from_flags(test_mode: bool, use_real_data: bool) -> Self {
        if test_mode && !use_real_data {
            IngestionMode::Fixture
        } else {
            IngestionMode::Live
        }
    }
}

impl std::fmt::Display for IngestionMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            IngestionMode::Fixture => write!(f, "fixture"),
            IngestionMode::Live => write!(f, "live"),
        }
    }
}

/// Why an eligible member was left out of the snapshot
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "reason", rename_all = "snake_case")]
pub enum DropReason {
    MissingFullName,
    NoEntitledTier,
    /// Tier ID absent from every page's included resources
    UnknownTier { tier_id: String },
    /// Tier ID first listed on a later page; the tier map is frozen after page 1
    TierOnLaterPage { tier_id: String, page: usize },
}

impl std::fmt::Display for DropReason {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            DropReason::MissingFullName => write!(f, "member has no full name"),
            DropReason::NoEntitledTier => write!(f, "member has no currently entitled tier"),
            DropReason::UnknownTier { tier_id } => write!(f, "tier {} is not in the tier map", tier_id),
            DropReason::TierOnLaterPage { tier_id, page } => write!(
                f,
                "tier {} was only introduced on page {}, after the tier map was built",
                tier_id, page
            ),
        }
    }
}

/// Result of normalizing one raw member record
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MemberResolution {
    Resolved(Member),
    /// Not an active, paid patron; dropped silently
    Ineligible,
    Dropped { full_name: String, reason: DropReason },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DroppedMember {
    pub full_name: String,
    pub reason: DropReason,
}

/// All pages normalized into one roster
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NormalizedRoster {
    pub members: Vec<Member>,
    pub tiers: TierMap,
    pub ineligible: usize,
    pub dropped: Vec<DroppedMember>,
}

/// Resolve a raw record against the frozen tier map.
///
/// `late_tiers` maps tier IDs that only appear on later pages to the
/// (1-based) page that introduced them, so those drops are reported distinctly.
pub fn resolve_member(
    resource: &MemberResource,
    tiers: &TierMap,
    late_tiers: &BTreeMap<String, usize>,
) -> MemberResolution {
    if !resource.is_eligible() {
        return MemberResolution::Ineligible;
    }

    let full_name = resource
        .attributes
        .full_name
        .as_deref()
        .map(str::trim)
        .unwrap_or_default()
        .to_string();
    if full_name.is_empty() {
        return MemberResolution::Dropped {
            full_name,
            reason: DropReason::MissingFullName,
        };
    }

    let Some(tier_id) = resource.primary_tier_id() else {
        return MemberResolution::Dropped {
            full_name,
            reason: DropReason::NoEntitledTier,
        };
    };

    match tiers.resolve(tier_id) {
        Some(title) => MemberResolution::Resolved(Member::new(full_name, title)),
        None => {
            let reason = match late_tiers.get(tier_id) {
                Some(page) => DropReason::TierOnLaterPage {
                    tier_id: tier_id.to_string(),
                    page: *page,
                },
                None => DropReason::UnknownTier {
                    tier_id: tier_id.to_string(),
                },
            };
            MemberResolution::Dropped { full_name, reason }
        }
    }
}

/// Build the roster from every fetched page, in page order.
///
/// Tiers come from the first page only.
pub fn normalize_pages(pages: &[MembersPage]) -> NormalizedRoster {
    let Some(first) = pages.first() else {
        return NormalizedRoster::default();
    };
    let tiers = first.tier_map();

    let mut late_tiers = BTreeMap::new();
    for (index, page) in pages.iter().enumerate().skip(1) {
        for (tier_id, _) in page.tier_map().iter() {
            if tiers.resolve(tier_id).is_none() {
                late_tiers.entry(tier_id.to_string()).or_insert(index + 1);
            }
        }
    }

    let mut roster = NormalizedRoster {
        tiers,
        ..NormalizedRoster::default()
    };

    for resource in pages.iter().flat_map(|page| page.data.iter()) {
        match resolve_member(resource, &roster.tiers, &late_tiers) {
            MemberResolution::Resolved(member) => roster.members.push(member),
            MemberResolution::Ineligible => roster.ineligible += 1,
            MemberResolution::Dropped { full_name, reason } => {
                roster.dropped.push(DroppedMember { full_name, reason })
            }
        }
    }

    roster
}
