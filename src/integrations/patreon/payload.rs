// src/integrations/patreon/payload.rs
//
// Wire shapes of a members page (JSON:API document).
// Raw records only; normalization into domain members happens in the
// ingestion service.

use serde::{Deserialize, Serialize};

use super::{ACTIVE_PATRON_STATUS, PAID_CHARGE_STATUS};
use crate::domain::TierMap;

/// One page of campaign members
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct MembersPage {
    #[serde(default)]
    pub data: Vec<MemberResource>,

    /// Related resources pulled in by `include=`
    #[serde(default)]
    pub included: Vec<IncludedResource>,

    #[serde(default)]
    pub meta: PageMeta,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct MemberResource {
    pub id: String,

    #[serde(default)]
    pub attributes: MemberAttributes,

    #[serde(default)]
    pub relationships: MemberRelationships,
}

/// Attributes may be null for members that never pledged
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct MemberAttributes {
    pub full_name: Option<String>,
    pub patron_status: Option<String>,
    pub last_charge_status: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct MemberRelationships {
    pub currently_entitled_tiers: Option<RelationshipList>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RelationshipList {
    #[serde(default)]
    pub data: Vec<ResourceIdentifier>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ResourceIdentifier {
    pub id: String,
    #[serde(rename = "type")]
    pub kind: String,
}

/// Any included resource. Only tiers are read.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IncludedResource {
    pub id: String,
    #[serde(rename = "type")]
    pub kind: String,
    #[serde(default)]
    pub attributes: serde_json::Value,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PageMeta {
    #[serde(default)]
    pub pagination: Pagination,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Pagination {
    pub cursors: Option<Cursors>,
    pub total: Option<u64>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Cursors {
    pub next: Option<String>,
}

impl MembersPage {
    /// Cursor of the following page; `None` when absent or empty
    pub fn next_cursor(&self) -> Option<&str> {
        self.meta
            .pagination
            .cursors
            .as_ref()
            .and_then(|c| c.next.as_deref())
            .filter(|next| !next.is_empty())
    }

    /// Tier ID -> title for every titled tier in `included`.
    /// Tiers with a blank ID or title are left out, so members on them
    /// drop as unknown-tier instead of failing the whole ingest.
    pub fn tier_map(&self) -> TierMap {
        self.included
            .iter()
            .filter(|resource| !resource.id.trim().is_empty())
            .filter_map(|resource| {
                resource
                    .tier_title()
                    .map(|title| (resource.id.clone(), title.to_string()))
            })
            .collect()
    }
}

impl MemberResource {
    /// Active patron whose last charge was paid
    pub fn is_eligible(&self) -> bool {
        self.attributes.patron_status.as_deref() == Some(ACTIVE_PATRON_STATUS)
            && self.attributes.last_charge_status.as_deref() == Some(PAID_CHARGE_STATUS)
    }

    /// First currently entitled tier, as the platform lists them
    pub fn primary_tier_id(&self) -> Option<&str> {
        self.relationships
            .currently_entitled_tiers
            .as_ref()
            .and_then(|tiers| tiers.data.first())
            .map(|tier| tier.id.as_str())
    }
}

impl IncludedResource {
    pub fn tier_title(&self) -> Option<&str> {
        if self.kind != "tier" {
            return None;
        }
        self.attributes
            .get("title")
            .and_then(|t| t.as_str())
            .filter(|title| !title.trim().is_empty())
    }
}
