// src/application/dto/mod.rs
//
// Data Transfer Objects
//
// CRITICAL PRINCIPLES:
// - DTOs are UI-friendly representations
// - DTOs NEVER leak domain invariants
// - DTOs are simple, serializable structs
// - Conversion FROM domain entities only (never TO)

use serde::{Deserialize, Serialize};

use crate::domain::{Member, MembershipSnapshot, Winner};

// ============================================================================
// MEMBER DTOs
// ============================================================================

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MemberDto {
    pub full_name: String,
    pub tier: String,
    /// `#rrggbb`, absent when the tier has no assigned color
    pub color: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TierDto {
    pub id: String,
    pub title: String,
    pub color: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SnapshotDto {
    pub members: Vec<MemberDto>,
    pub tiers: Vec<TierDto>,
    pub member_count: usize,
}

impl MemberDto {
    pub fn from_member(member: &Member, snapshot: &MembershipSnapshot) -> Self {
        Self {
            full_name: member.full_name.clone(),
            tier: member.tier.clone(),
            color: snapshot.tier_colors.get(&member.tier).map(|c| c.to_hex()),
        }
    }
}

impl From<&MembershipSnapshot> for SnapshotDto {
    fn from(snapshot: &MembershipSnapshot) -> Self {
        Self {
            members: snapshot
                .members
                .iter()
                .map(|m| MemberDto::from_member(m, snapshot))
                .collect(),
            tiers: snapshot
                .tiers
                .iter()
                .map(|(id, title)| TierDto {
                    id: id.to_string(),
                    title: title.to_string(),
                    color: snapshot.tier_colors.get(title).map(|c| c.to_hex()),
                })
                .collect(),
            member_count: snapshot.member_count(),
        }
    }
}

// ============================================================================
// WINNER DTOs
// ============================================================================

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WinnerDto {
    pub full_name: String,
    pub date_time: String,
}

impl From<Winner> for WinnerDto {
    fn from(winner: Winner) -> Self {
        Self {
            full_name: winner.full_name,
            date_time: winner.date_time,
        }
    }
}

// ============================================================================
// DRAW DTOs
// ============================================================================

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DrawResultDto {
    pub winner: MemberDto,
    /// Entries in the pool the winner was drawn from
    pub pool_size: usize,
    /// Entries held by the winner
    pub chances: usize,
    pub test_mode: bool,
}
