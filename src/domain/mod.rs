// src/domain/mod.rs
//
// Domain Root - The Single Source of Truth for Domain API
//
// This file MUST declare all domain modules and re-export their public API.
// All other modules import from `crate::domain::*`

// ============================================================================
// MODULE DECLARATIONS
// ============================================================================

pub mod member;
pub mod selection;
pub mod session;
pub mod snapshot;
pub mod tier;
pub mod winner;

// ============================================================================
// PUBLIC API RE-EXPORTS
// ============================================================================

// Member Domain
pub use member::{validate_member, Member};

// Tier Domain
pub use tier::{assign_colors, validate_tiers, TierColor, TierColors, TierMap, TIER_PALETTE};

// Snapshot
pub use snapshot::{validate_snapshot, MembershipSnapshot};

// Winner
pub use winner::{Winner, WINNER_TIMESTAMP_FORMAT};

// Selection
pub use selection::{
    apply_fairness_rule, exclude_winners, FairnessConfig, FairnessRule, SelectionPool,
};

// Session
pub use session::{Credential, Session};

// ============================================================================
// DOMAIN ERROR TYPES
// ============================================================================

use thiserror::Error;

/// Domain-level errors
/// These represent violations of business rules and invariants
#[derive(Debug, Error)]
pub enum DomainError {
    #[error("Invariant violation: {0}")]
    InvariantViolation(String),

    #[error("Member '{full_name}' references unresolved tier '{tier}'")]
    UnresolvedTier { full_name: String, tier: String },

    #[error("Invalid state transition: {0}")]
    InvalidStateTransition(String),
}

/// Domain result type
pub type DomainResult<T> = Result<T, DomainError>;
