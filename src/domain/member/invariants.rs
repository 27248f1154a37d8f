use super::entity::Member;
use crate::domain::tier::TierMap;
use crate::domain::{DomainError, DomainResult};

/// Validates all Member invariants against the tier map they were resolved with
pub fn validate_member(member: &Member, tiers: &TierMap) -> DomainResult<()> {
    validate_full_name(&member.full_name)?;
    validate_tier_resolves(member, tiers)?;
    Ok(())
}

/// Full name is the member's identity and cannot be empty
fn validate_full_name(full_name: &str) -> DomainResult<()> {
    if full_name.trim().is_empty() {
        return Err(DomainError::InvariantViolation(
            "Member full name cannot be empty".to_string(),
        ));
    }
    Ok(())
}

/// The tier name must be one of the titles in the tier map
fn validate_tier_resolves(member: &Member, tiers: &TierMap) -> DomainResult<()> {
    if !tiers.contains_title(&member.tier) {
        return Err(DomainError::UnresolvedTier {
            full_name: member.full_name.clone(),
            tier: member.tier.clone(),
        });
    }
    Ok(())
}

/// Invariants that must hold true for Member domain:
///
/// 1. Identity is the full name, which is never empty
/// 2. The tier is a resolved title present in the snapshot's tier map
/// 3. Members are immutable once created
/// 4. The same name may appear more than once in a roster
