// src/domain/selection/rules.rs

use std::collections::HashSet;

use super::value_objects::FairnessRule;
use crate::domain::member::Member;
use crate::domain::winner::Winner;

/// Expand the roster into weighted entries.
///
/// The roster keeps its original order at the front; extra copies for each
/// member are appended after it, member by member. A rule granting every
/// member a single chance returns the roster unchanged.
pub fn apply_fairness_rule(members: &[Member], rule: &FairnessRule) -> Vec<Member> {
    if let FairnessRule::AllEqualChances { chances_per_member } = rule {
        if *chances_per_member <= 1 {
            return members.to_vec();
        }
    }

    let mut entries = members.to_vec();
    for member in members {
        let extra = rule.chances_for(&member.tier) - 1;
        entries.extend(std::iter::repeat(member).take(extra).cloned());
    }
    entries
}

/// Drop every entry whose full name appears in the ledger.
///
/// Exact, case-sensitive string equality.
pub fn exclude_winners(entries: Vec<Member>, winners: &[Winner]) -> Vec<Member> {
    if winners.is_empty() {
        return entries;
    }
    let names: HashSet<&str> = winners.iter().map(|w| w.full_name.as_str()).collect();
    entries
        .into_iter()
        .filter(|m| !names.contains(m.full_name.as_str()))
        .collect()
}
