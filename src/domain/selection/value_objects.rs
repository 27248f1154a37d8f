// src/domain/selection/value_objects.rs

use std::collections::BTreeMap;

use rand::seq::SliceRandom;
use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::domain::member::Member;

/// How many pool entries each member receives
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "rule", rename_all = "snake_case")]
pub enum FairnessRule {
    /// Every member appears `chances_per_member` times (values below 2 mean once)
    AllEqualChances { chances_per_member: u32 },

    /// Every member appears once per unit of its tier's weight (unset means 1)
    ChancesByTier { weights: BTreeMap<String, u32> },
}

impl FairnessRule {
    /// Number of entries a member of `tier` receives under this rule
    pub fn chances_for(&self, tier: &str) -> usize {
        let chances = match self {
            FairnessRule::AllEqualChances { chances_per_member } => *chances_per_member,
            FairnessRule::ChancesByTier { weights } => weights.get(tier).copied().unwrap_or(1),
        };
        chances.max(1) as usize
    }
}

impl Default for FairnessRule {
    fn default() -> Self {
        FairnessRule::AllEqualChances {
            chances_per_member: 1,
        }
    }
}

/// Full fairness configuration for one drawing session
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FairnessConfig {
    pub rule: FairnessRule,
    pub exclude_winners: bool,
}

/// Working list of drawing entries for one session.
///
/// Duplicated entries are extra chances. Built fresh for every drawing and
/// discarded afterwards; never written back to the snapshot.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SelectionPool {
    entries: Vec<Member>,
}

impl SelectionPool {
    pub fn new(entries: Vec<Member>) -> Self {
        Self { entries }
    }

    pub fn entries(&self) -> &[Member] {
        &self.entries
    }

    pub fn into_entries(self) -> Vec<Member> {
        self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Entries (chances) held by the given full name
    pub fn count_of(&self, full_name: &str) -> usize {
        self.entries
            .iter()
            .filter(|m| m.full_name == full_name)
            .count()
    }

    /// Uniform in-place permutation
    pub fn shuffle<R: Rng>(&mut self, rng: &mut R) {
        self.entries.shuffle(rng);
    }

    /// One entry by uniform random index, `None` when empty
    pub fn pick<R: Rng>(&self, rng: &mut R) -> Option<&Member> {
        if self.entries.is_empty() {
            return None;
        }
        let index = rng.gen_range(0..self.entries.len());
        self.entries.get(index)
    }
}
