use std::collections::{BTreeMap, BTreeSet};

use serde::{Deserialize, Serialize};

use crate::domain::{DomainError, DomainResult};

/// Mapping from the platform's tier ID to the tier's display title.
///
/// Built once per ingestion run from the first page's included resources.
/// Members reference tiers by title after resolution.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TierMap {
    titles_by_id: BTreeMap<String, String>,
}

impl TierMap {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, tier_id: impl Into<String>, title: impl Into<String>) {
        self.titles_by_id.insert(tier_id.into(), title.into());
    }

    /// Checked lookup of a tier title by raw tier ID
    pub fn resolve(&self, tier_id: &str) -> Option<&str> {
        self.titles_by_id.get(tier_id).map(String::as_str)
    }

    pub fn contains_title(&self, title: &str) -> bool {
        self.titles_by_id.values().any(|t| t == title)
    }

    /// Titles in tier ID order
    pub fn titles(&self) -> impl Iterator<Item = &str> {
        self.titles_by_id.values().map(String::as_str)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.titles_by_id
            .iter()
            .map(|(id, title)| (id.as_str(), title.as_str()))
    }

    /// Titles shared by more than one tier ID.
    ///
    /// Per-tier weights and colors are keyed by title, so two tiers with the
    /// same title share a weight and a color.
    pub fn duplicate_titles(&self) -> Vec<String> {
        let mut seen = BTreeSet::new();
        let mut duplicates = BTreeSet::new();
        for title in self.titles() {
            if !seen.insert(title) {
                duplicates.insert(title.to_string());
            }
        }
        duplicates.into_iter().collect()
    }

    pub fn len(&self) -> usize {
        self.titles_by_id.len()
    }

    pub fn is_empty(&self) -> bool {
        self.titles_by_id.is_empty()
    }
}

impl FromIterator<(String, String)> for TierMap {
    fn from_iter<I: IntoIterator<Item = (String, String)>>(iter: I) -> Self {
        Self {
            titles_by_id: iter.into_iter().collect(),
        }
    }
}

/// Tier IDs and titles cannot be blank
pub fn validate_tiers(tiers: &TierMap) -> DomainResult<()> {
    for (id, title) in tiers.iter() {
        if id.trim().is_empty() {
            return Err(DomainError::InvariantViolation(
                "Tier ID cannot be empty".to_string(),
            ));
        }
        if title.trim().is_empty() {
            return Err(DomainError::InvariantViolation(format!(
                "Tier {} has an empty title",
                id
            )));
        }
    }
    Ok(())
}
