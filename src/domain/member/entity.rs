use serde::{Deserialize, Serialize};

/// A paying supporter eligible for the drawing.
///
/// Identity is the full name; the platform's member ID is not retained.
/// The tier is the resolved display name, never the raw tier ID.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Member {
    #[serde(alias = "FullName")]
    pub full_name: String,

    #[serde(alias = "Tier")]
    pub tier: String,
}

impl Member {
    pub fn new(full_name: impl Into<String>, tier: impl Into<String>) -> Self {
        Self {
            full_name: full_name.into(),
            tier: tier.into(),
        }
    }
}

impl std::fmt::Display for Member {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} ({})", self.full_name, self.tier)
    }
}
