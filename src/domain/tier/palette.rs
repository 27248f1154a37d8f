use std::collections::BTreeMap;

use rand::Rng;
use serde::{Deserialize, Serialize};

use super::entity::TierMap;

/// An opaque RGBA color handed to the presentation layer
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TierColor {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl TierColor {
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b, a: 255 }
    }

    /// `#rrggbb` form, alpha omitted
    pub fn to_hex(&self) -> String {
        format!("#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }
}

/// Tier title -> color
pub type TierColors = BTreeMap<String, TierColor>;

/// Colors reserved for the first tiers encountered: blue, green, yellow, red
pub const TIER_PALETTE: [TierColor; 4] = [
    TierColor::rgb(0, 0, 255),
    TierColor::rgb(0, 150, 0),
    TierColor::rgb(100, 100, 0),
    TierColor::rgb(255, 0, 0),
];

/// Assigns a color to every tier title.
///
/// The first tiers (in tier map order) take the fixed palette; any tier
/// beyond the palette gets a random opaque color.
pub fn assign_colors(tiers: &TierMap) -> TierColors {
    assign_colors_with(tiers, &mut rand::thread_rng())
}

pub fn assign_colors_with<R: Rng>(tiers: &TierMap, rng: &mut R) -> TierColors {
    let mut colors = TierColors::new();
    for (index, title) in tiers.titles().enumerate() {
        let color = match TIER_PALETTE.get(index) {
            Some(color) => *color,
            None => TierColor::rgb(rng.gen(), rng.gen(), rng.gen()),
        };
        colors.insert(title.to_string(), color);
    }
    colors
}
