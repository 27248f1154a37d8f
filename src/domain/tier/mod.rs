pub mod entity;
pub mod palette;

pub use entity::{validate_tiers, TierMap};
pub use palette::{assign_colors, assign_colors_with, TierColor, TierColors, TIER_PALETTE};
