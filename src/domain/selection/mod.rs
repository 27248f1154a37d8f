// src/domain/selection/mod.rs
//
// Selection Domain
//
// Pure pool-building rules. No I/O; the ledger is handed in by the caller.

pub mod rules;
pub mod value_objects;

pub use rules::{apply_fairness_rule, exclude_winners};
pub use value_objects::{FairnessConfig, FairnessRule, SelectionPool};
