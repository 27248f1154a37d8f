// src/repositories/mod.rs
//
// Repository layer
//
// CRITICAL RULES:
// - Repositories are DUMB data mappers
// - NO business logic
// - NO invariant enforcement
// - NO event emission
// - NO cross-repository calls
// - Explicit JSON files only

pub mod snapshot_repository;
pub mod winners_repository;

pub use snapshot_repository::{JsonSnapshotRepository, SnapshotRepository, StoredSnapshot};
pub use winners_repository::{JsonWinnersRepository, LedgerLoad, WinnersRepository};
