// src/services/mod.rs
//
// Services Module - Orchestration Layer

pub mod ingestion_service;
pub mod ingestion_types;
pub mod ledger_service;
pub mod selection_service;
pub mod session_service;

#[cfg(test)]
mod ingestion_service_tests;

// Re-export all services and their types
pub use ingestion_service::{
    IngestRequest,
    MembershipIngestionService,
};

pub use ingestion_types::{
    DropReason,
    DroppedMember,
    IngestionMode,
    NormalizedRoster,
};

pub use ledger_service::LedgerService;

pub use selection_service::SelectionService;

pub use session_service::SessionService;
