// src/lib.rs
// Patron Raffle - prize drawings among a creator's paying members
//
// Architecture:
// - Domain-centric: members, tiers, fairness rules and the ledger are plain types
// - Event-driven: services report what happened through the event bus
// - Explicit: every file write is a whole-document replacement
// - Local-first: snapshots and the winners ledger live in JSON files
// - Application Layer: preferences, state, commands and DTOs

// ============================================================================
// FOUNDATION
// ============================================================================

pub mod domain;
pub mod error;
pub mod events;
pub mod infrastructure;
pub mod repositories;
pub mod services;

// ============================================================================
// APPLICATION LAYER
// ============================================================================

pub mod application;
pub mod integrations;

// ============================================================================
// PUBLIC API - Domain Entities
// ============================================================================

pub use domain::{
    apply_fairness_rule,
    assign_colors,
    exclude_winners,
    validate_member,
    validate_snapshot,
    validate_tiers,
    // Session
    Credential,
    // Selection
    FairnessConfig,
    FairnessRule,
    // Member
    Member,
    // Snapshot
    MembershipSnapshot,
    SelectionPool,
    Session,
    // Tier
    TierColor,
    TierColors,
    TierMap,
    // Winner
    Winner,
};

// ============================================================================
// PUBLIC API - Error Types
// ============================================================================

pub use error::{AppError, AppResult};

// ============================================================================
// PUBLIC API - Events
// ============================================================================

pub use events::{
    create_event_bus,
    DomainEvent,
    EventBus,
    EventLogEntry,
    LedgerRecovered,
    MemberDropped,
    MembersIngested,
    PoolBuilt,
    WinnerDrawn,
    WinnerRecorded,
    WinnersCleared,
};

// ============================================================================
// PUBLIC API - Repositories
// ============================================================================

pub use repositories::{
    JsonSnapshotRepository,
    JsonWinnersRepository,
    LedgerLoad,
    SnapshotRepository,
    WinnersRepository,
};

// ============================================================================
// PUBLIC API - Infrastructure
// ============================================================================

pub use infrastructure::{init_file_logging, StorageLayout, StorageProfile};

// ============================================================================
// PUBLIC API - Services
// ============================================================================

pub use services::{
    IngestRequest,
    IngestionMode,
    LedgerService,
    MembershipIngestionService,
    SelectionService,
    SessionService,
};

// ============================================================================
// PUBLIC API - Application Layer
// ============================================================================

pub use application::{AppState, Preferences};

// Re-export application submodules
pub use application::commands;
pub use application::dto;

// ============================================================================
// PUBLIC API - Integrations
// ============================================================================

pub use integrations::{
    CredentialProvider,
    FixtureMembershipApi,
    MembershipApi,
    PatreonClient,
    PatreonOAuthClient,
};
