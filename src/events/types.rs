// events/types.rs
//
// All domain events in the system.
// Each event represents an immutable fact that has already occurred.
//
// CRITICAL RULES:
// - Events are facts, not commands
// - Events are immutable
// - Events carry only the data needed to react
// - No business logic in event types

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Trait that all domain events must implement
pub trait DomainEvent: std::fmt::Debug + Clone {
    /// Unique identifier for this event instance
    fn event_id(&self) -> Uuid;

    /// When this event occurred
    fn occurred_at(&self) -> DateTime<Utc>;

    /// Human-readable event type name
    fn event_type(&self) -> &'static str;
}

macro_rules! impl_domain_event {
    ($event:ty, $name:literal) => {
        impl DomainEvent for $event {
            fn event_id(&self) -> Uuid { self.event_id }
            fn occurred_at(&self) -> DateTime<Utc> { self.occurred_at }
            fn event_type(&self) -> &'static str { $name }
        }
    };
}

// ============================================================================
// INGESTION EVENTS
// ============================================================================

/// Emitted after a snapshot has been built and persisted
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MembersIngested {
    pub event_id: Uuid,
    pub occurred_at: DateTime<Utc>,
    pub mode: String, // "fixture", "live"
    pub pages: usize,
    pub member_count: usize,
    pub tier_count: usize,
    pub dropped_count: usize,
}

impl MembersIngested {
    pub fn new(
        mode: String,
        pages: usize,
        member_count: usize,
        tier_count: usize,
        dropped_count: usize,
    ) -> Self {
        Self {
            event_id: Uuid::new_v4(),
            occurred_at: Utc::now(),
            mode,
            pages,
            member_count,
            tier_count,
            dropped_count,
        }
    }
}

impl_domain_event!(MembersIngested, "MembersIngested");

/// Emitted for each eligible member left out because its tier did not resolve
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MemberDropped {
    pub event_id: Uuid,
    pub occurred_at: DateTime<Utc>,
    pub full_name: String,
    pub reason: String,
}

impl MemberDropped {
    pub fn new(full_name: String, reason: String) -> Self {
        Self {
            event_id: Uuid::new_v4(),
            occurred_at: Utc::now(),
            full_name,
            reason,
        }
    }
}

impl_domain_event!(MemberDropped, "MemberDropped");

// ============================================================================
// DRAW EVENTS
// ============================================================================

/// Emitted when a drawing pool is ready
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PoolBuilt {
    pub event_id: Uuid,
    pub occurred_at: DateTime<Utc>,
    pub member_count: usize,
    pub entry_count: usize,
    pub excluded_entries: usize,
}

impl PoolBuilt {
    pub fn new(member_count: usize, entry_count: usize, excluded_entries: usize) -> Self {
        Self {
            event_id: Uuid::new_v4(),
            occurred_at: Utc::now(),
            member_count,
            entry_count,
            excluded_entries,
        }
    }
}

impl_domain_event!(PoolBuilt, "PoolBuilt");

/// Emitted when a draw picks an entry. Does not imply a ledger write.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WinnerDrawn {
    pub event_id: Uuid,
    pub occurred_at: DateTime<Utc>,
    pub full_name: String,
    pub tier: String,
}

impl WinnerDrawn {
    pub fn new(full_name: String, tier: String) -> Self {
        Self {
            event_id: Uuid::new_v4(),
            occurred_at: Utc::now(),
            full_name,
            tier,
        }
    }
}

impl_domain_event!(WinnerDrawn, "WinnerDrawn");

// ============================================================================
// LEDGER EVENTS
// ============================================================================

/// Emitted after a winner has been appended to the ledger
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WinnerRecorded {
    pub event_id: Uuid,
    pub occurred_at: DateTime<Utc>,
    pub full_name: String,
    pub date_time: String,
    pub ledger_size: usize,
}

impl WinnerRecorded {
    pub fn new(full_name: String, date_time: String, ledger_size: usize) -> Self {
        Self {
            event_id: Uuid::new_v4(),
            occurred_at: Utc::now(),
            full_name,
            date_time,
            ledger_size,
        }
    }
}

impl_domain_event!(WinnerRecorded, "WinnerRecorded");

/// Emitted after the ledger store was deleted
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WinnersCleared {
    pub event_id: Uuid,
    pub occurred_at: DateTime<Utc>,
}

impl WinnersCleared {
    pub fn new() -> Self {
        Self {
            event_id: Uuid::new_v4(),
            occurred_at: Utc::now(),
        }
    }
}

impl Default for WinnersCleared {
    fn default() -> Self {
        Self::new()
    }
}

impl_domain_event!(WinnersCleared, "WinnersCleared");

/// Emitted when an unreadable ledger was treated as empty
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LedgerRecovered {
    pub event_id: Uuid,
    pub occurred_at: DateTime<Utc>,
    pub reason: String,
}

impl LedgerRecovered {
    pub fn new(reason: String) -> Self {
        Self {
            event_id: Uuid::new_v4(),
            occurred_at: Utc::now(),
            reason,
        }
    }
}

impl_domain_event!(LedgerRecovered, "LedgerRecovered");
