// src/application/state.rs

use std::path::PathBuf;
use std::sync::{Arc, PoisonError, RwLock};
use tokio::sync::Mutex;

use crate::application::preferences::{Preferences, PreferencesStore};
use crate::domain::{MembershipSnapshot, Session};
use crate::error::AppResult;
use crate::events::EventBus;
use crate::infrastructure::StorageLayout;
use crate::integrations::{CredentialProvider, FixtureMembershipApi, MembershipApi};
use crate::repositories::{JsonSnapshotRepository, JsonWinnersRepository};
use crate::services::{LedgerService, MembershipIngestionService, SelectionService, SessionService};

/// Application state shared by all commands.
/// Services are Arc-wrapped; mutable state sits behind locks.
pub struct AppState {
    pub event_bus: Arc<EventBus>,
    pub ingestion_service: Arc<MembershipIngestionService>,
    pub selection_service: Arc<SelectionService>,
    pub ledger_service: Arc<LedgerService>,
    pub session_service: Arc<SessionService>,
    pub preferences_store: Arc<dyn PreferencesStore>,
    pub preferences: RwLock<Preferences>,
    /// Held across the token request, hence the async mutex
    pub session: Mutex<Session>,
    /// Snapshot the next draw runs against
    pub snapshot: RwLock<Option<MembershipSnapshot>>,
    pub log_path: PathBuf,
}

impl AppState {
    /// Wire repositories and services under the preferred storage root
    pub fn new(
        preferences_store: Arc<dyn PreferencesStore>,
        preferences: Preferences,
        live_api: Arc<dyn MembershipApi>,
        credential_provider: Arc<dyn CredentialProvider>,
    ) -> AppResult<Self> {
        let layout = StorageLayout::new(preferences.storage_root()?);
        let event_bus = Arc::new(EventBus::new());

        let snapshot_repo = Arc::new(JsonSnapshotRepository::new(layout.clone()));
        let winners_repo = Arc::new(JsonWinnersRepository::new(layout.clone()));

        let ingestion_service = Arc::new(MembershipIngestionService::new(
            live_api,
            Arc::new(FixtureMembershipApi::new()),
            snapshot_repo,
            event_bus.clone(),
        ));
        let selection_service = Arc::new(SelectionService::new(
            winners_repo.clone(),
            event_bus.clone(),
        ));
        let ledger_service = Arc::new(LedgerService::new(winners_repo, event_bus.clone()));
        let session_service = Arc::new(SessionService::new(credential_provider));

        Ok(Self {
            event_bus,
            ingestion_service,
            selection_service,
            ledger_service,
            session_service,
            preferences_store,
            preferences: RwLock::new(preferences),
            session: Mutex::new(Session::default()),
            snapshot: RwLock::new(None),
            log_path: layout.log_path(),
        })
    }

    /// Copy of the current preferences
    pub fn preferences(&self) -> Preferences {
        self.preferences
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    pub fn set_preferences(&self, preferences: Preferences) {
        *self.preferences.write().unwrap_or_else(PoisonError::into_inner) = preferences;
    }

    pub fn current_snapshot(&self) -> Option<MembershipSnapshot> {
        self.snapshot
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    pub fn set_snapshot(&self, snapshot: MembershipSnapshot) {
        *self.snapshot.write().unwrap_or_else(PoisonError::into_inner) = Some(snapshot);
    }
}
