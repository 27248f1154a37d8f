// src/services/ledger_service.rs
//
// Winners Ledger Service
//
// CRITICAL RULES:
// - Append-only history; entries are never edited or deduplicated
// - A corrupt ledger is recovered as empty and logged, never surfaced
// - Open/write failures abort the operation
// - Single writer: callers serialize draws

use std::sync::Arc;

use crate::domain::{DomainError, Winner};
use crate::error::{AppError, AppResult};
use crate::events::{EventBus, LedgerRecovered, WinnerRecorded, WinnersCleared};
use crate::repositories::{LedgerLoad, WinnersRepository};

pub struct LedgerService {
    winners_repo: Arc<dyn WinnersRepository>,
    event_bus: Arc<EventBus>,
}

impl LedgerService {
    pub fn new(winners_repo: Arc<dyn WinnersRepository>, event_bus: Arc<EventBus>) -> Self {
        Self {
            winners_repo,
            event_bus,
        }
    }

    /// Record a winner stamped with the current local time
    pub fn append(&self, full_name: &str) -> AppResult<Winner> {
        if full_name.trim().is_empty() {
            return Err(AppError::Domain(DomainError::InvariantViolation(
                "Winner name cannot be empty".to_string(),
            )));
        }

        let mut winners = self.read_recovering()?;
        let winner = Winner::now(full_name);
        winners.push(winner.clone());
        self.winners_repo.save(&winners)?;

        log::info!("Recorded winner '{}' at {}", winner.full_name, winner.date_time);
        self.event_bus.emit(WinnerRecorded::new(
            winner.full_name.clone(),
            winner.date_time.clone(),
            winners.len(),
        ));

        Ok(winner)
    }

    /// Full history in insertion order
    pub fn list_all(&self) -> AppResult<Vec<Winner>> {
        self.read_recovering()
    }

    /// Delete the ledger. Clearing an absent ledger is not an error.
    pub fn clear(&self) -> AppResult<()> {
        self.winners_repo.clear()?;
        log::info!("Winners ledger cleared");
        self.event_bus.emit(WinnersCleared::new());
        Ok(())
    }

    /// Record a confirmed draw unless this is a rehearsal
    pub fn confirm_winner(&self, full_name: &str, test_mode: bool) -> AppResult<Option<Winner>> {
        if test_mode {
            log::info!("Test mode: '{}' not recorded", full_name);
            return Ok(None);
        }
        self.append(full_name).map(Some)
    }

    fn read_recovering(&self) -> AppResult<Vec<Winner>> {
        match self.winners_repo.load()? {
            LedgerLoad::Recovered { reason } => {
                log::warn!("Winners ledger unreadable, starting from empty: {}", reason);
                self.event_bus.emit(LedgerRecovered::new(reason));
                Ok(Vec::new())
            }
            load => Ok(load.into_winners()),
        }
    }
}
