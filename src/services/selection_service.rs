// src/services/selection_service.rs
//
// Selection Service
//
// Builds the weighted, shuffled pool for one drawing and picks a winner.
//
// CRITICAL RULES:
// - The RNG is seeded once per service instance, never per draw
// - Drawing never writes the winners ledger (see LedgerService)
// - No I/O during draw; the ledger is only read while building a pool
//   with exclusion enabled

use chrono::Utc;
use rand::rngs::StdRng;
use rand::SeedableRng;
use std::sync::{Arc, Mutex, PoisonError};

use crate::domain::{
    apply_fairness_rule, exclude_winners, FairnessConfig, Member, MembershipSnapshot,
    SelectionPool, Winner,
};
use crate::error::{AppError, AppResult};
use crate::events::{EventBus, LedgerRecovered, PoolBuilt, WinnerDrawn};
use crate::repositories::{LedgerLoad, WinnersRepository};

pub struct SelectionService {
    winners_repo: Arc<dyn WinnersRepository>,
    event_bus: Arc<EventBus>,
    rng: Mutex<StdRng>,
}

impl SelectionService {
    /// Service with an RNG seeded from the system clock
    pub fn new(winners_repo: Arc<dyn WinnersRepository>, event_bus: Arc<EventBus>) -> Self {
        let seed = Utc::now().timestamp_nanos_opt().unwrap_or_default() as u64;
        Self::with_seed(winners_repo, event_bus, seed)
    }

    /// Service with a fixed seed, for reproducible draws
    pub fn with_seed(
        winners_repo: Arc<dyn WinnersRepository>,
        event_bus: Arc<EventBus>,
        seed: u64,
    ) -> Self {
        Self {
            winners_repo,
            event_bus,
            rng: Mutex::new(StdRng::seed_from_u64(seed)),
        }
    }

    /// Weighted entries after exclusion, before shuffling
    pub fn prepare_entries(
        snapshot: &MembershipSnapshot,
        config: &FairnessConfig,
        winners: &[Winner],
    ) -> Vec<Member> {
        Self::weigh_entries(snapshot, config, winners).0
    }

    /// Weighted entries after exclusion, plus how many entries exclusion removed
    fn weigh_entries(
        snapshot: &MembershipSnapshot,
        config: &FairnessConfig,
        winners: &[Winner],
    ) -> (Vec<Member>, usize) {
        let entries = apply_fairness_rule(&snapshot.members, &config.rule);
        if !config.exclude_winners {
            return (entries, 0);
        }
        let weighted = entries.len();
        let kept = exclude_winners(entries, winners);
        let excluded = weighted - kept.len();
        (kept, excluded)
    }

    /// Build and shuffle the pool for one drawing.
    ///
    /// The ledger is read only when `exclude_winners` is on. A corrupt
    /// ledger counts as empty.
    pub fn build_pool(
        &self,
        snapshot: &MembershipSnapshot,
        config: &FairnessConfig,
    ) -> AppResult<SelectionPool> {
        let winners = if config.exclude_winners {
            match self.winners_repo.load()? {
                LedgerLoad::Recovered { reason } => {
                    log::warn!("Winners ledger unreadable, excluding nobody: {}", reason);
                    self.event_bus.emit(LedgerRecovered::new(reason));
                    Vec::new()
                }
                load => load.into_winners(),
            }
        } else {
            Vec::new()
        };

        let (entries, excluded_entries) = Self::weigh_entries(snapshot, config, &winners);

        let mut pool = SelectionPool::new(entries);
        {
            let mut rng = self.rng.lock().unwrap_or_else(PoisonError::into_inner);
            pool.shuffle(&mut *rng);
        }

        log::info!(
            "Pool built: {} entries for {} members ({} excluded)",
            pool.len(),
            snapshot.member_count(),
            excluded_entries
        );

        self.event_bus.emit(PoolBuilt::new(
            snapshot.member_count(),
            pool.len(),
            excluded_entries,
        ));

        Ok(pool)
    }

    /// Pick one entry. Nothing is recorded.
    pub fn draw(&self, pool: &SelectionPool) -> AppResult<Member> {
        let winner = {
            let mut rng = self.rng.lock().unwrap_or_else(PoisonError::into_inner);
            pool.pick(&mut *rng).cloned()
        }
        .ok_or(AppError::EmptyPool)?;

        log::info!("Drew '{}' ({})", winner.full_name, winner.tier);
        self.event_bus
            .emit(WinnerDrawn::new(winner.full_name.clone(), winner.tier.clone()));

        Ok(winner)
    }
}
