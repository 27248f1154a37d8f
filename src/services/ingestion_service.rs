// src/services/ingestion_service.rs
//
// Membership Ingestion Service
//
// Pulls the member roster (live API or bundled fixture), normalizes it into
// a snapshot and persists it.
//
// CRITICAL RULES:
// - Pagination is strictly sequential: each request needs the previous cursor
// - All pages are fetched before anything is normalized or written
// - Nothing is persisted when a page fails or the run is cancelled
// - Tiers are written before members
// - Fixture and live runs share the same pipeline and the same two writes

use chrono::Utc;
use std::sync::Arc;
use tokio_util::sync::CancellationToken;

use crate::domain::{validate_snapshot, MembershipSnapshot, Session, TierMap};
use crate::error::{AppError, AppResult};
use crate::events::{EventBus, MemberDropped, MembersIngested};
use crate::infrastructure::StorageProfile;
use crate::integrations::{MembersPage, MembershipApi, PageRequest};
use crate::repositories::SnapshotRepository;
use crate::services::ingestion_types::{normalize_pages, DropReason, IngestionMode, NormalizedRoster};

/// Where and how to ingest
#[derive(Debug, Clone)]
pub struct IngestRequest {
    pub mode: IngestionMode,
    pub profile: StorageProfile,
    pub campaign_id: String,
}

pub struct MembershipIngestionService {
    live_api: Arc<dyn MembershipApi>,
    fixture_api: Arc<dyn MembershipApi>,
    snapshot_repo: Arc<dyn SnapshotRepository>,
    event_bus: Arc<EventBus>,
}

impl MembershipIngestionService {
    pub fn new(
        live_api: Arc<dyn MembershipApi>,
        fixture_api: Arc<dyn MembershipApi>,
        snapshot_repo: Arc<dyn SnapshotRepository>,
        event_bus: Arc<EventBus>,
    ) -> Self {
        Self {
            live_api,
            fixture_api,
            snapshot_repo,
            event_bus,
        }
    }

    /// Fetch, normalize and persist a fresh snapshot.
    ///
    /// Live mode needs an authenticated session; fixture mode ignores it.
    /// `cancel` is checked before every page request.
    pub async fn ingest(
        &self,
        request: &IngestRequest,
        session: &Session,
        cancel: &CancellationToken,
    ) -> AppResult<MembershipSnapshot> {
        let (api, bearer_token) = match request.mode {
            IngestionMode::Fixture => (&self.fixture_api, String::new()),
            IngestionMode::Live => {
                let token = session
                    .bearer_token(Utc::now())
                    .map_err(|e| AppError::Session(e.to_string()))?;
                (&self.live_api, token.to_string())
            }
        };

        let pages = self
            .fetch_all_pages(api.as_ref(), &bearer_token, &request.campaign_id, cancel)
            .await?;

        let roster = normalize_pages(&pages);
        self.report_drops(&roster);

        let snapshot = MembershipSnapshot::new(roster.members, roster.tiers);
        validate_snapshot(&snapshot).map_err(|e| AppError::TierResolution(e.to_string()))?;

        for title in snapshot.tiers.duplicate_titles() {
            log::warn!(
                "Tier title '{}' is shared by several tiers; they will share one weight and one color",
                title
            );
        }

        self.snapshot_repo
            .save(request.profile, &snapshot.members, &snapshot.tiers)?;

        log::info!(
            "Ingested {} members across {} tiers from {} page(s) ({} mode, {} profile)",
            snapshot.member_count(),
            snapshot.tiers.len(),
            pages.len(),
            request.mode,
            request.profile
        );

        self.event_bus.emit(MembersIngested::new(
            request.mode.to_string(),
            pages.len(),
            snapshot.member_count(),
            snapshot.tiers.len(),
            roster.dropped.len(),
        ));

        Ok(snapshot)
    }

    /// Read the persisted snapshot for a profile and recompute tier colors
    pub fn load_snapshot(&self, profile: StorageProfile) -> AppResult<MembershipSnapshot> {
        let stored = self.snapshot_repo.load(profile)?.ok_or_else(|| {
            AppError::MissingData(format!("No {} member snapshot has been ingested yet", profile))
        })?;

        let snapshot = MembershipSnapshot::new(stored.members, stored.tiers);
        validate_snapshot(&snapshot).map_err(|e| AppError::TierResolution(e.to_string()))?;
        Ok(snapshot)
    }

    /// Swap the tier map of the stored snapshot.
    ///
    /// Every member must still resolve against the new map.
    pub fn replace_tiers(
        &self,
        profile: StorageProfile,
        tiers: TierMap,
    ) -> AppResult<MembershipSnapshot> {
        let mut snapshot = self.load_snapshot(profile)?;
        snapshot.replace_tiers(tiers);
        validate_snapshot(&snapshot).map_err(|e| AppError::TierResolution(e.to_string()))?;

        self.snapshot_repo
            .save(profile, &snapshot.members, &snapshot.tiers)?;
        log::info!("Tier map updated: {} tiers", snapshot.tiers.len());
        Ok(snapshot)
    }

    // ========================================================================
    // INTERNAL
    // ========================================================================

    async fn fetch_all_pages(
        &self,
        api: &dyn MembershipApi,
        bearer_token: &str,
        campaign_id: &str,
        cancel: &CancellationToken,
    ) -> AppResult<Vec<MembersPage>> {
        let mut pages = Vec::new();
        let mut cursor: Option<String> = None;

        loop {
            if cancel.is_cancelled() {
                log::warn!("Ingestion cancelled after {} page(s)", pages.len());
                return Err(AppError::Cancelled);
            }

            let page_request = PageRequest {
                bearer_token: bearer_token.to_string(),
                campaign_id: campaign_id.to_string(),
                cursor: cursor.take(),
            };
            let page = api.fetch_members_page(&page_request).await?;

            log::debug!(
                "Fetched members page {} ({} records)",
                pages.len() + 1,
                page.data.len()
            );

            let next = page.next_cursor().map(str::to_string);
            pages.push(page);

            match next {
                Some(next) => cursor = Some(next),
                None => break,
            }
        }

        Ok(pages)
    }

    fn report_drops(&self, roster: &NormalizedRoster) {
        if roster.ineligible > 0 {
            log::debug!(
                "Skipped {} members that are not active paid patrons",
                roster.ineligible
            );
        }

        for dropped in &roster.dropped {
            match &dropped.reason {
                DropReason::TierOnLaterPage { .. } => log::warn!(
                    "Member '{}' excluded: {} (tier map is built from the first page only)",
                    dropped.full_name,
                    dropped.reason
                ),
                _ => log::warn!(
                    "Member '{}' excluded: {}",
                    dropped.full_name,
                    dropped.reason
                ),
            }

            self.event_bus.emit(MemberDropped::new(
                dropped.full_name.clone(),
                dropped.reason.to_string(),
            ));
        }
    }
}
