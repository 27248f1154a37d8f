// src/application/commands/member_commands.rs

use std::collections::BTreeMap;
use tokio_util::sync::CancellationToken;

use crate::application::{
    dto::*,
    error_handling::ToErrorResponse,
    state::AppState,
};
use crate::domain::{MembershipSnapshot, TierMap};
use crate::error::{AppError, AppResult};
use crate::services::{IngestRequest, IngestionMode};

/// Load the stored snapshot for the current profile
pub async fn load_members(state: &AppState) -> Result<SnapshotDto, String> {
    let profile = state.preferences().storage_profile();
    let snapshot = state
        .ingestion_service
        .load_snapshot(profile)
        .to_error_response()?;
    Ok(remember(state, snapshot))
}

/// Ingest a fresh snapshot (live API or bundled dataset)
pub async fn refresh_members(
    state: &AppState,
    cancel: &CancellationToken,
) -> Result<SnapshotDto, String> {
    let snapshot = ingest(state, cancel).await.to_error_response()?;
    Ok(remember(state, snapshot))
}

/// Snapshot for the next drawing.
///
/// Test mode ingests when nothing is stored yet. Otherwise the stored
/// snapshot is used unless `refresh` asks for a new ingestion.
pub async fn prepare_members(
    state: &AppState,
    refresh: bool,
    cancel: &CancellationToken,
) -> Result<SnapshotDto, String> {
    let preferences = state.preferences();
    let profile = preferences.storage_profile();

    let result = if refresh {
        ingest(state, cancel).await
    } else {
        match state.ingestion_service.load_snapshot(profile) {
            Err(AppError::MissingData(_)) if preferences.test_mode => {
                log::info!("No rehearsal data yet; generating it");
                ingest(state, cancel).await
            }
            other => other,
        }
    };
    let snapshot = result.to_error_response()?;

    Ok(remember(state, snapshot))
}

/// Replace the tier map of the stored snapshot
pub async fn update_tiers(
    state: &AppState,
    tiers: BTreeMap<String, String>,
) -> Result<SnapshotDto, String> {
    let profile = state.preferences().storage_profile();
    let snapshot = state
        .ingestion_service
        .replace_tiers(profile, TierMap::from_iter(tiers))
        .to_error_response()?;
    Ok(remember(state, snapshot))
}

async fn ingest(state: &AppState, cancel: &CancellationToken) -> AppResult<MembershipSnapshot> {
    let preferences = state.preferences();
    let mode = preferences.ingestion_mode();
    let campaign_id = match mode {
        IngestionMode::Live => preferences.require_campaign_id()?.to_string(),
        IngestionMode::Fixture => String::new(),
    };
    let request = IngestRequest {
        mode,
        profile: preferences.storage_profile(),
        campaign_id,
    };

    let mut session = state.session.lock().await;
    if mode == IngestionMode::Live {
        state
            .session_service
            .ensure_authenticated(&mut session)
            .await?;
    }
    state
        .ingestion_service
        .ingest(&request, &session, cancel)
        .await
}

fn remember(state: &AppState, snapshot: MembershipSnapshot) -> SnapshotDto {
    let dto = SnapshotDto::from(&snapshot);
    state.set_snapshot(snapshot);
    dto
}
