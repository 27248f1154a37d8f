// src/integrations/patreon/fixture.rs
//
// Bundled rehearsal dataset. Same shape as one live members page, with no
// next cursor, so ingestion runs the identical pipeline in fixture mode.

use async_trait::async_trait;

use super::client::{MembershipApi, PageRequest};
use super::payload::MembersPage;
use crate::error::{AppError, AppResult};

const SAMPLE_MEMBERS_PAGE: &str = include_str!("../../../fixtures/patreons.json");

/// Serves the bundled sample page for every request
#[derive(Debug, Clone, Default)]
pub struct FixtureMembershipApi;

impl FixtureMembershipApi {
    pub fn new() -> Self {
        Self
    }

    pub fn sample_page() -> AppResult<MembersPage> {
        serde_json::from_str(SAMPLE_MEMBERS_PAGE)
            .map_err(|e| AppError::Decode(format!("Failed to parse sample members: {}", e)))
    }
}

#[async_trait]
impl MembershipApi for FixtureMembershipApi {
    async fn fetch_members_page(&self, _request: &PageRequest) -> AppResult<MembersPage> {
        let page = Self::sample_page()?;
        log::info!("Members test data generated");
        Ok(page)
    }
}
