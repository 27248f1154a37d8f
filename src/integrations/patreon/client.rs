// src/integrations/patreon/client.rs
//
// Membership API client
//
// ARCHITECTURE:
// - REST client for the campaign members endpoint
// - Handles authentication header, rate limiting, field selection
// - Returns raw pages (NO normalization, NO persistence)
// - Pagination is driven by the caller, one cursor at a time
//
// CRITICAL RULES:
// - This is INFRASTRUCTURE, not DOMAIN
// - Never creates domain members directly
// - Every request expands the currently entitled tiers

use async_trait::async_trait;
use reqwest::{header, Client};
use std::sync::Arc;
use std::time::{Duration, Instant};
use tokio::sync::Mutex;

use super::payload::MembersPage;
use super::{API_BASE_URL, ENTITLED_TIERS_INCLUDE, MEMBER_FIELDS, TIER_FIELDS};
use crate::error::{AppError, AppResult};

/// Parameters of a single members page request
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageRequest {
    pub bearer_token: String,
    pub campaign_id: String,
    /// `None` for the first page
    pub cursor: Option<String>,
}

/// Source of member pages.
///
/// Implemented by the live REST client and by the bundled fixture.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait MembershipApi: Send + Sync {
    async fn fetch_members_page(&self, request: &PageRequest) -> AppResult<MembersPage>;
}

/// Rate limiter state
struct RateLimiter {
    last_request: Option<Instant>,
    min_interval: Duration,
}

impl RateLimiter {
    fn new(min_interval: Duration) -> Self {
        Self {
            last_request: None,
            min_interval,
        }
    }

    async fn wait_if_needed(&mut self) {
        if let Some(last) = self.last_request {
            let elapsed = last.elapsed();
            if elapsed < self.min_interval {
                tokio::time::sleep(self.min_interval - elapsed).await;
            }
        }
        self.last_request = Some(Instant::now());
    }
}

/// Membership platform REST client
pub struct PatreonClient {
    base_url: String,
    http_client: Client,
    rate_limiter: Arc<Mutex<RateLimiter>>,
}

impl PatreonClient {
    /// Create a new client against the public API
    pub fn new() -> AppResult<Self> {
        Self::with_base_url(API_BASE_URL)
    }

    /// Create a client against another API root
    pub fn with_base_url(base_url: impl Into<String>) -> AppResult<Self> {
        let http_client = Client::builder()
            .timeout(Duration::from_secs(30))
            .build()
            .map_err(|e| AppError::Network(format!("Failed to create HTTP client: {}", e)))?;

        Ok(Self {
            base_url: base_url.into().trim_end_matches('/').to_string(),
            http_client,
            rate_limiter: Arc::new(Mutex::new(RateLimiter::new(Duration::from_millis(500)))),
        })
    }

    fn members_url(&self, campaign_id: &str) -> String {
        format!("{}/campaigns/{}/members", self.base_url, campaign_id)
    }

    /// Query string: relationship expansion, sparse fieldsets, cursor
    fn query_params(cursor: Option<&str>) -> Vec<(&'static str, String)> {
        let mut params = vec![
            ("include", ENTITLED_TIERS_INCLUDE.to_string()),
            ("fields[member]", MEMBER_FIELDS.join(",")),
            ("fields[tier]", TIER_FIELDS.join(",")),
        ];
        if let Some(cursor) = cursor.filter(|c| !c.is_empty()) {
            params.push(("page[cursor]", cursor.to_string()));
        }
        params
    }
}

#[async_trait]
impl MembershipApi for PatreonClient {
    async fn fetch_members_page(&self, request: &PageRequest) -> AppResult<MembersPage> {
        self.rate_limiter.lock().await.wait_if_needed().await;

        let response = self
            .http_client
            .get(self.members_url(&request.campaign_id))
            .header(header::ACCEPT, "application/json")
            .bearer_auth(&request.bearer_token)
            .query(&Self::query_params(request.cursor.as_deref()))
            .send()
            .await
            .map_err(|e| AppError::Network(format!("Members request failed: {}", e)))?;

        if !response.status().is_success() {
            return Err(AppError::Network(format!(
                "Members API returned status: {}",
                response.status()
            )));
        }

        let body = response
            .text()
            .await
            .map_err(|e| AppError::Network(format!("Failed to read members response: {}", e)))?;

        serde_json::from_str(&body)
            .map_err(|e| AppError::Decode(format!("Failed to parse members page: {}", e)))
    }
}
