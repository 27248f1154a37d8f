pub mod client;
pub mod fixture;
pub mod oauth;
pub mod payload;

/// API root for the v2 resource endpoints
pub const API_BASE_URL: &str = "https://www.patreon.com/api/oauth2/v2";

/// OAuth token endpoint (authorization-code and refresh grants)
pub const TOKEN_URL: &str = "https://www.patreon.com/api/oauth2/token";

/// Relationship expanded on every members request
pub const ENTITLED_TIERS_INCLUDE: &str = "currently_entitled_tiers";

/// Member fields requested from the API
pub const MEMBER_FIELDS: [&str; 3] = ["full_name", "patron_status", "last_charge_status"];

/// Tier fields requested from the API
pub const TIER_FIELDS: [&str; 1] = ["title"];

/// `patron_status` of a currently pledging member
pub const ACTIVE_PATRON_STATUS: &str = "active_patron";

/// `last_charge_status` of a member whose last charge went through
pub const PAID_CHARGE_STATUS: &str = "Paid";

/// OAuth redirect target registered for the desktop client
pub const DEFAULT_REDIRECT_URI: &str = "http://localhost:8080";
