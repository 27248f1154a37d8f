// src/integrations/mod.rs
//
// External Integrations Module
//
// The membership platform's REST API, its OAuth token endpoint and the
// bundled rehearsal dataset that stands in for the API in fixture mode.

pub mod patreon;

pub use patreon::client::{MembershipApi, PageRequest, PatreonClient};
pub use patreon::fixture::FixtureMembershipApi;
pub use patreon::oauth::{CredentialProvider, PatreonOAuthClient};
pub use patreon::payload::{MemberResource, MembersPage};
