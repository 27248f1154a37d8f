// src/application/mod.rs
//
// Application Layer
//
// ARCHITECTURE:
// - Boundary between a front end and the services
// - Owns preferences and the shared application state
// - Translates domain entities into DTOs

pub mod commands;
pub mod dto;
pub mod error_handling;
pub mod preferences;
pub mod state;

pub use commands::*;
pub use dto::*;
pub use error_handling::{ErrorResponse, ErrorType, ToErrorResponse};
pub use preferences::{ChancesRule, JsonPreferencesStore, Preferences, PreferencesStore};
pub use state::AppState;
