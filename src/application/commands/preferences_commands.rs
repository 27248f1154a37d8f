// src/application/commands/preferences_commands.rs

use crate::application::{
    error_handling::ToErrorResponse,
    preferences::Preferences,
    state::AppState,
};
use crate::infrastructure::read_logs;

pub async fn get_preferences(state: &AppState) -> Result<Preferences, String> {
    Ok(state.preferences())
}

/// Persist preferences. Storage location and credentials apply on next start.
pub async fn save_preferences(state: &AppState, preferences: Preferences) -> Result<(), String> {
    state
        .preferences_store
        .save(&preferences)
        .to_error_response()?;
    state.set_preferences(preferences);
    Ok(())
}

/// Contents of the log file
pub async fn get_logs(state: &AppState) -> Result<String, String> {
    read_logs(&state.log_path).to_error_response()
}
