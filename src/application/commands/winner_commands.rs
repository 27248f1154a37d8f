// src/application/commands/winner_commands.rs

use crate::application::{
    dto::*,
    error_handling::ToErrorResponse,
    state::AppState,
};

/// Previous winners, oldest first
pub async fn list_winners(state: &AppState) -> Result<Vec<WinnerDto>, String> {
    let winners = state.ledger_service.list_all().to_error_response()?;
    Ok(winners.into_iter().map(WinnerDto::from).collect())
}

pub async fn clear_winners(state: &AppState) -> Result<(), String> {
    state.ledger_service.clear().to_error_response()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::commands::test_support;
    use crate::application::preferences::Preferences;

    #[tokio::test]
    async fn test_clear_winners() {
        let dir = tempfile::tempdir().unwrap();
        let state = test_support::state(&dir, Preferences::default());
        state.ledger_service.append("Ada").unwrap();
        state.ledger_service.append("Grace").unwrap();
        assert_eq!(list_winners(&state).await.unwrap().len(), 2);

        clear_winners(&state).await.unwrap();

        assert!(list_winners(&state).await.unwrap().is_empty());
    }
}
