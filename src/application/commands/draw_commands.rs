// src/application/commands/draw_commands.rs

use crate::application::{
    dto::*,
    error_handling::ToErrorResponse,
    state::AppState,
};
use crate::error::AppError;

/// Build a fresh pool from the prepared snapshot and draw one entry.
/// Nothing is recorded until `confirm_winner`.
pub async fn draw_winner(state: &AppState) -> Result<DrawResultDto, String> {
    let preferences = state.preferences();
    let snapshot = state
        .current_snapshot()
        .ok_or_else(|| AppError::MissingData("Members have not been prepared".to_string()))
        .to_error_response()?;

    let pool = state
        .selection_service
        .build_pool(&snapshot, &preferences.fairness_config())
        .to_error_response()?;
    let winner = state.selection_service.draw(&pool).to_error_response()?;

    Ok(DrawResultDto {
        chances: pool.count_of(&winner.full_name),
        pool_size: pool.len(),
        winner: MemberDto::from_member(&winner, &snapshot),
        test_mode: preferences.test_mode,
    })
}

/// Record the drawn winner; skipped in test mode
pub async fn confirm_winner(
    state: &AppState,
    full_name: String,
) -> Result<Option<WinnerDto>, String> {
    let test_mode = state.preferences().test_mode;
    let recorded = state
        .ledger_service
        .confirm_winner(&full_name, test_mode)
        .to_error_response()?;
    Ok(recorded.map(WinnerDto::from))
}
