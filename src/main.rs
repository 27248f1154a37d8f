// src/main.rs
//
// Headless drawing: prepare members, draw once, confirm.

use clap::Parser;
use std::sync::Arc;
use tokio_util::sync::CancellationToken;

use patron_raffle::application::commands::*;
use patron_raffle::application::preferences::{JsonPreferencesStore, PreferencesStore};
use patron_raffle::application::state::AppState;
use patron_raffle::infrastructure::{init_file_logging, StorageLayout};
use patron_raffle::integrations::patreon::DEFAULT_REDIRECT_URI;
use patron_raffle::integrations::{PatreonClient, PatreonOAuthClient};

/// Draw one winner from the current patron list
#[derive(Parser, Debug)]
#[command(name = "patron-raffle")]
#[command(about = "Weighted raffle over Patreon campaign members")]
#[command(version)]
struct Args {
    /// Ingest a fresh member list before drawing
    #[arg(long)]
    refresh: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    // 1. PREFERENCES
    let preferences_store = Arc::new(JsonPreferencesStore::in_config_dir()?);
    let preferences = preferences_store.load()?;

    // 2. LOGGING
    let layout = StorageLayout::new(preferences.storage_root()?);
    init_file_logging(&layout.log_path())?;
    log::info!(
        "Starting ({} mode, {} profile)",
        preferences.ingestion_mode(),
        preferences.storage_profile()
    );

    // 3. INTEGRATIONS
    let live_api = Arc::new(PatreonClient::new()?);
    let credential_provider = PatreonOAuthClient::new(
        preferences.client_id.clone().unwrap_or_default(),
        preferences.client_secret.clone().unwrap_or_default(),
        preferences
            .redirect_uri
            .clone()
            .unwrap_or_else(|| DEFAULT_REDIRECT_URI.to_string()),
    )?
    .with_stored_tokens(
        preferences.access_token.clone(),
        preferences.refresh_token.clone(),
    );

    // 4. APPLICATION STATE
    let state = AppState::new(
        preferences_store,
        preferences,
        live_api,
        Arc::new(credential_provider),
    )?;

    // 5. CANCELLATION (Ctrl-C stops ingestion between pages)
    let cancel = CancellationToken::new();
    {
        let cancel = cancel.clone();
        tokio::spawn(async move {
            if tokio::signal::ctrl_c().await.is_ok() {
                cancel.cancel();
            }
        });
    }

    // 6. DRAW
    let members = prepare_members(&state, args.refresh, &cancel)
        .await
        .map_err(anyhow::Error::msg)?;
    println!(
        "{} eligible members across {} tiers",
        members.member_count,
        members.tiers.len()
    );

    let draw = draw_winner(&state).await.map_err(anyhow::Error::msg)?;
    println!(
        "Winner: {} ({}), {} of {} entries",
        draw.winner.full_name, draw.winner.tier, draw.chances, draw.pool_size
    );

    match confirm_winner(&state, draw.winner.full_name.clone())
        .await
        .map_err(anyhow::Error::msg)?
    {
        Some(recorded) => println!("Recorded at {}", recorded.date_time),
        None => println!("Test mode: winner not recorded"),
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_args_definition() {
        Args::command().debug_assert();
    }

    #[test]
    fn test_refresh_flag() {
        assert!(!Args::parse_from(["patron-raffle"]).refresh);
        assert!(Args::parse_from(["patron-raffle", "--refresh"]).refresh);
        assert!(Args::try_parse_from(["patron-raffle", "refresh"]).is_err());
    }
}
