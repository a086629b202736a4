//! scorekeep demo.
//!
//! Loads configuration, initialises structured logging, seeds an in-memory
//! store with the configured objectives, runs the configured transfers and
//! prints each objective's totals and leaderboard as JSON.

use anyhow::{Context, Result};
use serde_json::json;
use std::sync::Arc;
use tracing::{error, info, warn};

use scorekeep::config::{self, AppConfig};
use scorekeep::{InMemoryStore, Scoreboard, TransferOutcome};

const DEFAULT_CONFIG_PATH: &str = "scorekeep.toml";

#[tokio::main]
async fn main() -> Result<()> {
    // Load .env file if present (non-fatal if missing)
    let _ = dotenv::dotenv();

    let path = std::env::var("SCOREKEEP_CONFIG").unwrap_or_else(|_| DEFAULT_CONFIG_PATH.into());
    let cfg = AppConfig::load_or_default(&path)?;

    init_logging(&cfg.logging);
    info!(
        config = %path,
        objectives = cfg.seed.len(),
        transfers = cfg.transfers.len(),
        leaderboard_limit = cfg.scoreboard.leaderboard_limit,
        "scorekeep starting up"
    );

    // -- Seed the store --------------------------------------------------

    let store = Arc::new(InMemoryStore::new());
    for objective in &cfg.seed {
        if !store.create_objective(&objective.name)? {
            warn!(objective = %objective.name, "Objective seeded twice, merging participants");
        }
        for participant in &objective.participants {
            store
                .add_participant(&objective.name, &participant.name, participant.score)
                .with_context(|| format!("Failed to seed {}", participant.name))?;
        }
    }

    let board = Scoreboard::with_config(store.clone(), cfg.scoreboard);

    // -- Transfers -------------------------------------------------------

    for request in &cfg.transfers {
        if !board.exists(&request.objective).await? {
            warn!(transfer = %request, "Transfer names an unknown objective, skipping");
            continue;
        }
        match board.transfer_with(request).await {
            TransferOutcome::Committed(receipt) => {
                info!(id = %receipt.id, transfer = %request, "Transfer applied");
            }
            TransferOutcome::Rejected(reason) => {
                warn!(transfer = %request, reason = %reason, "Transfer skipped");
            }
            outcome @ TransferOutcome::Failed { .. } => {
                error!(transfer = %request, partial = outcome.is_partial(), "Transfer failed");
            }
        }
    }

    // -- Report ----------------------------------------------------------

    for name in store.objective_names()? {
        let data = board.all_data(&name).await?;
        let leaderboard = board.top(&name).await?;
        let report = json!({
            "objective": name,
            "total": data.total,
            "players": data.players,
            "leaderboard": leaderboard,
        });
        println!("{}", serde_json::to_string_pretty(&report)?);
    }

    Ok(())
}

/// Initialise the `tracing` subscriber.
fn init_logging(cfg: &config::LoggingConfig) {
    use tracing_subscriber::{fmt, EnvFilter};

    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(&cfg.filter));

    let json_logging = cfg.json || std::env::var("SCOREKEEP_LOG_JSON").is_ok();

    if json_logging {
        fmt()
            .json()
            .with_env_filter(env_filter)
            .with_target(true)
            .with_writer(std::io::stderr)
            .init();
    } else {
        fmt()
            .with_env_filter(env_filter)
            .with_target(true)
            .with_writer(std::io::stderr)
            .init();
    }
}
