//! Arena Duel - headless exhibition runner
//!
//! Boots the simulation engine and drives a single-player exhibition from
//! the command line: the menu state machine is walked through intents,
//! snapshots are consumed the way a renderer would, and the result is
//! logged at game over.

use tokio::sync::broadcast::error::RecvError;
use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use arena_duel::config::Config;
use arena_duel::game::{GameMatch, GameMode, MatchStatus};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load environment variables
    dotenvy::dotenv().ok();

    // Load configuration
    let config = Config::from_env()?;

    // Initialize tracing
    init_tracing(&config.log_level);

    let seed: u64 = config.rng_seed.unwrap_or_else(rand::random);
    info!(seed, round_time_secs = config.round_time_secs, "Starting Arena Duel exhibition");

    let (game, handle) = GameMatch::new(seed, config.round_time_secs);
    let loop_task = tokio::spawn(game.run());

    let mut snapshots = handle.subscribe();
    handle.start_match().await;
    handle.select_mode(GameMode::SinglePlayer).await;

    loop {
        tokio::select! {
            _ = tokio::signal::ctrl_c() => {
                info!("Received Ctrl+C, shutting down");
                break;
            }
            snapshot = snapshots.recv() => match snapshot {
                Ok(snapshot) => {
                    if snapshot.status == MatchStatus::Playing
                        && snapshot.tick % config.snapshot_log_every == 0
                    {
                        info!(
                            tick = snapshot.tick,
                            time_left = snapshot.time_left,
                            p1_health = snapshot.player_one.health,
                            p2_health = snapshot.player_two.health,
                            "Fight in progress"
                        );
                    }
                    if snapshot.status == MatchStatus::GameOver {
                        info!(
                            winner = snapshot.winner.as_deref().unwrap_or("?"),
                            "Fight over"
                        );
                        println!("{}", serde_json::to_string_pretty(&snapshot)?);
                        break;
                    }
                }
                Err(RecvError::Lagged(skipped)) => {
                    warn!(skipped, "Snapshot receiver lagging");
                }
                Err(RecvError::Closed) => break,
            },
        }
    }

    // Dropping the handle closes the intent channel and stops the loop
    drop(snapshots);
    drop(handle);
    let _ = loop_task.await;

    info!("Exhibition complete");
    Ok(())
}

/// Initialize tracing/logging
fn init_tracing(log_level: &str) {
    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(log_level));

    tracing_subscriber::registry()
        .with(env_filter)
        .with(tracing_subscriber::fmt::layer().with_target(true))
        .init();
}
