use crate::config::MatchConfig;
use crate::protocol::{FeedMsg, HeaderMsg, SummaryMsg, FEED_VERSION};
use crate::state::MatchState;
use std::time::Duration;
use tokio::sync::{broadcast, mpsc};

/// Commands from the outside world to the game loop
#[derive(Debug)]
pub enum GameCommand {
    Quit,
}

/// Run the match loop. Owns the match state until the loop ends.
///
/// Stops on `GameCommand::Quit`, when every command sender is gone, or after
/// `max_frames`. Returns the final summary, which is also broadcast.
pub async fn run_game_loop(
    mut cmd_rx: mpsc::Receiver<GameCommand>,
    broadcast_tx: broadcast::Sender<FeedMsg>,
    config: MatchConfig,
) -> SummaryMsg {
    let mut state = MatchState::new(&config);

    let _ = broadcast_tx.send(FeedMsg::Header(HeaderMsg {
        feed_version: FEED_VERSION,
        pitch: config.pitch,
        tick_rate_hz: config.tick_rate_hz,
    }));
    let _ = broadcast_tx.send(FeedMsg::Frame(state.snapshot()));

    let tick_duration = Duration::from_secs_f64(1.0 / config.tick_rate_hz as f64);
    let mut tick_interval = tokio::time::interval(tick_duration);
    tick_interval.set_missed_tick_behavior(tokio::time::MissedTickBehavior::Skip);

    tracing::info!(
        "Kickoff: {} agents, {} Hz, seed {}",
        state.agents.len(),
        config.tick_rate_hz,
        config.rng_seed
    );

    loop {
        tokio::select! {
            _ = tick_interval.tick() => {
                let events = state.step();

                if let Some(goal) = events.goal {
                    let _ = broadcast_tx.send(FeedMsg::Goal(goal));
                }
                if state.frame % config.snapshot_every_n as u64 == 0 {
                    let _ = broadcast_tx.send(FeedMsg::Frame(state.snapshot()));
                }

                if config.max_frames.is_some_and(|max| state.frame >= max) {
                    tracing::info!("Reached frame limit {}", state.frame);
                    break;
                }
            }

            cmd = cmd_rx.recv() => {
                match cmd {
                    Some(GameCommand::Quit) => {
                        tracing::info!("Quit requested at frame {}", state.frame)
                    }
                    None => tracing::info!("Command channel closed"),
                }
                break;
            }
        }
    }

    let summary = state.summary();
    let _ = broadcast_tx.send(FeedMsg::Finished(summary.clone()));
    tracing::info!(
        "Game loop ended after {} frames, score {}-{}",
        summary.frames,
        summary.score.home,
        summary.score.away
    );
    summary
}
