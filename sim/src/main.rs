use football_sim::config::MatchConfig;
use football_sim::feed::{pump, FrameRecorder, FrameSink, JsonLinesSink};
use football_sim::game_loop::{run_game_loop, GameCommand};
use football_sim::protocol::FeedMsg;
use std::str::FromStr;
use tokio::sync::{broadcast, mpsc};

/// Parse the value following a flag.
fn flag_value<T: FromStr>(args: &[String], i: usize, flag: &str) -> Result<T, String> {
    let raw = args.get(i).ok_or_else(|| format!("Missing value for {}", flag))?;
    raw.parse().map_err(|_| format!("Invalid value '{}' for {}", raw, flag))
}

/// Build the match configuration and optional recording path from the command line.
fn parse_args(args: &[String]) -> Result<(MatchConfig, Option<String>), String> {
    let mut config = MatchConfig::default();
    let mut record_path: Option<String> = None;

    let mut i = 1;
    while i < args.len() {
        match args[i].as_str() {
            "--frames" => {
                i += 1;
                config.max_frames = Some(flag_value(args, i, "--frames")?);
            }
            "--tick-rate" => {
                i += 1;
                config.tick_rate_hz = flag_value(args, i, "--tick-rate")?;
            }
            "--seed" => {
                i += 1;
                config.rng_seed = flag_value(args, i, "--seed")?;
            }
            "--every" => {
                i += 1;
                config.snapshot_every_n = flag_value(args, i, "--every")?;
            }
            "--record" => {
                i += 1;
                record_path = Some(flag_value(args, i, "--record")?);
            }
            other => eprintln!("Ignoring unknown argument '{}'", other),
        }
        i += 1;
    }
    Ok((config, record_path))
}

#[tokio::main]
async fn main() {
    // Stdout carries the JSON-lines feed, so logs go to stderr
    tracing_subscriber::fmt().with_writer(std::io::stderr).init();

    let args: Vec<String> = std::env::args().collect();
    let (config, record_path) = match parse_args(&args) {
        Ok(parsed) => parsed,
        Err(e) => {
            eprintln!("{}", e);
            std::process::exit(1);
        }
    };

    if let Err(e) = config.validate() {
        eprintln!("Invalid match configuration: {}", e);
        std::process::exit(1);
    }

    let (game_tx, game_rx) = mpsc::channel::<GameCommand>(8);
    let (broadcast_tx, _) = broadcast::channel::<FeedMsg>(256);

    // Subscribe before the loop starts so the header is not missed
    let feed_rx = broadcast_tx.subscribe();
    let mut sinks: Vec<Box<dyn FrameSink + Send>> =
        vec![Box::new(JsonLinesSink::new(std::io::stdout()))];
    if let Some(path) = record_path {
        match FrameRecorder::create(&path) {
            Ok(recorder) => sinks.push(Box::new(recorder)),
            Err(e) => {
                eprintln!("Cannot record to {}: {}", path, e);
                std::process::exit(1);
            }
        }
    }
    let feed = tokio::spawn(async move { pump(feed_rx, &mut sinks).await });

    let quit_tx = game_tx.clone();
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            let _ = quit_tx.send(GameCommand::Quit).await;
        }
    });

    tracing::info!("Starting football match simulation");
    let game = tokio::spawn(run_game_loop(game_rx, broadcast_tx, config));

    let summary = match game.await {
        Ok(summary) => summary,
        Err(e) => {
            eprintln!("Game loop failed: {}", e);
            std::process::exit(1);
        }
    };
    drop(game_tx);

    match feed.await {
        Ok(Ok(())) => {}
        Ok(Err(e)) => {
            eprintln!("Failed to write match feed: {}", e);
            std::process::exit(1);
        }
        Err(e) => {
            eprintln!("Feed task failed: {}", e);
            std::process::exit(1);
        }
    }

    eprintln!(
        "Full time after {} frames: Home {} - {} Away",
        summary.frames, summary.score.home, summary.score.away
    );
}
