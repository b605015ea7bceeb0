//! Statistical match between two reference squads.
//!
//! Usage: cargo run --bin outcome -- [OPTIONS]
//!
//! Options:
//!   --home-tactic T  Home tactic (default: normal)
//!   --away-tactic T  Away tactic (default: normal)
//!   --seed N         RNG seed (default: 42)
//!   --json           Print the full report as JSON instead of commentary

use football_sim::error::SetupError;
use football_sim::outcome::OutcomeMatch;
use football_sim::squad::{PlayerProfile, Team};
use football_sim::tactics::Tactic;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

const HOME_SQUAD: [&str; 2] = ["Jane Doe", "Al Bundy"];
const AWAY_SQUAD: [&str; 2] = ["Peggy Bundy", "Marcy D'Arcy"];

struct Options {
    home_tactic: String,
    away_tactic: String,
    seed: u64,
    json: bool,
}

fn parse_args() -> Options {
    let args: Vec<String> = std::env::args().collect();
    let mut opts = Options {
        home_tactic: "normal".to_string(),
        away_tactic: "normal".to_string(),
        seed: 42,
        json: false,
    };

    let mut i = 1;
    while i < args.len() {
        match args[i].as_str() {
            "--home-tactic" => {
                i += 1;
                opts.home_tactic = args.get(i).cloned().unwrap_or(opts.home_tactic);
            }
            "--away-tactic" => {
                i += 1;
                opts.away_tactic = args.get(i).cloned().unwrap_or(opts.away_tactic);
            }
            "--seed" => {
                i += 1;
                opts.seed = match args.get(i).map(|s| s.parse()) {
                    Some(Ok(seed)) => seed,
                    _ => {
                        eprintln!("--seed expects an unsigned integer");
                        std::process::exit(1);
                    }
                };
            }
            "--json" => opts.json = true,
            other => eprintln!("Ignoring unknown argument '{}'", other),
        }
        i += 1;
    }
    opts
}

fn reference_squad(name: &str, players: &[&str]) -> Result<Team, SetupError> {
    let profiles: Vec<PlayerProfile> = players.iter().map(|&p| PlayerProfile::named(p)).collect();
    Team::from_profiles(name, &profiles)
}

fn run(opts: &Options) -> Result<(), SetupError> {
    let home_tactic: Tactic = opts.home_tactic.parse()?;
    let away_tactic: Tactic = opts.away_tactic.parse()?;
    let home = reference_squad("Home", &HOME_SQUAD)?;
    let away = reference_squad("Away", &AWAY_SQUAD)?;

    let report = OutcomeMatch::new(
        home,
        away,
        home_tactic,
        away_tactic,
        ChaCha8Rng::seed_from_u64(opts.seed),
    )
    .simulate();

    if opts.json {
        match serde_json::to_string_pretty(&report) {
            Ok(json) => println!("{}", json),
            Err(e) => eprintln!("Failed to encode report: {}", e),
        }
    } else {
        for line in &report.commentary {
            println!("{}", line);
        }
        println!(
            "Final score: {} {}-{} {}",
            report.home_team, report.home_goals, report.away_goals, report.away_team
        );
    }
    Ok(())
}

fn main() {
    tracing_subscriber::fmt().with_writer(std::io::stderr).init();

    let opts = parse_args();
    if let Err(e) = run(&opts) {
        eprintln!("{}", e);
        std::process::exit(1);
    }
}
