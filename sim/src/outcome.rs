//! Statistical match simulator.
//!
//! No pitch geometry here: a match is 90 one-minute rounds in which a random
//! fit player of the team in possession tries a pass and a shot, with success
//! odds driven by their (home-advantage and tactic adjusted) powers. Produces a
//! line of commentary per event and the final result.

use crate::protocol::TeamSide;
use crate::squad::{PlayerStats, Team};
use crate::tactics::Tactic;
use rand::seq::SliceRandom;
use rand::Rng;
use serde::Serialize;

pub const HOME_ADVANTAGE: f64 = 1.05;
pub const MATCH_MINUTES: u32 = 90;

/// Midfield power that gives the plain pass bonus
const REFERENCE_MIDFIELD: f64 = 85.0;
/// Offense times accuracy that gives the plain shot bonus
const REFERENCE_FINISHING: f64 = 90.0 * 88.0;
const PASS_BONUS: f64 = 0.2;
const PASS_THRESHOLD: f64 = 0.5;
const SHOT_BONUS: f64 = 0.1;
const SHOT_THRESHOLD: f64 = 0.8;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Outcome {
    HomeWin,
    AwayWin,
    Draw,
}

impl Outcome {
    pub fn from_score(home: u32, away: u32) -> Self {
        match home.cmp(&away) {
            std::cmp::Ordering::Greater => Outcome::HomeWin,
            std::cmp::Ordering::Less => Outcome::AwayWin,
            std::cmp::Ordering::Equal => Outcome::Draw,
        }
    }

    pub fn message(&self) -> &'static str {
        match self {
            Outcome::HomeWin => "Home Team Wins!",
            Outcome::AwayWin => "Away Team Wins!",
            Outcome::Draw => "It's a Draw!",
        }
    }
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PlayerLine {
    pub team: TeamSide,
    pub name: String,
    pub injured: bool,
    pub stats: PlayerStats,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MatchReport {
    pub home_team: String,
    pub away_team: String,
    pub home_tactic: Tactic,
    pub away_tactic: Tactic,
    pub home_goals: u32,
    pub away_goals: u32,
    pub outcome: Outcome,
    /// Minute-by-minute commentary; the last line is the outcome message
    pub commentary: Vec<String>,
    pub players: Vec<PlayerLine>,
}

pub struct OutcomeMatch<R: Rng> {
    home: Team,
    away: Team,
    home_tactic: Tactic,
    away_tactic: Tactic,
    home_goals: u32,
    away_goals: u32,
    possession: TeamSide,
    commentary: Vec<String>,
    rng: R,
}

impl<R: Rng> OutcomeMatch<R> {
    /// Possession at kickoff is a coin toss.
    pub fn new(
        home: Team,
        away: Team,
        home_tactic: Tactic,
        away_tactic: Tactic,
        mut rng: R,
    ) -> Self {
        let possession = if rng.gen_bool(0.5) {
            TeamSide::Home
        } else {
            TeamSide::Away
        };
        Self {
            home,
            away,
            home_tactic,
            away_tactic,
            home_goals: 0,
            away_goals: 0,
            possession,
            commentary: Vec::new(),
            rng,
        }
    }

    pub fn simulate(mut self) -> MatchReport {
        self.setup();
        for minute in 0..MATCH_MINUTES {
            self.play_minute(minute);
        }

        let outcome = Outcome::from_score(self.home_goals, self.away_goals);
        self.commentary.push(outcome.message().to_string());
        tracing::info!(
            "{} {}-{} {}: {}",
            self.home.name,
            self.home_goals,
            self.away_goals,
            self.away.name,
            outcome.message()
        );
        self.into_report(outcome)
    }

    fn setup(&mut self) {
        for player in &mut self.home.players {
            player.boost_powers(HOME_ADVANTAGE);
            self.home_tactic.apply(player);
        }
        for player in &mut self.away.players {
            self.away_tactic.apply(player);
        }
        tracing::debug!(
            "Setup done: {} plays {} {:?}, {} plays {} {:?}, {} kicks off",
            self.home.name,
            self.home_tactic,
            self.home_tactic.behaviors(),
            self.away.name,
            self.away_tactic,
            self.away_tactic.behaviors(),
            self.possession
        );
    }

    fn team(&self, side: TeamSide) -> &Team {
        match side {
            TeamSide::Home => &self.home,
            TeamSide::Away => &self.away,
        }
    }

    /// One minute: the team in possession passes, then shoots. A failed pass
    /// hands possession over but the shot is still taken.
    fn play_minute(&mut self, minute: u32) {
        let side = self.possession;
        let opponent = side.opponent();

        let active = self.team(side).active_players();
        let Some(&idx) = active.choose(&mut self.rng) else {
            self.commentary.push(format!(
                "Minute {}: The {} team has no fit players left, possession goes to the {} team.",
                minute, side, opponent
            ));
            self.possession = opponent;
            return;
        };

        let (name, midfield, finishing) = {
            let player = &self.team(side).players[idx];
            (
                player.name.clone(),
                player.power_in_midfield / REFERENCE_MIDFIELD,
                player.power_in_offense * player.power_in_accuracy / REFERENCE_FINISHING,
            )
        };

        if self.rng.gen::<f64>() + PASS_BONUS * midfield > PASS_THRESHOLD {
            self.commentary.push(format!(
                "Minute {}: {} from the {} team successfully passes the ball.",
                minute, name, side
            ));
        } else {
            self.commentary.push(format!(
                "Minute {}: {}'s pass is intercepted by the {} team!",
                minute, name, opponent
            ));
            self.possession = opponent;
        }

        let scored = self.rng.gen::<f64>() + SHOT_BONUS * finishing > SHOT_THRESHOLD;
        if scored {
            match side {
                TeamSide::Home => self.home_goals += 1,
                TeamSide::Away => self.away_goals += 1,
            }
            self.commentary.push(format!(
                "Minute {}: GOAL! {} from the {} team scores! Current score: {}-{}",
                minute, name, side, self.home_goals, self.away_goals
            ));
        }

        let team = match side {
            TeamSide::Home => &mut self.home,
            TeamSide::Away => &mut self.away,
        };
        let player = &mut team.players[idx];
        if scored {
            player.stats.goals += 1;
            player.stats.shots_on += 1;
        } else {
            player.stats.shots_off += 1;
        }
        if player.roll_injury(&mut self.rng) {
            tracing::debug!("{} injured in minute {}", name, minute);
            self.commentary.push(format!(
                "Minute {}: {} is injured and leaves the pitch.",
                minute, name
            ));
        }
    }

    fn into_report(self, outcome: Outcome) -> MatchReport {
        let players = [(TeamSide::Home, &self.home), (TeamSide::Away, &self.away)]
            .into_iter()
            .flat_map(|(side, team)| {
                team.players.iter().map(move |p| PlayerLine {
                    team: side,
                    name: p.name.clone(),
                    injured: p.injured,
                    stats: p.stats,
                })
            })
            .collect();

        MatchReport {
            home_team: self.home.name.clone(),
            away_team: self.away.name.clone(),
            home_tactic: self.home_tactic,
            away_tactic: self.away_tactic,
            home_goals: self.home_goals,
            away_goals: self.away_goals,
            outcome,
            commentary: self.commentary,
            players,
        }
    }
}
