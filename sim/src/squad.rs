//! Squads for the statistical outcome simulator.

use crate::error::SetupError;
use rand::Rng;
use serde::{Deserialize, Serialize};

/// Chance a player gets injured on any action they take
pub const INJURY_CHANCE: f64 = 0.01;

/// Player record as delivered by a data source.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlayerProfile {
    pub name: String,
    pub experience: f64,
    pub power_in_goal: f64,
    pub power_in_defense: f64,
    pub power_in_midfield: f64,
    pub power_in_attack: f64,
    pub power_in_accuracy: f64,
    pub actual_energy: f64,
    pub position_id: u32,
    pub id: u32,
    /// Matches left to serve on a ban (0 = available)
    #[serde(default)]
    pub banned: u32,
}

impl Default for PlayerProfile {
    fn default() -> Self {
        Self {
            name: "Jane Doe".to_string(),
            experience: 80.0,
            power_in_goal: 85.0,
            power_in_defense: 80.0,
            power_in_midfield: 85.0,
            power_in_attack: 90.0,
            power_in_accuracy: 88.0,
            actual_energy: 95.0,
            position_id: 1,
            id: 101,
            banned: 0,
        }
    }
}

impl PlayerProfile {
    /// Reference profile under a different name
    pub fn named(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Default::default()
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlayerStats {
    pub yellow_card: u32,
    pub red_card: u32,
    pub goals: u32,
    pub assists: u32,
    pub shots_on: u32,
    pub shots_off: u32,
    pub fouls: u32,
    pub plus: i32,
}

/// A player taking part in a simulated match. Powers are modified in place by
/// home advantage and tactics during setup.
#[derive(Debug, Clone)]
pub struct SquadPlayer {
    pub id: u32,
    pub name: String,
    pub position_id: u32,
    pub experience: f64,
    pub power_in_goal: f64,
    pub power_in_defense: f64,
    pub power_in_midfield: f64,
    pub power_in_offense: f64,
    pub power_in_accuracy: f64,
    pub speed: f64,
    pub energy: f64,
    pub injured: bool,
    pub banned: u32,
    pub injury_chance: f64,
    pub stats: PlayerStats,
}

impl SquadPlayer {
    pub fn from_profile(profile: &PlayerProfile) -> Self {
        Self {
            id: profile.id,
            name: profile.name.clone(),
            position_id: profile.position_id,
            experience: profile.experience,
            power_in_goal: profile.power_in_goal,
            power_in_defense: profile.power_in_defense,
            power_in_midfield: profile.power_in_midfield,
            power_in_offense: profile.power_in_attack,
            power_in_accuracy: profile.power_in_accuracy,
            speed: 1.0,
            energy: profile.actual_energy,
            injured: false,
            banned: profile.banned,
            injury_chance: INJURY_CHANCE,
            stats: PlayerStats::default(),
        }
    }

    pub fn is_available(&self) -> bool {
        !self.injured && self.banned == 0
    }

    /// Roll for injury. Returns true if the player got injured by this roll.
    pub fn roll_injury(&mut self, rng: &mut impl Rng) -> bool {
        if !self.injured && rng.gen::<f64>() < self.injury_chance {
            self.injured = true;
            return true;
        }
        false
    }

    /// Scale all five powers by the same factor.
    pub fn boost_powers(&mut self, factor: f64) {
        self.power_in_goal *= factor;
        self.power_in_defense *= factor;
        self.power_in_midfield *= factor;
        self.power_in_offense *= factor;
        self.power_in_accuracy *= factor;
    }
}

#[derive(Debug, Clone)]
pub struct Team {
    pub name: String,
    pub players: Vec<SquadPlayer>,
}

impl Team {
    pub fn new(name: impl Into<String>, players: Vec<SquadPlayer>) -> Result<Self, SetupError> {
        let name = name.into();
        if players.is_empty() {
            return Err(SetupError::EmptySquad(name));
        }
        Ok(Self { name, players })
    }

    pub fn from_profiles(
        name: impl Into<String>,
        profiles: &[PlayerProfile],
    ) -> Result<Self, SetupError> {
        Self::new(name, profiles.iter().map(SquadPlayer::from_profile).collect())
    }

    /// Indices of players who are neither injured nor banned
    pub fn active_players(&self) -> Vec<usize> {
        self.players
            .iter()
            .enumerate()
            .filter(|(_, p)| p.is_available())
            .map(|(idx, _)| idx)
            .collect()
    }
}
