use crate::error::SetupError;
use crate::squad::SquadPlayer;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Team-wide playing style chosen before kickoff.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Tactic {
    #[default]
    Normal,
    Defensive,
    Offensive,
    CounterAttacks,
    KickedBalls,
    ShortPass,
}

/// Multipliers a tactic applies to each player attribute. 1.0 leaves it untouched.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TacticEffects {
    pub speed: f64,
    pub defense: f64,
    pub midfield: f64,
    pub offense: f64,
    pub accuracy: f64,
}

impl Default for TacticEffects {
    fn default() -> Self {
        Self {
            speed: 1.0,
            defense: 1.0,
            midfield: 1.0,
            offense: 1.0,
            accuracy: 1.0,
        }
    }
}

impl Tactic {
    pub fn all() -> [Tactic; 6] {
        [
            Self::Normal,
            Self::Defensive,
            Self::Offensive,
            Self::CounterAttacks,
            Self::KickedBalls,
            Self::ShortPass,
        ]
    }

    pub fn name(&self) -> &'static str {
        match self {
            Self::Normal => "normal",
            Self::Defensive => "defensive",
            Self::Offensive => "offensive",
            Self::CounterAttacks => "counter_attacks",
            Self::KickedBalls => "kicked_balls",
            Self::ShortPass => "short_pass",
        }
    }

    pub fn effects(&self) -> TacticEffects {
        let neutral = TacticEffects::default();
        match self {
            Self::Normal => neutral,
            Self::Defensive => TacticEffects {
                defense: 1.1,
                offense: 0.9,
                ..neutral
            },
            Self::Offensive => TacticEffects {
                offense: 1.1,
                defense: 0.9,
                ..neutral
            },
            Self::CounterAttacks => TacticEffects {
                speed: 1.1,
                midfield: 1.05,
                defense: 0.9,
                ..neutral
            },
            Self::KickedBalls => TacticEffects {
                accuracy: 1.1,
                ..neutral
            },
            Self::ShortPass => TacticEffects {
                midfield: 1.1,
                ..neutral
            },
        }
    }

    /// Scale the player's attributes by this tactic's multipliers.
    pub fn apply(&self, player: &mut SquadPlayer) {
        let fx = self.effects();
        player.speed *= fx.speed;
        player.power_in_defense *= fx.defense;
        player.power_in_midfield *= fx.midfield;
        player.power_in_offense *= fx.offense;
        player.power_in_accuracy *= fx.accuracy;
    }

    /// Behaviour tags the tactic asks of its players.
    ///
    /// The tags are descriptive only. Every effect a tactic has on the minute
    /// rolls goes through [`Tactic::effects`], so `short_pass` plays exactly
    /// like its midfield multiplier.
    pub fn behaviors(&self) -> &'static [&'static str] {
        match self {
            Self::ShortPass => &["short_pass"],
            _ => &["standard_play"],
        }
    }
}

impl FromStr for Tactic {
    type Err = SetupError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Tactic::all()
            .into_iter()
            .find(|t| t.name() == s)
            .ok_or_else(|| SetupError::UnknownTactic(s.to_string()))
    }
}

impl fmt::Display for Tactic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
