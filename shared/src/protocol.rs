use serde::{Deserialize, Serialize};
use std::fmt;

use crate::config::PitchConfig;

/// Feed format version - increment when making breaking changes.
/// Renderers and recorded files carry it in the header message.
pub const FEED_VERSION: u32 = 1;

/// Which side of the match a player, goal or score belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TeamSide {
    Home,
    Away,
}

impl TeamSide {
    pub fn opponent(self) -> Self {
        match self {
            TeamSide::Home => TeamSide::Away,
            TeamSide::Away => TeamSide::Home,
        }
    }
}

impl fmt::Display for TeamSide {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TeamSide::Home => f.write_str("Home"),
            TeamSide::Away => f.write_str("Away"),
        }
    }
}

/// What an agent did on its last decision frame
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AgentState {
    #[default]
    Idle,
    Chasing,
    Possessing,
    Shooting,
    Passing,
    Advancing,
    Obstructed,
    Dribbling,
}

// === Engine -> Renderer / Recorder ===

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum FeedMsg {
    #[serde(rename = "header")]
    Header(HeaderMsg),
    #[serde(rename = "frame")]
    Frame(FrameSnapshot),
    #[serde(rename = "goal")]
    Goal(GoalMsg),
    #[serde(rename = "finished")]
    Finished(SummaryMsg),
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HeaderMsg {
    pub feed_version: u32,
    pub pitch: PitchConfig,
    pub tick_rate_hz: u32,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FrameSnapshot {
    pub frame: u64,
    pub agents: Vec<AgentWire>,
    pub ball: BallWire,
    pub goals: Vec<GoalWire>,
    pub score: ScoreWire,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AgentWire {
    pub id: u32,
    pub name: String,
    pub team: TeamSide,
    pub pos: [f64; 2],
    /// Degrees
    pub rotation: f64,
    pub color: u32,
    pub fatigue: f64,
    #[serde(default)]
    pub sprinting: bool,
    #[serde(default)]
    pub in_possession: bool,
    #[serde(default)]
    pub state: AgentState,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BallWire {
    pub pos: [f64; 2],
    pub vel: [f64; 2],
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub possessed_by: Option<u32>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GoalWire {
    pub side: TeamSide,
    /// x, y, width, height
    pub rect: [f64; 4],
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScoreWire {
    pub home: u32,
    pub away: u32,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GoalMsg {
    pub frame: u64,
    /// Team credited with the goal
    pub team: TeamSide,
    /// Last agent to touch the ball, if any
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub scorer: Option<u32>,
    pub score: ScoreWire,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SummaryMsg {
    pub frames: u64,
    pub score: ScoreWire,
}

// === Conversion helpers ===

/// Round to 2 decimal places (sub-pixel precision is plenty for rendering)
#[inline]
pub fn round2(v: f64) -> f64 {
    (v * 100.0).round() / 100.0
}
