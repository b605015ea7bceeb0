//! Autonomous player agents on the pitch.
//!
//! An agent owns its own motion state (position, heading, fatigue, sprint) and
//! mirrors ball possession in a flag. Anything that needs the rest of the roster
//! (obstruction checks, teammate search, play-around) lives in `decision`, which
//! receives the roster explicitly.

use crate::ball::Ball;
use crate::config::{AgentConfig, PitchConfig};
use crate::goal::Goal;
use crate::protocol::{AgentState, TeamSide};
use football_shared::vec2::{
    add, direction, distance, heading_degrees, length, rotate_degrees, scale, sub, Vec2,
};
use rand::Rng;

pub const MAX_FATIGUE: f64 = 100.0;

/// Consecutive collision frames before a ball carrier tries to sprint clear
const BREAKAWAY_FRAMES: u32 = 5;
/// Fatigue an agent must have left to sprint clear of a collision
const BREAKAWAY_MIN_FATIGUE: f64 = 20.0;

/// Ball speed of a shot (units/frame)
pub const SHOT_SPEED: f64 = 7.0;

/// Index of an agent in the match roster. Only a handle, never owns the agent.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct AgentId(pub usize);

impl AgentId {
    pub fn index(self) -> usize {
        self.0
    }
}

#[derive(Debug, Clone)]
pub struct Agent {
    pub id: AgentId,
    pub name: String,
    pub team: TeamSide,
    /// Render-only tag
    pub color: u32,
    pub pos: Vec2,
    pub prev_pos: Vec2,
    /// Heading in degrees
    pub rotation: f64,
    pub radius: f64,
    /// Distance at which the ball counts as within reach (body + ball radius)
    pub reach: f64,
    pub speed: f64,
    pub sprint_speed: f64,
    pub fatigue: f64,
    fatigue_per_sprint: f64,
    pub sprinting: bool,
    pub in_possession: bool,
    pub colliding_with: Option<AgentId>,
    /// Consecutive frames spent in a flagged collision
    pub collision_duration: u32,
    pub kick_range: f64,
    /// Shot dispersion half-angle (degrees)
    pub kick_dispersion: f64,
    /// Goal this agent defends
    pub defends: TeamSide,
    /// Goal this agent attacks
    pub attacks: TeamSide,
    pub state: AgentState,
    kickoff_pos: Vec2,
    kickoff_rotation: f64,
}

impl Agent {
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        id: AgentId,
        name: impl Into<String>,
        team: TeamSide,
        color: u32,
        pos: Vec2,
        rotation: f64,
        config: &AgentConfig,
        pitch: &PitchConfig,
    ) -> Self {
        Self {
            id,
            name: name.into(),
            team,
            color,
            pos,
            prev_pos: pos,
            rotation,
            radius: pitch.player_radius,
            reach: pitch.player_radius + pitch.ball_radius,
            speed: config.speed,
            sprint_speed: config.sprint_speed,
            fatigue: MAX_FATIGUE,
            fatigue_per_sprint: config.fatigue_per_sprint,
            sprinting: false,
            in_possession: false,
            colliding_with: None,
            collision_duration: 0,
            kick_range: config.kick_range,
            kick_dispersion: config.kick_dispersion,
            defends: team,
            attacks: team.opponent(),
            state: AgentState::Idle,
            kickoff_pos: pos,
            kickoff_rotation: rotation,
        }
    }

    /// Step toward a target at walking or sprinting speed.
    ///
    /// The travelled distance is clamped so a target closer than one unit does
    /// not blow up the direction. Sprinting drains fatigue and switches itself
    /// off when fatigue runs out.
    pub fn move_towards(&mut self, target: Vec2) {
        self.prev_pos = self.pos;
        self.rotation = heading_degrees(self.pos, target);

        let delta = sub(target, self.pos);
        let dist = length(delta).max(1.0);
        let step = scale(delta, 1.0 / dist);

        if self.sprinting {
            self.pos = add(self.pos, scale(step, self.sprint_speed));
            self.fatigue = (self.fatigue - self.fatigue_per_sprint).max(0.0);
            if self.fatigue <= 0.0 {
                self.sprinting = false;
            }
        } else {
            self.pos = add(self.pos, scale(step, self.speed));
        }
    }

    /// Request sprinting. Refused when the agent has no fatigue left.
    pub fn set_sprinting(&mut self, sprinting: bool) {
        self.sprinting = sprinting && self.fatigue > 0.0;
    }

    /// Movement since the previous frame
    pub fn velocity(&self) -> Vec2 {
        sub(self.pos, self.prev_pos)
    }

    pub fn ball_in_reach(&self, ball: &Ball) -> bool {
        distance(self.pos, ball.pos) < self.reach
    }

    /// Nudge the ball along with the agent's own movement, if it is within reach.
    pub fn push_ball(&self, ball: &mut Ball) {
        if self.ball_in_reach(ball) {
            ball.kick(self.id, self.velocity());
        }
    }

    /// Unit vector toward the centre of a goal (zero if standing on it)
    pub fn goal_direction(&self, goal: &Goal) -> Vec2 {
        direction(self.pos, goal.center())
    }

    pub fn can_shoot(&self, goal: &Goal) -> bool {
        self.in_possession && distance(self.pos, goal.center()) <= self.kick_range
    }

    /// Ball velocity for a shot at the goal centre, scattered by up to
    /// `kick_dispersion` degrees either side.
    pub fn shot_velocity(&self, goal: &Goal, rng: &mut impl Rng) -> Vec2 {
        let aim = sub(goal.center(), self.pos);
        let dispersion = if self.kick_dispersion > 0.0 {
            rng.gen_range(-self.kick_dispersion..=self.kick_dispersion)
        } else {
            0.0
        };
        let scattered = direction(Vec2::ZERO, rotate_degrees(aim, dispersion));
        scale(scattered, SHOT_SPEED)
    }

    /// Count another frame of contested collision; a ball carrier with enough
    /// energy left starts sprinting once the contact has lasted long enough.
    pub fn handle_collision(&mut self) {
        self.collision_duration += 1;

        if self.breaking_tackle() {
            self.sprinting = true;
        }
    }

    pub fn breaking_tackle(&self) -> bool {
        self.collision_duration > BREAKAWAY_FRAMES
            && self.fatigue > BREAKAWAY_MIN_FATIGUE
            && self.in_possession
    }

    /// Forget any collision from the previous frame.
    pub fn clear_collision(&mut self) {
        self.colliding_with = None;
        self.collision_duration = 0;
    }

    /// Keep the body fully on the pitch.
    pub fn clamp_to_pitch(&mut self, width: f64, height: f64) {
        self.pos.x = self.pos.x.clamp(self.radius, width - self.radius);
        self.pos.y = self.pos.y.clamp(self.radius, height - self.radius);
    }

    /// Back to the starting spot after a goal. Fatigue carries over.
    pub fn reset_to_kickoff(&mut self) {
        self.pos = self.kickoff_pos;
        self.prev_pos = self.kickoff_pos;
        self.rotation = self.kickoff_rotation;
        self.sprinting = false;
        self.in_possession = false;
        self.clear_collision();
        self.state = AgentState::Idle;
    }
}
