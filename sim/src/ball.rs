use crate::agent::{Agent, AgentId};
use crate::config::PitchConfig;
use football_shared::vec2::{add, scale, Vec2};

/// Velocity components below this magnitude snap to zero so the ball comes to rest.
pub const VELOCITY_SNAP: f64 = 0.1;

/// The match ball. Possession is tracked here; agents only mirror it in their flag.
#[derive(Debug, Clone)]
pub struct Ball {
    pub pos: Vec2,
    pub vel: Vec2,
    pub radius: f64,
    pub possessed_by: Option<AgentId>,
    /// Last agent that put velocity on the ball (credited with goals)
    pub last_touched_by: Option<AgentId>,
    pub friction: f64,
    /// Frames left before possession may change again
    pub possession_cooldown: u32,
    cooldown_frames: u32,
}

impl Ball {
    pub fn new(pos: Vec2, pitch: &PitchConfig) -> Self {
        Self {
            pos,
            vel: Vec2::ZERO,
            radius: pitch.ball_radius,
            possessed_by: None,
            last_touched_by: None,
            friction: pitch.ball_friction,
            possession_cooldown: 0,
            cooldown_frames: pitch.possession_cooldown_frames,
        }
    }

    /// Advance one frame: tick the cooldown, move, then apply friction.
    pub fn update(&mut self) {
        self.possession_cooldown = self.possession_cooldown.saturating_sub(1);

        self.pos = add(self.pos, self.vel);
        self.vel = scale(self.vel, self.friction);

        if self.vel.x.abs() < VELOCITY_SNAP {
            self.vel.x = 0.0;
        }
        if self.vel.y.abs() < VELOCITY_SNAP {
            self.vel.y = 0.0;
        }
    }

    pub fn set_velocity(&mut self, dx: f64, dy: f64) {
        self.vel = Vec2::new(dx, dy);
    }

    /// Set velocity on behalf of an agent and remember who touched it last.
    pub fn kick(&mut self, by: AgentId, vel: Vec2) {
        self.set_velocity(vel.x, vel.y);
        self.last_touched_by = Some(by);
    }

    /// Hand the ball from one agent to another (either may be absent).
    ///
    /// Returns false without touching anything while the cooldown is running.
    /// The current possessor always loses its flag, even when it is not `from`,
    /// so at most one agent is ever flagged.
    pub fn change_possession(
        &mut self,
        roster: &mut [Agent],
        from: Option<AgentId>,
        to: Option<AgentId>,
    ) -> bool {
        if self.possession_cooldown > 0 {
            return false;
        }

        for id in [from, self.possessed_by].into_iter().flatten() {
            if let Some(agent) = roster.get_mut(id.index()) {
                agent.in_possession = false;
            }
        }
        if let Some(agent) = to.and_then(|id| roster.get_mut(id.index())) {
            agent.in_possession = true;
        }

        self.possessed_by = to;
        self.possession_cooldown = self.cooldown_frames;
        true
    }

    /// Reflect off the pitch boundary so the ball never leaves the field.
    pub fn keep_in_bounds(&mut self, width: f64, height: f64) {
        let r = self.radius;
        if self.pos.x < r || self.pos.x > width - r {
            self.vel.x = -self.vel.x;
            self.pos.x = self.pos.x.clamp(r, width - r);
        }
        if self.pos.y < r || self.pos.y > height - r {
            self.vel.y = -self.vel.y;
            self.pos.y = self.pos.y.clamp(r, height - r);
        }
    }

    /// Place the ball for a kickoff. Clears possession unconditionally.
    pub fn reset(&mut self, pos: Vec2, roster: &mut [Agent]) {
        for agent in roster.iter_mut() {
            agent.in_possession = false;
        }
        self.pos = pos;
        self.vel = Vec2::ZERO;
        self.possessed_by = None;
        self.last_touched_by = None;
        self.possession_cooldown = 0;
    }
}
