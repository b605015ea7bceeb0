pub use football_shared::protocol::*;

use crate::agent::Agent;
use crate::ball::Ball;

impl From<&Agent> for AgentWire {
    fn from(agent: &Agent) -> Self {
        Self {
            id: agent.id.index() as u32,
            name: agent.name.clone(),
            team: agent.team,
            pos: [round2(agent.pos.x), round2(agent.pos.y)],
            rotation: round2(agent.rotation),
            color: agent.color,
            fatigue: agent.fatigue,
            sprinting: agent.sprinting,
            in_possession: agent.in_possession,
            state: agent.state,
        }
    }
}

impl From<&Ball> for BallWire {
    fn from(ball: &Ball) -> Self {
        Self {
            pos: [round2(ball.pos.x), round2(ball.pos.y)],
            vel: [round2(ball.vel.x), round2(ball.vel.y)],
            possessed_by: ball.possessed_by.map(|id| id.index() as u32),
        }
    }
}
