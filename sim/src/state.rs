use crate::agent::{Agent, AgentId};
use crate::ball::Ball;
use crate::collision::check_and_resolve_collisions;
use crate::config::{MatchConfig, PitchConfig};
use crate::decision::decide_and_act;
use crate::goal::Goals;
use crate::protocol::{
    AgentWire, BallWire, FrameSnapshot, GoalMsg, ScoreWire, SummaryMsg, TeamSide,
};
use football_shared::vec2::Vec2;
use rand_chacha::ChaCha8Rng;

const HOME_COLOR: u32 = 0x0000ff;
const AWAY_COLOR: u32 = 0xff0000;

/// What happened during one frame
#[derive(Debug, Default)]
pub struct FrameEvents {
    /// Colliding pairs flagged by the collision pass
    pub collisions: Vec<(AgentId, AgentId)>,
    /// Possessor before and after the decision phase, when it changed
    pub possession_change: Option<(Option<AgentId>, Option<AgentId>)>,
    pub goal: Option<GoalMsg>,
}

/// Central match state owned by the game loop task.
pub struct MatchState {
    pub agents: Vec<Agent>,
    pub ball: Ball,
    pub goals: Goals,
    pub pitch: PitchConfig,
    pub score: ScoreWire,
    pub frame: u64,
    pub rng: ChaCha8Rng,
}

impl MatchState {
    /// Standard one-on-one lineup: a home agent a third of the way across facing
    /// right, an away agent two thirds across facing left, ball on the centre spot.
    pub fn new(config: &MatchConfig) -> Self {
        let pitch = config.pitch;
        let mid_y = pitch.height / 2.0;
        let agents = vec![
            Agent::new(
                AgentId(0),
                "Alena",
                TeamSide::Home,
                HOME_COLOR,
                Vec2::new(pitch.width / 3.0, mid_y),
                0.0,
                &config.agent,
                &pitch,
            ),
            Agent::new(
                AgentId(1),
                "Alek",
                TeamSide::Away,
                AWAY_COLOR,
                Vec2::new(2.0 * pitch.width / 3.0, mid_y),
                180.0,
                &config.agent,
                &pitch,
            ),
        ];
        Self::with_agents(pitch, agents, config.rng_seed)
    }

    /// Build a match from an explicit roster. Agent ids are reassigned to match
    /// their roster index.
    pub fn with_agents(pitch: PitchConfig, mut agents: Vec<Agent>, rng_seed: u64) -> Self {
        use rand::SeedableRng;
        for (idx, agent) in agents.iter_mut().enumerate() {
            agent.id = AgentId(idx);
        }
        Self {
            agents,
            ball: Ball::new(Self::centre_spot(&pitch), &pitch),
            goals: Goals::for_pitch(&pitch),
            pitch,
            score: ScoreWire::default(),
            frame: 0,
            rng: ChaCha8Rng::seed_from_u64(rng_seed),
        }
    }

    fn centre_spot(pitch: &PitchConfig) -> Vec2 {
        Vec2::new(pitch.width / 2.0, pitch.height / 2.0)
    }

    /// Simulate one frame: collisions, ball physics, then every agent's decision
    /// in roster order, then the goal check.
    pub fn step(&mut self) -> FrameEvents {
        let mut events = FrameEvents {
            collisions: check_and_resolve_collisions(&mut self.agents, &self.ball, &self.goals),
            ..Default::default()
        };

        self.ball.update();
        self.ball.keep_in_bounds(self.pitch.width, self.pitch.height);

        let possessor_before = self.ball.possessed_by;
        for idx in 0..self.agents.len() {
            decide_and_act(
                &mut self.agents,
                AgentId(idx),
                &mut self.ball,
                &self.goals,
                &mut self.rng,
            );
            self.agents[idx].clamp_to_pitch(self.pitch.width, self.pitch.height);
        }
        if self.ball.possessed_by != possessor_before {
            events.possession_change = Some((possessor_before, self.ball.possessed_by));
        }

        events.goal = self.check_goal();
        self.frame += 1;
        events
    }

    /// Credit a goal when the ball is inside a goal rectangle, then reset for kickoff.
    fn check_goal(&mut self) -> Option<GoalMsg> {
        let goal_side = self.goals.containing(self.ball.pos)?;
        let team = goal_side.opponent();
        match team {
            TeamSide::Home => self.score.home += 1,
            TeamSide::Away => self.score.away += 1,
        }
        let scorer = self.ball.last_touched_by;
        tracing::info!(
            "GOAL for {} at frame {} (scorer {:?}), score {}-{}",
            team,
            self.frame,
            scorer.map(|id| self.agents[id.index()].name.as_str()),
            self.score.home,
            self.score.away
        );

        self.kickoff();
        Some(GoalMsg {
            frame: self.frame,
            team,
            scorer: scorer.map(|id| id.index() as u32),
            score: self.score,
        })
    }

    fn kickoff(&mut self) {
        for agent in &mut self.agents {
            agent.reset_to_kickoff();
        }
        self.ball.reset(Self::centre_spot(&self.pitch), &mut self.agents);
    }

    /// Number of agents currently flagged as holding the ball
    pub fn possessor_count(&self) -> usize {
        self.agents.iter().filter(|a| a.in_possession).count()
    }

    /// Snapshot for the rendering collaborator
    pub fn snapshot(&self) -> FrameSnapshot {
        FrameSnapshot {
            frame: self.frame,
            agents: self.agents.iter().map(AgentWire::from).collect(),
            ball: BallWire::from(&self.ball),
            goals: self.goals.to_wire(),
            score: self.score,
        }
    }

    pub fn summary(&self) -> SummaryMsg {
        SummaryMsg {
            frames: self.frame,
            score: self.score,
        }
    }
}
