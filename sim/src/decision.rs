//! Per-frame decision rules for agents.
//!
//! Each frame an agent evaluates an ordered rule list and acts on the first rule
//! that matches:
//!
//! 1. ball out of reach: chase it
//! 2. ball in reach but someone else (or nobody) owns it: take possession
//! 3. clear shot within range: shoot
//! 4. teammate ahead: pass
//! 5. clear path: advance on goal, ball at feet
//! 6. blocked and in contact with a defender: play around them
//! 7. blocked: sidestep the obstruction
//! 8. otherwise dribble (reserved, currently does nothing)
//!
//! Rules 3-8 only apply once the agent owns the ball. Agents are processed one at
//! a time, so later agents observe earlier agents' moves from the same frame.

use crate::agent::{Agent, AgentId};
use crate::ball::Ball;
use crate::goal::Goals;
use crate::protocol::AgentState;
use football_shared::vec2::{
    add, direction, distance, dot, normalize, perpendicular_ccw, perpendicular_cw,
    point_on_segment, scale, sub, Vec2,
};
use rand::Rng;

/// Perpendicular distance within which another agent blocks a line
pub const OBSTRUCTION_TOLERANCE: f64 = 1.0;
/// Max distance of a teammate considered for a pass
pub const PASS_SEARCH_DISTANCE: f64 = 200.0;
/// Ball speed of a pass (units/frame)
pub const PASS_SPEED: f64 = 7.0;

/// How far to each side the play-around feelers reach for open space
const PLAY_AROUND_FEELER: f64 = 25.0;
/// Ball speed when pushed past a blocker
const PLAY_AROUND_PUSH: f64 = 15.0;
/// Multiple of base speed the agent surges past a blocker
const PLAY_AROUND_STRIDE: f64 = 4.0;
/// Vertical clearance taken when sidestepping an obstruction
const SIDESTEP_OFFSET: f64 = 30.0;

/// The action an agent settled on for this frame
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Intent {
    Chase,
    TakePossession { previous: Option<AgentId> },
    Shoot,
    Pass { teammate: AgentId },
    Advance,
    PlayAround { blocker: AgentId },
    Sidestep { obstruction: AgentId },
    Dribble,
}

impl Intent {
    pub fn state(self) -> AgentState {
        match self {
            Intent::Chase => AgentState::Chasing,
            Intent::TakePossession { .. } => AgentState::Possessing,
            Intent::Shoot => AgentState::Shooting,
            Intent::Pass { .. } => AgentState::Passing,
            Intent::Advance => AgentState::Advancing,
            Intent::PlayAround { .. } | Intent::Sidestep { .. } => AgentState::Obstructed,
            Intent::Dribble => AgentState::Dribbling,
        }
    }
}

/// Other agents lying on the line from `id` to `target`, in roster order.
pub fn obstructions(roster: &[Agent], id: AgentId, target: Vec2) -> Vec<AgentId> {
    let origin = roster[id.index()].pos;
    roster
        .iter()
        .filter(|other| other.id != id)
        .filter(|other| point_on_segment(origin, target, other.pos, OBSTRUCTION_TOLERANCE))
        .map(|other| other.id)
        .collect()
}

pub fn is_path_clear(roster: &[Agent], id: AgentId, target: Vec2) -> bool {
    obstructions(roster, id, target).is_empty()
}

/// Nearest teammate ahead of the agent (positive dot product with `dir`) within
/// `max_distance`.
pub fn find_teammate_in_direction(
    roster: &[Agent],
    id: AgentId,
    dir: Vec2,
    max_distance: f64,
) -> Option<AgentId> {
    let me = &roster[id.index()];
    let mut nearest = None;
    let mut min_distance = max_distance;

    for other in roster {
        if other.id == id || other.team != me.team {
            continue;
        }
        let offset = sub(other.pos, me.pos);
        let d = distance(other.pos, me.pos);
        if dot(offset, dir) > 0.0 && d < min_distance {
            nearest = Some(other.id);
            min_distance = d;
        }
    }

    nearest
}

/// Sprint while the ball is loose, or to break out of a long collision.
fn update_sprint(agent: &mut Agent, ball: &Ball) {
    let wants_sprint = ball.possessed_by.is_none() || agent.breaking_tackle();
    agent.set_sprinting(wants_sprint);
}

/// Evaluate the rule list for one agent without mutating anything.
pub fn choose_intent(roster: &[Agent], id: AgentId, ball: &Ball, goals: &Goals) -> Intent {
    let agent = &roster[id.index()];

    if !agent.ball_in_reach(ball) {
        return Intent::Chase;
    }
    if ball.possessed_by != Some(id) {
        return Intent::TakePossession {
            previous: ball.possessed_by,
        };
    }

    let goal = goals.get(agent.attacks);
    let blockers = obstructions(roster, id, goal.center());
    let path_clear = blockers.is_empty();

    if path_clear && agent.can_shoot(goal) {
        return Intent::Shoot;
    }
    if let Some(teammate) =
        find_teammate_in_direction(roster, id, agent.goal_direction(goal), PASS_SEARCH_DISTANCE)
    {
        return Intent::Pass { teammate };
    }
    if path_clear {
        return Intent::Advance;
    }
    if let Some(blocker) = agent.colliding_with {
        return Intent::PlayAround { blocker };
    }
    if let Some(&obstruction) = blockers.first() {
        return Intent::Sidestep { obstruction };
    }
    Intent::Dribble
}

/// Run one decision frame for agent `id` and apply the result.
pub fn decide_and_act(
    roster: &mut [Agent],
    id: AgentId,
    ball: &mut Ball,
    goals: &Goals,
    rng: &mut impl Rng,
) -> Intent {
    let idx = id.index();
    update_sprint(&mut roster[idx], ball);

    let intent = choose_intent(roster, id, ball, goals);
    match intent {
        Intent::Chase => roster[idx].move_towards(ball.pos),
        Intent::TakePossession { previous } => {
            if let Some(holder) = previous {
                play_around(roster, id, holder, ball, goals);
            }
            if ball.change_possession(roster, previous, Some(id)) {
                tracing::debug!("{} takes possession", roster[idx].name);
            }
        }
        Intent::Shoot => {
            let agent = &roster[idx];
            agent.push_ball(ball);
            let shot = agent.shot_velocity(goals.get(agent.attacks), rng);
            ball.kick(id, shot);
            tracing::debug!("{} shoots ({:.2}, {:.2})", agent.name, shot.x, shot.y);
            ball.change_possession(roster, Some(id), None);
        }
        Intent::Pass { teammate } => {
            roster[idx].push_ball(ball);
            pass_to(roster, id, teammate, ball);
            ball.change_possession(roster, Some(id), None);
        }
        Intent::Advance => {
            let target = goals.get(roster[idx].attacks).center();
            roster[idx].move_towards(target);
            roster[idx].push_ball(ball);
        }
        Intent::PlayAround { blocker } => play_around(roster, id, blocker, ball, goals),
        Intent::Sidestep { obstruction } => {
            let target = sidestep_target(&roster[idx], &roster[obstruction.index()]);
            roster[idx].move_towards(target);
            roster[idx].push_ball(ball);
        }
        Intent::Dribble => {}
    }

    roster[idx].state = intent.state();
    intent
}

fn pass_to(roster: &[Agent], id: AgentId, teammate: AgentId, ball: &mut Ball) {
    let from = roster[id.index()].pos;
    let to = roster[teammate.index()].pos;
    ball.kick(id, scale(direction(from, to), PASS_SPEED));
    tracing::debug!(
        "{} passes to {}",
        roster[id.index()].name,
        roster[teammate.index()].name
    );
}

/// Point straight above or below the obstruction, whichever side the agent is on.
fn sidestep_target(agent: &Agent, obstruction: &Agent) -> Vec2 {
    let target_y = if agent.pos.y < obstruction.pos.y {
        obstruction.pos.y - SIDESTEP_OFFSET
    } else {
        obstruction.pos.y + SIDESTEP_OFFSET
    };
    Vec2::new(agent.pos.x, target_y)
}

/// Lateral bypass around `blocker`.
///
/// The two perpendiculars of the agent's recent movement are sampled; the side
/// whose feeler lands farther from the blocker wins (ties go counterclockwise).
/// With a teammate ahead the ball is passed to them, otherwise it is pushed
/// along the bypass and the agent surges after it.
pub fn play_around(
    roster: &mut [Agent],
    id: AgentId,
    blocker: AgentId,
    ball: &mut Ball,
    goals: &Goals,
) {
    let idx = id.index();
    let blocker_pos = roster[blocker.index()].pos;
    let (pos, prev_pos, speed) = {
        let agent = &roster[idx];
        (agent.pos, agent.prev_pos, agent.speed)
    };

    let attack_dir = normalize(sub(prev_pos, pos));
    let cw = perpendicular_cw(attack_dir);
    let ccw = perpendicular_ccw(attack_dir);
    let feeler_cw = add(pos, scale(cw, PLAY_AROUND_FEELER));
    let feeler_ccw = add(pos, scale(ccw, PLAY_AROUND_FEELER));
    let bypass = if distance(feeler_cw, blocker_pos) > distance(feeler_ccw, blocker_pos) {
        cw
    } else {
        ccw
    };

    let goal_dir = roster[idx].goal_direction(goals.get(roster[idx].attacks));
    match find_teammate_in_direction(roster, id, goal_dir, PASS_SEARCH_DISTANCE) {
        Some(teammate) => pass_to(roster, id, teammate, ball),
        None => {
            ball.kick(id, scale(bypass, PLAY_AROUND_PUSH));
            let agent = &mut roster[idx];
            agent.pos = add(agent.pos, scale(bypass, speed * PLAY_AROUND_STRIDE));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::agent::tests::test_agent;
    use crate::config::PitchConfig;
    use crate::protocol::TeamSide;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    fn test_rng() -> ChaCha8Rng {
        ChaCha8Rng::seed_from_u64(7)
    }

    fn setup(agents: Vec<Agent>, ball_pos: Vec2) -> (Vec<Agent>, Ball, Goals) {
        let pitch = PitchConfig::default();
        (agents, Ball::new(ball_pos, &pitch), Goals::for_pitch(&pitch))
    }

    fn holders(roster: &[Agent]) -> usize {
        roster.iter().filter(|a| a.in_possession).count()
    }

    #[test]
    fn obstruction_on_the_line_is_reported() {
        let roster = vec![
            test_agent(0, TeamSide::Home, Vec2::new(100.0, 300.0)),
            test_agent(1, TeamSide::Away, Vec2::new(400.0, 300.0)),
            test_agent(2, TeamSide::Away, Vec2::new(400.0, 350.0)),
        ];
        let target = Vec2::new(750.0, 300.0);
        assert_eq!(obstructions(&roster, AgentId(0), target), vec![AgentId(1)]);
        assert!(!is_path_clear(&roster, AgentId(0), target));
        assert!(is_path_clear(&roster, AgentId(2), Vec2::new(750.0, 350.0)));
    }

    #[test]
    fn agent_behind_still_counts_as_obstruction() {
        // The check uses the infinite line, so someone behind the agent blocks too
        let roster = vec![
            test_agent(0, TeamSide::Home, Vec2::new(400.0, 300.0)),
            test_agent(1, TeamSide::Away, Vec2::new(150.0, 300.0)),
        ];
        assert!(!is_path_clear(&roster, AgentId(0), Vec2::new(750.0, 300.0)));
    }

    #[test]
    fn teammate_search_ignores_opponents_and_players_behind() {
        let roster = vec![
            test_agent(0, TeamSide::Home, Vec2::new(300.0, 300.0)),
            test_agent(1, TeamSide::Away, Vec2::new(350.0, 300.0)),
            test_agent(2, TeamSide::Home, Vec2::new(250.0, 300.0)),
            test_agent(3, TeamSide::Home, Vec2::new(450.0, 320.0)),
            test_agent(4, TeamSide::Home, Vec2::new(420.0, 280.0)),
        ];
        let found = find_teammate_in_direction(
            &roster,
            AgentId(0),
            Vec2::new(1.0, 0.0),
            PASS_SEARCH_DISTANCE,
        );
        assert_eq!(found, Some(AgentId(4)));
        assert_eq!(
            find_teammate_in_direction(&roster, AgentId(0), Vec2::new(1.0, 0.0), 100.0),
            None
        );
    }

    #[test]
    fn far_ball_is_chased_at_sprint_when_loose() {
        let (mut roster, mut ball, goals) = setup(
            vec![test_agent(0, TeamSide::Home, Vec2::new(100.0, 300.0))],
            Vec2::new(400.0, 300.0),
        );
        let intent = decide_and_act(&mut roster, AgentId(0), &mut ball, &goals, &mut test_rng());
        assert_eq!(intent, Intent::Chase);
        assert_eq!(roster[0].state, AgentState::Chasing);
        assert!(roster[0].sprinting);
        assert_eq!(roster[0].pos, Vec2::new(107.0, 300.0));
        assert_eq!(roster[0].fatigue, 99.5);
    }

    #[test]
    fn chasing_a_held_ball_walks() {
        let (mut roster, mut ball, goals) = setup(
            vec![
                test_agent(0, TeamSide::Home, Vec2::new(100.0, 300.0)),
                test_agent(1, TeamSide::Away, Vec2::new(400.0, 310.0)),
            ],
            Vec2::new(400.0, 300.0),
        );
        ball.change_possession(&mut roster, None, Some(AgentId(1)));
        decide_and_act(&mut roster, AgentId(0), &mut ball, &goals, &mut test_rng());
        assert!(!roster[0].sprinting);
        assert_eq!(roster[0].pos, Vec2::new(105.0, 300.0));
    }

    #[test]
    fn ball_in_reach_is_taken_in_one_frame() {
        let (mut roster, mut ball, goals) = setup(
            vec![test_agent(0, TeamSide::Home, Vec2::new(390.0, 300.0))],
            Vec2::new(400.0, 300.0),
        );
        let intent = decide_and_act(&mut roster, AgentId(0), &mut ball, &goals, &mut test_rng());
        assert_eq!(intent, Intent::TakePossession { previous: None });
        assert_eq!(ball.possessed_by, Some(AgentId(0)));
        assert!(roster[0].in_possession);
        assert_eq!(ball.possession_cooldown, 3);
    }

    #[test]
    fn tackle_is_blocked_by_cooldown() {
        let (mut roster, mut ball, goals) = setup(
            vec![
                test_agent(0, TeamSide::Home, Vec2::new(390.0, 300.0)),
                test_agent(1, TeamSide::Away, Vec2::new(410.0, 320.0)),
            ],
            Vec2::new(400.0, 300.0),
        );
        let mut rng = test_rng();
        decide_and_act(&mut roster, AgentId(0), &mut ball, &goals, &mut rng);
        let intent = decide_and_act(&mut roster, AgentId(1), &mut ball, &goals, &mut rng);
        assert_eq!(
            intent,
            Intent::TakePossession {
                previous: Some(AgentId(0))
            }
        );
        assert_eq!(ball.possessed_by, Some(AgentId(0)));
        assert_eq!(holders(&roster), 1);
    }

    #[test]
    fn clear_shot_in_range_is_taken() {
        let (mut roster, mut ball, goals) = setup(
            vec![test_agent(0, TeamSide::Home, Vec2::new(640.0, 300.0))],
            Vec2::new(650.0, 300.0),
        );
        ball.change_possession(&mut roster, None, Some(AgentId(0)));
        ball.possession_cooldown = 0;
        let intent = decide_and_act(&mut roster, AgentId(0), &mut ball, &goals, &mut test_rng());
        assert_eq!(intent, Intent::Shoot);
        assert!(ball.vel.x > 0.0, "shot should head toward the away goal");
        assert!((football_shared::vec2::length(ball.vel) - 7.0).abs() < 1e-9);
        assert!(ball.possessed_by.is_none());
        assert!(!roster[0].in_possession);
        assert_eq!(roster[0].state, AgentState::Shooting);
    }

    #[test]
    fn shot_during_cooldown_keeps_possession_flag() {
        let (mut roster, mut ball, goals) = setup(
            vec![test_agent(0, TeamSide::Home, Vec2::new(640.0, 300.0))],
            Vec2::new(650.0, 300.0),
        );
        ball.change_possession(&mut roster, None, Some(AgentId(0)));
        decide_and_act(&mut roster, AgentId(0), &mut ball, &goals, &mut test_rng());
        assert_eq!(ball.possessed_by, Some(AgentId(0)));
        assert_eq!(holders(&roster), 1);
    }

    #[test]
    fn out_of_range_with_clear_path_advances() {
        let (mut roster, mut ball, goals) = setup(
            vec![test_agent(0, TeamSide::Home, Vec2::new(300.0, 300.0))],
            Vec2::new(310.0, 300.0),
        );
        ball.change_possession(&mut roster, None, Some(AgentId(0)));
        let intent = decide_and_act(&mut roster, AgentId(0), &mut ball, &goals, &mut test_rng());
        assert_eq!(intent, Intent::Advance);
        assert_eq!(roster[0].pos, Vec2::new(305.0, 300.0));
        assert_eq!(ball.vel, Vec2::new(5.0, 0.0));
    }

    #[test]
    fn forward_teammate_receives_pass() {
        let (mut roster, mut ball, goals) = setup(
            vec![
                test_agent(0, TeamSide::Home, Vec2::new(300.0, 300.0)),
                test_agent(1, TeamSide::Home, Vec2::new(400.0, 400.0)),
            ],
            Vec2::new(310.0, 300.0),
        );
        ball.change_possession(&mut roster, None, Some(AgentId(0)));
        ball.possession_cooldown = 0;
        let intent = decide_and_act(&mut roster, AgentId(0), &mut ball, &goals, &mut test_rng());
        assert_eq!(
            intent,
            Intent::Pass {
                teammate: AgentId(1)
            }
        );
        let expected = scale(direction(Vec2::new(300.0, 300.0), Vec2::new(400.0, 400.0)), 7.0);
        assert!((ball.vel.x - expected.x).abs() < 1e-9);
        assert!((ball.vel.y - expected.y).abs() < 1e-9);
        assert!(ball.possessed_by.is_none());
    }

    #[test]
    fn blocked_path_sidesteps_vertically() {
        let (mut roster, mut ball, goals) = setup(
            vec![
                test_agent(0, TeamSide::Home, Vec2::new(300.0, 300.0)),
                test_agent(1, TeamSide::Away, Vec2::new(500.0, 300.0)),
            ],
            Vec2::new(310.0, 300.0),
        );
        ball.change_possession(&mut roster, None, Some(AgentId(0)));
        let intent = decide_and_act(&mut roster, AgentId(0), &mut ball, &goals, &mut test_rng());
        assert_eq!(
            intent,
            Intent::Sidestep {
                obstruction: AgentId(1)
            }
        );
        // Level with the obstruction, so it steps below it (y grows downward)
        assert_eq!(roster[0].pos, Vec2::new(300.0, 305.0));
        assert_eq!(roster[0].state, AgentState::Obstructed);
    }

    #[test]
    fn blocked_path_in_contact_plays_around() {
        let (mut roster, mut ball, goals) = setup(
            vec![
                test_agent(0, TeamSide::Home, Vec2::new(300.0, 300.0)),
                test_agent(1, TeamSide::Away, Vec2::new(325.0, 300.0)),
            ],
            Vec2::new(310.0, 300.0),
        );
        // Arrived from the left, so the attack direction points back along -x
        roster[0].prev_pos = Vec2::new(295.0, 300.0);
        roster[0].colliding_with = Some(AgentId(1));
        ball.change_possession(&mut roster, None, Some(AgentId(0)));
        let intent = decide_and_act(&mut roster, AgentId(0), &mut ball, &goals, &mut test_rng());
        assert_eq!(
            intent,
            Intent::PlayAround {
                blocker: AgentId(1)
            }
        );
        // Both feelers are equidistant from a blocker dead ahead: counterclockwise wins.
        // attack_dir = (-1, 0), ccw = (0, 1)
        assert!((ball.vel.x).abs() < 1e-12);
        assert!((ball.vel.y - 15.0).abs() < 1e-12);
        assert!((roster[0].pos.y - 320.0).abs() < 1e-12);
        assert!((roster[0].pos.x - 300.0).abs() < 1e-12);
    }

    fn tackled_carrier(fatigue: f64) -> (Vec<Agent>, Ball, Goals) {
        let (mut roster, mut ball, goals) = setup(
            vec![
                test_agent(0, TeamSide::Home, Vec2::new(300.0, 300.0)),
                test_agent(1, TeamSide::Away, Vec2::new(325.0, 300.0)),
            ],
            Vec2::new(310.0, 300.0),
        );
        ball.change_possession(&mut roster, None, Some(AgentId(0)));
        let carrier = &mut roster[0];
        carrier.prev_pos = Vec2::new(295.0, 300.0);
        carrier.colliding_with = Some(AgentId(1));
        carrier.collision_duration = 6;
        carrier.fatigue = fatigue;
        carrier.sprinting = true;
        (roster, ball, goals)
    }

    #[test]
    fn carrier_keeps_sprinting_to_break_a_long_tackle() {
        let (mut roster, mut ball, goals) = tackled_carrier(50.0);
        let intent = decide_and_act(&mut roster, AgentId(0), &mut ball, &goals, &mut test_rng());
        assert_eq!(
            intent,
            Intent::PlayAround {
                blocker: AgentId(1)
            }
        );
        assert!(roster[0].sprinting);
    }

    #[test]
    fn tired_carrier_stops_sprinting_in_a_tackle() {
        let (mut roster, mut ball, goals) = tackled_carrier(20.0);
        decide_and_act(&mut roster, AgentId(0), &mut ball, &goals, &mut test_rng());
        assert!(!roster[0].sprinting);
        assert_eq!(roster[0].fatigue, 20.0);
    }

    #[test]
    fn play_around_picks_the_open_side() {
        let pitch = PitchConfig::default();
        let goals = Goals::for_pitch(&pitch);
        let mut roster = vec![
            test_agent(0, TeamSide::Home, Vec2::new(300.0, 300.0)),
            // Blocker slightly below the line of travel
            test_agent(1, TeamSide::Away, Vec2::new(320.0, 310.0)),
        ];
        roster[0].prev_pos = Vec2::new(290.0, 300.0);
        let mut ball = Ball::new(Vec2::new(310.0, 300.0), &pitch);
        play_around(&mut roster, AgentId(0), AgentId(1), &mut ball, &goals);
        // attack_dir = (-1, 0): cw = (0, -1) reaches upward, away from the blocker
        assert!(ball.vel.y < 0.0);
        assert!(roster[0].pos.y < 300.0);
    }

    #[test]
    fn stationary_play_around_is_harmless() {
        let pitch = PitchConfig::default();
        let goals = Goals::for_pitch(&pitch);
        let mut roster = vec![
            test_agent(0, TeamSide::Home, Vec2::new(300.0, 300.0)),
            test_agent(1, TeamSide::Away, Vec2::new(300.0, 300.0)),
        ];
        let mut ball = Ball::new(Vec2::new(300.0, 300.0), &pitch);
        play_around(&mut roster, AgentId(0), AgentId(1), &mut ball, &goals);
        assert!(roster[0].pos.x.is_finite() && roster[0].pos.y.is_finite());
        assert!(ball.vel.x.is_finite() && ball.vel.y.is_finite());
    }

    #[test]
    fn possession_stays_exclusive_over_many_frames() {
        let (mut roster, mut ball, goals) = setup(
            vec![
                test_agent(0, TeamSide::Home, Vec2::new(380.0, 300.0)),
                test_agent(1, TeamSide::Away, Vec2::new(420.0, 300.0)),
                test_agent(2, TeamSide::Home, Vec2::new(400.0, 330.0)),
            ],
            Vec2::new(400.0, 300.0),
        );
        let mut rng = test_rng();
        for _ in 0..300 {
            ball.update();
            for idx in 0..roster.len() {
                decide_and_act(&mut roster, AgentId(idx), &mut ball, &goals, &mut rng);
                assert!(holders(&roster) <= 1);
            }
            match ball.possessed_by {
                Some(id) => assert!(roster[id.index()].in_possession),
                None => assert_eq!(holders(&roster), 0),
            }
        }
    }

    #[test]
    fn intent_maps_to_state() {
        assert_eq!(Intent::Chase.state(), AgentState::Chasing);
        assert_eq!(
            Intent::Sidestep {
                obstruction: AgentId(1)
            }
            .state(),
            AgentState::Obstructed
        );
        assert_eq!(Intent::Dribble.state(), AgentState::Dribbling);
    }
}
