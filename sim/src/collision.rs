use crate::agent::{Agent, AgentId};
use crate::ball::Ball;
use crate::decision::is_path_clear;
use crate::goal::Goals;
use football_shared::vec2::{add, distance, scale, sub, Vec2, EPSILON};

/// Distance to the ball within which a collision counts as a contest for it
pub const POSSESSION_PROXIMITY: f64 = 30.0;

pub fn overlapping(a: &Agent, b: &Agent) -> bool {
    distance(a.pos, b.pos) < a.radius + b.radius
}

/// Push two overlapping agents apart along the line joining their centres, each
/// by half the penetration, so they end up exactly touching.
///
/// Coincident centres have no line between them; they are separated along +x.
pub fn resolve_collision(a: &mut Agent, b: &mut Agent) {
    let min_separation = a.radius + b.radius;
    let delta = sub(b.pos, a.pos);
    let dist = distance(a.pos, b.pos);

    let overlap = min_separation - dist;
    if overlap <= 0.0 {
        return;
    }

    let normal = if dist < EPSILON {
        Vec2::new(1.0, 0.0)
    } else {
        scale(delta, 1.0 / dist)
    };

    let half = overlap / 2.0;
    a.pos = sub(a.pos, scale(normal, half));
    b.pos = add(b.pos, scale(normal, half));
}

/// Mutable references to two distinct roster entries.
fn pair_mut(roster: &mut [Agent], i: usize, j: usize) -> (&mut Agent, &mut Agent) {
    debug_assert!(i < j);
    let (head, tail) = roster.split_at_mut(j);
    (&mut head[i], &mut tail[0])
}

/// Whether agent `id` is fighting for the ball: close to it with its path to goal blocked.
fn contests_ball(roster: &[Agent], id: AgentId, ball: &Ball, goals: &Goals) -> bool {
    let agent = &roster[id.index()];
    distance(agent.pos, ball.pos) < POSSESSION_PROXIMITY
        && !is_path_clear(roster, id, goals.get(agent.attacks).center())
}

/// One collision pass over every unordered pair, in roster order.
///
/// Overlapping pairs are always separated. When the first agent of the pair is
/// contesting the ball, both are flagged as colliding with each other and the
/// first agent's collision counter advances (once per frame). Agents left
/// unflagged by the pass have their collision state cleared.
///
/// Returns the flagged pairs.
pub fn check_and_resolve_collisions(
    roster: &mut [Agent],
    ball: &Ball,
    goals: &Goals,
) -> Vec<(AgentId, AgentId)> {
    let n = roster.len();
    let mut flagged = vec![false; n];
    let mut counted = vec![false; n];
    let mut contacts = Vec::new();

    for i in 0..n {
        for j in (i + 1)..n {
            if !overlapping(&roster[i], &roster[j]) {
                continue;
            }

            if contests_ball(roster, AgentId(i), ball, goals) {
                roster[i].colliding_with = Some(AgentId(j));
                roster[j].colliding_with = Some(AgentId(i));
                flagged[i] = true;
                flagged[j] = true;
                if !counted[i] {
                    roster[i].handle_collision();
                    counted[i] = true;
                }
                contacts.push((AgentId(i), AgentId(j)));
                tracing::debug!("{} collides with {}", roster[i].name, roster[j].name);
            }

            let (a, b) = pair_mut(roster, i, j);
            resolve_collision(a, b);
        }
    }

    for (idx, agent) in roster.iter_mut().enumerate() {
        if !flagged[idx] {
            agent.clear_collision();
        }
    }

    contacts
}
