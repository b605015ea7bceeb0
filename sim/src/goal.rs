use crate::config::PitchConfig;
use crate::protocol::{GoalWire, TeamSide};
use football_shared::vec2::Vec2;

/// Static scoring target. Never mutated after creation.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Goal {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl Goal {
    pub fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    pub fn center(&self) -> Vec2 {
        Vec2::new(self.x + self.width / 2.0, self.y + self.height / 2.0)
    }

    /// Whether a point lies inside the goal rectangle (edges inclusive).
    pub fn contains(&self, p: Vec2) -> bool {
        p.x >= self.x && p.x <= self.x + self.width && p.y >= self.y && p.y <= self.y + self.height
    }
}

/// The two goals of a match. Agents refer to them by side, never by ownership.
#[derive(Debug, Clone, Copy)]
pub struct Goals {
    pub home: Goal,
    pub away: Goal,
}

impl Goals {
    /// Home goal on the left edge, away goal on the right, both vertically centred.
    pub fn for_pitch(pitch: &PitchConfig) -> Self {
        let y = pitch.height / 2.0 - pitch.goal_height / 2.0;
        Self {
            home: Goal::new(0.0, y, pitch.goal_width, pitch.goal_height),
            away: Goal::new(
                pitch.width - pitch.goal_width,
                y,
                pitch.goal_width,
                pitch.goal_height,
            ),
        }
    }

    pub fn get(&self, side: TeamSide) -> &Goal {
        match side {
            TeamSide::Home => &self.home,
            TeamSide::Away => &self.away,
        }
    }

    /// Side of the goal the point is inside, if any.
    pub fn containing(&self, p: Vec2) -> Option<TeamSide> {
        [TeamSide::Home, TeamSide::Away]
            .into_iter()
            .find(|&side| self.get(side).contains(p))
    }

    pub fn to_wire(&self) -> Vec<GoalWire> {
        [TeamSide::Home, TeamSide::Away]
            .into_iter()
            .map(|side| {
                let g = self.get(side);
                GoalWire {
                    side,
                    rect: [g.x, g.y, g.width, g.height],
                }
            })
            .collect()
    }
}
