/// Configuration error reported by `validate()`.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ConfigError {
    #[error("{0} must be finite and > 0")]
    NotPositive(&'static str),
    #[error("{0} must be finite and >= 0")]
    Negative(&'static str),
    #[error("ball_friction must be in [0, 1), got {0}")]
    Friction(f64),
    #[error("{0}")]
    Inconsistent(String),
}

fn positive(value: f64, field: &'static str) -> Result<(), ConfigError> {
    if !value.is_finite() || value <= 0.0 {
        return Err(ConfigError::NotPositive(field));
    }
    Ok(())
}

fn non_negative(value: f64, field: &'static str) -> Result<(), ConfigError> {
    if !value.is_finite() || value < 0.0 {
        return Err(ConfigError::Negative(field));
    }
    Ok(())
}

/// Pitch geometry and ball physics
#[derive(Debug, Clone, Copy, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PitchConfig {
    pub width: f64,
    pub height: f64,
    pub goal_width: f64,
    pub goal_height: f64,
    /// Body radius of every player
    pub player_radius: f64,
    pub ball_radius: f64,
    /// Per-frame velocity multiplier, must be < 1
    pub ball_friction: f64,
    /// Frames during which possession cannot change again
    pub possession_cooldown_frames: u32,
}

impl Default for PitchConfig {
    fn default() -> Self {
        Self {
            width: 800.0,
            height: 600.0,
            goal_width: 100.0,
            goal_height: 150.0,
            player_radius: 15.0,
            ball_radius: 10.0,
            ball_friction: 0.92,
            possession_cooldown_frames: 3,
        }
    }
}

impl PitchConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        positive(self.width, "width")?;
        positive(self.height, "height")?;
        positive(self.goal_width, "goal_width")?;
        positive(self.goal_height, "goal_height")?;
        positive(self.player_radius, "player_radius")?;
        positive(self.ball_radius, "ball_radius")?;
        if !self.ball_friction.is_finite() || !(0.0..1.0).contains(&self.ball_friction) {
            return Err(ConfigError::Friction(self.ball_friction));
        }
        if self.goal_height > self.height {
            return Err(ConfigError::Inconsistent(
                "goal_height must not exceed pitch height".to_string(),
            ));
        }
        if 2.0 * self.goal_width >= self.width {
            return Err(ConfigError::Inconsistent(
                "both goals must fit inside the pitch width".to_string(),
            ));
        }
        for (radius, field) in [
            (self.player_radius, "player_radius"),
            (self.ball_radius, "ball_radius"),
        ] {
            if 2.0 * radius > self.width || 2.0 * radius > self.height {
                return Err(ConfigError::Inconsistent(format!(
                    "{} is too large for a {}x{} pitch",
                    field, self.width, self.height
                )));
            }
        }
        Ok(())
    }
}

/// Per-player movement and shooting attributes
#[derive(Debug, Clone, Copy, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AgentConfig {
    /// Units per frame when walking
    pub speed: f64,
    /// Units per frame when sprinting
    pub sprint_speed: f64,
    /// Fatigue drained by every sprinting move
    pub fatigue_per_sprint: f64,
    /// Max distance to the goal centre from which a shot is attempted
    pub kick_range: f64,
    /// Shot dispersion half-angle (degrees)
    pub kick_dispersion: f64,
}

impl Default for AgentConfig {
    fn default() -> Self {
        Self {
            speed: 5.0,
            sprint_speed: 7.0,
            fatigue_per_sprint: 0.5,
            kick_range: 150.0,
            kick_dispersion: 15.0,
        }
    }
}

impl AgentConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        positive(self.speed, "speed")?;
        positive(self.sprint_speed, "sprint_speed")?;
        non_negative(self.fatigue_per_sprint, "fatigue_per_sprint")?;
        positive(self.kick_range, "kick_range")?;
        non_negative(self.kick_dispersion, "kick_dispersion")?;
        if self.kick_dispersion > 180.0 {
            return Err(ConfigError::Inconsistent(
                "kick_dispersion must be <= 180 degrees".to_string(),
            ));
        }
        Ok(())
    }
}
