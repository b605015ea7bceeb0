pub use football_shared::config::{AgentConfig, ConfigError, PitchConfig};

/// Match loop configuration
#[derive(Debug, Clone)]
pub struct MatchConfig {
    /// Frames per second
    pub tick_rate_hz: u32,
    /// Broadcast a frame snapshot every N frames
    pub snapshot_every_n: u32,
    pub rng_seed: u64,
    /// Stop after this many frames; None runs until a quit command arrives
    pub max_frames: Option<u64>,
    pub pitch: PitchConfig,
    pub agent: AgentConfig,
}

impl Default for MatchConfig {
    fn default() -> Self {
        Self {
            tick_rate_hz: 10,
            snapshot_every_n: 1,
            rng_seed: 42,
            max_frames: None,
            pitch: PitchConfig::default(),
            agent: AgentConfig::default(),
        }
    }
}

impl MatchConfig {
    /// Validate the configuration, returning the first problem found.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.tick_rate_hz == 0 {
            return Err(ConfigError::NotPositive("tick_rate_hz"));
        }
        if self.snapshot_every_n == 0 {
            return Err(ConfigError::NotPositive("snapshot_every_n"));
        }
        if self.max_frames == Some(0) {
            return Err(ConfigError::NotPositive("max_frames"));
        }
        self.pitch.validate()?;
        self.agent.validate()?;
        Ok(())
    }
}
