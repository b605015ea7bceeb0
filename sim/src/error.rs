use crate::config::ConfigError;

/// Errors raised while setting up a match.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum SetupError {
    #[error("unknown tactic '{0}' (expected one of: normal, defensive, offensive, counter_attacks, kicked_balls, short_pass)")]
    UnknownTactic(String),
    #[error("team '{0}' has no players")]
    EmptySquad(String),
    #[error("invalid configuration: {0}")]
    Config(#[from] ConfigError),
}
