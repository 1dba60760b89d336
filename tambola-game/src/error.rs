use thiserror::Error;

pub type Result<T> = std::result::Result<T, GameError>;

#[derive(Error, Debug)]
pub enum GameError {
    #[error("Tambola core error: {0}")]
    Core(#[from] tambola_core::TambolaError),

    #[error("All 90 numbers have been drawn")]
    PoolExhausted,

    #[error("Number {0} has already been drawn")]
    AlreadyDrawn(u8),

    #[error("Number {0} is outside 1-90")]
    NumberOutOfRange(u8),

    #[error("Game is complete, reset to play again")]
    GameComplete,

    #[error("Duplicate participant id: {0}")]
    DuplicateParticipant(u32),

    #[error("Participant not found: {0}")]
    ParticipantNotFound(u32),

    #[error("Invalid configuration: {0}")]
    Config(String),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl GameError {
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }
}
