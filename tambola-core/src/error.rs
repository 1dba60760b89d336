use thiserror::Error;

pub type Result<T> = std::result::Result<T, TambolaError>;

#[derive(Error, Debug)]
pub enum TambolaError {
    #[error("Invalid ticket structure: {0}")]
    InvalidTicketStructure(String),

    #[error("Invalid configuration: {0}")]
    Config(String),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl TambolaError {
    pub fn invalid_ticket(msg: impl Into<String>) -> Self {
        Self::InvalidTicketStructure(msg.into())
    }

    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }
}
