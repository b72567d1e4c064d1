use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum ScoringError {
    #[error("Unknown window code: {0}")]
    UnknownWindow(String),

    #[error("Invalid config: {0}")]
    InvalidConfig(String),
}
