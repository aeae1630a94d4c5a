use std::time::SystemTimeError;

use thiserror::Error;

pub type Result<T> = std::result::Result<T, KarmaError>;

#[derive(Error, Debug)]
pub enum KarmaError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Parsing error")]
    Parse,
    #[error("Storage error: {0} {1}")]
    Storage(String, String),
    #[error("Wallet provider not found")]
    ProviderMissing,
    #[error("Wallet connection failed: {0}")]
    ConnectionFailed(String),
    #[error("Deed submission failed: {0}")]
    SubmissionFailed(String),
    #[error("Vote could not be recorded: {0}")]
    VoteFailed(String),
    #[error("Title, description and proof image are required")]
    IncompleteDraft,
    #[error("Deed not found: {0}")]
    DeedNotFound(String),
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl From<serde_json::Error> for KarmaError {
    fn from(_: serde_json::Error) -> Self {
        Self::Parse
    }
}

impl From<base64::DecodeError> for KarmaError {
    fn from(_: base64::DecodeError) -> Self {
        Self::Parse
    }
}

impl From<url::ParseError> for KarmaError {
    fn from(_: url::ParseError) -> Self {
        Self::Parse
    }
}

impl From<SystemTimeError> for KarmaError {
    fn from(value: SystemTimeError) -> Self {
        Self::Other(anyhow::anyhow!(value.to_string()))
    }
}
