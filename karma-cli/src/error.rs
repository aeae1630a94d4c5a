use data_error::KarmaError;
use karmalib::Notice;
use std::io;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum AppError {
    #[error("Couldn't load config: {0}")]
    ConfigLoadError(String),

    #[error("Invalid option: {0}")]
    InvalidOption(String),

    #[error(transparent)]
    IoError(#[from] io::Error),

    #[error(transparent)]
    KarmaError(#[from] KarmaError),

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl AppError {
    /// The message shown to the user for this error.
    pub fn notice(&self) -> Notice {
        match self {
            AppError::KarmaError(err) => Notice::from(err),
            other => Notice::failure("Error", other.to_string()),
        }
    }
}
