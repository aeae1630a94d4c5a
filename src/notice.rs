use std::fmt;

use crate::KarmaError;

pub const SUBMISSION_ERROR: &str =
    "There was an error submitting your deed. Please try again.";
pub const VOTE_ERROR: &str =
    "Your vote could not be recorded. Please try again.";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Variant {
    Default,
    Destructive,
}

/// A dismissible message shown to the user after an action.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
    pub title: String,
    pub description: String,
    pub variant: Variant,
}

impl Notice {
    pub fn success(title: &str, description: impl Into<String>) -> Self {
        Self {
            title: title.to_owned(),
            description: description.into(),
            variant: Variant::Default,
        }
    }

    pub fn failure(title: &str, description: impl Into<String>) -> Self {
        Self {
            title: title.to_owned(),
            description: description.into(),
            variant: Variant::Destructive,
        }
    }

    pub fn is_failure(&self) -> bool {
        self.variant == Variant::Destructive
    }
}

impl fmt::Display for Notice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.title, self.description)
    }
}

impl From<&KarmaError> for Notice {
    fn from(err: &KarmaError) -> Self {
        match err {
            KarmaError::ProviderMissing => Notice::failure(
                "MetaMask not found",
                "Please install MetaMask browser extension to connect",
            ),
            KarmaError::ConnectionFailed(_) => Notice::failure(
                "Connection failed",
                "Failed to connect wallet. Please try again.",
            ),
            KarmaError::SubmissionFailed(_) => {
                Notice::failure("Error", SUBMISSION_ERROR)
            }
            KarmaError::IncompleteDraft => Notice::failure(
                "Missing details",
                "Add a title, a description and a proof image to submit.",
            ),
            KarmaError::VoteFailed(_) => Notice::failure("Error", VOTE_ERROR),
            KarmaError::DeedNotFound(_) => Notice::failure(
                "NFT Not Found",
                "The NFT you're looking for doesn't exist or has been removed.",
            ),
            other => Notice::failure("Error", other.to_string()),
        }
    }
}
