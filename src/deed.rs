use std::fmt;
use std::str::FromStr;

use base64::{engine::general_purpose::STANDARD, Engine as _};
use serde::{Deserialize, Serialize};
use url::Url;

use crate::id::DeedId;
use crate::{KarmaError, Result};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DeedStatus {
    Pending,
    Validated,
    Rejected,
}

impl DeedStatus {
    /// Whether moving from `self` to `next` follows the expected
    /// `pending -> validated | rejected` lifecycle.
    ///
    /// Nothing in the voting flow refuses an unexpected transition,
    /// this only lets callers report one.
    pub fn can_transition_to(self, next: DeedStatus) -> bool {
        matches!(
            (self, next),
            (DeedStatus::Pending, DeedStatus::Validated)
                | (DeedStatus::Pending, DeedStatus::Rejected)
        )
    }

    pub fn from_vote(is_valid: bool) -> Self {
        if is_valid {
            DeedStatus::Validated
        } else {
            DeedStatus::Rejected
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            DeedStatus::Pending => "pending",
            DeedStatus::Validated => "validated",
            DeedStatus::Rejected => "rejected",
        }
    }
}

impl fmt::Display for DeedStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

const DATA_URL_PREFIX: &str = "data:";
const BASE64_MARKER: &str = ";base64,";

/// Reference to a deed's proof image.
///
/// Either a remote location or the image itself, inlined as a base64
/// payload. On the wire both are a single string, the inline form being
/// a `data:` URL. Remote locations are kept exactly as written: an
/// absolute URL or a path on the serving site such as `/placeholder.svg`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum ImageRef {
    Remote(String),
    Inline { mime: String, payload: String },
}

impl ImageRef {
    pub fn inline(mime: &str, bytes: &[u8]) -> Self {
        ImageRef::Inline {
            mime: mime.to_owned(),
            payload: STANDARD.encode(bytes),
        }
    }

    pub fn remote(location: &str) -> Result<Self> {
        if !location.starts_with('/') {
            Url::parse(location)?;
        }
        Ok(ImageRef::Remote(location.to_owned()))
    }

    pub fn is_inline(&self) -> bool {
        matches!(self, ImageRef::Inline { .. })
    }

    /// Decoded bytes of an inline image, `None` for remote images.
    pub fn decode(&self) -> Result<Option<Vec<u8>>> {
        match self {
            ImageRef::Remote(_) => Ok(None),
            ImageRef::Inline { payload, .. } => {
                Ok(Some(STANDARD.decode(payload)?))
            }
        }
    }
}

impl FromStr for ImageRef {
    type Err = KarmaError;

    fn from_str(s: &str) -> Result<Self> {
        if let Some(rest) = s.strip_prefix(DATA_URL_PREFIX) {
            let (mime, payload) =
                rest.split_once(BASE64_MARKER).ok_or(KarmaError::Parse)?;
            STANDARD.decode(payload)?;
            return Ok(ImageRef::Inline {
                mime: mime.to_owned(),
                payload: payload.to_owned(),
            });
        }
        ImageRef::remote(s)
    }
}

impl TryFrom<String> for ImageRef {
    type Error = KarmaError;

    fn try_from(value: String) -> Result<Self> {
        value.parse()
    }
}

impl From<ImageRef> for String {
    fn from(value: ImageRef) -> Self {
        value.to_string()
    }
}

impl fmt::Display for ImageRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ImageRef::Remote(url) => write!(f, "{}", url),
            ImageRef::Inline { mime, payload } => {
                write!(f, "{DATA_URL_PREFIX}{mime}{BASE64_MARKER}{payload}")
            }
        }
    }
}

/// A claimed good deed, as shown on cards and stored locally.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DeedRecord {
    pub id: DeedId,
    pub title: String,
    pub description: String,
    #[serde(rename = "imageUrl")]
    pub image: ImageRef,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub karma_points: Option<u32>,
    /// Free-text label such as "2 days ago", not a timestamp.
    pub created_at: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
    pub status: DeedStatus,
    #[serde(default)]
    pub votes: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub owner: Option<String>,
}

impl DeedRecord {
    pub fn is_validated(&self) -> bool {
        self.status == DeedStatus::Validated
    }

    /// Points this record contributes to a score.
    pub fn earned_points(&self) -> u32 {
        if self.is_validated() {
            self.karma_points.unwrap_or(0)
        } else {
            0
        }
    }
}
