use std::fmt;
use std::time::{SystemTime, UNIX_EPOCH};

use serde::{Deserialize, Serialize};

use crate::Result;

const ID_PREFIX: &str = "deed";
const SUFFIX_LEN: usize = 6;

/// Identifier of a locally submitted deed.
///
/// Built from the submission time in milliseconds and a short random
/// suffix. Two ids generated in the same millisecond only differ by the
/// suffix, so uniqueness is probabilistic.
#[derive(
    Eq, PartialEq, Ord, PartialOrd, Hash, Clone, Debug, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct DeedId(String);

impl DeedId {
    pub fn generate(rng: &mut fastrand::Rng) -> Result<Self> {
        let millis = SystemTime::now()
            .duration_since(UNIX_EPOCH)?
            .as_millis();
        Ok(Self::from_parts(millis, rng))
    }

    fn from_parts(millis: u128, rng: &mut fastrand::Rng) -> Self {
        let suffix: String = std::iter::repeat_with(|| rng.alphanumeric())
            .take(SUFFIX_LEN)
            .collect::<String>()
            .to_lowercase();
        log::trace!("generated id suffix {} at {}", suffix, millis);
        DeedId(format!("{ID_PREFIX}-{millis}-{suffix}"))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for DeedId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for DeedId {
    fn from(value: &str) -> Self {
        DeedId(value.to_owned())
    }
}

impl From<String> for DeedId {
    fn from(value: String) -> Self {
        DeedId(value)
    }
}

impl From<DeedId> for String {
    fn from(value: DeedId) -> Self {
        value.0
    }
}
