use std::fs;
use std::ops::RangeInclusive;
use std::path::{Path, PathBuf};
use std::time::Duration;

use fs_storage::{CONFIG_FILE, KARMA_FOLDER, LOCAL_STORAGE_FILE};
use serde::{Deserialize, Serialize};

use crate::{KarmaError, Result};

pub const DEFAULT_SUBMIT_DELAY_MS: u64 = 1500;
pub const DEFAULT_VOTE_DELAY_MS: u64 = 1000;
pub const DEFAULT_KARMA_POINTS_MIN: u32 = 10;
pub const DEFAULT_KARMA_POINTS_MAX: u32 = 30;
pub const DEFAULT_PLACEHOLDER_IMAGE: &str = "https://images.unsplash.com/photo-1488521787991-ed7bbaae773c?auto=format&fit=crop&q=80";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub data_dir: PathBuf,
    pub submit_delay_ms: u64,
    pub vote_delay_ms: u64,
    pub karma_points_min: u32,
    pub karma_points_max: u32,
    pub placeholder_image: String,
    pub require_image: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            data_dir: default_data_dir(),
            submit_delay_ms: DEFAULT_SUBMIT_DELAY_MS,
            vote_delay_ms: DEFAULT_VOTE_DELAY_MS,
            karma_points_min: DEFAULT_KARMA_POINTS_MIN,
            karma_points_max: DEFAULT_KARMA_POINTS_MAX,
            placeholder_image: DEFAULT_PLACEHOLDER_IMAGE.to_owned(),
            require_image: true,
        }
    }
}

fn default_data_dir() -> PathBuf {
    dirs::home_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(KARMA_FOLDER)
}

impl Config {
    /// Read the configuration stored in `data_dir`, falling back to the
    /// defaults when there is no config file. The returned config always
    /// points at `data_dir`.
    pub fn load(data_dir: &Path) -> Result<Self> {
        let path = data_dir.join(CONFIG_FILE);
        let mut config = if path.exists() {
            Self::from_file(&path)?
        } else {
            log::debug!("no config at {}, using defaults", path.display());
            Self::default()
        };
        config.data_dir = data_dir.to_path_buf();
        Ok(config)
    }

    pub fn from_file(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)?;
        let config: Config =
            serde_json::from_str(&content).map_err(|err| {
                KarmaError::Storage(
                    path.display().to_string(),
                    err.to_string(),
                )
            })?;
        config.validate()?;
        log::info!("loaded config from {}", path.display());
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        if self.karma_points_min > self.karma_points_max {
            return Err(KarmaError::Other(anyhow::anyhow!(
                "karma_points_min ({}) is greater than karma_points_max ({})",
                self.karma_points_min,
                self.karma_points_max
            )));
        }
        Ok(())
    }

    pub fn storage_path(&self) -> PathBuf {
        self.data_dir.join(LOCAL_STORAGE_FILE)
    }

    pub fn submit_delay(&self) -> Duration {
        Duration::from_millis(self.submit_delay_ms)
    }

    pub fn vote_delay(&self) -> Duration {
        Duration::from_millis(self.vote_delay_ms)
    }

    pub fn karma_points(&self) -> RangeInclusive<u32> {
        self.karma_points_min..=self.karma_points_max
    }

    /// Zero delays, for scripted runs.
    pub fn without_delays(mut self) -> Self {
        self.submit_delay_ms = 0;
        self.vote_delay_ms = 0;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempdir::TempDir;

    #[test]
    fn missing_file_gives_defaults() {
        let dir = TempDir::new("config").unwrap();
        let config = Config::load(dir.path()).unwrap();
        assert_eq!(config.data_dir, dir.path());
        assert_eq!(config.submit_delay(), Duration::from_millis(1500));
        assert_eq!(config.karma_points(), 10..=30);
        assert_eq!(config.storage_path(), dir.path().join(LOCAL_STORAGE_FILE));
    }

    #[test]
    fn partial_file_keeps_other_defaults() {
        let dir = TempDir::new("config").unwrap();
        fs::write(
            dir.path().join(CONFIG_FILE),
            r#"{"vote_delay_ms": 5, "require_image": false}"#,
        )
        .unwrap();

        let config = Config::load(dir.path()).unwrap();
        assert_eq!(config.vote_delay_ms, 5);
        assert!(!config.require_image);
        assert_eq!(config.submit_delay_ms, DEFAULT_SUBMIT_DELAY_MS);
    }

    #[test]
    fn inverted_points_range_is_rejected() {
        let dir = TempDir::new("config").unwrap();
        fs::write(
            dir.path().join(CONFIG_FILE),
            r#"{"karma_points_min": 50, "karma_points_max": 5}"#,
        )
        .unwrap();
        assert!(Config::load(dir.path()).is_err());
    }
}
