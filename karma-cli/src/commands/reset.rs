use anyhow::Context;
use karmalib::{reset_local_storage, Config};

use crate::AppError;

#[derive(Clone, Debug, clap::Args)]
#[clap(
    name = "reset",
    about = "Clear locally stored deeds and profile, reverting to samples"
)]
pub struct Reset {
    #[clap(long, action = clap::ArgAction::SetTrue, help = "Keep the profile")]
    keep_profile: bool,
}

impl Reset {
    pub fn run(&self, config: &Config) -> Result<(), AppError> {
        reset_local_storage(config, self.keep_profile).with_context(|| {
            format!("clearing {}", config.storage_path().display())
        })?;
        println!("Local data cleared");
        Ok(())
    }
}
