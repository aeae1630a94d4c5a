use karmalib::{Config, ScoreCard};

use crate::util::{load_profile, profile_deeds};
use crate::AppError;

#[derive(Clone, Debug, clap::Args)]
#[clap(name = "score", about = "Show the karma score card")]
pub struct Score {}

impl Score {
    pub fn run(&self, config: &Config) -> Result<(), AppError> {
        let profile = load_profile(config)?;
        let card = ScoreCard::new(&profile.display_name, &profile_deeds(config)?);
        println!("{}", card);
        Ok(())
    }
}
