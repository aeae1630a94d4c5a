use karmalib::views::ValidationCard;
use karmalib::Config;

use crate::util::{print_heading, validation_queue};
use crate::AppError;

#[derive(Clone, Debug, clap::Args)]
#[clap(name = "validate", about = "List deeds waiting for validation")]
pub struct Validate {}

impl Validate {
    pub fn run(&self, config: &Config) -> Result<(), AppError> {
        let queue = validation_queue(config)?;
        print_heading(&format!("Pending ({})", queue.len()));
        for deed in &queue {
            println!("{}", ValidationCard { deed, voted: false });
        }
        Ok(())
    }
}
