use karmalib::samples;
use karmalib::views::DeedCard;

use crate::util::print_heading;
use crate::AppError;

#[derive(Clone, Debug, clap::Args)]
#[clap(name = "home", about = "Show featured good deeds")]
pub struct Home {}

impl Home {
    pub fn run(&self) -> Result<(), AppError> {
        print_heading("Featured Good Deeds");
        for deed in samples::featured_deeds() {
            println!("{}", DeedCard(&deed));
        }
        Ok(())
    }
}
