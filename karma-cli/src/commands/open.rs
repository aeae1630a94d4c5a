use karmalib::routes::Route;
use karmalib::Config;

use super::{home::Home, show::show_deed, validate::Validate};
use crate::AppError;

#[derive(Clone, Debug, clap::Args)]
#[clap(name = "open", about = "Open a page by its path, e.g. /nft/1")]
pub struct Open {
    path: String,
}

impl Open {
    pub fn run(&self, config: &Config) -> Result<(), AppError> {
        match Route::parse(&self.path) {
            Route::Home => Home {}.run(),
            Route::Profile => super::profile::show_default(config),
            Route::Submit => {
                println!("Use `karma-cli submit --title .. --description .. --image ..`");
                Ok(())
            }
            Route::Validate => Validate {}.run(config),
            Route::DeedDetail(id) => show_deed(config, &id),
            Route::NotFound(path) => {
                println!("404: no page at {}", path);
                Ok(())
            }
        }
    }
}
