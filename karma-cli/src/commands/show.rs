use karmalib::store::merged_deeds;
use karmalib::views::{resolve_detail, DeedCard, DetailView};
use karmalib::{deed_store, samples, Config, DeedId, KarmaError};

use crate::AppError;

#[derive(Clone, Debug, clap::Args)]
#[clap(name = "show", about = "Show a single deed")]
pub struct Show {
    id: String,
}

impl Show {
    pub fn run(&self, config: &Config) -> Result<(), AppError> {
        show_deed(config, &DeedId::from(self.id.as_str()))
    }
}

pub fn show_deed(config: &Config, id: &DeedId) -> Result<(), AppError> {
    let stored = merged_deeds(&mut deed_store(config)?, Vec::new());
    match resolve_detail(id, &stored, samples::detail_catalog()) {
        DetailView::Found(deed) => {
            println!("{}", DeedCard(&deed));
            println!();
            println!("{}", deed.description);
            if let Some(owner) = &deed.owner {
                println!("Owner: {}", owner);
            }
            if deed.is_validated() {
                println!("Soulbound NFT");
            }
            let image = deed.image.to_string();
            if deed.image.is_inline() {
                println!("Image: inline ({} characters)", image.len());
            } else {
                println!("Image: {}", image);
            }
            Ok(())
        }
        DetailView::NotFound => {
            Err(KarmaError::DeedNotFound(id.to_string()).into())
        }
    }
}
