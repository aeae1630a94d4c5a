use karmalib::{deed_store, Config, DeedDraft, ImageSource, Notice, Submitter};

use crate::AppError;

#[derive(Clone, Debug, clap::Args)]
#[clap(name = "submit", about = "Submit a good deed for validation")]
pub struct Submit {
    #[clap(long, help = "Title of your good deed")]
    title: String,
    #[clap(long, help = "What you did and how it helped")]
    description: String,
    #[clap(long, help = "Proof image: a file path or a URL")]
    image: Option<String>,
    #[clap(long, help = "Where it happened")]
    location: Option<String>,
    #[clap(long, help = "Wallet address to attribute the deed to")]
    owner: Option<String>,
}

impl Submit {
    pub async fn run(&self, config: &Config) -> Result<(), AppError> {
        let draft = DeedDraft {
            title: self.title.clone(),
            description: self.description.clone(),
            image: self.image.as_deref().map(ImageSource::parse),
            location: self.location.clone().unwrap_or_default(),
        };

        let mut submitter =
            Submitter::new(deed_store(config)?, config.clone())
                .owned_by(self.owner.clone());

        println!("Submitting...");
        let record = submitter.submit(&draft).await?;

        println!(
            "{}",
            Notice::success(
                "Success!",
                "Your good deed has been submitted and is pending validation."
            )
        );
        println!("id: {}", record.id);
        Ok(())
    }
}
