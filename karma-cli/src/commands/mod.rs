use clap::Subcommand;
use karmalib::Config;

use crate::AppError;

mod home;
mod open;
mod profile;
mod reset;
mod score;
mod show;
mod submit;
mod validate;
mod vote;
pub mod wallet;

#[derive(Debug, Subcommand)]
pub enum Commands {
    Home(home::Home),
    Profile(profile::ShowProfile),
    ProfileSet(profile::SetProfile),
    Submit(submit::Submit),
    Validate(validate::Validate),
    Vote(vote::Vote),
    Show(show::Show),
    Score(score::Score),
    Open(open::Open),
    Reset(reset::Reset),
    #[command(about = "Connect or inspect a wallet")]
    Wallet {
        #[clap(subcommand)]
        subcommand: wallet::Wallet,
    },
}

impl Commands {
    pub async fn run(&self, config: &Config) -> Result<(), AppError> {
        match self {
            Commands::Home(home) => home.run(),
            Commands::Profile(profile) => profile.run(config),
            Commands::ProfileSet(edit) => edit.run(config),
            Commands::Submit(submit) => submit.run(config).await,
            Commands::Validate(validate) => validate.run(config),
            Commands::Vote(vote) => vote.run(config).await,
            Commands::Show(show) => show.run(config),
            Commands::Score(score) => score.run(config),
            Commands::Open(open) => open.run(config),
            Commands::Reset(reset) => reset.run(config),
            Commands::Wallet { subcommand } => subcommand.run().await,
        }
    }
}
