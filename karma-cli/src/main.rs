use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;
use karmalib::Config;

mod commands;
mod error;
mod util;

pub use error::AppError;

use commands::Commands;

#[derive(Parser, Debug)]
#[clap(name = "karma-cli")]
#[clap(about = "Submit good deeds, vote on them and track karma", long_about = None)]
struct Cli {
    #[clap(
        long,
        global = true,
        help = "Directory holding the local store (defaults to ~/.karma)"
    )]
    data_dir: Option<PathBuf>,

    #[clap(long, global = true, help = "Read configuration from this file")]
    config: Option<PathBuf>,

    #[clap(
        long,
        global = true,
        action = clap::ArgAction::SetTrue,
        help = "Skip the simulated network delays"
    )]
    no_delay: bool,

    #[clap(subcommand)]
    command: Commands,
}

impl Cli {
    fn load_config(&self) -> Result<Config, AppError> {
        let mut config = match &self.config {
            Some(path) => Config::from_file(path)
                .map_err(|e| AppError::ConfigLoadError(e.to_string()))?,
            None => {
                let data_dir = self
                    .data_dir
                    .clone()
                    .unwrap_or_else(|| Config::default().data_dir);
                Config::load(&data_dir)
                    .map_err(|e| AppError::ConfigLoadError(e.to_string()))?
            }
        };
        if let Some(data_dir) = &self.data_dir {
            config.data_dir = data_dir.clone();
        }
        if self.no_delay {
            config = config.without_delays();
        }
        Ok(config)
    }
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> ExitCode {
    env_logger::init();

    let args = Cli::parse();
    let result = match args.load_config() {
        Ok(config) => {
            log::debug!("using data directory {}", config.data_dir.display());
            args.command.run(&config).await
        }
        Err(err) => Err(err),
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            log::error!("{:?}", err);
            eprintln!("{}", err.notice());
            ExitCode::FAILURE
        }
    }
}
