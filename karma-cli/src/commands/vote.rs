use karmalib::views::ValidationCard;
use karmalib::{
    deed_store, persist_vote, Config, DeedId, VoteOutcome, VoteSimulator,
};

use crate::util::validation_queue;
use crate::AppError;

#[derive(Clone, Debug, clap::Args)]
#[clap(
    name = "vote",
    about = "Vote on deeds in the validation queue",
    long_about = "Vote on one or more deeds. Repeating an id within one \
                  invocation is ignored: votes are only remembered for the \
                  current session."
)]
pub struct Vote {
    #[clap(required = true, help = "Deed ids to vote on")]
    ids: Vec<String>,
    #[clap(long, action = clap::ArgAction::SetTrue, conflicts_with = "invalid")]
    valid: bool,
    #[clap(long, action = clap::ArgAction::SetTrue)]
    invalid: bool,
}

impl Vote {
    pub async fn run(&self, config: &Config) -> Result<(), AppError> {
        if self.valid == self.invalid {
            return Err(AppError::InvalidOption(
                "pass exactly one of --valid or --invalid".to_owned(),
            ));
        }

        let mut store = deed_store(config)?;
        let mut session =
            VoteSimulator::new(validation_queue(config)?, config.vote_delay());

        for id in &self.ids {
            let id = DeedId::from(id.as_str());
            match session.vote(&id, self.valid).await? {
                VoteOutcome::Recorded(deed) => {
                    // sample deeds only live for this session
                    if persist_vote(&mut store, &deed)? {
                        log::info!("persisted vote on stored deed {}", id);
                    }
                    println!("{}", ValidationCard { deed: &deed, voted: true });
                }
                VoteOutcome::AlreadyVoted => {
                    println!("[{}] already voted in this session", id);
                }
            }
        }
        println!(
            "Pending ({}) / Voted ({})",
            session.pending().len(),
            session.voted().len()
        );
        Ok(())
    }
}
