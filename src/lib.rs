#[macro_use]
extern crate lazy_static;

use fs_storage::base_storage::BaseStorage;
use fs_storage::file_storage::FileStorage;

pub use data_error::{KarmaError, Result};

pub mod config;
pub mod deed;
pub mod id;
pub mod notice;
pub mod profile;
pub mod routes;
pub mod samples;
pub mod score;
pub mod store;
pub mod submission;
pub mod views;
pub mod vote;
pub mod wallet;

pub use config::Config;
pub use deed::{DeedRecord, DeedStatus, ImageRef};
pub use id::DeedId;
pub use notice::Notice;
pub use profile::{Avatar, Profile, ProfileEdit, Theme};
pub use score::{karma_score, KarmaTier, ScoreCard};
pub use store::{DeedRecordStore, ProfileStore};
pub use submission::{DeedDraft, ImageSource, Submitter};
pub use vote::{persist_vote, VoteOutcome, VoteSimulator};

pub type LocalStorage = FileStorage<String, String>;

const LOCAL_STORAGE_LABEL: &str = "local-storage";

/// Open the local text store configured in `config`.
///
/// Each call returns an independent handle over the same file. A file
/// that cannot be parsed yields an empty handle: reads through it keep
/// failing, so pages fall back to the samples, and writes are refused
/// until the store is reset.
pub fn open_local_storage(config: &Config) -> Result<LocalStorage> {
    let path = config.storage_path();
    log::debug!("opening local storage at {}", path.display());
    match FileStorage::open(LOCAL_STORAGE_LABEL.to_owned(), &path) {
        Err(KarmaError::Storage(_, reason)) => {
            log::warn!(
                "local storage at {} is unreadable: {}",
                path.display(),
                reason
            );
            Ok(FileStorage::new(LOCAL_STORAGE_LABEL.to_owned(), &path))
        }
        opened => opened,
    }
}

pub fn deed_store(config: &Config) -> Result<DeedRecordStore<LocalStorage>> {
    Ok(DeedRecordStore::new(open_local_storage(config)?))
}

pub fn profile_store(config: &Config) -> Result<ProfileStore<LocalStorage>> {
    Ok(ProfileStore::new(open_local_storage(config)?))
}

/// Drop the stored deeds, and the profile unless `keep_profile` is set.
///
/// An unreadable store is erased as a whole without being parsed.
pub fn reset_local_storage(config: &Config, keep_profile: bool) -> Result<()> {
    let path = config.storage_path();
    if !path.exists() {
        return Ok(());
    }

    match FileStorage::<String, String>::open(
        LOCAL_STORAGE_LABEL.to_owned(),
        &path,
    ) {
        Ok(storage) => {
            DeedRecordStore::new(storage).clear()?;
            if !keep_profile {
                profile_store(config)?.clear()?;
            }
            Ok(())
        }
        Err(KarmaError::Storage(_, reason)) => {
            log::warn!("erasing unreadable local storage: {}", reason);
            FileStorage::<String, String>::new(
                LOCAL_STORAGE_LABEL.to_owned(),
                &path,
            )
            .erase()
        }
        Err(err) => Err(err),
    }
}
