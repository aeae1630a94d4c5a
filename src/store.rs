//! Typed views over the local text store.
//!
//! Each store owns a [`BaseStorage`] of JSON strings and keeps one key in
//! it. Every mutation reloads the persisted state first, applies the
//! change and writes the whole mapping back. There is no lock between
//! two processes sharing the same file: the last writer wins.

use fs_storage::base_storage::BaseStorage;
use fs_storage::{DEEDS_KEY, PROFILE_KEY};
use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::deed::DeedRecord;
use crate::id::DeedId;
use crate::profile::Profile;
use crate::{KarmaError, Result};

fn reload<S>(storage: &mut S) -> Result<()>
where
    S: BaseStorage<String, String>,
{
    match storage.read_fs() {
        Ok(_) => Ok(()),
        // nothing persisted yet
        Err(KarmaError::Storage(_, _)) if !storage.needs_syncing()? => Ok(()),
        Err(err) => Err(err),
    }
}

fn read_value<S, T>(storage: &S, key: &str) -> Result<Option<T>>
where
    S: BaseStorage<String, String>,
    T: DeserializeOwned,
{
    match storage.get(&key.to_owned()) {
        Some(text) => Ok(Some(serde_json::from_str(text)?)),
        None => Ok(None),
    }
}

fn write_value<S, T>(storage: &mut S, key: &str, value: &T) -> Result<()>
where
    S: BaseStorage<String, String>,
    T: Serialize,
{
    let text = serde_json::to_string(value)?;
    storage.set(key.to_owned(), text);
    storage.write_fs()
}

/// The list of deeds submitted from this device.
pub struct DeedRecordStore<S> {
    storage: S,
}

impl<S> DeedRecordStore<S>
where
    S: BaseStorage<String, String>,
{
    pub fn new(storage: S) -> Self {
        Self { storage }
    }

    /// Stored records, newest first. A missing key is an empty list,
    /// a value of the wrong shape is a parse error.
    pub fn load(&mut self) -> Result<Vec<DeedRecord>> {
        reload(&mut self.storage)?;
        Ok(read_value(&self.storage, DEEDS_KEY)?.unwrap_or_default())
    }

    /// Put `record` at the head of the stored list.
    pub fn prepend(&mut self, record: DeedRecord) -> Result<()> {
        let mut records = self.load()?;
        log::info!("storing deed {} ({})", record.id, record.title);
        records.insert(0, record);
        write_value(&mut self.storage, DEEDS_KEY, &records)
    }

    /// Overwrite the stored record with the same id.
    /// Returns `false` when no stored record has that id.
    pub fn replace(&mut self, record: &DeedRecord) -> Result<bool> {
        let mut records = self.load()?;
        match records.iter_mut().find(|r| r.id == record.id) {
            Some(slot) => {
                *slot = record.clone();
                write_value(&mut self.storage, DEEDS_KEY, &records)?;
                Ok(true)
            }
            None => Ok(false),
        }
    }

    pub fn find(&mut self, id: &DeedId) -> Result<Option<DeedRecord>> {
        Ok(self.load()?.into_iter().find(|r| &r.id == id))
    }

    pub fn clear(&mut self) -> Result<()> {
        reload(&mut self.storage)?;
        if self.storage.get(&DEEDS_KEY.to_owned()).is_some() {
            self.storage.remove(&DEEDS_KEY.to_owned())?;
            self.storage.write_fs()?;
        }
        Ok(())
    }
}

pub struct ProfileStore<S> {
    storage: S,
}

impl<S> ProfileStore<S>
where
    S: BaseStorage<String, String>,
{
    pub fn new(storage: S) -> Self {
        Self { storage }
    }

    pub fn load(&mut self) -> Result<Option<Profile>> {
        reload(&mut self.storage)?;
        read_value(&self.storage, PROFILE_KEY)
    }

    /// The stored profile, or the default one when nothing usable is
    /// stored.
    pub fn load_or_default(&mut self) -> Profile {
        match self.load() {
            Ok(Some(profile)) => profile,
            Ok(None) => Profile::default(),
            Err(err) => {
                log::warn!("stored profile is unreadable: {}", err);
                Profile::default()
            }
        }
    }

    pub fn save(&mut self, profile: &Profile) -> Result<()> {
        reload(&mut self.storage)?;
        log::info!("saving profile {}", profile.display_name);
        write_value(&mut self.storage, PROFILE_KEY, profile)
    }

    pub fn clear(&mut self) -> Result<()> {
        reload(&mut self.storage)?;
        if self.storage.get(&PROFILE_KEY.to_owned()).is_some() {
            self.storage.remove(&PROFILE_KEY.to_owned())?;
            self.storage.write_fs()?;
        }
        Ok(())
    }
}

/// Stored deeds followed by `samples`.
///
/// An unreadable stored list is logged and skipped, leaving only the
/// samples, the same outcome as an empty store.
pub fn merged_deeds<S>(
    store: &mut DeedRecordStore<S>,
    samples: Vec<DeedRecord>,
) -> Vec<DeedRecord>
where
    S: BaseStorage<String, String>,
{
    let mut deeds = match store.load() {
        Ok(stored) => stored,
        Err(err) => {
            log::warn!("ignoring unreadable stored deeds: {}", err);
            Vec::new()
        }
    };
    deeds.extend(samples);
    deeds
}
