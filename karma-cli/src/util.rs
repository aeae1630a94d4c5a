use karmalib::samples;
use karmalib::store::merged_deeds;
use karmalib::{deed_store, profile_store, Config, DeedRecord, Profile};

use crate::AppError;

/// Stored deeds first, then the built-in profile samples.
pub fn profile_deeds(config: &Config) -> Result<Vec<DeedRecord>, AppError> {
    let mut store = deed_store(config)?;
    Ok(merged_deeds(&mut store, samples::profile_deeds()))
}

pub fn load_profile(config: &Config) -> Result<Profile, AppError> {
    Ok(profile_store(config)?.load_or_default())
}

/// The validation queue: pending stored deeds, then the pending samples.
pub fn validation_queue(config: &Config) -> Result<Vec<DeedRecord>, AppError> {
    let mut store = deed_store(config)?;
    let mut queue: Vec<DeedRecord> = merged_deeds(&mut store, Vec::new())
        .into_iter()
        .filter(|deed| deed.status == karmalib::DeedStatus::Pending)
        .collect();
    queue.extend(samples::pending_deeds());
    Ok(queue)
}

pub fn print_heading(title: &str) {
    println!("{}", title);
    println!("{}", "-".repeat(title.len()));
}
