pub mod base_storage;
pub mod file_storage;
pub mod memory_storage;

pub const KARMA_FOLDER: &str = ".karma";

// Browser-style local text store, one file for every key
pub const LOCAL_STORAGE_FILE: &str = "local-storage.json";
pub const CONFIG_FILE: &str = "config.json";

// Keys inside the local store
pub const DEEDS_KEY: &str = "userDeeds";
pub const PROFILE_KEY: &str = "userProfile";
