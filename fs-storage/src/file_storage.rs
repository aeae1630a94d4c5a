use serde::{Deserialize, Serialize};
use std::fs::{self, File};
use std::io::{BufWriter, Write};
use std::time::SystemTime;
use std::{
    collections::BTreeMap,
    path::{Path, PathBuf},
};

use crate::base_storage::BaseStorage;
use data_error::{KarmaError, Result};

/*
Note on `FileStorage` format:

The whole mapping is persisted as one JSON document together with a
version number. There is no migration path: a document written with a
different version is rejected instead of being reinterpreted.
*/
const STORAGE_VERSION: i32 = 1;

/// Represents a key-value storage that persists data to a single file.
pub struct FileStorage<K, V>
where
    K: Ord,
{
    label: String,
    path: PathBuf,
    modified: SystemTime,
    data: FileStorageData<K, V>,
}

/// The data that is serialized and deserialized to and from disk.
#[derive(Serialize, Deserialize)]
pub struct FileStorageData<K, V>
where
    K: Ord,
{
    version: i32,
    entries: BTreeMap<K, V>,
}

impl<K, V> FileStorage<K, V>
where
    K: Ord + Clone + serde::Serialize + serde::de::DeserializeOwned,
    V: Clone + serde::Serialize + serde::de::DeserializeOwned,
{
    /// Create a new file storage with a diagnostic label and file path
    pub fn new(label: String, path: &Path) -> Self {
        Self {
            label,
            path: PathBuf::from(path),
            // never synced: any file already on disk counts as diverged
            modified: SystemTime::UNIX_EPOCH,
            data: FileStorageData {
                version: STORAGE_VERSION,
                entries: BTreeMap::new(),
            },
        }
    }

    /// Create a storage and load whatever is already persisted at `path`.
    /// A missing file is not an error, the storage simply starts empty.
    pub fn open(label: String, path: &Path) -> Result<Self> {
        let mut storage = Self::new(label, path);
        if storage.path.exists() {
            storage.read_fs()?;
        }
        Ok(storage)
    }
}

impl<K, V> BaseStorage<K, V> for FileStorage<K, V>
where
    K: Ord + Clone + serde::Serialize + serde::de::DeserializeOwned,
    V: Clone + serde::Serialize + serde::de::DeserializeOwned,
{
    fn set(&mut self, key: K, value: V) {
        self.data.entries.insert(key, value);
        self.modified = SystemTime::now();
    }

    fn remove(&mut self, id: &K) -> Result<()> {
        self.data.entries.remove(id).ok_or_else(|| {
            KarmaError::Storage(self.label.clone(), "Key not found".to_owned())
        })?;
        self.modified = SystemTime::now();
        Ok(())
    }

    /// Compare the timestamp of the storage file
    /// with the timestamp of the in-memory storage update
    /// to determine if either of the two requires syncing.
    fn needs_syncing(&self) -> Result<bool> {
        match fs::metadata(&self.path) {
            Ok(metadata) => {
                let as_secs = |time: SystemTime| -> Result<u64> {
                    Ok(time
                        .duration_since(SystemTime::UNIX_EPOCH)?
                        .as_secs())
                };

                let fs_modified = as_secs(metadata.modified()?)?;
                let self_modified = as_secs(self.modified)?;

                Ok(fs_modified != self_modified)
            }
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                Ok(!self.data.entries.is_empty())
            }
            Err(e) => {
                Err(KarmaError::Storage(self.label.clone(), e.to_string()))
            }
        }
    }

    fn read_fs(&mut self) -> Result<BTreeMap<K, V>> {
        if !self.path.exists() {
            return Err(KarmaError::Storage(
                self.label.clone(),
                "File does not exist".to_owned(),
            ));
        }

        let file = fs::File::open(&self.path)?;
        let data: FileStorageData<K, V> = serde_json::from_reader(file)
            .map_err(|err| {
                KarmaError::Storage(self.label.clone(), err.to_string())
            })?;
        if data.version != STORAGE_VERSION {
            return Err(KarmaError::Storage(
                self.label.clone(),
                format!(
                    "Storage version mismatch: expected {}, got {}",
                    STORAGE_VERSION, data.version
                ),
            ));
        }
        self.modified = fs::metadata(&self.path)?.modified()?;
        self.data.entries = data.entries;

        log::debug!(
            "{}: {} entries have been read",
            self.label,
            self.data.entries.len()
        );
        Ok(self.data.entries.clone())
    }

    fn write_fs(&mut self) -> Result<()> {
        let parent_dir = self.path.parent().ok_or_else(|| {
            KarmaError::Storage(
                self.label.clone(),
                "Failed to get parent directory".to_owned(),
            )
        })?;
        fs::create_dir_all(parent_dir)?;
        let file = File::create(&self.path)?;
        let mut writer = BufWriter::new(file);

        serde_json::to_writer(&mut writer, &self.data).map_err(|err| {
            KarmaError::Storage(self.label.clone(), err.to_string())
        })?;
        writer.flush()?;
        drop(writer);

        self.modified = fs::metadata(&self.path)?.modified()?;

        log::info!(
            "{}: {} entries have been written",
            self.label,
            self.data.entries.len()
        );
        Ok(())
    }

    fn erase(&self) -> Result<()> {
        fs::remove_file(&self.path).map_err(|err| {
            KarmaError::Storage(self.label.clone(), err.to_string())
        })
    }
}

impl<K, V> AsRef<BTreeMap<K, V>> for FileStorage<K, V>
where
    K: Ord,
{
    fn as_ref(&self) -> &BTreeMap<K, V> {
        &self.data.entries
    }
}

#[cfg(test)]
mod tests {
    use std::collections::BTreeMap;
    use tempdir::TempDir;

    use crate::{base_storage::BaseStorage, file_storage::FileStorage};

    #[test]
    fn test_file_storage_write_read() {
        let temp_dir =
            TempDir::new("tmp").expect("Failed to create temporary directory");
        let storage_path = temp_dir.path().join("test_storage.json");

        let mut file_storage =
            FileStorage::new("TestStorage".to_string(), &storage_path);

        file_storage.set("key1".to_string(), "value1".to_string());
        file_storage.set("key2".to_string(), "value2".to_string());

        assert!(file_storage.remove(&"key1".to_string()).is_ok());
        file_storage.write_fs().unwrap();

        let mut mirror: FileStorage<String, String> =
            FileStorage::new("Mirror".to_string(), &storage_path);
        let data_read: BTreeMap<_, _> = mirror
            .read_fs()
            .expect("Failed to read data from disk");

        assert_eq!(data_read.len(), 1);
        assert_eq!(data_read.get("key2").map(|v| v.as_str()), Some("value2"));
        assert_eq!(
            mirror.get(&"key2".to_string()).map(|v| v.as_str()),
            Some("value2")
        );
    }

    #[test]
    fn test_file_storage_remove_missing_key() {
        let temp_dir =
            TempDir::new("tmp").expect("Failed to create temporary directory");
        let storage_path = temp_dir.path().join("test_storage.json");

        let mut file_storage: FileStorage<String, String> =
            FileStorage::new("TestStorage".to_string(), &storage_path);
        assert!(file_storage.remove(&"nope".to_string()).is_err());
    }

    #[test]
    fn test_file_storage_erase() {
        let temp_dir =
            TempDir::new("tmp").expect("Failed to create temporary directory");
        let storage_path = temp_dir.path().join("nested/test_storage.json");

        let mut file_storage =
            FileStorage::new("TestStorage".to_string(), &storage_path);

        file_storage.set("key1".to_string(), "value1".to_string());
        file_storage.set("key1".to_string(), "value2".to_string());
        assert!(file_storage.write_fs().is_ok());
        assert!(storage_path.exists());

        if let Err(err) = file_storage.erase() {
            panic!("Failed to delete file: {:?}", err);
        }
        assert!(!storage_path.exists());
    }

    #[test]
    fn test_file_storage_open_missing_file_is_empty() {
        let temp_dir =
            TempDir::new("tmp").expect("Failed to create temporary directory");
        let storage_path = temp_dir.path().join("absent.json");

        let storage: FileStorage<String, String> =
            FileStorage::open("TestStorage".to_string(), &storage_path)
                .unwrap();
        assert!(storage.as_ref().is_empty());
        assert!(!storage.needs_syncing().unwrap());
    }

    #[test]
    fn test_file_storage_rejects_other_version() {
        let temp_dir =
            TempDir::new("tmp").expect("Failed to create temporary directory");
        let storage_path = temp_dir.path().join("old.json");
        std::fs::write(&storage_path, r#"{"version":7,"entries":{}}"#)
            .unwrap();

        let result: data_error::Result<FileStorage<String, String>> =
            FileStorage::open("TestStorage".to_string(), &storage_path);
        assert!(matches!(
            result,
            Err(data_error::KarmaError::Storage(_, _))
        ));
    }

    #[test]
    fn test_file_storage_rejects_garbage() {
        let temp_dir =
            TempDir::new("tmp").expect("Failed to create temporary directory");
        let storage_path = temp_dir.path().join("garbage.json");
        std::fs::write(&storage_path, "not json at all").unwrap();

        let mut storage: FileStorage<String, String> =
            FileStorage::new("TestStorage".to_string(), &storage_path);
        assert!(storage.read_fs().is_err());
    }

    #[test]
    fn test_file_storage_needs_syncing() {
        let temp_dir =
            TempDir::new("tmp").expect("Failed to create temporary directory");
        let storage_path = temp_dir.path().join("teststorage.json");

        let mut file_storage =
            FileStorage::new("TestStorage".to_string(), &storage_path);
        file_storage.write_fs().unwrap();
        assert!(!file_storage.needs_syncing().unwrap());
        std::thread::sleep(std::time::Duration::from_secs(1));
        file_storage.set("key1".to_string(), "value1".to_string());
        assert!(file_storage.needs_syncing().unwrap());
        file_storage.write_fs().unwrap();
        assert!(!file_storage.needs_syncing().unwrap());
    }

    #[test]
    fn test_file_storage_unread_file_needs_syncing() {
        let temp_dir =
            TempDir::new("tmp").expect("Failed to create temporary directory");
        let storage_path = temp_dir.path().join("garbage.json");
        std::fs::write(&storage_path, "{ truncated").unwrap();

        let mut storage: FileStorage<String, String> =
            FileStorage::new("TestStorage".to_string(), &storage_path);
        assert!(storage.read_fs().is_err());
        assert!(storage.needs_syncing().unwrap());
    }
}
