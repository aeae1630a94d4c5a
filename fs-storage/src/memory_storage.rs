use std::collections::BTreeMap;
use std::sync::{Arc, Mutex};

use crate::base_storage::BaseStorage;
use data_error::{KarmaError, Result};

type Snapshot<K, V> = Arc<Mutex<Option<BTreeMap<K, V>>>>;

/// Key-value storage whose "persisted" side is a snapshot kept in memory.
///
/// Handles created with [`MemoryStorage::attach`] share the same snapshot,
/// which makes it possible to reproduce two views over one local store
/// without touching the filesystem.
pub struct MemoryStorage<K, V>
where
    K: Ord,
{
    label: String,
    entries: BTreeMap<K, V>,
    dirty: bool,
    persisted: Snapshot<K, V>,
}

impl<K, V> MemoryStorage<K, V>
where
    K: Ord + Clone,
    V: Clone,
{
    pub fn new(label: String) -> Self {
        Self {
            label,
            entries: BTreeMap::new(),
            dirty: false,
            persisted: Arc::new(Mutex::new(None)),
        }
    }

    /// Create another handle over the same persisted snapshot.
    pub fn attach(&self, label: String) -> Self {
        let entries = self
            .persisted
            .lock()
            .ok()
            .and_then(|guard| guard.clone())
            .unwrap_or_default();
        Self {
            label,
            entries,
            dirty: false,
            persisted: Arc::clone(&self.persisted),
        }
    }

    fn snapshot(
        &self,
    ) -> Result<std::sync::MutexGuard<'_, Option<BTreeMap<K, V>>>> {
        self.persisted.lock().map_err(|_| {
            KarmaError::Storage(self.label.clone(), "Poisoned lock".to_owned())
        })
    }
}

impl<K, V> BaseStorage<K, V> for MemoryStorage<K, V>
where
    K: Ord + Clone,
    V: Clone + PartialEq,
{
    fn set(&mut self, id: K, value: V) {
        self.entries.insert(id, value);
        self.dirty = true;
    }

    fn remove(&mut self, id: &K) -> Result<()> {
        self.entries.remove(id).ok_or_else(|| {
            KarmaError::Storage(self.label.clone(), "Key not found".to_owned())
        })?;
        self.dirty = true;
        Ok(())
    }

    fn needs_syncing(&self) -> Result<bool> {
        let snapshot = self.snapshot()?;
        Ok(match snapshot.as_ref() {
            Some(persisted) => self.dirty || persisted != &self.entries,
            None => !self.entries.is_empty(),
        })
    }

    fn read_fs(&mut self) -> Result<BTreeMap<K, V>> {
        let persisted = self.snapshot()?.clone().ok_or_else(|| {
            KarmaError::Storage(
                self.label.clone(),
                "Nothing has been persisted".to_owned(),
            )
        })?;
        self.entries = persisted;
        self.dirty = false;
        Ok(self.entries.clone())
    }

    fn write_fs(&mut self) -> Result<()> {
        *self.snapshot()? = Some(self.entries.clone());
        self.dirty = false;
        log::debug!(
            "{}: {} entries have been written",
            self.label,
            self.entries.len()
        );
        Ok(())
    }

    fn erase(&self) -> Result<()> {
        *self.snapshot()? = None;
        Ok(())
    }
}

impl<K, V> AsRef<BTreeMap<K, V>> for MemoryStorage<K, V>
where
    K: Ord,
{
    fn as_ref(&self) -> &BTreeMap<K, V> {
        &self.entries
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use quickcheck::{Arbitrary, Gen};
    use quickcheck_macros::quickcheck;

    #[test]
    fn attached_handles_share_persisted_data() {
        let mut first = MemoryStorage::new("first".to_owned());
        first.set("k".to_owned(), "v1".to_owned());
        first.write_fs().unwrap();

        let mut second = first.attach("second".to_owned());
        assert_eq!(second.get(&"k".to_owned()), Some(&"v1".to_owned()));

        // last writer wins, there is no merge
        second.set("k".to_owned(), "v2".to_owned());
        second.write_fs().unwrap();
        first.set("k".to_owned(), "v3".to_owned());
        first.write_fs().unwrap();

        second.read_fs().unwrap();
        assert_eq!(second.get(&"k".to_owned()), Some(&"v3".to_owned()));
    }

    #[test]
    fn read_before_write_fails() {
        let mut storage: MemoryStorage<String, String> =
            MemoryStorage::new("empty".to_owned());
        assert!(storage.read_fs().is_err());
        assert!(!storage.needs_syncing().unwrap());
    }

    #[test]
    fn erase_drops_snapshot() {
        let mut storage = MemoryStorage::new("erase".to_owned());
        storage.set(1u8, 1u8);
        storage.write_fs().unwrap();
        storage.erase().unwrap();
        assert!(storage.read_fs().is_err());
    }

    #[derive(Clone, Debug)]
    enum Op {
        Set(u8, u8),
        Remove(u8),
        Write,
        Read,
    }

    impl Arbitrary for Op {
        fn arbitrary(g: &mut Gen) -> Self {
            match u8::arbitrary(g) % 4 {
                0 => Op::Set(u8::arbitrary(g) % 8, u8::arbitrary(g)),
                1 => Op::Remove(u8::arbitrary(g) % 8),
                2 => Op::Write,
                _ => Op::Read,
            }
        }
    }

    #[quickcheck]
    fn prop_memory_storage_matches_model(ops: Vec<Op>) -> bool {
        let mut storage = MemoryStorage::new("model".to_owned());
        let mut live: BTreeMap<u8, u8> = BTreeMap::new();
        let mut persisted: Option<BTreeMap<u8, u8>> = None;

        for op in ops {
            match op {
                Op::Set(k, v) => {
                    storage.set(k, v);
                    live.insert(k, v);
                }
                Op::Remove(k) => {
                    let expected = live.remove(&k).is_some();
                    if storage.remove(&k).is_ok() != expected {
                        return false;
                    }
                }
                Op::Write => {
                    storage.write_fs().unwrap();
                    persisted = Some(live.clone());
                }
                Op::Read => match &persisted {
                    Some(snapshot) => {
                        storage.read_fs().unwrap();
                        live = snapshot.clone();
                    }
                    None => {
                        if storage.read_fs().is_ok() {
                            return false;
                        }
                    }
                },
            }
            if storage.as_ref() != &live {
                return false;
            }
        }
        true
    }
}
