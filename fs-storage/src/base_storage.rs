use data_error::Result;
use std::collections::BTreeMap;

pub trait BaseStorage<K, V>: AsRef<BTreeMap<K, V>>
where
    K: Ord,
{
    /// Look up an entry in the internal mapping.
    fn get<'a>(&'a self, id: &K) -> Option<&'a V>
    where
        K: 'a,
    {
        self.as_ref().get(id)
    }

    /// Create or update an entry in the internal mapping.
    fn set(&mut self, id: K, value: V);

    /// Remove an entry from the internal mapping.
    fn remove(&mut self, id: &K) -> Result<()>;

    /// Check if the internal mapping and the persisted data
    /// have diverged since the last read or write.
    fn needs_syncing(&self) -> Result<bool>;

    /// Scan and load the key-value mapping
    /// from the pre-configured location.
    fn read_fs(&mut self) -> Result<BTreeMap<K, V>>;

    /// Persist the internal key-value mapping
    /// to the pre-configured location.
    fn write_fs(&mut self) -> Result<()>;

    /// Remove all persisted data
    /// from the pre-configured location.
    fn erase(&self) -> Result<()>;
}
