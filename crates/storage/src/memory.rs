use std::{collections::BTreeMap, sync::Mutex};

use crate::{Documents, Error, Key};

/// Keeps all documents in memory.
#[derive(Debug, Default)]
pub struct MemoryStorage {
    documents: Mutex<BTreeMap<Key, String>>,
}

impl MemoryStorage {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

impl Documents for MemoryStorage {
    fn read(&self, key: Key) -> Result<Option<String>, Error> {
        let documents = self.documents.lock().map_err(|_| Error::Poisoned)?;
        Ok(documents.get(&key).cloned())
    }

    fn write(&self, key: Key, document: String) -> Result<(), Error> {
        let mut documents = self.documents.lock().map_err(|_| Error::Poisoned)?;
        documents.insert(key, document);
        Ok(())
    }
}
