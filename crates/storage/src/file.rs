use std::{fs, io, path::PathBuf};

use crate::{Documents, Error, Key};

/// Stores every document as a JSON file inside a directory.
#[derive(Debug, Clone)]
pub struct FileStorage {
    directory: PathBuf,
}

impl FileStorage {
    #[must_use]
    pub fn new(directory: impl Into<PathBuf>) -> Self {
        Self {
            directory: directory.into(),
        }
    }

    fn path(&self, key: Key) -> PathBuf {
        self.directory.join(format!("{key}.json"))
    }
}

impl Documents for FileStorage {
    fn read(&self, key: Key) -> Result<Option<String>, Error> {
        match fs::read_to_string(self.path(key)) {
            Ok(document) => Ok(Some(document)),
            Err(err) if err.kind() == io::ErrorKind::NotFound => Ok(None),
            Err(err) => Err(err.into()),
        }
    }

    fn write(&self, key: Key, document: String) -> Result<(), Error> {
        fs::create_dir_all(&self.directory)?;
        let path = self.path(key);
        let partial = path.with_extension("json.partial");
        fs::write(&partial, document)?;
        fs::rename(partial, path)?;
        Ok(())
    }
}
