#![warn(clippy::pedantic)]
#![allow(clippy::missing_errors_doc)]

use liftplan_domain::Planner;

pub mod file;
pub mod log;
pub mod memory;
mod settings;
mod snapshot;

pub use settings::Settings;
pub use snapshot::*;

pub trait Repository {
    fn read_snapshot(&self) -> Result<Option<Snapshot>, Error>;
    fn write_snapshot(&self, snapshot: &Snapshot) -> Result<(), Error>;

    fn read_settings(&self) -> Result<Settings, Error>;
    fn write_settings(&self, settings: &Settings) -> Result<(), Error>;
}

/// Raw access to the JSON documents of a storage backend.
pub trait Documents {
    fn read(&self, key: Key) -> Result<Option<String>, Error>;
    fn write(&self, key: Key, document: String) -> Result<(), Error>;
}

#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, strum::Display, strum::IntoStaticStr,
)]
#[strum(serialize_all = "lowercase")]
pub enum Key {
    Snapshot,
    Settings,
    Log,
}

impl<T: Documents> Repository for T {
    fn read_snapshot(&self) -> Result<Option<Snapshot>, Error> {
        self.read(Key::Snapshot)?
            .map(|document| serde_json::from_str(&document))
            .transpose()
            .map_err(Error::from)
    }

    fn write_snapshot(&self, snapshot: &Snapshot) -> Result<(), Error> {
        let document = if self.read_settings()?.pretty_print {
            serde_json::to_string_pretty(snapshot)?
        } else {
            serde_json::to_string(snapshot)?
        };
        self.write(Key::Snapshot, document)
    }

    fn read_settings(&self) -> Result<Settings, Error> {
        match self.read(Key::Settings)? {
            Some(document) => Ok(serde_json::from_str(&document)?),
            None => Ok(Settings::default()),
        }
    }

    fn write_settings(&self, settings: &Settings) -> Result<(), Error> {
        self.write(Key::Settings, serde_json::to_string(settings)?)
    }
}

pub fn save(repository: &impl Repository, planner: &Planner) -> Result<(), Error> {
    repository.write_snapshot(&Snapshot::from(planner))
}

/// Restore a planner, or create an empty one if nothing has been saved yet.
pub fn load(repository: &impl Repository) -> Result<Planner, Error> {
    match repository.read_snapshot()? {
        Some(snapshot) => Ok(Planner::try_from(snapshot)?),
        None => Ok(Planner::new()),
    }
}

#[derive(thiserror::Error, Debug)]
pub enum Error {
    #[error("serialization failed: {0}")]
    Serialization(#[from] serde_json::Error),
    #[error("storage access failed: {0}")]
    Io(#[from] std::io::Error),
    #[error("invalid snapshot: {0}")]
    Snapshot(#[from] SnapshotError),
    #[error("storage lock poisoned")]
    Poisoned,
    #[error("logger initialization failed: {0}")]
    Logger(String),
}
