use std::{collections::VecDeque, sync::Arc};

use chrono::Local;
use log::{Level, LevelFilter, Metadata, Record};
use serde::{Deserialize, Serialize};

use crate::{Documents, Error, Key, Repository as _};

pub trait Repository: Send + Sync + 'static {
    /// Stored entries, newest first.
    fn read_entries(&self) -> Result<VecDeque<Entry>, Error>;
    fn write_entries(&self, entries: &VecDeque<Entry>) -> Result<(), Error>;
}

impl<T: Documents + Send + Sync + 'static> Repository for T {
    fn read_entries(&self) -> Result<VecDeque<Entry>, Error> {
        match self.read(Key::Log)? {
            Some(document) => Ok(serde_json::from_str(&document)?),
            None => Ok(VecDeque::new()),
        }
    }

    fn write_entries(&self, entries: &VecDeque<Entry>) -> Result<(), Error> {
        self.write(Key::Log, serde_json::to_string(entries)?)
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct Entry {
    pub time: String,
    #[serde(with = "LevelDef")]
    pub level: Level,
    pub message: String,
}

#[derive(Serialize, Deserialize)]
#[serde(remote = "Level")]
enum LevelDef {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

/// Install a [`Logger`] as the global logger.
///
/// The number of kept entries is taken from the settings stored in `repository`.
pub fn init<R>(repository: Arc<R>) -> Result<(), Error>
where
    R: Documents + Send + Sync + 'static,
{
    let logger: &'static Logger = Box::leak(Box::new(Logger::from_settings(repository)?));
    log::set_logger(logger).map_err(|err| Error::Logger(err.to_string()))?;
    log::set_max_level(LevelFilter::Trace);
    Ok(())
}

/// Echoes records to stderr and keeps the latest of them in a repository.
pub struct Logger {
    repository: Arc<dyn Repository>,
    capacity: usize,
}

impl Logger {
    #[must_use]
    pub fn new(repository: Arc<dyn Repository>, capacity: usize) -> Self {
        Self {
            repository,
            capacity,
        }
    }

    pub fn from_settings<R>(repository: Arc<R>) -> Result<Self, Error>
    where
        R: Documents + Send + Sync + 'static,
    {
        let capacity = repository.read_settings()?.log_capacity;
        Ok(Self::new(repository, capacity))
    }

    fn store(&self, entry: Entry) -> Result<(), Error> {
        let mut entries = self.repository.read_entries()?;
        entries.push_front(entry);
        entries.truncate(self.capacity);
        self.repository.write_entries(&entries)
    }
}

impl log::Log for Logger {
    fn enabled(&self, metadata: &Metadata) -> bool {
        metadata.level() <= Level::Trace
    }

    fn log(&self, record: &Record) {
        if !self.enabled(record.metadata()) {
            return;
        }

        let message = record.args().to_string();
        eprintln!("{:<5} {message}", record.level());

        if let Err(err) = self.store(Entry {
            time: Local::now().format("%b %d %H:%M:%S").to_string(),
            level: record.level(),
            message,
        }) {
            eprintln!("ERROR failed to store log entry: {err}");
        }
    }

    fn flush(&self) {}
}
