#[derive(serde::Serialize, serde::Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
#[serde(default)]
pub struct Settings {
    /// Write the snapshot as indented JSON.
    pub pretty_print: bool,
    /// Maximum number of stored log entries.
    pub log_capacity: usize,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            pretty_print: true,
            log_capacity: 100,
        }
    }
}
