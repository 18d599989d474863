use std::borrow::Borrow;

use derive_more::{AsRef, Display};

/// Validated display name of an exercise, workout, rest day or muscle group.
#[derive(AsRef, Debug, Display, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Name(pub(crate) String);

impl Name {
    pub fn new(name: &str) -> Result<Self, NameError> {
        let trimmed_name = name.trim();

        if trimmed_name.is_empty() {
            return Err(NameError::Empty);
        }

        let len = trimmed_name.chars().count();

        if len > 64 {
            return Err(NameError::TooLong(len));
        }

        Ok(Name(trimmed_name.to_string()))
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Borrow<str> for Name {
    fn borrow(&self) -> &str {
        &self.0
    }
}

impl TryFrom<&str> for Name {
    type Error = NameError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        Name::new(value)
    }
}

#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum NameError {
    #[error("Name must not be empty")]
    Empty,
    #[error("Name must be 64 characters or fewer ({0} > 64)")]
    TooLong(usize),
}
