use derive_more::{AsRef, Display};
use uuid::Uuid;

use crate::{Exercise, StorageError};

pub trait TemplateRepository {
    /// All stored templates. Must not fail: unreadable storage degrades to an
    /// empty collection.
    fn read_templates(&self) -> Vec<Template>;
    fn write_templates(&self, templates: &[Template]) -> Result<(), StorageError>;
}

#[derive(AsRef, Debug, Display, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct TemplateID(String);

impl TemplateID {
    #[must_use]
    pub fn random() -> Self {
        Self(Uuid::new_v4().to_string())
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for TemplateID {
    fn from(value: &str) -> Self {
        Self(value.to_string())
    }
}

/// A reusable exercise-list seed. Applying a template replaces the editor's
/// exercise list but not its date. Templates are never mutated in place.
#[derive(Debug, Clone, PartialEq)]
pub struct Template {
    pub id: TemplateID,
    pub name: Name,
    pub focus: String,
    pub exercises: Vec<Exercise>,
}

#[derive(AsRef, Debug, Display, Clone, PartialEq, Eq, PartialOrd, Ord)]
pub struct Name(String);

impl Name {
    pub fn new(name: &str) -> Result<Self, NameError> {
        let trimmed_name = name.trim();

        if trimmed_name.is_empty() {
            return Err(NameError::Empty);
        }

        let len = trimmed_name.len();

        if len > 64 {
            return Err(NameError::TooLong(len));
        }

        Ok(Name(trimmed_name.to_string()))
    }

    /// Repairs arbitrary stored input into a valid name: trims and truncates
    /// to the length bound on a character boundary. `None` for blank input.
    #[must_use]
    pub fn clamped(name: &str) -> Option<Self> {
        let trimmed_name = name.trim();

        if trimmed_name.is_empty() {
            return None;
        }

        let mut end = trimmed_name.len().min(64);
        while !trimmed_name.is_char_boundary(end) {
            end -= 1;
        }

        Some(Name(trimmed_name[..end].trim_end().to_string()))
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// Stored templates without a usable name fall back to this.
impl Default for Name {
    fn default() -> Self {
        Name("Template".to_string())
    }
}

#[derive(thiserror::Error, Debug, PartialEq)]
pub enum NameError {
    #[error("Name must not be empty")]
    Empty,
    #[error("Name must be 64 characters or fewer ({0} > 64)")]
    TooLong(usize),
}
