use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::ast::Pattern;
use crate::interpreter::LoadError;

/// A parsed translation unit: an ordered list of entries.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Resource {
    pub body: Vec<Entry>,
}

/// One parsed entry. Ids starting with `-` are terms, all others messages.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Entry {
    pub id: String,
    #[serde(default)]
    pub value: Option<Pattern>,
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub attributes: BTreeMap<String, Pattern>,
}

impl Entry {
    /// Entry with a value and no attributes.
    pub fn new(id: impl Into<String>, value: impl Into<Pattern>) -> Self {
        Self {
            id: id.into(),
            value: Some(value.into()),
            attributes: BTreeMap::new(),
        }
    }

    /// Entry with attributes only.
    pub fn without_value(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            value: None,
            attributes: BTreeMap::new(),
        }
    }

    pub fn with_attribute(mut self, name: impl Into<String>, value: impl Into<Pattern>) -> Self {
        self.attributes.insert(name.into(), value.into());
        self
    }

    /// Returns true if this entry is classified as a term.
    pub fn is_term(&self) -> bool {
        self.id.starts_with('-')
    }
}

impl Resource {
    pub fn new(body: Vec<Entry>) -> Self {
        Self { body }
    }

    /// Deserialize a resource from its JSON form.
    pub fn from_json_str(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    /// Read and deserialize a JSON resource file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, LoadError> {
        let path = path.as_ref();
        let content = fs::read_to_string(path).map_err(|source| LoadError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json_str(&content).map_err(|source| LoadError::Json {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Message ids in declaration order, terms excluded.
    pub fn message_ids(&self) -> impl Iterator<Item = &str> {
        self.body
            .iter()
            .filter(|entry| !entry.is_term())
            .map(|entry| entry.id.as_str())
    }
}

impl FromIterator<Entry> for Resource {
    fn from_iter<I: IntoIterator<Item = Entry>>(iter: I) -> Self {
        Self {
            body: iter.into_iter().collect(),
        }
    }
}
