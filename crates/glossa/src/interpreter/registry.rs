//! Message and term tables of a bundle.

use std::collections::HashMap;

use tracing::{debug, warn};

use crate::ast::{Entry, Message, Term};
use crate::interpreter::{BundleError, EntryKind};

/// Registered messages and terms.
///
/// Both share one id namespace by convention (term ids start with `-`), but
/// live in separate tables so a term never satisfies a message lookup.
#[derive(Debug, Default)]
pub struct EntryRegistry {
    messages: HashMap<String, Message>,
    terms: HashMap<String, Term>,
}

impl EntryRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn message(&self, id: &str) -> Option<&Message> {
        self.messages.get(id)
    }

    pub fn term(&self, id: &str) -> Option<&Term> {
        self.terms.get(id)
    }

    /// Message ids in sorted order.
    pub fn message_ids(&self) -> Vec<&str> {
        let mut ids: Vec<&str> = self.messages.keys().map(String::as_str).collect();
        ids.sort_unstable();
        ids
    }

    /// Term ids in sorted order.
    pub fn term_ids(&self) -> Vec<&str> {
        let mut ids: Vec<&str> = self.terms.keys().map(String::as_str).collect();
        ids.sort_unstable();
        ids
    }

    /// Install one entry.
    ///
    /// On error the registry is left unchanged.
    pub fn insert(&mut self, entry: Entry, allow_overrides: bool) -> Result<(), BundleError> {
        let Entry {
            id,
            value,
            attributes,
        } = entry;
        if id.starts_with('-') {
            let Some(value) = value else {
                warn!(id = %id, "rejected term without value");
                return Err(BundleError::MissingTermValue { id });
            };
            if !allow_overrides && self.terms.contains_key(&id) {
                warn!(id = %id, kind = %EntryKind::Term, "entry already registered");
                return Err(BundleError::Overriding {
                    kind: EntryKind::Term,
                    id,
                });
            }
            debug!(id = %id, kind = %EntryKind::Term, "registered entry");
            self.terms
                .insert(id.clone(), Term::new(id, value, attributes));
        } else {
            if !allow_overrides && self.messages.contains_key(&id) {
                warn!(id = %id, kind = %EntryKind::Message, "entry already registered");
                return Err(BundleError::Overriding {
                    kind: EntryKind::Message,
                    id,
                });
            }
            debug!(id = %id, kind = %EntryKind::Message, "registered entry");
            self.messages
                .insert(id.clone(), Message::new(id, value, attributes));
        }
        Ok(())
    }
}
