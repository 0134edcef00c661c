//! Transactional editing of a property store.
//!
//! An editor callback receives a [`View`] of the live values and an
//! [`Edit`] handle operating on a private clone. Individual operations
//! report recoverable problems as [`EditError`]s the caller may inspect
//! and continue past; unknown property names surface on the fatal
//! [`Error`] channel and, once propagated out of the callback, abort the
//! whole transaction. The live store only changes after the callback
//! returns cleanly.

use thiserror::Error as ThisError;

use crate::error::Error;
use crate::registry::Registry;
use crate::store::Store;
use crate::validator;

/// Recoverable outcome of a single edit operation, or of the whole
/// [`edit`](crate::Properties::edit) call.
pub type EditResult = Result<(), EditError>;

/// Expected, recoverable failures during transactional edits.
#[derive(Debug, ThisError)]
pub enum EditError {
    /// A validator rejected the new value; the clone was not touched.
    #[error("Failed to set property {name}: {message}")]
    Validation { name: String, message: String },

    /// Required properties cannot be cleared.
    #[error("Can not clear property {0} since it is required.")]
    ClearRequired(String),

    /// The editor callback failed; every change was discarded.
    #[error("{0}")]
    Aborted(String),

    /// The store was updated in memory but could not be persisted.
    #[error("Failed to save to file: {0}")]
    Save(String),
}

/// Read access to the live, pre-transaction values.
pub struct View<'a> {
    registry: &'a Registry,
    store: &'a Store,
}

impl<'a> View<'a> {
    pub(crate) fn new(registry: &'a Registry, store: &'a Store) -> Self {
        Self { registry, store }
    }

    /// Current value; fails for unregistered names and for registered
    /// names with no value.
    pub fn get(&self, name: &str) -> Result<&'a str, Error> {
        self.registry.lookup(name)?;
        self.store
            .get(name)
            .ok_or_else(|| Error::MissingValue(name.to_string()))
    }

    /// Current value or `fallback` when unset; still fails for
    /// unregistered names.
    pub fn get_or<'f>(&self, name: &str, fallback: &'f str) -> Result<&'f str, Error>
    where
        'a: 'f,
    {
        self.registry.lookup(name)?;
        Ok(self.store.get(name).unwrap_or(fallback))
    }
}

/// The transaction handle: a clone of the store plus a dirty flag.
pub struct Edit<'a> {
    registry: &'a Registry,
    store: Store,
    dirty: bool,
}

impl<'a> Edit<'a> {
    pub(crate) fn new(registry: &'a Registry, store: Store) -> Self {
        Self {
            registry,
            store,
            dirty: false,
        }
    }

    /// Validates and stages a new value.
    ///
    /// The outer error is the fatal channel (unknown name); the inner
    /// [`EditResult`] reports validation failures without aborting the
    /// transaction.
    pub fn set_property(&mut self, name: &str, value: &str) -> Result<EditResult, Error> {
        let definition = self.registry.lookup(name)?;
        if let Some(message) = validator::first_failure(definition.validators(), value) {
            return Ok(Err(EditError::Validation {
                name: name.to_string(),
                message,
            }));
        }
        self.store.set(name, value);
        self.dirty = true;
        Ok(Ok(()))
    }

    /// Stages removal of a value. Required properties are refused.
    pub fn clear_property(&mut self, name: &str) -> Result<EditResult, Error> {
        let definition = self.registry.lookup(name)?;
        if definition.required() {
            return Ok(Err(EditError::ClearRequired(name.to_string())));
        }
        self.store.remove(name);
        self.dirty = true;
        Ok(Ok(()))
    }

    pub(crate) fn into_parts(self) -> (Store, bool) {
        (self.store, self.dirty)
    }
}
