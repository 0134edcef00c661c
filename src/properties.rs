//! The loaded property store.

use std::path::{Path, PathBuf};

use crate::atomic::AtomicFile;
use crate::builder::Builder;
use crate::edit::{Edit, EditError, EditResult, View};
use crate::error::Error;
use crate::format;
use crate::registry::Registry;
use crate::store::Store;

/// A reconciled set of properties backed by a `.properties` file.
///
/// Created through [`Properties::builder`]; by the time a value of this
/// type exists, every required property holds a validated value. Values
/// change only through [`edit`](Properties::edit), which persists the
/// store after each successful transaction unless the store is
/// read-only.
pub struct Properties {
    registry: Registry,
    store: Store,
    path: PathBuf,
    read_only: bool,
}

impl Properties {
    /// Starts configuring a store for `program_name`. The default file
    /// is `<home>/.<program_name>/config.properties`.
    pub fn builder(program_name: &str) -> Builder {
        Builder::new(program_name)
    }

    pub(crate) fn new(registry: Registry, store: Store, path: PathBuf, read_only: bool) -> Self {
        Self {
            registry,
            store,
            path,
            read_only,
        }
    }

    /// The resolved config file path.
    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn is_read_only(&self) -> bool {
        self.read_only
    }

    /// Current value of a property. Fails with
    /// [`Error::UnknownProperty`] for unregistered names and with
    /// [`Error::MissingValue`] when the property is unset.
    pub fn get(&self, name: &str) -> Result<&str, Error> {
        self.registry.lookup(name)?;
        self.store
            .get(name)
            .ok_or_else(|| Error::MissingValue(name.to_string()))
    }

    /// Like [`get`](Properties::get) but returns `fallback` when the
    /// property is unset. Unregistered names still fail.
    pub fn get_or<'a>(&'a self, name: &str, fallback: &'a str) -> Result<&'a str, Error> {
        self.registry.lookup(name)?;
        Ok(self.store.get(name).unwrap_or(fallback))
    }

    /// Applies a batch of edits transactionally.
    ///
    /// The editor callback gets a [`View`] of the current values and an
    /// [`Edit`] handle working on a private clone. If the callback
    /// returns an error, the clone is discarded and the failure comes
    /// back as [`EditError::Aborted`]; no partial writes reach the live
    /// store. If it returns cleanly and staged any change, the clone
    /// replaces the live store and, unless the store is read-only, is
    /// persisted to disk.
    ///
    /// A persistence failure is reported as [`EditError::Save`] while
    /// the in-memory store keeps the new values; reloading from disk
    /// would then observe the old state. This window is deliberate, see
    /// DESIGN.md.
    ///
    /// ```no_run
    /// # fn run(properties: &mut askprops::Properties) -> askprops::EditResult {
    /// properties.edit(|_current, edit| {
    ///     let applied = edit.set_property("endpoint", "https://example.org")?;
    ///     if let Err(refused) = applied {
    ///         println!("keeping the old endpoint: {refused}");
    ///     }
    ///     Ok(())
    /// })
    /// # }
    /// ```
    pub fn edit<F>(&mut self, editor: F) -> EditResult
    where
        F: FnOnce(&View<'_>, &mut Edit<'_>) -> Result<(), Error>,
    {
        let view = View::new(&self.registry, &self.store);
        let mut transaction = Edit::new(&self.registry, self.store.clone());
        if let Err(err) = editor(&view, &mut transaction) {
            return Err(EditError::Aborted(err.to_string()));
        }

        let (staged, dirty) = transaction.into_parts();
        if !dirty {
            return Ok(());
        }
        self.store = staged;
        if !self.read_only {
            if let Err(err) = self.persist() {
                log::warn!(
                    "property store updated in memory but not persisted to {}: {}",
                    self.path.display(),
                    err
                );
                return Err(EditError::Save(err.to_string()));
            }
        }
        Ok(())
    }

    /// Serializes the whole store to the backing file.
    pub(crate) fn persist(&self) -> Result<(), Error> {
        if self.read_only {
            return Err(Error::ReadOnly);
        }
        AtomicFile::new(&self.path).write(&format::serialize(&self.store))?;
        log::debug!(
            "persisted {} properties to {}",
            self.store.len(),
            self.path.display()
        );
        Ok(())
    }
}
