//! Registration and the reconciliation pass.

use std::path::PathBuf;

use crate::atomic::AtomicFile;
use crate::error::Error;
use crate::format;
use crate::prompt::{self, Console, TermConsole};
use crate::properties::Properties;
use crate::registry::{PropertyConstruction, PropertyDefinition, Registry};
use crate::store::Store;
use crate::validator;

enum PathSpec {
    /// `<home>/.<program_name>/config.properties`
    Default,
    /// A file name under the default directory.
    FileName(String),
    /// An explicit full path.
    Full(PathBuf),
}

/// Configures and builds a [`Properties`] store.
///
/// Properties are registered in the order they should be reconciled in;
/// [`build`](Builder::build) then loads the file, prompts the user for
/// everything missing or invalid, and persists the corrected store.
pub struct Builder {
    program_name: String,
    path: PathSpec,
    create_parent_dir: bool,
    print_loaded_path: bool,
    read_only: bool,
    definitions: Vec<PropertyDefinition>,
}

impl Builder {
    pub(crate) fn new(program_name: &str) -> Self {
        Self {
            program_name: program_name.to_string(),
            path: PathSpec::Default,
            create_parent_dir: true,
            print_loaded_path: true,
            read_only: false,
            definitions: Vec::new(),
        }
    }

    /// Uses an explicit config file path instead of the default.
    pub fn config_file_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.path = PathSpec::Full(path.into());
        self
    }

    /// Uses `file_name` under the default `<home>/.<program_name>/`
    /// directory.
    pub fn config_file_name(mut self, file_name: impl Into<String>) -> Self {
        self.path = PathSpec::FileName(file_name.into());
        self
    }

    /// Whether to create the config file's parent directory when it is
    /// missing. Default on.
    pub fn create_parent_dir(mut self, create: bool) -> Self {
        self.create_parent_dir = create;
        self
    }

    /// Whether to report the resolved file path once a config file was
    /// loaded. Default on.
    pub fn print_loaded_path(mut self, print: bool) -> Self {
        self.print_loaded_path = print;
        self
    }

    /// A read-only store never writes to disk, even when its in-memory
    /// values change. Default off.
    pub fn read_only(mut self, read_only: bool) -> Self {
        self.read_only = read_only;
        self
    }

    /// Registers a property. The configuration callback may set the
    /// prompt message and attach validators before the definition is
    /// sealed. Fails with [`Error::DuplicateProperty`] when the name is
    /// already taken; registration order is preserved.
    pub fn property(
        mut self,
        name: &str,
        required: bool,
        configure: impl FnOnce(&mut PropertyConstruction),
    ) -> Result<Self, Error> {
        if self.definitions.iter().any(|d| d.name() == name) {
            return Err(Error::DuplicateProperty(name.to_string()));
        }
        self.definitions
            .push(PropertyDefinition::new(name, required, configure));
        Ok(self)
    }

    /// Runs the reconciliation pass against the interactive terminal.
    pub fn build(self) -> Result<Properties, Error> {
        let mut terminal = TermConsole::new();
        self.build_with(&mut terminal)
    }

    /// Runs the reconciliation pass with an injected console.
    ///
    /// Per property, in registration order: a missing value is collected
    /// when the property is required; a present value is run through the
    /// validators and, on the first failure, either re-collected
    /// (required) or kept as-is when the user chooses to skip the
    /// optional property. Collected values are prompted for until one
    /// passes all validators. If anything changed and the store is not
    /// read-only, the whole store is written back.
    pub fn build_with(self, console: &mut dyn Console) -> Result<Properties, Error> {
        let path = self.resolve_path()?;
        let file = AtomicFile::new(&path);

        let mut store = Store::default();
        if let Some(contents) = file.read()? {
            store = format::parse(&contents);
            log::debug!(
                "loaded {} properties from {}",
                store.len(),
                path.display()
            );
            if self.print_loaded_path {
                let shown = path.canonicalize().unwrap_or_else(|_| path.clone());
                console.write_line(&format!("Loaded config file from {}", shown.display()));
            }
        }

        let mut edited = false;
        for definition in &self.definitions {
            let mut value_needed = false;
            match store.get(definition.name()) {
                None => value_needed = definition.required(),
                Some(current) => {
                    if let Some(message) = validator::first_failure(definition.validators(), current)
                    {
                        console.write_line(&format!(
                            "Loaded value for property {} was invalid:",
                            definition.name()
                        ));
                        console.write_line(&message);
                        console.write_line("");
                        if !Self::check_for_skip(definition, console)? {
                            value_needed = true;
                        }
                    }
                }
            }
            if value_needed {
                let value = Self::collect_valid_value(definition, console)?;
                store.set(definition.name(), &value);
                edited = true;
            }
        }

        if self.create_parent_dir {
            if let Some(parent) = path.parent() {
                if !parent.as_os_str().is_empty() && !parent.exists() {
                    std::fs::create_dir_all(parent)?;
                }
            }
        }

        let properties = Properties::new(Registry::seal(self.definitions), store, path, self.read_only);
        if edited && !self.read_only {
            properties.persist()?;
        }
        Ok(properties)
    }

    fn resolve_path(&self) -> Result<PathBuf, Error> {
        let default_dir = || -> Result<PathBuf, Error> {
            let home = dirs::home_dir().ok_or(Error::NoHomeDir)?;
            Ok(home.join(format!(".{}", self.program_name)))
        };
        match &self.path {
            PathSpec::Full(path) => Ok(path.clone()),
            PathSpec::FileName(name) => Ok(default_dir()?.join(name)),
            PathSpec::Default => Ok(default_dir()?.join("config.properties")),
        }
    }

    /// Offers to skip re-collecting an invalid optional property.
    /// Required properties can never be skipped.
    fn check_for_skip(
        definition: &PropertyDefinition,
        console: &mut dyn Console,
    ) -> Result<bool, Error> {
        if definition.required() {
            return Ok(false);
        }
        prompt::yes_no(
            console,
            &format!(
                "Property {} is optional. Would you like to skip it?",
                definition.name()
            ),
            false,
        )
    }

    /// Prompts until an input passes every validator; the accepted input
    /// is trimmed.
    fn collect_valid_value(
        definition: &PropertyDefinition,
        console: &mut dyn Console,
    ) -> Result<String, Error> {
        let mut message = definition.prompt().to_string();
        if !message.ends_with(':') {
            message.push(':');
        }
        loop {
            let input = prompt::value(console, &message)?;
            match validator::first_failure(definition.validators(), &input) {
                Some(failure) => console.write_line(&failure),
                None => return Ok(input),
            }
        }
    }
}
