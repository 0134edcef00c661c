//! Property definitions and the sealed registry.

use crate::error::Error;
use crate::validator::Validator;

/// A registered property: name, required flag, prompt text and the
/// ordered validators applied to every candidate value.
#[derive(Debug)]
pub struct PropertyDefinition {
    name: String,
    required: bool,
    prompt: String,
    validators: Vec<Validator>,
}

impl PropertyDefinition {
    pub(crate) fn new(
        name: &str,
        required: bool,
        configure: impl FnOnce(&mut PropertyConstruction),
    ) -> Self {
        let mut construction = PropertyConstruction {
            prompt: format!("Please input value for property \"{name}\""),
            validators: Vec::new(),
        };
        configure(&mut construction);
        Self {
            name: name.to_string(),
            required,
            prompt: construction.prompt,
            validators: construction.validators,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn required(&self) -> bool {
        self.required
    }

    pub(crate) fn prompt(&self) -> &str {
        &self.prompt
    }

    pub(crate) fn validators(&self) -> &[Validator] {
        &self.validators
    }
}

/// Construction handle passed to the configuration callback of
/// [`Builder::property`](crate::Builder::property). Customizations are
/// only possible here; the definition is immutable afterwards.
pub struct PropertyConstruction {
    prompt: String,
    validators: Vec<Validator>,
}

impl PropertyConstruction {
    /// Replaces the generated prompt message.
    pub fn prompt_message(&mut self, message: impl Into<String>) -> &mut Self {
        self.prompt = message.into();
        self
    }

    /// Appends a validator; validators run in the order they were added.
    pub fn validator(&mut self, validator: Validator) -> &mut Self {
        self.validators.push(validator);
        self
    }
}

/// The sealed, insertion-ordered collection of definitions.
///
/// Sealing consumes the builder's definition list, so nothing outside
/// the crate can reach a definition for mutation once registration has
/// closed. Duplicate names were already rejected at registration time.
#[derive(Debug)]
pub(crate) struct Registry {
    definitions: Vec<PropertyDefinition>,
}

impl Registry {
    pub(crate) fn seal(definitions: Vec<PropertyDefinition>) -> Self {
        Self { definitions }
    }

    pub(crate) fn lookup(&self, name: &str) -> Result<&PropertyDefinition, Error> {
        self.definitions
            .iter()
            .find(|definition| definition.name() == name)
            .ok_or_else(|| Error::UnknownProperty(name.to_string()))
    }
}
