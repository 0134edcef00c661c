//! Pluggable validation rules for property values.
//!
//! A [`Validator`] inspects a candidate value and produces a
//! [`Validation`] verdict. Validators must be pure with respect to the
//! store: they may look at the file system (the stock path validators
//! do) but never at other properties.

use std::path::Path;

/// Verdict of a single validator run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Validation {
    /// The input is acceptable.
    Valid,
    /// The input was rejected; the message is shown to the user.
    Invalid(String),
    /// The validator itself could not run (for example an I/O problem
    /// while checking a path). Treated as a rejection, not as a fatal
    /// error: the user is re-prompted or the edit call is refused.
    Failed(String),
}

/// A named validation rule.
///
/// The label only appears in diagnostics, in the
/// `Validator <label> failed to validate: <cause>` advisory produced for
/// a [`Validation::Failed`] verdict.
pub struct Validator {
    label: String,
    check: Box<dyn Fn(&str) -> Validation>,
}

impl Validator {
    /// Builds a validator from a plain check: `None` accepts the input,
    /// `Some(message)` rejects it.
    pub fn new<F>(label: impl Into<String>, check: F) -> Self
    where
        F: Fn(&str) -> Option<String> + 'static,
    {
        Self::with_verdict(label, move |input| match check(input) {
            None => Validation::Valid,
            Some(message) => Validation::Invalid(message),
        })
    }

    /// Builds a validator that can also report its own failure to run.
    pub fn with_verdict<F>(label: impl Into<String>, check: F) -> Self
    where
        F: Fn(&str) -> Validation + 'static,
    {
        Self {
            label: label.into(),
            check: Box::new(check),
        }
    }

    pub fn label(&self) -> &str {
        &self.label
    }

    pub fn validate(&self, input: &str) -> Validation {
        (self.check)(input)
    }
}

impl std::fmt::Debug for Validator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Validator")
            .field("label", &self.label)
            .finish_non_exhaustive()
    }
}

/// Runs validators in order and returns the first failure message, or
/// `None` when every validator accepts the input. Later validators are
/// not invoked once one fails.
pub(crate) fn first_failure(validators: &[Validator], input: &str) -> Option<String> {
    for validator in validators {
        match validator.validate(input) {
            Validation::Valid => {}
            Validation::Invalid(message) => return Some(message),
            Validation::Failed(cause) => {
                return Some(format!(
                    "Validator {} failed to validate: {}",
                    validator.label(),
                    cause
                ));
            }
        }
    }
    None
}

/// Rejects blank input.
pub fn not_empty() -> Validator {
    Validator::new("not_empty", |input| {
        if input.trim().is_empty() {
            Some("is empty".to_string())
        } else {
            None
        }
    })
}

/// Accepts only paths naming an existing regular file.
pub fn is_file() -> Validator {
    Validator::new("is_file", |input| {
        if !Path::new(input).is_file() {
            Some("not a file".to_string())
        } else {
            None
        }
    })
}

/// Accepts only paths naming an existing directory.
pub fn is_directory() -> Validator {
    Validator::new("is_directory", |input| {
        if !Path::new(input).is_dir() {
            Some("not a directory".to_string())
        } else {
            None
        }
    })
}

/// Accepts only paths that exist.
pub fn path_exists() -> Validator {
    Validator::new("path_exists", |input| {
        if !Path::new(input).exists() {
            Some("does not exist".to_string())
        } else {
            None
        }
    })
}

/// Accepts only paths whose parent directory exists.
pub fn parent_path_exists() -> Validator {
    Validator::new("parent_path_exists", |input| {
        match Path::new(input).parent() {
            None => Some("does not have a parent directory".to_string()),
            Some(parent) if parent.as_os_str().is_empty() => {
                Some("does not have a parent directory".to_string())
            }
            Some(parent) if !parent.exists() => {
                Some("parent directory does not exist".to_string())
            }
            Some(_) => None,
        }
    })
}
