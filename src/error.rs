use thiserror::Error;

/// Fatal errors: programmer misuse or an unusable environment.
///
/// Recoverable conditions inside a transaction are reported through
/// [`EditError`](crate::EditError) instead, so that a caller can inspect
/// them and keep going. Anything surfacing here is not meant to be
/// handled at the call site.
#[derive(Debug, Error)]
pub enum Error {
    #[error("I/O: {0}")]
    Io(#[from] std::io::Error),

    /// A property with this name was already registered on the builder.
    #[error("a property named \"{0}\" has already been added to this builder")]
    DuplicateProperty(String),

    /// Lookup of a name that was never registered.
    ///
    /// Inside [`edit`](crate::Properties::edit) this aborts the whole
    /// transaction when propagated with `?`, unlike validation failures
    /// which are per-call [`EditError`](crate::EditError)s.
    #[error("unknown property: \"{0}\"")]
    UnknownProperty(String),

    /// The property is registered but holds no value.
    #[error("property \"{0}\" does not have a value")]
    MissingValue(String),

    /// The store was configured read-only and refuses to persist.
    #[error("the property store is read-only")]
    ReadOnly,

    /// Neither the terminal nor standard input produced a line.
    #[error("could not find a way to read user input")]
    NoInput,

    #[error("could not resolve the user home directory")]
    NoHomeDir,
}
