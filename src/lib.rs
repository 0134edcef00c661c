//! Interactive `.properties` loader.
//!
//! A [`Builder`] registers named properties (required flag, prompt text,
//! validators), then reconciles them against a flat `key=value` file:
//! missing or invalid values are collected from the user on the console,
//! validated, and written back. The resulting [`Properties`] store
//! supports transactional batch edits that persist atomically.
//!
//! # Example
//!
//! ```rust,no_run
//! use askprops::{validator, Properties};
//!
//! fn main() -> Result<(), askprops::Error> {
//!     let mut properties = Properties::builder("myapp")
//!         .property("token", true, |p| {
//!             p.prompt_message("Enter the API token")
//!                 .validator(validator::not_empty());
//!         })?
//!         .property("cache_dir", false, |p| {
//!             p.validator(validator::is_directory());
//!         })?
//!         .build()?;
//!
//!     println!("token = {}", properties.get("token")?);
//!     println!("cache = {}", properties.get_or("cache_dir", "/tmp")?);
//!
//!     let outcome = properties.edit(|_current, edit| {
//!         edit.set_property("token", "refreshed")?.ok();
//!         Ok(())
//!     });
//!     if let Err(failure) = outcome {
//!         eprintln!("edit failed: {failure}");
//!     }
//!     Ok(())
//! }
//! ```

pub mod builder;
pub mod edit;
pub mod error;
pub mod prompt;
pub mod properties;
pub mod registry;
pub mod validator;

mod atomic;
mod format;
mod store;

pub use builder::Builder;
pub use prompt::{Console, TermConsole};
pub use edit::{Edit, EditError, EditResult, View};
pub use error::Error;
pub use properties::Properties;
pub use registry::{PropertyConstruction, PropertyDefinition};
pub use validator::{Validation, Validator};
