//! Option declaration and binding for configurable objects.
//!
//! A type becomes configurable by declaring its options, normally with
//! `#[derive(Options)]`. Each option has a name, a description taken from
//! the field's doc comment, and a value type parsed from text.
//!
//! ```
//! use rigging_options::{Configurable, Options, option_help};
//!
//! #[derive(Default, Options)]
//! struct FileLogger {
//!     /// Minimum level written to the file.
//!     #[option(name = "log-level")]
//!     log_level: String,
//! }
//!
//! let mut logger = FileLogger::default();
//! logger.set_option("log-level", "DEBUG").unwrap();
//! assert_eq!(logger.log_level, "DEBUG");
//!
//! assert!(option_help::<FileLogger>().contains("--log-level string"));
//! ```
//!
//! # Modules
//!
//! - [`value`] - parsing textual values into option fields
//! - [`spec`] - option descriptors and the [`Configurable`] object view
//! - [`binder`] - applying assignments to a set of objects
//! - [`help`] - help text for declared options

extern crate self as rigging_options;

pub mod binder;
pub mod help;
pub mod spec;
pub mod value;

pub use binder::{BindError, OptionBinder};
pub use help::{format_option_help, option_help};
pub use options_macros::Options;
pub use spec::{Configurable, OptionInfo, OptionSetter, OptionSpec, Options, option_infos};
pub use value::{OptionValue, ScalarValue};
