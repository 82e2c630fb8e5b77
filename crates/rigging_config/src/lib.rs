//! Declarative configuration definitions and their materialization.
//!
//! A [`ConfigurationDef`] names the objects an application needs, grouped
//! into slots, and the option assignments to apply to them. Identifiers are
//! resolved through a [`TypeResolver`] (normally the [`ObjectRegistry`]
//! published by [`ObjectsPlugin`]) and turned into a [`Configuration`], a
//! graph of live objects with their options set.
//!
//! ```
//! use rigging_config::{ConfigurationDef, ObjectRegistry};
//! use rigging_options::Options;
//!
//! #[derive(Default, Options)]
//! struct FileLogger {
//!     /// Minimum level written to the file.
//!     #[option(name = "log-level")]
//!     log_level: String,
//! }
//!
//! let mut registry = ObjectRegistry::new();
//! registry.register::<FileLogger>("pkg.FileLogger");
//!
//! let mut def = ConfigurationDef::new("test");
//! def.add_object("logger", "pkg.FileLogger")?;
//! def.add_option("log-level", "DEBUG")?;
//!
//! let mut usage = Vec::new();
//! def.print_command_usage(&registry, &mut usage)?;
//! assert!(String::from_utf8(usage).unwrap().contains("  logger options:\n"));
//!
//! let configuration = def.create_configuration(&registry)?;
//! assert_eq!(configuration.get::<FileLogger>("logger").unwrap().log_level, "DEBUG");
//! # Ok::<(), rigging_config::ConfigurationError>(())
//! ```
//!
//! # Modules
//!
//! - [`definition`] - slot registry and option log
//! - [`registry`] - object types, resolution and the registry plugin
//! - [`configuration`] - the materialized graph
//! - [`catalog`] - definitions by name
//! - [`error`] - error taxonomy

pub mod catalog;
pub mod configuration;
pub mod definition;
pub mod error;
mod materialize;
pub mod registry;
mod usage;

pub use catalog::DefinitionCatalog;
pub use configuration::Configuration;
pub use definition::{ConfigurationDef, OptionDef};
pub use error::{BoxedError, ConfigurationError};
pub use registry::{InstantiateError, ObjectRegistry, ObjectType, ObjectsPlugin, TypeResolver};
