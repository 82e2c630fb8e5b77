//! Declarative configuration materialized into live, option-bound objects.
//!
//! ```
//! use rigging::prelude::*;
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
//! let configuration = def.create_configuration(&registry)?;
//! assert_eq!(configuration.get::<FileLogger>("logger").unwrap().log_level, "DEBUG");
//! # Ok::<(), ConfigurationError>(())
//! ```

pub use rigging_internal::*;

/// Re-export all common types for easy access.
pub mod prelude {
    pub use rigging_internal::prelude::*;
}
