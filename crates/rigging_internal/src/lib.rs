//! # Rigging Internal Library
//!
//! Re-exports the core Rigging crates for convenience.

/// Layer 1: plugin lifecycle and resources.
pub use rigging_system;

/// Layer 2: option descriptors and binding.
pub use rigging_options;

/// Layer 2: configuration definitions and materialization.
pub use rigging_config;

/// Layer 3: tracing and default plugin groups.
#[cfg(feature = "core_plugins")]
pub use rigging_core_plugins;

/// Re-export all common types for easy access.
pub mod prelude {
    pub use rigging_config::{
        Configuration, ConfigurationDef, ConfigurationError, DefinitionCatalog, ObjectRegistry,
        ObjectsPlugin, TypeResolver,
    };
    #[cfg(feature = "core_plugins")]
    pub use rigging_core_plugins::{DefaultPlugins, MinimalPlugins, TracingPlugin};
    pub use rigging_options::{Configurable, OptionValue, Options};
    pub use rigging_system::prelude::*;
}
