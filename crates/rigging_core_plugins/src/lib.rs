//! Core infrastructure plugins for Rigging.
//!
//! - [`TracingPlugin`] - Logging via the `tracing` crate
//! - [`DefaultPlugins`] - Tracing plus the object registry
//! - [`MinimalPlugins`] - The object registry only, for tests
//!
//! # Example
//!
//! ```
//! use rigging_config::ObjectRegistry;
//! use rigging_core_plugins::MinimalPlugins;
//! use rigging_system::plugin::PluginGroup;
//! use rigging_system::server::Server;
//!
//! let mut server = Server::new();
//! server.add_plugins(MinimalPlugins.build());
//! server.finish();
//!
//! assert!(server.contains_global::<ObjectRegistry>());
//! ```
//!
//! # Architecture
//!
//! This crate is part of Layer 3:
//!
//! - **Layer 1** (`rigging_system`): plugin lifecycle and resources
//! - **Layer 2** (`rigging_options`, `rigging_config`): options and materialization
//! - **Layer 3** (plugins): infrastructure and applications

mod tracing_plugin;

pub use tracing_plugin::{
    LOG_ENV_VAR, ParseFormatError, TracingConfig, TracingFormat, TracingPlugin,
};

use rigging_config::ObjectsPlugin;
use rigging_system::plugin::{PluginGroup, PluginGroupBuilder};

/// Default plugins for most Rigging applications.
///
/// Includes:
/// - [`TracingPlugin`] - Logging
/// - [`ObjectsPlugin`] - The object type registry
///
/// # Customization
///
/// ```
/// use rigging_core_plugins::{DefaultPlugins, TracingPlugin};
/// use rigging_system::plugin::PluginGroup;
///
/// let plugins = DefaultPlugins.build().disable::<TracingPlugin>();
/// assert_eq!(plugins.len(), 1);
/// ```
pub struct DefaultPlugins;

impl PluginGroup for DefaultPlugins {
    fn build(self) -> PluginGroupBuilder {
        PluginGroupBuilder::new()
            .add(TracingPlugin::default())
            .add(ObjectsPlugin)
    }
}

/// Minimal plugins for headless or testing scenarios.
///
/// Includes only [`ObjectsPlugin`]; no subscriber is installed.
pub struct MinimalPlugins;

impl PluginGroup for MinimalPlugins {
    fn build(self) -> PluginGroupBuilder {
        PluginGroupBuilder::new().add(ObjectsPlugin)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rigging_config::ObjectRegistry;
    use rigging_system::server::Server;

    #[test]
    fn default_plugins_builds() {
        let builder = DefaultPlugins.build();
        assert_eq!(builder.len(), 2);
        assert!(builder.contains::<TracingPlugin>());
    }

    #[test]
    fn minimal_plugins_builds() {
        let builder = MinimalPlugins.build();
        assert_eq!(builder.len(), 1);
        assert!(!builder.contains::<TracingPlugin>());
    }

    #[test]
    fn server_with_minimal_plugins() {
        let mut server = Server::new();
        server.add_plugins(MinimalPlugins.build());
        server.finish();

        assert!(server.contains_global::<ObjectRegistry>());
        assert!(!server.contains_global::<TracingConfig>());
    }
}
