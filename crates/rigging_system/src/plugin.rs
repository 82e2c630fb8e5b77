//! Plugin system.
//!
//! Plugins are how object types, logging and application wiring get into a
//! [`Server`]. A plugin registers its resources in [`Plugin::build`], may
//! finalize them in [`Plugin::ready`] and releases them in
//! [`Plugin::cleanup`].
//!
//! # Example
//!
//! ```
//! use rigging_system::plugin::{Plugin, PluginId};
//! use rigging_system::server::Server;
//!
//! struct LoggingPlugin;
//! impl Plugin for LoggingPlugin {
//!     fn build(&self, _server: &mut Server) {}
//! }
//!
//! struct Greeting(String);
//!
//! struct GreetingPlugin {
//!     text: String,
//! }
//!
//! impl Plugin for GreetingPlugin {
//!     fn build(&self, server: &mut Server) {
//!         server.insert_resource(Greeting(self.text.clone()));
//!     }
//!
//!     fn dependencies(&self) -> Vec<PluginId> {
//!         vec![PluginId::of::<LoggingPlugin>()]
//!     }
//! }
//!
//! let mut server = Server::new();
//! server
//!     .add_plugins(LoggingPlugin)
//!     .add_plugins(GreetingPlugin { text: "hello".into() });
//! server.finish();
//! ```

use core::any::TypeId;

use crate::server::Server;

// ─────────────────────────────────────────────────────────────────────────────
// PluginId
// ─────────────────────────────────────────────────────────────────────────────

/// Identity of a plugin type, used to order plugins and reject duplicates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct PluginId {
    type_id: TypeId,
    type_name: &'static str,
}

impl PluginId {
    /// Identity of `P`.
    #[must_use]
    pub fn of<P: Plugin>() -> Self {
        Self {
            type_id: TypeId::of::<P>(),
            type_name: core::any::type_name::<P>(),
        }
    }

    /// `TypeId` of the plugin type.
    #[must_use]
    pub fn type_id(&self) -> TypeId {
        self.type_id
    }

    /// Returns the type name for diagnostics.
    #[must_use]
    pub fn type_name(&self) -> &'static str {
        self.type_name
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Plugin Trait
// ─────────────────────────────────────────────────────────────────────────────

/// A unit of server functionality.
///
/// The server drives every plugin through the same lifecycle:
///
/// 1. **Build** - `build()` in dependency order
/// 2. **Ready** - `ready()` in dependency order, after every plugin is built
/// 3. **Cleanup** - `cleanup()` in reverse dependency order
///
/// The build/ready split is what lets registries be filled by many plugins
/// and then frozen: a registry lives as a mutable resource while plugins
/// build, and its owner promotes it to a read-only global in `ready()`.
pub trait Plugin: Send + Sync + 'static {
    /// Configures the server. Called once, in dependency order.
    fn build(&self, server: &mut Server);

    /// Called after every plugin has been built.
    ///
    /// Use this to freeze registries and validate that required resources
    /// exist.
    fn ready(&self, _server: &mut Server) {}

    /// Called when the server shuts down, dependents first.
    fn cleanup(&self, _server: &mut Server) {}

    /// Name used in logs and panic messages; the type name unless overridden.
    fn name(&self) -> &str {
        core::any::type_name::<Self>()
    }

    /// Plugins that must be built before this one.
    ///
    /// [`Server::finish`] panics if any of them was never added.
    fn dependencies(&self) -> Vec<PluginId> {
        Vec::new()
    }

    /// Whether this plugin type may be added only once.
    ///
    /// Defaults to `true`; adding a unique plugin twice panics.
    fn is_unique(&self) -> bool {
        true
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Plugins
// ─────────────────────────────────────────────────────────────────────────────

/// Types that can be handed to [`Server::add_plugins`].
///
/// Implemented for every [`Plugin`] and for [`PluginGroupBuilder`].
pub trait Plugins {
    /// Hands every contained plugin to `server`.
    fn add_to_server(self, server: &mut Server);
}

impl<P: Plugin> Plugins for P {
    fn add_to_server(self, server: &mut Server) {
        server.add_plugin_boxed(PluginId::of::<P>(), Box::new(self));
    }
}

impl Plugins for PluginGroupBuilder {
    fn add_to_server(self, server: &mut Server) {
        for BoxedPlugin { id, plugin } in self.plugins {
            server.add_plugin_boxed(id, plugin);
        }
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// PluginGroup
// ─────────────────────────────────────────────────────────────────────────────

/// A bundle of plugins added together.
///
/// ```
/// use rigging_system::plugin::{Plugin, PluginGroup, PluginGroupBuilder};
/// use rigging_system::server::Server;
///
/// struct A;
/// impl Plugin for A {
///     fn build(&self, _server: &mut Server) {}
/// }
///
/// struct Bundle;
/// impl PluginGroup for Bundle {
///     fn build(self) -> PluginGroupBuilder {
///         PluginGroupBuilder::new().add(A)
///     }
/// }
///
/// let mut server = Server::new();
/// server.add_plugins(Bundle.build());
/// server.finish();
/// ```
pub trait PluginGroup {
    /// Collects the group's members.
    fn build(self) -> PluginGroupBuilder;
}

/// A boxed plugin with the [`PluginId`] captured before type erasure.
pub(crate) struct BoxedPlugin {
    pub(crate) id: PluginId,
    pub(crate) plugin: Box<dyn Plugin>,
}

/// Ordered, editable list of plugins produced by a [`PluginGroup`].
#[derive(Default)]
pub struct PluginGroupBuilder {
    pub(crate) plugins: Vec<BoxedPlugin>,
}

impl PluginGroupBuilder {
    /// Creates an empty group.
    #[must_use]
    pub fn new() -> Self {
        Self {
            plugins: Vec::new(),
        }
    }

    /// Appends a plugin to the group.
    #[must_use]
    #[expect(
        clippy::should_implement_trait,
        reason = "This is a builder method, not std::ops::Add"
    )]
    pub fn add<P: Plugin>(mut self, plugin: P) -> Self {
        self.plugins.push(BoxedPlugin {
            id: PluginId::of::<P>(),
            plugin: Box::new(plugin),
        });
        self
    }

    /// Removes every plugin of type `P` from the group. No-op if absent.
    #[must_use]
    pub fn disable<P: Plugin>(mut self) -> Self {
        let id = PluginId::of::<P>();
        self.plugins.retain(|p| p.id != id);
        self
    }

    /// Returns `true` if the group holds a plugin of type `P`.
    #[must_use]
    pub fn contains<P: Plugin>(&self) -> bool {
        let id = PluginId::of::<P>();
        self.plugins.iter().any(|p| p.id == id)
    }

    /// Number of members.
    #[must_use]
    pub fn len(&self) -> usize {
        self.plugins.len()
    }

    /// `true` when the group has no members.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.plugins.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Registry;
    impl Plugin for Registry {
        fn build(&self, _server: &mut Server) {}
    }

    struct Registrar;
    impl Plugin for Registrar {
        fn build(&self, _server: &mut Server) {}
        fn dependencies(&self) -> Vec<PluginId> {
            vec![PluginId::of::<Registry>()]
        }
    }

    #[test]
    fn ids_compare_by_type() {
        assert_eq!(PluginId::of::<Registry>(), PluginId::of::<Registry>());
        assert_ne!(PluginId::of::<Registry>(), PluginId::of::<Registrar>());
        assert_eq!(PluginId::of::<Registry>().type_id(), TypeId::of::<Registry>());
    }

    #[test]
    fn default_name_and_uniqueness() {
        let plugin = Registry;
        assert!(plugin.name().contains("Registry"));
        assert!(plugin.is_unique());
        assert!(plugin.dependencies().is_empty());
    }

    #[test]
    fn dependencies_name_their_plugin() {
        let deps = Registrar.dependencies();
        assert_eq!(deps, vec![PluginId::of::<Registry>()]);
        assert!(deps[0].type_name().contains("Registry"));
    }

    #[test]
    fn disabling_removes_group_member() {
        let builder = PluginGroupBuilder::new().add(Registry).add(Registrar);
        assert_eq!(builder.len(), 2);
        assert!(builder.contains::<Registry>());

        let builder = builder.disable::<Registry>();
        assert_eq!(builder.len(), 1);
        assert!(!builder.contains::<Registry>());
        assert!(builder.contains::<Registrar>());
    }

    #[test]
    fn disabling_absent_member_keeps_group() {
        let builder = PluginGroupBuilder::new().add(Registry).disable::<Registrar>();
        assert_eq!(builder.len(), 1);
    }

    #[test]
    fn new_group_is_empty() {
        let builder = PluginGroupBuilder::new();
        assert!(builder.is_empty());
        assert_eq!(builder.len(), 0);
    }
}
