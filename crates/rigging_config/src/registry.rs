//! Object type registry and plugin.
//!
//! The [`ObjectRegistry`] maps type identifiers (the strings used in a
//! definition's slots) to registered [`ObjectType`]s. It is the resolver and
//! the instantiator of the materializer: each `ObjectType` carries a
//! zero-argument factory and the option descriptions of its type.
//!
//! The [`ObjectsPlugin`] manages the registry lifecycle using the two-phase
//! initialization pattern (mutable during `build()`, promoted to a
//! `GlobalResource` in `ready()`).
//!
//! # Usage
//!
//! ```
//! use rigging_config::{ObjectRegistry, ObjectsPlugin};
//! use rigging_options::Options;
//! use rigging_system::plugin::{Plugin, PluginId};
//! use rigging_system::server::Server;
//!
//! #[derive(Default, Options)]
//! struct FileLogger {
//!     #[option(name = "log-level")]
//!     log_level: String,
//! }
//!
//! struct LoggingObjects;
//!
//! impl Plugin for LoggingObjects {
//!     fn dependencies(&self) -> Vec<PluginId> {
//!         vec![PluginId::of::<ObjectsPlugin>()]
//!     }
//!
//!     fn build(&self, server: &mut Server) {
//!         let mut registry = server
//!             .get_resource_mut::<ObjectRegistry>()
//!             .expect("ObjectsPlugin must be added first");
//!         registry.register::<FileLogger>("pkg.FileLogger");
//!     }
//! }
//!
//! let mut server = Server::new();
//! server.add_plugins(ObjectsPlugin).add_plugins(LoggingObjects);
//! server.finish();
//!
//! let registry = server.get_global::<ObjectRegistry>().unwrap();
//! assert!(registry.has("pkg.FileLogger"));
//! ```

use crate::error::BoxedError;
use indexmap::IndexMap;
use rigging_options::{Configurable, OptionInfo, Options, format_option_help, option_infos};
use rigging_system::plugin::Plugin;
use rigging_system::resource::GlobalResource;
use rigging_system::server::Server;
use thiserror::Error;

// ─────────────────────────────────────────────────────────────────────────────
// Resolution and instantiation
// ─────────────────────────────────────────────────────────────────────────────

/// Maps a type identifier to a registered type.
pub trait TypeResolver {
    /// Returns the type registered as `type_id`, if any.
    fn resolve(&self, type_id: &str) -> Option<&ObjectType>;
}

/// Why a registered type could not be instantiated.
#[derive(Debug, Error)]
pub enum InstantiateError {
    /// The type is abstract and has no factory.
    #[error("type is not constructible")]
    NotConstructible,

    /// The factory refuses to be called from here.
    #[error("constructor is not accessible")]
    Inaccessible,

    /// The factory ran and reported an error.
    #[error(transparent)]
    Failed(BoxedError),
}

impl InstantiateError {
    /// Creates a [`Failed`](Self::Failed) error.
    pub fn failed(error: impl Into<BoxedError>) -> Self {
        Self::Failed(error.into())
    }
}

type Factory = Box<dyn Fn() -> Result<Box<dyn Configurable>, InstantiateError> + Send + Sync>;

/// A registered object type: identifier, factory and option descriptions.
pub struct ObjectType {
    id: String,
    type_name: &'static str,
    options: Vec<OptionInfo>,
    factory: Option<Factory>,
}

impl ObjectType {
    /// Describes `T`, instantiated through `T::default()`.
    #[must_use]
    pub fn new<T: Options + Default>(id: impl Into<String>) -> Self {
        Self::with_factory(id, || Ok(T::default()))
    }

    /// Describes `T`, instantiated through `factory`.
    #[must_use]
    pub fn with_factory<T, F>(id: impl Into<String>, factory: F) -> Self
    where
        T: Options,
        F: Fn() -> Result<T, InstantiateError> + Send + Sync + 'static,
    {
        Self {
            id: id.into(),
            type_name: core::any::type_name::<T>(),
            options: option_infos::<T>(),
            factory: Some(Box::new(move || {
                factory().map(|object| Box::new(object) as Box<dyn Configurable>)
            })),
        }
    }

    /// Describes `T` without a factory.
    ///
    /// The type's options show up in usage text, but instantiating it fails
    /// with [`InstantiateError::NotConstructible`].
    #[must_use]
    pub fn abstract_type<T: Options>(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            type_name: core::any::type_name::<T>(),
            options: option_infos::<T>(),
            factory: None,
        }
    }

    /// Returns the registered identifier.
    #[must_use]
    pub fn id(&self) -> &str {
        &self.id
    }

    /// Returns the Rust type name.
    #[must_use]
    pub fn type_name(&self) -> &'static str {
        self.type_name
    }

    /// Returns the options the type declares.
    #[must_use]
    pub fn options(&self) -> &[OptionInfo] {
        &self.options
    }

    /// Returns `true` if the type has a factory.
    #[must_use]
    pub fn is_constructible(&self) -> bool {
        self.factory.is_some()
    }

    /// Creates a fresh instance.
    ///
    /// # Errors
    ///
    /// Returns the [`InstantiateError`] reported by the factory, or
    /// [`InstantiateError::NotConstructible`] for abstract types.
    pub fn instantiate(&self) -> Result<Box<dyn Configurable>, InstantiateError> {
        let factory = self
            .factory
            .as_ref()
            .ok_or(InstantiateError::NotConstructible)?;
        factory()
    }

    /// Returns the help text for the type's options (empty if it has none).
    #[must_use]
    pub fn option_help(&self) -> String {
        format_option_help(&self.options)
    }
}

impl core::fmt::Debug for ObjectType {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("ObjectType")
            .field("id", &self.id)
            .field("type_name", &self.type_name)
            .field("options", &self.options.len())
            .field("constructible", &self.is_constructible())
            .finish()
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Registry
// ─────────────────────────────────────────────────────────────────────────────

/// Registry of object types, keyed by identifier in registration order.
#[derive(Default)]
pub struct ObjectRegistry {
    types: IndexMap<String, ObjectType>,
}

impl core::fmt::Debug for ObjectRegistry {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("ObjectRegistry")
            .field("types", &self.ids())
            .finish()
    }
}

impl GlobalResource for ObjectRegistry {}

impl ObjectRegistry {
    /// Creates an empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self {
            types: IndexMap::new(),
        }
    }

    /// Registers `T` under `id`, instantiated through `T::default()`.
    ///
    /// # Panics
    ///
    /// Panics if `id` is already registered.
    pub fn register<T: Options + Default>(&mut self, id: impl Into<String>) {
        self.insert(ObjectType::new::<T>(id));
    }

    /// Registers `T` under `id`, instantiated through `factory`.
    ///
    /// # Panics
    ///
    /// Panics if `id` is already registered.
    pub fn register_with<T, F>(&mut self, id: impl Into<String>, factory: F)
    where
        T: Options,
        F: Fn() -> Result<T, InstantiateError> + Send + Sync + 'static,
    {
        self.insert(ObjectType::with_factory(id, factory));
    }

    /// Registers `T` under `id` without a factory.
    ///
    /// # Panics
    ///
    /// Panics if `id` is already registered.
    pub fn register_abstract<T: Options>(&mut self, id: impl Into<String>) {
        self.insert(ObjectType::abstract_type::<T>(id));
    }

    /// Registers a prepared [`ObjectType`].
    ///
    /// # Panics
    ///
    /// Panics if its identifier is already registered.
    pub fn insert(&mut self, object_type: ObjectType) {
        let id = object_type.id.clone();
        assert!(
            !self.types.contains_key(&id),
            "Object type '{id}' is already registered"
        );
        tracing::debug!(id = %id, type_name = object_type.type_name, "object type registered");
        self.types.insert(id, object_type);
    }

    /// Returns the type registered as `id`.
    #[must_use]
    pub fn get(&self, id: &str) -> Option<&ObjectType> {
        self.types.get(id)
    }

    /// Returns whether `id` is registered.
    #[must_use]
    pub fn has(&self, id: &str) -> bool {
        self.types.contains_key(id)
    }

    /// Returns the registered identifiers in registration order.
    #[must_use]
    pub fn ids(&self) -> Vec<&str> {
        self.types.keys().map(String::as_str).collect()
    }

    /// Returns the number of registered types.
    #[must_use]
    pub fn len(&self) -> usize {
        self.types.len()
    }

    /// Returns `true` if nothing is registered.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.types.is_empty()
    }
}

impl TypeResolver for ObjectRegistry {
    fn resolve(&self, type_id: &str) -> Option<&ObjectType> {
        self.get(type_id)
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Plugin
// ─────────────────────────────────────────────────────────────────────────────

/// Plugin that provides the [`ObjectRegistry`] global resource.
///
/// Plugins registering object types must list `ObjectsPlugin` in their
/// dependencies and register during `build()`.
#[derive(Debug, Default, Clone, Copy)]
pub struct ObjectsPlugin;

impl Plugin for ObjectsPlugin {
    fn build(&self, server: &mut Server) {
        server.insert_resource(ObjectRegistry::new());
    }

    fn ready(&self, server: &mut Server) {
        let registry = server
            .remove_resource::<ObjectRegistry>()
            .expect("ObjectRegistry should exist from build phase");
        tracing::debug!(types = registry.len(), "object registry frozen");
        server.insert_global(registry);
    }
}
