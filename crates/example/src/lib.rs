//! Example services configured with Rigging.
//!
//! A handful of demo objects (loggers, a store, an HTTP front end) are
//! registered by [`DemoObjectsPlugin`], and [`demo_catalog`] describes a few
//! configurations built from them. The `rig` binary lists, documents and
//! materializes those configurations.
//!
//! ```
//! use example::{DemoObjectsPlugin, FileLogger, LogLevel, demo_catalog};
//! use rigging_config::ObjectRegistry;
//! use rigging_core_plugins::MinimalPlugins;
//! use rigging_system::plugin::PluginGroup;
//! use rigging_system::server::Server;
//!
//! let mut server = Server::new();
//! server.add_plugins(MinimalPlugins.build()).add_plugins(DemoObjectsPlugin);
//! server.finish();
//!
//! let catalog = demo_catalog()?;
//! let registry = server.get_global::<ObjectRegistry>().unwrap();
//! let configuration = catalog.get("test").unwrap().create_configuration(&*registry)?;
//!
//! let logger = configuration.get::<FileLogger>("logger").unwrap();
//! assert_eq!(logger.log_level, LogLevel::Debug);
//! # Ok::<(), rigging_config::ConfigurationError>(())
//! ```

mod objects;

pub use objects::{
    AuditSink, ConsoleLogger, FileLogger, HttpServer, LogLevel, MemoryStore, SystemClock,
};

use rigging_config::{
    Configuration, ConfigurationDef, ConfigurationError, DefinitionCatalog, ObjectRegistry,
    ObjectsPlugin,
};
use rigging_options::Configurable;
use rigging_system::plugin::{Plugin, PluginId};
use rigging_system::server::Server;

/// Registers the demo object types.
pub fn register_demo_objects(registry: &mut ObjectRegistry) {
    registry.register::<FileLogger>("pkg.FileLogger");
    registry.register::<ConsoleLogger>("pkg.ConsoleLogger");
    registry.register_with("kv.MemoryStore", MemoryStore::create);
    registry.register::<HttpServer>("net.HttpServer");
    registry.register::<SystemClock>("sys.Clock");
    registry.register_abstract::<AuditSink>("audit.Sink");
}

/// Plugin registering the demo object types and publishing
/// [`demo_catalog`] as a global [`DefinitionCatalog`].
#[derive(Debug, Default, Clone, Copy)]
pub struct DemoObjectsPlugin;

impl Plugin for DemoObjectsPlugin {
    fn dependencies(&self) -> Vec<PluginId> {
        vec![PluginId::of::<ObjectsPlugin>()]
    }

    fn build(&self, server: &mut Server) {
        let mut registry = server
            .get_resource_mut::<ObjectRegistry>()
            .expect("ObjectsPlugin must be added first");
        register_demo_objects(&mut registry);
        drop(registry);

        server.insert_global(demo_catalog().expect("demo definitions are well-formed"));
    }
}

/// Copies `definition` and appends `assignments` to the copy's option log.
///
/// Definitions published in a catalog are shared read-only, so extra
/// assignments go to a fresh, unfrozen definition of the same name.
///
/// # Errors
///
/// Never fails in practice; the copy is new and therefore mutable.
pub fn with_assignments<'a>(
    definition: &ConfigurationDef,
    assignments: impl IntoIterator<Item = (&'a str, &'a str)>,
) -> Result<ConfigurationDef, ConfigurationError> {
    let mut copy = ConfigurationDef::new(definition.name());
    copy.set_description(definition.description())?;
    for (slot, type_ids) in definition.objects() {
        for type_id in type_ids {
            copy.add_object(slot.as_str(), type_id.as_str())?;
        }
    }
    for option in definition.options() {
        copy.add_option(option.name(), option.value())?;
    }
    for (name, value) in assignments {
        copy.add_option(name, value)?;
    }
    Ok(copy)
}

/// Builds the catalog of demo configurations.
///
/// - `test` - a file logger at debug level
/// - `service` - two loggers, a store, a clock and an HTTP front end
/// - `audited` - adds an audit sink, which has no factory and fails to run
///
/// # Errors
///
/// Returns [`ConfigurationError`] if the catalog cannot be assembled.
pub fn demo_catalog() -> Result<DefinitionCatalog, ConfigurationError> {
    let mut catalog = DefinitionCatalog::new();

    let mut test = ConfigurationDef::new("test");
    test.set_description("Single file logger at debug level.")?;
    test.add_object("logger", "pkg.FileLogger")?;
    test.add_option("log-level", "DEBUG")?;
    catalog.insert(test)?;

    let mut service = ConfigurationDef::new("service");
    service.set_description("HTTP service with logging and an in-memory store.")?;
    service.add_object("logger", "pkg.FileLogger")?;
    service.add_object("logger", "pkg.ConsoleLogger")?;
    service.add_object("store", "kv.MemoryStore")?;
    service.add_object("clock", "sys.Clock")?;
    service.add_object("http", "net.HttpServer")?;
    service.add_option("log-level", "INFO")?;
    service.add_option("path", "/var/log/service.log")?;
    service.add_option("tag", "service")?;
    service.add_option("capacity", "4096")?;
    service.add_option("port", "8443")?;
    catalog.insert(service)?;

    let mut audited = ConfigurationDef::new("audited");
    audited.set_description("Service variant with an audit sink.")?;
    audited.add_object("logger", "pkg.ConsoleLogger")?;
    audited.add_object("audit", "audit.Sink")?;
    audited.add_option("retention-days", "30")?;
    catalog.insert(audited)?;

    Ok(catalog)
}

/// Renders one line per materialized object, grouped by slot.
#[must_use]
pub fn describe(configuration: &Configuration) -> String {
    let mut text = String::new();
    text.push_str(&format!(
        "'{}' materialized with {} object(s):\n",
        configuration.name(),
        configuration.len()
    ));
    for (slot, object) in configuration.iter() {
        text.push_str(&format!("  {slot}: {}\n", describe_object(object)));
    }
    text
}

fn describe_object(object: &dyn Configurable) -> String {
    if let Some(logger) = object.downcast_ref::<FileLogger>() {
        format!("{logger:?}")
    } else if let Some(logger) = object.downcast_ref::<ConsoleLogger>() {
        format!("{logger:?}")
    } else if let Some(store) = object.downcast_ref::<MemoryStore>() {
        format!("{store:?}")
    } else if let Some(server) = object.downcast_ref::<HttpServer>() {
        format!("{server:?}")
    } else {
        object.object_type().to_string()
    }
}
