//! Integration tests for the demo configurations.

use example::{
    ConsoleLogger, DemoObjectsPlugin, FileLogger, HttpServer, LogLevel, MemoryStore, demo_catalog,
    describe, with_assignments,
};
use rigging_config::{ConfigurationError, DefinitionCatalog, ObjectRegistry};
use rigging_core_plugins::MinimalPlugins;
use rigging_system::plugin::PluginGroup;
use rigging_system::server::Server;
use std::path::PathBuf;

fn server() -> Server {
    let mut server = Server::new();
    server
        .add_plugins(MinimalPlugins.build())
        .add_plugins(DemoObjectsPlugin);
    server.finish();
    server
}

#[test]
fn catalog_lists_demo_configurations() {
    let catalog = demo_catalog().unwrap();
    assert_eq!(catalog.names(), ["test", "service", "audited"]);

    let mut out = Vec::new();
    catalog.print_summary(&mut out).unwrap();
    let summary = String::from_utf8(out).unwrap();
    assert!(summary.starts_with("  test: Single file logger at debug level.\n"));
}

#[test]
fn test_configuration_has_one_debug_logger() {
    let server = server();
    let registry = server.get_global::<ObjectRegistry>().unwrap();
    let catalog = demo_catalog().unwrap();

    let configuration = catalog
        .get("test")
        .unwrap()
        .create_configuration(&*registry)
        .unwrap();

    assert_eq!(configuration.objects("logger").len(), 1);
    assert_eq!(
        configuration.get::<FileLogger>("logger").unwrap().log_level,
        LogLevel::Debug
    );
}

#[test]
fn service_configuration_binds_every_object() {
    let server = server();
    let registry = server.get_global::<ObjectRegistry>().unwrap();
    let catalog = demo_catalog().unwrap();

    let configuration = catalog
        .get("service")
        .unwrap()
        .create_configuration(&*registry)
        .unwrap();

    let file = configuration.get::<FileLogger>("logger").unwrap();
    assert_eq!(file.log_level, LogLevel::Info);
    assert_eq!(file.path, Some(PathBuf::from("/var/log/service.log")));
    assert_eq!(file.tags, ["service"]);

    let console = configuration.get::<ConsoleLogger>("logger").unwrap();
    assert_eq!(console.log_level, LogLevel::Info);
    assert!(!console.color);

    assert_eq!(configuration.get::<MemoryStore>("store").unwrap().capacity, 4096);
    let http = configuration.get::<HttpServer>("http").unwrap();
    assert_eq!((http.bind.as_str(), http.port), ("127.0.0.1", 8443));

    let description = describe(&configuration);
    assert!(description.starts_with("'service' materialized with 5 object(s):\n"));
    assert!(description.contains("  clock: "));
}

#[test]
fn extra_assignments_apply_after_defined_ones() {
    let server = server();
    let registry = server.get_global::<ObjectRegistry>().unwrap();
    let mut catalog = demo_catalog().unwrap();

    let definition = catalog.get_mut("service").unwrap();
    definition.add_option("port", "9000").unwrap();
    definition.add_option("tag", "canary").unwrap();
    let configuration = definition.create_configuration(&*registry).unwrap();

    assert_eq!(configuration.get::<HttpServer>("http").unwrap().port, 9000);
    assert_eq!(
        configuration.get::<FileLogger>("logger").unwrap().tags,
        ["service", "canary"]
    );
}

#[test]
fn audited_configuration_documents_but_does_not_run() {
    let server = server();
    let registry = server.get_global::<ObjectRegistry>().unwrap();
    let catalog = demo_catalog().unwrap();
    let definition = catalog.get("audited").unwrap();

    let mut out = Vec::new();
    definition.print_command_usage(&*registry, &mut out).unwrap();
    let usage = String::from_utf8(out).unwrap();
    assert!(usage.contains("  audit options:\n    --retention-days integer  Retention in days.\n"));

    let err = definition.create_configuration(&*registry).unwrap_err();
    assert!(matches!(
        err,
        ConfigurationError::NotConstructible { ref slot, ref type_id }
            if slot == "audit" && type_id == "audit.Sink"
    ));
}

#[test]
fn usage_lists_logger_options_with_custom_type() {
    let server = server();
    let registry = server.get_global::<ObjectRegistry>().unwrap();
    let catalog = demo_catalog().unwrap();

    let usage = catalog
        .get("test")
        .unwrap()
        .command_usage(&*registry)
        .unwrap();

    assert_eq!(
        usage,
        "'test' configuration: Single file logger at debug level.\n\
         \n  logger options:\n\
         \x20   --log-level level  Minimum level written to the file.\n\
         \x20   --path path        Destination file.\n\
         \x20   --tag string...    Tags attached to every line.\n\
         \n"
    );
}

#[test]
fn plugin_publishes_catalog_and_copies_stay_mutable() {
    let server = server();
    let registry = server.get_global::<ObjectRegistry>().unwrap();
    let catalog = server.get_global::<DefinitionCatalog>().unwrap();
    assert_eq!(catalog.names(), ["test", "service", "audited"]);

    let published = catalog.get("test").unwrap();
    published.command_usage(&*registry).unwrap();
    assert!(published.is_frozen());

    let copy = with_assignments(published, [("path", "/tmp/test.log")]).unwrap();
    assert!(!copy.is_frozen());
    assert_eq!(copy.description(), published.description());
    assert_eq!(copy.objects(), published.objects());
    assert_eq!(copy.options().len(), published.options().len() + 1);

    let configuration = copy.create_configuration(&*registry).unwrap();
    let logger = configuration.get::<FileLogger>("logger").unwrap();
    assert_eq!(logger.log_level, LogLevel::Debug);
    assert_eq!(logger.path, Some(PathBuf::from("/tmp/test.log")));
    assert_eq!(published.options().len(), 1);
}
