//! Integration tests for usage rendering.

use rigging_config::{ConfigurationDef, ConfigurationError, ObjectRegistry};
use rigging_options::Options;

#[derive(Default, Options)]
struct FileLogger {
    /// Minimum level written to the file.
    #[option(name = "log-level")]
    log_level: String,

    /// Tags attached to every line.
    #[option(name = "tag")]
    tags: Vec<String>,
}

#[derive(Default, Options)]
struct Metrics {
    /// Port to expose metrics on.
    #[option]
    port: u16,
}

#[derive(Default, Options)]
struct Clock {}

fn registry() -> ObjectRegistry {
    let mut registry = ObjectRegistry::new();
    registry.register::<FileLogger>("pkg.FileLogger");
    registry.register::<Metrics>("pkg.Metrics");
    registry.register::<Clock>("pkg.Clock");
    registry.register_abstract::<Metrics>("pkg.AbstractMetrics");
    registry
}

fn render(def: &ConfigurationDef) -> Result<String, ConfigurationError> {
    let mut out = Vec::new();
    def.print_command_usage(&registry(), &mut out)?;
    Ok(String::from_utf8(out).unwrap())
}

#[test]
fn empty_definition_prints_header_only() {
    let mut def = ConfigurationDef::new("empty");
    def.set_description("Nothing configured.").unwrap();

    assert_eq!(render(&def).unwrap(), "'empty' configuration: Nothing configured.\n\n");
}

#[test]
fn types_without_options_print_nothing() {
    let mut def = ConfigurationDef::new("clock");
    def.add_object("clock", "pkg.Clock").unwrap();

    assert_eq!(render(&def).unwrap(), "'clock' configuration: \n\n");
}

#[test]
fn every_type_gets_its_own_section() {
    let mut def = ConfigurationDef::new("service");
    def.set_description("A small service.").unwrap();
    def.add_object("logger", "pkg.FileLogger").unwrap();
    def.add_object("clock", "pkg.Clock").unwrap();
    def.add_object("metrics", "pkg.Metrics").unwrap();
    def.add_object("metrics", "pkg.AbstractMetrics").unwrap();

    let expected = "\
'service' configuration: A small service.

  logger options:
    --log-level string  Minimum level written to the file.
    --tag string...     Tags attached to every line.

  metrics options:
    --port integer  Port to expose metrics on.

  metrics options:
    --port integer  Port to expose metrics on.

";
    assert_eq!(render(&def).unwrap(), expected);
}

#[test]
fn unresolvable_identifier_writes_nothing() {
    let mut def = ConfigurationDef::new("broken");
    def.add_object("logger", "pkg.FileLogger").unwrap();
    def.add_object("store", "pkg.Nowhere").unwrap();

    let mut out = Vec::new();
    let err = def.print_command_usage(&registry(), &mut out).unwrap_err();

    assert!(matches!(
        &err,
        ConfigurationError::TypeNotFound { slot, type_id }
            if slot == "store" && type_id == "pkg.Nowhere"
    ));
    assert!(out.is_empty());
}

#[test]
fn usage_does_not_instantiate() {
    let mut def = ConfigurationDef::new("abstract");
    def.add_object("metrics", "pkg.AbstractMetrics").unwrap();

    assert!(render(&def).unwrap().contains("  metrics options:\n"));
}

#[test]
fn write_failures_surface_as_io_errors() {
    struct Closed;

    impl std::io::Write for Closed {
        fn write(&mut self, _buf: &[u8]) -> std::io::Result<usize> {
            Err(std::io::Error::from(std::io::ErrorKind::BrokenPipe))
        }

        fn flush(&mut self) -> std::io::Result<()> {
            Ok(())
        }
    }

    let def = ConfigurationDef::new("closed");
    let err = def.print_command_usage(&registry(), &mut Closed).unwrap_err();
    assert!(matches!(err, ConfigurationError::Io(_)));
}
