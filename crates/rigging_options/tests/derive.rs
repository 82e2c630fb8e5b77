//! Tests for `#[derive(Options)]`.

use rigging_options::{
    Configurable, OptionBinder, OptionInfo, Options, option_help, option_infos,
};
use std::path::PathBuf;

#[derive(Debug, Default, Options)]
struct FileLogger {
    /// Minimum level written to the file.
    #[option(name = "log-level")]
    log_level: String,

    /// Destination file.
    #[option]
    path: Option<PathBuf>,

    /// Tags attached to every line.
    #[option(name = "tag")]
    tags: Vec<String>,

    #[option(description = "Flush after every line.")]
    sync_writes: bool,

    lines_written: usize,
}

#[derive(Debug, Default, Options)]
struct ConsoleLogger {
    #[option(name = "log-level")]
    log_level: String,

    #[option]
    color: bool,
}

#[derive(Default, Options)]
struct Marker {}

#[test]
fn options_follow_field_order() {
    let names: Vec<_> = option_infos::<FileLogger>()
        .iter()
        .map(|info| info.name)
        .collect();
    assert_eq!(names, ["log-level", "path", "tag", "sync-writes"]);
}

#[test]
fn descriptions_come_from_docs_or_attribute() {
    let infos = option_infos::<FileLogger>();
    assert_eq!(
        infos[0],
        OptionInfo {
            name: "log-level",
            description: "Minimum level written to the file.",
            type_label: "string",
            collection: false,
        }
    );
    assert_eq!(infos[1].type_label, "path");
    assert!(infos[2].collection);
    assert_eq!(infos[3].description, "Flush after every line.");
    assert_eq!(option_infos::<ConsoleLogger>()[1].description, "");
}

#[test]
fn unmarked_fields_are_not_options() {
    let mut logger = FileLogger::default();
    assert!(!logger.declares_option("lines-written"));
    assert_eq!(logger.set_option("lines-written", "3"), Ok(false));
    assert_eq!(logger.lines_written, 0);
}

#[test]
fn struct_without_options_declares_nothing() {
    assert!(Marker::option_specs().is_empty());
    assert_eq!(option_help::<Marker>(), "");
}

#[test]
fn derived_setters_parse_each_field_type() {
    let mut logger = FileLogger::default();
    OptionBinder::new([&mut logger as &mut dyn Configurable])
        .bind_all([
            ("log-level", "DEBUG"),
            ("path", "/var/log/app.log"),
            ("tag", "api"),
            ("tag", "eu-west"),
            ("sync-writes", "true"),
        ])
        .unwrap();

    assert_eq!(logger.log_level, "DEBUG");
    assert_eq!(logger.path, Some(PathBuf::from("/var/log/app.log")));
    assert_eq!(logger.tags, ["api", "eu-west"]);
    assert!(logger.sync_writes);
}

#[test]
fn shared_option_name_is_broadcast() {
    let mut file = FileLogger::default();
    let mut console = ConsoleLogger::default();
    let applied = OptionBinder::new([&mut file as &mut dyn Configurable, &mut console])
        .set_option_value("log-level", "WARN")
        .unwrap();

    assert_eq!(applied, 2);
    assert_eq!(file.log_level, "WARN");
    assert_eq!(console.log_level, "WARN");
}

#[test]
fn help_lists_every_option() {
    let help = option_help::<FileLogger>();
    let lines: Vec<&str> = help.lines().collect();

    assert_eq!(lines.len(), 4);
    assert!(lines[0].starts_with("    --log-level string "));
    assert!(lines[0].ends_with("  Minimum level written to the file."));
    assert!(lines[2].starts_with("    --tag string... "));
    assert!(lines[3].starts_with("    --sync-writes boolean "));
}

#[test]
fn option_info_serializes() {
    let info = option_infos::<ConsoleLogger>()[1];
    let json = serde_json::to_value(info).unwrap();
    assert_eq!(
        json,
        serde_json::json!({
            "name": "color",
            "description": "",
            "type_label": "boolean",
            "collection": false,
        })
    );
}
