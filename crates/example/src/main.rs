//! The `rig` command: inspect and materialize demo configurations.
//!
//! # Usage
//!
//! ```bash
//! rig list
//! rig usage service
//! rig run service --set port=9000 --set tag=canary
//! RIGGING_LOG=rigging_config=debug rig run test
//! ```

use clap::{Parser, Subcommand};
use example::{DemoObjectsPlugin, describe, with_assignments};
use rigging_config::{ConfigurationError, DefinitionCatalog, ObjectRegistry};
use rigging_core_plugins::{DefaultPlugins, TracingFormat, TracingPlugin};
use rigging_system::plugin::PluginGroup;
use rigging_system::server::Server;
use std::io::Write;
use std::process::ExitCode;
use thiserror::Error;
use tracing::Level;

#[derive(Parser)]
#[command(name = "rig", about = "Inspect and materialize Rigging configurations", version)]
struct Cli {
    /// Maximum log level (overridden by RIGGING_LOG)
    #[arg(long, global = true, default_value = "warn")]
    log_level: Level,

    /// Log output format: pretty, compact or json
    #[arg(long, global = true, default_value = "compact")]
    log_format: TracingFormat,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List the available configurations
    List,

    /// List the registered object types
    Types,

    /// Print the options accepted by a configuration's objects
    Usage {
        /// Configuration name
        name: String,
    },

    /// Materialize a configuration and describe the result
    Run {
        /// Configuration name
        name: String,

        /// Extra option assignment, appended after the configuration's own
        #[arg(long = "set", value_name = "NAME=VALUE", value_parser = parse_assignment)]
        assignments: Vec<(String, String)>,
    },
}

/// Errors reported by the CLI.
#[derive(Debug, Error)]
enum CliError {
    #[error("no configuration named '{0}' (try `rig list`)")]
    UnknownConfiguration(String),

    #[error(transparent)]
    Configuration(#[from] ConfigurationError),

    #[error("failed to write output")]
    Io(#[from] std::io::Error),
}

fn parse_assignment(raw: &str) -> Result<(String, String), String> {
    let (name, value) = raw
        .split_once('=')
        .ok_or_else(|| format!("expected NAME=VALUE, got '{raw}'"))?;
    if name.is_empty() {
        return Err(format!("missing option name in '{raw}'"));
    }
    Ok((name.to_string(), value.to_string()))
}

#[expect(clippy::print_stderr, reason = "errors are reported on stderr")]
fn main() -> ExitCode {
    let cli = Cli::parse();

    let mut server = Server::new();
    server
        .add_plugins(DefaultPlugins.build().disable::<TracingPlugin>())
        .add_plugins(
            TracingPlugin::new()
                .with_level(cli.log_level)
                .with_format(cli.log_format),
        )
        .add_plugins(DemoObjectsPlugin);
    server.finish();

    let result = execute(&server, cli.command);
    server.cleanup();

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(error) => {
            eprint!("{}", error_report(&error));
            ExitCode::FAILURE
        }
    }
}

fn execute(server: &Server, command: Commands) -> Result<(), CliError> {
    let catalog = server
        .get_global::<DefinitionCatalog>()
        .expect("DemoObjectsPlugin publishes the catalog");
    let registry = server
        .get_global::<ObjectRegistry>()
        .expect("DefaultPlugins provides the object registry");
    let mut stdout = std::io::stdout().lock();

    match command {
        Commands::List => catalog.print_summary(&mut stdout)?,
        Commands::Types => {
            for id in registry.ids() {
                writeln!(stdout, "  {id}")?;
            }
        }
        Commands::Usage { name } => {
            let definition = catalog
                .get(&name)
                .ok_or(CliError::UnknownConfiguration(name.clone()))?;
            definition.print_command_usage(&*registry, &mut stdout)?;
        }
        Commands::Run { name, assignments } => {
            let definition = catalog
                .get(&name)
                .ok_or(CliError::UnknownConfiguration(name.clone()))?;
            let definition = with_assignments(
                definition,
                assignments
                    .iter()
                    .map(|(option, value)| (option.as_str(), value.as_str())),
            )?;
            let configuration = definition.create_configuration(&*registry)?;
            stdout.write_all(describe(&configuration).as_bytes())?;
        }
    }

    Ok(())
}

/// Formats `error` followed by its chain of causes.
fn error_report(error: &dyn core::error::Error) -> String {
    let mut report = format!("error: {error}\n");
    let mut source = error.source();
    while let Some(cause) = source {
        report.push_str(&format!("  caused by: {cause}\n"));
        source = cause.source();
    }
    report
}
