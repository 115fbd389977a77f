mod commands;
mod config;
mod diagnostics;
mod error;
mod fqname;
mod info;
mod intermap;
mod interwiki;
mod keys;
mod locator;
mod namespace;
mod router;
mod types;
mod watch;

use std::path::{Path, PathBuf};
use std::process::ExitCode;

use clap::{Parser, Subcommand};

use crate::config::{ConfigHandle, WikiConfig};
use crate::locator::LinkOptions;
use crate::router::Endpoint;

#[derive(Parser)]
#[command(name = "wikiref", about = "Resolve wiki item references into composite names and locators")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
    /// Read this config file instead of ./.wikiref.toml
    #[arg(long, global = true)]
    config: Option<PathBuf>,
    /// Log debug output to stderr
    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Print the download file name of a local reference
    DownloadName {
        /// Local reference
        reference: String,
    },
    /// Print where a user's home page lives
    Home {
        /// User name
        username: String,
    },
    /// Print the loaded configuration
    Info {
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
    /// List interwiki map entries
    Map {
        /// Parse this map file instead of the configured one
        #[arg(long)]
        file: Option<PathBuf>,
    },
    /// Print the interwiki-qualified name of a local item
    Qualify {
        /// Local item name
        item_name: String,
    },
    /// Print the index query for a local reference as JSON
    Query {
        /// Local reference
        reference: String,
    },
    /// Print the root item of a reference's namespace
    Root {
        /// Local reference
        reference: String,
    },
    /// Split a reference into wiki, namespace, field, and value
    Split {
        /// Reference, optionally wiki-qualified
        reference: String,
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
    /// Print the locator for a reference
    Url {
        /// Reference, optionally wiki-qualified
        reference: String,
        /// View to link to
        #[arg(long, value_enum, default_value_t = Endpoint::ShowItem)]
        endpoint: Endpoint,
        /// Build a fully qualified URL for local items
        #[arg(long)]
        external: bool,
        /// Search pattern to append as ?regex=
        #[arg(long)]
        regex: Option<String>,
        /// Revision to link to
        #[arg(long)]
        rev: Option<String>,
    },
    /// Re-resolve references whenever the configuration changes
    Watch {
        /// References to resolve
        #[arg(required = true)]
        references: Vec<String>,
    },
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    if let Err(e) = init_tracing(cli.verbose) {
        eprintln!("warning: logging disabled: {e}");
    }

    return match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            diagnostics::print_error(&e);
            ExitCode::FAILURE
        },
    };
}

/// Install the stderr log subscriber.
///
/// # Errors
///
/// Fails if a global subscriber is already installed.
fn init_tracing(verbose: bool) -> Result<(), tracing::subscriber::SetGlobalDefaultError> {
    let level = if verbose { tracing::Level::DEBUG } else { tracing::Level::WARN };
    let subscriber = tracing_subscriber::fmt()
        .with_max_level(level)
        .with_writer(std::io::stderr)
        .with_target(false)
        .finish();
    return tracing::subscriber::set_global_default(subscriber);
}

/// Dispatch one subcommand.
///
/// # Errors
///
/// Returns config loading errors and any error from the command itself.
fn run(cli: Cli) -> Result<(), error::Error> {
    if let Commands::Watch { references } = &cli.command {
        let handle = match &cli.config {
            Some(path) => ConfigHandle::load_file(path)?,
            None => ConfigHandle::load(Path::new("."))?,
        };
        return watch::run(&handle, references);
    }

    let config = match &cli.config {
        Some(path) => WikiConfig::load_file(path)?,
        None => WikiConfig::load(Path::new("."))?,
    };

    match cli.command {
        Commands::DownloadName { reference } => commands::download_name(&config, &reference),
        Commands::Home { username } => commands::home(&config, &username),
        Commands::Info { json } => commands::info(&config, json)?,
        Commands::Map { file } => commands::map(&config, file.as_deref())?,
        Commands::Qualify { item_name } => commands::qualify(&config, &item_name),
        Commands::Query { reference } => commands::query(&config, &reference)?,
        Commands::Root { reference } => commands::root(&config, &reference),
        Commands::Split { reference, json } => commands::split(&config, &reference, json)?,
        Commands::Url { reference, endpoint, external, regex, rev } => {
            let options = LinkOptions {
                endpoint,
                external,
                regex: regex.as_deref(),
                rev: rev.as_deref(),
            };
            commands::url(&config, &reference, &options);
        },
        Commands::Watch { .. } => {},
    }

    return Ok(());
}
