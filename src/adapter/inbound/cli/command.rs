//! Command-line interface definitions.
//!
//! Defines the CLI structure for the marketpulse application using `clap`.
//! The CLI runs the scheduled service, fires single broadcasts for external
//! schedulers, previews reports and administers the subscriber registry.

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Default configuration file, resolved against the working directory.
pub const DEFAULT_CONFIG: &str = "config.toml";

/// Scheduled market digest for Telegram subscribers
#[derive(Parser, Debug)]
#[command(name = "marketpulse")]
#[command(version)]
pub struct Cli {
    /// JSON output for scripting
    #[arg(long, global = true)]
    pub json: bool,

    /// Decrease output verbosity
    #[arg(short, long, global = true)]
    pub quiet: bool,

    #[command(subcommand)]
    pub command: Commands,
}

/// Top-level subcommands for the marketpulse CLI.
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Run the scheduler and the Telegram command listener until Ctrl-C
    Run(DeliveryArgs),

    /// Produce one report, broadcast it to every subscriber and exit
    Once(DeliveryArgs),

    /// Produce one report and print it without sending
    Preview(ConfigPathArg),

    /// Manage subscribers
    #[command(subcommand)]
    Subscribers(SubscribersCommand),
}

/// Subcommands for `marketpulse subscribers`.
#[derive(Subcommand, Debug)]
pub enum SubscribersCommand {
    /// List registered subscribers.
    List(ConfigPathArg),
    /// Register a subscriber by chat id.
    Add(AddSubscriberArgs),
}

/// Shared argument struct for commands that require only a configuration path.
///
/// A missing file is not an error; built-in defaults are used instead.
#[derive(Parser, Debug)]
pub struct ConfigPathArg {
    /// Path to the configuration file.
    #[arg(short, long, default_value = DEFAULT_CONFIG)]
    pub config: PathBuf,
}

/// Arguments for commands that deliver reports.
#[derive(Parser, Debug)]
pub struct DeliveryArgs {
    /// Path to the configuration file.
    #[arg(short, long, default_value = DEFAULT_CONFIG)]
    pub config: PathBuf,

    /// Log deliveries instead of sending them.
    #[arg(long)]
    pub dry_run: bool,
}

/// Arguments for `subscribers add`.
#[derive(Parser, Debug)]
pub struct AddSubscriberArgs {
    /// Chat id to register.
    #[arg(allow_hyphen_values = true)]
    pub id: String,

    /// Path to the configuration file.
    #[arg(short, long, default_value = DEFAULT_CONFIG)]
    pub config: PathBuf,
}
