pub mod commands;

use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Parser, Subcommand};
use coordi_core::config::{AppConfig, LoadOptions, LogFormat};
use tracing_subscriber::EnvFilter;

use crate::commands::preferences::PreferencesArgs;
use crate::commands::profile::ProfileArgs;
use crate::commands::suggest::SuggestArgs;

#[derive(Debug, Parser)]
#[command(
    name = "coordi",
    about = "Coordi outfit suggestion CLI",
    long_about = "Suggest an outfit for today's weather, and manage the stored profile, preferences and history.",
    after_help = "Examples:\n  coordi preferences --style casual\n  coordi suggest --temperature 18 --condition cloudy --location Tokyo\n  coordi history --limit 5\n  coordi doctor"
)]
pub struct Cli {
    #[arg(long, global = true, help = "Path to a coordi.toml config file")]
    config: Option<PathBuf>,
    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    #[command(about = "Suggest one outfit for the current or manually entered weather")]
    Suggest(SuggestArgs),
    #[command(about = "Show or register the user profile")]
    Profile(ProfileArgs),
    #[command(about = "Show or update style preferences")]
    Preferences(PreferencesArgs),
    #[command(about = "List past suggestions, newest first")]
    History {
        #[arg(long, default_value_t = 10, help = "Number of outfits to show (at most 50)")]
        limit: usize,
    },
    #[command(about = "Delete the stored profile, preferences and history")]
    Reset,
    #[command(
        about = "Inspect effective configuration values with source attribution and redaction"
    )]
    Config,
    #[command(about = "Check configuration, credentials and storage readiness")]
    Doctor,
}

pub fn run() -> ExitCode {
    let cli = Cli::parse();
    let options = LoadOptions { config_path: cli.config, ..LoadOptions::default() };

    if let Ok(config) = AppConfig::load(options.clone()) {
        init_logging(&config);
    }

    let result = match cli.command {
        Command::Suggest(args) => commands::suggest::run(&options, args),
        Command::Profile(args) => commands::profile::run(&options, args),
        Command::Preferences(args) => commands::preferences::run(&options, args),
        Command::History { limit } => commands::history::run(&options, limit),
        Command::Reset => commands::reset::run(&options),
        Command::Config => commands::config::run(&options),
        Command::Doctor => commands::doctor::run(&options),
    };

    println!("{}", result.output);
    ExitCode::from(result.exit_code)
}

/// Logs go to stderr so stdout carries only the JSON envelope. `RUST_LOG`
/// takes precedence over `logging.level`.
fn init_logging(config: &AppConfig) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(config.logging.level.trim().to_ascii_lowercase()));
    let builder =
        tracing_subscriber::fmt().with_target(false).with_env_filter(filter).with_writer(std::io::stderr);

    let _ = match config.logging.format {
        LogFormat::Compact => builder.compact().try_init(),
        LogFormat::Pretty => builder.pretty().try_init(),
        LogFormat::Json => builder.json().try_init(),
    };
}
