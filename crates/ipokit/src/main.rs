//! ipokit - terminal showcase of IPO-consulting site widgets.
//!
//! This is the main entry point for the ipokit CLI.

mod app;
mod commands;
mod content;

use anyhow::Context;
use app::{app_with_system_clock, AppOptions};
use chrono::{DateTime, Utc};
use clap::{Parser, Subcommand};
use ipokit_core::Config;
use ipokit_util::log::{default_log_path, LogConfig, LogLevel};
use std::path::PathBuf;
use std::process::ExitCode;
use tracing::info;

#[derive(Parser)]
#[command(name = "ipokit")]
#[command(author, version, about = "IPO-consulting site widgets in the terminal", long_about = None)]
struct Cli {
    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Configuration file (merged over global and project config)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Theme name (ipokit, light, high-contrast)
    #[arg(long, global = true)]
    theme: Option<String>,

    /// Subcommand
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Run the interactive showcase (default)
    Demo,
    /// Search the FAQ
    Faq {
        /// Text matched against questions and answers
        #[arg(short, long)]
        query: Option<String>,
        /// Only show this category
        #[arg(short, long)]
        category: Option<String>,
        /// List categories instead of entries
        #[arg(long)]
        categories: bool,
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
    /// Validate a value against form rules
    Validate {
        /// Rule: email, phone, url, min:N, max:N or pattern:RE (repeatable)
        #[arg(short, long = "rule")]
        rules: Vec<String>,
        /// Reject blank values
        #[arg(long)]
        required: bool,
        /// Output as JSON
        #[arg(long)]
        json: bool,
        /// Value to check
        #[arg(allow_hyphen_values = true)]
        value: String,
    },
    /// Print the time remaining until a target
    Countdown {
        /// Target time in RFC 3339 (defaults to the configured target)
        #[arg(short, long)]
        target: Option<String>,
        /// Comma-separated units, e.g. "hours,minutes"
        #[arg(short, long)]
        units: Option<String>,
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
    /// Show configuration
    Config,
}

#[tokio::main]
async fn main() -> anyhow::Result<ExitCode> {
    let cli = Cli::parse();

    let cwd = std::env::current_dir().context("Failed to read working directory")?;
    let (config, sources) = Config::load(Some(cwd.as_path()), cli.config.as_deref()).await?;

    let interactive = matches!(cli.command, None | Some(Commands::Demo));
    let log_file = init_logging(&config, cli.verbose, interactive);
    info!(sources = sources.len(), "Configuration loaded");

    match cli.command {
        None | Some(Commands::Demo) => {
            let faq_path = config.faq.as_ref().and_then(|f| f.path.clone());
            let faqs = content::faqs_from(faq_path.as_deref()).await?;
            let options = AppOptions::from_config(&config, cli.theme.as_deref(), faqs);

            let mut app = app_with_system_clock(options);
            app.run().await?;
            info!(case_studies = app.case_count(), "Showcase closed");
            if let Some(path) = log_file {
                if cli.verbose {
                    eprintln!("Logs written to {}", path.display());
                }
            }
        }
        Some(Commands::Faq {
            query,
            category,
            categories,
            json,
        }) => {
            let faq_path = config.faq.as_ref().and_then(|f| f.path.clone());
            let faqs = content::faqs_from(faq_path.as_deref()).await?;
            if categories {
                commands::list_categories(&faqs);
            } else {
                commands::run_faq(&faqs, query.as_deref(), category.as_deref(), json)?;
            }
        }
        Some(Commands::Validate {
            rules,
            required,
            json,
            value,
        }) => {
            let outcome = commands::run_validate(&value, &rules, required, json)?;
            if !outcome.is_valid {
                return Ok(ExitCode::from(1));
            }
        }
        Some(Commands::Countdown {
            target,
            units,
            json,
        }) => {
            let target = resolve_target(target.as_deref(), &config)?;
            let units = match units {
                Some(list) => commands::parse_units(&list)?,
                None => commands::units_from_config(config.countdown.as_ref()),
            };
            commands::run_countdown(target, Utc::now(), units, json)?;
        }
        Some(Commands::Config) => {
            commands::show_config(&config, &sources)?;
        }
    }

    Ok(ExitCode::SUCCESS)
}

/// Target from the command line, else from config.
fn resolve_target(arg: Option<&str>, config: &Config) -> anyhow::Result<DateTime<Utc>> {
    if let Some(raw) = arg {
        return DateTime::parse_from_rfc3339(raw)
            .map(|t| t.with_timezone(&Utc))
            .with_context(|| format!("Invalid target '{raw}', expected RFC 3339"));
    }
    config
        .countdown
        .as_ref()
        .and_then(|c| c.target)
        .context("No countdown target: pass --target or set countdown.target in config")
}

/// Initialize logging.
///
/// The showcase owns the terminal, so it logs to a file. Other commands only
/// log, to stderr, when verbose. Returns the log file path if logging to file.
fn init_logging(config: &Config, verbose: bool, interactive: bool) -> Option<PathBuf> {
    let level = if verbose {
        LogLevel::Debug
    } else {
        config.log_level.map(Into::into).unwrap_or_default()
    };

    let (log_config, file) = if interactive {
        let path = default_log_path()?;
        (LogConfig::to_file(path.clone()), Some(path))
    } else if verbose {
        (LogConfig::to_stderr().with_location(true), None)
    } else {
        return None;
    };

    ipokit_util::log::init(log_config.with_level(level));
    file
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;
    use ipokit_core::config::CountdownConfig;

    #[test]
    fn test_cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_validate_rules() {
        let cli = Cli::parse_from([
            "ipokit", "validate", "--rule", "email", "-r", "max:40", "--required", "a@b.co",
        ]);
        match cli.command {
            Some(Commands::Validate {
                rules,
                required,
                value,
                ..
            }) => {
                assert_eq!(rules, vec!["email", "max:40"]);
                assert!(required);
                assert_eq!(value, "a@b.co");
            }
            _ => panic!("expected validate"),
        }
    }

    #[test]
    fn test_global_flags_after_subcommand() {
        let cli = Cli::parse_from(["ipokit", "faq", "--theme", "light", "-v"]);
        assert_eq!(cli.theme.as_deref(), Some("light"));
        assert!(cli.verbose);
    }

    #[test]
    fn test_resolve_target() {
        let config = Config::default();
        let target = resolve_target(Some("2025-06-30T15:00:00+09:00"), &config).unwrap();
        assert_eq!(target.to_rfc3339(), "2025-06-30T06:00:00+00:00");
        assert!(resolve_target(None, &config).is_err());
        assert!(resolve_target(Some("next week"), &config).is_err());

        let config = Config {
            countdown: Some(CountdownConfig {
                target: Some(target),
                ..Default::default()
            }),
            ..Default::default()
        };
        assert_eq!(resolve_target(None, &config).unwrap(), target);
    }
}
