use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use colored::*;
use std::path::PathBuf;
use tracing::info;

use workout_stats::config::AppConfig;
use workout_stats::import::ImportManager;
use workout_stats::logging::{init_logging, LogFormat, LogLevel};
use workout_stats::report::{render, InfoMessage, OutputFormat, ReportLocale};
use workout_stats::{
    demo_packages, process_file, process_packages, read_tokens, registry, StatsError,
};

/// workout-stats - Workout statistics from sensor packages
///
/// Computes distance, mean speed and calories burned for running,
/// sports walking and swimming sessions.
#[derive(Parser)]
#[command(name = "workout-stats")]
#[command(version)]
#[command(about = "Workout statistics from sensor packages", long_about = None)]
struct Cli {
    /// Sets a custom config file
    #[arg(short, long, value_name = "FILE", global = true)]
    config: Option<PathBuf>,

    /// Increase verbosity of output
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    /// Log level (error, warn, info, debug, trace); overrides -v
    #[arg(long, value_name = "LEVEL", global = true)]
    log_level: Option<LogLevel>,

    /// Log format (pretty, json, compact)
    #[arg(long, value_name = "FORMAT", global = true)]
    log_format: Option<LogFormat>,

    /// Report label language (ru, en)
    #[arg(short, long, global = true)]
    locale: Option<ReportLocale>,

    /// Output format (text, json, table)
    #[arg(short = 'f', long, global = true)]
    format: Option<OutputFormat>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Compute the report for a single package
    Calc {
        /// Activity code (RUN, WLK, SWM)
        code: String,

        /// Sensor reading values, in order
        #[arg(required = true, allow_hyphen_values = true)]
        values: Vec<String>,
    },

    /// Compute reports for every package in a JSON or CSV file
    Batch {
        /// Package file path
        #[arg(long)]
        file: PathBuf,

        /// File format: json or csv (auto-detect from extension if not specified)
        #[arg(short = 'i', long)]
        input_format: Option<String>,

        /// CSV cell delimiter
        #[arg(short, long, default_value_t = ',')]
        delimiter: char,

        /// Report rejected packages and continue instead of stopping
        #[arg(short, long)]
        keep_going: bool,
    },

    /// Run the three reference packages
    Demo,

    /// List the known activity codes
    Codes,

    /// Show or create the configuration file
    Config {
        /// Print the effective configuration
        #[arg(short, long)]
        show: bool,

        /// Write a default configuration file
        #[arg(long)]
        init: bool,

        /// Overwrite an existing file with --init
        #[arg(long)]
        force: bool,
    },
}

fn main() {
    if let Err(err) = run() {
        eprintln!("{} {:#}", "error:".red().bold(), err);
        std::process::exit(1);
    }
}

fn run() -> Result<()> {
    let cli = Cli::parse();

    let mut config = AppConfig::load(cli.config.as_deref())?;
    config.logging.level = cli
        .log_level
        .unwrap_or_else(|| LogLevel::from_verbosity(cli.verbose, config.logging.level));
    if let Some(format) = cli.log_format {
        config.logging.format = format;
    }
    init_logging(&config.logging).context("Failed to initialize logging")?;

    let locale = cli.locale.unwrap_or(config.report.locale);
    let output = cli.format.unwrap_or(config.report.output);

    match cli.command {
        Commands::Calc { code, values } => {
            let workout = read_tokens(&code, &values)?;
            info!(code = %code, "Computing single package");
            print_reports(&[workout.show_training_info()], output, locale)?;
        }

        Commands::Batch {
            file,
            input_format,
            delimiter,
            keep_going,
        } => {
            let delimiter = u8::try_from(delimiter)
                .ok()
                .filter(u8::is_ascii)
                .with_context(|| {
                    format!("CSV delimiter must be an ASCII character, got {:?}", delimiter)
                })?;
            let manager = ImportManager::with_csv_delimiter(delimiter);
            let keep_going = keep_going || config.report.keep_going;
            let outcome = match process_file(&manager, &file, input_format.as_deref(), keep_going) {
                Ok(outcome) => outcome,
                Err(err) => {
                    log_failure(&err);
                    anyhow::bail!("Failed to process {}: {}", file.display(), err.user_message());
                }
            };
            print_reports(&outcome.reports, output, locale)?;

            for err in &outcome.rejected {
                eprintln!("{} {}", "skipped:".yellow().bold(), err);
            }
            if !outcome.rejected.is_empty() {
                anyhow::bail!(
                    "{} of {} packages rejected",
                    outcome.rejected.len(),
                    outcome.total
                );
            }
        }

        Commands::Demo => {
            let (reports, _) = process_packages(&demo_packages(), false)?;
            print_reports(&reports, output, locale)?;
        }

        Commands::Codes => {
            for activity in registry::activities() {
                println!(
                    "{}  {:<14} {}",
                    activity.code().green().bold(),
                    activity.name(),
                    activity.fields().join(", ").dimmed()
                );
            }
        }

        Commands::Config { show, init, force } => {
            let path = cli
                .config
                .clone()
                .unwrap_or_else(AppConfig::default_config_path);

            if init {
                if path.exists() && !force {
                    anyhow::bail!(
                        "Config file already exists: {} (use --force to overwrite)",
                        path.display()
                    );
                }
                let mut fresh = AppConfig::default();
                fresh.save_to_file(&path)?;
                eprintln!("{} {}", "✓ Config written to".green(), path.display());
                config = fresh;
            }

            if show || !init {
                println!("# {}", path.display());
                println!("{}", toml::to_string_pretty(&config)?);
            }
        }
    }

    Ok(())
}

fn log_failure(err: &StatsError) {
    match err.severity().to_tracing_level() {
        tracing::Level::WARN => tracing::warn!(error = %err, "Batch rejected"),
        _ => tracing::error!(error = %err, "Batch failed"),
    }
}

fn print_reports(reports: &[InfoMessage], output: OutputFormat, locale: ReportLocale) -> Result<()> {
    if reports.is_empty() {
        return Ok(());
    }
    let rendered = render(reports, output, locale).context("Failed to render reports")?;
    println!("{}", rendered);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_log_flags_parse() {
        let cli = Cli::try_parse_from([
            "workout-stats",
            "--log-level",
            "debug",
            "--log-format",
            "json",
            "codes",
        ])
        .unwrap();
        assert_eq!(cli.log_level, Some(LogLevel::Debug));
        assert_eq!(cli.log_format, Some(LogFormat::Json));

        assert!(Cli::try_parse_from(["workout-stats", "--log-level", "loud", "codes"]).is_err());
    }

    #[test]
    fn test_batch_delimiter_flag() {
        let cli = Cli::try_parse_from(["workout-stats", "batch", "--file", "p.csv", "-d", ";"]).unwrap();
        match cli.command {
            Commands::Batch { delimiter, .. } => assert_eq!(delimiter, ';'),
            _ => panic!("expected batch"),
        }
    }
}
