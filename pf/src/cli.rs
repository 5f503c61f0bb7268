//! CLI command definitions and subcommands

use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing::debug;

/// PlanForge - marketing master plan generator
#[derive(Parser)]
#[command(
    name = "planforge",
    about = "Generate a marketing master plan from campaign parameters",
    version
)]
pub struct Cli {
    /// Path to config file
    #[arg(short, long, global = true, help = "Path to config file")]
    pub config: Option<PathBuf>,

    /// Log level (TRACE, DEBUG, INFO, WARN, ERROR)
    #[arg(
        short = 'l',
        long = "log-level",
        global = true,
        help = "Log level (TRACE, DEBUG, INFO, WARN, ERROR)"
    )]
    pub log_level: Option<String>,

    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Option<Command>,
}

/// CLI subcommands
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Generate a plan in batch mode and print the Markdown
    Generate {
        /// Brand the plan is for
        #[arg(value_name = "BRAND")]
        brand: String,

        /// Target year (defaults to the current year)
        #[arg(short, long)]
        year: Option<i32>,

        /// Campaign budget in whole dollars
        #[arg(short, long)]
        budget: Option<u64>,

        /// Plan duration (see `pf options timeframes`)
        #[arg(short, long)]
        timeframe: Option<String>,

        /// Success metric; repeat for multiple (see `pf options kpis`)
        #[arg(short = 'k', long = "kpi")]
        kpis: Vec<String>,

        /// Channel; repeat for multiple (see `pf options channels`)
        #[arg(short = 'C', long = "channel")]
        channels: Vec<String>,

        /// Investment philosophy (see `pf options allocations`)
        #[arg(short, long)]
        allocation: Option<String>,

        /// Write the plan to a file instead of stdout
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// List the selectable parameter catalogs
    Options {
        /// Catalog to show (timeframes, kpis, channels, allocations, years)
        category: Option<String>,

        /// Output format
        #[arg(short, long, default_value = "text")]
        format: OutputFormat,
    },

    /// Show logs
    Logs {
        /// Follow log output (like tail -f)
        #[arg(short, long)]
        follow: bool,

        /// Number of lines to show
        #[arg(long, default_value = "50")]
        lines: usize,
    },
}

/// Get the log file path
pub fn get_log_path() -> PathBuf {
    debug!("get_log_path: called");
    let path = dirs::data_local_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("planforge")
        .join("logs")
        .join("planforge.log");
    debug!(?path, "get_log_path: returning path");
    path
}

/// Output format for the options command
#[derive(Clone, Debug, Default)]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
}

impl std::str::FromStr for OutputFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        debug!(%s, "OutputFormat::from_str: called");
        match s.to_lowercase().as_str() {
            "text" | "plain" => {
                debug!("OutputFormat::from_str: matched Text");
                Ok(Self::Text)
            }
            "json" => {
                debug!("OutputFormat::from_str: matched Json");
                Ok(Self::Json)
            }
            _ => {
                debug!(%s, "OutputFormat::from_str: unknown format");
                Err(format!("Unknown format: {}. Use: text or json", s))
            }
        }
    }
}

impl std::fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Text => write!(f, "text"),
            Self::Json => write!(f, "json"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_parse_no_command() {
        let cli = Cli::parse_from(["planforge"]);
        assert!(cli.command.is_none());
    }

    #[test]
    fn test_cli_parse_generate() {
        let cli = Cli::parse_from([
            "planforge",
            "generate",
            "Acme Coffee",
            "--budget",
            "50000",
            "--kpi",
            "App Installs",
            "--kpi",
            "NPS (Net Promoter Score)",
            "--channel",
            "SEO (Organic Content)",
        ]);
        if let Some(Command::Generate {
            brand,
            budget,
            kpis,
            channels,
            year,
            ..
        }) = cli.command
        {
            assert_eq!(brand, "Acme Coffee");
            assert_eq!(budget, Some(50_000));
            assert_eq!(kpis.len(), 2);
            assert_eq!(channels, vec!["SEO (Organic Content)".to_string()]);
            assert!(year.is_none());
        } else {
            panic!("Expected Generate command");
        }
    }

    #[test]
    fn test_cli_parse_options() {
        let cli = Cli::parse_from(["planforge", "options", "kpis"]);
        assert!(matches!(
            cli.command,
            Some(Command::Options { category: Some(c), .. }) if c == "kpis"
        ));
    }

    #[test]
    fn test_cli_parse_logs() {
        let cli = Cli::parse_from(["planforge", "logs", "--follow", "--lines", "100"]);
        assert!(matches!(
            cli.command,
            Some(Command::Logs {
                follow: true,
                lines: 100
            })
        ));
    }

    #[test]
    fn test_output_format_from_str() {
        assert!(matches!("text".parse::<OutputFormat>(), Ok(OutputFormat::Text)));
        assert!(matches!("json".parse::<OutputFormat>(), Ok(OutputFormat::Json)));
        assert!("invalid".parse::<OutputFormat>().is_err());
    }

    #[test]
    fn test_cli_with_config() {
        let cli = Cli::parse_from(["planforge", "-c", "/path/to/config.yml", "options"]);
        assert_eq!(cli.config, Some(PathBuf::from("/path/to/config.yml")));
    }
}
