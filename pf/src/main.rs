//! PlanForge - marketing master plan generator
//!
//! CLI entry point: batch generation, catalog listing, log viewing, and
//! the default TUI.

use std::fs;
use std::io::{BufRead, BufReader};
use std::path::PathBuf;
use std::sync::Arc;

use clap::Parser;
use eyre::{Context, Result};
use tracing::{debug, info};

use planforge::cli::{Cli, Command, OutputFormat, get_log_path};
use planforge::config::Config;
use planforge::generator::HttpCompletionClient;
use planforge::options;
use planforge::plan::{PlanOrchestrator, PlanRequest};
use planforge::tui;

fn setup_logging(cli_log_level: Option<&str>, config_log_level: Option<&str>) -> Result<()> {
    // Note: Can't log params here since logging isn't initialized yet
    // Create log directory
    let log_dir = dirs::data_local_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("planforge")
        .join("logs");

    fs::create_dir_all(&log_dir).context("Failed to create log directory")?;

    // Determine log level with priority: CLI --log-level > config file > default (INFO)
    let level_str = cli_log_level.or(config_log_level);
    let level = if let Some(s) = level_str {
        match s.to_uppercase().as_str() {
            "TRACE" => tracing::Level::TRACE,
            "DEBUG" => tracing::Level::DEBUG,
            "INFO" => tracing::Level::INFO,
            "WARN" | "WARNING" => tracing::Level::WARN,
            "ERROR" => tracing::Level::ERROR,
            _ => {
                eprintln!("Warning: Unknown log-level '{}', defaulting to INFO", s);
                tracing::Level::INFO
            }
        }
    } else {
        tracing::Level::INFO
    };

    let log_file = fs::File::create(log_dir.join("planforge.log")).context("Failed to create log file")?;

    tracing_subscriber::fmt()
        .with_writer(log_file)
        .with_ansi(false)
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env().add_directive(level.into()))
        .init();

    info!("Logging initialized (level: {:?})", level);
    Ok(())
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Load log level from config file early (before full config load)
    let config_log_level = Config::load_log_level(cli.config.as_ref());

    // Setup logging with priority: CLI > config > INFO default
    setup_logging(cli.log_level.as_deref(), config_log_level.as_deref()).context("Failed to setup logging")?;

    // Load configuration
    let config = Config::load(cli.config.as_ref()).context("Failed to load configuration")?;

    info!("PlanForge loaded config: endpoint={}", config.generator.endpoint);

    // Dispatch command
    debug!(command = ?cli.command, "main: dispatching command");
    match cli.command {
        Some(Command::Generate {
            brand,
            year,
            budget,
            timeframe,
            kpis,
            channels,
            allocation,
            output,
        }) => {
            debug!(%brand, ?year, ?budget, "main: matched Generate command");
            let mut request = PlanRequest::new(brand, budget.unwrap_or(config.defaults.budget));
            if let Some(year) = year {
                request.year = year;
            }
            if let Some(timeframe) = timeframe {
                request.timeframe = timeframe;
            }
            if let Some(allocation) = allocation {
                request.allocation = allocation;
            }
            request.kpis = kpis;
            request.channels = channels;

            cmd_generate(&config, &request, output.as_deref()).await
        }
        Some(Command::Options { category, format }) => {
            debug!(?category, ?format, "main: matched Options command");
            cmd_options(category.as_deref(), format)
        }
        Some(Command::Logs { follow, lines }) => {
            debug!(follow, lines, "main: matched Logs command");
            cmd_logs(follow, lines).await
        }
        None => {
            debug!("main: no command specified, launching TUI");
            cmd_tui(&config).await
        }
    }
}

/// Run one generation to completion (batch mode)
async fn cmd_generate(config: &Config, request: &PlanRequest, output: Option<&std::path::Path>) -> Result<()> {
    debug!(brand = %request.brand_name, ?output, "cmd_generate: called");

    let client = HttpCompletionClient::from_config(&config.generator).context("Failed to create generation client")?;
    let mut orchestrator = PlanOrchestrator::new(Arc::new(client));
    debug!("cmd_generate: client created");

    let plan = orchestrator.submit(request).await?.to_string();
    debug!(plan_len = plan.len(), "cmd_generate: plan generated");

    match output {
        Some(path) => {
            fs::write(path, &plan).context(format!("Failed to write plan to {}", path.display()))?;
            println!("Plan written to {}", path.display());
        }
        None => {
            println!("{}", plan);
        }
    }

    Ok(())
}

/// Launch the TUI
async fn cmd_tui(config: &Config) -> Result<()> {
    debug!("cmd_tui: called");

    let client = HttpCompletionClient::from_config(&config.generator).context("Failed to create generation client")?;
    debug!("cmd_tui: client created, launching TUI");

    tui::run_with_client(Arc::new(client), &config.defaults).await
}

/// List the parameter catalogs
fn cmd_options(category: Option<&str>, format: OutputFormat) -> Result<()> {
    debug!(?category, ?format, "cmd_options: called");

    let catalogs: Vec<(&str, Vec<String>)> = vec![
        ("timeframes", options::TIMEFRAMES.iter().map(|s| s.to_string()).collect()),
        ("kpis", options::KPIS.iter().map(|s| s.to_string()).collect()),
        ("channels", options::CHANNELS.iter().map(|s| s.to_string()).collect()),
        ("allocations", options::ALLOCATIONS.iter().map(|s| s.to_string()).collect()),
        ("years", options::year_choices().iter().map(|y| y.to_string()).collect()),
    ];

    let selected: Vec<&(&str, Vec<String>)> = match category {
        Some(name) => {
            let found: Vec<_> = catalogs.iter().filter(|(n, _)| *n == name).collect();
            if found.is_empty() {
                debug!(%name, "cmd_options: unknown category");
                eprintln!("Unknown category '{}'. Valid: timeframes, kpis, channels, allocations, years", name);
                return Ok(());
            }
            found
        }
        None => catalogs.iter().collect(),
    };

    match format {
        OutputFormat::Json => {
            debug!("cmd_options: outputting JSON");
            let map: serde_json::Map<String, serde_json::Value> = selected
                .iter()
                .map(|(name, entries)| (name.to_string(), serde_json::json!(entries)))
                .collect();
            println!("{}", serde_json::to_string_pretty(&serde_json::Value::Object(map))?);
        }
        OutputFormat::Text => {
            debug!("cmd_options: outputting text");
            for (name, entries) in selected {
                println!("{}:", name);
                for entry in entries {
                    println!("  - {}", entry);
                }
                println!();
            }
        }
    }

    Ok(())
}

/// Show logs
async fn cmd_logs(follow: bool, lines: usize) -> Result<()> {
    debug!(follow, lines, "cmd_logs: called");
    let log_path = get_log_path();

    if !log_path.exists() {
        debug!(?log_path, "cmd_logs: log file does not exist");
        println!("No log file found at: {}", log_path.display());
        println!("PlanForge may not have been run yet.");
        return Ok(());
    }

    if follow {
        debug!(?log_path, "cmd_logs: following log file");
        println!("Following log file: {} (Ctrl+C to stop)", log_path.display());
        println!();

        // Use tail -f for following
        let mut child = std::process::Command::new("tail")
            .args(["-f", "-n", &lines.to_string()])
            .arg(&log_path)
            .spawn()
            .context("Failed to run tail -f")?;

        child.wait()?;
    } else {
        debug!(?log_path, lines, "cmd_logs: reading last N lines");
        // Read last N lines
        let file = fs::File::open(&log_path).context("Failed to open log file")?;
        let reader = BufReader::new(file);
        let all_lines: Vec<String> = reader.lines().map_while(Result::ok).collect();

        let start = if all_lines.len() > lines { all_lines.len() - lines } else { 0 };

        for line in &all_lines[start..] {
            println!("{}", line);
        }
    }

    Ok(())
}
