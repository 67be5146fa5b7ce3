use clap::Parser;
use colored::*;
use eyre::{Context, Result};
use log::info;
use std::fs;
use std::io;
use std::path::PathBuf;

use cmdgen::{CommandResolver, SystemConfig, UserConfig, YamlDocument};

mod cli;
mod config;

use cli::Cli;
use config::Config;

fn setup_logging(log_level: Option<&str>) -> Result<()> {
    // Create log directory
    let log_dir = dirs::data_local_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("cmdgen")
        .join("logs");

    fs::create_dir_all(&log_dir).context("Failed to create log directory")?;

    let log_file = log_dir.join("cmdgen.log");

    // Setup env_logger with file output so stdout carries only commands
    let target = Box::new(
        fs::OpenOptions::new()
            .create(true)
            .append(true)
            .open(&log_file)
            .context("Failed to open log file")?,
    );

    let env = env_logger::Env::default().default_filter_or(log_level.unwrap_or("info"));
    env_logger::Builder::from_env(env)
        .target(env_logger::Target::Pipe(target))
        .init();

    info!("Logging initialized, writing to: {}", log_file.display());
    Ok(())
}

fn run_application(cli: &Cli, config: &Config) -> Result<()> {
    info!("Starting application");

    if cli.is_verbose() {
        eprintln!("{} {}", "User config:".yellow(), config.user_config.display());
        eprintln!("{} {}", "Tool config:".yellow(), config.tool_config.display());
    }

    let user = UserConfig::from_file(&config.user_config).context("Failed to load user config")?;
    let catalog = SystemConfig::from_file(&config.tool_config).context("Failed to load tool catalog")?;
    log::debug!("Loaded {} user tool(s) and {} catalog entries", user.tools.len(), catalog.len());

    let resolver = CommandResolver::new(&user, &catalog);
    let mut stdout = io::stdout().lock();
    let written = resolver
        .write_to(&mut stdout)
        .context("Failed to resolve commands")?;

    if cli.is_verbose() {
        eprintln!("{} {}", "Commands:".green(), written);
    }
    Ok(())
}

fn try_main() -> Result<()> {
    // Parse CLI arguments
    let cli = Cli::parse();

    // Load configuration
    let (config, report) = Config::load(cli.config.as_ref()).context("Failed to load configuration")?;
    let config = config.with_overrides(cli.user_config.as_ref(), cli.tool_config.as_ref());

    setup_logging(config.log_level.as_deref()).context("Failed to setup logging")?;
    report.log();

    info!("Starting with config from: {:?}", cli.config);

    // Run the main application logic
    run_application(&cli, &config)
}

fn main() {
    if let Err(e) = try_main() {
        log::error!("{:#}", e);
        eprintln!("{} {:#}", "error:".red(), e);
        std::process::exit(1);
    }
}
