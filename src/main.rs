use anyhow::Result;
use clap::Parser;
use std::io;
use tracing_subscriber::EnvFilter;

use zoo_registry::config::{Cli, Command, DEFAULT_LOG_FILTER};
use zoo_registry::{Console, Zoo, ZooConfig, ZooStorage};

fn main() -> Result<()> {
    let cli = Cli::parse();
    let config = ZooConfig::from_cli(&cli);

    // Logs go to stderr so the console transcript stays clean
    let filter = EnvFilter::try_new(&config.log_filter).unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_FILTER));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();

    match cli.command() {
        Command::Console => run_console(&config),
        Command::Browse => run_browse(&config),
        Command::Stats => run_stats(&config),
    }
}

fn run_console(config: &ZooConfig) -> Result<()> {
    let stdin = io::stdin();
    let mut console = Console::new(Zoo::new(), config.data_file.clone(), stdin.lock(), io::stdout());

    console.load()?;
    console.run()
}

fn load_zoo(config: &ZooConfig) -> Result<(Zoo, zoo_registry::LoadReport)> {
    let mut zoo = Zoo::new();
    let report = ZooStorage::new().load(&config.data_file, &mut zoo)?;
    Ok((zoo, report))
}

fn run_stats(config: &ZooConfig) -> Result<()> {
    let (zoo, report) = load_zoo(config)?;

    let output = serde_json::json!({
        "data_file": config.data_file.display().to_string(),
        "load": report,
        "statistics": zoo.statistics(),
    });
    println!("{}", serde_json::to_string_pretty(&output)?);

    Ok(())
}

#[cfg(feature = "tui")]
fn run_browse(config: &ZooConfig) -> Result<()> {
    let (zoo, report) = load_zoo(config)?;
    println!("📊 {}", report.summary());

    let mut app = zoo_registry::ui::App::new(&zoo);
    zoo_registry::ui::run_ui(&mut app)?;

    println!("✅ Browser closed");
    Ok(())
}

#[cfg(not(feature = "tui"))]
fn run_browse(_config: &ZooConfig) -> Result<()> {
    eprintln!("❌ Browse mode not available!");
    eprintln!("   Rebuild with: cargo build --features tui");
    std::process::exit(1);
}
