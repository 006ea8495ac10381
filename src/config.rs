// ⚙️ Runtime configuration
//
// Precedence: command line > environment > defaults.

use clap::{Parser, Subcommand};
use std::path::PathBuf;

pub const DEFAULT_DATA_FILE: &str = "zoo_data.csv";
pub const DEFAULT_LOG_FILTER: &str = "zoo_registry=info";

pub const DATA_FILE_ENV: &str = "ZOO_DATA_FILE";
pub const LOG_FILTER_ENV: &str = "ZOO_LOG";

/// Zoo registry - animals, enclosures and health records
#[derive(Parser, Debug)]
#[command(name = "zoo-registry")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Data file to load on start and save on exit
    #[arg(long, global = true, env = DATA_FILE_ENV)]
    pub data: Option<PathBuf>,

    /// Tracing filter directive (e.g. zoo_registry=debug)
    #[arg(long, global = true, env = LOG_FILTER_ENV)]
    pub log: Option<String>,

    #[command(subcommand)]
    pub command: Option<Command>,
}

#[derive(Subcommand, Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    /// Interactive menu (default)
    Console,
    /// Read-only terminal browser
    Browse,
    /// Print load report and statistics as JSON
    Stats,
}

impl Cli {
    pub fn command(&self) -> Command {
        self.command.unwrap_or(Command::Console)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ZooConfig {
    pub data_file: PathBuf,
    pub log_filter: String,
}

impl Default for ZooConfig {
    fn default() -> Self {
        ZooConfig {
            data_file: PathBuf::from(DEFAULT_DATA_FILE),
            log_filter: DEFAULT_LOG_FILTER.to_string(),
        }
    }
}

impl ZooConfig {
    /// Resolve parsed arguments against the defaults; blank values fall back
    pub fn from_cli(cli: &Cli) -> Self {
        let mut config = ZooConfig::default();

        if let Some(path) = cli.data.as_ref().filter(|p| !p.as_os_str().to_string_lossy().trim().is_empty()) {
            config.data_file = path.clone();
        }
        if let Some(filter) = cli.log.as_ref().filter(|v| !v.trim().is_empty()) {
            config.log_filter = filter.clone();
        }

        config
    }
}
