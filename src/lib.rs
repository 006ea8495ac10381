// Zoo Registry - Core Library
// Exposes all modules for use in the console, the TUI browser and tests

pub mod config;
pub mod console;
pub mod entities;
pub mod error;
pub mod storage;
pub mod zoo;

// Only compile the browser when the TUI feature is enabled
#[cfg(feature = "tui")]
pub mod ui;

// Re-export commonly used types
pub use config::ZooConfig;
pub use console::Console;
pub use entities::{
    create_animal, normalize_id, Animal, AnimalType, Enclosure, HealthRecord, HealthStatus,
    Locomotion, MedicalEntry,
};
pub use error::{Result, ZooError};
pub use storage::{LoadReport, RecordError, SkippedLine, ZooStorage};
pub use zoo::{EnclosureSummary, Zoo, ZooStatistics};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
