// BMI Calculator - Core Library
// Exposes the engine, history and session controller for the CLI, the TUI and tests

pub mod error;
pub mod engine;
pub mod history;
pub mod session;
pub mod config;
pub mod logging;

// Re-export commonly used types
pub use error::BmiError;
pub use engine::{
    BmiResult, Category, InputForm, ValidatedInput,
    classify, compute_bmi, round_to_hundredths, validate,
    METERS_PER_INCH, INCHES_PER_FOOT,
};
pub use history::{EntryId, HistoryEntry, HistoryLog, format_height, format_weight};
pub use session::{Session, SessionState};
pub use config::{Config, ConfigError, LogConfig};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
