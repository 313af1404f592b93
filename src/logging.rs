// 📝 Logging
// The TUI owns the terminal, so it only ever logs to a file

use crate::config::LogConfig;
use std::ffi::OsString;
use std::path::{Path, PathBuf};
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Overrides `log.file` from the config
pub const LOG_ENV: &str = "BMI_CALCULATOR_LOG";

fn env_filter(config: &LogConfig) -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&config.filter))
}

pub fn log_file(config: &LogConfig) -> Option<PathBuf> {
    resolve_log_file(std::env::var_os(LOG_ENV), config)
}

/// An explicit override wins over `log.file`
fn resolve_log_file(override_path: Option<OsString>, config: &LogConfig) -> Option<PathBuf> {
    override_path
        .map(PathBuf::from)
        .or_else(|| config.file.clone())
}

/// File logging for interactive mode. Does nothing without a log path.
pub fn init_file_logging(config: &LogConfig) {
    if let Some(path) = log_file(config) {
        init_file_logging_at(&path, config);
    }
}

fn init_file_logging_at(path: &Path, config: &LogConfig) {
    let file = match std::fs::OpenOptions::new().create(true).append(true).open(path) {
        Ok(file) => file,
        Err(err) => {
            eprintln!("Warning: failed to open log file {}: {}", path.display(), err);
            return;
        }
    };

    let file_layer = fmt::layer()
        .with_writer(std::sync::Mutex::new(file))
        .with_ansi(false)
        .with_target(true)
        .with_level(true);

    let _ = tracing_subscriber::registry()
        .with(env_filter(config))
        .with(file_layer)
        .try_init();
}

/// Stderr logging for one-shot mode, only when `RUST_LOG` asks for it
pub fn init_stderr_logging() {
    let Ok(filter) = EnvFilter::try_from_default_env() else {
        return;
    };

    let _ = tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_writer(std::io::stderr))
        .try_init();
}
