use anyhow::{Context, Result};
use chrono::Local;
use std::fs;
use std::path::Path;
use std::sync::Mutex;
use tracing::info;
use tracing_subscriber::{EnvFilter, FmtSubscriber};

const DEFAULT_FILTER: &str = "warn";

/// Installs the global tracing subscriber
///
/// `RUST_LOG` controls the level (default `warn`). With a directory, logs go to
/// a timestamped file inside it; otherwise to stderr.
pub fn init_logger(log_dir: Option<&str>) -> Result<()> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER));
    let builder = FmtSubscriber::builder()
        .with_env_filter(filter)
        .with_file(true)
        .with_line_number(true)
        .with_target(false);

    match log_dir {
        Some(log_dir) => {
            // Create log directory if it doesn't exist
            if !Path::new(log_dir).exists() {
                fs::create_dir_all(log_dir)
                    .with_context(|| format!("Failed to create log directory {}", log_dir))?;
            }

            let timestamp = Local::now().format("%Y%m%d_%H%M%S");
            let log_file = format!("{}/url_helper_{}.log", log_dir, timestamp);
            let file = fs::File::create(&log_file)
                .with_context(|| format!("Failed to create log file {}", log_file))?;

            let subscriber = builder.with_ansi(false).with_writer(Mutex::new(file)).finish();
            tracing::subscriber::set_global_default(subscriber)?;
        }
        None => {
            let subscriber = builder.with_writer(std::io::stderr).finish();
            tracing::subscriber::set_global_default(subscriber)?;
        }
    }

    info!("Logger initialized");
    Ok(())
}
