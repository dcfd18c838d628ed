//! Tracing setup: human-readable stderr output plus a per-session log file.

use std::time::{SystemTime, UNIX_EPOCH};

use anyhow::{Context, Result};
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{EnvFilter, fmt};

use crate::dirs;

/// Installs the global subscriber.
///
/// `RUST_LOG` overrides the default `info` filter. The returned guard flushes
/// the file writer on drop and must be held until the program exits.
pub fn setup_logging(session_id: Option<&str>) -> Result<WorkerGuard> {
    let session_id = session_id.map(str::to_string).unwrap_or_else(|| {
        let timestamp = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|elapsed| elapsed.as_secs())
            .unwrap_or_default();
        format!("session_{timestamp}")
    });

    let session_log_dir = dirs::log_dir().join(&session_id);
    std::fs::create_dir_all(&session_log_dir).with_context(|| {
        format!("Failed to create log directory {}", session_log_dir.display())
    })?;

    let file_appender = tracing_appender::rolling::never(&session_log_dir, "client.log");
    let (non_blocking_file, guard) = tracing_appender::non_blocking(file_appender);

    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    let stderr_layer = fmt::layer().with_writer(std::io::stderr).with_target(false);
    let file_layer = fmt::layer().with_writer(non_blocking_file).with_ansi(false);

    tracing_subscriber::registry()
        .with(env_filter)
        .with(stderr_layer)
        .with(file_layer)
        .try_init()
        .context("Failed to install tracing subscriber")?;

    tracing::debug!(session = %session_id, "logging initialized");
    tracing::debug!("Log file: {}/client.log", session_log_dir.display());

    Ok(guard)
}
