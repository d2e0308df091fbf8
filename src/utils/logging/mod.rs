//! Console logging for the remux planner
//!
//! - Compact console formatter with optional timestamps and colors
//! - Helper functions for the decision events every pass reports

mod formatter;
mod helpers;

pub use helpers::{log_command, log_decision, log_skip};

use tracing::Level;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use formatter::CleanFormatter;

/// Sets up the logging system with the specified configuration
///
/// # Arguments
/// * `level` - Log level (trace, debug, info, warn, error)
/// * `show_timestamps` - Whether to show timestamps in console output
/// * `colored` - Whether to use colored output in console
///
/// # Examples
/// ```no_run
/// use remux_audio::utils::logging::setup_logging;
///
/// setup_logging("info", false, true).expect("Failed to setup logging");
/// ```
pub fn setup_logging(
    level: &str,
    show_timestamps: bool,
    colored: bool,
) -> crate::utils::Result<()> {
    let level = match level.to_lowercase().as_str() {
        "trace" => Level::TRACE,
        "debug" => Level::DEBUG,
        "info" => Level::INFO,
        "warn" => Level::WARN,
        "error" => Level::ERROR,
        _ => Level::INFO,
    };

    let env_filter = EnvFilter::builder()
        .with_default_directive(level.into())
        .from_env_lossy();

    let formatter = CleanFormatter::new(show_timestamps, colored);
    let fmt_layer = fmt::layer()
        .with_target(false)
        .with_level(false)
        .event_format(formatter);

    tracing_subscriber::registry()
        .with(env_filter)
        .with(fmt_layer)
        .try_init()
        .map_err(|e| {
            crate::utils::Error::validation(format!("Logging already initialized: {}", e))
        })?;

    Ok(())
}
