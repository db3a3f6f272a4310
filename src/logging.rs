//! Tracing subscriber setup

use std::io;
use std::path::Path;

use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::EnvFilter;
use tracing_subscriber::fmt::writer::BoxMakeWriter;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

use crate::config::{LogConfig, LogFormat};

const LOG_FILE_NAME: &str = "version-range.log";

/// Build the env filter.
///
/// An explicit `level_override` wins, then a valid RUST_LOG directive, then
/// the configured level.
fn build_filter(
    level_override: Option<&str>,
    env_directive: Option<String>,
    level: &str,
) -> EnvFilter {
    level_override
        .map(str::to_string)
        .into_iter()
        .chain(env_directive)
        .filter(|directive| !directive.trim().is_empty())
        .find_map(|directive| EnvFilter::try_new(directive).ok())
        .unwrap_or_else(|| EnvFilter::new(level))
}

/// Initialize the global subscriber.
///
/// Logs go to stderr unless `config.file` is set, in which case they are
/// appended to `version-range.log` under `log_dir`. The returned guard must be
/// held until exit so buffered file output is flushed. `level_override` takes
/// precedence over both RUST_LOG and `config.level`.
pub fn init_logging(
    config: &LogConfig,
    level_override: Option<&str>,
    log_dir: &Path,
) -> io::Result<Option<WorkerGuard>> {
    let (writer, guard) = if config.file {
        std::fs::create_dir_all(log_dir)?;
        let appender = tracing_appender::rolling::never(log_dir, LOG_FILE_NAME);
        let (non_blocking, guard) = tracing_appender::non_blocking(appender);
        (BoxMakeWriter::new(non_blocking), Some(guard))
    } else {
        (BoxMakeWriter::new(io::stderr), None)
    };

    let registry = tracing_subscriber::registry().with(build_filter(
        level_override,
        std::env::var(EnvFilter::DEFAULT_ENV).ok(),
        &config.level,
    ));
    let with_ansi = !config.file;

    let initialized = match config.format {
        LogFormat::Json => registry
            .with(
                tracing_subscriber::fmt::layer()
                    .json()
                    .with_target(true)
                    .with_writer(writer),
            )
            .try_init(),
        LogFormat::Text => registry
            .with(
                tracing_subscriber::fmt::layer()
                    .with_target(false)
                    .with_ansi(with_ansi)
                    .with_writer(writer),
            )
            .try_init(),
    };
    initialized.map_err(io::Error::other)?;

    Ok(guard)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn build_filter_uses_configured_level_without_env() {
        assert_eq!(
            build_filter(None, None, "debug").to_string().to_lowercase(),
            "debug"
        );
    }

    #[test]
    fn build_filter_prefers_env_directive() {
        assert_eq!(
            build_filter(None, Some("warn".to_string()), "debug")
                .to_string()
                .to_lowercase(),
            "warn"
        );
    }

    #[test]
    fn build_filter_prefers_explicit_level_over_env() {
        assert_eq!(
            build_filter(Some("trace"), Some("warn".to_string()), "debug")
                .to_string()
                .to_lowercase(),
            "trace"
        );
    }
}
