//! Logging setup for the CLI.
//!
//! Human-readable logs always go to stderr so stdout stays clean for command
//! output and the MCP stdio transport. When a log file or directory is
//! configured, a JSON layer is added that writes through a non-blocking
//! daily-rolling appender.

use std::path::{Path, PathBuf};

use anyhow::Context;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

/// Environment variable naming an explicit log file.
pub const LOG_PATH_ENV: &str = "ATS_MATCH_LOG_PATH";
/// Environment variable naming a log directory.
pub const LOG_DIR_ENV: &str = "ATS_MATCH_LOG_DIR";

const DEFAULT_LOG_FILE: &str = "ats-match.log";

/// Where, if anywhere, to write the JSON log file.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ObservabilityConfig {
    /// Directory holding the rolling log files.
    pub log_dir: Option<PathBuf>,
    /// File name prefix inside `log_dir`.
    pub file_name: String,
}

impl ObservabilityConfig {
    /// Resolve the log target from the environment, falling back to `config_log_dir`.
    ///
    /// `ATS_MATCH_LOG_PATH` wins over `ATS_MATCH_LOG_DIR`, which wins over
    /// the `log_dir` configuration value.
    pub fn from_env_with_overrides(config_log_dir: Option<PathBuf>) -> Self {
        Self::resolve(
            std::env::var_os(LOG_PATH_ENV).map(PathBuf::from),
            std::env::var_os(LOG_DIR_ENV).map(PathBuf::from),
            config_log_dir,
        )
    }

    fn resolve(
        log_path: Option<PathBuf>,
        env_dir: Option<PathBuf>,
        config_dir: Option<PathBuf>,
    ) -> Self {
        if let Some(path) = log_path.filter(|p| !p.as_os_str().is_empty()) {
            let file_name = path
                .file_name()
                .map_or_else(|| DEFAULT_LOG_FILE.to_string(), |n| n.to_string_lossy().into_owned());
            let dir = path
                .parent()
                .filter(|p| !p.as_os_str().is_empty())
                .map_or_else(|| PathBuf::from("."), Path::to_path_buf);
            return Self {
                log_dir: Some(dir),
                file_name,
            };
        }

        Self {
            log_dir: env_dir
                .filter(|p| !p.as_os_str().is_empty())
                .or(config_dir),
            file_name: DEFAULT_LOG_FILE.to_string(),
        }
    }
}

/// Build the log filter.
///
/// `RUST_LOG` wins when set. Otherwise `--quiet` means errors only, each `-v`
/// raises the level one step, and the configured level is the baseline.
pub fn env_filter(quiet: bool, verbose: u8, config_level: &str) -> EnvFilter {
    if let Ok(filter) = EnvFilter::try_from_default_env() {
        return filter;
    }
    EnvFilter::new(filter_directive(quiet, verbose, config_level))
}

fn filter_directive(quiet: bool, verbose: u8, config_level: &str) -> &str {
    if quiet {
        return "error";
    }
    match verbose {
        0 => config_level,
        1 => "debug",
        _ => "trace",
    }
}

/// Install the global subscriber.
///
/// Returns the appender guard when a log file is in use; keep it alive until
/// exit so buffered lines are flushed.
pub fn init_observability(
    config: &ObservabilityConfig,
    filter: EnvFilter,
) -> anyhow::Result<Option<WorkerGuard>> {
    let stderr_layer = fmt::layer().with_writer(std::io::stderr).with_target(false);

    let Some(ref dir) = config.log_dir else {
        tracing_subscriber::registry()
            .with(filter)
            .with(stderr_layer)
            .try_init()
            .context("failed to install tracing subscriber")?;
        return Ok(None);
    };

    std::fs::create_dir_all(dir)
        .with_context(|| format!("failed to create log directory {}", dir.display()))?;
    let appender = tracing_appender::rolling::daily(dir, &config.file_name);
    let (writer, guard) = tracing_appender::non_blocking(appender);
    let file_layer = fmt::layer().json().with_writer(writer);

    tracing_subscriber::registry()
        .with(filter)
        .with(stderr_layer)
        .with(file_layer)
        .try_init()
        .context("failed to install tracing subscriber")?;
    Ok(Some(guard))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn log_path_wins_over_directories() {
        let cfg = ObservabilityConfig::resolve(
            Some(PathBuf::from("/var/log/atsm/run.log")),
            Some(PathBuf::from("/tmp/env")),
            Some(PathBuf::from("/tmp/config")),
        );
        assert_eq!(cfg.log_dir, Some(PathBuf::from("/var/log/atsm")));
        assert_eq!(cfg.file_name, "run.log");
    }

    #[test]
    fn bare_log_file_goes_to_current_dir() {
        let cfg = ObservabilityConfig::resolve(Some(PathBuf::from("run.log")), None, None);
        assert_eq!(cfg.log_dir, Some(PathBuf::from(".")));
    }

    #[test]
    fn env_dir_wins_over_config_dir() {
        let cfg = ObservabilityConfig::resolve(
            None,
            Some(PathBuf::from("/tmp/env")),
            Some(PathBuf::from("/tmp/config")),
        );
        assert_eq!(cfg.log_dir, Some(PathBuf::from("/tmp/env")));
        assert_eq!(cfg.file_name, DEFAULT_LOG_FILE);
    }

    #[test]
    fn no_targets_means_stderr_only() {
        let cfg = ObservabilityConfig::resolve(None, None, None);
        assert!(cfg.log_dir.is_none());
    }

    #[test]
    fn quiet_beats_verbose() {
        assert_eq!(filter_directive(true, 3, "info"), "error");
    }

    #[test]
    fn verbosity_steps() {
        assert_eq!(filter_directive(false, 0, "warn"), "warn");
        assert_eq!(filter_directive(false, 1, "warn"), "debug");
        assert_eq!(filter_directive(false, 2, "warn"), "trace");
    }
}
