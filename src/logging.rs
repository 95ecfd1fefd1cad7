use crate::config::LogConfig;
use log::LevelFilter;
use simplelog::{ConfigBuilder, WriteLogger};
use std::path::PathBuf;
use thiserror::Error;

/// Return the default log file path
pub(crate) fn default_log_path() -> Option<PathBuf> {
    dirs::data_local_dir().map(|p| p.join("gridsnake").join("gridsnake.log"))
}

/// Install a logger that appends to the configured log file.  Logging is
/// left disabled if the configured level is `off`.
pub(crate) fn init(config: &LogConfig) -> Result<(), LogError> {
    if config.level == LevelFilter::Off {
        return Ok(());
    }
    let path = config
        .file
        .clone()
        .or_else(default_log_path)
        .ok_or(LogError::NoPath)?;
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs_err::create_dir_all(parent).map_err(LogError::Mkdir)?;
    }
    let file = fs_err::OpenOptions::new()
        .create(true)
        .append(true)
        .open(&path)
        .map_err(LogError::Open)?;
    let logcfg = ConfigBuilder::new()
        .set_target_level(LevelFilter::Off)
        .set_thread_level(LevelFilter::Off)
        .build();
    WriteLogger::init(config.level, logcfg, file)?;
    log::info!(
        "Starting {} v{}",
        env!("CARGO_PKG_NAME"),
        env!("CARGO_PKG_VERSION")
    );
    Ok(())
}

#[derive(Debug, Error)]
pub(crate) enum LogError {
    #[error("failed to determine path to local data directory for log file")]
    NoPath,
    #[error("failed to create log file directory")]
    Mkdir(#[source] std::io::Error),
    #[error("failed to open log file")]
    Open(#[source] std::io::Error),
    #[error("failed to install logger")]
    Install(#[from] log::SetLoggerError),
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn off_does_nothing() {
        let tmpdir = tempdir().unwrap();
        let path = tmpdir.path().join("logs").join("gridsnake.log");
        let cfg = LogConfig {
            file: Some(path.clone()),
            level: LevelFilter::Off,
        };
        init(&cfg).unwrap();
        assert!(!path.exists());
    }

    #[test]
    fn unopenable_log_file() {
        let tmpdir = tempdir().unwrap();
        let blocker = tmpdir.path().join("blocker");
        fs_err::write(&blocker, "").unwrap();
        let cfg = LogConfig {
            file: Some(blocker.join("gridsnake.log")),
            level: LevelFilter::Info,
        };
        assert!(matches!(init(&cfg), Err(LogError::Mkdir(_))));
    }
}
