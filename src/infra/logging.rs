use std::path::{Path, PathBuf};

use tracing_appender::rolling::{RollingFileAppender, Rotation};
use tracing_subscriber::EnvFilter;

use crate::infra::{config::LogConfig, error::AppError};

/// Installs the global subscriber. Output goes to a file so that the
/// terminal UI is not overwritten by log lines.
pub fn init(config: &LogConfig, log_dir: &Path) -> Result<(), AppError> {
    let path = log_file_path(config, log_dir);
    let (dir, file_name) = split_log_path(&path);
    let appender = RollingFileAppender::builder()
        .rotation(Rotation::NEVER)
        .filename_prefix(file_name.to_string_lossy().into_owned())
        .build(dir)
        .map_err(|error| AppError::LoggingInit(Box::new(error)))?;

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&config.level)),
        )
        .with_writer(appender)
        .with_ansi(false)
        .with_target(true)
        .try_init()
        .map_err(AppError::LoggingInit)
}

fn log_file_path(config: &LogConfig, log_dir: &Path) -> PathBuf {
    let file = Path::new(&config.file);
    if file.is_absolute() {
        file.to_path_buf()
    } else {
        log_dir.join(file)
    }
}

fn split_log_path(path: &Path) -> (PathBuf, PathBuf) {
    let dir = path
        .parent()
        .map(Path::to_path_buf)
        .unwrap_or_else(|| PathBuf::from("."));
    let file_name = path
        .file_name()
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from("carechat.log"));
    (dir, file_name)
}
