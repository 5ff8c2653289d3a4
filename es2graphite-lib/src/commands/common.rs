//! Logging setup shared by the commands.

use super::log_file::{LOG_BACKUPS, MAX_LOG_BYTES, RotatingLogFile};
use crate::Result;
use camino::Utf8Path;
use clap::ValueEnum;
use ohno::IntoAppError;

/// Log level for diagnostic output
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum LogLevel {
    /// No logging output
    None,

    /// Only error messages
    Error,

    /// Warning and error messages
    Warn,

    /// Info, warning, and error messages
    Info,

    /// Debug, info, warning, and error messages
    Debug,

    /// Trace, debug, info, warning, and error messages
    Trace,
}

/// Initialize the logger based on log level, writing to `log_file` when given and to stderr
/// otherwise. The file rolls over at 100 MiB and keeps five backups.
///
/// # Errors
///
/// Returns an error if the log file cannot be opened
pub fn init_logging(log_level: LogLevel, log_file: Option<&Utf8Path>) -> Result<()> {
    let level = match log_level {
        LogLevel::None => return Ok(()),
        LogLevel::Error => "error",
        LogLevel::Warn => "warn",
        LogLevel::Info => "info",
        LogLevel::Debug => "debug",
        LogLevel::Trace => "trace",
    };

    let env = env_logger::Env::default().filter_or("RUST_LOG", level);

    let mut builder = env_logger::Builder::from_env(env);
    let _ = builder
        .format_timestamp_secs()
        .format_module_path(false)
        .format_target(matches!(log_level, LogLevel::Debug | LogLevel::Trace));

    if let Some(path) = log_file {
        let file =
            RotatingLogFile::open(path, MAX_LOG_BYTES, LOG_BACKUPS).into_app_err_with(|| format!("opening log file '{path}'"))?;
        let _ = builder.target(env_logger::Target::Pipe(Box::new(file)));
    }

    // A logger may already be installed when commands run more than once in a process
    let _ = builder.try_init();
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use camino::Utf8PathBuf;

    #[test]
    fn test_none_installs_nothing() {
        init_logging(LogLevel::None, None).unwrap();
    }

    #[test]
    #[cfg_attr(miri, ignore = "Miri cannot call GetTempPathW")]
    fn test_log_file_is_created() {
        let tmp = tempfile::tempdir().unwrap();
        let path = Utf8PathBuf::try_from(tmp.path().join("es2graphite.log")).unwrap();
        init_logging(LogLevel::Warn, Some(&path)).unwrap();
        assert!(path.exists());
    }

    #[test]
    #[cfg_attr(miri, ignore = "Miri cannot call GetTempPathW")]
    fn test_unwritable_log_file_fails() {
        let tmp = tempfile::tempdir().unwrap();
        let path = Utf8PathBuf::try_from(tmp.path().join("missing").join("es2graphite.log")).unwrap();
        let _ = init_logging(LogLevel::Warn, Some(&path)).unwrap_err();
    }
}
