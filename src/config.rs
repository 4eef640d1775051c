//! Runtime settings read from the environment (after `.env` is loaded).

use std::ffi::OsString;
use std::path::{Path, PathBuf};

pub const DEFAULT_LOG_FILE_PATH: &str = "logs/kpi_processor.log";
pub const DEFAULT_OUTPUT_DIR: &str = "output";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settings {
    /// Rolling JSON log file; the directory part becomes the appender directory.
    pub log_file_path: PathBuf,
    /// Used when no `--output-dir` is given on the command line.
    pub output_dir: PathBuf,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            log_file_path: PathBuf::from(DEFAULT_LOG_FILE_PATH),
            output_dir: PathBuf::from(DEFAULT_OUTPUT_DIR),
        }
    }
}

impl Settings {
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var_os(key))
    }

    /// Builds settings from an arbitrary variable lookup. Empty values count
    /// as unset.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<OsString>,
    {
        let var = |key: &str, default: &str| {
            lookup(key)
                .filter(|v| !v.is_empty())
                .map(PathBuf::from)
                .unwrap_or_else(|| PathBuf::from(default))
        };

        Self {
            log_file_path: var("LOG_FILE_PATH", DEFAULT_LOG_FILE_PATH),
            output_dir: var("KPI_OUTPUT_DIR", DEFAULT_OUTPUT_DIR),
        }
    }

    pub fn log_dir(&self) -> &Path {
        self.log_file_path
            .parent()
            .filter(|p| !p.as_os_str().is_empty())
            .unwrap_or(Path::new("logs"))
    }

    pub fn log_file_name(&self) -> &Path {
        self.log_file_path
            .file_name()
            .map(Path::new)
            .unwrap_or(Path::new("kpi_processor.log"))
    }

    /// The command-line directory wins over the configured one.
    pub fn resolve_output_dir(&self, cli: Option<PathBuf>) -> PathBuf {
        cli.unwrap_or_else(|| self.output_dir.clone())
    }
}
