use std::env;
use std::fs;
use std::path::{Path, PathBuf};

use clap::ValueEnum;
use serde::{Deserialize, Serialize};

use crate::error::CliError;

pub const CONFIG_ENV: &str = "LOXSCAN_CONFIG";
pub const LOCAL_CONFIG: &str = "loxscan.json";

/// Exit status used when the scan reported at least one lexical error.
pub const DEFAULT_ERROR_EXIT_CODE: u8 = 65;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// `<KIND> <lexeme> <literal>` lines
    #[default]
    Text,
    /// One JSON object per token
    Json,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub format: OutputFormat,
    /// `EnvFilter` directive used when `RUST_LOG` is not set.
    #[serde(default)]
    pub log_filter: Option<String>,
    #[serde(default = "default_error_exit_code")]
    pub error_exit_code: u8,
}

fn default_error_exit_code() -> u8 {
    DEFAULT_ERROR_EXIT_CODE
}

impl Default for Config {
    fn default() -> Self {
        Config {
            format: OutputFormat::default(),
            log_filter: None,
            error_exit_code: DEFAULT_ERROR_EXIT_CODE,
        }
    }
}

impl Config {
    /// Loads the config from `explicit`, then `$LOXSCAN_CONFIG`, then
    /// `./loxscan.json`. No file at all means defaults; a file that exists but
    /// does not parse is an error.
    pub fn load(explicit: Option<&Path>) -> Result<Self, CliError> {
        match Self::resolve_path(explicit) {
            Some(path) => Self::from_file(&path),
            None => Ok(Config::default()),
        }
    }

    pub fn resolve_path(explicit: Option<&Path>) -> Option<PathBuf> {
        let from_env = env::var_os(CONFIG_ENV).map(PathBuf::from);
        resolve(explicit, from_env, Path::new(LOCAL_CONFIG))
    }

    pub fn from_file(path: &Path) -> Result<Self, CliError> {
        let contents = fs::read_to_string(path).map_err(|source| CliError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::parse(&contents).map_err(|source| CliError::Config {
            path: path.to_path_buf(),
            source,
        })
    }

    pub fn parse(contents: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(contents)
    }
}

fn resolve(explicit: Option<&Path>, from_env: Option<PathBuf>, local: &Path) -> Option<PathBuf> {
    if let Some(path) = explicit {
        return Some(path.to_path_buf());
    }
    if let Some(path) = from_env.filter(|path| !path.as_os_str().is_empty()) {
        return Some(path);
    }
    local.is_file().then(|| local.to_path_buf())
}
