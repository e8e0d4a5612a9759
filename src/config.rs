use std::{
    io,
    path::{Path, PathBuf},
};

use serde::Deserialize;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config file {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("failed to parse config file {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct MishConfig {
    pub prompt: String,
    pub log: LogConfig,
}

impl Default for MishConfig {
    fn default() -> Self {
        Self {
            prompt: "mish> ".into(),
            log: LogConfig::default(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct LogConfig {
    pub directory: PathBuf,
    pub file: String,
    /// `EnvFilter` directive used when `RUST_LOG` is not set.
    pub filter: String,
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            directory: PathBuf::from("."),
            file: "mish.log".into(),
            filter: "warn".into(),
        }
    }
}

impl MishConfig {
    pub const ENV_VAR: &'static str = "MISH_CONFIG";
    pub const FILE_NAME: &'static str = "mish.toml";

    /// Loads from `$MISH_CONFIG`, else `./mish.toml` if present, else defaults.
    pub fn load() -> Result<Self, ConfigError> {
        match Self::locate() {
            Some(path) => Self::from_path(&path),
            None => Ok(Self::default()),
        }
    }

    pub fn from_path(path: &Path) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_owned(),
            source,
        })?;

        toml::from_str(&contents).map_err(|source| ConfigError::Parse {
            path: path.to_owned(),
            source,
        })
    }

    fn locate() -> Option<PathBuf> {
        if let Some(path) = std::env::var_os(Self::ENV_VAR) {
            return Some(PathBuf::from(path));
        }

        let local = PathBuf::from(Self::FILE_NAME);
        local.is_file().then_some(local)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_file_is_all_defaults() {
        let config: MishConfig = toml::from_str("").unwrap();
        assert_eq!(config, MishConfig::default());
    }

    #[test]
    fn partial_log_section_keeps_other_defaults() {
        let config: MishConfig = toml::from_str(
            r#"
            prompt = "$ "

            [log]
            filter = "mish=trace"
            "#,
        )
        .unwrap();

        assert_eq!(config.prompt, "$ ");
        assert_eq!(config.log.filter, "mish=trace");
        assert_eq!(config.log.file, "mish.log");
        assert_eq!(config.log.directory, PathBuf::from("."));
    }

    #[test]
    fn from_path_reports_parse_errors() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("mish.toml");
        std::fs::write(&path, "prompt = [").unwrap();

        let err = MishConfig::from_path(&path).unwrap_err();
        assert!(matches!(err, ConfigError::Parse { .. }));
    }

    #[test]
    fn from_path_reports_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let err = MishConfig::from_path(&dir.path().join("absent.toml")).unwrap_err();
        assert!(matches!(err, ConfigError::Read { .. }));
    }
}
