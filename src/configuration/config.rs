use super::types::*;
use crate::controller::command::Command;
use crate::error_handling::types::ConfigError;
use crate::storage::file_storage::STORAGE_DIR_ENV;
use clap::Parser;
use log::debug;
use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};

/// Application configuration.
///
/// Loaded from an optional TOML file and then overridden by command-line flags.
///
/// # Examples
///
/// ```toml
/// [storage]
/// path = "/var/lib/todolist"
/// quota_bytes = 5242880
/// ```
#[derive(Debug, Default, PartialEq, Clone, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    pub storage: StorageConfig,
}

impl Config {
    /// Reads and validates a TOML configuration file.
    pub fn from_file(path: &Path) -> Result<Config, ConfigError> {
        let content = fs::read_to_string(path)?;
        let config = Self::from_toml(&content)?;
        debug!("Loaded configuration from {}", path.display());
        Ok(config)
    }

    pub fn from_toml(content: &str) -> Result<Config, ConfigError> {
        let config: Config =
            toml::from_str(content).map_err(|e| ConfigError::TomlError(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Builds the effective configuration: file first, then flag overrides.
    pub fn from_args(args: &CliArgs) -> Result<Config, ConfigError> {
        let mut config = match &args.config {
            Some(path) => Self::from_file(path)?,
            None => Config::default(),
        };
        if let Some(dir) = &args.storage_dir {
            config.storage.path = Some(dir.clone());
        }
        config.validate()?;
        Ok(config)
    }

    /// A storage path must be a directory when it already exists, and a
    /// quota must be positive.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.storage.quota_bytes == Some(0) {
            return Err(ConfigError::TomlError(
                "storage.quota_bytes must be greater than zero".to_string(),
            ));
        }
        if let Some(path) = &self.storage.path {
            if path.exists() && !path.is_dir() {
                return Err(ConfigError::DirectoryDoesNotExist(format!(
                    "{} is not a directory",
                    path.display()
                )));
            }
        }
        Ok(())
    }
}

/// Command-line arguments of the `todolist` binary.
#[derive(Parser, Debug, Clone)]
#[command(name = "todolist")]
#[command(version)]
#[command(about = "Users, session and to-do items kept as JSON documents")]
pub struct CliArgs {
    /// Path to a TOML configuration file
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Directory holding the JSON documents
    #[arg(long, global = true, env = STORAGE_DIR_ENV)]
    pub storage_dir: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Command,
}

impl CliArgs {
    pub fn from_args() -> Self {
        CliArgs::parse()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;
    use tempfile::TempDir;

    #[test]
    fn test_from_toml() {
        let config = Config::from_toml("[storage]\npath = \"/tmp\"\n").unwrap();
        assert_eq!(config.storage.path, Some(PathBuf::from("/tmp")));

        let empty = Config::from_toml("").unwrap();
        assert_eq!(empty, Config::default());
        assert_eq!(empty.storage.quota_bytes, None);
    }

    #[test]
    fn test_quota_from_toml() {
        let config = Config::from_toml("[storage]\nquota_bytes = 5242880\n").unwrap();
        assert_eq!(config.storage.quota_bytes, Some(5_242_880));
        assert_eq!(config.storage.path, None);

        let err = Config::from_toml("[storage]\nquota_bytes = 0\n").unwrap_err();
        assert!(matches!(err, ConfigError::TomlError(_)));
    }

    #[test]
    fn test_unknown_keys_rejected() {
        let err = Config::from_toml("[storage]\ndir = \"/tmp\"\n").unwrap_err();
        assert!(matches!(err, ConfigError::TomlError(_)));
    }

    #[test]
    fn test_storage_path_must_be_a_directory() {
        let dir = TempDir::new().unwrap();
        let file = dir.path().join("not_a_dir");
        fs::write(&file, "").unwrap();
        let config = Config {
            storage: StorageConfig {
                path: Some(file),
                quota_bytes: None,
            },
        };
        assert!(matches!(config.validate(), Err(ConfigError::DirectoryDoesNotExist(_))));
    }

    #[test]
    #[serial]
    fn test_flag_overrides_file() {
        let dir = TempDir::new().unwrap();
        let file = dir.path().join("todolist.toml");
        fs::write(&file, "[storage]\npath = \"/from/file\"\n").unwrap();

        let args = CliArgs::try_parse_from([
            "todolist",
            "--config",
            file.to_str().unwrap(),
            "--storage-dir",
            dir.path().to_str().unwrap(),
            "users",
        ])
        .unwrap_or_else(|e| panic!("{}", e));
        let config = Config::from_args(&args).unwrap();
        assert_eq!(config.storage.path, Some(dir.path().to_path_buf()));

        let args = CliArgs::try_parse_from(["todolist", "--config", file.to_str().unwrap(), "users"])
            .unwrap_or_else(|e| panic!("{}", e));
        let config = Config::from_args(&args).unwrap();
        assert_eq!(config.storage.path, Some(PathBuf::from("/from/file")));
    }

    #[test]
    #[serial]
    fn test_storage_dir_from_env() {
        std::env::set_var(STORAGE_DIR_ENV, "/from/env");
        let args = CliArgs::try_parse_from(["todolist", "whoami"]);
        std::env::remove_var(STORAGE_DIR_ENV);

        let args = args.unwrap_or_else(|e| panic!("{}", e));
        assert_eq!(args.storage_dir, Some(PathBuf::from("/from/env")));
    }

    #[test]
    fn test_missing_file() {
        let err = Config::from_file(Path::new("/definitely/not/here.toml")).unwrap_err();
        assert!(matches!(err, ConfigError::IoError(_)));
    }
}
