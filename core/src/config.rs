//! Configuration for the core crate
//!
//! This module provides configuration options for the core crate,
//! including table behaviour and logging.

use std::path::Path;
use log::LevelFilter;
use serde::{Serialize, Deserialize};

use crate::error::{CoreError, Result};

/// Table configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TableConfig {
    /// Whether adding a column whose name is already taken is rejected
    pub unique_column_names: bool,

    /// Whether every mutation re-checks the whole table afterwards
    pub verify_invariants: bool,
}

impl Default for TableConfig {
    fn default() -> Self {
        TableConfig {
            unique_column_names: true,
            verify_invariants: false,
        }
    }
}

/// Core configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CoreConfig {
    /// Table configuration
    pub table: TableConfig,

    /// Log filter, in `env_logger` syntax
    pub log_level: String,

    /// Whether to enable debug mode
    pub debug_mode: bool,
}

impl Default for CoreConfig {
    fn default() -> Self {
        CoreConfig {
            table: TableConfig::default(),
            log_level: "info".to_string(),
            debug_mode: false,
        }
    }
}

impl CoreConfig {
    /// Create a new configuration with default values
    pub fn new() -> Self {
        Self::default()
    }

    /// Load configuration from a JSON file
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let file = std::fs::File::open(path)?;
        let config = serde_json::from_reader(file)?;
        Ok(config)
    }

    /// Save configuration to a JSON file
    pub fn to_file(&self, path: impl AsRef<Path>) -> Result<()> {
        let file = std::fs::File::create(path)?;
        serde_json::to_writer_pretty(file, self)?;
        Ok(())
    }

    /// Create a development configuration
    pub fn development() -> Self {
        let mut config = Self::default();
        config.debug_mode = true;
        config.log_level = "debug".to_string();
        config.table.verify_invariants = true;
        config
    }

    /// Create a production configuration
    pub fn production() -> Self {
        let mut config = Self::default();
        config.debug_mode = false;
        config.log_level = "info".to_string();
        config.table.verify_invariants = false;
        config
    }

    /// Create a testing configuration
    pub fn testing() -> Self {
        let mut config = Self::default();
        config.debug_mode = true;
        config.log_level = "trace".to_string();
        config.table.verify_invariants = true;
        config
    }

    /// Level of the most verbose directive in [`CoreConfig::log_level`]
    pub fn level_filter(&self) -> Result<LevelFilter> {
        self.check_directives()?;
        Ok(env_logger::Builder::new()
            .parse_filters(&self.log_level)
            .build()
            .filter())
    }

    /// Reject directives that `env_logger` would only warn about and skip
    fn check_directives(&self) -> Result<()> {
        let directives = self.log_level.split('/').next().unwrap_or_default();
        for directive in directives.split(',').map(str::trim).filter(|d| !d.is_empty()) {
            let mut parts = directive.split('=');
            let _module = parts.next();
            let level = parts.next().map(str::trim).unwrap_or_default();
            if parts.next().is_some() || (!level.is_empty() && level.parse::<LevelFilter>().is_err()) {
                return Err(CoreError::ConfigError(format!(
                    "invalid log directive {:?}",
                    directive
                )));
            }
        }
        Ok(())
    }

    /// Install the global logger using [`CoreConfig::log_level`]
    ///
    /// Fails if the filter does not parse or a logger is already installed.
    pub fn init_logging(&self) -> Result<()> {
        self.level_filter()?;
        env_logger::Builder::new()
            .parse_filters(&self.log_level)
            .format_timestamp_millis()
            .format_module_path(self.debug_mode)
            .try_init()
            .map_err(crate::error::to_config_error)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::NamedTempFile;

    #[test]
    fn test_default_config() {
        let config = CoreConfig::default();

        assert!(config.table.unique_column_names);
        assert!(!config.table.verify_invariants);
        assert_eq!(config.log_level, "info");
        assert!(!config.debug_mode);
    }

    #[test]
    fn test_development_config() {
        let config = CoreConfig::development();

        assert!(config.debug_mode);
        assert_eq!(config.log_level, "debug");
        assert!(config.table.verify_invariants);
    }

    #[test]
    fn test_production_config() {
        let config = CoreConfig::production();

        assert!(!config.debug_mode);
        assert_eq!(config.log_level, "info");
        assert!(!config.table.verify_invariants);
    }

    #[test]
    fn test_testing_config() {
        let config = CoreConfig::testing();

        assert!(config.debug_mode);
        assert_eq!(config.level_filter().unwrap(), LevelFilter::Trace);
        assert!(config.table.verify_invariants);
    }

    #[test]
    fn test_level_filter_directives() {
        let mut config = CoreConfig::default();

        config.log_level = "warn,dualgrid_core::table=debug".to_string();
        assert_eq!(config.level_filter().unwrap(), LevelFilter::Debug);

        config.log_level = "error,dualgrid_core".to_string();
        assert_eq!(config.level_filter().unwrap(), LevelFilter::Trace);

        config.log_level = "info,dualgrid_core::chain=trace/appended".to_string();
        assert_eq!(config.level_filter().unwrap(), LevelFilter::Trace);

        config.log_level = "dualgrid_core=loud".to_string();
        assert!(matches!(config.level_filter(), Err(CoreError::ConfigError(_))));

        config.log_level = "dualgrid_core=warn=info".to_string();
        assert!(matches!(config.level_filter(), Err(CoreError::ConfigError(_))));
    }

    #[test]
    fn test_init_logging_installs_once() {
        let mut broken = CoreConfig::testing();
        broken.log_level = "dualgrid_core=loud".to_string();
        assert!(broken.init_logging().is_err());

        let config = CoreConfig::testing();
        config.init_logging().unwrap();
        log::debug!("logger installed");

        assert!(matches!(config.init_logging(), Err(CoreError::ConfigError(_))));
    }

    #[test]
    fn test_config_serialization() {
        let config = CoreConfig::development();

        let json = serde_json::to_string_pretty(&config).unwrap();
        let deserialized: CoreConfig = serde_json::from_str(&json).unwrap();

        assert_eq!(deserialized, config);
    }

    #[test]
    fn test_config_file_io() {
        let mut config = CoreConfig::default();
        config.table.unique_column_names = false;

        let temp_file = NamedTempFile::new().unwrap();
        config.to_file(temp_file.path()).unwrap();
        let loaded_config = CoreConfig::from_file(temp_file.path()).unwrap();

        assert_eq!(loaded_config, config);
        assert!(!loaded_config.table.unique_column_names);
    }

    #[test]
    fn test_missing_file_is_io_error() {
        let dir = tempfile::tempdir().unwrap();

        let result = CoreConfig::from_file(dir.path().join("absent.json"));

        assert!(matches!(result, Err(CoreError::IoError(_))));
    }
}
