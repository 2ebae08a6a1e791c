//! Configuration management for the work object tools
//!
//! Values come from an optional YAML or JSON file, then command line flags
//! override them. Defaults cover every field so an empty file is valid.

use crate::location::{Location, MAX_REGIONS, MAX_ZONES};
use crate::{Error, Result};
use clap::{Args, ValueEnum};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::{Path, PathBuf};

/// Log levels
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

impl LogLevel {
    /// Directive string for an `EnvFilter`
    pub fn as_str(self) -> &'static str {
        match self {
            LogLevel::Error => "error",
            LogLevel::Warn => "warn",
            LogLevel::Info => "info",
            LogLevel::Debug => "debug",
            LogLevel::Trace => "trace",
        }
    }
}

impl From<LogLevel> for tracing::Level {
    fn from(level: LogLevel) -> Self {
        match level {
            LogLevel::Error => tracing::Level::ERROR,
            LogLevel::Warn => tracing::Level::WARN,
            LogLevel::Info => tracing::Level::INFO,
            LogLevel::Debug => tracing::Level::DEBUG,
            LogLevel::Trace => tracing::Level::TRACE,
        }
    }
}

impl fmt::Display for LogLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Log output formats
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    /// Multi-line human readable output
    Pretty,
    /// One JSON object per event
    Json,
    /// Single-line human readable output
    Compact,
}

impl fmt::Display for LogFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LogFormat::Pretty => write!(f, "pretty"),
            LogFormat::Json => write!(f, "json"),
            LogFormat::Compact => write!(f, "compact"),
        }
    }
}

/// Active width of the chain hierarchy
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct HierarchyConfig {
    /// Number of region chains
    #[serde(default = "default_regions")]
    pub regions: u8,
    /// Number of zone chains in each region
    #[serde(default = "default_zones_per_region")]
    pub zones_per_region: u8,
}

impl HierarchyConfig {
    /// Check both widths are within the hard location bounds
    pub fn validate(&self) -> Result<()> {
        if self.regions == 0 || self.regions > MAX_REGIONS {
            return Err(Error::config(format!(
                "regions must be between 1 and {}, got {}",
                MAX_REGIONS, self.regions
            )));
        }
        if self.zones_per_region == 0 || self.zones_per_region > MAX_ZONES {
            return Err(Error::config(format!(
                "zones_per_region must be between 1 and {}, got {}",
                MAX_ZONES, self.zones_per_region
            )));
        }
        Ok(())
    }

    /// Every zone location, region-major
    pub fn locations(&self) -> Vec<Location> {
        (0..self.regions)
            .flat_map(|region| {
                (0..self.zones_per_region).filter_map(move |zone| Location::zone(region, zone).ok())
            })
            .collect()
    }
}

impl Default for HierarchyConfig {
    fn default() -> Self {
        Self {
            regions: default_regions(),
            zones_per_region: default_zones_per_region(),
        }
    }
}

/// Complete configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Config {
    /// Directory holding the node-info file
    #[serde(default = "default_data_dir")]
    pub data_dir: PathBuf,

    /// Node-info file name inside `data_dir`
    #[serde(default = "default_node_info_file")]
    pub node_info_file: String,

    #[serde(default = "default_log_level")]
    pub log_level: LogLevel,

    #[serde(default = "default_log_format")]
    pub log_format: LogFormat,

    #[serde(default)]
    pub hierarchy: HierarchyConfig,
}

/// Command line flags that override file values
#[derive(Debug, Clone, Default, Args)]
pub struct ConfigOverrides {
    /// Configuration file path (YAML or JSON)
    #[arg(long, value_name = "FILE", env = "WO_CONFIG")]
    pub config_file: Option<PathBuf>,

    /// Data directory for the node-info file
    #[arg(long, value_name = "DIR")]
    pub data_dir: Option<PathBuf>,

    /// Node-info file name
    #[arg(long, value_name = "NAME")]
    pub node_info_file: Option<String>,

    /// Log level
    #[arg(short = 'l', long)]
    pub log_level: Option<LogLevel>,

    /// Log output format
    #[arg(long)]
    pub log_format: Option<LogFormat>,

    /// Number of regions in the hierarchy
    #[arg(long)]
    pub regions: Option<u8>,

    /// Number of zones per region
    #[arg(long)]
    pub zones_per_region: Option<u8>,
}

impl Config {
    /// Load the file named by the overrides (if any), apply the overrides and validate
    pub async fn load(overrides: &ConfigOverrides) -> Result<Self> {
        let config = match &overrides.config_file {
            Some(path) => Self::load_from_file(path).await?,
            None => Self::default(),
        };

        let config = config.merge_with_overrides(overrides);
        config.validate()?;
        Ok(config)
    }

    /// Load configuration from file, JSON by extension, YAML otherwise
    pub async fn load_from_file(path: &Path) -> Result<Self> {
        let content = tokio::fs::read_to_string(path).await?;

        if path.extension().and_then(|s| s.to_str()) == Some("json") {
            serde_json::from_str(&content).map_err(Error::from)
        } else {
            serde_yaml::from_str(&content).map_err(Error::from)
        }
    }

    /// Command line values take precedence over file values
    pub fn merge_with_overrides(mut self, overrides: &ConfigOverrides) -> Self {
        if let Some(data_dir) = &overrides.data_dir {
            self.data_dir = data_dir.clone();
        }
        if let Some(name) = &overrides.node_info_file {
            self.node_info_file = name.clone();
        }
        if let Some(level) = overrides.log_level {
            self.log_level = level;
        }
        if let Some(format) = overrides.log_format {
            self.log_format = format;
        }
        if let Some(regions) = overrides.regions {
            self.hierarchy.regions = regions;
        }
        if let Some(zones) = overrides.zones_per_region {
            self.hierarchy.zones_per_region = zones;
        }
        self
    }

    /// Validate configuration
    pub fn validate(&self) -> Result<()> {
        if self.node_info_file.trim().is_empty() {
            return Err(Error::config("node_info_file must not be empty"));
        }
        if Path::new(&self.node_info_file).components().count() != 1 {
            return Err(Error::config(format!(
                "node_info_file must be a plain file name, got {}",
                self.node_info_file
            )));
        }
        self.hierarchy.validate()
    }

    /// Full path of the node-info file
    pub fn node_info_path(&self) -> PathBuf {
        self.data_dir.join(&self.node_info_file)
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            data_dir: default_data_dir(),
            node_info_file: default_node_info_file(),
            log_level: default_log_level(),
            log_format: default_log_format(),
            hierarchy: HierarchyConfig::default(),
        }
    }
}

// Default value functions for serde
fn default_data_dir() -> PathBuf { PathBuf::from("./data") }
fn default_node_info_file() -> String { "node.info".to_string() }
fn default_log_level() -> LogLevel { LogLevel::Info }
fn default_log_format() -> LogFormat { LogFormat::Pretty }
fn default_regions() -> u8 { 4 }
fn default_zones_per_region() -> u8 { 4 }

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::{Builder, NamedTempFile};

    #[test]
    fn test_config_defaults() {
        let config = Config::default();
        assert_eq!(config.data_dir, PathBuf::from("./data"));
        assert_eq!(config.node_info_file, "node.info");
        assert_eq!(config.log_level, LogLevel::Info);
        assert_eq!(config.hierarchy, HierarchyConfig { regions: 4, zones_per_region: 4 });
        assert_eq!(config.node_info_path(), PathBuf::from("./data/node.info"));
        assert!(config.validate().is_ok());
    }

    #[tokio::test]
    async fn test_config_from_yaml() {
        let yaml_content = r#"
data_dir: /var/lib/quai
log_level: debug
hierarchy:
  regions: 3
"#;

        let mut temp_file = NamedTempFile::new().unwrap();
        write!(temp_file, "{}", yaml_content).unwrap();

        let config = Config::load_from_file(temp_file.path()).await.unwrap();

        assert_eq!(config.data_dir, PathBuf::from("/var/lib/quai"));
        assert_eq!(config.log_level, LogLevel::Debug);
        assert_eq!(config.hierarchy.regions, 3);
        assert_eq!(config.hierarchy.zones_per_region, 4);
        assert_eq!(config.node_info_file, "node.info");
    }

    #[tokio::test]
    async fn test_config_from_json() {
        let mut temp_file = Builder::new().suffix(".json").tempfile().unwrap();
        write!(temp_file, r#"{{"log_format": "json", "node_info_file": "peer.info"}}"#).unwrap();

        let config = Config::load_from_file(temp_file.path()).await.unwrap();
        assert_eq!(config.log_format, LogFormat::Json);
        assert_eq!(config.node_info_file, "peer.info");
    }

    #[tokio::test]
    async fn test_overrides_take_precedence() {
        let mut temp_file = NamedTempFile::new().unwrap();
        write!(temp_file, "log_level: warn\nhierarchy:\n  regions: 2\n").unwrap();

        let overrides = ConfigOverrides {
            config_file: Some(temp_file.path().to_path_buf()),
            log_level: Some(LogLevel::Trace),
            zones_per_region: Some(2),
            ..Default::default()
        };
        let config = Config::load(&overrides).await.unwrap();
        assert_eq!(config.log_level, LogLevel::Trace);
        assert_eq!(config.hierarchy, HierarchyConfig { regions: 2, zones_per_region: 2 });
    }

    #[tokio::test]
    async fn test_load_rejects_invalid_hierarchy() {
        let overrides = ConfigOverrides {
            regions: Some(17),
            ..Default::default()
        };
        let err = Config::load(&overrides).await.unwrap_err();
        assert_eq!(err.category(), "config");
    }

    #[test]
    fn test_validate() {
        let mut config = Config::default();
        config.hierarchy.zones_per_region = 0;
        assert!(config.validate().is_err());

        let mut config = Config::default();
        config.node_info_file = "../escape".to_string();
        assert!(config.validate().is_err());

        let mut config = Config::default();
        config.hierarchy = HierarchyConfig { regions: 16, zones_per_region: 16 };
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_hierarchy_locations() {
        let locations = HierarchyConfig::default().locations();
        assert_eq!(locations.len(), 16);
        assert_eq!(locations[0], Location::zone(0, 0).unwrap());
        assert_eq!(locations[5], Location::zone(1, 1).unwrap());
        assert_eq!(locations[15], Location::zone(3, 3).unwrap());

        let narrow = HierarchyConfig { regions: 1, zones_per_region: 2 };
        assert_eq!(narrow.locations().len(), 2);
    }

    #[test]
    fn test_log_level_display() {
        assert_eq!(LogLevel::Debug.to_string(), "debug");
        assert_eq!(LogFormat::Compact.to_string(), "compact");
        assert_eq!(tracing::Level::from(LogLevel::Warn), tracing::Level::WARN);
    }
}
