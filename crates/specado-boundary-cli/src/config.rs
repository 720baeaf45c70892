//! Configuration management for the CLI
//!
//! This module handles loading configuration from:
//! - Default values
//! - Configuration files (TOML/YAML/JSON)
//! - Command-line arguments, which take precedence over both

use crate::cli::OutputFormat;
use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Main configuration structure
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Catalog used when a command does not name one
    pub catalog: Option<PathBuf>,

    /// Output settings
    pub output: OutputConfig,

    /// Extraction settings
    pub extract: ExtractConfig,

    /// Logging settings
    pub logging: LoggingSection,
}

/// Output configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    /// Default output format
    pub format: OutputFormat,

    /// Use colored output by default
    pub color: bool,
}

/// Extraction configuration
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExtractConfig {
    /// Include absent attributes as null unless overridden
    pub show_absent: bool,
}

/// Logging configuration
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingSection {
    /// Log level filter (trace, debug, info, warn, error)
    pub level: Option<String>,

    /// Log format (compact, full, json)
    pub format: Option<String>,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            format: OutputFormat::Human,
            color: true,
        }
    }
}

/// Supported configuration file formats
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ConfigFormat {
    Toml,
    Yaml,
    Json,
}

impl ConfigFormat {
    fn from_path(path: &Path) -> Result<Self> {
        match path
            .extension()
            .and_then(|ext| ext.to_str())
            .map(|ext| ext.to_lowercase())
            .as_deref()
        {
            Some("toml") => Ok(Self::Toml),
            Some("yaml") | Some("yml") => Ok(Self::Yaml),
            Some("json") => Ok(Self::Json),
            _ => Err(Error::InvalidFormat {
                path: path.to_path_buf(),
                expected: "TOML, YAML, or JSON".to_string(),
            }),
        }
    }
}

impl Config {
    /// Load configuration from a file
    pub fn from_file(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Err(Error::FileNotFound {
                path: path.to_path_buf(),
            });
        }

        let format = ConfigFormat::from_path(path)?;
        let content = std::fs::read_to_string(path)?;

        let mut config: Self = match format {
            ConfigFormat::Toml => toml::from_str(&content)?,
            ConfigFormat::Yaml => serde_yaml::from_str(&content)?,
            ConfigFormat::Json => serde_json::from_str(&content)?,
        };

        // A relative catalog is relative to the file that names it
        if let (Some(catalog), Some(dir)) = (config.catalog.as_mut(), path.parent()) {
            if catalog.is_relative() {
                *catalog = dir.join(&*catalog);
            }
        }

        Ok(config)
    }

    /// Load configuration from the first default location that exists
    pub fn load() -> Result<(Self, Option<PathBuf>)> {
        for path in Self::default_config_paths() {
            if path.exists() {
                let config = Self::from_file(&path).map_err(|e| {
                    Error::config(format!("Failed to load {}: {}", path.display(), e))
                })?;
                return Ok((config, Some(path)));
            }
        }

        Ok((Self::default(), None))
    }

    /// Load configuration from a specific file or default locations
    pub fn load_with_file(file: Option<&Path>) -> Result<(Self, Option<PathBuf>)> {
        match file {
            Some(path) => Ok((Self::from_file(path)?, Some(path.to_path_buf()))),
            None => Self::load(),
        }
    }

    /// Get default configuration file paths to check
    fn default_config_paths() -> Vec<PathBuf> {
        let mut paths = vec![
            PathBuf::from(".specado-boundary.toml"),
            PathBuf::from(".specado-boundary.yaml"),
            PathBuf::from(".specado-boundary.json"),
        ];

        if let Some(config_dir) = dirs::config_dir() {
            let boundary_dir = config_dir.join("specado-boundary");
            paths.push(boundary_dir.join("config.toml"));
            paths.push(boundary_dir.join("config.yaml"));
        }

        paths
    }

    /// Resolve the catalog for a command: the argument wins over the config
    pub fn catalog_path(&self, argument: Option<&Path>) -> Result<PathBuf> {
        argument
            .map(Path::to_path_buf)
            .or_else(|| self.catalog.clone())
            .ok_or_else(|| {
                Error::invalid_args("no catalog given; pass --catalog or set `catalog` in the config file")
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn test_defaults() {
        let config = Config::default();
        assert_eq!(config.catalog, None);
        assert_eq!(config.output.format, OutputFormat::Human);
        assert!(!config.extract.show_absent);
    }

    #[test]
    fn test_toml_config() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("config.toml");
        fs::write(
            &path,
            r#"
catalog = "models.yaml"

[output]
format = "json-pretty"

[extract]
show_absent = true

[logging]
level = "debug"
"#,
        )
        .unwrap();

        let config = Config::from_file(&path).unwrap();
        assert_eq!(config.catalog, Some(dir.path().join("models.yaml")));
        assert_eq!(config.output.format, OutputFormat::JsonPretty);
        assert!(config.output.color);
        assert!(config.extract.show_absent);
        assert_eq!(config.logging.level.as_deref(), Some("debug"));
    }

    #[test]
    fn test_yaml_and_json_config() {
        let dir = TempDir::new().unwrap();
        let yaml = dir.path().join("config.yml");
        fs::write(&yaml, "output:\n  format: yaml\n").unwrap();
        assert_eq!(Config::from_file(&yaml).unwrap().output.format, OutputFormat::Yaml);

        let json = dir.path().join("config.json");
        fs::write(&json, r#"{"catalog": "c.json"}"#).unwrap();
        assert_eq!(
            Config::from_file(&json).unwrap().catalog,
            Some(dir.path().join("c.json"))
        );
    }

    #[test]
    fn test_catalog_relative_to_config_file() {
        let dir = TempDir::new().unwrap();
        let nested = dir.path().join("specado-boundary");
        fs::create_dir(&nested).unwrap();
        let path = nested.join("config.toml");
        fs::write(&path, "catalog = \"catalogs/models.yaml\"\n").unwrap();

        let (config, source) = Config::load_with_file(Some(&path)).unwrap();
        assert_eq!(source, Some(path.clone()));
        assert_eq!(
            config.catalog_path(None).unwrap(),
            nested.join("catalogs").join("models.yaml")
        );

        let absolute = dir.path().join("abs.yaml");
        fs::write(&path, format!("catalog = {:?}\n", absolute.display().to_string())).unwrap();
        assert_eq!(Config::from_file(&path).unwrap().catalog, Some(absolute));
    }

    #[test]
    fn test_missing_and_unsupported_files() {
        let dir = TempDir::new().unwrap();
        assert!(matches!(
            Config::from_file(&dir.path().join("absent.toml")),
            Err(Error::FileNotFound { .. })
        ));

        let ini = dir.path().join("config.ini");
        fs::write(&ini, "").unwrap();
        assert!(matches!(
            Config::from_file(&ini),
            Err(Error::InvalidFormat { .. })
        ));
    }

    #[test]
    fn test_catalog_path_precedence() {
        let config = Config {
            catalog: Some(PathBuf::from("configured.yaml")),
            ..Config::default()
        };
        assert_eq!(
            config.catalog_path(Some(Path::new("given.yaml"))).unwrap(),
            PathBuf::from("given.yaml")
        );
        assert_eq!(
            config.catalog_path(None).unwrap(),
            PathBuf::from("configured.yaml")
        );
        assert!(matches!(
            Config::default().catalog_path(None),
            Err(Error::InvalidArgs(_))
        ));
    }
}
