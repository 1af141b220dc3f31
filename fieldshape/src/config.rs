//! fieldshape configuration types and loading

use eyre::{Context, Result};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};

use crate::profile::ProfileSpec;

/// Main fieldshape configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Output format when none is given on the command line
    #[serde(rename = "default-format")]
    pub default_format: OutputFormat,

    /// Root element for XML output of dynamically-typed records
    #[serde(rename = "xml-root")]
    pub xml_root: String,

    /// Pretty-print JSON output
    pub pretty: bool,

    /// Shaping profiles by name
    pub profiles: BTreeMap<String, ProfileSpec>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            default_format: OutputFormat::Json,
            xml_root: "record".to_string(),
            pretty: true,
            profiles: BTreeMap::new(),
        }
    }
}

/// Text format for shaped output
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    #[default]
    Json,
    Yaml,
    Xml,
}

impl fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Json => write!(f, "json"),
            Self::Yaml => write!(f, "yaml"),
            Self::Xml => write!(f, "xml"),
        }
    }
}

impl std::str::FromStr for OutputFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "json" => Ok(Self::Json),
            "yaml" | "yml" => Ok(Self::Yaml),
            "xml" => Ok(Self::Xml),
            _ => Err(format!("Unknown format: {}. Use: json, yaml, or xml", s)),
        }
    }
}

/// Project-local config file, relative to the working directory
pub const LOCAL_CONFIG_FILE: &str = ".fieldshape.yml";

impl Config {
    /// Load configuration
    ///
    /// An explicit path must load. Otherwise the first readable file from
    /// [`Config::search_paths`] wins, and unreadable candidates are skipped
    /// with a warning.
    pub fn load(config_path: Option<&PathBuf>) -> Result<Self> {
        if let Some(path) = config_path {
            return Self::from_file(path).with_context(|| format!("Failed to load config from {}", path.display()));
        }

        for candidate in Self::search_paths().iter().filter(|p| p.exists()) {
            match Self::from_file(candidate) {
                Ok(config) => return Ok(config),
                Err(e) => warn!("Skipping config {}: {:#}", candidate.display(), e),
            }
        }

        debug!("Config::load: no config file found, using defaults");
        Ok(Self::default())
    }

    /// Candidate config files, most specific first
    pub fn search_paths() -> Vec<PathBuf> {
        let user = dirs::config_dir().map(|dir| dir.join("fieldshape").join("fieldshape.yml"));
        std::iter::once(PathBuf::from(LOCAL_CONFIG_FILE)).chain(user).collect()
    }

    fn from_file(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path).context("Failed to read config file")?;
        let config = serde_yaml::from_str(&content).context("Failed to parse config file")?;
        info!(path = %path.display(), "Config::from_file: loaded");
        Ok(config)
    }

    /// Look up a profile by name
    pub fn profile(&self, name: &str) -> Result<&ProfileSpec> {
        self.profiles.get(name).ok_or_else(|| {
            let known: Vec<&str> = self.profiles.keys().map(String::as_str).collect();
            if known.is_empty() {
                eyre::eyre!("Unknown profile '{}': no profiles are configured", name)
            } else {
                eyre::eyre!("Unknown profile '{}' (available: {})", name, known.join(", "))
            }
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_defaults() {
        let config = Config::default();
        assert_eq!(config.default_format, OutputFormat::Json);
        assert_eq!(config.xml_root, "record");
        assert!(config.pretty);
        assert!(config.profiles.is_empty());
    }

    #[test]
    fn test_partial_yaml_fills_defaults() {
        let config: Config = serde_yaml::from_str("default-format: yaml\n").unwrap();
        assert_eq!(config.default_format, OutputFormat::Yaml);
        assert_eq!(config.xml_root, "record");
    }

    #[test]
    fn test_load_explicit_path() {
        let temp = tempdir().unwrap();
        let path = temp.path().join("fieldshape.yml");
        fs::write(
            &path,
            "xml-root: user\nprofiles:\n  public:\n    fields: [id, name]\n",
        )
        .unwrap();

        let config = Config::load(Some(&path)).unwrap();
        assert_eq!(config.xml_root, "user");
        assert_eq!(config.profile("public").unwrap().fields, vec!["id", "name"]);
    }

    #[test]
    fn test_load_missing_explicit_path_fails() {
        let temp = tempdir().unwrap();
        let path = temp.path().join("nope.yml");
        assert!(Config::load(Some(&path)).is_err());
    }

    #[test]
    fn test_search_paths_start_with_local_file() {
        let paths = Config::search_paths();
        assert_eq!(paths[0], PathBuf::from(LOCAL_CONFIG_FILE));
        assert!(paths.iter().skip(1).all(|p| p.ends_with("fieldshape/fieldshape.yml")));
    }

    #[test]
    fn test_load_rejects_invalid_condition() {
        let temp = tempdir().unwrap();
        let path = temp.path().join("fieldshape.yml");
        fs::write(
            &path,
            "profiles:\n  p:\n    include-if:\n      email: { field: role, equals: admin, present: false }\n",
        )
        .unwrap();

        let err = Config::load(Some(&path)).unwrap_err();
        assert!(format!("{:#}", err).contains("present: false"));
    }

    #[test]
    fn test_unknown_profile_lists_available() {
        let mut config = Config::default();
        let err = config.profile("public").unwrap_err();
        assert!(err.to_string().contains("no profiles"));

        config.profiles.insert("admin".to_string(), ProfileSpec::default());
        let err = config.profile("public").unwrap_err();
        assert!(err.to_string().contains("admin"));
    }

    #[test]
    fn test_output_format_from_str() {
        assert_eq!("YAML".parse::<OutputFormat>(), Ok(OutputFormat::Yaml));
        assert_eq!("yml".parse::<OutputFormat>(), Ok(OutputFormat::Yaml));
        assert!("toml".parse::<OutputFormat>().unwrap_err().contains("toml"));
    }

    #[test]
    fn test_output_format_display() {
        assert_eq!(OutputFormat::Json.to_string(), "json");
        assert_eq!(OutputFormat::Xml.to_string(), "xml");
    }
}
