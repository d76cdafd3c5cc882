//! Pipeline configuration, read from an optional JSON file.

use crate::data::Year;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// File looked up in the working directory by the binary.
pub const CONFIG_FILE: &str = "fars.json";

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to read config '{}': {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("Invalid config '{}': {source}", path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PipelineConfig {
    /// Directory holding the `accident_<year>.csv.bz2` files.
    pub data_dir: PathBuf,
    /// Extract years on the rayon pool.
    pub parallel: bool,
    /// `tracing_subscriber::EnvFilter` directive.
    pub log_filter: String,
    /// Years to summarize.
    pub years: Vec<Year>,
    /// Where to write the summary as JSON, if anywhere.
    pub summary_output: Option<PathBuf>,
    pub map: Option<MapRequest>,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            data_dir: PathBuf::from("."),
            parallel: true,
            log_filter: "info".to_string(),
            years: vec![Year(2013), Year(2014), Year(2015)],
            summary_output: None,
            map: None,
        }
    }
}

/// A single state map to draw.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MapRequest {
    pub state: i64,
    pub year: Year,
    #[serde(default = "default_map_output")]
    pub output: PathBuf,
    #[serde(default = "default_map_width")]
    pub width: u32,
    #[serde(default = "default_map_height")]
    pub height: u32,
}

fn default_map_output() -> PathBuf {
    PathBuf::from("state_map.png")
}

fn default_map_width() -> u32 {
    1000
}

fn default_map_height() -> u32 {
    800
}

impl PipelineConfig {
    /// Parse a config file.
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let text = fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        serde_json::from_str(&text).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Parse `path` when it exists, defaults otherwise.
    pub fn load_or_default(path: &Path) -> Result<Self, ConfigError> {
        if path.exists() {
            Self::from_file(path)
        } else {
            Ok(Self::default())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn absent_file_gives_defaults() {
        let dir = TempDir::new().unwrap();
        let config = PipelineConfig::load_or_default(&dir.path().join(CONFIG_FILE)).unwrap();
        assert_eq!(config, PipelineConfig::default());
        assert_eq!(config.years, vec![Year(2013), Year(2014), Year(2015)]);
    }

    #[test]
    fn partial_file_keeps_other_defaults() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join(CONFIG_FILE);
        fs::write(
            &path,
            r#"{ "data_dir": "data", "years": [2014], "map": { "state": 1, "year": 2014 } }"#,
        )
        .unwrap();

        let config = PipelineConfig::load_or_default(&path).unwrap();
        assert_eq!(config.data_dir, PathBuf::from("data"));
        assert_eq!(config.years, vec![Year(2014)]);
        assert!(config.parallel);
        assert_eq!(config.log_filter, "info");

        let map = config.map.unwrap();
        assert_eq!(map.state, 1);
        assert_eq!(map.year, Year(2014));
        assert_eq!(map.output, PathBuf::from("state_map.png"));
        assert_eq!((map.width, map.height), (1000, 800));
    }

    #[test]
    fn malformed_file_is_an_error() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join(CONFIG_FILE);
        fs::write(&path, "{ years: ").unwrap();

        let err = PipelineConfig::load_or_default(&path).unwrap_err();
        assert!(matches!(err, ConfigError::Parse { .. }));
    }
}
