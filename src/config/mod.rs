use anyhow::{Context, Result};
use serde::Deserialize;
use std::path::{Path, PathBuf};

use crate::domain::{Center, RingSpec};
use crate::layers::OutputMode;

fn default_holes() -> bool {
    true
}
fn default_pretty() -> bool {
    false
}

/// Settings read from a `georings.toml` file
///
/// ```toml
/// lat = 51.5074
/// lng = -0.1278
/// mode = "multi-polygon"
///
/// [[rings]]
/// radius = 50.0
/// points = 10
/// ```
#[derive(Debug, Deserialize)]
pub struct FileConfig {
    #[serde(default)]
    pub lat: Option<f64>,
    #[serde(default, alias = "lon")]
    pub lng: Option<f64>,
    #[serde(default)]
    pub rings: Option<Vec<RingSpec>>,
    #[serde(default)]
    pub mode: Option<OutputMode>,
    #[serde(default = "default_holes")]
    pub holes: bool,
    #[serde(default = "default_pretty")]
    pub pretty: bool,
    #[serde(default)]
    pub output: Option<PathBuf>,
}

impl Default for FileConfig {
    fn default() -> Self {
        Self {
            lat: None,
            lng: None,
            rings: None,
            mode: None,
            holes: default_holes(),
            pretty: default_pretty(),
            output: None,
        }
    }
}

impl FileConfig {
    /// Search the standard locations and return the first config that parses
    pub fn load() -> Option<Self> {
        for path in get_config_paths() {
            if path.exists()
                && let Ok(contents) = std::fs::read_to_string(&path)
            {
                match toml::from_str(&contents) {
                    Ok(config) => {
                        log::info!("Loaded config from {}", path.display());
                        return Some(config);
                    }
                    Err(e) => {
                        log::warn!("Failed to parse config file {}: {}", path.display(), e);
                    }
                }
            }
        }
        None
    }

    /// Load an explicitly requested config file; a missing or broken file is an error
    pub fn from_path(path: &Path) -> Result<Self> {
        if !path.exists() {
            anyhow::bail!("Config file not found: {}", path.display());
        }
        let contents = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;
        toml::from_str(&contents)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))
    }

    /// Center from the file, if both coordinates are present
    pub fn center(&self) -> Option<Center> {
        match (self.lat, self.lng) {
            (Some(lat), Some(lng)) => Some(Center::new(lat, lng)),
            _ => None,
        }
    }
}

fn get_config_paths() -> Vec<PathBuf> {
    let mut paths = Vec::new();

    paths.push(PathBuf::from("georings.toml"));
    paths.push(PathBuf::from(".georings.toml"));

    if let Some(config_dir) = dirs::config_dir() {
        paths.push(config_dir.join("georings").join("config.toml"));
        paths.push(config_dir.join("georings.toml"));
    }

    if let Some(home) = dirs::home_dir() {
        paths.push(home.join(".georings.toml"));
    }

    paths
}
