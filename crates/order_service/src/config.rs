//! Service configuration.
//!
//! Ports and paths come from the environment; the texture to cleaner table
//! comes from a YAML file:
//!
//! ```yaml
//! textures:
//!   CLEAR:
//!     cleaner: CLEAR-CLEANNER
//!   MATTE:
//!     cleaner: MATTE-CLEANNER
//! ```

use crate::error::{Error, Result};
use normalizer::CleanerLookup;
use serde::Deserialize;
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use tracing::info;

const DEFAULT_HTTP_PORT: u16 = 9000;
const DEFAULT_METRICS_PORT: u16 = 9092;
const DEFAULT_CLEANER_CONFIG_PATH: &str = "config/cleaner.yml";

/// Runtime configuration for the order service.
#[derive(Debug, Clone)]
pub struct ServiceConfig {
    /// HTTP API port.
    pub http_port: u16,
    /// Prometheus exporter port.
    pub metrics_port: u16,
    /// Path of the cleaner YAML file.
    pub cleaner_config_path: PathBuf,
}

impl Default for ServiceConfig {
    fn default() -> Self {
        Self {
            http_port: DEFAULT_HTTP_PORT,
            metrics_port: DEFAULT_METRICS_PORT,
            cleaner_config_path: PathBuf::from(DEFAULT_CLEANER_CONFIG_PATH),
        }
    }
}

impl ServiceConfig {
    /// Read configuration from `HTTP_PORT`, `METRICS_PORT` and
    /// `CLEANER_CONFIG_PATH`, falling back to defaults for unset variables.
    pub fn from_env() -> Result<Self> {
        let defaults = Self::default();
        Ok(Self {
            http_port: port_from_env("HTTP_PORT", defaults.http_port)?,
            metrics_port: port_from_env("METRICS_PORT", defaults.metrics_port)?,
            cleaner_config_path: std::env::var("CLEANER_CONFIG_PATH")
                .map(PathBuf::from)
                .unwrap_or(defaults.cleaner_config_path),
        })
    }
}

fn port_from_env(name: &'static str, default: u16) -> Result<u16> {
    match std::env::var(name) {
        Ok(value) => parse_port(name, &value),
        Err(_) => Ok(default),
    }
}

fn parse_port(name: &str, value: &str) -> Result<u16> {
    value
        .parse()
        .map_err(|_| Error::Config(format!("{} must be a port number, got '{}'", name, value)))
}

// ============================================================================
// Cleaner configuration
// ============================================================================

#[derive(Debug, Deserialize)]
struct CleanerFile {
    #[serde(default)]
    textures: HashMap<String, TextureEntry>,
}

#[derive(Debug, Deserialize)]
struct TextureEntry {
    cleaner: String,
}

/// Parse the cleaner table from YAML text.
pub fn parse_cleaner_config(yaml: &str) -> Result<CleanerLookup> {
    let file: CleanerFile = serde_yaml::from_str(yaml)?;
    Ok(CleanerLookup::new(
        file.textures
            .into_iter()
            .map(|(texture, entry)| (texture, entry.cleaner)),
    ))
}

/// Load the cleaner table from a YAML file.
pub fn load_cleaner_config(path: &Path) -> Result<CleanerLookup> {
    let content = std::fs::read_to_string(path)?;
    let lookup = parse_cleaner_config(&content)?;
    info!(
        "Loaded {} cleaner mappings from {}",
        lookup.len(),
        path.display()
    );
    Ok(lookup)
}
