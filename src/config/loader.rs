use super::types::*;
use crate::utils::{Error, Result};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

const LOCAL_CONFIG: &str = "remux.yaml";

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub tools: ToolsConfig,
    pub logging: LoggingConfig,
    pub remux: RemuxSettings,
    /// Per-library overrides of `remux`, keyed by host library id.
    pub libraries: HashMap<u32, RemuxSettings>,
}

impl Config {
    pub fn load<P: AsRef<Path>>(config_path: P) -> Result<Self> {
        let config_str = std::fs::read_to_string(config_path)?;
        let config: Config = serde_yaml::from_str(&config_str)?;
        config.validate()?;
        Ok(config)
    }

    /// Loads the first config that exists: `path`, `./remux.yaml`, then the
    /// user config directory. Falls back to built-in defaults.
    pub fn load_with_fallback(path: Option<&Path>) -> Result<Self> {
        if let Some(path) = path {
            return Self::load(path);
        }

        for candidate in Self::candidate_paths() {
            if candidate.exists() {
                debug!("Loading configuration from {}", candidate.display());
                return Self::load(&candidate);
            }
        }

        warn!("No configuration file found, using defaults");
        Ok(Self::default())
    }

    fn candidate_paths() -> Vec<PathBuf> {
        let mut paths = vec![PathBuf::from(LOCAL_CONFIG)];
        if let Some(dir) = dirs::config_dir() {
            paths.push(dir.join("remux-audio").join("config.yaml"));
        }
        paths
    }

    /// Settings for a library, or the global section when it has none.
    pub fn settings_for(&self, library_id: Option<u32>) -> &RemuxSettings {
        library_id
            .and_then(|id| self.libraries.get(&id))
            .unwrap_or(&self.remux)
    }

    pub fn validate(&self) -> Result<()> {
        if self.tools.timeout_seconds == 0 {
            return Err(Error::validation("timeout_seconds must be greater than 0"));
        }

        Self::validate_settings("remux", &self.remux)?;
        for (id, settings) in &self.libraries {
            Self::validate_settings(&format!("libraries.{}", id), settings)?;
        }

        Ok(())
    }

    fn validate_settings(section: &str, settings: &RemuxSettings) -> Result<()> {
        let ext = settings.output_ext.trim();
        if ext.contains(['/', '\\']) || ext.contains(char::is_whitespace) {
            return Err(Error::validation(format!(
                "Invalid output_ext in {}: '{}'",
                section, settings.output_ext
            )));
        }
        Ok(())
    }
}
