use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::error::{Result, StoreError};
use crate::ops::transport::{DEFAULT_SKIP_STEP, DEFAULT_VOLUME};

const DEFAULT_CONFIG_FILE: &str = "beatstore.toml";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StoreConfig {
    pub initial_volume: f32,
    pub skip_step: f32,
    /// JSON catalog to load instead of the built-in one.
    pub catalog_path: Option<PathBuf>,
    /// Directory that relative cover image paths are resolved against.
    pub cover_dir: PathBuf,
    pub currency_symbol: String,
    pub window_width: f32,
    pub window_height: f32,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            initial_volume: DEFAULT_VOLUME,
            skip_step: DEFAULT_SKIP_STEP,
            catalog_path: None,
            cover_dir: PathBuf::from("covers"),
            currency_symbol: "₽".to_string(),
            window_width: 1200.0,
            window_height: 800.0,
        }
    }
}

impl StoreConfig {
    /// Defaults, then `BEATSTORE_CONFIG` (or `./beatstore.toml`) if it exists,
    /// then environment overrides.
    pub fn load() -> Result<Self> {
        let path = std::env::var_os("BEATSTORE_CONFIG")
            .map(PathBuf::from)
            .unwrap_or_else(|| PathBuf::from(DEFAULT_CONFIG_FILE));

        let mut config = if path.exists() {
            Self::load_from_file(&path)?
        } else {
            log::debug!("No config at {}, using defaults", path.display());
            Self::default()
        };
        config.apply_env(|key| std::env::var(key).ok());
        Ok(config)
    }

    pub fn load_from_file(path: &Path) -> Result<Self> {
        let raw = std::fs::read_to_string(path)?;
        let config: StoreConfig = toml::from_str(&raw)?;
        config.validate()?;
        log::info!("Loaded config from {}", path.display());
        Ok(config)
    }

    fn validate(&self) -> Result<()> {
        if !(self.skip_step > 0.0 && self.skip_step <= 100.0) {
            return Err(StoreError::InvalidConfig(format!(
                "skip_step must be in (0, 100], got {}",
                self.skip_step
            )));
        }
        Ok(())
    }

    fn apply_env(&mut self, get: impl Fn(&str) -> Option<String>) {
        if let Some(v) = get("BEATSTORE_VOLUME") {
            match v.parse::<f32>() {
                Ok(volume) => self.initial_volume = volume,
                Err(_) => log::warn!("Ignoring BEATSTORE_VOLUME={v:?}: not a number"),
            }
        }
        if let Some(v) = get("BEATSTORE_CATALOG") {
            self.catalog_path = Some(PathBuf::from(v));
        }
    }
}
