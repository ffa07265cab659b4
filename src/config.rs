use anyhow::Context;
use serde::Deserialize;
use std::path::{Path, PathBuf};

use crate::drawing::DEFAULT_STROKE_WIDTH;

/// Config file looked up in the working directory when none is given
pub const DEFAULT_CONFIG_FILE: &str = "shapesketch.toml";

/// Overrides the firebase credential file path
pub const CREDENTIALS_ENV: &str = "GOOGLE_APPLICATION_CREDENTIALS";

#[derive(Debug, Clone, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct AppConfig {
    /// Directory holding the three .rten model files
    pub model_dir: PathBuf,
    /// Sample images shown on the "About the data" page
    pub sample_dir: PathBuf,
    /// Scratch directory for PNGs awaiting upload
    pub temp_dir: PathBuf,
    pub log_level: String,
    pub canvas: CanvasConfig,
    pub storage: StorageConfig,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            model_dir: PathBuf::from("models"),
            sample_dir: PathBuf::from("sampel"),
            temp_dir: PathBuf::from("temp"),
            log_level: "info".to_string(),
            canvas: CanvasConfig::default(),
            storage: StorageConfig::default(),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct CanvasConfig {
    pub stroke_width: f32,
}

impl Default for CanvasConfig {
    fn default() -> Self {
        Self {
            stroke_width: DEFAULT_STROKE_WIDTH,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(tag = "backend", rename_all = "snake_case")]
pub enum StorageConfig {
    /// Firebase / Google Cloud Storage bucket
    Firebase {
        bucket: String,
        credentials: PathBuf,
    },
    /// Directory tree on the local machine
    Local {
        dir: PathBuf,
        #[serde(default)]
        public_base_url: Option<String>,
    },
    Disabled,
}

impl Default for StorageConfig {
    fn default() -> Self {
        StorageConfig::Local {
            dir: PathBuf::from("uploads"),
            public_base_url: None,
        }
    }
}

impl AppConfig {
    pub fn from_toml(source: &str) -> anyhow::Result<Self> {
        let config: AppConfig = toml::from_str(source).context("Invalid configuration")?;
        config.validate()?;
        Ok(config)
    }

    /// Load configuration. An explicit path must exist; the default file is optional.
    pub fn load(path: Option<&Path>) -> anyhow::Result<Self> {
        let (path, required) = match path {
            Some(p) => (p.to_path_buf(), true),
            None => (PathBuf::from(DEFAULT_CONFIG_FILE), false),
        };

        let mut config = if path.exists() {
            let source = std::fs::read_to_string(&path)
                .with_context(|| format!("Failed to read config {}", path.display()))?;
            Self::from_toml(&source)
                .with_context(|| format!("Failed to parse config {}", path.display()))?
        } else if required {
            anyhow::bail!("Config file not found: {}", path.display());
        } else {
            Self::default()
        };

        if let Ok(credentials) = std::env::var(CREDENTIALS_ENV) {
            config.override_credentials(PathBuf::from(credentials));
        }

        Ok(config)
    }

    pub fn override_credentials(&mut self, path: PathBuf) {
        if let StorageConfig::Firebase { credentials, .. } = &mut self.storage {
            *credentials = path;
        }
    }

    fn validate(&self) -> anyhow::Result<()> {
        anyhow::ensure!(
            self.canvas.stroke_width > 0.0,
            "canvas.stroke_width must be positive, got {}",
            self.canvas.stroke_width
        );
        if let StorageConfig::Firebase { bucket, .. } = &self.storage {
            anyhow::ensure!(!bucket.trim().is_empty(), "storage.bucket must not be empty");
        }
        Ok(())
    }
}
