use std::path::PathBuf;
use std::sync::Arc;
use tracing::info;

use crate::classifier::ModelSelector;
use crate::config::AppConfig;
use crate::pipeline::SubmitPipeline;
use crate::storage::{StorageBackend, Uploader};

pub type Pipeline = SubmitPipeline<StorageBackend>;

/// Long-lived services, built once at startup and shared with every screen
#[derive(Clone)]
pub struct AppContext {
    pub config: Arc<AppConfig>,
    pub models: ModelSelector,
    pub pipeline: Arc<Pipeline>,
}

impl AppContext {
    /// Wire up model loading and the submit pipeline from configuration
    pub fn new(config: AppConfig, upload: bool, debug_out: Option<PathBuf>) -> anyhow::Result<Self> {
        let models = ModelSelector::new(&config.model_dir);

        let mut pipeline = Pipeline::new();
        let backend = if upload {
            StorageBackend::from_config(&config.storage)?
        } else {
            None
        };
        match backend {
            Some(backend) => {
                info!("Uploads enabled: {:?}", backend);
                pipeline = pipeline.with_uploader(Uploader::new(backend, &config.temp_dir));
            }
            None => info!("Uploads disabled"),
        }
        if let Some(dir) = debug_out {
            pipeline = pipeline.with_debug(dir)?;
        }

        Ok(Self {
            config: Arc::new(config),
            models,
            pipeline: Arc::new(pipeline),
        })
    }
}
