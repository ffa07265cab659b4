use anyhow::{Context, Result};
use std::fmt;
use std::path::PathBuf;
use std::sync::atomic::{AtomicUsize, Ordering};
use tracing::{debug, info};

use crate::classifier::{self, ModelHandle, preprocessing};
use crate::drawing::DrawingBitmap;
use crate::models::{ModelChoice, Prediction, ShapeClass, UploadRecord};
use crate::storage::{ObjectStore, Uploader};

/// Debug configuration for pipeline execution
#[derive(Clone, Debug)]
pub struct DebugConfig {
    /// Root directory for debug outputs
    pub output_dir: PathBuf,
}

/// A model the user picked, already loaded
#[derive(Debug, Clone)]
pub struct LoadedModel {
    pub choice: ModelChoice,
    pub handle: ModelHandle,
}

/// Everything one press of "Classify" hands to the pipeline
#[derive(Debug, Clone)]
pub struct SubmitRequest {
    pub model: Option<LoadedModel>,
    /// Shape the user says they drew
    pub target: ShapeClass,
    pub bitmap: DrawingBitmap,
}

/// Reasons a request is turned away before any work happens
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Rejection {
    NoModelSelected,
    EmptyCanvas,
}

impl fmt::Display for Rejection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Rejection::NoModelSelected => f.write_str("Please choose a valid model."),
            Rejection::EmptyCanvas => f.write_str("The canvas is empty, draw a shape first."),
        }
    }
}

#[derive(Debug, Clone)]
pub struct Submission {
    pub model: ModelChoice,
    pub target: ShapeClass,
    pub prediction: Prediction,
    pub bitmap: DrawingBitmap,
    pub upload: Option<UploadRecord>,
}

impl Submission {
    pub fn matches_target(&self) -> bool {
        self.prediction.class == self.target
    }
}

#[derive(Debug, Clone)]
pub enum SubmitOutcome {
    Rejected(Rejection),
    Completed(Submission),
}

/// Preprocess, classify and persist one drawing
pub struct SubmitPipeline<S> {
    uploader: Option<Uploader<S>>,
    debug: Option<DebugConfig>,
    submissions: AtomicUsize,
}

impl<S: ObjectStore> SubmitPipeline<S> {
    /// Create a pipeline that only classifies
    pub fn new() -> Self {
        Self {
            uploader: None,
            debug: None,
            submissions: AtomicUsize::new(0),
        }
    }

    /// Persist every completed submission through this uploader
    pub fn with_uploader(mut self, uploader: Uploader<S>) -> Self {
        self.uploader = Some(uploader);
        self
    }

    /// Enable debug mode with output directory
    /// The directory must be empty or non-existent
    pub fn with_debug(mut self, output_dir: PathBuf) -> Result<Self> {
        if output_dir.exists() {
            let entries = std::fs::read_dir(&output_dir)?;
            if entries.count() > 0 {
                return Err(anyhow::anyhow!(
                    "Debug directory is not empty: {}",
                    output_dir.display()
                ));
            }
        } else {
            std::fs::create_dir_all(&output_dir)?;
        }

        self.debug = Some(DebugConfig { output_dir });
        Ok(self)
    }

    pub fn uploader(&self) -> Option<&Uploader<S>> {
        self.uploader.as_ref()
    }

    /// Run one submission. Guards are checked first; a rejected request never
    /// reaches the classifier or the store.
    pub async fn submit(&self, request: SubmitRequest) -> Result<SubmitOutcome> {
        let SubmitRequest {
            model,
            target,
            bitmap,
        } = request;

        let Some(model) = model else {
            info!("Submission rejected: no model selected");
            return Ok(SubmitOutcome::Rejected(Rejection::NoModelSelected));
        };
        if bitmap.is_blank() {
            info!("Submission rejected: canvas is empty");
            return Ok(SubmitOutcome::Rejected(Rejection::EmptyCanvas));
        }

        let index = self.submissions.fetch_add(1, Ordering::Relaxed) + 1;
        self.save_debug_input(index, target, &bitmap)?;

        let tensor = preprocessing::preprocess_bitmap(&bitmap);
        let handle = model.handle.clone();
        let prediction =
            tokio::task::spawn_blocking(move || classifier::classify(handle.as_ref(), &tensor))
                .await
                .context("Inference task failed")??;
        info!(
            "{} classified drawing as {} (target {})",
            model.choice, prediction.class, target
        );

        let upload = match &self.uploader {
            Some(uploader) => Some(uploader.upload(&bitmap, model.choice, target).await?),
            None => None,
        };

        Ok(SubmitOutcome::Completed(Submission {
            model: model.choice,
            target,
            prediction,
            bitmap,
            upload,
        }))
    }

    fn save_debug_input(&self, index: usize, target: ShapeClass, bitmap: &DrawingBitmap) -> Result<()> {
        if let Some(debug_config) = &self.debug {
            let filename = format!("{:02}_{}_input.png", index, target);
            let output_path = debug_config.output_dir.join(&filename);
            bitmap
                .image()
                .save(&output_path)
                .map_err(|e| anyhow::anyhow!("Failed to save debug image: {}", e))?;
            debug!("Debug: saved {}", filename);
        }
        Ok(())
    }
}

impl<S: ObjectStore> Default for SubmitPipeline<S> {
    fn default() -> Self {
        Self::new()
    }
}
