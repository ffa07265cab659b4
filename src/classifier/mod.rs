pub mod preprocessing;

use anyhow::Context;
use rten::Model;
use rten_tensor::prelude::*;
use rten_tensor::{NdTensor, NdTensorView};
use std::fmt;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing::{debug, info};

use crate::drawing::CANVAS_SIZE;
use crate::models::{ModelChoice, Prediction, ShapeClass};

/// Shape every classifier expects: one 300x300 RGB image
pub const INPUT_SHAPE: [usize; 4] = [1, CANVAS_SIZE as usize, CANVAS_SIZE as usize, 3];

/// A loaded model that scores a preprocessed batch against the five shapes
pub trait Classifier: Send + Sync + fmt::Debug {
    /// Raw per-class scores, in `ShapeClass::ALL` order
    fn scores(&self, input: NdTensorView<f32, 4>) -> anyhow::Result<Vec<f32>>;

    fn name(&self) -> &str;
}

pub type ModelHandle = Arc<dyn Classifier>;

/// Run a forward pass and pick the highest-scoring label
pub fn classify(classifier: &dyn Classifier, input: &NdTensor<f32, 4>) -> anyhow::Result<Prediction> {
    let shape = input.shape();
    anyhow::ensure!(
        shape == INPUT_SHAPE,
        "Input tensor has shape {:?}, expected {:?}",
        shape,
        INPUT_SHAPE
    );

    let scores = classifier.scores(input.view())?;
    anyhow::ensure!(
        scores.len() == ShapeClass::ALL.len(),
        "Model {} produced {} scores, expected {}",
        classifier.name(),
        scores.len(),
        ShapeClass::ALL.len()
    );

    let index = argmax(&scores);
    let class = ShapeClass::from_index(index)
        .ok_or_else(|| anyhow::anyhow!("Score index {} has no label", index))?;

    debug!("{} scores {:?} -> {}", classifier.name(), scores, class);
    Ok(Prediction { class, scores })
}

/// Index of the largest score; ties and NaNs resolve to the earliest index
pub fn argmax(scores: &[f32]) -> usize {
    scores
        .iter()
        .enumerate()
        .fold((0, f32::NEG_INFINITY), |(best, best_score), (i, &score)| {
            if score > best_score {
                (i, score)
            } else {
                (best, best_score)
            }
        })
        .0
}

/// Classifier backed by an rten model file
pub struct RtenClassifier {
    name: String,
    model: Model,
}

impl fmt::Debug for RtenClassifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RtenClassifier")
            .field("name", &self.name)
            .finish()
    }
}

impl RtenClassifier {
    pub fn load(name: impl Into<String>, path: &Path) -> anyhow::Result<Self> {
        let model = Model::load_file(path)
            .with_context(|| format!("Failed to load model {}", path.display()))?;
        Ok(Self {
            name: name.into(),
            model,
        })
    }
}

impl Classifier for RtenClassifier {
    fn scores(&self, input: NdTensorView<f32, 4>) -> anyhow::Result<Vec<f32>> {
        let output = self.model.run_one(input.into(), None)?;
        let output: NdTensor<f32, 2> = output.try_into()?;
        Ok(output.iter().copied().collect())
    }

    fn name(&self) -> &str {
        &self.name
    }
}

/// Resolves model names to artifacts and loads them; it keeps nothing loaded
#[derive(Debug, Clone)]
pub struct ModelSelector {
    model_dir: PathBuf,
}

impl ModelSelector {
    pub fn new(model_dir: impl Into<PathBuf>) -> Self {
        Self {
            model_dir: model_dir.into(),
        }
    }

    pub fn model_dir(&self) -> &Path {
        &self.model_dir
    }

    pub fn artifact_path(&self, choice: ModelChoice) -> PathBuf {
        self.model_dir.join(choice.file_name())
    }

    /// Load the chosen model from disk
    pub fn load(&self, choice: ModelChoice) -> anyhow::Result<ModelHandle> {
        let path = self.artifact_path(choice);

        if !path.exists() {
            anyhow::bail!(
                "Model file for '{}' not found.\nExpected location: {}\n\
                 Convert the trained model to .rten (rten-convert model.onnx) and place it there.",
                choice,
                path.display()
            );
        }

        info!("Loading {} from {}", choice, path.display());
        let classifier = RtenClassifier::load(choice.display_name(), &path)?;
        Ok(Arc::new(classifier))
    }
}
