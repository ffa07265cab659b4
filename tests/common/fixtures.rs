#![allow(dead_code)]

use rten_tensor::NdTensorView;
use shapesketch::drawing::CANVAS_SIZE;
use shapesketch::{Classifier, DrawingBitmap, LoadedModel, ModelChoice, ObjectStore, Sketch, Stroke};
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

/// Classifier that returns the same scores for every input and counts calls
#[derive(Debug)]
pub struct FixedClassifier {
    pub scores: Vec<f32>,
    calls: AtomicUsize,
}

impl FixedClassifier {
    pub fn new(scores: Vec<f32>) -> Self {
        Self {
            scores,
            calls: AtomicUsize::new(0),
        }
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

impl Classifier for FixedClassifier {
    fn scores(&self, _input: NdTensorView<f32, 4>) -> anyhow::Result<Vec<f32>> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        Ok(self.scores.clone())
    }

    fn name(&self) -> &str {
        "fixed"
    }
}

/// Scores that make `class` the winner
pub fn scores_for(class: shapesketch::ShapeClass) -> Vec<f32> {
    shapesketch::ShapeClass::ALL
        .iter()
        .map(|c| if *c == class { 0.8 } else { 0.05 })
        .collect()
}

/// Wrap a classifier as a loaded "Model 1 Adam"
pub fn loaded(classifier: &Arc<FixedClassifier>) -> LoadedModel {
    LoadedModel {
        choice: ModelChoice::Adam,
        handle: classifier.clone(),
    }
}

/// A 300x300 bitmap with one diagonal stroke
pub fn drawn_bitmap() -> DrawingBitmap {
    let mut sketch = Sketch::new();
    sketch.push(Stroke::new(vec![(50.0, 50.0), (250.0, 250.0)]));
    sketch.rasterize(CANVAS_SIZE, 3.0)
}

pub fn blank_bitmap() -> DrawingBitmap {
    DrawingBitmap::blank(CANVAS_SIZE, CANVAS_SIZE)
}

/// Object store kept in memory
#[derive(Debug, Default)]
pub struct MemoryStore {
    pub objects: Mutex<HashMap<String, Vec<u8>>>,
    pub published: Mutex<Vec<String>>,
}

impl MemoryStore {
    pub fn object(&self, remote_path: &str) -> Option<Vec<u8>> {
        self.objects.lock().unwrap().get(remote_path).cloned()
    }

    pub fn len(&self) -> usize {
        self.objects.lock().unwrap().len()
    }
}

impl ObjectStore for MemoryStore {
    async fn upload(&self, local_path: &Path, remote_path: &str) -> anyhow::Result<()> {
        let bytes = std::fs::read(local_path)?;
        self.objects
            .lock()
            .unwrap()
            .insert(remote_path.to_string(), bytes);
        Ok(())
    }

    async fn make_public(&self, remote_path: &str) -> anyhow::Result<String> {
        anyhow::ensure!(
            self.objects.lock().unwrap().contains_key(remote_path),
            "no such object: {}",
            remote_path
        );
        self.published.lock().unwrap().push(remote_path.to_string());
        Ok(format!("https://storage.example/bucket/{}", remote_path))
    }
}

/// Object store whose uploads always fail; remembers the staged file it saw
#[derive(Debug, Default)]
pub struct FailingStore {
    pub staged: Mutex<Option<(PathBuf, bool)>>,
}

impl ObjectStore for FailingStore {
    async fn upload(&self, local_path: &Path, _remote_path: &str) -> anyhow::Result<()> {
        *self.staged.lock().unwrap() = Some((local_path.to_path_buf(), local_path.exists()));
        anyhow::bail!("bucket unavailable")
    }

    async fn make_public(&self, _remote_path: &str) -> anyhow::Result<String> {
        anyhow::bail!("bucket unavailable")
    }
}

/// Number of entries left in a directory
pub fn dir_len(dir: &Path) -> usize {
    std::fs::read_dir(dir).map(|entries| entries.count()).unwrap_or(0)
}

/// Object store that takes ownership of the staged file by moving it away,
/// so the uploader finds nothing left to remove
#[derive(Debug, Default)]
pub struct MovingStore {
    pub inner: MemoryStore,
}

impl ObjectStore for MovingStore {
    async fn upload(&self, local_path: &Path, remote_path: &str) -> anyhow::Result<()> {
        self.inner.upload(local_path, remote_path).await?;
        std::fs::remove_file(local_path)?;
        Ok(())
    }

    async fn make_public(&self, remote_path: &str) -> anyhow::Result<String> {
        self.inner.make_public(remote_path).await
    }
}
