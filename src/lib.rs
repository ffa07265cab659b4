pub mod classifier;
pub mod config;
pub mod context;
pub mod drawing;
pub mod gallery;
pub mod models;
pub mod pipeline;
pub mod storage;

pub use classifier::{Classifier, ModelHandle, ModelSelector};
pub use config::AppConfig;
pub use context::AppContext;
pub use drawing::{DrawingBitmap, Sketch, Stroke};
pub use models::{ModelChoice, Prediction, ShapeClass, UploadRecord};
pub use pipeline::{
    LoadedModel, Rejection, SubmitOutcome, SubmitPipeline, SubmitRequest, Submission,
};
pub use storage::{ObjectStore, StorageBackend, Uploader};

#[cfg(feature = "gui")]
pub mod gui;
