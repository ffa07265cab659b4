mod fixtures;
pub use fixtures::*;

// Re-export commonly used types from shapesketch for tests
pub use shapesketch::{
    Classifier, DrawingBitmap, LoadedModel, ModelChoice, ObjectStore, Rejection, ShapeClass,
    Sketch, Stroke, SubmitOutcome, SubmitPipeline, SubmitRequest, Uploader,
};
