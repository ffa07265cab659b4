use crate::classifier::ModelHandle;
use crate::context::AppContext;
use crate::drawing::Sketch;
use crate::models::{ModelChoice, ShapeClass};
use crate::pipeline::{LoadedModel, Rejection, Submission};

#[derive(Debug, Clone, Default)]
pub enum ModelStatus {
    #[default]
    NotSelected,
    Loading,
    Ready(ModelHandle),
    Failed(String),
}

/// What the home page shows under the canvas after a classify action
#[derive(Debug, Clone)]
pub enum Status {
    Rejected(Rejection),
    Completed(Submission),
    Failed(String),
}

/// Per-window state that survives navigation between pages
#[derive(Debug)]
pub struct Session {
    pub selected_model: Option<ModelChoice>,
    pub model: ModelStatus,
    pub target: ShapeClass,
    pub sketch: Sketch,
    /// A submission is in flight
    pub busy: bool,
    pub status: Option<Status>,
}

impl Default for Session {
    fn default() -> Self {
        Self {
            selected_model: None,
            model: ModelStatus::NotSelected,
            target: ShapeClass::ALL[0],
            sketch: Sketch::new(),
            busy: false,
            status: None,
        }
    }
}

impl Session {
    /// The selected model, if it finished loading
    pub fn loaded_model(&self) -> Option<LoadedModel> {
        match (&self.selected_model, &self.model) {
            (Some(choice), ModelStatus::Ready(handle)) => Some(LoadedModel {
                choice: *choice,
                handle: handle.clone(),
            }),
            _ => None,
        }
    }
}

pub struct AppState {
    pub context: AppContext,
    pub session: Session,
}

impl AppState {
    pub fn new(context: AppContext) -> Self {
        Self {
            context,
            session: Session::default(),
        }
    }
}
