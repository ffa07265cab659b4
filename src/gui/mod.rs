mod app;
mod message;
mod state;
mod screens;
mod widgets;

pub use app::{ShapeSketchApp, run};
pub use message::Message;
pub use screens::PageKind;
pub use state::{AppState, ModelStatus, Session, Status};
