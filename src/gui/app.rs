use iced::{Element, Task};

use super::screens::{PageKind, Screen, ScreenData, ScreenMessage};
use super::widgets::layout;
use super::{AppState, Message};
use crate::context::AppContext;

pub struct ShapeSketchApp {
    state: AppState,
    screen: ScreenData,
}

fn unwrap_message(message: ScreenMessage<ScreenData>) -> Message {
    match message {
        ScreenMessage::ScreenMessage(message) => message,
        ScreenMessage::ParentMessage(never) => match never {},
    }
}

impl ShapeSketchApp {
    pub fn new(context: AppContext) -> (Self, Task<Message>) {
        let state = AppState::new(context);
        let (screen, task) = ScreenData::open(PageKind::Home, &state);
        (Self { state, screen }, task.map(unwrap_message))
    }

    pub fn title(&self) -> String {
        format!("Flat Shape Classifier - {}", self.screen.page())
    }

    pub fn update(&mut self, message: Message) -> Task<Message> {
        self.screen
            .update(message, &mut self.state)
            .map(unwrap_message)
    }

    pub fn view(&self) -> Element<'_, Message> {
        layout(
            self.screen.page(),
            Message::Navigate,
            self.screen.view(&self.state).map(unwrap_message),
        )
    }
}

/// Open the window and block until it is closed
pub fn run(context: AppContext) -> iced::Result {
    iced::application(
        move || ShapeSketchApp::new(context.clone()),
        ShapeSketchApp::update,
        ShapeSketchApp::view,
    )
    .title(ShapeSketchApp::title)
    .window_size((1000.0, 860.0))
    .run()
}
