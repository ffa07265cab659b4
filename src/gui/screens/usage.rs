use std::convert::Infallible;

use iced::{
    Element, Task,
    widget::{column, text},
};

use crate::gui::{
    AppState,
    screens::{Screen, ScreenMessage},
};

const STEPS: [&str; 5] = [
    "Choose the model you want to use from the available options.",
    "Choose the kind of flat shape you are going to draw.",
    "Draw the shape in the area provided.",
    "Click 'Classify' to see the classification result.",
    "The result is shown below the canvas.",
];

#[derive(Debug, Clone)]
pub struct UsageScreen;

impl Screen for UsageScreen {
    type Message = Infallible;
    type ParentMessage = Infallible;

    fn view<'a>(&'a self, _state: &'a AppState) -> Element<'a, ScreenMessage<Self>> {
        let steps = STEPS
            .iter()
            .enumerate()
            .map(|(i, step)| text(format!("{}. {}", i + 1, step)).into());

        column![
            text("How to Use").size(32),
            text("Follow these steps to use the application:"),
            column(steps).spacing(10),
        ]
        .spacing(20)
        .padding(20)
        .into()
    }

    fn update(
        &mut self,
        message: Self::Message,
        _state: &mut AppState,
    ) -> Task<ScreenMessage<Self>> {
        match message {}
    }
}
