use std::convert::Infallible;

use iced::{
    Element, Task,
    widget::{column, scrollable, text},
};

use crate::gui::{
    AppState,
    screens::{Screen, ScreenMessage},
};

#[derive(Debug, Clone)]
pub struct AboutAppScreen;

impl Screen for AboutAppScreen {
    type Message = Infallible;
    type ParentMessage = Infallible;

    fn view<'a>(&'a self, _state: &'a AppState) -> Element<'a, ScreenMessage<Self>> {
        let content = column![
            text("About the App").size(32),
            text(
                "This application classifies drawings of flat shapes. It uses machine learning \
                 models trained beforehand to recognise parallelograms, circles, rectangles, \
                 triangles and trapezoids, which touches on the basics of machine learning, \
                 image processing and choosing a suitable model."
            ),
            text(
                "Draw a shape in the area provided and the app classifies it with the model you \
                 picked. The result is shown together with the model used and the shape you \
                 selected. Every drawing is also saved to cloud storage so it can be used for \
                 further testing and development of the models."
            ),
        ]
        .spacing(20)
        .padding(20);

        scrollable(content).into()
    }

    fn update(
        &mut self,
        message: Self::Message,
        _state: &mut AppState,
    ) -> Task<ScreenMessage<Self>> {
        match message {}
    }
}
