use iced::{
    Element, Length, Task,
    widget::{Column, button, column, container, image, row, scrollable, text},
};

use crate::{
    gallery::{GalleryEntry, gallery_rows, load_gallery},
    gui::{
        AppState,
        screens::{Screen, ScreenMessage},
    },
    models::ShapeClass,
};

#[derive(Debug, Clone)]
pub struct AboutDataScreen {
    gallery: Result<Vec<GalleryEntry>, String>,
}

#[derive(Debug, Clone)]
pub enum AboutDataMessage {
    Reload,
    Loaded(Result<Vec<GalleryEntry>, String>),
}

impl AboutDataScreen {
    pub fn new(gallery: Result<Vec<GalleryEntry>, String>) -> Self {
        Self { gallery }
    }
}

impl Screen for AboutDataScreen {
    type Message = AboutDataMessage;
    type ParentMessage = std::convert::Infallible;

    fn view<'a>(&'a self, _state: &'a AppState) -> Element<'a, ScreenMessage<Self>> {
        let classes = ShapeClass::ALL.map(|c| c.label()).join(", ");

        let samples: Element<'a, ScreenMessage<Self>> = match &self.gallery {
            Err(error) => text(format!("Could not load sample images: {}", error)).into(),
            Ok(entries) if entries.is_empty() => text("No sample images found.").into(),
            Ok(entries) => Column::with_children(gallery_rows(entries).map(gallery_row))
                .spacing(20)
                .into(),
        };

        let content = column![
            text("About the Data").size(32),
            text("The data used by this application is a dataset of flat shape images."),
            text(
                "Each model was trained on 1000 images, 200 for every shape category."
            ),
            text(format!("The dataset covers these categories: {}.", classes)),
            text(
                "Every category has sample images for training and testing the models. \
                 Below are some samples that were tested against the trained models:"
            ),
            button("Reload samples").on_press(ScreenMessage::ScreenMessage(AboutDataMessage::Reload)),
            samples,
        ]
        .spacing(20)
        .padding(20);

        scrollable(content).into()
    }

    fn update(
        &mut self,
        message: Self::Message,
        state: &mut AppState,
    ) -> Task<ScreenMessage<Self>> {
        match message {
            AboutDataMessage::Reload => {
                let sample_dir = state.context.config.sample_dir.clone();
                Task::perform(
                    async move { load_gallery(&sample_dir).map_err(|e| format!("{e:#}")) },
                    |result| ScreenMessage::ScreenMessage(AboutDataMessage::Loaded(result)),
                )
            }
            AboutDataMessage::Loaded(gallery) => {
                self.gallery = gallery;
                Task::none()
            }
        }
    }
}

/// One row of up to two captioned images, each taking half the width
fn gallery_row<'a, Message: 'a>(entries: &'a [GalleryEntry]) -> Element<'a, Message> {
    let mut cells: Vec<Element<'a, Message>> = entries
        .iter()
        .map(|entry| {
            container(
                column![
                    image(image::Handle::from_path(&entry.path)).width(Length::Fill),
                    text(entry.caption.as_str()).size(14),
                ]
                .spacing(5),
            )
            .width(Length::FillPortion(1))
            .into()
        })
        .collect();

    while cells.len() < crate::gallery::GALLERY_COLUMNS {
        cells.push(container(text("")).width(Length::FillPortion(1)).into());
    }

    row(cells).spacing(20).into()
}
