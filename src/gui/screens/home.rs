use iced::{
    Element, Length, Task,
    widget::{button, canvas, column, image, pick_list, row, scrollable, text},
};

use crate::{
    drawing::{CANVAS_SIZE, Stroke},
    gui::{
        AppState,
        screens::{Screen, ScreenMessage},
        state::{ModelStatus, Status},
        widgets::SketchPad,
    },
    models::{ModelChoice, ShapeClass},
    pipeline::{SubmitOutcome, SubmitRequest, Submission},
    ModelHandle,
};
use tracing::warn;

/// Draw, classify and upload; all of its state lives in the session
#[derive(Debug, Clone)]
pub struct HomeScreen;

#[derive(Debug, Clone)]
pub enum HomeMessage {
    ModelSelected(ModelChoice),
    ModelLoaded(ModelChoice, Result<ModelHandle, String>),
    TargetSelected(ShapeClass),
    StrokeFinished(Stroke),
    ClearCanvas,
    Classify,
    Submitted(Result<SubmitOutcome, String>),
}

fn msg(message: HomeMessage) -> ScreenMessage<HomeScreen> {
    ScreenMessage::ScreenMessage(message)
}

impl Screen for HomeScreen {
    type Message = HomeMessage;
    type ParentMessage = std::convert::Infallible;

    fn view<'a>(&'a self, state: &'a AppState) -> Element<'a, ScreenMessage<Self>> {
        let session = &state.session;
        let side = CANVAS_SIZE as f32;

        let model_line = match &session.model {
            ModelStatus::NotSelected => text("No model selected yet."),
            ModelStatus::Loading => text("Loading model..."),
            ModelStatus::Ready(_) => text(format!(
                "Selected model: {}",
                session.selected_model.map(|m| m.display_name()).unwrap_or_default()
            )),
            ModelStatus::Failed(error) => text(format!("Failed to load model: {}", error)),
        };

        let pad = canvas(SketchPad::new(
            &session.sketch,
            state.context.config.canvas.stroke_width,
            |stroke| msg(HomeMessage::StrokeFinished(stroke)),
        ))
        .width(Length::Fixed(side))
        .height(Length::Fixed(side));

        let classify = button(if session.busy { "Classifying..." } else { "Classify" })
            .on_press_maybe((!session.busy).then(|| msg(HomeMessage::Classify)));

        let mut children: Vec<Element<'a, ScreenMessage<Self>>> = vec![
            text("Flat Shape Image Classifier").size(32).into(),
            text("Draw a shape on the canvas below.").into(),
            pick_list(ModelChoice::ALL, session.selected_model, |choice| {
                msg(HomeMessage::ModelSelected(choice))
            })
            .placeholder("Choose a model")
            .into(),
            model_line.into(),
            pick_list(ShapeClass::ALL, Some(session.target), |class| {
                msg(HomeMessage::TargetSelected(class))
            })
            .into(),
            text(format!("Selected shape: {}", session.target)).into(),
            pad.into(),
            row![
                classify,
                button("Clear").on_press(msg(HomeMessage::ClearCanvas)),
            ]
            .spacing(10)
            .into(),
        ];

        if let Some(status) = &session.status {
            children.push(status_view(status, side));
        }

        scrollable(
            iced::widget::Column::with_children(children)
                .spacing(15)
                .padding(20),
        )
        .into()
    }

    fn update(
        &mut self,
        message: Self::Message,
        state: &mut AppState,
    ) -> Task<ScreenMessage<Self>> {
        let session = &mut state.session;
        match message {
            HomeMessage::ModelSelected(choice) => {
                // Already loaded or on its way
                if session.selected_model == Some(choice)
                    && matches!(session.model, ModelStatus::Loading | ModelStatus::Ready(_))
                {
                    return Task::none();
                }
                session.selected_model = Some(choice);
                session.model = ModelStatus::Loading;

                let selector = state.context.models.clone();
                Task::perform(
                    async move {
                        match tokio::task::spawn_blocking(move || selector.load(choice)).await {
                            Ok(loaded) => loaded.map_err(|e| format!("{e:#}")),
                            Err(e) => Err(e.to_string()),
                        }
                    },
                    move |result| msg(HomeMessage::ModelLoaded(choice, result)),
                )
            }
            HomeMessage::ModelLoaded(choice, result) => {
                // A newer selection supersedes this load
                if session.selected_model == Some(choice) {
                    session.model = match result {
                        Ok(handle) => ModelStatus::Ready(handle),
                        Err(error) => {
                            warn!("Failed to load {}: {}", choice, error);
                            ModelStatus::Failed(error)
                        }
                    };
                }
                Task::none()
            }
            HomeMessage::TargetSelected(class) => {
                session.target = class;
                Task::none()
            }
            HomeMessage::StrokeFinished(stroke) => {
                session.sketch.push(stroke);
                Task::none()
            }
            HomeMessage::ClearCanvas => {
                session.sketch.clear();
                session.status = None;
                Task::none()
            }
            HomeMessage::Classify => {
                if session.busy {
                    return Task::none();
                }
                let bitmap = session
                    .sketch
                    .rasterize(CANVAS_SIZE, state.context.config.canvas.stroke_width);
                let request = SubmitRequest {
                    model: session.loaded_model(),
                    target: session.target,
                    bitmap,
                };
                session.busy = true;
                session.status = None;

                let pipeline = state.context.pipeline.clone();
                Task::perform(
                    async move { pipeline.submit(request).await.map_err(|e| format!("{e:#}")) },
                    |result| msg(HomeMessage::Submitted(result)),
                )
            }
            HomeMessage::Submitted(result) => {
                session.busy = false;
                session.status = Some(match result {
                    Ok(SubmitOutcome::Rejected(rejection)) => Status::Rejected(rejection),
                    Ok(SubmitOutcome::Completed(submission)) => Status::Completed(submission),
                    Err(error) => {
                        warn!("Submission failed: {}", error);
                        Status::Failed(error)
                    }
                });
                Task::none()
            }
        }
    }
}

fn status_view<'a, Message: 'a>(status: &'a Status, side: f32) -> Element<'a, Message> {
    match status {
        Status::Rejected(rejection) => text(rejection.to_string()).into(),
        Status::Failed(error) => text(format!("Error: {}", error)).into(),
        Status::Completed(submission) => submission_view(submission, side),
    }
}

fn submission_view<'a, Message: 'a>(submission: &'a Submission, side: f32) -> Element<'a, Message> {
    let bitmap = &submission.bitmap;
    let preview = image(image::Handle::from_rgba(
        bitmap.width(),
        bitmap.height(),
        bitmap.image().as_raw().clone(),
    ))
    .width(Length::Fixed(side));

    let mut children: Vec<Element<'a, Message>> = vec![
        preview.into(),
        text("Captured drawing").size(14).into(),
        text(format!("Model used: {}", submission.model)).into(),
        text(format!("Selected shape: {}", submission.target)).into(),
        text(format!("Classification result: {}", submission.prediction.class)).into(),
    ];

    if !submission.matches_target() {
        children.push(
            text(format!(
                "The drawing should belong to the {} category.",
                submission.target
            ))
            .into(),
        );
    }

    if let Some(record) = &submission.upload {
        children.push(text(format!("Drawing saved to storage as: {}", record.file_name)).into());
        children.push(text(format!("Image URL: {}", record.public_url)).into());
    }

    column(children).spacing(8).into()
}
