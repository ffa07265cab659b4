pub mod about_app;
pub mod about_data;
pub mod home;
pub mod loading_page;
pub mod usage;

use std::fmt;

use iced::{Element, Task};

use crate::{
    gallery::load_gallery,
    gui::{AppState, Message},
};

#[derive(Debug, Clone)]
pub enum ScreenMessage<S: Screen> {
    ScreenMessage(S::Message),
    ParentMessage(S::ParentMessage),
}

pub trait Screen: Sized {
    type Message: std::fmt::Debug;
    type ParentMessage: std::fmt::Debug;
    fn view<'a>(&'a self, state: &'a AppState) -> Element<'a, ScreenMessage<Self>>;
    fn update(&mut self, message: Self::Message, state: &mut AppState)
    -> Task<ScreenMessage<Self>>;
}

/// The four pages offered in the sidebar
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PageKind {
    Home,
    AboutApp,
    Usage,
    AboutData,
}

impl PageKind {
    pub const ALL: [PageKind; 4] = [
        PageKind::Home,
        PageKind::AboutApp,
        PageKind::Usage,
        PageKind::AboutData,
    ];

    pub fn title(&self) -> &'static str {
        match self {
            PageKind::Home => "Home",
            PageKind::AboutApp => "About the App",
            PageKind::Usage => "How to Use",
            PageKind::AboutData => "About the Data",
        }
    }
}

impl fmt::Display for PageKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.title())
    }
}

#[derive(Debug, Clone)]
pub enum ScreenData {
    Home(home::HomeScreen),
    AboutApp(about_app::AboutAppScreen),
    Usage(usage::UsageScreen),
    AboutData(about_data::AboutDataScreen),
    LoadingPage(loading_page::LoadingPageScreen),
}

impl ScreenData {
    /// Build the screen for a page, plus whatever it needs to load first
    pub fn open(page: PageKind, state: &AppState) -> (Self, Task<ScreenMessage<Self>>) {
        match page {
            PageKind::Home => (ScreenData::Home(home::HomeScreen), Task::none()),
            PageKind::AboutApp => (ScreenData::AboutApp(about_app::AboutAppScreen), Task::none()),
            PageKind::Usage => (ScreenData::Usage(usage::UsageScreen), Task::none()),
            PageKind::AboutData => {
                let sample_dir = state.context.config.sample_dir.clone();
                (
                    ScreenData::LoadingPage(loading_page::LoadingPageScreen { page }),
                    Task::perform(
                        async move { load_gallery(&sample_dir).map_err(|e| format!("{e:#}")) },
                        |result| ScreenMessage::ScreenMessage(Message::GalleryLoaded(result)),
                    ),
                )
            }
        }
    }

    /// Page the sidebar should show as selected
    pub fn page(&self) -> PageKind {
        match self {
            ScreenData::Home(_) => PageKind::Home,
            ScreenData::AboutApp(_) => PageKind::AboutApp,
            ScreenData::Usage(_) => PageKind::Usage,
            ScreenData::AboutData(_) => PageKind::AboutData,
            ScreenData::LoadingPage(screen) => screen.page,
        }
    }
}

impl Screen for ScreenData {
    type Message = Message;
    type ParentMessage = std::convert::Infallible;
    fn view<'a>(&'a self, state: &'a AppState) -> Element<'a, ScreenMessage<Self>> {
        match self {
            ScreenData::Home(screen) => screen.view(state).map(Message::Home),
            ScreenData::AboutApp(screen) => screen.view(state).map(Message::AboutApp),
            ScreenData::Usage(screen) => screen.view(state).map(Message::Usage),
            ScreenData::AboutData(screen) => screen.view(state).map(Message::AboutData),
            ScreenData::LoadingPage(screen) => screen.view(state).map(Message::LoadingPage),
        }
        .map(ScreenMessage::ScreenMessage)
    }

    fn update(
        &mut self,
        message: Self::Message,
        state: &mut AppState,
    ) -> Task<ScreenMessage<Self>> {
        match (self, message) {
            (x, Message::Navigate(page)) => {
                if x.page() == page {
                    return Task::none();
                }
                let (screen, task) = ScreenData::open(page, state);
                *x = screen;
                task
            }
            (x, Message::GalleryLoaded(result)) => {
                // Dropped if the user navigated elsewhere while loading
                if x.page() == PageKind::AboutData {
                    *x = ScreenData::AboutData(about_data::AboutDataScreen::new(result));
                }
                Task::none()
            }
            // Session results land even when the home page is not showing
            (_, Message::Home(msg)) => match msg {
                ScreenMessage::ScreenMessage(msg) => home::HomeScreen
                    .update(msg, state)
                    .map(Message::Home)
                    .map(ScreenMessage::ScreenMessage),
                ScreenMessage::ParentMessage(never) => match never {},
            },
            (ScreenData::AboutData(page), Message::AboutData(msg)) => match msg {
                ScreenMessage::ScreenMessage(msg) => page
                    .update(msg, state)
                    .map(Message::AboutData)
                    .map(ScreenMessage::ScreenMessage),
                ScreenMessage::ParentMessage(never) => match never {},
            },
            _ => Task::none(),
        }
    }
}
