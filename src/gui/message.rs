use crate::gallery::GalleryEntry;
use crate::gui::screens::{
    PageKind, ScreenMessage, about_app::AboutAppScreen, about_data::AboutDataScreen,
    home::HomeScreen, loading_page::LoadingPageScreen, usage::UsageScreen,
};

#[derive(Debug, Clone)]
pub enum Message {
    Navigate(PageKind),
    Home(ScreenMessage<HomeScreen>),
    AboutApp(ScreenMessage<AboutAppScreen>),
    Usage(ScreenMessage<UsageScreen>),
    AboutData(ScreenMessage<AboutDataScreen>),
    LoadingPage(ScreenMessage<LoadingPageScreen>),
    GalleryLoaded(Result<Vec<GalleryEntry>, String>),
}
