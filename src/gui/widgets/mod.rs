mod sketch_pad;

pub use sketch_pad::SketchPad;

use iced::{
    Color, Element, Theme, border, widget::{column, container::Style, container, pick_list, text}
};
use iced_widget::container::bordered_box;

use crate::gui::PageKind;

impl PageKind {
    fn style(self, current: Self) -> impl Fn(&Theme) -> Style {
        move |theme: &Theme| {
            let style = bordered_box(theme).border(border::width(2));
            // darken the entry for the page being shown
            if self == current {
                let mut color_rgba = theme.palette().background.into_rgba8();
                color_rgba[0] /= 2;
                color_rgba[1] /= 2;
                color_rgba[2] /= 2;
                style.background(Color::from_rgb8(color_rgba[0], color_rgba[1], color_rgba[2]))
            } else {
                style.background(theme.palette().background)
            }
        }
    }
}

/// Sidebar with the page selector next to the page content
pub fn layout<'a, Message>(
    current: PageKind,
    on_navigate: impl Fn(PageKind) -> Message + 'a,
    main_content: impl Into<Element<'a, Message>>,
) -> Element<'a, Message>
where
    Message: Clone + 'a,
{
    let pages: Vec<Element<'a, Message>> = PageKind::ALL
        .iter()
        .map(|&page| {
            container(text(page.title()))
                .style(page.style(current))
                .padding(10)
                .width(iced::Length::Fill)
                .into()
        })
        .collect();

    container(iced::widget::row![
        container(column![
            text("Navigation").size(20),
            pick_list(PageKind::ALL, Some(current), on_navigate),
            column(pages).spacing(5),
        ]
        .spacing(15)
        .padding(15))
        .height(iced::Length::Fill)
        .width(iced::Length::FillPortion(1)),
        container(main_content.into()).width(iced::Length::FillPortion(4)),
    ])
    .center_x(iced::Length::Fill)
    .center_y(iced::Length::Fill)
    .into()
}
