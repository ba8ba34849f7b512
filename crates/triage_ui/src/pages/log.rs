//! Activity log panel.

use iced::widget::{column, container, scrollable, text};
use iced::{Element, Length};

use crate::app::{App, Message};
use crate::theme::{self, colors, font, spacing};

pub fn view(app: &App) -> Element<'_, Message> {
    let log_content = text(&app.log_text)
        .size(font::SM)
        .color(colors::TEXT_SECONDARY);

    let scroll = scrollable(container(log_content).padding(spacing::SM).width(Length::Fill))
        .height(Length::Fill);

    column![
        text("Activity").size(font::MD).color(colors::TEXT_PRIMARY),
        container(scroll)
            .width(Length::Fill)
            .height(Length::Fill)
            .style(theme::panel),
    ]
    .spacing(spacing::XS)
    .height(Length::FillPortion(1))
    .into()
}
