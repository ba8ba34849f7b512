//! Draws a rendered backend response with clickable links.

use iced::font::Weight;
use iced::widget::{button, column, row, text};
use iced::{Element, Font};

use triage_core::render::RenderedLine;

use crate::app::Message;
use crate::theme::{colors, font};

const BOLD: Font = Font {
    weight: Weight::Bold,
    ..Font::DEFAULT
};

/// One widget per rendered line, in order.
pub fn response_view(lines: &[RenderedLine]) -> Element<'_, Message> {
    column(lines.iter().map(line_view)).spacing(2.0).into()
}

fn line_view(line: &RenderedLine) -> Element<'_, Message> {
    match line {
        RenderedLine::Break => text("").size(font::NORMAL).into(),
        RenderedLine::SourcesHeading => text(RenderedLine::SOURCES_LABEL)
            .size(font::NORMAL)
            .font(BOLD)
            .color(colors::TEXT_PRIMARY)
            .into(),
        RenderedLine::SourceLink(url) => link(url),
        RenderedLine::Linked { before, url, after } => row![
            body_text(before),
            link(url),
            body_text(after),
        ]
        .into(),
        RenderedLine::Plain(line) => body_text(line).into(),
    }
}

fn body_text(content: &str) -> text::Text<'_> {
    text(content).size(font::NORMAL).color(colors::TEXT_PRIMARY)
}

fn link(url: &str) -> Element<'_, Message> {
    button(text(url).size(font::NORMAL).color(colors::LINK))
        .style(button::text)
        .padding(0.0)
        .on_press(Message::OpenLink(url.to_string()))
        .into()
}
