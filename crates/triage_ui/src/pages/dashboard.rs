//! Bulk classification: upload, quick classify, progress and the ticket table.

use iced::alignment::Vertical;
use iced::font::Weight;
use iced::widget::{button, column, container, progress_bar, row, scrollable, text, text_input};
use iced::{Element, Font, Length};

use triage_core::models::{priority_label, Ticket};

use crate::app::{App, Message};
use crate::theme::{self, colors, font, spacing};
use crate::widgets::response_view;

const BOLD: Font = Font {
    weight: Weight::Bold,
    ..Font::DEFAULT
};

const ID_WIDTH: f32 = 90.0;
const BADGE_WIDTH: f32 = 110.0;

pub fn view(app: &App) -> Element<'_, Message> {
    let mut content = column![header(app), quick_classify(app)].spacing(spacing::LG);

    if let Some(err) = &app.load_error {
        content = content.push(text(err).size(font::NORMAL).color(colors::ERROR));
    }

    if app.is_streaming {
        content = content.push(progress_section(app));
    }

    content = content.push(table(app));

    container(content).width(Length::Fill).height(Length::Fill).into()
}

fn header(app: &App) -> Element<'_, Message> {
    let upload = button(text("Upload tickets\u{2026}").size(font::NORMAL))
        .style(button::primary)
        .padding([spacing::SM, spacing::LG])
        .on_press_maybe(app.can_upload().then_some(Message::UploadTickets));

    row![
        column![
            text("Bulk Classification")
                .size(font::HEADER)
                .color(colors::TEXT_PRIMARY),
            text("Classify a ticket set, then generate responses per ticket")
                .size(font::NORMAL)
                .color(colors::TEXT_SECONDARY),
        ]
        .spacing(spacing::XS)
        .width(Length::Fill),
        upload,
    ]
    .align_y(Vertical::Center)
    .into()
}

fn quick_classify(app: &App) -> Element<'_, Message> {
    let enabled = !app.is_busy();
    let can_submit = enabled && !app.quick_text.trim().is_empty();

    let mut input = text_input("Paste a ticket to classify it...", &app.quick_text)
        .size(font::NORMAL)
        .padding(spacing::SM)
        .width(Length::Fill);
    if enabled {
        input = input.on_input(Message::QuickTextChanged);
    }
    if can_submit {
        input = input.on_submit(Message::QuickClassify);
    }

    let analyze = button(
        text(if app.is_analyzing { "Analyzing..." } else { "Analyze" }).size(font::NORMAL),
    )
    .padding([spacing::SM, spacing::LG])
    .on_press_maybe(can_submit.then_some(Message::QuickClassify));

    row![input, analyze]
        .spacing(spacing::SM)
        .align_y(Vertical::Center)
        .into()
}

fn progress_section(app: &App) -> Element<'_, Message> {
    let total = app.progress.total.max(1) as f32;
    let current = app.progress.current as f32;

    column![
        text(format!(
            "Classifying tickets: {} / {}",
            app.progress.current, app.progress.total
        ))
        .size(font::SM)
        .color(colors::TEXT_SECONDARY),
        progress_bar(0.0..=total, current.min(total)),
    ]
    .spacing(spacing::XS)
    .into()
}

fn table(app: &App) -> Element<'_, Message> {
    let mut rows = column![header_row()].spacing(spacing::SM);

    if app.tickets.is_empty() {
        let placeholder = if app.is_loading {
            Some("Loading tickets...")
        } else if app.is_streaming {
            Some("Starting classification...")
        } else {
            None
        };
        if let Some(label) = placeholder {
            rows = rows.push(
                container(text(label).size(font::NORMAL).color(colors::TEXT_MUTED))
                    .padding(spacing::LG),
            );
        }
    }

    for ticket in &app.tickets {
        rows = rows.push(ticket_row(app, ticket));
    }

    container(scrollable(rows).height(Length::Fill))
        .padding(spacing::MD)
        .height(Length::Fill)
        .style(theme::card)
        .into()
}

fn header_row() -> Element<'static, Message> {
    let cell = |label: &'static str| text(label).size(font::SM).font(BOLD).color(colors::TEXT_SECONDARY);

    row![
        cell("ID").width(Length::Fixed(ID_WIDTH)),
        cell("Subject").width(Length::FillPortion(4)),
        cell("Topic").width(Length::FillPortion(2)),
        cell("Sentiment").width(Length::FillPortion(2)),
        cell("Priority").width(Length::Fixed(BADGE_WIDTH)),
    ]
    .spacing(spacing::SM)
    .into()
}

fn ticket_row<'a>(app: &'a App, ticket: &'a Ticket) -> Element<'a, Message> {
    let analysis = &ticket.classification;
    let priority = analysis.priority();

    let badge = container(
        text(format!("{} ({})", priority, priority_label(&priority)))
            .size(font::SM)
            .color(iced::Color::WHITE),
    )
    .padding([2.0, spacing::SM])
    .style(theme::priority_badge(&priority));

    let summary = row![
        text(format!("#{}", ticket.id))
            .size(font::NORMAL)
            .color(colors::TEXT_MUTED)
            .width(Length::Fixed(ID_WIDTH)),
        text(&ticket.subject)
            .size(font::NORMAL)
            .font(BOLD)
            .color(colors::TEXT_PRIMARY)
            .width(Length::FillPortion(4)),
        text(&analysis.topic)
            .size(font::NORMAL)
            .width(Length::FillPortion(2)),
        text(&analysis.sentiment)
            .size(font::NORMAL)
            .width(Length::FillPortion(2)),
        container(badge).width(Length::Fixed(BADGE_WIDTH)),
    ]
    .spacing(spacing::SM)
    .align_y(Vertical::Center);

    let generating = app.generating_for.as_ref() == Some(&ticket.id);
    let generate = button(
        text(if generating { "Generating..." } else { "Generate response" }).size(font::SM),
    )
    .style(button::secondary)
    .padding([spacing::XS, spacing::SM])
    .on_press_maybe((!app.is_busy()).then(|| Message::GenerateResponse(ticket.id.clone())));

    let mut details = column![
        summary,
        text(&ticket.body).size(font::SM).color(colors::TEXT_SECONDARY),
        generate,
    ]
    .spacing(spacing::XS);

    if let Some(lines) = app.response_for(&ticket.id) {
        details = details.push(
            container(response_view(lines))
                .padding(spacing::MD)
                .width(Length::Fill)
                .style(theme::panel),
        );
    }

    container(details)
        .padding(spacing::SM)
        .width(Length::Fill)
        .into()
}
