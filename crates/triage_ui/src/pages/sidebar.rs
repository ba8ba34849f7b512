//! Navigation, classification stats and backend status.

use iced::alignment::Vertical;
use iced::widget::{button, column, container, row, text};
use iced::{Element, Length};

use crate::app::{App, BackendHealth, Message, View};
use crate::theme::{self, colors, font, spacing};

pub fn view(app: &App) -> Element<'_, Message> {
    let title = text("Triage Desk")
        .size(font::HEADER)
        .color(colors::TEXT_PRIMARY);

    let nav = column(View::ALL.iter().map(|v| nav_entry(*v, app.view == *v)))
        .spacing(spacing::XS);

    let content = column![
        title,
        text("Customer support ticket triage")
            .size(font::SM)
            .color(colors::TEXT_SECONDARY),
        nav,
        stats_section(app),
        health_section(app),
    ]
    .spacing(spacing::XL);

    container(content)
        .width(Length::Fixed(280.0))
        .height(Length::Fill)
        .padding(spacing::XL)
        .style(theme::sidebar)
        .into()
}

fn nav_entry(target: View, active: bool) -> Element<'static, Message> {
    let label = text(target.label()).size(font::MD).color(if active {
        colors::PRIMARY
    } else {
        colors::TEXT_SECONDARY
    });

    let entry = button(label)
        .style(button::text)
        .width(Length::Fill)
        .padding([spacing::SM, spacing::LG])
        .on_press(Message::Navigate(target));

    if active {
        container(entry).style(theme::nav_active).into()
    } else {
        entry.into()
    }
}

fn stats_section(app: &App) -> Element<'_, Message> {
    let stats = app.stats();
    let line = |label: &str, value: usize| {
        text(format!("{}: {}", label, value))
            .size(font::NORMAL)
            .color(colors::TEXT_SECONDARY)
    };

    column![
        text("Classification Stats")
            .size(font::MD)
            .color(colors::TEXT_PRIMARY),
        line("Total Tickets", stats.total),
        line("P0 Priority", stats.high_priority),
        line("Automated", stats.automated),
    ]
    .spacing(spacing::XS)
    .into()
}

fn health_section(app: &App) -> Element<'_, Message> {
    let (status, color) = match &app.health {
        BackendHealth::Unknown => ("Checking backend...".to_string(), colors::TEXT_MUTED),
        BackendHealth::Healthy(service) => (format!("Connected: {}", service), colors::SUCCESS),
        BackendHealth::Unreachable(reason) => (format!("Offline: {}", reason), colors::ERROR),
    };
    let base_url = app
        .client
        .as_ref()
        .map(|c| c.base_url().to_string())
        .unwrap_or_default();

    column![
        text("Backend").size(font::MD).color(colors::TEXT_PRIMARY),
        text(base_url).size(font::SM).color(colors::TEXT_MUTED),
        row![
            text(status).size(font::SM).color(color).width(Length::Fill),
            button(text("Check").size(font::SM))
                .style(button::secondary)
                .padding([spacing::XS, spacing::SM])
                .on_press(Message::CheckHealth),
        ]
        .spacing(spacing::SM)
        .align_y(Vertical::Center),
    ]
    .spacing(spacing::XS)
    .into()
}
