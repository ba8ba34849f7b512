//! Analytics & reports page.

use iced::widget::{button, column, container, image, row, scrollable, text};
use iced::{Element, Length};

use triage_core::models::{Insight, ReportsResponse};

use crate::app::{App, Message};
use crate::theme::{self, colors, font, spacing};

pub fn view(app: &App) -> Element<'_, Message> {
    let generate = button(
        text(if app.is_generating_reports {
            "Generating Reports..."
        } else {
            "Generate Reports"
        })
        .size(font::NORMAL),
    )
    .style(button::primary)
    .padding([spacing::SM, spacing::XL])
    .on_press_maybe(app.can_generate_reports().then_some(Message::GenerateReports));

    let mut content = column![
        column![
            text("Analytics & Reports")
                .size(font::HEADER)
                .color(colors::TEXT_PRIMARY),
            text("Generate reports and analytics from your support tickets")
                .size(font::NORMAL)
                .color(colors::TEXT_SECONDARY),
        ]
        .spacing(spacing::XS),
        generate,
    ]
    .spacing(spacing::LG);

    if app.tickets.is_empty() {
        content = content.push(
            text("Upload and classify tickets first to generate reports")
                .size(font::SM)
                .color(colors::TEXT_MUTED),
        );
    }

    if let Some(err) = &app.reports_error {
        content = content.push(text(err).size(font::NORMAL).color(colors::ERROR));
    }

    if let Some(report) = &app.reports {
        content = content
            .push(summary_cards(report))
            .push(charts(app, report))
            .push(insights(&report.insights));
    }

    scrollable(content).height(Length::Fill).into()
}

fn summary_cards(report: &ReportsResponse) -> Element<'static, Message> {
    let accents = [
        colors::PRIMARY,
        colors::ERROR,
        colors::SUCCESS,
        colors::WARNING,
    ];

    row(report
        .summary_cards()
        .into_iter()
        .zip(accents)
        .map(|(card, accent)| -> Element<'static, Message> {
            container(
                column![
                    text(card.title).size(font::NORMAL).color(colors::TEXT_SECONDARY),
                    text(card.value).size(font::METRIC).color(accent),
                ]
                .spacing(spacing::XS),
            )
            .padding(spacing::LG)
            .width(Length::FillPortion(1))
            .style(theme::card)
            .into()
        }))
    .spacing(spacing::MD)
    .into()
}

fn charts<'a>(app: &'a App, report: &'a ReportsResponse) -> Element<'a, Message> {
    let mut section = column![].spacing(spacing::LG);

    if let Some(err) = report.chart_error() {
        section = section.push(text(err).size(font::NORMAL).color(colors::ERROR));
    }

    for (spec, handle) in &app.report_charts {
        let body: Element<'a, Message> = match handle {
            Some(handle) => image(handle.clone()).width(Length::Fill).into(),
            None => container(
                text("Chart failed to load")
                    .size(font::NORMAL)
                    .color(colors::TEXT_MUTED),
            )
            .padding(spacing::XL)
            .into(),
        };

        section = section.push(
            container(
                column![
                    text(spec.title).size(font::LG).color(colors::TEXT_PRIMARY),
                    body,
                ]
                .spacing(spacing::MD),
            )
            .padding(spacing::LG)
            .width(Length::Fill)
            .style(theme::card),
        );
    }

    section.into()
}

fn insights<'a>(insights: &'a [Insight]) -> Element<'a, Message> {
    if insights.is_empty() {
        return column![].into();
    }

    let items = insights.iter().enumerate().map(|(index, insight)| -> Element<'a, Message> {
        let mut body = column![
            text(insight.display_title(index))
                .size(font::MD)
                .color(colors::TEXT_PRIMARY),
            text(&insight.message)
                .size(font::NORMAL)
                .color(colors::TEXT_SECONDARY),
        ]
        .spacing(spacing::XS);
        if let Some(action) = insight.action.as_deref().filter(|a| !a.is_empty()) {
            body = body.push(
                text(format!("Action: {}", action))
                    .size(font::SM)
                    .color(colors::PRIMARY),
            );
        }
        container(body)
            .padding(spacing::MD)
            .width(Length::Fill)
            .style(theme::panel)
            .into()
    });

    container(
        column![
            text("Key Insights & Recommendations")
                .size(font::LG)
                .color(colors::TEXT_PRIMARY),
            column(items).spacing(spacing::MD),
        ]
        .spacing(spacing::MD),
    )
    .padding(spacing::LG)
    .width(Length::Fill)
    .style(theme::card)
    .into()
}
