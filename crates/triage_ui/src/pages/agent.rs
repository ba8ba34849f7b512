//! Interactive agent: analysis cards, the generated response and the ticket editor.

use iced::alignment::Vertical;
use iced::widget::{button, column, container, row, scrollable, text, text_editor};
use iced::{Element, Length};

use triage_core::models::{priority_label, Analysis};

use crate::app::{App, Message};
use crate::theme::{self, colors, font, spacing};
use crate::widgets::response_view;

pub fn view(app: &App) -> Element<'_, Message> {
    let status = if app.is_analyzing {
        "Analyzing your request..."
    } else {
        "Ready to help with classification and responses"
    };

    let header = column![
        text("Interactive Agent")
            .size(font::HEADER)
            .color(colors::TEXT_PRIMARY),
        text(status).size(font::NORMAL).color(colors::TEXT_SECONDARY),
    ]
    .spacing(spacing::XS);

    let mut results = column![].spacing(spacing::LG);
    if let Some(analysis) = &app.current_analysis {
        results = results.push(analysis_cards(analysis));
        results = results.push(
            container(response_view(&app.current_response))
                .padding(spacing::LG)
                .width(Length::Fill)
                .style(theme::card),
        );
    }
    if let Some(err) = &app.agent_error {
        results = results.push(text(err).size(font::NORMAL).color(colors::ERROR));
    }

    column![
        header,
        scrollable(results).height(Length::Fill),
        composer(app),
    ]
    .spacing(spacing::LG)
    .height(Length::Fill)
    .into()
}

fn analysis_cards(analysis: &Analysis) -> Element<'_, Message> {
    let priority = analysis.priority();
    let priority_text = format!("{} ({})", priority, priority_label(&priority));

    row![
        card("Topic", analysis.topic.clone(), colors::TEXT_PRIMARY),
        card("Sentiment", analysis.sentiment.clone(), colors::TEXT_PRIMARY),
        card("Priority", priority_text, theme::priority::color(&priority)),
    ]
    .spacing(spacing::MD)
    .into()
}

fn card(title: &'static str, value: String, color: iced::Color) -> Element<'static, Message> {
    container(
        column![
            text(title).size(font::SM).color(colors::TEXT_SECONDARY),
            text(value).size(font::LG).color(color),
        ]
        .spacing(spacing::XS),
    )
    .padding(spacing::LG)
    .width(Length::FillPortion(1))
    .style(theme::card)
    .into()
}

fn composer(app: &App) -> Element<'_, Message> {
    let enabled = !app.is_busy();
    let can_submit = enabled && !app.editor.text().trim().is_empty();

    let mut editor = text_editor(&app.editor)
        .placeholder("Describe the customer's issue...")
        .height(Length::Fixed(140.0))
        .size(font::NORMAL);
    if enabled {
        editor = editor.on_action(Message::EditorAction);
    }

    let analyze = button(
        text(if app.is_analyzing { "Analyzing..." } else { "Analyze" }).size(font::NORMAL),
    )
    .style(button::primary)
    .padding([spacing::SM, spacing::XL])
    .on_press_maybe(can_submit.then_some(Message::AnalyzeTicket));

    row![editor, analyze]
        .spacing(spacing::SM)
        .align_y(Vertical::Bottom)
        .into()
}
