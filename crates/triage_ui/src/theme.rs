//! Theme configuration for Triage Desk.
//!
//! Colors, spacing and font sizes, plus the few container styles the pages
//! share.

use iced::widget::container;
use iced::{Border, Color, Theme};

use triage_core::models::Priority;

/// Application colors (light palette).
pub mod colors {
    use super::Color;

    /// Sidebar background
    pub const SIDEBAR: Color = Color::from_rgb(1.0, 1.0, 1.0);

    /// Main content background
    pub const BACKGROUND: Color = Color::from_rgb(0.973, 0.980, 0.988);

    /// Card/panel background
    pub const CARD: Color = Color::from_rgb(1.0, 1.0, 1.0);

    /// Muted panel background (insights, response boxes)
    pub const PANEL: Color = Color::from_rgb(0.973, 0.980, 0.988);

    /// Active navigation entry
    pub const NAV_ACTIVE: Color = Color::from_rgb(0.878, 0.906, 1.0);

    /// Primary accent color
    pub const PRIMARY: Color = Color::from_rgb(0.231, 0.510, 0.965);

    /// Link color
    pub const LINK: Color = Color::from_rgb(0.145, 0.388, 0.922);

    pub const ERROR: Color = Color::from_rgb(0.863, 0.149, 0.149);

    pub const SUCCESS: Color = Color::from_rgb(0.063, 0.725, 0.506);

    pub const WARNING: Color = Color::from_rgb(0.961, 0.620, 0.043);

    /// Text primary
    pub const TEXT_PRIMARY: Color = Color::from_rgb(0.118, 0.161, 0.231);

    /// Text secondary
    pub const TEXT_SECONDARY: Color = Color::from_rgb(0.392, 0.455, 0.545);

    /// Text muted
    pub const TEXT_MUTED: Color = Color::from_rgb(0.420, 0.447, 0.502);

    /// Border color
    pub const BORDER: Color = Color::from_rgb(0.898, 0.906, 0.922);
}

/// Badge colors for priority tiers.
pub mod priority {
    use super::{Color, Priority};

    pub fn color(priority: &Priority) -> Color {
        let (r, g, b) = priority.rgb();
        Color::from_rgb8(r, g, b)
    }
}

/// Spacing constants.
pub mod spacing {
    /// Extra small spacing (4px)
    pub const XS: f32 = 4.0;
    /// Small spacing (8px)
    pub const SM: f32 = 8.0;
    /// Medium spacing (12px)
    pub const MD: f32 = 12.0;
    /// Large spacing (16px)
    pub const LG: f32 = 16.0;
    /// Extra large spacing (24px)
    pub const XL: f32 = 24.0;
}

/// Font sizes.
pub mod font {
    /// Small font size
    pub const SM: f32 = 11.0;
    /// Normal font size
    pub const NORMAL: f32 = 13.0;
    /// Medium font size
    pub const MD: f32 = 14.0;
    /// Large font size
    pub const LG: f32 = 16.0;
    /// Header font size
    pub const HEADER: f32 = 18.0;
    /// Summary card numbers
    pub const METRIC: f32 = 28.0;
}

fn bordered(background: Color) -> container::Style {
    container::Style {
        background: Some(background.into()),
        border: Border {
            color: colors::BORDER,
            width: 1.0,
            radius: 8.0.into(),
        },
        ..container::Style::default()
    }
}

/// White card with a light border.
pub fn card(_theme: &Theme) -> container::Style {
    bordered(colors::CARD)
}

/// Muted inset panel.
pub fn panel(_theme: &Theme) -> container::Style {
    bordered(colors::PANEL)
}

pub fn sidebar(_theme: &Theme) -> container::Style {
    container::Style {
        background: Some(colors::SIDEBAR.into()),
        border: Border {
            color: colors::BORDER,
            width: 1.0,
            radius: 0.0.into(),
        },
        ..container::Style::default()
    }
}

pub fn content(_theme: &Theme) -> container::Style {
    container::Style {
        background: Some(colors::BACKGROUND.into()),
        ..container::Style::default()
    }
}

pub fn nav_active(_theme: &Theme) -> container::Style {
    container::Style {
        background: Some(colors::NAV_ACTIVE.into()),
        border: Border {
            radius: 6.0.into(),
            ..Border::default()
        },
        ..container::Style::default()
    }
}

/// Filled pill in the priority's color.
pub fn priority_badge(priority: &Priority) -> impl Fn(&Theme) -> container::Style {
    let background = priority::color(priority);
    move |_theme| container::Style {
        background: Some(background.into()),
        text_color: Some(Color::WHITE),
        border: Border {
            radius: 10.0.into(),
            ..Border::default()
        },
        ..container::Style::default()
    }
}
