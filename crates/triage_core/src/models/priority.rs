//! Priority tiers.

use std::fmt;

/// Backend priority tier. Anything other than P0/P1/P2 is kept verbatim.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Priority {
    P0,
    P1,
    P2,
    Other(String),
}

impl Priority {
    /// Parse the backend's priority string. Never fails.
    pub fn parse(value: &str) -> Self {
        match value {
            "P0" => Priority::P0,
            "P1" => Priority::P1,
            "P2" => Priority::P2,
            other => Priority::Other(other.to_string()),
        }
    }

    /// Badge color as `(r, g, b)`.
    pub fn rgb(&self) -> (u8, u8, u8) {
        match self {
            Priority::P0 => (0xdc, 0x26, 0x26),
            Priority::P1 => (0xf5, 0x9e, 0x0b),
            Priority::P2 => (0x10, 0xb9, 0x81),
            Priority::Other(_) => (0x6b, 0x72, 0x80),
        }
    }

    pub fn as_str(&self) -> &str {
        match self {
            Priority::P0 => "P0",
            Priority::P1 => "P1",
            Priority::P2 => "P2",
            Priority::Other(s) => s,
        }
    }
}

impl From<&str> for Priority {
    fn from(value: &str) -> Self {
        Priority::parse(value)
    }
}

impl fmt::Display for Priority {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Hex badge color for a priority.
pub fn priority_color(priority: &Priority) -> &'static str {
    match priority {
        Priority::P0 => "#dc2626",
        Priority::P1 => "#f59e0b",
        Priority::P2 => "#10b981",
        Priority::Other(_) => "#6b7280",
    }
}

/// Human label for a priority.
pub fn priority_label(priority: &Priority) -> &'static str {
    match priority {
        Priority::P0 => "High",
        Priority::P1 => "Medium",
        Priority::P2 | Priority::Other(_) => "Low",
    }
}
