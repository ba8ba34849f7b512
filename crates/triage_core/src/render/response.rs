//! Line-level markup for generated responses.

use once_cell::sync::Lazy;
use regex::Regex;

/// Sources heading, `- url` bullet, and inline URL.
static PATTERNS: Lazy<Option<[Regex; 3]>> = Lazy::new(|| {
    Some([
        Regex::new(r"(?i)^sources\s*:").ok()?,
        Regex::new(r"(?i)^-\s*(https?://\S+)").ok()?,
        Regex::new(r"(?i)https?://\S+").ok()?,
    ])
});

/// One displayed line of a response.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RenderedLine {
    /// Blank line.
    Break,
    /// Fixed "Sources:" heading.
    SourcesHeading,
    /// `- https://...` bullet, shown as a bare link.
    SourceLink(String),
    /// Text with a link; split around the first URL.
    Linked {
        before: String,
        url: String,
        after: String,
    },
    /// Anything else, untrimmed.
    Plain(String),
}

impl RenderedLine {
    pub const SOURCES_LABEL: &'static str = "Sources:";

    /// URL a click on this line should open.
    pub fn url(&self) -> Option<&str> {
        match self {
            RenderedLine::SourceLink(url) | RenderedLine::Linked { url, .. } => Some(url),
            _ => None,
        }
    }
}

/// Split `text` on `\n` and classify each line. Never fails; each input line
/// yields exactly one output line.
pub fn render_response(text: &str) -> Vec<RenderedLine> {
    text.split('\n').map(render_line).collect()
}

fn render_line(line: &str) -> RenderedLine {
    let trimmed = line.trim();
    if trimmed.is_empty() {
        return RenderedLine::Break;
    }
    let Some([heading, bullet, inline]) = PATTERNS.as_ref() else {
        return RenderedLine::Plain(line.to_string());
    };
    if heading.is_match(trimmed) {
        return RenderedLine::SourcesHeading;
    }
    if let Some(url) = bullet.captures(trimmed).and_then(|c| c.get(1)) {
        return RenderedLine::SourceLink(url.as_str().to_string());
    }
    if let Some(m) = inline.find(trimmed) {
        return RenderedLine::Linked {
            before: trimmed[..m.start()].to_string(),
            url: m.as_str().to_string(),
            after: trimmed[m.end()..].to_string(),
        };
    }
    RenderedLine::Plain(line.to_string())
}
