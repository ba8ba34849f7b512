//! Keyword fallback for sentiment when the backend omits it.

use once_cell::sync::Lazy;
use regex::Regex;

static RULES: Lazy<Vec<(Regex, &'static str)>> = Lazy::new(|| {
    [
        (r"(?i)angry|furious|terrible|awful|hate|disgusted|mad|rage", "Angry"),
        (
            r"(?i)urgent|blocked|blocking|frustrated|hours|stuck|asap|critical|issue!|problem!|!",
            "Frustrated",
        ),
        (r"(?i)curious|interested|wonder|could you|\?|how", "Curious"),
    ]
    .into_iter()
    .filter_map(|(pattern, label)| Regex::new(pattern).ok().map(|re| (re, label)))
    .collect()
});

/// Guess a sentiment label from free text. First matching rule wins.
pub fn infer_sentiment(text: &str) -> &'static str {
    RULES
        .iter()
        .find(|(re, _)| re.is_match(text))
        .map(|(_, label)| *label)
        .unwrap_or("Neutral")
}
