use once_cell::sync::Lazy;
use regex::{Captures, Regex};

// Alternation order decides ties at the same offset: code, then bold, then italic.
static INLINE_SPAN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"`([^`]+)`|\*\*([^*]+)\*\*|\*([^*]+)\*").expect("inline span regex")
});

static TAG: Lazy<Regex> = Lazy::new(|| Regex::new(r"<[^>]+>").expect("tag regex"));

/// Converts inline markdown spans to HTML markup in a single left-to-right
/// pass. Matched spans never overlap and their contents are not re-scanned,
/// so `` `**x**` `` stays literal inside the code element. Unbalanced
/// markers are left as they are.
pub fn to_markup(text: &str) -> String {
    INLINE_SPAN
        .replace_all(text, |caps: &Captures<'_>| {
            if let Some(code) = caps.get(1) {
                format!("<code>{}</code>", code.as_str())
            } else if let Some(strong) = caps.get(2) {
                format!("<strong>{}</strong>", strong.as_str())
            } else if let Some(em) = caps.get(3) {
                format!("<em>{}</em>", em.as_str())
            } else {
                caps[0].to_owned()
            }
        })
        .into_owned()
}

pub fn strip_tags(markup: &str) -> String {
    TAG.replace_all(markup, "").into_owned()
}

/// Removes emphasis markers: every `*`, and a pair of `_` wrapping the whole text.
pub fn strip_emphasis(text: &str) -> String {
    let without_stars: String = text.chars().filter(|c| *c != '*').collect();
    let trimmed = without_stars.trim();
    let unwrapped = trimmed
        .strip_prefix('_')
        .and_then(|rest| rest.strip_suffix('_'))
        .unwrap_or(trimmed);
    unwrapped.trim().to_owned()
}

/// Summary derived from a formatted achievement: the achievement itself when
/// its visible text fits in `limit` characters, otherwise the visible text
/// cut to `limit` characters with `...` appended.
pub fn summarize(achievement: &str, limit: usize) -> String {
    let plain = strip_tags(achievement);
    if plain.chars().count() <= limit {
        return achievement.to_owned();
    }
    let cut: String = plain.chars().take(limit).collect();
    format!("{}...", cut.trim_end())
}
