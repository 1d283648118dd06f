use once_cell::sync::Lazy;
use regex::Regex;

use crate::content::Publication;

static BOLD_SPAN: Lazy<Regex> = Lazy::new(|| Regex::new(r"\*\*([^*]+)\*\*").expect("bold regex"));
static LINK: Lazy<Regex> = Lazy::new(|| Regex::new(r"\[([^\]]*)\]\(([^)\s]*)\)").expect("link regex"));
static YEAR: Lazy<Regex> = Lazy::new(|| Regex::new(r"\b(?:19|20)\d{2}\b").expect("year regex"));
// Single `*` or `_` emphasis; bold spans are removed before this runs.
static EMPHASIS: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\*([^*]+)\*|\b_([^_]+)_\b").expect("emphasis regex"));

/// One publication per line holding a bold span, e.g.
/// `- **[Title](url)** - A. Author, B. Author. *Venue*, 2023.`
pub(crate) fn parse_publications(lines: &[&str]) -> Vec<Publication> {
    lines
        .iter()
        .filter_map(|line| parse_line(line.trim()))
        .collect()
}

fn parse_line(line: &str) -> Option<Publication> {
    let bold = BOLD_SPAN.captures(line)?;
    let bold_match = bold.get(0)?;
    let bold_text = bold[1].trim();

    let (title, title_link) = match LINK.captures(bold_text) {
        Some(caps) => (caps[1].trim().to_owned(), non_empty(&caps[2])),
        None => (bold_text.to_owned(), None),
    };
    if title.is_empty() {
        return None;
    }

    let rest = &line[bold_match.end()..];
    let link = title_link.or_else(|| {
        LINK.captures(line)
            .and_then(|caps| non_empty(&caps[2]))
    });

    // Link text stays, URLs go: a year inside an href never counts.
    let without_urls = LINK.replace_all(line, "$1");
    let year = YEAR
        .find(&without_urls)
        .and_then(|m| m.as_str().parse::<u16>().ok());

    let venue_caps = EMPHASIS.captures(rest);
    let venue = venue_caps
        .as_ref()
        .and_then(|caps| caps.get(1).or_else(|| caps.get(2)))
        .map(|m| m.as_str().trim().to_owned())
        .filter(|venue| !venue.is_empty());

    let authors = rest
        .trim_start()
        .strip_prefix("- ")
        .map(|after| {
            let stripped = LINK.replace_all(after, "");
            let stripped = EMPHASIS.replace_all(&stripped, "");
            YEAR.replace_all(&stripped, "").into_owned()
        })
        .map(|text| tidy_authors(&text))
        .filter(|authors| !authors.is_empty());

    Some(Publication {
        title,
        authors,
        venue,
        year,
        link,
        category: None,
    })
}

fn non_empty(href: &str) -> Option<String> {
    let href = href.trim();
    (!href.is_empty() && href != "#").then(|| href.to_owned())
}

/// Collapses whitespace and trims the separators left behind by removed spans.
fn tidy_authors(text: &str) -> String {
    let collapsed = text.split_whitespace().collect::<Vec<_>>().join(" ");
    let mut out = collapsed.as_str();
    loop {
        let trimmed = out
            .trim()
            .trim_end_matches([',', '.', ';', ':', '(', ')', '-'])
            .trim_end();
        if trimmed == out {
            break;
        }
        out = trimmed;
    }
    out.replace(" ,", ",").replace(" .", ".")
}
