use once_cell::sync::Lazy;
use regex::Regex;
use url::Url;

use crate::content::{Contact, Highlight};
use crate::resume::inline::strip_emphasis;
use crate::resume::section::heading_level;

const NAME_PLACEHOLDER: &str = "Unnamed";
const TITLE_PLACEHOLDER: &str = "Professional";

static MAILTO_LINK: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\[([^\]]+)\]\(mailto:([^)\s]+)\)").expect("mailto regex"));
static HTTPS_LINK: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\[([^\]]+)\]\((https://[^)\s]+)\)").expect("link regex"));
static PHONE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^\+?[0-9()][0-9 ().\-]{5,}[0-9]$").expect("phone regex"));
static HIGHLIGHT_LINE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^(?:-\s+)?\*\*([^*]+)\*\*\s*[:\-–—]?\s*(.+)$").expect("highlight regex")
});

/// Name and title are positional: line 1 and line 2 of the document.
pub(crate) fn parse_header(lines: &[&str]) -> (String, String) {
    let name = lines
        .first()
        .map(|line| line.trim().trim_start_matches('#').trim().to_owned())
        .filter(|name| !name.is_empty())
        .unwrap_or_else(|| NAME_PLACEHOLDER.to_owned());
    let title = lines
        .get(1)
        .map(|line| strip_emphasis(line))
        .filter(|title| !title.is_empty())
        .unwrap_or_else(|| TITLE_PLACEHOLDER.to_owned());
    (name, title)
}

pub(crate) fn parse_contacts(lines: &[&str]) -> Vec<Contact> {
    let email = lines.iter().find_map(|line| {
        MAILTO_LINK
            .captures(line)
            .map(|caps| format!("mailto:{}", &caps[2]))
    });
    let linkedin = lines.iter().find_map(|line| {
        HTTPS_LINK
            .captures_iter(line)
            .map(|caps| caps[2].to_owned())
            .find(|href| is_linkedin(href))
    });

    let (phone, location) = contact_line(lines)
        .map(plain_contact_tokens)
        .unwrap_or_default();

    let mut contacts = Vec::new();
    let mut push = |label: &str, url: Option<String>| {
        if let Some(url) = url {
            contacts.push(Contact {
                label: label.to_owned(),
                url,
            });
        }
    };
    push("Email", email);
    push("Phone", phone);
    push("LinkedIn", linkedin);
    push("Location", location);
    contacts
}

fn is_linkedin(href: &str) -> bool {
    Url::parse(href)
        .ok()
        .and_then(|url| url.host_str().map(|host| host.contains("linkedin")))
        .unwrap_or(false)
}

/// The line carrying the mailto link, or else the first `|`-separated line
/// in the header block above the first level-2 heading.
fn contact_line<'a>(lines: &[&'a str]) -> Option<&'a str> {
    if let Some(line) = lines.iter().copied().find(|line| line.contains("mailto:")) {
        return Some(line);
    }
    lines
        .iter()
        .skip(2)
        .take_while(|line| !matches!(heading_level(line), Some(level) if level <= 2))
        .find(|line| line.contains('|'))
        .copied()
}

fn plain_contact_tokens(line: &str) -> (Option<String>, Option<String>) {
    let mut phone = None;
    let mut location = None;
    for token in line.split('|').map(str::trim) {
        if token.is_empty() || token.contains("](") {
            continue;
        }
        let token = strip_emphasis(token);
        if PHONE.is_match(&token) && token.chars().filter(char::is_ascii_digit).count() >= 7 {
            if phone.is_none() {
                phone = Some(tel_url(&token));
            }
        } else if location.is_none() && !token.is_empty() {
            location = Some(token);
        }
    }
    (phone, location)
}

fn tel_url(phone: &str) -> String {
    let mut out = String::from("tel:");
    if phone.starts_with('+') {
        out.push('+');
    }
    out.extend(phone.chars().filter(char::is_ascii_digit));
    out
}

/// Bio text from the summary section body, or a sentence built from the
/// header when the document has none.
pub(crate) fn parse_bio(section: Option<&[&str]>, name: &str, title: &str) -> String {
    let paragraphs = section.map(paragraphs).unwrap_or_default();
    if paragraphs.is_empty() {
        return format!("{name} is an experienced {title}.");
    }
    paragraphs.join("\n\n")
}

pub(crate) fn parse_headline(section: Option<&[&str]>, title: &str) -> String {
    let first = section
        .map(paragraphs)
        .and_then(|paragraphs| paragraphs.into_iter().next());
    let Some(first) = first else {
        return title.to_owned();
    };
    match first.find(". ") {
        Some(idx) => first[..=idx].to_owned(),
        None => first,
    }
}

fn paragraphs(lines: &[&str]) -> Vec<String> {
    let mut out = Vec::new();
    let mut current: Vec<&str> = Vec::new();
    for line in lines.iter().map(|line| line.trim()) {
        if line.is_empty() {
            if !current.is_empty() {
                out.push(strip_emphasis(&current.join(" ")));
                current.clear();
            }
            continue;
        }
        current.push(line);
    }
    if !current.is_empty() {
        out.push(strip_emphasis(&current.join(" ")));
    }
    out
}

pub(crate) fn parse_highlights(lines: &[&str]) -> Vec<Highlight> {
    lines
        .iter()
        .filter_map(|line| HIGHLIGHT_LINE.captures(line.trim()))
        .map(|caps| Highlight {
            value: caps[1].trim().to_owned(),
            label: strip_emphasis(&caps[2]),
        })
        .filter(|highlight| !highlight.value.is_empty() && !highlight.label.is_empty())
        .collect()
}
