use once_cell::sync::Lazy;
use regex::Regex;

use crate::content::{Course, Education};
use crate::resume::inline::strip_emphasis;

static INSTITUTION_LINE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^\*\*([^*]+)\*\*$").expect("institution regex"));
static DATE_LINE: Lazy<Regex> = Lazy::new(|| Regex::new(r"^\*([^*]+)\*$").expect("date regex"));
static TRAILING_DATE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^(.*?)\s*\(([^()]+)\)$").expect("trailing date regex"));

/// Education blocks: a standalone bold institution line, then a degree line
/// and a `*Timeframe | Location*` line in either order.
pub(crate) fn parse_education(lines: &[&str]) -> Vec<Education> {
    let mut records: Vec<Education> = Vec::new();
    for line in lines.iter().map(|line| line.trim()) {
        if line.is_empty() {
            continue;
        }
        if let Some(caps) = INSTITUTION_LINE.captures(line) {
            records.push(Education {
                institution: caps[1].trim().to_owned(),
                degree: String::new(),
                timeframe: String::new(),
                location: String::new(),
            });
            continue;
        }
        let Some(current) = records.last_mut() else {
            continue;
        };
        if let Some(caps) = DATE_LINE.captures(line) {
            if current.timeframe.is_empty() && current.location.is_empty() {
                let mut parts = caps[1].split('|').map(str::trim);
                current.timeframe = parts.next().unwrap_or_default().to_owned();
                current.location = parts.next().unwrap_or_default().to_owned();
            }
        } else if current.degree.is_empty() {
            current.degree = strip_emphasis(line.trim_start_matches("- "));
        }
    }
    records
}

/// Course lines: `- Title | Institution | Date`, or
/// `- Title — Institution (Date)` with `—`, ` - ` or `, ` between title and institution.
pub(crate) fn parse_courses(lines: &[&str]) -> Vec<Course> {
    lines
        .iter()
        .filter_map(|line| line.trim().strip_prefix("- "))
        .map(strip_emphasis)
        .filter(|text| !text.is_empty())
        .map(|text| parse_course(&text))
        .collect()
}

fn parse_course(text: &str) -> Course {
    if text.contains('|') {
        let mut parts = text.split('|').map(str::trim);
        return Course {
            title: parts.next().unwrap_or_default().to_owned(),
            institution: parts.next().unwrap_or_default().to_owned(),
            date: parts.next().unwrap_or_default().to_owned(),
        };
    }

    let (head, date) = match TRAILING_DATE.captures(text) {
        Some(caps) => (
            caps.get(1).map_or("", |m| m.as_str()).to_owned(),
            caps[2].trim().to_owned(),
        ),
        None => (text.to_owned(), String::new()),
    };

    let split = [" — ", " – ", " - ", ", "]
        .iter()
        .find_map(|sep| head.rsplit_once(sep));
    let (title, institution) = match split {
        Some((title, institution)) => (title.trim().to_owned(), institution.trim().to_owned()),
        None => (head.trim().to_owned(), String::new()),
    };
    Course {
        title,
        institution,
        date,
    }
}
