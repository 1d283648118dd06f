use once_cell::sync::Lazy;
use regex::Regex;

use crate::content::ExperienceEntry;
use crate::resume::inline::{summarize, to_markup};

static EMPLOYER_LINE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^\*\*([^*]+)\*\*$").expect("employer regex"));
static POSITION_LINE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^_\*\*([^*]+)\*\*_$").expect("position regex"));
static DATE_LINE: Lazy<Regex> = Lazy::new(|| Regex::new(r"^\*([^*]+)\*$").expect("date regex"));
static SUMMARY_LINE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)^\*\*summary:\*\*\s*(.*)$").expect("summary regex"));

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum State {
    SeekingEmployer,
    SeekingPosition,
    SeekingDate,
    InPosition,
    InBullet,
}

#[derive(Debug, PartialEq, Eq)]
enum Line<'a> {
    Blank,
    Summary(&'a str),
    Employer(&'a str),
    Position(&'a str),
    Date(&'a str),
    Bullet(&'a str),
    Text(&'a str),
}

fn classify(raw: &str) -> Line<'_> {
    let line = raw.trim();
    if line.is_empty() {
        return Line::Blank;
    }
    // Summary is checked before employer: `**Summary:**` alone is also a bold line.
    if let Some(caps) = SUMMARY_LINE.captures(line) {
        return Line::Summary(caps.get(1).map_or("", |m| m.as_str().trim()));
    }
    if let Some(caps) = EMPLOYER_LINE.captures(line) {
        return Line::Employer(caps.get(1).map_or("", |m| m.as_str().trim()));
    }
    if let Some(caps) = POSITION_LINE.captures(line) {
        return Line::Position(caps.get(1).map_or("", |m| m.as_str().trim()));
    }
    if let Some(caps) = DATE_LINE.captures(line) {
        return Line::Date(caps.get(1).map_or("", |m| m.as_str().trim()));
    }
    if let Some(text) = line.strip_prefix("- ") {
        return Line::Bullet(text.trim());
    }
    Line::Text(line)
}

#[derive(Debug, Default)]
struct PositionDraft {
    title: String,
    timeframe: String,
    location: String,
    summary: Option<String>,
    bullets: Vec<String>,
    open_bullet: Option<String>,
}

impl PositionDraft {
    fn new(title: &str) -> Self {
        Self {
            title: title.to_owned(),
            ..Self::default()
        }
    }

    fn close_bullet(&mut self) {
        if let Some(bullet) = self.open_bullet.take() {
            self.bullets.push(bullet);
        }
    }

    fn set_date_line(&mut self, date_line: &str) {
        let mut parts = date_line.split('|').map(str::trim);
        self.timeframe = parts.next().unwrap_or_default().to_owned();
        self.location = parts.next().unwrap_or_default().to_owned();
    }

    fn finish(mut self, employer: &str, summary_limit: usize) -> ExperienceEntry {
        self.close_bullet();
        let achievements: Vec<String> = self.bullets.iter().map(|b| to_markup(b)).collect();
        let summary = match (self.summary, achievements.first()) {
            (Some(explicit), _) => explicit,
            (None, Some(first)) => summarize(first, summary_limit),
            (None, None) => format!("{} role at {employer}.", self.title),
        };
        ExperienceEntry {
            employer: employer.to_owned(),
            title: self.title,
            timeframe: self.timeframe,
            location: self.location,
            summary,
            achievements,
        }
    }
}

/// Walks the WORK EXPERIENCE body line by line, emitting one entry per
/// position. Employers without positions emit nothing.
struct ExperienceScanner {
    summary_limit: usize,
    state: State,
    employer: Option<String>,
    position: Option<PositionDraft>,
    entries: Vec<ExperienceEntry>,
}

impl ExperienceScanner {
    fn new(summary_limit: usize) -> Self {
        Self {
            summary_limit,
            state: State::SeekingEmployer,
            employer: None,
            position: None,
            entries: Vec::new(),
        }
    }

    fn finish_position(&mut self) {
        let Some(position) = self.position.take() else {
            return;
        };
        let employer = self.employer.as_deref().unwrap_or_default();
        self.entries.push(position.finish(employer, self.summary_limit));
    }

    fn feed(&mut self, raw: &str) {
        let line = classify(raw);
        match (self.state, line) {
            (State::InBullet, Line::Blank) => {
                if let Some(position) = self.position.as_mut() {
                    position.close_bullet();
                }
                self.state = State::InPosition;
            }
            (_, Line::Blank) => {}
            (_, Line::Employer(name)) => {
                self.finish_position();
                self.employer = Some(name.to_owned());
                self.state = State::SeekingPosition;
            }
            (State::SeekingEmployer, _) => {}
            (_, Line::Position(title)) => {
                self.finish_position();
                self.position = Some(PositionDraft::new(title));
                self.state = State::SeekingDate;
            }
            (State::SeekingPosition, _) => {}
            (state, Line::Date(date_line)) => {
                if let Some(position) = self.position.as_mut() {
                    position.close_bullet();
                    if state == State::SeekingDate {
                        position.set_date_line(date_line);
                    }
                }
                self.state = State::InPosition;
            }
            (_, Line::Summary(text)) => {
                if let Some(position) = self.position.as_mut() {
                    position.close_bullet();
                    // A bare `**Summary:**` leaves the derived summary in place.
                    if !text.is_empty() {
                        position.summary = Some(to_markup(text));
                    }
                }
                self.state = State::InPosition;
            }
            (_, Line::Bullet(text)) => {
                if let Some(position) = self.position.as_mut() {
                    position.close_bullet();
                    position.open_bullet = Some(text.to_owned());
                }
                self.state = State::InBullet;
            }
            (State::InBullet, Line::Text(text)) => {
                if let Some(bullet) = self
                    .position
                    .as_mut()
                    .and_then(|position| position.open_bullet.as_mut())
                {
                    bullet.push(' ');
                    bullet.push_str(text);
                }
            }
            (_, Line::Text(_)) => {}
        }
    }

    fn finish(mut self) -> Vec<ExperienceEntry> {
        self.finish_position();
        self.entries
    }
}

pub(crate) fn parse_experience(lines: &[&str], summary_limit: usize) -> Vec<ExperienceEntry> {
    let mut scanner = ExperienceScanner::new(summary_limit);
    for line in lines {
        scanner.feed(line);
    }
    scanner.finish()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(text: &str) -> Vec<ExperienceEntry> {
        let lines: Vec<&str> = text.lines().collect();
        parse_experience(&lines, 150)
    }

    #[test]
    fn classify_distinguishes_markers() {
        assert_eq!(classify("**Acme Corp**"), Line::Employer("Acme Corp"));
        assert_eq!(classify("_**Staff Engineer**_"), Line::Position("Staff Engineer"));
        assert_eq!(classify("*Jan 2020 | Remote*"), Line::Date("Jan 2020 | Remote"));
        assert_eq!(classify("**Summary:** Led it"), Line::Summary("Led it"));
        assert_eq!(classify("- did **x**"), Line::Bullet("did **x**"));
        assert_eq!(classify("**Bold** then text"), Line::Text("**Bold** then text"));
        assert_eq!(classify("   "), Line::Blank);
    }

    #[test]
    fn two_positions_at_one_employer() {
        let entries = parse(
            "**Bristol Myers Squibb**\n\
             _**Senior Manager**_\n\
             *Jul 2025 – Present | New Brunswick, NJ*\n\
             - Delivering an **AI copilot**\n\
             \n\
             _**Manager, Data Architecture**_\n\
             *Jul 2023 – Jul 2025 | New Brunswick, NJ*\n\
             - Led the **Batch Genealogy** graph\n\
             - Launched cataloging\n",
        );
        assert_eq!(entries.len(), 2);
        assert!(entries.iter().all(|e| e.employer == "Bristol Myers Squibb"));
        assert_eq!(entries[0].title, "Senior Manager");
        assert_eq!(entries[1].title, "Manager, Data Architecture");
        assert_eq!(entries[1].timeframe, "Jul 2023 – Jul 2025");
        assert_eq!(
            entries[0].achievements,
            vec!["Delivering an <strong>AI copilot</strong>"]
        );
        assert_eq!(entries[1].achievements.len(), 2);
    }

    #[test]
    fn employer_without_positions_yields_nothing() {
        let entries = parse(
            "**Empty Co**\n\
             - stray bullet\n\
             **Real Co**\n\
             _**Engineer**_\n\
             *2019 | Remote*\n",
        );
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].employer, "Real Co");
    }

    #[test]
    fn position_without_bullets_synthesizes_summary() {
        let entries = parse("**Acme**\n_**Engineer**_\n*2019 – 2020*\n");
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].summary, "Engineer role at Acme.");
        assert!(entries[0].achievements.is_empty());
        assert_eq!(entries[0].timeframe, "2019 – 2020");
        assert_eq!(entries[0].location, "");
    }

    #[test]
    fn explicit_summary_overrides_first_bullet() {
        let entries = parse(
            "**Acme**\n_**Engineer**_\n*2019 | Remote*\n**Summary:** Built *everything*\n- First\n",
        );
        assert_eq!(entries[0].summary, "Built <em>everything</em>");
        assert_eq!(entries[0].achievements, vec!["First"]);
    }

    #[test]
    fn blank_summary_line_falls_back_to_first_bullet() {
        let entries = parse("**Acme**\n_**Engineer**_\n*2020 | Remote*\n**Summary:**\n- Shipped it\n");
        assert_eq!(entries[0].summary, "Shipped it");
        assert_eq!(entries[0].achievements, vec!["Shipped it"]);
    }

    #[test]
    fn blank_summary_line_without_bullets_synthesizes_summary() {
        let entries = parse("**Acme**\n_**Engineer**_\n*2020 | Remote*\n**Summary:**   \n");
        assert_eq!(entries[0].summary, "Engineer role at Acme.");
        assert!(entries[0].achievements.is_empty());
    }

    #[test]
    fn continuation_lines_fold_with_single_spaces() {
        let entries = parse(
            "**Acme**\n_**Engineer**_\n*2019 | Remote*\n\
             - Built a pipeline\n  spanning two\nlines\n- Second\n",
        );
        assert_eq!(
            entries[0].achievements,
            vec!["Built a pipeline spanning two lines", "Second"]
        );
    }

    #[test]
    fn markup_spanning_continuation_is_converted() {
        let entries = parse("**Acme**\n_**Engineer**_\n- Led **data\nmesh** rollout\n");
        assert_eq!(entries[0].achievements, vec!["Led <strong>data mesh</strong> rollout"]);
    }

    #[test]
    fn blank_line_ends_continuation() {
        let entries = parse("**Acme**\n_**Engineer**_\n- One\n\nstray paragraph\n");
        assert_eq!(entries[0].achievements, vec!["One"]);
    }

    #[test]
    fn italic_line_ends_continuation() {
        let entries = parse(
            "**Acme**\n_**Engineer**_\n*2020 | Remote*\n- Migrated services to\n*Kubernetes*\n- Next\n",
        );
        assert_eq!(entries[0].achievements, vec!["Migrated services to", "Next"]);
        assert_eq!(entries[0].timeframe, "2020");
    }

    #[test]
    fn missing_date_line_leaves_empty_fields() {
        let entries = parse("**Acme**\n_**Engineer**_\n- Shipped\n");
        assert_eq!(entries[0].timeframe, "");
        assert_eq!(entries[0].location, "");
        assert_eq!(entries[0].achievements, vec!["Shipped"]);
    }

    #[test]
    fn long_first_bullet_is_truncated_for_summary() {
        let bullet = "word ".repeat(40);
        let entries = parse(&format!("**Acme**\n_**Engineer**_\n- {bullet}\n"));
        let summary = &entries[0].summary;
        assert!(summary.ends_with("..."));
        assert!(summary.chars().count() <= 153);
    }
}
