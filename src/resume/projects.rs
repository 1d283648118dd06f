use once_cell::sync::Lazy;
use regex::Regex;

use crate::content::Project;

static PROJECT_TITLE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^\*\*\[([^\]]+)\]\(([^)]*)\)\*\*$").expect("project title regex"));

/// Projects are `**[Title](URL)**` followed by a `- description` line; blank
/// lines may sit between the two. Any other shape is skipped.
pub(crate) fn parse_projects(lines: &[&str]) -> Vec<Project> {
    let mut projects = Vec::new();
    let mut idx = 0;
    while idx < lines.len() {
        let Some(caps) = PROJECT_TITLE.captures(lines[idx].trim()) else {
            idx += 1;
            continue;
        };
        let title = caps[1].trim().to_owned();
        let link = Some(caps[2].trim())
            .filter(|href| !href.is_empty() && *href != "#")
            .map(str::to_owned);

        idx += 1;
        while idx < lines.len() && lines[idx].trim().is_empty() {
            idx += 1;
        }
        let description = lines
            .get(idx)
            .and_then(|line| line.trim().strip_prefix("- "))
            .map(|text| text.trim().to_owned());

        match description {
            Some(description) if !description.is_empty() => {
                projects.push(Project {
                    title,
                    description,
                    link,
                    category: None,
                    metrics: None,
                    technologies: None,
                });
                idx += 1;
            }
            _ => {
                tracing::debug!(%title, "project title without description line; skipping");
            }
        }
    }
    projects
}
