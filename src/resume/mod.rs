//! Résumé markdown → [`ParsedContent`].
//!
//! The document contract: line 1 is `# Name`, line 2 is the title, and the
//! rest is a sequence of `## SECTION` blocks. Every extraction is independent
//! and degrades to an empty result when its section is missing or malformed;
//! parsing never fails.

mod education;
mod experience;
pub mod inline;
mod profile;
mod projects;
mod publications;
mod section;
mod skills;

use std::path::Path;

use crate::content::{ParsedContent, Profile};
use crate::fallback::fallback_content;
use crate::metadata::MetadataTable;

pub const DEFAULT_SKILL_LIMIT: usize = 15;
pub const DEFAULT_SUMMARY_LIMIT: usize = 150;

const SUMMARY_SECTIONS: &[&str] = &["SUMMARY", "ABOUT", "PROFESSIONAL SUMMARY"];

#[derive(Debug, Clone)]
pub struct ResumeParser {
    metadata: MetadataTable,
    skill_limit: usize,
    summary_limit: usize,
}

impl Default for ResumeParser {
    fn default() -> Self {
        Self {
            metadata: MetadataTable::default(),
            skill_limit: DEFAULT_SKILL_LIMIT,
            summary_limit: DEFAULT_SUMMARY_LIMIT,
        }
    }
}

impl ResumeParser {
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_metadata(mut self, metadata: MetadataTable) -> Self {
        self.metadata = metadata;
        self
    }

    /// Cap on the flattened `Profile::skills` list.
    #[must_use]
    pub fn with_skill_limit(mut self, limit: usize) -> Self {
        self.skill_limit = limit;
        self
    }

    /// Visible characters kept when an experience summary is derived from
    /// its first achievement.
    #[must_use]
    pub fn with_summary_limit(mut self, limit: usize) -> Self {
        self.summary_limit = limit;
        self
    }

    pub fn parse(&self, text: &str) -> ParsedContent {
        let lines: Vec<&str> = text.lines().collect();
        let body_of = |title: &str| section::section_lines(&lines, title);

        let (name, title) = profile::parse_header(&lines);
        let summary_section = section::first_section_lines(&lines, SUMMARY_SECTIONS);
        let skill_categories = body_of("SKILLS")
            .map(|body| skills::parse_skill_categories(&body))
            .unwrap_or_default();

        let profile = Profile {
            headline: profile::parse_headline(summary_section.as_deref(), &title),
            bio: profile::parse_bio(summary_section.as_deref(), &name, &title),
            skills: skills::flatten_skills(&skill_categories, self.skill_limit),
            skill_categories,
            highlights: body_of("HIGHLIGHTS")
                .map(|body| profile::parse_highlights(&body))
                .unwrap_or_default(),
            contacts: profile::parse_contacts(&lines),
            name,
            title,
        };

        let experience = body_of("WORK EXPERIENCE")
            .map(|body| experience::parse_experience(&body, self.summary_limit))
            .unwrap_or_default();
        let education = body_of("EDUCATION")
            .map(|body| education::parse_education(&body))
            .unwrap_or_default();
        let courses = body_of("COURSES")
            .map(|body| education::parse_courses(&body))
            .unwrap_or_default();
        let projects = body_of("PROJECTS")
            .map(|body| projects::parse_projects(&body))
            .unwrap_or_default()
            .into_iter()
            .map(|project| self.metadata.annotate_project(project))
            .collect::<Vec<_>>();
        let publications = body_of("PUBLICATIONS")
            .map(|body| publications::parse_publications(&body))
            .unwrap_or_default()
            .into_iter()
            .map(|publication| self.metadata.annotate_publication(publication))
            .collect::<Vec<_>>();

        tracing::debug!(
            name = %profile.name,
            experience = experience.len(),
            education = education.len(),
            projects = projects.len(),
            courses = courses.len(),
            publications = publications.len(),
            skills = profile.skills.len(),
            "parsed resume"
        );

        ParsedContent {
            profile,
            experience,
            education,
            projects,
            courses,
            publications,
        }
    }

    /// Reads and parses the document at `path`. A read failure is logged and
    /// answered with [`fallback_content`]; this never fails.
    pub fn load(&self, path: &Path) -> ParsedContent {
        match read_document(path) {
            Ok(text) => self.parse(&text),
            Err(err) => {
                tracing::warn!(
                    path = %path.display(),
                    ?err,
                    "resume unreadable; using fallback content"
                );
                fallback_content()
            }
        }
    }
}

pub(crate) fn read_document(path: &Path) -> anyhow::Result<String> {
    use anyhow::Context as _;
    std::fs::read_to_string(path).with_context(|| format!("read resume: {}", path.display()))
}

/// Parses with default limits and no metadata table.
pub fn parse_resume(text: &str) -> ParsedContent {
    ResumeParser::new().parse(text)
}

pub fn load_resume(path: &Path) -> ParsedContent {
    ResumeParser::new().load(path)
}
