use std::path::Path;

use anyhow::Context as _;
use serde::{Deserialize, Serialize};

use crate::content::{Project, Publication};

/// Declarative title-pattern → metadata rules for projects and publications.
///
/// Patterns match case-insensitively as substrings of the title. The first
/// matching rule wins, and only the fields a rule sets are filled in.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MetadataTable {
    #[serde(default)]
    pub projects: Vec<ProjectRule>,
    #[serde(default)]
    pub publications: Vec<PublicationRule>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProjectRule {
    pub pattern: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub metrics: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub technologies: Option<Vec<String>>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PublicationRule {
    pub pattern: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
}

impl MetadataTable {
    pub fn from_yaml_str(yaml: &str) -> anyhow::Result<Self> {
        let table: Self = serde_yaml::from_str(yaml).context("parse metadata yaml")?;
        if let Some(rule) = table.projects.iter().find(|r| r.pattern.trim().is_empty()) {
            anyhow::bail!("project metadata rule has an empty pattern: {rule:?}");
        }
        if let Some(rule) = table.publications.iter().find(|r| r.pattern.trim().is_empty()) {
            anyhow::bail!("publication metadata rule has an empty pattern: {rule:?}");
        }
        Ok(table)
    }

    pub fn from_path(path: &Path) -> anyhow::Result<Self> {
        let yaml = std::fs::read_to_string(path)
            .with_context(|| format!("read metadata table: {}", path.display()))?;
        Self::from_yaml_str(&yaml).with_context(|| format!("load metadata table: {}", path.display()))
    }

    pub fn is_empty(&self) -> bool {
        self.projects.is_empty() && self.publications.is_empty()
    }

    pub fn project_rule(&self, title: &str) -> Option<&ProjectRule> {
        self.projects
            .iter()
            .find(|rule| title_matches(title, &rule.pattern))
    }

    pub fn publication_rule(&self, title: &str) -> Option<&PublicationRule> {
        self.publications
            .iter()
            .find(|rule| title_matches(title, &rule.pattern))
    }

    pub(crate) fn annotate_project(&self, project: Project) -> Project {
        let Some(rule) = self.project_rule(&project.title) else {
            return project;
        };
        Project {
            category: rule.category.clone().or(project.category),
            metrics: rule.metrics.clone().or(project.metrics),
            technologies: rule.technologies.clone().or(project.technologies),
            ..project
        }
    }

    pub(crate) fn annotate_publication(&self, publication: Publication) -> Publication {
        let Some(rule) = self.publication_rule(&publication.title) else {
            return publication;
        };
        Publication {
            category: rule.category.clone().or(publication.category),
            ..publication
        }
    }
}

fn title_matches(title: &str, pattern: &str) -> bool {
    title.to_lowercase().contains(&pattern.trim().to_lowercase())
}
