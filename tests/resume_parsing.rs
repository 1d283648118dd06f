use std::path::Path;

use folio::fallback::fallback_content;
use folio::metadata::MetadataTable;
use folio::resume::{ResumeParser, load_resume, parse_resume};

fn fixture() -> String {
    std::fs::read_to_string(
        Path::new(env!("CARGO_MANIFEST_DIR")).join("tests/fixtures/resume.md"),
    )
    .expect("read fixture")
}

#[test]
fn fixture_profile() {
    let content = parse_resume(&fixture());
    let profile = &content.profile;
    assert_eq!(profile.name, "Jane Doe");
    assert_eq!(profile.title, "Senior Engineer");
    assert_eq!(profile.headline, "Jane builds data platforms.");
    assert!(profile.bio.starts_with("Jane builds data platforms. She has led"));

    let labels: Vec<&str> = profile.contacts.iter().map(|c| c.label.as_str()).collect();
    assert_eq!(labels, vec!["Email", "Phone", "LinkedIn", "Location"]);
    assert_eq!(
        profile.contact("email").map(|c| c.url.as_str()),
        Some("mailto:jane@example.com")
    );
    assert_eq!(
        profile.contact("Location").map(|c| c.url.as_str()),
        Some("Berlin, Germany")
    );

    assert_eq!(profile.highlights.len(), 2);
    assert_eq!(profile.highlights[0].value, "10+");
    assert_eq!(profile.highlights[0].label, "years building products");

    assert_eq!(
        profile.skills,
        vec!["Rust", "Python", "SQL", "Kubernetes (EKS, GKE)", "Terraform"]
    );
    assert_eq!(profile.skill_categories[1].category, "Infrastructure");
}

#[test]
fn fixture_experience_keeps_document_order_and_positions() {
    let content = parse_resume(&fixture());
    let entries = &content.experience;
    assert_eq!(entries.len(), 3);

    assert_eq!(entries[0].employer, "Acme Corp");
    assert_eq!(entries[0].title, "Staff Engineer");
    assert_eq!(
        entries[0].achievements[0],
        "Led the <strong>Batch Genealogy</strong> rewrite in <code>Rust</code> across four services"
    );
    assert_eq!(entries[0].summary, entries[0].achievements[0]);

    assert_eq!(entries[1].employer, "Acme Corp");
    assert_eq!(entries[1].title, "Senior Engineer");
    assert_eq!(entries[1].location, "Berlin");
    assert_eq!(entries[1].summary, "Owned the ingestion pipeline.");

    assert_eq!(entries[2].employer, "Globex");
    assert_eq!(entries[2].timeframe, "2014 – 2017");
    assert_eq!(entries[2].location, "");
    assert_eq!(entries[2].summary, "Engineer role at Globex.");
    assert!(entries[2].achievements.is_empty());
}

#[test]
fn fixture_projects_education_courses_publications() {
    let content = parse_resume(&fixture());

    assert_eq!(content.projects.len(), 2);
    assert_eq!(content.projects[0].title, "Pest Classification");
    assert_eq!(
        content.projects[0].link.as_deref(),
        Some("https://github.com/jane/pests")
    );
    assert_eq!(
        content.projects[0].description,
        "Few-shot pest detection for smallholder farms."
    );
    assert_eq!(content.projects[1].link, None);

    assert_eq!(content.education.len(), 1);
    assert_eq!(content.education[0].degree, "M.Sc. Computer Science");
    assert_eq!(content.education[0].location, "Munich");

    assert_eq!(content.courses.len(), 1);
    assert_eq!(content.courses[0].institution, "Coursera");

    assert_eq!(content.publications.len(), 1);
    let publication = &content.publications[0];
    assert_eq!(publication.title, "Federated Learning at the Edge");
    assert_eq!(publication.year, Some(2021));
    assert_eq!(publication.venue.as_deref(), Some("EdgeSys"));
    assert_eq!(publication.authors.as_deref(), Some("J. Doe, A. Smith"));
    assert_eq!(publication.link.as_deref(), Some("https://example.com/fl.pdf"));
}

#[test]
fn parsing_is_idempotent() {
    let text = fixture();
    assert_eq!(parse_resume(&text), parse_resume(&text));
}

#[test]
fn removing_publications_leaves_other_sections_untouched() {
    let text = fixture();
    let (before, _) = text.split_once("## PUBLICATIONS").expect("publications heading");

    let full = parse_resume(&text);
    let trimmed = parse_resume(before);
    assert!(trimmed.publications.is_empty());
    assert_eq!(full.profile, trimmed.profile);
    assert_eq!(full.experience, trimmed.experience);
    assert_eq!(full.projects, trimmed.projects);
}

#[test]
fn missing_projects_section_yields_empty_list() {
    let content = parse_resume("# A\nB\n\n## SKILLS\n\n**Core:** Rust\n");
    assert!(content.projects.is_empty());
    assert_eq!(content.profile.skills, vec!["Rust"]);
}

#[test]
fn long_first_achievement_is_truncated_for_summary() {
    let bullet = "x".repeat(200);
    let text = format!(
        "# A\nB\n\n## WORK EXPERIENCE\n\n**Co**\n_**Dev**_\n*2020 | Here*\n- {bullet}\n"
    );
    let content = parse_resume(&text);
    let summary = &content.experience[0].summary;
    assert_eq!(summary.chars().count(), 153);
    assert!(summary.ends_with("..."));
    assert_eq!(content.experience[0].achievements[0], bullet);
}

#[test]
fn metadata_table_annotates_projects_and_publications() {
    let table = MetadataTable::from_yaml_str(
        r#"
projects:
  - pattern: "pest classification"
    category: "Agricultural AI"
    technologies: ["PyTorch"]
publications:
  - pattern: "federated"
    category: "Privacy"
"#,
    )
    .expect("metadata table");
    let content = ResumeParser::new().with_metadata(table).parse(&fixture());

    assert_eq!(content.projects[0].category.as_deref(), Some("Agricultural AI"));
    assert_eq!(
        content.projects[0].technologies.as_deref(),
        Some(&["PyTorch".to_owned()][..])
    );
    assert_eq!(content.projects[0].metrics, None);
    assert_eq!(content.projects[1].category, None);
    assert_eq!(content.publications[0].category.as_deref(), Some("Privacy"));
}

#[test]
fn unreadable_path_loads_fallback() {
    let temp = tempfile::TempDir::new().expect("tempdir");
    let content = load_resume(&temp.path().join("nope.md"));
    assert_eq!(content, fallback_content());
}
