use crate::content::{
    Contact, Education, ExperienceEntry, ParsedContent, Profile, Project, SkillCategory,
};

/// Complete placeholder content served when the résumé document cannot be
/// read. Every section a page renders is non-empty.
pub fn fallback_content() -> ParsedContent {
    let skills: Vec<String> = ["Software Architecture", "Data Engineering", "Rust", "Python"]
        .into_iter()
        .map(str::to_owned)
        .collect();

    ParsedContent {
        profile: Profile {
            name: "Portfolio Owner".to_owned(),
            title: "Software Engineer".to_owned(),
            headline: "Software engineer building reliable systems.".to_owned(),
            bio: "Software engineer building reliable systems.\n\nThe full résumé is temporarily unavailable; this page shows a summary.".to_owned(),
            skills: skills.clone(),
            skill_categories: vec![SkillCategory {
                category: "Core".to_owned(),
                skills,
            }],
            highlights: Vec::new(),
            contacts: vec![Contact {
                label: "Email".to_owned(),
                url: "mailto:hello@example.com".to_owned(),
            }],
        },
        experience: vec![ExperienceEntry {
            employer: "Independent".to_owned(),
            title: "Software Engineer".to_owned(),
            timeframe: "Present".to_owned(),
            location: "Remote".to_owned(),
            summary: "Designing and shipping software end to end.".to_owned(),
            achievements: vec![
                "Designing and shipping software end to end.".to_owned(),
                "Building data pipelines and developer tooling.".to_owned(),
            ],
        }],
        education: vec![Education {
            institution: "University".to_owned(),
            degree: "B.Sc., Computer Science".to_owned(),
            timeframe: String::new(),
            location: String::new(),
        }],
        projects: vec![Project {
            title: "Portfolio".to_owned(),
            description: "This site, generated from a markdown résumé.".to_owned(),
            link: None,
            category: None,
            metrics: None,
            technologies: None,
        }],
        courses: Vec::new(),
        publications: Vec::new(),
    }
}
