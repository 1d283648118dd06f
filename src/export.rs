use std::ffi::OsString;
use std::fmt::Write as _;
use std::fs::OpenOptions;
use std::io;
use std::io::Write as _;
use std::path::Path;
use std::process::Command;

use anyhow::Context as _;
use pulldown_cmark::{Options, Parser};

use crate::cli::{ExportArgs, ExportFormat};
use crate::content::ParsedContent;
use crate::metadata::MetadataTable;
use crate::resume::ResumeParser;

pub fn run(args: ExportArgs) -> anyhow::Result<()> {
    if Path::new(&args.out).exists() && !args.force {
        anyhow::bail!("export output already exists: {}", args.out);
    }

    let parser = build_parser(args.metadata.as_deref())?;
    let content = parser.load(Path::new(&args.input));
    let title = args
        .title
        .clone()
        .unwrap_or_else(|| content.profile.name.clone());

    tracing::info!(format = ?args.format, out = %args.out, "export resume");
    match args.format {
        ExportFormat::Json => write_output(&args.out, to_json(&content)?.as_bytes(), args.force)?,
        ExportFormat::Yaml => write_output(&args.out, to_yaml(&content)?.as_bytes(), args.force)?,
        ExportFormat::Md => write_output(&args.out, render_markdown(&content).as_bytes(), args.force)?,
        ExportFormat::Html => {
            write_output(&args.out, render_html(&content, &title).as_bytes(), args.force)?
        }
        ExportFormat::Pdf => export_pdf_via_pandoc(&args, &content, &title)?,
    }

    Ok(())
}

pub fn build_parser(metadata: Option<&str>) -> anyhow::Result<ResumeParser> {
    let parser = ResumeParser::new();
    match metadata {
        Some(path) => Ok(parser.with_metadata(MetadataTable::from_path(Path::new(path))?)),
        None => Ok(parser),
    }
}

pub fn to_json(content: &ParsedContent) -> anyhow::Result<String> {
    let mut json = serde_json::to_string_pretty(content).context("serialize content json")?;
    json.push('\n');
    Ok(json)
}

pub fn to_yaml(content: &ParsedContent) -> anyhow::Result<String> {
    serde_yaml::to_string(content).context("serialize content yaml")
}

pub(crate) fn write_output(out: &str, bytes: &[u8], force: bool) -> anyhow::Result<()> {
    if let Some(parent) = Path::new(out).parent()
        && !parent.as_os_str().is_empty()
    {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("create output dir: {}", parent.display()))?;
    }

    let mut options = OpenOptions::new();
    options.write(true);
    if force {
        options.create(true).truncate(true);
    } else {
        options.create_new(true);
    }
    let mut file = options
        .open(out)
        .with_context(|| format!("open output: {out}"))?;
    file.write_all(bytes)
        .with_context(|| format!("write output: {out}"))?;
    file.flush()
        .with_context(|| format!("flush output: {out}"))?;
    Ok(())
}

/// Writes the content model back out in the résumé document layout.
/// Re-parsing the result yields the same experience entries.
pub fn render_markdown(content: &ParsedContent) -> String {
    let profile = &content.profile;
    let mut md = String::new();
    let _ = writeln!(md, "# {}", profile.name);
    let _ = writeln!(md, "**{}**", profile.title);

    let contacts: Vec<String> = profile
        .contacts
        .iter()
        .map(|contact| match contact.url.split_once(':') {
            Some(("mailto", address)) => format!("[{address}]({})", contact.url),
            Some(("tel", number)) => number.to_owned(),
            Some(("http" | "https", _)) => format!("[{}]({})", contact.label, contact.url),
            _ => contact.url.clone(),
        })
        .collect();
    if !contacts.is_empty() {
        let _ = writeln!(md, "\n{}", contacts.join(" | "));
    }

    let _ = writeln!(md, "\n## SUMMARY\n\n{}", profile.bio);

    if !profile.highlights.is_empty() {
        let _ = writeln!(md, "\n## HIGHLIGHTS\n");
        for highlight in &profile.highlights {
            let _ = writeln!(md, "- **{}** {}", highlight.value, highlight.label);
        }
    }

    if !content.experience.is_empty() {
        let _ = write!(md, "\n## WORK EXPERIENCE\n");
        let mut employer: Option<&str> = None;
        for entry in &content.experience {
            if employer != Some(entry.employer.as_str()) {
                let _ = writeln!(md, "\n**{}**", entry.employer);
                employer = Some(entry.employer.as_str());
            } else {
                md.push('\n');
            }
            let _ = writeln!(md, "_**{}**_", entry.title);
            match (entry.timeframe.is_empty(), entry.location.is_empty()) {
                (true, true) => {}
                (false, true) => {
                    let _ = writeln!(md, "*{}*", entry.timeframe);
                }
                _ => {
                    let _ = writeln!(md, "*{} | {}*", entry.timeframe, entry.location);
                }
            }
            let _ = writeln!(md, "**Summary:** {}", entry.summary);
            for achievement in &entry.achievements {
                let _ = writeln!(md, "- {achievement}");
            }
        }
    }

    if !content.education.is_empty() {
        let _ = write!(md, "\n## EDUCATION\n");
        for education in &content.education {
            let _ = writeln!(md, "\n**{}**", education.institution);
            if !education.degree.is_empty() {
                let _ = writeln!(md, "_{}_", education.degree);
            }
            if !education.timeframe.is_empty() || !education.location.is_empty() {
                let _ = writeln!(md, "*{} | {}*", education.timeframe, education.location);
            }
        }
    }

    if !profile.skill_categories.is_empty() {
        let _ = writeln!(md, "\n## SKILLS\n");
        for category in &profile.skill_categories {
            let _ = writeln!(md, "**{}:** {}", category.category, category.skills.join(", "));
        }
    }

    if !content.projects.is_empty() {
        let _ = write!(md, "\n## PROJECTS\n");
        for project in &content.projects {
            let link = project.link.as_deref().unwrap_or("#");
            let _ = writeln!(md, "\n**[{}]({link})**", project.title);
            let _ = writeln!(md, "- {}", project.description);
        }
    }

    if !content.publications.is_empty() {
        let _ = writeln!(md, "\n## PUBLICATIONS\n");
        for publication in &content.publications {
            let mut line = match &publication.link {
                Some(link) => format!("- **[{}]({link})**", publication.title),
                None => format!("- **{}**", publication.title),
            };
            if let Some(authors) = &publication.authors {
                let _ = write!(line, " - {authors}.");
            }
            if let Some(venue) = &publication.venue {
                let _ = write!(line, " *{venue}*");
            }
            if let Some(year) = publication.year {
                let _ = write!(line, " {year}");
            }
            let _ = writeln!(md, "{line}");
        }
    }

    if !content.courses.is_empty() {
        let _ = writeln!(md, "\n## COURSES\n");
        for course in &content.courses {
            let _ = writeln!(md, "- {} | {} | {}", course.title, course.institution, course.date);
        }
    }

    md
}

pub fn render_html(content: &ParsedContent, title: &str) -> String {
    let body = markdown_to_html_fragment(&render_markdown(content));
    let mut out = String::new();
    out.push_str("<!doctype html>\n");
    out.push_str("<html>\n<head>\n<meta charset=\"utf-8\" />\n");
    let _ = writeln!(out, "<title>{}</title>", escape_html(title));
    out.push_str("</head>\n<body>\n");
    out.push_str(&body);
    if !body.ends_with('\n') {
        out.push('\n');
    }
    out.push_str("</body>\n</html>\n");
    out
}

fn markdown_to_html_fragment(md: &str) -> String {
    let mut options = Options::empty();
    options.insert(Options::ENABLE_STRIKETHROUGH);
    options.insert(Options::ENABLE_TABLES);

    let parser = Parser::new_ext(md, options);
    let mut html = String::new();
    pulldown_cmark::html::push_html(&mut html, parser);
    html
}

fn escape_html(input: &str) -> String {
    input
        .replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
}

fn export_pdf_via_pandoc(
    args: &ExportArgs,
    content: &ParsedContent,
    title: &str,
) -> anyhow::Result<()> {
    let mut source = tempfile::Builder::new()
        .prefix("folio-")
        .suffix(".md")
        .tempfile()
        .context("create pandoc input file")?;
    source
        .write_all(render_markdown(content).as_bytes())
        .context("write pandoc input file")?;
    source.flush().context("flush pandoc input file")?;

    let engines = match args.pdf_engine.as_deref() {
        Some(engine) => vec![engine],
        None => vec!["weasyprint", "tectonic"],
    };

    let mut last_failure: Option<anyhow::Error> = None;
    for engine in engines {
        tracing::info!(
            format = "pdf",
            pdf_engine = engine,
            pandoc = %args.pandoc,
            out = %args.out,
            "export via pandoc"
        );

        let pandoc_args = build_pandoc_args(source.path(), &args.out, engine, title);
        let output = run_pandoc(&args.pandoc, &pandoc_args)?;
        if output.status.success() {
            return Ok(());
        }

        last_failure = Some(anyhow::anyhow!(
            "pandoc failed with pdf_engine={engine} ({}): {}",
            output.status,
            String::from_utf8_lossy(&output.stderr)
        ));
    }

    match last_failure {
        Some(err) => Err(err),
        None => anyhow::bail!("export pdf failed: no pdf engine candidates"),
    }
}

fn build_pandoc_args(input: &Path, out: &str, pdf_engine: &str, title: &str) -> Vec<OsString> {
    vec![
        input.as_os_str().to_owned(),
        OsString::from("-o"),
        OsString::from(out),
        OsString::from("--from"),
        OsString::from("gfm"),
        OsString::from("--standalone"),
        OsString::from("--pdf-engine"),
        OsString::from(pdf_engine),
        OsString::from("--metadata"),
        OsString::from(format!("title={title}")),
    ]
}

fn run_pandoc(pandoc: &str, pandoc_args: &[OsString]) -> anyhow::Result<std::process::Output> {
    match Command::new(pandoc).args(pandoc_args).output() {
        Ok(output) => Ok(output),
        Err(err) if err.kind() == io::ErrorKind::NotFound => {
            anyhow::bail!("pandoc not found: {pandoc}; install pandoc or pass `--pandoc <PATH>`")
        }
        Err(err) => Err(err).with_context(|| format!("run pandoc: {pandoc}")),
    }
}
