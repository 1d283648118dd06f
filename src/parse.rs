use std::io::Write as _;
use std::path::Path;

use anyhow::Context as _;

use crate::cli::{DataFormat, ParseArgs};
use crate::export::{build_parser, to_json, to_yaml, write_output};

pub fn run(args: ParseArgs) -> anyhow::Result<()> {
    if let Some(out) = &args.out
        && Path::new(out).exists()
        && !args.force
    {
        anyhow::bail!("parse output already exists: {out}");
    }

    let parser = build_parser(args.metadata.as_deref())?;
    let content = parser.load(Path::new(&args.input));
    tracing::info!(
        input = %args.input,
        experience = content.experience.len(),
        projects = content.projects.len(),
        "parsed resume"
    );

    let rendered = match args.format {
        DataFormat::Json => to_json(&content)?,
        DataFormat::Yaml => to_yaml(&content)?,
    };

    match &args.out {
        Some(out) => write_output(out, rendered.as_bytes(), args.force)?,
        None => {
            let mut stdout = std::io::stdout().lock();
            stdout
                .write_all(rendered.as_bytes())
                .context("write content to stdout")?;
            stdout.flush().context("flush stdout")?;
        }
    }

    Ok(())
}
