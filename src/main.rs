use std::process::ExitCode;

use anyhow::Context as _;
use clap::Parser as _;

fn main() -> ExitCode {
    if let Err(err) = try_main() {
        eprintln!("{err:#}");
        return ExitCode::FAILURE;
    }

    ExitCode::SUCCESS
}

fn try_main() -> anyhow::Result<()> {
    folio::logging::init().context("init logging")?;

    let cli = folio::cli::Cli::parse();
    tracing::debug!(?cli, "parsed cli");

    match cli.command {
        folio::cli::Command::Parse(args) => {
            folio::parse::run(args).context("parse")?;
        }
        folio::cli::Command::Export(args) => {
            folio::export::run(args).context("export")?;
        }
    }

    Ok(())
}
