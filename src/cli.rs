use clap::{Args, Parser, Subcommand, ValueEnum};

#[derive(Debug, Parser)]
#[command(author, version, about)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Parse a résumé document and print its content model.
    Parse(ParseArgs),
    /// Render the content model to a file (json, yaml, md, html, pdf).
    Export(ExportArgs),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum DataFormat {
    Json,
    Yaml,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ExportFormat {
    Json,
    Yaml,
    Md,
    Html,
    Pdf,
}

#[derive(Debug, Args)]
pub struct ParseArgs {
    /// Input path to the résumé markdown.
    #[arg(long)]
    pub input: String,

    /// Output file path (default: stdout).
    #[arg(long)]
    pub out: Option<String>,

    #[arg(long, value_enum, default_value_t = DataFormat::Json)]
    pub format: DataFormat,

    /// YAML metadata table for projects and publications.
    #[arg(long)]
    pub metadata: Option<String>,

    /// Overwrite `--out` if it exists.
    #[arg(long, default_value_t = false)]
    pub force: bool,
}

#[derive(Debug, Args)]
pub struct ExportArgs {
    /// Input path to the résumé markdown.
    #[arg(long)]
    pub input: String,

    /// Output file path.
    #[arg(long)]
    pub out: String,

    #[arg(long, value_enum, default_value_t = ExportFormat::Pdf)]
    pub format: ExportFormat,

    /// YAML metadata table for projects and publications.
    #[arg(long)]
    pub metadata: Option<String>,

    /// Document title (default: the profile name).
    #[arg(long)]
    pub title: Option<String>,

    /// Path to the pandoc executable (pdf only).
    #[arg(long, default_value = "pandoc")]
    pub pandoc: String,

    /// Pandoc PDF engine (default: try weasyprint, then tectonic).
    #[arg(long)]
    pub pdf_engine: Option<String>,

    /// Overwrite `--out` if it exists.
    #[arg(long, default_value_t = false)]
    pub force: bool,
}
