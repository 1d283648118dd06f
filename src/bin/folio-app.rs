use std::net::SocketAddr;
use std::path::PathBuf;
use std::sync::Arc;

use clap::Parser;

use folio::app::{AppState, cache_capacity_from_env, router};
use folio::cache::{BoundedContentCache, CachedParser};
use folio::export::build_parser;

#[derive(Debug, Parser)]
#[command(author, version, about)]
struct AppArgs {
    #[arg(long, default_value = "127.0.0.1:8080")]
    addr: SocketAddr,

    /// Markdown résumé served by the content endpoints.
    #[arg(long, default_value = "resume.md")]
    resume: PathBuf,

    /// YAML table of project/publication annotations.
    #[arg(long)]
    metadata: Option<String>,

    /// Static web assets directory (serve if exists).
    #[arg(long, default_value = "web/dist")]
    web_dir: PathBuf,
}

#[tokio::main]
async fn main() -> std::process::ExitCode {
    if let Err(err) = try_main().await {
        eprintln!("{err:#}");
        return std::process::ExitCode::FAILURE;
    }

    std::process::ExitCode::SUCCESS
}

async fn try_main() -> anyhow::Result<()> {
    folio::logging::init()?;

    let args = AppArgs::parse();
    tracing::info!(?args, "starting folio-app");

    let capacity = cache_capacity_from_env();
    tracing::info!(capacity, "content cache");

    let parser = build_parser(args.metadata.as_deref())?;
    let parser = Arc::new(CachedParser::new(
        parser,
        Arc::new(BoundedContentCache::new(capacity)),
    ));
    let state = AppState::new(args.resume.clone(), parser);
    let app = router(state, &args.web_dir);

    let listener = tokio::net::TcpListener::bind(args.addr)
        .await
        .map_err(|err| anyhow::anyhow!("bind {}: {err}", args.addr))?;
    tracing::info!(addr = %args.addr, "listening");

    axum::serve(listener, app)
        .with_graceful_shutdown(async {
            let _ = tokio::signal::ctrl_c().await;
            tracing::info!("shutting down");
        })
        .await?;

    Ok(())
}
