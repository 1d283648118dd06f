//! HTTP surface for the portfolio site: serves the parsed résumé to page
//! renderers and the rendered markdown/HTML documents.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use axum::Router;
use axum::extract::State;
use axum::http::{HeaderValue, StatusCode, header};
use axum::response::{Html, IntoResponse, Response};
use axum::routing::get;
use tower_http::services::{ServeDir, ServeFile};
use tower_http::trace::TraceLayer;

use crate::cache::CachedParser;
use crate::content::ParsedContent;
use crate::export::{render_html, render_markdown};
use crate::fallback::fallback_content;

pub const DEFAULT_CACHE_CAPACITY: usize = 16;
const MAX_CACHE_CAPACITY: usize = 1024;

#[derive(Clone)]
pub struct AppState {
    resume_path: PathBuf,
    parser: Arc<CachedParser>,
}

impl AppState {
    pub fn new(resume_path: impl Into<PathBuf>, parser: Arc<CachedParser>) -> Self {
        Self {
            resume_path: resume_path.into(),
            parser,
        }
    }

    /// Reads the document on every call; unchanged text is answered from the cache.
    /// Parsing runs on the blocking pool since the cache lock is synchronous.
    pub async fn content(&self) -> Arc<ParsedContent> {
        match tokio::fs::read_to_string(&self.resume_path).await {
            Ok(text) => {
                let parser = Arc::clone(&self.parser);
                match tokio::task::spawn_blocking(move || parser.parse(&text)).await {
                    Ok(content) => content,
                    Err(err) => {
                        tracing::error!(?err, "resume parse task failed; serving fallback content");
                        Arc::new(fallback_content())
                    }
                }
            }
            Err(err) => {
                tracing::warn!(
                    path = %self.resume_path.display(),
                    ?err,
                    "resume unreadable; serving fallback content"
                );
                Arc::new(fallback_content())
            }
        }
    }
}

/// Reads `FOLIO_CACHE_CAPACITY`; unset or out-of-range values use the default.
pub fn cache_capacity_from_env() -> usize {
    std::env::var("FOLIO_CACHE_CAPACITY")
        .ok()
        .and_then(|v| v.trim().parse::<usize>().ok())
        .filter(|v| (1..=MAX_CACHE_CAPACITY).contains(v))
        .unwrap_or(DEFAULT_CACHE_CAPACITY)
}

pub fn router(state: AppState, web_dir: &Path) -> Router {
    let app = Router::new()
        .route("/healthz", get(|| async { "ok\n" }))
        .route("/api/content", get(content_json))
        .route("/resume.md", get(resume_md))
        .route("/resume.html", get(resume_html))
        .layer(TraceLayer::new_for_http())
        .with_state(state);

    let web_index = web_dir.join("index.html");
    if web_index.exists() {
        let static_files = ServeDir::new(web_dir).not_found_service(ServeFile::new(web_index));
        app.fallback_service(static_files)
    } else {
        app.fallback(|| async { (StatusCode::NOT_FOUND, "not found\n") })
    }
}

async fn content_json(State(state): State<AppState>) -> Response {
    let content = state.content().await;
    match serde_json::to_vec(content.as_ref()) {
        Ok(body) => with_content_type(body, "application/json"),
        Err(err) => {
            tracing::error!(?err, "serialize content json");
            StatusCode::INTERNAL_SERVER_ERROR.into_response()
        }
    }
}

async fn resume_md(State(state): State<AppState>) -> Response {
    let content = state.content().await;
    with_content_type(render_markdown(&content), "text/markdown; charset=utf-8")
}

async fn resume_html(State(state): State<AppState>) -> Html<String> {
    let content = state.content().await;
    Html(render_html(&content, &content.profile.name))
}

fn with_content_type(body: impl Into<axum::body::Body>, content_type: &'static str) -> Response {
    let mut resp = Response::new(body.into());
    resp.headers_mut()
        .insert(header::CONTENT_TYPE, HeaderValue::from_static(content_type));
    resp
}
