#![forbid(unsafe_code)]

pub mod app;
pub mod cache;
pub mod cli;
pub mod content;
pub mod export;
pub mod fallback;
pub mod logging;
pub mod metadata;
pub mod parse;
pub mod resume;
