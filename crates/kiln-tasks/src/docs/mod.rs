//! Docs stages: content loading and Markdown-to-HTML transformation.
//!
//! These stages isolate failures per page: one page's fetch or read failure
//! never blocks the others. Failures are collected and surfaced as a single
//! [`TaskError::Aggregate`](crate::TaskError::Aggregate) once the stage has
//! processed every page it could. Store write failures stay fatal: they
//! indicate a broken output directory, not a broken page.

mod load_file;
mod load_github;
mod transform;

pub use load_file::LoadFromFile;
pub use load_github::LoadFromGithub;
pub use transform::TransformMarkdown;

/// Store key for a page's content blob: `{url}/index.{ext}`, root-relative.
///
/// Examples: `/` -> `index.md`, `/guide` -> `guide/index.md`.
fn content_key(page_url: &str, ext: &str) -> String {
    let trimmed = page_url.trim_matches('/');
    if trimmed.is_empty() {
        format!("index.{ext}")
    } else {
        format!("{trimmed}/index.{ext}")
    }
}
