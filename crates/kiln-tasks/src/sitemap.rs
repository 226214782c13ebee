//! Sitemap emission.

use std::fmt::Write;

use kiln_model::Model;
use kiln_storage::ContentStore;

use crate::task::{Task, TaskError};

/// Output key of the sitemap artifact.
const SITEMAP_KEY: &str = "sitemap.xml";

/// Sitemap protocol namespace.
const SITEMAP_NS: &str = "http://www.sitemaps.org/schemas/sitemap/0.9";

/// Default change frequency for every page.
const DEFAULT_CHANGEFREQ: &str = "weekly";

/// Default priority for every page.
const DEFAULT_PRIORITY: &str = "0.5";

/// Serializes every page URL into `sitemap.xml`.
///
/// Entries come out in model order, `<loc>` is the configured host plus the
/// page URL, and `<lastmod>` is included for pages carrying a modification
/// date. Pure serialization; the model is not mutated.
pub struct CreateSitemap {
    store: ContentStore,
    host: String,
}

impl CreateSitemap {
    /// Create the stage. `host` prefixes every `<loc>` entry
    /// (e.g. `https://docs.example.com`).
    #[must_use]
    pub fn new(store: ContentStore, host: impl Into<String>) -> Self {
        Self {
            store,
            host: host.into(),
        }
    }
}

impl Task for CreateSitemap {
    fn name(&self) -> &'static str {
        "sitemap-xml"
    }

    fn execute(&self, model: &mut Model) -> Result<(), TaskError> {
        let host = self.host.trim_end_matches('/');

        let mut out = String::with_capacity(256 + model.len() * 128);
        out.push_str("<?xml version=\"1.0\" encoding=\"UTF-8\"?>\n");
        let _ = writeln!(out, "<urlset xmlns=\"{SITEMAP_NS}\">");

        for page in model.pages() {
            out.push_str("  <url>\n");
            let _ = writeln!(out, "    <loc>{}{}</loc>", host, escape_text(&page.url));
            if let Some(lastmod) = &page.last_modified {
                let _ = writeln!(out, "    <lastmod>{}</lastmod>", escape_text(lastmod));
            }
            let _ = writeln!(out, "    <changefreq>{DEFAULT_CHANGEFREQ}</changefreq>");
            let _ = writeln!(out, "    <priority>{DEFAULT_PRIORITY}</priority>");
            out.push_str("  </url>\n");
        }
        out.push_str("</urlset>\n");

        self.store.write(SITEMAP_KEY, out.as_bytes())?;
        tracing::info!(pages = model.len(), key = SITEMAP_KEY, "sitemap written");
        Ok(())
    }
}

/// Escape text content for XML.
fn escape_text(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            _ => out.push(c),
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use kiln_model::Page;
    use tempfile::TempDir;

    use super::*;

    fn build_sitemap(pages: Vec<Page>, host: &str) -> String {
        let tmp = TempDir::new().unwrap();
        let store = ContentStore::new(tmp.path().join("out"));

        let mut model = Model::new();
        model.set_pages(pages);
        CreateSitemap::new(store.clone(), host)
            .execute(&mut model)
            .unwrap();

        store.read_to_string(SITEMAP_KEY).unwrap()
    }

    #[test]
    fn test_one_loc_per_page_in_model_order() {
        let xml = build_sitemap(
            vec![Page::new("/", "Home"), Page::new("/a", "A")],
            "https://docs.example.com",
        );

        let first = xml.find("<loc>https://docs.example.com/</loc>").unwrap();
        let second = xml.find("<loc>https://docs.example.com/a</loc>").unwrap();
        assert!(first < second);
        assert_eq!(xml.matches("<url>").count(), 2);
    }

    #[test]
    fn test_host_trailing_slash_trimmed() {
        let xml = build_sitemap(vec![Page::new("/a", "A")], "https://docs.example.com/");
        assert!(xml.contains("<loc>https://docs.example.com/a</loc>"));
    }

    #[test]
    fn test_lastmod_included_when_present() {
        let mut page = Page::new("/a", "A");
        page.last_modified = Some("2024-11-02".to_owned());

        let xml = build_sitemap(vec![page], "https://h");
        assert!(xml.contains("<lastmod>2024-11-02</lastmod>"));
    }

    #[test]
    fn test_defaults_present() {
        let xml = build_sitemap(vec![Page::new("/", "Home")], "https://h");
        assert!(xml.contains("<changefreq>weekly</changefreq>"));
        assert!(xml.contains("<priority>0.5</priority>"));
    }

    #[test]
    fn test_urls_are_escaped() {
        let xml = build_sitemap(vec![Page::new("/a&b", "AB")], "https://h");
        assert!(xml.contains("<loc>https://h/a&amp;b</loc>"));
    }

    #[test]
    fn test_urlset_namespace() {
        let xml = build_sitemap(vec![], "https://h");
        assert!(xml.starts_with("<?xml version=\"1.0\" encoding=\"UTF-8\"?>"));
        assert!(xml.contains(r#"<urlset xmlns="http://www.sitemaps.org/schemas/sitemap/0.9">"#));
    }
}
