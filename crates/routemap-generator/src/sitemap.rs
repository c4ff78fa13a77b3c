//! Sitemap generation.
//!
//! Collects entries from every configured route, drops duplicate URLs and
//! renders the `urlset` document.

use std::{
    collections::HashSet,
    path::{Path, PathBuf},
};

use routemap_core::{ProducerError, SitemapConfig};
use thiserror::Error;
use tracing::{debug, info};

use crate::{
    route::{SitemapEntry, process_route},
    xml::{ElementWriter, QuickXmlWriter, write_url},
};

/// File name the sitemap is written to.
pub const SITEMAP_FILE: &str = "sitemap.xml";

/// Namespace declarations on the `urlset` root, in output order.
pub const URLSET_NAMESPACES: [(&str, &str); 5] = [
    ("xmlns", "http://www.sitemaps.org/schemas/sitemap/0.9"),
    ("xmlns:xhtml", "http://www.w3.org/1999/xhtml"),
    ("xmlns:image", "http://www.google.com/schemas/sitemap-image/1.1"),
    ("xmlns:video", "http://www.google.com/schemas/sitemap-video/1.1"),
    ("xmlns:news", "http://www.google.com/schemas/sitemap-news/0.9"),
];

/// Sitemap generation errors.
#[derive(Debug, Error)]
pub enum SitemapError {
    /// A caller-supplied producer failed.
    #[error("producer failed for route {route}: {source}")]
    Producer {
        route: String,
        #[source]
        source: ProducerError,
    },

    /// XML encoding error.
    #[error("XML encoding error: {0}")]
    Xml(#[from] quick_xml::Error),

    /// Rendered document is not valid UTF-8.
    #[error("sitemap is not valid UTF-8: {0}")]
    Encoding(#[from] std::string::FromUtf8Error),

    /// IO error.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl SitemapError {
    /// Create a producer error for a route.
    pub fn producer(route: impl Into<String>, source: ProducerError) -> Self {
        Self::Producer {
            route: route.into(),
            source,
        }
    }
}

/// Result type for sitemap operations.
pub type Result<T> = std::result::Result<T, SitemapError>;

/// Where a sitemap was written and how many URLs it holds.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SitemapOutput {
    pub path: PathBuf,
    pub urls: usize,
}

/// Collect the entries of every route, in route order, without duplicates.
///
/// The first entry for a URL wins.
pub async fn collect_entries(config: &SitemapConfig) -> Result<Vec<SitemapEntry>> {
    let base_url = config
        .defaults
        .base_url
        .strip_suffix('/')
        .unwrap_or(&config.defaults.base_url);

    let mut entries = Vec::new();
    for (route, entry) in &config.routes {
        let route_entries = process_route(route, Some(entry), &config.defaults, base_url).await?;
        debug!(route = %route, count = route_entries.len(), "processed route");
        entries.extend(route_entries);
    }

    let total = entries.len();
    let mut seen = HashSet::new();
    entries.retain(|entry| seen.insert(entry.url.clone()));
    debug!(total, unique = entries.len(), "collected sitemap entries");

    Ok(entries)
}

/// Render prepared entries as a sitemap document.
pub fn render_sitemap(entries: &[SitemapEntry]) -> Result<String> {
    let mut writer = QuickXmlWriter::new()?;
    write_urlset(&mut writer, entries)?;
    writer.into_string()
}

/// Write the `urlset` element and its entries to any element writer.
pub fn write_urlset<W: ElementWriter + ?Sized>(
    writer: &mut W,
    entries: &[SitemapEntry],
) -> Result<()> {
    writer.start("urlset", &URLSET_NAMESPACES)?;
    for entry in entries {
        write_url(writer, entry)?;
    }
    writer.end("urlset")
}

/// Generate the sitemap XML for a configuration.
///
/// Any producer failure aborts generation.
pub async fn generate_sitemap(config: &SitemapConfig) -> Result<String> {
    let entries = collect_entries(config).await?;
    render_sitemap(&entries)
}

/// Generate the sitemap and write it to `<output_dir>/sitemap.xml`.
///
/// The output directory is created when missing.
pub async fn write_sitemap(config: &SitemapConfig, output_dir: &Path) -> Result<SitemapOutput> {
    let entries = collect_entries(config).await?;
    let xml = render_sitemap(&entries)?;

    tokio::fs::create_dir_all(output_dir).await?;
    let path = output_dir.join(SITEMAP_FILE);
    tokio::fs::write(&path, xml).await?;

    info!(path = %path.display(), urls = entries.len(), "sitemap written");

    Ok(SitemapOutput {
        path,
        urls: entries.len(),
    })
}
