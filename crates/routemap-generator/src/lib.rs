//! routemap Generator Library
//!
//! Route expansion and sitemap XML generation for routemap.
//!
//! # Modules
//!
//! - [`path`] - Path normalization and URL joining
//! - [`template`] - `$param` route template expansion
//! - [`media`] - Absolute locations for image, video and alternate metadata
//! - [`date`] - ISO-8601 date formatting
//! - [`route`] - Per-route entry production
//! - [`xml`] - `<url>` element serialization
//! - [`sitemap`] - Document assembly and output

pub mod date;
pub mod media;
pub mod path;
pub mod route;
pub mod sitemap;
pub mod template;
pub mod xml;

pub use route::{SitemapEntry, process_route};
pub use sitemap::{
    Result, SitemapError, SitemapOutput, collect_entries, generate_sitemap, render_sitemap,
    write_sitemap,
};
pub use xml::{ElementWriter, QuickXmlWriter};
