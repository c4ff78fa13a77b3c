//! Route processing.
//!
//! Turns one configured route into the sitemap entries it contributes.

use routemap_core::{
    AlternateLink, ChangeFrequency, DateValue, Defaults, DynamicRoute, EntryOptions,
    MetadataProducer, RouteContext, RouteEntry, SitemapImage, SitemapNews, SitemapVideo,
};
use tracing::{debug, warn};

use crate::{
    date::format_date,
    media::{ResolveLocations, process_media},
    path::{build_url, normalize_path},
    sitemap::{Result, SitemapError},
    template::{build_dynamic_url, is_dynamic},
};

/// A fully resolved `<url>` record.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SitemapEntry {
    /// Absolute URL.
    pub url: String,

    /// ISO-8601 last modification date.
    pub last_modified: String,

    /// Change frequency hint.
    pub change_frequency: Option<ChangeFrequency>,

    /// Priority relative to other URLs of the site.
    pub priority: Option<f64>,

    /// Alternate-language versions of the page.
    pub alternates: Vec<AlternateLink>,

    /// Images on the page.
    pub images: Vec<SitemapImage>,

    /// Videos on the page.
    pub videos: Vec<SitemapVideo>,

    /// News articles on the page.
    pub news: Vec<SitemapNews>,
}

/// Resolved metadata of one entry.
struct Metadata {
    alternates: Vec<AlternateLink>,
    images: Vec<SitemapImage>,
    videos: Vec<SitemapVideo>,
    news: Vec<SitemapNews>,
}

impl SitemapEntry {
    fn new(
        url: String,
        options: Option<&EntryOptions>,
        defaults: &Defaults,
        metadata: Metadata,
    ) -> Self {
        let last_modified = options
            .and_then(|o| o.last_modified.as_ref())
            .filter(|date| !is_blank(date))
            .or(defaults.last_modified.as_ref());

        Self {
            url,
            last_modified: format_date(last_modified),
            change_frequency: options
                .and_then(|o| o.change_frequency)
                .or(defaults.change_frequency),
            // Presence check: an explicit 0.0 must win over the default.
            priority: options.and_then(|o| o.priority).or(defaults.priority),
            alternates: metadata.alternates,
            images: metadata.images,
            videos: metadata.videos,
            news: metadata.news,
        }
    }
}

fn is_blank(date: &DateValue) -> bool {
    matches!(date, DateValue::Text(text) if text.is_empty())
}

/// Metadata of one kind for one binding: the dynamic producer when present,
/// the static list otherwise.
async fn resolve_kind<T>(
    route: &str,
    producer: Option<&MetadataProducer<T>>,
    fallback: &[T],
    ctx: &RouteContext,
    base_url: &str,
) -> Result<Vec<T>>
where
    T: ResolveLocations + Clone,
{
    let items = match producer {
        Some(producer) => producer(ctx.clone())
            .await
            .map_err(|source| SitemapError::producer(route, source))?,
        None => fallback.to_vec(),
    };
    Ok(process_media(items, base_url))
}

/// Process a single route into sitemap entries.
///
/// Static routes always yield one entry. Dynamic routes yield one entry per
/// parameter binding, or nothing when the route has no params producer.
pub async fn process_route(
    route: &str,
    entry: Option<&RouteEntry>,
    defaults: &Defaults,
    base_url: &str,
) -> Result<Vec<SitemapEntry>> {
    if !is_dynamic(route) {
        let options = entry.map(RouteEntry::options);
        return Ok(vec![static_entry(route, options, defaults, base_url)]);
    }

    match entry {
        Some(RouteEntry::Dynamic(dynamic)) => {
            process_dynamic(route, dynamic, defaults, base_url).await
        }
        _ => {
            debug!(route, "dynamic route without params producer, skipping");
            Ok(Vec::new())
        }
    }
}

fn static_entry(
    route: &str,
    options: Option<&EntryOptions>,
    defaults: &Defaults,
    base_url: &str,
) -> SitemapEntry {
    let url = build_url(&normalize_path(route), base_url);
    let metadata = match options {
        Some(options) => Metadata {
            alternates: process_media(options.alternates.clone(), base_url),
            images: process_media(options.images.clone(), base_url),
            videos: process_media(options.videos.clone(), base_url),
            news: options.news.clone(),
        },
        None => Metadata {
            alternates: Vec::new(),
            images: Vec::new(),
            videos: Vec::new(),
            news: Vec::new(),
        },
    };
    SitemapEntry::new(url, options, defaults, metadata)
}

async fn process_dynamic(
    route: &str,
    dynamic: &DynamicRoute,
    defaults: &Defaults,
    base_url: &str,
) -> Result<Vec<SitemapEntry>> {
    let bindings = (dynamic.provide_params)()
        .await
        .map_err(|source| SitemapError::producer(route, source))?;

    debug!(route, bindings = bindings.len(), "expanding dynamic route");

    let options = &dynamic.options;
    let mut entries = Vec::with_capacity(bindings.len());

    for params in bindings {
        let path = build_dynamic_url(route, &params);
        if is_dynamic(&path) {
            warn!(route, path = %path, "binding leaves placeholders unexpanded");
        }

        let url = format!("{base_url}{path}");
        let ctx = RouteContext { path, params };

        let metadata = Metadata {
            alternates: resolve_kind(
                route,
                dynamic.dynamic_alternates.as_ref(),
                &options.alternates,
                &ctx,
                base_url,
            )
            .await?,
            images: resolve_kind(
                route,
                dynamic.dynamic_images.as_ref(),
                &options.images,
                &ctx,
                base_url,
            )
            .await?,
            videos: resolve_kind(
                route,
                dynamic.dynamic_videos.as_ref(),
                &options.videos,
                &ctx,
                base_url,
            )
            .await?,
            news: resolve_kind(
                route,
                dynamic.dynamic_news.as_ref(),
                &options.news,
                &ctx,
                base_url,
            )
            .await?,
        };

        entries.push(SitemapEntry::new(url, Some(options), defaults, metadata));
    }

    Ok(entries)
}
