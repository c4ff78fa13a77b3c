//! Sitemap configuration.
//!
//! A [`SitemapConfig`] maps route patterns to [`RouteEntry`] values. Patterns
//! containing `$` placeholders are dynamic and need a [`DynamicRoute`] that
//! enumerates the parameter bindings; everything else is a static route.
//!
//! Configurations are usually built in code, but a [`SitemapFile`] can also
//! be loaded from TOML, in which case dynamic routes list their bindings
//! inline under `params`.

use std::{fmt, future::Future, path::Path};

use futures::{FutureExt, future::BoxFuture};
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::{
    error::{CoreError, Result},
    types::{AlternateLink, ChangeFrequency, DateValue, SitemapImage, SitemapNews, SitemapVideo},
};

/// Parameter bindings for one expansion of a dynamic route.
pub type RouteParams = IndexMap<String, String>;

/// Error returned by caller-supplied producers.
pub type ProducerError = Box<dyn std::error::Error + Send + Sync>;

/// Result type returned by caller-supplied producers.
pub type ProducerResult<T> = std::result::Result<T, ProducerError>;

/// Enumerates the parameter bindings of a dynamic route.
pub type ParamsProducer =
    Box<dyn Fn() -> BoxFuture<'static, ProducerResult<Vec<RouteParams>>> + Send + Sync>;

/// Produces per-binding metadata of one kind for a dynamic route.
pub type MetadataProducer<T> =
    Box<dyn Fn(RouteContext) -> BoxFuture<'static, ProducerResult<Vec<T>>> + Send + Sync>;

/// Build [`RouteParams`] from name/value pairs, keeping their order.
pub fn params<I, K, V>(pairs: I) -> RouteParams
where
    I: IntoIterator<Item = (K, V)>,
    K: Into<String>,
    V: Into<String>,
{
    pairs
        .into_iter()
        .map(|(k, v)| (k.into(), v.into()))
        .collect()
}

/// What a metadata producer is told about the URL it is producing for.
#[derive(Debug, Clone, PartialEq)]
pub struct RouteContext {
    /// Resolved path, e.g. `/posts/42`.
    pub path: String,

    /// Binding the path was expanded from.
    pub params: RouteParams,
}

/// Site-wide defaults applied to every route.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Defaults {
    /// Base URL for the site (e.g., "https://example.com").
    pub base_url: String,

    #[serde(default)]
    pub change_frequency: Option<ChangeFrequency>,

    #[serde(default)]
    pub priority: Option<f64>,

    #[serde(default)]
    pub last_modified: Option<DateValue>,
}

impl Defaults {
    /// Create defaults with only the base URL set.
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            ..Self::default()
        }
    }
}

/// Per-route settings shared by static and dynamic routes.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EntryOptions {
    pub change_frequency: Option<ChangeFrequency>,

    /// Priority hint, conventionally 0.0 to 1.0. Not validated.
    pub priority: Option<f64>,

    pub last_modified: Option<DateValue>,
    pub alternates: Vec<AlternateLink>,
    pub images: Vec<SitemapImage>,
    pub videos: Vec<SitemapVideo>,
    pub news: Vec<SitemapNews>,
}

impl EntryOptions {
    #[must_use]
    pub fn with_change_frequency(mut self, change_frequency: ChangeFrequency) -> Self {
        self.change_frequency = Some(change_frequency);
        self
    }

    #[must_use]
    pub fn with_priority(mut self, priority: f64) -> Self {
        self.priority = Some(priority);
        self
    }

    #[must_use]
    pub fn with_last_modified(mut self, last_modified: impl Into<DateValue>) -> Self {
        self.last_modified = Some(last_modified.into());
        self
    }

    #[must_use]
    pub fn with_alternate(mut self, alternate: AlternateLink) -> Self {
        self.alternates.push(alternate);
        self
    }

    #[must_use]
    pub fn with_image(mut self, image: SitemapImage) -> Self {
        self.images.push(image);
        self
    }

    #[must_use]
    pub fn with_video(mut self, video: SitemapVideo) -> Self {
        self.videos.push(video);
        self
    }

    #[must_use]
    pub fn with_news(mut self, news: SitemapNews) -> Self {
        self.news.push(news);
        self
    }
}

/// A parameterized route.
///
/// Each binding returned by the params producer yields one sitemap entry.
/// Metadata comes from the matching dynamic producer when one is set, and
/// from the static vectors in `options` otherwise.
pub struct DynamicRoute {
    pub options: EntryOptions,
    pub provide_params: ParamsProducer,
    pub dynamic_alternates: Option<MetadataProducer<AlternateLink>>,
    pub dynamic_images: Option<MetadataProducer<SitemapImage>>,
    pub dynamic_videos: Option<MetadataProducer<SitemapVideo>>,
    pub dynamic_news: Option<MetadataProducer<SitemapNews>>,
}

fn metadata_producer<T, F, Fut>(producer: F) -> MetadataProducer<T>
where
    F: Fn(RouteContext) -> Fut + Send + Sync + 'static,
    Fut: Future<Output = ProducerResult<Vec<T>>> + Send + 'static,
{
    Box::new(move |ctx| producer(ctx).boxed())
}

impl DynamicRoute {
    /// Create a dynamic route from a params producer.
    pub fn new<F, Fut>(provide_params: F) -> Self
    where
        F: Fn() -> Fut + Send + Sync + 'static,
        Fut: Future<Output = ProducerResult<Vec<RouteParams>>> + Send + 'static,
    {
        Self {
            options: EntryOptions::default(),
            provide_params: Box::new(move || provide_params().boxed()),
            dynamic_alternates: None,
            dynamic_images: None,
            dynamic_videos: None,
            dynamic_news: None,
        }
    }

    /// Create a dynamic route over a fixed list of bindings.
    pub fn from_params(bindings: Vec<RouteParams>) -> Self {
        Self::new(move || {
            let bindings = bindings.clone();
            async move { Ok(bindings) }
        })
    }

    #[must_use]
    pub fn with_options(mut self, options: EntryOptions) -> Self {
        self.options = options;
        self
    }

    #[must_use]
    pub fn with_dynamic_alternates<F, Fut>(mut self, producer: F) -> Self
    where
        F: Fn(RouteContext) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = ProducerResult<Vec<AlternateLink>>> + Send + 'static,
    {
        self.dynamic_alternates = Some(metadata_producer(producer));
        self
    }

    #[must_use]
    pub fn with_dynamic_images<F, Fut>(mut self, producer: F) -> Self
    where
        F: Fn(RouteContext) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = ProducerResult<Vec<SitemapImage>>> + Send + 'static,
    {
        self.dynamic_images = Some(metadata_producer(producer));
        self
    }

    #[must_use]
    pub fn with_dynamic_videos<F, Fut>(mut self, producer: F) -> Self
    where
        F: Fn(RouteContext) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = ProducerResult<Vec<SitemapVideo>>> + Send + 'static,
    {
        self.dynamic_videos = Some(metadata_producer(producer));
        self
    }

    #[must_use]
    pub fn with_dynamic_news<F, Fut>(mut self, producer: F) -> Self
    where
        F: Fn(RouteContext) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = ProducerResult<Vec<SitemapNews>>> + Send + 'static,
    {
        self.dynamic_news = Some(metadata_producer(producer));
        self
    }
}

impl fmt::Debug for DynamicRoute {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DynamicRoute")
            .field("options", &self.options)
            .field("dynamic_alternates", &self.dynamic_alternates.is_some())
            .field("dynamic_images", &self.dynamic_images.is_some())
            .field("dynamic_videos", &self.dynamic_videos.is_some())
            .field("dynamic_news", &self.dynamic_news.is_some())
            .finish_non_exhaustive()
    }
}

/// Configuration of a single route pattern.
#[derive(Debug)]
pub enum RouteEntry {
    Static(EntryOptions),
    Dynamic(DynamicRoute),
}

impl RouteEntry {
    /// Settings shared by both variants.
    pub fn options(&self) -> &EntryOptions {
        match self {
            Self::Static(options) => options,
            Self::Dynamic(route) => &route.options,
        }
    }
}

impl Default for RouteEntry {
    fn default() -> Self {
        Self::Static(EntryOptions::default())
    }
}

impl From<EntryOptions> for RouteEntry {
    fn from(options: EntryOptions) -> Self {
        Self::Static(options)
    }
}

impl From<DynamicRoute> for RouteEntry {
    fn from(route: DynamicRoute) -> Self {
        Self::Dynamic(route)
    }
}

/// Full sitemap configuration.
#[derive(Debug, Default)]
pub struct SitemapConfig {
    pub defaults: Defaults,

    /// Routes in the order they appear in the sitemap.
    pub routes: IndexMap<String, RouteEntry>,
}

impl SitemapConfig {
    /// Create a configuration with no routes.
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            defaults: Defaults::new(base_url),
            routes: IndexMap::new(),
        }
    }

    #[must_use]
    pub fn with_defaults(mut self, defaults: Defaults) -> Self {
        self.defaults = defaults;
        self
    }

    /// Add (or replace) a route.
    #[must_use]
    pub fn route(mut self, pattern: impl Into<String>, entry: impl Into<RouteEntry>) -> Self {
        self.routes.insert(pattern.into(), entry.into());
        self
    }
}

/// A route as written in a TOML file.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RouteFile {
    #[serde(flatten)]
    pub options: EntryOptions,

    /// Bindings for a dynamic route.
    #[serde(default)]
    pub params: Option<Vec<RouteParams>>,
}

/// Sitemap configuration loaded from a TOML file.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SitemapFile {
    pub defaults: Defaults,

    #[serde(default)]
    pub routes: IndexMap<String, RouteFile>,
}

impl SitemapFile {
    /// Load configuration from a TOML file.
    pub fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Err(CoreError::config(format!(
                "Configuration file not found: {}",
                path.display()
            )));
        }

        let content = std::fs::read_to_string(path)?;
        let file: SitemapFile = toml::from_str(&content).map_err(|e| {
            CoreError::config_with_source(
                format!("Failed to parse config file: {}", path.display()),
                e,
            )
        })?;

        file.validate()?;
        Ok(file)
    }

    fn validate(&self) -> Result<()> {
        if self.defaults.base_url.is_empty() {
            return Err(CoreError::config("defaults.base_url cannot be empty"));
        }

        if self.defaults.base_url.ends_with('/') {
            tracing::warn!("defaults.base_url should not have a trailing slash");
        }

        Ok(())
    }

    /// Convert into a [`SitemapConfig`].
    ///
    /// Routes with `params` become dynamic routes over those bindings.
    pub fn into_config(self) -> SitemapConfig {
        let routes = self
            .routes
            .into_iter()
            .map(|(pattern, route)| {
                let entry = match route.params {
                    Some(bindings) => RouteEntry::Dynamic(
                        DynamicRoute::from_params(bindings).with_options(route.options),
                    ),
                    None => RouteEntry::Static(route.options),
                };
                (pattern, entry)
            })
            .collect();

        SitemapConfig {
            defaults: self.defaults,
            routes,
        }
    }
}
