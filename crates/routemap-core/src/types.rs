//! Per-URL metadata records.
//!
//! These mirror the sitemap protocol and its Google image, video and news
//! extensions. Location fields may be relative; the generator resolves them
//! against the site base URL.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};

/// Change frequency hint for a sitemap entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ChangeFrequency {
    Always,
    Hourly,
    Daily,
    Weekly,
    Monthly,
    Yearly,
    Never,
}

impl ChangeFrequency {
    /// Protocol value of this frequency.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Always => "always",
            Self::Hourly => "hourly",
            Self::Daily => "daily",
            Self::Weekly => "weekly",
            Self::Monthly => "monthly",
            Self::Yearly => "yearly",
            Self::Never => "never",
        }
    }
}

/// A date that is either a concrete instant or an already formatted string.
///
/// Strings are emitted verbatim; they are never parsed or validated.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum DateValue {
    Instant(DateTime<Utc>),
    Text(String),
}

impl<'de> Deserialize<'de> for DateValue {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        String::deserialize(deserializer).map(Self::Text)
    }
}

impl From<DateTime<Utc>> for DateValue {
    fn from(value: DateTime<Utc>) -> Self {
        Self::Instant(value)
    }
}

impl From<String> for DateValue {
    fn from(value: String) -> Self {
        Self::Text(value)
    }
}

impl From<&str> for DateValue {
    fn from(value: &str) -> Self {
        Self::Text(value.to_string())
    }
}

/// Alternate language version of a page (`xhtml:link`).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AlternateLink {
    /// Language code (e.g., "en", "de-CH").
    pub hreflang: String,

    /// URL of this language version.
    pub href: String,
}

impl AlternateLink {
    /// Create an alternate link.
    pub fn new(hreflang: impl Into<String>, href: impl Into<String>) -> Self {
        Self {
            hreflang: hreflang.into(),
            href: href.into(),
        }
    }
}

/// Image attached to a page (`image:image`).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SitemapImage {
    /// Image location.
    pub loc: String,

    #[serde(default)]
    pub caption: Option<String>,

    #[serde(default)]
    pub geo_location: Option<String>,

    #[serde(default)]
    pub title: Option<String>,

    /// License URL.
    #[serde(default)]
    pub license: Option<String>,
}

impl SitemapImage {
    /// Create an image with only its location set.
    pub fn new(loc: impl Into<String>) -> Self {
        Self {
            loc: loc.into(),
            ..Self::default()
        }
    }
}

/// Allow/deny switch used by video restrictions and platforms.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Relationship {
    Allow,
    Deny,
}

impl Relationship {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Allow => "allow",
            Self::Deny => "deny",
        }
    }
}

/// Country restriction for a video.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VideoRestriction {
    pub relationship: Relationship,

    /// Space separated ISO 3166 country codes.
    pub countries: String,
}

/// Price of a video.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VideoPrice {
    pub amount: f64,

    /// ISO 4217 currency code.
    pub currency: String,

    /// `rent` or `own`.
    #[serde(default, rename = "type")]
    pub kind: Option<String>,

    /// `hd` or `sd`.
    #[serde(default)]
    pub resolution: Option<String>,
}

/// Uploader of a video.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VideoUploader {
    pub name: String,

    /// URL with more information about the uploader.
    #[serde(default)]
    pub info: Option<String>,
}

/// Platform restriction for a video.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VideoPlatform {
    pub relationship: Relationship,

    /// Space separated platform codes (`web`, `mobile`, `tv`).
    pub platforms: String,
}

/// Video attached to a page (`video:video`).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SitemapVideo {
    pub thumbnail_loc: String,
    pub title: String,
    pub description: String,

    #[serde(default)]
    pub content_loc: Option<String>,

    #[serde(default)]
    pub player_loc: Option<String>,

    /// Duration in seconds.
    #[serde(default)]
    pub duration: Option<u32>,

    #[serde(default)]
    pub expiration_date: Option<DateValue>,

    #[serde(default)]
    pub rating: Option<f64>,

    #[serde(default)]
    pub view_count: Option<u64>,

    #[serde(default)]
    pub publication_date: Option<DateValue>,

    #[serde(default)]
    pub family_friendly: Option<bool>,

    #[serde(default)]
    pub restriction: Option<VideoRestriction>,

    #[serde(default)]
    pub gallery_loc: Option<String>,

    #[serde(default)]
    pub price: Option<VideoPrice>,

    #[serde(default)]
    pub requires_subscription: Option<bool>,

    #[serde(default)]
    pub uploader: Option<VideoUploader>,

    #[serde(default)]
    pub platform: Option<VideoPlatform>,

    #[serde(default)]
    pub live: Option<bool>,

    #[serde(default)]
    pub tags: Vec<String>,
}

impl SitemapVideo {
    /// Create a video with the three required fields.
    pub fn new(
        thumbnail_loc: impl Into<String>,
        title: impl Into<String>,
        description: impl Into<String>,
    ) -> Self {
        Self {
            thumbnail_loc: thumbnail_loc.into(),
            title: title.into(),
            description: description.into(),
            ..Self::default()
        }
    }
}

/// News article metadata (`news:news`).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SitemapNews {
    pub publication_name: String,
    pub publication_language: String,
    pub title: String,
    pub publication_date: DateValue,

    /// Comma separated keywords.
    #[serde(default)]
    pub keywords: Option<String>,

    /// Comma separated genres.
    #[serde(default)]
    pub genres: Option<String>,

    /// Comma separated stock tickers.
    #[serde(default)]
    pub stock_tickers: Option<String>,
}

impl SitemapNews {
    /// Create a news item with the required fields.
    pub fn new(
        publication_name: impl Into<String>,
        publication_language: impl Into<String>,
        title: impl Into<String>,
        publication_date: impl Into<DateValue>,
    ) -> Self {
        Self {
            publication_name: publication_name.into(),
            publication_language: publication_language.into(),
            title: title.into(),
            publication_date: publication_date.into(),
            keywords: None,
            genres: None,
            stock_tickers: None,
        }
    }
}
