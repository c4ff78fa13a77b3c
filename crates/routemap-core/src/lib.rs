//! routemap Core Library
//!
//! Configuration, metadata types, and error handling for the routemap sitemap generator.

pub mod config;
pub mod error;
pub mod types;

pub use config::{
    Defaults, DynamicRoute, EntryOptions, MetadataProducer, ParamsProducer, ProducerError,
    ProducerResult, RouteContext, RouteEntry, RouteFile, RouteParams, SitemapConfig, SitemapFile,
    params,
};
pub use error::{CoreError, Result};
pub use types::{
    AlternateLink, ChangeFrequency, DateValue, Relationship, SitemapImage, SitemapNews,
    SitemapVideo, VideoPlatform, VideoPrice, VideoRestriction, VideoUploader,
};
