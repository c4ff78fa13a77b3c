//! Resolution of relative locations in per-URL metadata.

use routemap_core::{AlternateLink, SitemapImage, SitemapNews, SitemapVideo};

use crate::path::build_url;

/// Metadata whose location fields can be made absolute.
pub trait ResolveLocations {
    /// Rewrite every location field against `base_url`.
    fn resolve_locations(self, base_url: &str) -> Self;
}

fn resolve(loc: String, base_url: &str) -> String {
    if loc.is_empty() {
        loc
    } else {
        build_url(&loc, base_url)
    }
}

fn resolve_opt(loc: Option<String>, base_url: &str) -> Option<String> {
    loc.map(|loc| resolve(loc, base_url))
}

impl ResolveLocations for AlternateLink {
    fn resolve_locations(mut self, base_url: &str) -> Self {
        self.href = resolve(self.href, base_url);
        self
    }
}

impl ResolveLocations for SitemapImage {
    fn resolve_locations(mut self, base_url: &str) -> Self {
        self.loc = resolve(self.loc, base_url);
        self.license = resolve_opt(self.license, base_url);
        self
    }
}

impl ResolveLocations for SitemapVideo {
    fn resolve_locations(mut self, base_url: &str) -> Self {
        self.thumbnail_loc = resolve(self.thumbnail_loc, base_url);
        self.content_loc = resolve_opt(self.content_loc, base_url);
        self.player_loc = resolve_opt(self.player_loc, base_url);
        self.gallery_loc = resolve_opt(self.gallery_loc, base_url);
        self
    }
}

// News items carry no locations.
impl ResolveLocations for SitemapNews {
    fn resolve_locations(self, _base_url: &str) -> Self {
        self
    }
}

/// Resolve the locations of every item, keeping order.
pub fn process_media<T: ResolveLocations>(items: Vec<T>, base_url: &str) -> Vec<T> {
    items
        .into_iter()
        .map(|item| item.resolve_locations(base_url))
        .collect()
}
