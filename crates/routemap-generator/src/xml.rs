//! XML serialization of sitemap entries.
//!
//! Entries are written through [`ElementWriter`], so the element-tree backend
//! can be swapped. [`QuickXmlWriter`] is the default backend.

use std::io::Cursor;

use quick_xml::{
    Writer,
    escape::partial_escape,
    events::{BytesDecl, BytesEnd, BytesStart, BytesText, Event},
};
use routemap_core::{AlternateLink, DateValue, SitemapImage, SitemapNews, SitemapVideo};

use crate::{
    date::format_date,
    route::SitemapEntry,
    sitemap::{Result, SitemapError},
};

/// Element attributes, in output order.
pub type Attrs<'a> = [(&'a str, &'a str)];

/// Sink for an XML element tree.
pub trait ElementWriter {
    /// Open an element.
    fn start(&mut self, name: &str, attrs: &Attrs<'_>) -> Result<()>;

    /// Close the most recently opened element.
    fn end(&mut self, name: &str) -> Result<()>;

    /// Write an element without children.
    fn empty(&mut self, name: &str, attrs: &Attrs<'_>) -> Result<()>;

    /// Write an element whose only child is text.
    fn text_element(&mut self, name: &str, attrs: &Attrs<'_>, text: &str) -> Result<()> {
        self.start(name, attrs)?;
        self.text(text)?;
        self.end(name)
    }

    /// Write character data, escaping `&`, `<` and `>`.
    fn text(&mut self, text: &str) -> Result<()>;
}

/// [`ElementWriter`] backed by `quick_xml`, indenting by two spaces.
pub struct QuickXmlWriter {
    writer: Writer<Cursor<Vec<u8>>>,
}

impl QuickXmlWriter {
    /// Create a writer and emit the XML declaration.
    pub fn new() -> Result<Self> {
        let mut writer = Writer::new_with_indent(Cursor::new(Vec::new()), b' ', 2);
        writer.write_event(Event::Decl(BytesDecl::new("1.0", Some("UTF-8"), None)))?;
        Ok(Self { writer })
    }

    /// Finish writing and return the document.
    pub fn into_string(self) -> Result<String> {
        let bytes = self.writer.into_inner().into_inner();
        String::from_utf8(bytes).map_err(SitemapError::from)
    }
}

fn start_tag<'a>(name: &'a str, attrs: &Attrs<'_>) -> BytesStart<'a> {
    let mut tag = BytesStart::new(name);
    for &(key, value) in attrs {
        tag.push_attribute((key, value));
    }
    tag
}

impl ElementWriter for QuickXmlWriter {
    fn start(&mut self, name: &str, attrs: &Attrs<'_>) -> Result<()> {
        self.writer.write_event(Event::Start(start_tag(name, attrs)))?;
        Ok(())
    }

    fn end(&mut self, name: &str) -> Result<()> {
        self.writer.write_event(Event::End(BytesEnd::new(name)))?;
        Ok(())
    }

    fn empty(&mut self, name: &str, attrs: &Attrs<'_>) -> Result<()> {
        self.writer.write_event(Event::Empty(start_tag(name, attrs)))?;
        Ok(())
    }

    fn text(&mut self, text: &str) -> Result<()> {
        // Quotes stay literal in text nodes.
        let escaped = BytesText::from_escaped(partial_escape(text));
        self.writer.write_event(Event::Text(escaped))?;
        Ok(())
    }
}

fn non_empty(value: &Option<String>) -> Option<&str> {
    value.as_deref().filter(|v| !v.is_empty())
}

fn non_blank(value: &Option<DateValue>) -> Option<&DateValue> {
    value
        .as_ref()
        .filter(|date| !matches!(date, DateValue::Text(text) if text.is_empty()))
}

fn yes_no(flag: bool) -> &'static str {
    if flag { "yes" } else { "no" }
}

/// Write one `<url>` element for an entry.
pub fn write_url<W: ElementWriter + ?Sized>(writer: &mut W, entry: &SitemapEntry) -> Result<()> {
    writer.start("url", &[])?;
    writer.text_element("loc", &[], &entry.url)?;

    if !entry.last_modified.is_empty() {
        writer.text_element("lastmod", &[], &entry.last_modified)?;
    }
    if let Some(change_frequency) = entry.change_frequency {
        writer.text_element("changefreq", &[], change_frequency.as_str())?;
    }
    if let Some(priority) = entry.priority {
        writer.text_element("priority", &[], &priority.to_string())?;
    }

    for alternate in &entry.alternates {
        write_alternate(writer, alternate)?;
    }
    for image in &entry.images {
        write_image(writer, image)?;
    }
    for video in &entry.videos {
        write_video(writer, video)?;
    }
    for news in &entry.news {
        write_news(writer, news)?;
    }

    writer.end("url")
}

fn write_alternate<W: ElementWriter + ?Sized>(
    writer: &mut W,
    alternate: &AlternateLink,
) -> Result<()> {
    writer.empty(
        "xhtml:link",
        &[
            ("rel", "alternate"),
            ("hreflang", alternate.hreflang.as_str()),
            ("href", alternate.href.as_str()),
        ],
    )
}

fn write_image<W: ElementWriter + ?Sized>(writer: &mut W, image: &SitemapImage) -> Result<()> {
    writer.start("image:image", &[])?;
    writer.text_element("image:loc", &[], &image.loc)?;
    if let Some(caption) = non_empty(&image.caption) {
        writer.text_element("image:caption", &[], caption)?;
    }
    if let Some(geo_location) = non_empty(&image.geo_location) {
        writer.text_element("image:geo_location", &[], geo_location)?;
    }
    if let Some(title) = non_empty(&image.title) {
        writer.text_element("image:title", &[], title)?;
    }
    if let Some(license) = non_empty(&image.license) {
        writer.text_element("image:license", &[], license)?;
    }
    writer.end("image:image")
}

fn write_video<W: ElementWriter + ?Sized>(writer: &mut W, video: &SitemapVideo) -> Result<()> {
    writer.start("video:video", &[])?;
    writer.text_element("video:thumbnail_loc", &[], &video.thumbnail_loc)?;
    writer.text_element("video:title", &[], &video.title)?;
    writer.text_element("video:description", &[], &video.description)?;

    if let Some(content_loc) = non_empty(&video.content_loc) {
        writer.text_element("video:content_loc", &[], content_loc)?;
    }
    if let Some(player_loc) = non_empty(&video.player_loc) {
        writer.text_element("video:player_loc", &[], player_loc)?;
    }
    if let Some(duration) = video.duration {
        writer.text_element("video:duration", &[], &duration.to_string())?;
    }
    if let Some(expiration_date) = non_blank(&video.expiration_date) {
        let date = format_date(Some(expiration_date));
        writer.text_element("video:expiration_date", &[], &date)?;
    }
    if let Some(rating) = video.rating {
        writer.text_element("video:rating", &[], &rating.to_string())?;
    }
    if let Some(view_count) = video.view_count {
        writer.text_element("video:view_count", &[], &view_count.to_string())?;
    }
    if let Some(publication_date) = non_blank(&video.publication_date) {
        let date = format_date(Some(publication_date));
        writer.text_element("video:publication_date", &[], &date)?;
    }
    if let Some(family_friendly) = video.family_friendly {
        writer.text_element("video:family_friendly", &[], yes_no(family_friendly))?;
    }
    if let Some(restriction) = &video.restriction {
        writer.text_element(
            "video:restriction",
            &[("relationship", restriction.relationship.as_str())],
            &restriction.countries,
        )?;
    }
    if let Some(gallery_loc) = non_empty(&video.gallery_loc) {
        writer.text_element("video:gallery_loc", &[], gallery_loc)?;
    }
    if let Some(price) = &video.price {
        let mut attrs = vec![("currency", price.currency.as_str())];
        if let Some(kind) = non_empty(&price.kind) {
            attrs.push(("type", kind));
        }
        if let Some(resolution) = non_empty(&price.resolution) {
            attrs.push(("resolution", resolution));
        }
        writer.text_element("video:price", &attrs, &price.amount.to_string())?;
    }
    if let Some(requires_subscription) = video.requires_subscription {
        writer.text_element(
            "video:requires_subscription",
            &[],
            yes_no(requires_subscription),
        )?;
    }
    if let Some(uploader) = &video.uploader {
        let attrs: Vec<(&str, &str)> = non_empty(&uploader.info)
            .map(|info| ("info", info))
            .into_iter()
            .collect();
        writer.text_element("video:uploader", &attrs, &uploader.name)?;
    }
    if let Some(platform) = &video.platform {
        writer.text_element(
            "video:platform",
            &[("relationship", platform.relationship.as_str())],
            &platform.platforms,
        )?;
    }
    if let Some(live) = video.live {
        writer.text_element("video:live", &[], yes_no(live))?;
    }
    for tag in &video.tags {
        writer.text_element("video:tag", &[], tag)?;
    }

    writer.end("video:video")
}

fn write_news<W: ElementWriter + ?Sized>(writer: &mut W, news: &SitemapNews) -> Result<()> {
    writer.start("news:news", &[])?;

    writer.start("news:publication", &[])?;
    writer.text_element("news:name", &[], &news.publication_name)?;
    writer.text_element("news:language", &[], &news.publication_language)?;
    writer.end("news:publication")?;

    writer.text_element(
        "news:publication_date",
        &[],
        &format_date(Some(&news.publication_date)),
    )?;
    writer.text_element("news:title", &[], &news.title)?;

    if let Some(keywords) = non_empty(&news.keywords) {
        writer.text_element("news:keywords", &[], keywords)?;
    }
    if let Some(genres) = non_empty(&news.genres) {
        writer.text_element("news:genres", &[], genres)?;
    }
    if let Some(stock_tickers) = non_empty(&news.stock_tickers) {
        writer.text_element("news:stock_tickers", &[], stock_tickers)?;
    }

    writer.end("news:news")
}

#[cfg(test)]
mod tests {
    use routemap_core::{
        ChangeFrequency, DateValue, Relationship, VideoPlatform, VideoPrice, VideoRestriction,
        VideoUploader,
    };

    use super::*;

    fn entry(url: &str) -> SitemapEntry {
        SitemapEntry {
            url: url.to_string(),
            last_modified: "2025-01-01T00:00:00.000Z".to_string(),
            ..SitemapEntry::default()
        }
    }

    fn render(entry: &SitemapEntry) -> String {
        let mut writer = QuickXmlWriter::new().expect("writer");
        write_url(&mut writer, entry).expect("write url");
        writer.into_string().expect("utf-8")
    }

    /// Records calls so element order can be checked without a backend.
    #[derive(Default)]
    struct Recorder {
        events: Vec<String>,
    }

    impl ElementWriter for Recorder {
        fn start(&mut self, name: &str, _attrs: &Attrs<'_>) -> Result<()> {
            self.events.push(format!("+{name}"));
            Ok(())
        }

        fn end(&mut self, name: &str) -> Result<()> {
            self.events.push(format!("-{name}"));
            Ok(())
        }

        fn empty(&mut self, name: &str, _attrs: &Attrs<'_>) -> Result<()> {
            self.events.push(format!("={name}"));
            Ok(())
        }

        fn text(&mut self, _text: &str) -> Result<()> {
            Ok(())
        }
    }

    #[test]
    fn test_basic_fields() {
        let mut e = entry("https://example.com/about");
        e.change_frequency = Some(ChangeFrequency::Monthly);
        e.priority = Some(0.6);

        let xml = render(&e);

        assert!(xml.starts_with(r#"<?xml version="1.0" encoding="UTF-8"?>"#));
        assert!(xml.contains("<loc>https://example.com/about</loc>"));
        assert!(xml.contains("<lastmod>2025-01-01T00:00:00.000Z</lastmod>"));
        assert!(xml.contains("<changefreq>monthly</changefreq>"));
        assert!(xml.contains("<priority>0.6</priority>"));
    }

    #[test]
    fn test_priority_zero_is_written() {
        let mut e = entry("https://example.com/hidden");
        e.priority = Some(0.0);
        assert!(render(&e).contains("<priority>0</priority>"));
    }

    #[test]
    fn test_absent_fields_omitted() {
        let xml = render(&entry("https://example.com/"));
        assert!(!xml.contains("<changefreq>"));
        assert!(!xml.contains("<priority>"));
        assert!(!xml.contains("xhtml:link"));
        assert!(!xml.contains("image:image"));
    }

    #[test]
    fn test_text_is_escaped() {
        let xml = render(&entry("https://example.com/?a=1&b=<2>"));
        assert!(xml.contains("<loc>https://example.com/?a=1&amp;b=&lt;2&gt;</loc>"));
    }

    #[test]
    fn test_quotes_in_text_stay_literal() {
        let mut e = entry("https://example.com/p/it's");
        e.images = vec![SitemapImage {
            caption: Some(r#"say "hi""#.to_string()),
            ..SitemapImage::new("https://example.com/a.png")
        }];

        let xml = render(&e);

        assert!(xml.contains("<loc>https://example.com/p/it's</loc>"));
        assert!(xml.contains(r#"<image:caption>say "hi"</image:caption>"#));
        assert!(!xml.contains("&apos;"));
        assert!(!xml.contains("&quot;"));
    }

    #[test]
    fn test_alternate_link() {
        let mut e = entry("https://example.com/about");
        e.alternates = vec![AlternateLink::new("de", "https://example.com/de/about")];

        let xml = render(&e);

        assert!(xml.contains(
            r#"<xhtml:link rel="alternate" hreflang="de" href="https://example.com/de/about"/>"#
        ));
    }

    #[test]
    fn test_image_fields() {
        let mut e = entry("https://example.com/gallery");
        e.images = vec![SitemapImage {
            loc: "https://example.com/a.png".to_string(),
            caption: Some("Sunset".to_string()),
            geo_location: Some("Lisbon, Portugal".to_string()),
            title: Some("".to_string()),
            license: Some("https://example.com/license".to_string()),
        }];

        let xml = render(&e);

        assert!(xml.contains("<image:loc>https://example.com/a.png</image:loc>"));
        assert!(xml.contains("<image:caption>Sunset</image:caption>"));
        assert!(xml.contains("<image:geo_location>Lisbon, Portugal</image:geo_location>"));
        assert!(!xml.contains("<image:title>"));
        assert!(xml.contains("<image:license>https://example.com/license</image:license>"));
    }

    #[test]
    fn test_video_fields() {
        let mut e = entry("https://example.com/watch");
        e.videos = vec![SitemapVideo {
            content_loc: Some("https://example.com/v.mp4".to_string()),
            duration: Some(600),
            expiration_date: Some(DateValue::from("2030-01-01")),
            rating: Some(4.5),
            view_count: Some(1200),
            family_friendly: Some(true),
            restriction: Some(VideoRestriction {
                relationship: Relationship::Allow,
                countries: "IE GB".to_string(),
            }),
            price: Some(VideoPrice {
                amount: 2.5,
                currency: "EUR".to_string(),
                kind: Some("rent".to_string()),
                resolution: None,
            }),
            requires_subscription: Some(false),
            uploader: Some(VideoUploader {
                name: "Studio".to_string(),
                info: Some("https://example.com/studio".to_string()),
            }),
            platform: Some(VideoPlatform {
                relationship: Relationship::Deny,
                platforms: "tv".to_string(),
            }),
            live: Some(false),
            tags: vec!["cooking".to_string(), "grill".to_string()],
            ..SitemapVideo::new("https://example.com/t.jpg", "Grilling", "How to grill")
        }];

        let xml = render(&e);

        assert!(
            xml.contains("<video:thumbnail_loc>https://example.com/t.jpg</video:thumbnail_loc>")
        );
        assert!(xml.contains("<video:title>Grilling</video:title>"));
        assert!(xml.contains("<video:description>How to grill</video:description>"));
        assert!(xml.contains("<video:content_loc>https://example.com/v.mp4</video:content_loc>"));
        assert!(!xml.contains("<video:player_loc>"));
        assert!(xml.contains("<video:duration>600</video:duration>"));
        assert!(xml.contains("<video:expiration_date>2030-01-01</video:expiration_date>"));
        assert!(xml.contains("<video:rating>4.5</video:rating>"));
        assert!(xml.contains("<video:view_count>1200</video:view_count>"));
        assert!(xml.contains("<video:family_friendly>yes</video:family_friendly>"));
        assert!(
            xml.contains(r#"<video:restriction relationship="allow">IE GB</video:restriction>"#)
        );
        assert!(xml.contains(r#"<video:price currency="EUR" type="rent">2.5</video:price>"#));
        assert!(xml.contains("<video:requires_subscription>no</video:requires_subscription>"));
        assert!(xml.contains(
            r#"<video:uploader info="https://example.com/studio">Studio</video:uploader>"#
        ));
        assert!(xml.contains(r#"<video:platform relationship="deny">tv</video:platform>"#));
        assert!(xml.contains("<video:live>no</video:live>"));
        assert!(xml.contains("<video:tag>cooking</video:tag>"));
        let cooking = xml.find("<video:tag>cooking").expect("first tag");
        let grill = xml.find("<video:tag>grill").expect("second tag");
        assert!(cooking < grill);
    }

    #[test]
    fn test_uploader_without_info() {
        let mut e = entry("https://example.com/watch");
        e.videos = vec![SitemapVideo {
            uploader: Some(VideoUploader {
                name: "Anon".to_string(),
                info: None,
            }),
            ..SitemapVideo::new("t", "T", "D")
        }];

        assert!(render(&e).contains("<video:uploader>Anon</video:uploader>"));
    }

    #[test]
    fn test_empty_video_dates_omitted() {
        let mut e = entry("https://example.com/watch");
        e.videos = vec![SitemapVideo {
            expiration_date: Some(DateValue::from("")),
            publication_date: Some(DateValue::from("")),
            ..SitemapVideo::new("t", "T", "D")
        }];

        let xml = render(&e);

        assert!(!xml.contains("<video:expiration_date>"));
        assert!(!xml.contains("<video:publication_date>"));
    }

    #[test]
    fn test_news_fields() {
        let mut e = entry("https://example.com/news/1");
        e.news = vec![SitemapNews {
            keywords: Some("rust, release".to_string()),
            stock_tickers: Some("NASDAQ:RUST".to_string()),
            ..SitemapNews::new("The Daily", "en", "Rust ships", "2025-06-02T10:20:30Z")
        }];

        let xml = render(&e);

        assert!(xml.contains("<news:name>The Daily</news:name>"));
        assert!(xml.contains("<news:language>en</news:language>"));
        assert!(
            xml.contains("<news:publication_date>2025-06-02T10:20:30Z</news:publication_date>")
        );
        assert!(xml.contains("<news:title>Rust ships</news:title>"));
        assert!(xml.contains("<news:keywords>rust, release</news:keywords>"));
        assert!(!xml.contains("<news:genres>"));
        assert!(xml.contains("<news:stock_tickers>NASDAQ:RUST</news:stock_tickers>"));
    }

    #[test]
    fn test_element_order() {
        let mut e = entry("https://example.com/all");
        e.priority = Some(1.0);
        e.alternates = vec![AlternateLink::new("en", "https://example.com/all")];
        e.images = vec![SitemapImage::new("https://example.com/a.png")];
        e.videos = vec![SitemapVideo::new("t", "T", "D")];
        e.news = vec![SitemapNews::new("P", "en", "T", "2025-01-01")];

        let mut recorder = Recorder::default();
        write_url(&mut recorder, &e).expect("record");

        let order: Vec<&str> = recorder
            .events
            .iter()
            .filter(|ev| ev.starts_with('+') || ev.starts_with('='))
            .map(String::as_str)
            .collect();
        assert_eq!(
            order,
            vec![
                "+url",
                "+loc",
                "+lastmod",
                "+priority",
                "=xhtml:link",
                "+image:image",
                "+image:loc",
                "+video:video",
                "+video:thumbnail_loc",
                "+video:title",
                "+video:description",
                "+news:news",
                "+news:publication",
                "+news:name",
                "+news:language",
                "+news:publication_date",
                "+news:title",
            ]
        );
        assert_eq!(recorder.events.last().map(String::as_str), Some("-url"));
    }
}
