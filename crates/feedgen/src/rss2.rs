//! RSS 2.0 renderer.
//!
//! Builds an `rss` root with a single `channel`, following
//! <https://validator.w3.org/feed/docs/rss2.html>. Namespace declarations are
//! added to the root only when an element that needs them was emitted.

use chrono::Utc;
use feedgen_xml::{Attributes, BranchNode, Document, Element, normalize_all, sanitize};

use crate::consts::{
    ATOM_NS, CONTENT_NS, DC_NS, GENERATOR, GOOGLEPLAY_NS, ITUNES_NS, RSS2_DOCS_URL,
};
use crate::error::FeedError;
use crate::feed::Feed;
use crate::item::{Item, Media};
use crate::media::{MediaKind, derive_mime_type, select_media};
use crate::options::FeedOptions;
use crate::util::{format_duration, http_date, present};

/// Namespaces whose features fired during a render.
#[derive(Debug, Default)]
struct Namespaces {
    atom: bool,
    content: bool,
}

/// Render a feed as RSS 2.0.
///
/// # Errors
///
/// Returns [`FeedError::InvalidUrl`] if an enclosure URL cannot be parsed.
pub fn rss2(feed: &Feed) -> Result<String, FeedError> {
    let options = feed.options();
    let mut namespaces = Namespaces::default();
    let mut channel = vec![Element::text_element("title", options.title.as_str())];

    if let Some(link) = present(options.link.as_ref()) {
        channel.push(Element::text_element("link", sanitize(link)));
    }
    if let Some(description) = present(options.description.as_ref()) {
        channel.push(Element::text_element("description", description));
    }
    let updated = options.updated.unwrap_or_else(Utc::now);
    channel.push(Element::text_element("lastBuildDate", http_date(&updated)));
    channel.push(Element::text_element(
        "docs",
        present(options.docs.as_ref()).unwrap_or(RSS2_DOCS_URL),
    ));
    channel.push(Element::text_element(
        "generator",
        present(options.generator.as_ref()).unwrap_or(GENERATOR),
    ));

    if let Some(language) = present(options.language.as_ref()) {
        channel.push(Element::text_element("language", language));
    }
    if let Some(ttl) = options.ttl.filter(|ttl| *ttl > 0) {
        channel.push(Element::text_element("ttl", ttl));
    }

    if let Some(image) = present(options.image.as_ref()) {
        channel.push(channel_image(options, image));
    }

    if let Some(copyright) = present(options.copyright.as_ref()) {
        channel.push(Element::text_element("copyright", copyright));
    }

    for category in feed.categories() {
        channel.push(Element::text_element("category", category.as_str()));
    }

    if let Some(link) = self_or_hub_link(options) {
        namespaces.atom = true;
        channel.push(link);
    }

    for item in feed.items() {
        channel.push(render_item(item, options, &mut namespaces)?);
    }

    channel.extend(normalize_all(feed.extensions()));

    if options.podcast {
        push_podcast_elements(&mut channel, options);
    }

    let mut attributes = Attributes::new().with("version", "2.0");
    if namespaces.content {
        attributes.insert("xmlns:dc", DC_NS);
        attributes.insert("xmlns:content", CONTENT_NS);
    }
    if namespaces.atom {
        attributes.insert("xmlns:atom", ATOM_NS);
    }
    if options.podcast {
        attributes.insert("xmlns:googleplay", GOOGLEPLAY_NS);
        attributes.insert("xmlns:itunes", ITUNES_NS);
    }

    let root = BranchNode::with_attributes_and_elements(
        "rss",
        attributes,
        vec![Element::branch("channel", channel)],
    );
    Ok(Document::new(root).print()?)
}

/// Channel `image`. The `url` child is written as given, unlike `link`.
fn channel_image(options: &FeedOptions, image: &str) -> Element {
    let mut children = vec![
        Element::text_element("title", options.title.as_str()),
        Element::text_element("url", image),
    ];
    if let Some(link) = present(options.link.as_ref()) {
        children.push(Element::text_element("link", sanitize(link)));
    }
    Element::branch("image", children)
}

/// `atom:link` for the hub, or failing that for the feed's own URL.
fn self_or_hub_link(options: &FeedOptions) -> Option<Element> {
    if let Some(hub) = present(options.hub.as_ref()) {
        let attributes = Attributes::new()
            .with("href", sanitize(hub))
            .with("rel", "hub");
        Some(Element::empty("atom:link", attributes))
    } else if let Some(feed_url) =
        present(options.feed.as_ref()).or_else(|| present(options.feed_links.rss.as_ref()))
    {
        let attributes = Attributes::new()
            .with("href", sanitize(feed_url))
            .with("rel", "self")
            .with("type", "application/rss+xml");
        Some(Element::empty("atom:link", attributes))
    } else {
        None
    }
}

fn render_item(
    item: &Item,
    options: &FeedOptions,
    namespaces: &mut Namespaces,
) -> Result<Element, FeedError> {
    let mut children = Vec::new();

    if let Some(title) = present(item.title.as_ref()) {
        children.push(Element::cdata_element("title", title));
    }
    let link = present(item.link.as_ref());
    if let Some(link) = link {
        children.push(Element::text_element("link", sanitize(link)));
    }

    if let Some(guid) = present(item.guid.as_ref()).or_else(|| present(item.id.as_ref())) {
        children.push(guid_element(guid, false));
    } else if let Some(link) = link {
        children.push(guid_element(&sanitize(link), true));
    }

    if let Some(date) = item.published.as_ref().or(item.date.as_ref()) {
        children.push(Element::text_element("pubDate", http_date(date)));
    }

    if let Some(description) = present(item.description.as_ref()) {
        children.push(Element::cdata_element("description", description));
    }
    if let Some(content) = present(item.content.as_ref()) {
        namespaces.content = true;
        children.push(Element::cdata_element("content:encoded", content));
    }

    for author in &item.authors {
        if let (Some(email), Some(name)) =
            (present(author.email.as_ref()), present(author.name.as_ref()))
        {
            children.push(Element::text_element("author", format!("{email} ({name})")));
        }
    }

    for category in &item.categories {
        if let Some(name) = present(category.name.as_ref()) {
            let attributes = Attributes::new().with_opt("domain", category.domain.as_ref());
            children.push(Element::branch_with_attributes(
                "category",
                attributes,
                vec![Element::text(name)],
            ));
        }
    }

    if let Some((kind, media)) = select_media(item) {
        let duration = podcast_duration(kind, media, options);
        children.push(enclosure_element(media, kind, duration.is_some())?);
        if let Some(duration) = duration {
            children.push(Element::text_element(
                "itunes:duration",
                format_duration(duration),
            ));
        }
    }

    children.extend(normalize_all(&item.extensions));

    Ok(Element::branch("item", children))
}

fn guid_element(value: &str, permalink: bool) -> Element {
    let attributes =
        Attributes::new().with("isPermaLink", if permalink { "true" } else { "false" });
    Element::branch_with_attributes("guid", attributes, vec![Element::text(value)])
}

/// Duration consumed into `itunes:duration`: audio, podcast feeds, structured
/// enclosures with a non-zero duration only.
fn podcast_duration(kind: MediaKind, media: &Media, options: &FeedOptions) -> Option<u64> {
    match media {
        Media::Enclosure(enclosure) if kind == MediaKind::Audio && options.podcast => {
            enclosure.duration.filter(|d| *d > 0)
        }
        _ => None,
    }
}

/// `enclosure` element. Structured fields are merged over the derived
/// `length` and `type` defaults.
fn enclosure_element(
    media: &Media,
    kind: MediaKind,
    strip_duration: bool,
) -> Result<Element, FeedError> {
    let mime_type = derive_mime_type(media.url(), kind)?;
    let attributes = match media {
        Media::Url(url) => Attributes::new()
            .with("url", url.as_str())
            .with("length", 0_i64)
            .with("type", mime_type),
        Media::Enclosure(enclosure) => {
            let mut attributes = Attributes::new()
                .with("length", 0_i64)
                .with("type", mime_type)
                .with("url", enclosure.url.as_str());
            if let Some(mime_type) = &enclosure.mime_type {
                attributes.insert("type", mime_type);
            }
            if let Some(length) = enclosure.length {
                attributes.insert("length", length);
            }
            attributes = attributes.with_opt("title", enclosure.title.as_ref());
            if !strip_duration {
                attributes = attributes.with_opt("duration", enclosure.duration);
            }
            attributes
        }
    };
    Ok(Element::empty("enclosure", attributes))
}

fn push_podcast_elements(channel: &mut Vec<Element>, options: &FeedOptions) {
    if let Some(category) = present(options.category.as_ref()) {
        channel.push(Element::text_element("googleplay:category", category));
        channel.push(Element::text_element("itunes:category", category));
    }

    let author = options.author.as_ref();
    if let Some(email) = author.and_then(|a| present(a.email.as_ref())) {
        channel.push(Element::text_element("googleplay:owner", email));
        channel.push(Element::branch(
            "itunes:owner",
            vec![Element::text_element("itunes:email", email)],
        ));
    }
    if let Some(name) = author.and_then(|a| present(a.name.as_ref())) {
        channel.push(Element::text_element("googleplay:author", name));
        channel.push(Element::text_element("itunes:author", name));
    }

    if let Some(image) = present(options.image.as_ref()) {
        channel.push(Element::empty(
            "googleplay:image",
            Attributes::new().with("href", sanitize(image)),
        ));
    }
}

#[cfg(test)]
mod tests {
    use chrono::{DateTime, TimeZone, Utc};
    use feedgen_xml::Extension;
    use pretty_assertions::assert_eq;
    use quick_xml::Reader;
    use quick_xml::events::Event;

    use super::*;
    use crate::item::{Author, Category, Enclosure};

    fn updated() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2013, 7, 13, 23, 0, 0).unwrap()
    }

    fn base_options() -> FeedOptions {
        FeedOptions {
            updated: Some(updated()),
            ..FeedOptions::new("https://example.com/", "Feed Title")
        }
    }

    fn render(feed: &Feed) -> String {
        rss2(feed).unwrap()
    }

    fn assert_well_formed(xml: &str) {
        let mut reader = Reader::from_str(xml);
        loop {
            match reader.read_event() {
                Ok(Event::Eof) => break,
                Ok(_) => {}
                Err(e) => panic!("malformed XML: {e}\n{xml}"),
            }
        }
    }

    #[test]
    fn test_minimal_feed() {
        let feed = Feed::new(base_options());
        let expected = r#"<?xml version="1.0" encoding="utf-8"?>
<rss version="2.0">
    <channel>
        <title>Feed Title</title>
        <lastBuildDate>Sat, 13 Jul 2013 23:00:00 GMT</lastBuildDate>
        <docs>https://validator.w3.org/feed/docs/rss2.html</docs>
        <generator>https://github.com/feedgen/feedgen</generator>
    </channel>
</rss>"#;
        assert_eq!(render(&feed), expected);
    }

    #[test]
    fn test_full_channel_order() {
        let options = FeedOptions {
            link: Some("https://example.com/?a=1&b=2".to_owned()),
            description: Some("About".to_owned()),
            language: Some("en".to_owned()),
            ttl: Some(60),
            image: Some("https://example.com/logo.png?x=1&y=2".to_owned()),
            copyright: Some("All rights reserved".to_owned()),
            generator: Some("custom".to_owned()),
            ..base_options()
        };
        let mut feed = Feed::new(options);
        feed.add_category("Tech");
        feed.add_category("News");

        let expected = r#"<?xml version="1.0" encoding="utf-8"?>
<rss version="2.0">
    <channel>
        <title>Feed Title</title>
        <link>https://example.com/?a=1&amp;b=2</link>
        <description>About</description>
        <lastBuildDate>Sat, 13 Jul 2013 23:00:00 GMT</lastBuildDate>
        <docs>https://validator.w3.org/feed/docs/rss2.html</docs>
        <generator>custom</generator>
        <language>en</language>
        <ttl>60</ttl>
        <image>
            <title>Feed Title</title>
            <url>https://example.com/logo.png?x=1&amp;y=2</url>
            <link>https://example.com/?a=1&amp;b=2</link>
        </image>
        <copyright>All rights reserved</copyright>
        <category>Tech</category>
        <category>News</category>
    </channel>
</rss>"#;
        assert_eq!(render(&feed), expected);
    }

    #[test]
    fn test_zero_ttl_is_omitted() {
        let feed = Feed::new(FeedOptions {
            ttl: Some(0),
            ..base_options()
        });
        let xml = render(&feed);
        assert!(!xml.contains("<ttl>"), "{xml}");
    }

    #[test]
    fn test_namespace_minimality() {
        let mut feed = Feed::new(base_options());
        feed.add_item(Item::new("Hello", "https://example.com/hello"));
        let xml = render(&feed);
        assert!(xml.contains(r#"<rss version="2.0">"#), "{xml}");
        assert!(!xml.contains("xmlns:atom"));
        assert!(!xml.contains("xmlns:itunes"));
        assert!(!xml.contains("xmlns:googleplay"));
        assert!(!xml.contains("xmlns:content"));
    }

    #[test]
    fn test_hub_wins_over_self_link() {
        let options = FeedOptions {
            hub: Some("https://hub.example.com/".to_owned()),
            feed: Some("https://example.com/rss.xml".to_owned()),
            ..base_options()
        };
        let xml = render(&Feed::new(options));
        assert!(xml.contains(r#"<atom:link href="https://hub.example.com/" rel="hub"/>"#), "{xml}");
        assert!(!xml.contains(r#"rel="self""#));
        assert!(xml.contains(r#"<rss version="2.0" xmlns:atom="http://www.w3.org/2005/Atom">"#));
    }

    #[test]
    fn test_self_link_from_feed_links() {
        let mut options = base_options();
        options.feed_links.rss = Some("https://example.com/rss.xml?a=1&b=2".to_owned());
        let xml = render(&Feed::new(options));
        assert!(
            xml.contains(r#"<atom:link href="https://example.com/rss.xml?a=1&amp;b=2" rel="self" type="application/rss+xml"/>"#),
            "{xml}"
        );
        assert!(xml.contains("xmlns:atom"));
    }

    #[test]
    fn test_guid_permalink_fallback() {
        let mut feed = Feed::new(base_options());
        feed.add_item(Item {
            link: Some("https://example.com/?a=1&b=2".to_owned()),
            ..Item::default()
        });
        let xml = render(&feed);
        assert!(
            xml.contains(r#"<guid isPermaLink="true">https://example.com/?a=1&amp;b=2</guid>"#),
            "{xml}"
        );
    }

    #[test]
    fn test_guid_from_id() {
        let mut feed = Feed::new(base_options());
        feed.add_item(Item {
            id: Some("item-1".to_owned()),
            link: Some("https://example.com/1".to_owned()),
            ..Item::default()
        });
        let xml = render(&feed);
        assert!(xml.contains(r#"<guid isPermaLink="false">item-1</guid>"#), "{xml}");
    }

    #[test]
    fn test_guid_explicit_wins() {
        let mut feed = Feed::new(base_options());
        feed.add_item(Item {
            guid: Some("g".to_owned()),
            id: Some("i".to_owned()),
            ..Item::default()
        });
        let xml = render(&feed);
        assert!(xml.contains(r#"<guid isPermaLink="false">g</guid>"#), "{xml}");
        assert!(!xml.contains(">i<"));
    }

    #[test]
    fn test_no_guid_without_sources() {
        let mut feed = Feed::new(base_options());
        feed.add_item(Item {
            title: Some("Only title".to_owned()),
            ..Item::default()
        });
        assert!(!render(&feed).contains("<guid"));
    }

    #[test]
    fn test_full_item() {
        let published = Utc.with_ymd_and_hms(2024, 1, 2, 3, 4, 5).unwrap();
        let mut feed = Feed::new(base_options());
        feed.add_item(Item {
            title: Some("Hello & welcome".to_owned()),
            link: Some("https://example.com/hello".to_owned()),
            published: Some(published),
            date: Some(updated()),
            description: Some("A & B".to_owned()),
            content: Some("<p>Body</p>".to_owned()),
            authors: vec![
                Author::named("Jane").with_email("jane@example.com"),
                Author::named("No Email"),
            ],
            categories: vec![
                Category {
                    name: Some("Rust".to_owned()),
                    domain: Some("https://example.com/tags".to_owned()),
                    ..Category::default()
                },
                Category::named("Plain"),
                Category::default(),
            ],
            ..Item::default()
        });

        let expected = r#"<?xml version="1.0" encoding="utf-8"?>
<rss version="2.0" xmlns:dc="http://purl.org/dc/elements/1.1/" xmlns:content="http://purl.org/rss/1.0/modules/content/">
    <channel>
        <title>Feed Title</title>
        <lastBuildDate>Sat, 13 Jul 2013 23:00:00 GMT</lastBuildDate>
        <docs>https://validator.w3.org/feed/docs/rss2.html</docs>
        <generator>https://github.com/feedgen/feedgen</generator>
        <item>
            <title><![CDATA[Hello & welcome]]></title>
            <link>https://example.com/hello</link>
            <guid isPermaLink="true">https://example.com/hello</guid>
            <pubDate>Tue, 02 Jan 2024 03:04:05 GMT</pubDate>
            <description><![CDATA[A & B]]></description>
            <content:encoded><![CDATA[<p>Body</p>]]></content:encoded>
            <author>jane@example.com (Jane)</author>
            <category domain="https://example.com/tags">Rust</category>
            <category>Plain</category>
        </item>
    </channel>
</rss>"#;
        assert_eq!(render(&feed), expected);
    }

    #[test]
    fn test_pub_date_falls_back_to_date() {
        let mut feed = Feed::new(base_options());
        feed.add_item(Item {
            title: Some("t".to_owned()),
            date: Some(updated()),
            ..Item::default()
        });
        assert!(render(&feed).contains("<pubDate>Sat, 13 Jul 2013 23:00:00 GMT</pubDate>"));
    }

    #[test]
    fn test_enclosure_priority_video_over_audio() {
        let mut feed = Feed::new(base_options());
        feed.add_item(Item {
            video: Some(Media::from("https://example.com/v.mp4")),
            audio: Some(Media::from("https://example.com/a.mp3")),
            image: Some(Media::from("https://example.com/i.png")),
            ..Item::default()
        });
        let xml = render(&feed);
        assert!(
            xml.contains(r#"<enclosure url="https://example.com/v.mp4" length="0" type="video/mp4"/>"#),
            "{xml}"
        );
        assert_eq!(xml.matches("<enclosure").count(), 1);
    }

    #[test]
    fn test_generic_enclosure_uses_image_category() {
        let mut feed = Feed::new(base_options());
        feed.add_item(Item {
            enclosure: Some(Media::Enclosure(Enclosure {
                url: "https://example.com/doc.pdf".to_owned(),
                length: Some(2048),
                title: Some("Doc".to_owned()),
                ..Enclosure::default()
            })),
            ..Item::default()
        });
        let xml = render(&feed);
        assert!(
            xml.contains(r#"<enclosure length="2048" type="image/pdf" url="https://example.com/doc.pdf" title="Doc"/>"#),
            "{xml}"
        );
    }

    #[test]
    fn test_structured_type_overrides_derived() {
        let mut feed = Feed::new(base_options());
        feed.add_item(Item {
            audio: Some(Media::Enclosure(Enclosure {
                url: "https://example.com/a.mp3".to_owned(),
                mime_type: Some("audio/mpeg".to_owned()),
                duration: Some(125),
                ..Enclosure::default()
            })),
            ..Item::default()
        });
        let xml = render(&feed);
        assert!(
            xml.contains(r#"<enclosure length="0" type="audio/mpeg" url="https://example.com/a.mp3" duration="125"/>"#),
            "{xml}"
        );
        assert!(!xml.contains("itunes:duration"));
    }

    #[test]
    fn test_podcast_duration() {
        let options = FeedOptions {
            podcast: true,
            ..base_options()
        };
        let mut feed = Feed::new(options);
        feed.add_item(Item {
            audio: Some(Media::Enclosure(Enclosure {
                url: "https://example.com/episode.mp3".to_owned(),
                duration: Some(125),
                ..Enclosure::default()
            })),
            ..Item::default()
        });
        let xml = render(&feed);
        assert!(
            xml.contains(r#"<enclosure length="0" type="audio/mp3" url="https://example.com/episode.mp3"/>"#),
            "{xml}"
        );
        assert!(xml.contains("<itunes:duration>2:05</itunes:duration>"), "{xml}");
        assert!(!xml.contains(r#"duration=""#));
    }

    #[test]
    fn test_podcast_channel_block() {
        let options = FeedOptions {
            podcast: true,
            category: Some("Technology".to_owned()),
            author: Some(Author::named("Host").with_email("host@example.com")),
            image: Some("https://example.com/cover.jpg?a=1&b=2".to_owned()),
            ..base_options()
        };
        let xml = render(&Feed::new(options));
        assert!(xml.contains(
            r#"<rss version="2.0" xmlns:googleplay="http://www.google.com/schemas/play-podcasts/1.0" xmlns:itunes="http://www.itunes.com/dtds/podcast-1.0.dtd">"#
        ), "{xml}");
        let tail = r#"        <googleplay:category>Technology</googleplay:category>
        <itunes:category>Technology</itunes:category>
        <googleplay:owner>host@example.com</googleplay:owner>
        <itunes:owner>
            <itunes:email>host@example.com</itunes:email>
        </itunes:owner>
        <googleplay:author>Host</googleplay:author>
        <itunes:author>Host</itunes:author>
        <googleplay:image href="https://example.com/cover.jpg?a=1&amp;b=2"/>
    </channel>"#;
        assert!(xml.contains(tail), "{xml}");
    }

    #[test]
    fn test_extensions_placement() {
        let mut feed = Feed::new(base_options());
        let mut item = Item::new("t", "https://example.com/t");
        item.extensions.push(Extension::text("item:ext", "i"));
        feed.add_item(item);
        feed.add_extension(Extension::element(
            "parentName",
            vec![Extension::text("childName", "value")],
        ));
        let xml = render(&feed);
        assert!(xml.contains(
            "            <item:ext>i</item:ext>\n        </item>\n        <parentName>\n            <childName>value</childName>\n        </parentName>\n    </channel>"
        ), "{xml}");
    }

    #[test]
    fn test_invalid_enclosure_url_aborts() {
        let mut feed = Feed::new(base_options());
        feed.add_item(Item {
            image: Some(Media::from("not a url")),
            ..Item::default()
        });
        assert!(matches!(rss2(&feed), Err(FeedError::InvalidUrl { .. })));
    }

    #[test]
    fn test_idempotent_and_well_formed() {
        let options = FeedOptions {
            link: Some("https://example.com/?a=1&b=2".to_owned()),
            hub: Some("https://hub.example.com/?x=<y>".to_owned()),
            podcast: true,
            ..base_options()
        };
        let mut feed = Feed::new(options);
        feed.add_item(Item {
            title: Some("]]> tricky <title>".to_owned()),
            link: Some("https://example.com/a?b=1&c=2".to_owned()),
            enclosure: Some(Media::from("https://example.com/f.png?q=1&r=2")),
            content: Some("x".to_owned()),
            ..Item::default()
        });
        let first = render(&feed);
        let second = render(&feed);
        assert_eq!(first, second);
        assert_well_formed(&first);
    }
}
