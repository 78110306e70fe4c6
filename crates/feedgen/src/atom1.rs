//! Atom 1.0 renderer (RFC 4287).

use chrono::{DateTime, Utc};
use feedgen_xml::{Attributes, BranchNode, Document, Element, normalize_all, sanitize};

use crate::consts::{ATOM_NS, GENERATOR};
use crate::error::FeedError;
use crate::feed::Feed;
use crate::item::{Author, Category, Item};
use crate::media::{ResolvedMedia, select_media};
use crate::util::{iso_date, present};

/// Render a feed as Atom 1.0.
///
/// # Errors
///
/// Returns [`FeedError::InvalidUrl`] if an enclosure URL cannot be parsed.
pub fn atom1(feed: &Feed) -> Result<String, FeedError> {
    let options = feed.options();
    let updated = options.updated.unwrap_or_else(Utc::now);

    let mut children = vec![
        Element::text_element("id", options.id.as_str()),
        Element::text_element("title", options.title.as_str()),
        Element::text_element("updated", iso_date(&updated)),
        Element::text_element(
            "generator",
            sanitize(present(options.generator.as_ref()).unwrap_or(GENERATOR)),
        ),
    ];

    if let Some(author) = options.author.as_ref().and_then(|a| person("author", a)) {
        children.push(author);
    }

    if let Some(link) = present(options.link.as_ref()) {
        children.push(link_element("alternate", link));
    }
    if let Some(feed_url) =
        present(options.feed.as_ref()).or_else(|| present(options.feed_links.atom.as_ref()))
    {
        children.push(link_element("self", feed_url));
    }
    if let Some(hub) = present(options.hub.as_ref()) {
        children.push(link_element("hub", hub));
    }

    if let Some(description) = present(options.description.as_ref()) {
        children.push(Element::text_element("subtitle", description));
    }
    if let Some(image) = present(options.image.as_ref()) {
        children.push(Element::text_element("logo", image));
    }
    if let Some(favicon) = present(options.favicon.as_ref()) {
        children.push(Element::text_element("icon", favicon));
    }
    if let Some(copyright) = present(options.copyright.as_ref()) {
        children.push(Element::text_element("rights", copyright));
    }

    for category in feed.categories() {
        children.push(Element::empty(
            "category",
            Attributes::new().with("term", category.as_str()),
        ));
    }
    children.extend(feed.contributors().iter().filter_map(|c| person("contributor", c)));

    for item in feed.items() {
        children.push(render_entry(item, &updated)?);
    }

    children.extend(normalize_all(feed.extensions()));

    let root = BranchNode::with_attributes_and_elements(
        "feed",
        Attributes::new().with("xmlns", ATOM_NS),
        children,
    );
    Ok(Document::new(root).print()?)
}

/// `feed_updated` stands in for `updated` when the item has neither date.
fn render_entry(item: &Item, feed_updated: &DateTime<Utc>) -> Result<Element, FeedError> {
    let mut children = Vec::new();
    let link = present(item.link.as_ref());

    if let Some(title) = present(item.title.as_ref()) {
        children.push(html_element("title", title));
    }

    let id = present(item.guid.as_ref())
        .or_else(|| present(item.id.as_ref()))
        .or(link);
    if let Some(id) = id {
        children.push(Element::text_element("id", sanitize(id)));
    }

    if let Some(link) = link {
        children.push(Element::empty(
            "link",
            Attributes::new().with("href", sanitize(link)),
        ));
    }
    if let Some((kind, media)) = select_media(item) {
        let media = ResolvedMedia::resolve(media, kind)?;
        let attributes = Attributes::new()
            .with("rel", "enclosure")
            .with("href", sanitize(&media.url))
            .with("type", media.mime_type)
            .with_opt("length", media.length)
            .with_opt("title", media.title);
        children.push(Element::empty("link", attributes));
    }

    let updated = item
        .date
        .as_ref()
        .or(item.published.as_ref())
        .unwrap_or(feed_updated);
    children.push(Element::text_element("updated", iso_date(updated)));

    if let Some(description) = present(item.description.as_ref()) {
        children.push(html_element("summary", description));
    }
    if let Some(content) = present(item.content.as_ref()) {
        children.push(html_element("content", content));
    }

    children.extend(item.authors.iter().filter_map(|a| person("author", a)));
    children.extend(item.categories.iter().filter_map(category_element));
    children.extend(item.contributors.iter().filter_map(|c| person("contributor", c)));

    if let Some(published) = &item.published {
        children.push(Element::text_element("published", iso_date(published)));
    }
    if let Some(copyright) = present(item.copyright.as_ref()) {
        children.push(Element::text_element("rights", copyright));
    }

    children.extend(normalize_all(&item.extensions));

    Ok(Element::branch("entry", children))
}

/// `<name type="html"><![CDATA[...]]></name>`.
fn html_element(name: &str, html: &str) -> Element {
    Element::branch_with_attributes(
        name,
        Attributes::new().with("type", "html"),
        vec![Element::cdata(html)],
    )
}

fn link_element(rel: &str, href: &str) -> Element {
    Element::empty(
        "link",
        Attributes::new().with("rel", rel).with("href", sanitize(href)),
    )
}

/// Person construct (`author` / `contributor`); `None` when the record is
/// empty.
fn person(tag: &str, author: &Author) -> Option<Element> {
    let mut children = Vec::new();
    if let Some(name) = present(author.name.as_ref()) {
        children.push(Element::text_element("name", name));
    }
    if let Some(email) = present(author.email.as_ref()) {
        children.push(Element::text_element("email", email));
    }
    if let Some(link) = present(author.link.as_ref()) {
        children.push(Element::text_element("uri", sanitize(link)));
    }
    (!children.is_empty()).then(|| Element::branch(tag, children))
}

fn category_element(category: &Category) -> Option<Element> {
    let attributes = Attributes::new()
        .with_opt("label", category.name.as_ref())
        .with_opt("scheme", category.scheme.as_ref())
        .with_opt("term", category.term.as_ref());
    (!attributes.is_empty()).then(|| Element::empty("category", attributes))
}
