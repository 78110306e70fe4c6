//! JSON Feed renderer (<https://jsonfeed.org/version/1>).
//!
//! Builds a `serde_json::Value` object graph directly. Keys keep insertion
//! order; absent fields are left out rather than written as `null`.

use feedgen_xml::{AttrValue, Attributes, Extension, Node, Scalar};
use serde::Serialize;
use serde_json::ser::PrettyFormatter;
use serde_json::{Map, Value, json};

use crate::consts::JSON_FEED_VERSION;
use crate::error::FeedError;
use crate::feed::Feed;
use crate::item::{Author, Item};
use crate::media::{ResolvedMedia, select_media};
use crate::util::{iso_date, present};

/// Key holding an element extension's attributes.
const ATTRIBUTES_KEY: &str = "_attributes";

/// Render a feed as a JSON Feed value.
///
/// # Errors
///
/// Returns [`FeedError::InvalidUrl`] if an attachment URL cannot be parsed.
pub fn json1(feed: &Feed) -> Result<Value, FeedError> {
    let options = feed.options();
    let mut out = Map::new();

    out.insert("version".to_owned(), JSON_FEED_VERSION.into());
    out.insert("title".to_owned(), options.title.as_str().into());
    insert_str(&mut out, "home_page_url", present(options.link.as_ref()));
    insert_str(
        &mut out,
        "feed_url",
        present(options.feed_links.json.as_ref()).or_else(|| present(options.feed.as_ref())),
    );
    insert_str(&mut out, "description", present(options.description.as_ref()));
    insert_str(&mut out, "icon", present(options.image.as_ref()));
    insert_str(&mut out, "favicon", present(options.favicon.as_ref()));
    if let Some(author) = options.author.as_ref().and_then(author_value) {
        out.insert("author".to_owned(), author);
    }
    if let Some(hub) = present(options.hub.as_ref()) {
        out.insert("hubs".to_owned(), json!([{ "type": "WebSub", "url": hub }]));
    }

    let items = feed
        .items()
        .iter()
        .map(render_item)
        .collect::<Result<Vec<_>, _>>()?;

    insert_extensions(&mut out, feed.extensions());
    out.insert("items".to_owned(), Value::Array(items));

    Ok(Value::Object(out))
}

/// Render a feed as JSON Feed text, indented with four spaces.
///
/// # Errors
///
/// Returns an error if rendering or encoding fails.
pub fn json1_string(feed: &Feed) -> Result<String, FeedError> {
    let value = json1(feed)?;
    let mut buf = Vec::new();
    let mut serializer =
        serde_json::Serializer::with_formatter(&mut buf, PrettyFormatter::with_indent(b"    "));
    value.serialize(&mut serializer)?;
    Ok(String::from_utf8(buf)?)
}

fn render_item(item: &Item) -> Result<Value, FeedError> {
    let mut out = Map::new();

    let id = present(item.guid.as_ref())
        .or_else(|| present(item.id.as_ref()))
        .or_else(|| present(item.link.as_ref()));
    insert_str(&mut out, "id", id);
    insert_str(&mut out, "content_html", present(item.content.as_ref()));
    insert_str(&mut out, "url", present(item.link.as_ref()));
    insert_str(&mut out, "title", present(item.title.as_ref()));
    insert_str(&mut out, "summary", present(item.description.as_ref()));
    if let Some(image) = &item.image {
        out.insert("image".to_owned(), image.url().into());
    }
    if let Some(date) = &item.date {
        out.insert("date_modified".to_owned(), iso_date(date).into());
    }
    if let Some(date) = &item.published {
        out.insert("date_published".to_owned(), iso_date(date).into());
    }
    if let Some(author) = item.authors.first().and_then(author_value) {
        out.insert("author".to_owned(), author);
    }

    let tags: Vec<Value> = item
        .categories
        .iter()
        .filter_map(|c| present(c.name.as_ref()))
        .map(Value::from)
        .collect();
    if !tags.is_empty() {
        out.insert("tags".to_owned(), Value::Array(tags));
    }

    if let Some((kind, media)) = select_media(item) {
        let media = ResolvedMedia::resolve(media, kind)?;
        let mut attachment = Map::new();
        attachment.insert("url".to_owned(), media.url.into());
        attachment.insert("mime_type".to_owned(), media.mime_type.into());
        insert_str(&mut attachment, "title", media.title.as_deref());
        if let Some(length) = media.length {
            attachment.insert("size_in_bytes".to_owned(), length.into());
        }
        if let Some(duration) = media.duration {
            attachment.insert("duration_in_seconds".to_owned(), duration.into());
        }
        out.insert("attachments".to_owned(), json!([attachment]));
    }

    insert_extensions(&mut out, &item.extensions);

    Ok(Value::Object(out))
}

fn insert_str(map: &mut Map<String, Value>, key: &str, value: Option<&str>) {
    if let Some(value) = value {
        map.insert(key.to_owned(), value.into());
    }
}

fn author_value(author: &Author) -> Option<Value> {
    let mut out = Map::new();
    insert_str(&mut out, "name", present(author.name.as_ref()));
    insert_str(&mut out, "url", present(author.link.as_ref()));
    insert_str(&mut out, "avatar", present(author.avatar.as_ref()));
    (!out.is_empty()).then_some(Value::Object(out))
}

/// Add extensions keyed by name. Built-in keys are never overwritten.
fn insert_extensions(map: &mut Map<String, Value>, extensions: &[Extension]) {
    for extension in extensions {
        map.entry(extension.name())
            .or_insert_with(|| extension_value(extension));
    }
}

/// Convert an extension into a JSON value.
///
/// Text becomes its scalar, CDATA a string, and an element an object keyed by
/// child name (repeated names collect into an array) with attributes under
/// `_attributes`. Children named `_attributes` are skipped.
fn extension_value(extension: &Extension) -> Value {
    match extension {
        Node::Text(leaf) => scalar_value(&leaf.text),
        Node::CData(leaf) => Value::String(leaf.cdata.clone()),
        Node::Element(branch) => {
            let mut out = Map::new();
            if let Some(attributes) = branch.attributes().filter(|a| !a.is_empty()) {
                out.insert(ATTRIBUTES_KEY.to_owned(), attributes_value(attributes));
            }
            for child in branch.elements().unwrap_or_default() {
                if child.name() == ATTRIBUTES_KEY {
                    continue;
                }
                let value = extension_value(child);
                match out.get_mut(child.name()) {
                    Some(Value::Array(values)) => values.push(value),
                    Some(existing) => {
                        let first = existing.take();
                        *existing = Value::Array(vec![first, value]);
                    }
                    None => {
                        out.insert(child.name().to_owned(), value);
                    }
                }
            }
            Value::Object(out)
        }
    }
}

fn scalar_value(scalar: &Scalar) -> Value {
    match scalar {
        Scalar::Bool(value) => Value::Bool(*value),
        Scalar::Int(value) => Value::from(*value),
        Scalar::Float(value) => Value::from(*value),
        Scalar::String(value) => Value::String(value.clone()),
    }
}

fn attributes_value(attributes: &Attributes) -> Value {
    let map = attributes
        .iter()
        .map(|(key, value)| {
            let value = match value {
                AttrValue::Int(v) => Value::from(*v),
                AttrValue::Float(v) => Value::from(*v),
                AttrValue::String(v) => Value::String(v.clone()),
            };
            (key.to_owned(), value)
        })
        .collect();
    Value::Object(map)
}
