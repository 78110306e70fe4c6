//! Enclosure selection and MIME type derivation shared by all renderers.

use feedgen_xml::sanitize;
use url::Url;

use crate::error::FeedError;
use crate::item::{Item, Media};

/// Which item field an enclosure came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum MediaKind {
    Video,
    Audio,
    Image,
    Enclosure,
}

impl MediaKind {
    /// Media category used as the MIME type prefix.
    pub(crate) fn mime_category(self) -> &'static str {
        match self {
            Self::Video => "video",
            Self::Audio => "audio",
            Self::Image | Self::Enclosure => "image",
        }
    }
}

/// Pick the single enclosure to render: video, then audio, then image, then
/// the generic enclosure.
pub(crate) fn select_media(item: &Item) -> Option<(MediaKind, &Media)> {
    if let Some(video) = &item.video {
        Some((MediaKind::Video, video))
    } else if let Some(audio) = &item.audio {
        Some((MediaKind::Audio, audio))
    } else if let Some(image) = &item.image {
        Some((MediaKind::Image, image))
    } else {
        item.enclosure
            .as_ref()
            .map(|enclosure| (MediaKind::Enclosure, enclosure))
    }
}

/// `<category>/<extension>` where the extension is the last `.`-separated
/// piece of the URL path.
pub(crate) fn derive_mime_type(url: &str, kind: MediaKind) -> Result<String, FeedError> {
    let parsed = Url::parse(&sanitize(url)).map_err(|source| FeedError::InvalidUrl {
        url: url.to_owned(),
        source,
    })?;
    let extension = parsed.path().rsplit('.').next().unwrap_or_default();
    Ok(format!("{}/{extension}", kind.mime_category()))
}

/// Enclosure with derived defaults filled in.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct ResolvedMedia {
    pub(crate) url: String,
    pub(crate) mime_type: String,
    pub(crate) length: Option<u64>,
    pub(crate) title: Option<String>,
    pub(crate) duration: Option<u64>,
}

impl ResolvedMedia {
    pub(crate) fn resolve(media: &Media, kind: MediaKind) -> Result<Self, FeedError> {
        let derived = derive_mime_type(media.url(), kind)?;
        Ok(match media {
            Media::Url(url) => Self {
                url: url.clone(),
                mime_type: derived,
                length: None,
                title: None,
                duration: None,
            },
            Media::Enclosure(enclosure) => Self {
                url: enclosure.url.clone(),
                mime_type: enclosure.mime_type.clone().unwrap_or(derived),
                length: enclosure.length,
                title: enclosure.title.clone(),
                duration: enclosure.duration,
            },
        })
    }
}
