//! Fixed identifiers and namespace URIs.

/// Default `generator` value.
pub const GENERATOR: &str = "https://github.com/feedgen/feedgen";

/// Default RSS 2.0 `docs` value.
pub const RSS2_DOCS_URL: &str = "https://validator.w3.org/feed/docs/rss2.html";

/// JSON Feed version identifier.
pub const JSON_FEED_VERSION: &str = "https://jsonfeed.org/version/1";

/// Atom namespace.
pub const ATOM_NS: &str = "http://www.w3.org/2005/Atom";

/// Dublin Core namespace.
pub const DC_NS: &str = "http://purl.org/dc/elements/1.1/";

/// RSS content module namespace.
pub const CONTENT_NS: &str = "http://purl.org/rss/1.0/modules/content/";

/// Google Play podcasts namespace.
pub const GOOGLEPLAY_NS: &str = "http://www.google.com/schemas/play-podcasts/1.0";

/// iTunes podcasts namespace.
pub const ITUNES_NS: &str = "http://www.itunes.com/dtds/podcast-1.0.dtd";
