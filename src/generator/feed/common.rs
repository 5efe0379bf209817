//! Feed metadata and entries shared by the RSS, Atom and JSON serializers.

use crate::{
    config::SiteConfig, content::PostRecord, debug, generator::file_url,
    utils::date::DateTimeUtc,
};
use regex::Regex;
use std::{path::Path, sync::LazyLock};
use url::Url;

/// Marker the site renderer puts inside heading anchors.
const ZERO_WIDTH_SPACE: char = '\u{200B}';
const ZERO_WIDTH_SPACE_ENTITY: &str = "&ZeroWidthSpace;";

/// Run-wide feed constants, fixed by the `[site]` section.
#[derive(Debug, Clone, PartialEq)]
pub struct FeedMetadata {
    pub title: String,
    pub description: String,
    /// Canonical base URL; doubles as the feed id.
    pub id: String,
    pub link: String,
    pub language: String,
    pub image: Option<String>,
    pub favicon: Option<String>,
    pub copyright: Option<String>,
    pub author: Option<String>,
}

impl FeedMetadata {
    pub fn from_config(config: &SiteConfig) -> Self {
        let site = &config.site;
        let base_url = config.base_url().to_string();
        Self {
            title: site.title.clone(),
            description: site.description.clone(),
            id: base_url.clone(),
            link: base_url,
            language: site.language.clone(),
            image: site.image.clone(),
            favicon: site.favicon.clone(),
            copyright: site.copyright.clone(),
            author: site.author.clone(),
        }
    }

    /// Absolute URL of a feed file.
    pub fn url_of(&self, path: &Path) -> String {
        file_url(&self.link, path)
    }
}

/// An author of a feed entry.
#[derive(Debug, Clone, PartialEq)]
pub struct FeedAuthor {
    pub name: String,
    /// Social profile URL.
    pub link: Option<String>,
}

/// One feed item, derived 1:1 from a post.
#[derive(Debug, Clone, PartialEq)]
pub struct FeedEntry {
    pub title: String,
    /// Always equal to `link`.
    pub id: String,
    pub link: String,
    /// Excerpt HTML; empty when the post has none.
    pub description: String,
    /// Body HTML without zero-width-space markers.
    pub content: String,
    pub authors: Vec<FeedAuthor>,
    pub date: Option<DateTimeUtc>,
    pub image: Option<String>,
}

impl FeedEntry {
    pub fn from_post(post: &PostRecord, base_url: &str) -> Self {
        let link = format!("{}{}", base_url, post.url);

        let authors = post
            .author
            .as_ref()
            .map(|name| {
                vec![FeedAuthor {
                    name: name.clone(),
                    link: post.author_social_handle.as_deref().and_then(profile_link),
                }]
            })
            .unwrap_or_default();

        let image = post
            .hero_image
            .as_deref()
            .and_then(|image| absolute_image(image, base_url, &link));

        Self {
            title: post.title.clone(),
            id: link.clone(),
            link,
            description: post.excerpt.clone(),
            content: strip_zero_width_space(&post.rendered_html),
            authors,
            date: post.date,
            image,
        }
    }
}

/// Sort newest first. Stable, undated posts go last.
pub fn sort_posts(posts: &mut [PostRecord]) {
    // None < Some(_), so reversing the comparison puts undated last
    posts.sort_by(|a, b| b.date.cmp(&a.date));
}

/// Remove the zero-width space, literal or as an entity.
pub fn strip_zero_width_space(html: &str) -> String {
    html.replace(ZERO_WIDTH_SPACE_ENTITY, "")
        .replace(ZERO_WIDTH_SPACE, "")
}

/// Absolute http(s) URL of a hero image.
///
/// Site-relative paths get the base URL prepended like post links; other
/// relative paths resolve against the post's own URL.
fn absolute_image(image: &str, base_url: &str, post_link: &str) -> Option<String> {
    let image = image.trim();
    if image.is_empty() {
        return None;
    }
    if image.starts_with('/') && !image.starts_with("//") {
        return Some(format!("{}{}", base_url, image));
    }

    match Url::parse(post_link).and_then(|link| link.join(image)) {
        Ok(url) if matches!(url.scheme(), "http" | "https") => Some(url.into()),
        _ => {
            debug!("feed"; "dropping hero image `{}`: not resolvable to an http(s) URL", image);
            None
        }
    }
}

/// Profile URL for a social handle, `@jane` -> `https://twitter.com/jane`.
fn profile_link(handle: &str) -> Option<String> {
    static RE_SOCIAL_HANDLE: LazyLock<Regex> =
        LazyLock::new(|| Regex::new(r"^@?([A-Za-z0-9_]{1,15})$").unwrap());

    let handle = handle.trim();
    if handle.starts_with("https://") || handle.starts_with("http://") {
        return Some(handle.to_string());
    }

    match RE_SOCIAL_HANDLE.captures(handle) {
        Some(caps) => Some(format!("https://twitter.com/{}", &caps[1])),
        None => {
            debug!("feed"; "ignoring invalid social handle `{}`", handle);
            None
        }
    }
}
