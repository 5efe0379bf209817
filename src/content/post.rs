//! Post record handed from a content source to the generators.

use crate::utils::date::DateTimeUtc;

/// One published article.
///
/// Built fresh on every run and never mutated afterwards. Optional fields
/// that are absent simply do not show up in the generated files.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PostRecord {
    /// Site-relative path, e.g. `/posts/hello-world`.
    pub url: String,
    pub title: String,
    /// HTML summary; empty when the post has none.
    pub excerpt: String,
    /// Full body HTML.
    pub rendered_html: String,
    /// `None` when the post has no date or it could not be parsed.
    pub date: Option<DateTimeUtc>,
    pub author: Option<String>,
    /// Twitter/X handle, with or without a leading `@`.
    pub author_social_handle: Option<String>,
    /// Hero image URL, absolute or site-relative.
    pub hero_image: Option<String>,
}
