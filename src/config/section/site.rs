//! `[site]` configuration.
//!
//! Run-wide feed metadata. Nothing here is derived from posts.
//!
//! ```toml
//! [site]
//! title = "Engineering blog"
//! description = "How we solve large-scale technical challenges"
//! url = "https://engineering.example.com"
//! language = "en"
//! image = "https://example.com/images/logo.svg"
//! favicon = "https://example.com/images/logo.svg"
//! copyright = "Copyright © 2023-present Example"
//! ```

use crate::config::{ConfigDiagnostics, FieldPath};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SiteInfoConfig {
    /// Feed title.
    pub title: String,

    /// Feed description.
    pub description: String,

    /// Canonical base URL; also the feed id and link.
    pub url: Option<String>,

    /// Language code (e.g., "en", "zh-Hans").
    pub language: String,

    /// Feed image / logo URL.
    pub image: Option<String>,

    /// Favicon URL.
    pub favicon: Option<String>,

    /// Copyright notice, used verbatim.
    pub copyright: Option<String>,

    /// Feed-level author name.
    pub author: Option<String>,
}

impl Default for SiteInfoConfig {
    fn default() -> Self {
        Self {
            title: String::new(),
            description: String::new(),
            url: None,
            language: "en".into(),
            image: None,
            favicon: None,
            copyright: None,
            author: None,
        }
    }
}

impl SiteInfoConfig {
    pub const TITLE: FieldPath = FieldPath::new("site.title");
    pub const URL: FieldPath = FieldPath::new("site.url");
    pub const IMAGE: FieldPath = FieldPath::new("site.image");
    pub const FAVICON: FieldPath = FieldPath::new("site.favicon");

    /// Base URL without trailing slash, or `""` when unset.
    pub fn base_url(&self) -> &str {
        self.url.as_deref().unwrap_or_default().trim_end_matches('/')
    }

    /// Validate site configuration.
    ///
    /// # Checks
    /// - `url` must be set: every feed id and sitemap `<loc>` is built from it
    /// - `url` must be an http(s) URL with a host
    /// - `image` / `favicon` must be absolute URLs when present
    pub fn validate(&self, diag: &mut ConfigDiagnostics) {
        if self.title.trim().is_empty() {
            diag.warn(Self::TITLE, "empty title, feeds will have no name");
        }

        match &self.url {
            None => diag.error_with_hint(
                Self::URL,
                format!("{} is not configured", Self::URL),
                format!("set {}, e.g.: \"https://example.com\"", Self::URL),
            ),
            Some(url_str) => match url::Url::parse(url_str) {
                Ok(parsed) => {
                    if !matches!(parsed.scheme(), "http" | "https") {
                        diag.error_with_hint(
                            Self::URL,
                            format!(
                                "scheme '{}' not supported, must be http or https",
                                parsed.scheme()
                            ),
                            "use format like https://example.com",
                        );
                    }
                    if parsed.host_str().is_none() {
                        diag.error_with_hint(
                            Self::URL,
                            "URL must have a valid host",
                            "use format like https://example.com",
                        );
                    }
                }
                Err(e) => diag.error_with_hint(
                    Self::URL,
                    format!("invalid URL: {e}"),
                    "use format like https://example.com",
                ),
            },
        }

        for (field, value) in [(Self::IMAGE, &self.image), (Self::FAVICON, &self.favicon)] {
            if let Some(value) = value
                && url::Url::parse(value).is_err()
            {
                diag.error(field, format!("`{value}` is not an absolute URL"));
            }
        }
    }
}
