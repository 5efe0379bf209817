//! `[sitemap]` configuration.
//!
//! ```toml
//! [sitemap]
//! enable = true
//! path = "sitemap.xml"
//! order = "enumeration"   # post order: enumeration | date
//! lastmod = false         # emit <lastmod> from post dates
//! changefreq = "weekly"   # post entries
//! priority = 0.5          # post entries
//!
//! [[sitemap.routes]]
//! url = "/"
//! changefreq = "daily"
//! priority = 1.0
//! ```

use crate::config::{ConfigDiagnostics, FieldPath};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// `<changefreq>` hint of the sitemap protocol.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum ChangeFreq {
    Always,
    Hourly,
    Daily,
    #[default]
    Weekly,
    Monthly,
    Yearly,
    Never,
}

impl ChangeFreq {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Always => "always",
            Self::Hourly => "hourly",
            Self::Daily => "daily",
            Self::Weekly => "weekly",
            Self::Monthly => "monthly",
            Self::Yearly => "yearly",
            Self::Never => "never",
        }
    }
}

/// Order of post entries in the sitemap.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum SitemapOrder {
    /// Order in which the content source enumerated the posts (default).
    #[default]
    Enumeration,
    /// Newest first, same as the feeds.
    Date,
}

/// A route that exists independently of posts (e.g. the home page).
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct StaticRoute {
    /// Site-relative URL, starting with `/`.
    pub url: String,
    #[serde(default)]
    pub changefreq: ChangeFreq,
    #[serde(default = "default_priority")]
    pub priority: f32,
}

fn default_priority() -> f32 {
    0.5
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SitemapConfig {
    /// Enable sitemap generation in `build`.
    pub enable: bool,
    /// Output path for sitemap file.
    pub path: PathBuf,
    /// Post entry order.
    pub order: SitemapOrder,
    /// Emit `<lastmod>` for dated posts.
    pub lastmod: bool,
    /// Change frequency of post entries.
    pub changefreq: ChangeFreq,
    /// Priority of post entries.
    pub priority: f32,
    /// Static routes, listed before posts.
    pub routes: Vec<StaticRoute>,
}

impl Default for SitemapConfig {
    fn default() -> Self {
        Self {
            enable: true,
            path: "sitemap.xml".into(),
            order: SitemapOrder::Enumeration,
            lastmod: false,
            changefreq: ChangeFreq::Weekly,
            priority: 0.5,
            routes: vec![StaticRoute {
                url: "/".into(),
                changefreq: ChangeFreq::Daily,
                priority: 1.0,
            }],
        }
    }
}

impl SitemapConfig {
    pub const PATH: FieldPath = FieldPath::new("sitemap.path");
    pub const PRIORITY: FieldPath = FieldPath::new("sitemap.priority");
    pub const ROUTES: FieldPath = FieldPath::new("sitemap.routes");

    pub fn validate(&self, diag: &mut ConfigDiagnostics) {
        if self.path.as_os_str().is_empty() {
            diag.error(Self::PATH, "output path is empty");
        } else if self.path.is_absolute() {
            diag.error_with_hint(
                Self::PATH,
                format!("`{}` must be relative", self.path.display()),
                "paths are resolved against the output directory",
            );
        }

        if !is_valid_priority(self.priority) {
            diag.error(
                Self::PRIORITY,
                format!("priority {} is outside 0.0..=1.0", self.priority),
            );
        }

        for route in &self.routes {
            if !route.url.starts_with('/') {
                diag.error_with_hint(
                    Self::ROUTES,
                    format!("route `{}` must start with `/`", route.url),
                    "routes are site-relative, e.g. \"/about\"",
                );
            }
            if !is_valid_priority(route.priority) {
                diag.error(
                    Self::ROUTES,
                    format!(
                        "route `{}` priority {} is outside 0.0..=1.0",
                        route.url, route.priority
                    ),
                );
            }
        }

        let mut seen: Vec<&str> = Vec::with_capacity(self.routes.len());
        for route in &self.routes {
            if seen.contains(&route.url.as_str()) {
                diag.warn(Self::ROUTES, format!("route `{}` listed twice", route.url));
            }
            seen.push(&route.url);
        }
    }
}

fn is_valid_priority(priority: f32) -> bool {
    (0.0..=1.0).contains(&priority)
}
