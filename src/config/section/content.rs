//! `[content]` configuration.
//!
//! ```toml
//! [content]
//! posts = "posts"            # Markdown posts (relative to the config file)
//! route = "/posts"           # Route prefix for post URLs
//! output = ".vitepress/dist" # Build output directory (relative to the config file)
//! ```

use crate::config::{ConfigDiagnostics, FieldPath};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ContentConfig {
    /// Directory holding the markdown posts.
    pub posts: PathBuf,
    /// Route prefix; a post `hello.md` is served at `{route}/hello`.
    pub route: String,
    /// Build output directory the generated files land in.
    pub output: PathBuf,
}

impl Default for ContentConfig {
    fn default() -> Self {
        Self {
            posts: "posts".into(),
            route: "/posts".into(),
            output: "dist".into(),
        }
    }
}

impl ContentConfig {
    pub const ROUTE: FieldPath = FieldPath::new("content.route");

    pub fn validate(&self, diag: &mut ConfigDiagnostics) {
        if !self.route.starts_with('/') {
            diag.error_with_hint(
                Self::ROUTE,
                format!("route `{}` must start with `/`", self.route),
                format!("use \"/{}\"", self.route.trim_start_matches('/')),
            );
        }
    }
}
