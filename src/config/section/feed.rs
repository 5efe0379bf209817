//! `[feed]` configuration: RSS 2.0, Atom 1.0 and JSON Feed 1.0 outputs.

use crate::config::{ConfigDiagnostics, FieldPath};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct FeedConfig {
    /// Enable feed generation in `build`.
    pub enable: bool,
    /// RSS 2.0 output path (relative to the output directory).
    pub rss: PathBuf,
    /// Atom 1.0 output path.
    pub atom: PathBuf,
    /// JSON Feed 1.0 output path.
    pub json: PathBuf,
    /// Strip indentation from every feed.
    pub minify: bool,
}

impl Default for FeedConfig {
    fn default() -> Self {
        Self {
            enable: true,
            rss: "feed.rss".into(),
            atom: "feed.atom".into(),
            json: "feed.json".into(),
            minify: false,
        }
    }
}

impl FeedConfig {
    pub const RSS: FieldPath = FieldPath::new("feed.rss");
    pub const ATOM: FieldPath = FieldPath::new("feed.atom");
    pub const JSON: FieldPath = FieldPath::new("feed.json");

    pub fn validate(&self, diag: &mut ConfigDiagnostics) {
        let outputs = [
            (Self::RSS, &self.rss),
            (Self::ATOM, &self.atom),
            (Self::JSON, &self.json),
        ];
        for (field, path) in outputs {
            if path.as_os_str().is_empty() {
                diag.error(field, "output path is empty");
            } else if path.is_absolute() {
                diag.error_with_hint(
                    field,
                    format!("`{}` must be relative", path.display()),
                    "paths are resolved against the output directory",
                );
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::test_parse_config;

    #[test]
    fn test_defaults() {
        let config = test_parse_config("");
        assert!(config.feed.enable);
        assert!(!config.feed.minify);
        assert_eq!(config.feed.rss, PathBuf::from("feed.rss"));
        assert_eq!(config.feed.atom, PathBuf::from("feed.atom"));
        assert_eq!(config.feed.json, PathBuf::from("feed.json"));
    }

    #[test]
    fn test_custom_config() {
        let config = test_parse_config(
            "[feed]\nenable = false\nrss = \"rss.xml\"\nminify = true",
        );
        assert!(!config.feed.enable);
        assert!(config.feed.minify);
        assert_eq!(config.feed.rss, PathBuf::from("rss.xml"));
        assert_eq!(config.feed.atom, PathBuf::from("feed.atom"));
    }

    #[test]
    fn test_validate_paths() {
        let mut diag = ConfigDiagnostics::new();
        FeedConfig {
            rss: PathBuf::new(),
            ..Default::default()
        }
        .validate(&mut diag);
        assert!(diag.errors().iter().any(|e| e.field == FeedConfig::RSS));

        let mut diag = ConfigDiagnostics::new();
        FeedConfig::default().validate(&mut diag);
        assert!(!diag.has_errors());
    }
}
