//! Feed and sitemap generators.
//!
//! Generates auxiliary files next to the built site:
//!
//! - **Feed**: RSS 2.0, Atom 1.0 and JSON Feed 1.0 (`feed.rss`, `feed.atom`, `feed.json`)
//! - **Sitemap**: Search engine indexing (`sitemap.xml`)
//!
//! Posts are loaded once per run from a [`ContentSource`]. Each generator
//! serializes every output into memory first and only touches the
//! filesystem once all serializations have succeeded.

mod error;
pub mod feed;
pub mod sitemap;

pub use error::GenerateError;
pub use feed::{FeedReport, generate_feeds};
pub use sitemap::{SitemapReport, generate_sitemap};

use crate::{config::SiteConfig, content::ContentSource, log};
use std::{
    fs,
    path::{Path, PathBuf},
};

/// Which generators a run executes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Targets {
    pub feed: bool,
    pub sitemap: bool,
}

impl Targets {
    pub const fn is_empty(self) -> bool {
        !self.feed && !self.sitemap
    }
}

/// Outcome of a [`Generator::run`].
#[derive(Debug, Default)]
pub struct RunReport {
    pub feed: Option<FeedReport>,
    pub sitemap: Option<SitemapReport>,
}

/// Loads posts from a content source and runs the selected generators.
pub struct Generator<'a, S: ContentSource + ?Sized> {
    config: &'a SiteConfig,
    source: &'a S,
}

impl<'a, S: ContentSource + ?Sized> Generator<'a, S> {
    pub fn new(config: &'a SiteConfig, source: &'a S) -> Self {
        Self { config, source }
    }

    /// Load posts once, then generate the selected outputs into `output_dir`.
    ///
    /// A load failure aborts before anything is written.
    pub fn run(&self, output_dir: &Path, targets: Targets) -> Result<RunReport, GenerateError> {
        let mut report = RunReport::default();
        if targets.is_empty() {
            log!("build"; "feed and sitemap are both disabled, nothing to do");
            return Ok(report);
        }

        let posts = self.source.list_posts()?;
        log!("content"; "{} posts", posts.len());

        if targets.feed {
            report.feed = Some(generate_feeds(self.config, output_dir, &posts)?);
        }
        if targets.sitemap {
            report.sitemap = Some(generate_sitemap(self.config, output_dir, &posts)?);
        }

        Ok(report)
    }
}

/// A serialized file waiting to be written.
struct Output {
    /// Path relative to the output directory.
    path: PathBuf,
    bytes: Vec<u8>,
}

/// Create `output_dir` and write every output into it, overwriting existing files.
fn write_outputs(output_dir: &Path, outputs: &[Output]) -> Result<Vec<PathBuf>, GenerateError> {
    let write_err = |path: &Path| {
        let path = path.to_path_buf();
        move |source| GenerateError::Write { path, source }
    };

    fs::create_dir_all(output_dir).map_err(write_err(output_dir))?;

    let mut written = Vec::with_capacity(outputs.len());
    for output in outputs {
        let path = output_dir.join(&output.path);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).map_err(write_err(parent))?;
        }
        fs::write(&path, &output.bytes).map_err(write_err(&path))?;
        written.push(path);
    }

    Ok(written)
}

/// Absolute URL of a generated file.
fn file_url(base_url: &str, path: &Path) -> String {
    let path = path.to_string_lossy().replace('\\', "/");
    format!("{}/{}", base_url, path.trim_start_matches('/'))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{config::test_parse_config, content::PostRecord, utils::date::DateTimeUtc};
    use tempfile::TempDir;

    const ALL: Targets = Targets {
        feed: true,
        sitemap: true,
    };

    pub(crate) fn post(slug: &str, title: &str, date: Option<DateTimeUtc>) -> PostRecord {
        PostRecord {
            url: format!("/posts/{slug}"),
            title: title.to_string(),
            excerpt: format!("<p>{title} excerpt</p>"),
            rendered_html: format!("<h2 id=\"intro\">Intro<a class=\"header-anchor\" href=\"#intro\">&ZeroWidthSpace;</a></h2><p>{title}\u{200B} body</p>"),
            date,
            ..Default::default()
        }
    }

    #[test]
    fn test_write_outputs_creates_directories() {
        let dir = TempDir::new().unwrap();
        let output_dir = dir.path().join("dist/nested");
        let outputs = [
            Output {
                path: "a.xml".into(),
                bytes: b"<a/>".to_vec(),
            },
            Output {
                path: "feeds/b.json".into(),
                bytes: b"{}".to_vec(),
            },
        ];

        let written = write_outputs(&output_dir, &outputs).unwrap();
        assert_eq!(written.len(), 2);
        assert_eq!(fs::read(output_dir.join("a.xml")).unwrap(), b"<a/>");
        assert_eq!(fs::read(output_dir.join("feeds/b.json")).unwrap(), b"{}");

        // idempotent, overwrites
        let outputs = [Output {
            path: "a.xml".into(),
            bytes: b"<b/>".to_vec(),
        }];
        write_outputs(&output_dir, &outputs).unwrap();
        assert_eq!(fs::read(output_dir.join("a.xml")).unwrap(), b"<b/>");
    }

    #[test]
    fn test_write_outputs_reports_failures() {
        let dir = TempDir::new().unwrap();
        let blocker = dir.path().join("dist");
        fs::write(&blocker, "not a directory").unwrap();

        let outputs = [Output {
            path: "a.xml".into(),
            bytes: Vec::new(),
        }];
        let err = write_outputs(&blocker, &outputs).unwrap_err();
        assert!(matches!(err, GenerateError::Write { path, .. } if path == blocker));
    }

    #[test]
    fn test_file_url() {
        assert_eq!(
            file_url("https://example.com", Path::new("feed.rss")),
            "https://example.com/feed.rss"
        );
        assert_eq!(
            file_url("https://example.com/blog", Path::new("feeds/atom.xml")),
            "https://example.com/blog/feeds/atom.xml"
        );
    }

    #[test]
    fn test_run_generates_all_targets() {
        let dir = TempDir::new().unwrap();
        let config = test_parse_config("");
        let posts = vec![
            post("a", "A", Some(DateTimeUtc::from_ymd(2024, 1, 1))),
            post("b", "B", Some(DateTimeUtc::from_ymd(2024, 2, 1))),
        ];

        let report = Generator::new(&config, &posts)
            .run(dir.path(), ALL)
            .unwrap();

        assert_eq!(report.feed.unwrap().entries, 2);
        assert_eq!(report.sitemap.unwrap().urls, 3);
        for name in ["feed.rss", "feed.atom", "feed.json", "sitemap.xml"] {
            assert!(dir.path().join(name).is_file(), "{name} missing");
        }
    }

    #[test]
    fn test_run_selected_target_only() {
        let dir = TempDir::new().unwrap();
        let config = test_parse_config("");
        let posts = vec![post("a", "A", None)];
        let targets = Targets {
            feed: false,
            sitemap: true,
        };

        let report = Generator::new(&config, &posts)
            .run(dir.path(), targets)
            .unwrap();
        assert!(report.feed.is_none());
        assert!(dir.path().join("sitemap.xml").is_file());
        assert!(!dir.path().join("feed.rss").exists());
    }

    struct FailingSource;

    impl ContentSource for FailingSource {
        fn list_posts(&self) -> Result<Vec<PostRecord>, crate::content::ContentError> {
            Err(crate::content::ContentError::ReadDir {
                path: "posts".into(),
                source: std::io::Error::from(std::io::ErrorKind::NotFound),
            })
        }
    }

    #[test]
    fn test_run_load_failure_writes_nothing() {
        let dir = TempDir::new().unwrap();
        let output_dir = dir.path().join("dist");
        let config = test_parse_config("");

        let err = Generator::new(&config, &FailingSource)
            .run(&output_dir, ALL)
            .unwrap_err();
        assert!(matches!(err, GenerateError::ContentLoad(_)));
        assert!(!output_dir.exists());
    }
}
