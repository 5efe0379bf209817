//! Markdown posts directory as a content source.

use super::{
    ContentSource, PostRecord,
    error::ContentError,
    frontmatter::{self, PostMeta},
    render::{escape_html, render_markdown, split_excerpt},
};
use crate::{config::SiteConfig, debug, log, utils::date::DateTimeUtc};
use rayon::prelude::*;
use std::{
    fs,
    path::{Path, PathBuf},
};

/// Loads `*.md` files directly under a directory.
#[derive(Debug, Clone)]
pub struct MarkdownSource {
    posts_dir: PathBuf,
    route: String,
}

impl MarkdownSource {
    pub fn new(posts_dir: impl Into<PathBuf>, route: impl Into<String>) -> Self {
        Self {
            posts_dir: posts_dir.into(),
            route: route.into(),
        }
    }

    pub fn from_config(config: &SiteConfig) -> Self {
        Self::new(config.posts_dir(), config.content.route.clone())
    }

    /// Markdown files in file-name order. Subdirectories are not descended.
    fn collect_files(&self) -> Result<Vec<PathBuf>, ContentError> {
        let read_dir_err = |source| ContentError::ReadDir {
            path: self.posts_dir.clone(),
            source,
        };

        let mut files = Vec::new();
        for entry in fs::read_dir(&self.posts_dir).map_err(read_dir_err)? {
            let path = entry.map_err(read_dir_err)?.path();
            if path.is_file() && path.extension().is_some_and(|ext| ext == "md") {
                files.push(path);
            }
        }
        files.sort();
        Ok(files)
    }

    fn load_post(&self, path: &Path) -> Result<PostRecord, ContentError> {
        let content = fs::read_to_string(path).map_err(|source| ContentError::ReadFile {
            path: path.to_path_buf(),
            source,
        })?;
        let (meta, body) =
            frontmatter::extract(&content).map_err(|source| ContentError::FrontMatter {
                path: path.to_path_buf(),
                source,
            })?;

        let name = path
            .file_name()
            .map(|n| n.to_string_lossy())
            .unwrap_or_default();
        let stem = path
            .file_stem()
            .map(|s| s.to_string_lossy())
            .unwrap_or_default();
        let url = format!("{}/{}", self.route.trim_end_matches('/'), stem);

        if meta.title.is_none() {
            log!("content"; "{}: missing title", name);
        }
        let date = parse_date(&meta, &name);

        let (excerpt_src, body) = split_excerpt(body);
        let excerpt = match excerpt_src {
            Some(src) => render_markdown(src),
            None => meta.excerpt_fallback().map(escape_html).unwrap_or_default(),
        };

        debug!("content"; "{} -> {}", name, url);

        Ok(PostRecord {
            url,
            title: meta.title.unwrap_or_default(),
            excerpt,
            rendered_html: render_markdown(&body),
            date,
            author: meta.author,
            author_social_handle: meta.twitter,
            hero_image: meta.image,
        })
    }
}

/// Missing or unparseable dates leave the post undated.
fn parse_date(meta: &PostMeta, name: &str) -> Option<DateTimeUtc> {
    let Some(raw) = meta.date.as_deref() else {
        debug!("content"; "{}: no date, sorted after dated posts", name);
        return None;
    };
    let date = DateTimeUtc::parse(raw);
    if date.is_none() {
        log!("content"; "{}: unparseable date `{}`, treating as undated", name, raw);
    }
    date
}

impl ContentSource for MarkdownSource {
    fn list_posts(&self) -> Result<Vec<PostRecord>, ContentError> {
        let files = self.collect_files()?;

        // collect() keeps input order
        let posts = files
            .par_iter()
            .map(|path| self.load_post(path))
            .collect::<Result<Vec<_>, _>>()?;

        debug!("content"; "loaded {} posts from {}", posts.len(), self.posts_dir.display());
        Ok(posts)
    }
}
