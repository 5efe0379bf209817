//! Content loading errors.

use std::path::PathBuf;
use thiserror::Error;

/// Failure to turn the posts directory into post records.
#[derive(Debug, Error)]
pub enum ContentError {
    #[error("cannot read posts directory `{}`", path.display())]
    ReadDir {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("cannot read post `{}`", path.display())]
    ReadFile {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("malformed front-matter in `{}`", path.display())]
    FrontMatter {
        path: PathBuf,
        #[source]
        source: FrontMatterError,
    },
}

/// Front-matter block that cannot be parsed.
#[derive(Debug, Error)]
pub enum FrontMatterError {
    #[error("invalid TOML front-matter")]
    Toml(#[from] toml::de::Error),

    #[error("front-matter opened with `{0}` is never closed")]
    Unterminated(&'static str),
}
