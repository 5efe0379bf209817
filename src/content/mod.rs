//! Post loading.
//!
//! Generators only see [`ContentSource`]; the markdown loader is one
//! implementation of it, in-memory post lists are another.

mod error;
mod frontmatter;
mod markdown;
mod post;
mod render;

pub use error::ContentError;
pub use markdown::MarkdownSource;
pub use post::PostRecord;

/// Anything that can enumerate the blog's published posts.
pub trait ContentSource {
    /// Posts in the source's enumeration order.
    fn list_posts(&self) -> Result<Vec<PostRecord>, ContentError>;
}

impl ContentSource for Vec<PostRecord> {
    fn list_posts(&self) -> Result<Vec<PostRecord>, ContentError> {
        Ok(self.clone())
    }
}
