//! Config field path used in diagnostics.

use owo_colors::OwoColorize;
use std::fmt;

/// A dotted path to a field in `blog.toml`, e.g. `site.url`.
///
/// Each section declares its paths as associated constants so that
/// diagnostics never carry free-form field names:
///
/// ```ignore
/// diag.error(SiteInfoConfig::URL, "required");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FieldPath(pub &'static str);

impl FieldPath {
    #[inline]
    pub const fn new(path: &'static str) -> Self {
        Self(path)
    }

    #[inline]
    pub const fn as_str(&self) -> &'static str {
        self.0
    }
}

impl fmt::Display for FieldPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", format_args!("`{}`", self.0).bright_blue())
    }
}
