//! MIME type detection for feed enclosures.

/// Common MIME type constants.
pub mod types {
    // Web feeds
    pub const RSS: &str = "application/rss+xml";
    pub const ATOM: &str = "application/atom+xml";

    // Binary
    pub const OCTET_STREAM: &str = "application/octet-stream";

    // Images
    pub const PNG: &str = "image/png";
    pub const JPEG: &str = "image/jpeg";
    pub const GIF: &str = "image/gif";
    pub const WEBP: &str = "image/webp";
    pub const AVIF: &str = "image/avif";
    pub const SVG: &str = "image/svg+xml";
    pub const ICO: &str = "image/x-icon";
    pub const BMP: &str = "image/bmp";
}

/// Guess MIME type from the file extension of a URL.
///
/// Query strings and fragments are ignored, as is letter case.
pub fn from_url(url: &str) -> &'static str {
    let path = url.split(['?', '#']).next().unwrap_or_default();
    let file = path.rsplit('/').next().unwrap_or_default();
    let ext = file
        .rsplit_once('.')
        .map(|(_, ext)| ext.to_ascii_lowercase());
    from_extension(ext.as_deref())
}

/// Guess MIME type from file extension string.
pub fn from_extension(ext: Option<&str>) -> &'static str {
    match ext {
        Some("svg") => types::SVG,
        Some("png") => types::PNG,
        Some("jpg" | "jpeg") => types::JPEG,
        Some("gif") => types::GIF,
        Some("webp") => types::WEBP,
        Some("avif") => types::AVIF,
        Some("ico") => types::ICO,
        Some("bmp") => types::BMP,
        Some("rss") => types::RSS,
        Some("atom") => types::ATOM,
        _ => types::OCTET_STREAM,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_url() {
        assert_eq!(from_url("https://example.com/images/logo.svg"), types::SVG);
        assert_eq!(from_url("https://example.com/hero.JPG"), types::JPEG);
        assert_eq!(from_url("https://cdn.example.com/a.png?w=800#x"), types::PNG);
        assert_eq!(from_url("/relative/cover.webp"), types::WEBP);
    }

    #[test]
    fn test_from_url_unknown() {
        assert_eq!(from_url("https://example.com/image"), types::OCTET_STREAM);
        assert_eq!(from_url("https://example.com/"), types::OCTET_STREAM);
        assert_eq!(from_url("https://example.com/file.xyz"), types::OCTET_STREAM);
    }
}
