//! Front-matter extraction from YAML-like (`---`) or TOML (`+++`) blocks.

use super::error::FrontMatterError;
use serde::{Deserialize, Deserializer, de};

/// Metadata recognized in a post's front-matter. Unknown keys are ignored.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct PostMeta {
    pub title: Option<String>,
    /// Raw date string, parsed later so that a bad date never fails the load.
    #[serde(deserialize_with = "deserialize_date")]
    pub date: Option<String>,
    pub author: Option<String>,
    pub twitter: Option<String>,
    pub image: Option<String>,
    pub description: Option<String>,
    pub summary: Option<String>,
}

impl PostMeta {
    /// Excerpt used when the body has no `---` separator.
    pub fn excerpt_fallback(&self) -> Option<&str> {
        self.description
            .as_deref()
            .or(self.summary.as_deref())
            .filter(|s| !s.trim().is_empty())
    }

    /// Parse simple YAML-like frontmatter (key: value).
    fn parse_yaml_like(content: &str) -> Self {
        let mut meta = Self::default();

        for line in content.lines() {
            let line = line.trim();
            if line.is_empty() || line.starts_with('#') {
                continue;
            }

            let Some((key, value)) = line.split_once(':') else {
                continue;
            };
            let value = unquote(value.trim());
            if value.is_empty() {
                continue;
            }
            let value = Some(value.to_string());

            match key.trim().to_lowercase().as_str() {
                "title" => meta.title = value,
                "date" => meta.date = value,
                "author" => meta.author = value,
                "twitter" => meta.twitter = value,
                "image" => meta.image = value,
                "description" => meta.description = value,
                "summary" => meta.summary = value,
                _ => {}
            }
        }

        meta
    }
}

/// Accept both TOML strings and native TOML datetimes.
fn deserialize_date<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    match Option::<toml::Value>::deserialize(deserializer)? {
        None => Ok(None),
        Some(toml::Value::String(s)) => Ok(Some(s)),
        Some(toml::Value::Datetime(dt)) => Ok(Some(dt.to_string())),
        Some(other) => Err(de::Error::custom(format!(
            "expected a date, found {}",
            other.type_str()
        ))),
    }
}

fn unquote(value: &str) -> &str {
    for quote in ['"', '\''] {
        if let Some(inner) = value
            .strip_prefix(quote)
            .and_then(|v| v.strip_suffix(quote))
        {
            return inner;
        }
    }
    value
}

/// Split `content` into metadata and body.
///
/// Content without a front-matter block yields default metadata and the
/// whole input as body.
pub fn extract(content: &str) -> Result<(PostMeta, &str), FrontMatterError> {
    if let Some((block, body)) = split_block(content, "---")? {
        return Ok((PostMeta::parse_yaml_like(block), body));
    }
    if let Some((block, body)) = split_block(content, "+++")? {
        return Ok((toml::from_str(block)?, body));
    }
    Ok((PostMeta::default(), content))
}

/// Find a block opened and closed by `fence` on lines of their own.
fn split_block<'a>(
    content: &'a str,
    fence: &'static str,
) -> Result<Option<(&'a str, &'a str)>, FrontMatterError> {
    let trimmed = content.trim_start_matches('\u{feff}').trim_start();
    let Some(rest) = trimmed.strip_prefix(fence).and_then(strip_line_end) else {
        return Ok(None);
    };

    let mut offset = 0;
    for line in rest.split_inclusive('\n') {
        if line.trim_end() == fence {
            let block = &rest[..offset];
            let body = &rest[offset + line.len()..];
            return Ok(Some((block, body)));
        }
        offset += line.len();
    }

    Err(FrontMatterError::Unterminated(fence))
}

fn strip_line_end(s: &str) -> Option<&str> {
    let s = s.trim_start_matches([' ', '\t']);
    s.strip_prefix("\r\n").or_else(|| s.strip_prefix('\n'))
}
