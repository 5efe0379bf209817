//! JSON Feed 1.0 serialization.

use super::common::{FeedEntry, FeedMetadata};
use crate::{generator::GenerateError, utils::date::DateTimeUtc};
use serde::Serialize;

const FORMAT: &str = "JSON Feed";
const VERSION: &str = "https://jsonfeed.org/version/1";

#[derive(Debug, Serialize)]
struct JsonFeed<'a> {
    version: &'static str,
    title: &'a str,
    home_page_url: &'a str,
    feed_url: &'a str,
    description: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    icon: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    favicon: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    author: Option<JsonAuthor<'a>>,
    items: Vec<JsonItem<'a>>,
}

#[derive(Debug, Serialize)]
struct JsonAuthor<'a> {
    name: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    url: Option<&'a str>,
}

#[derive(Debug, Serialize)]
struct JsonItem<'a> {
    id: &'a str,
    url: &'a str,
    title: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    summary: Option<&'a str>,
    content_html: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    image: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    date_published: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    author: Option<JsonAuthor<'a>>,
}

impl<'a> JsonItem<'a> {
    fn from_entry(entry: &'a FeedEntry) -> Self {
        // JSON Feed 1.0 only has room for a single author
        let author = entry.authors.first().map(|author| JsonAuthor {
            name: &author.name,
            url: author.link.as_deref(),
        });

        Self {
            id: &entry.id,
            url: &entry.link,
            title: &entry.title,
            summary: (!entry.description.is_empty()).then_some(entry.description.as_str()),
            content_html: &entry.content,
            image: entry.image.as_deref(),
            date_published: entry.date.map(DateTimeUtc::to_rfc3339),
            author,
        }
    }
}

/// Serialize entries into a JSON Feed 1.0 document published at `feed_url`.
pub fn to_json(
    meta: &FeedMetadata,
    entries: &[FeedEntry],
    feed_url: &str,
    minify: bool,
) -> Result<Vec<u8>, GenerateError> {
    let feed = JsonFeed {
        version: VERSION,
        title: &meta.title,
        home_page_url: &meta.link,
        feed_url,
        description: &meta.description,
        icon: meta.image.as_deref(),
        favicon: meta.favicon.as_deref(),
        author: meta.author.as_deref().map(|name| JsonAuthor { name, url: None }),
        items: entries.iter().map(JsonItem::from_entry).collect(),
    };

    let result = if minify {
        serde_json::to_vec(&feed)
    } else {
        serde_json::to_vec_pretty(&feed)
    };
    result.map_err(|e| GenerateError::serialization(FORMAT, e))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::generator::feed::common::FeedAuthor;
    use serde_json::Value;

    const FEED_URL: &str = "https://example.com/feed.json";

    fn meta() -> FeedMetadata {
        FeedMetadata {
            title: "Engineering".into(),
            description: "How we build things".into(),
            id: "https://example.com".into(),
            link: "https://example.com".into(),
            language: "en".into(),
            image: None,
            favicon: Some("https://example.com/favicon.ico".into()),
            copyright: None,
            author: None,
        }
    }

    fn entry(slug: &str, date: Option<DateTimeUtc>) -> FeedEntry {
        let link = format!("https://example.com/posts/{slug}");
        FeedEntry {
            title: slug.to_uppercase(),
            id: link.clone(),
            link,
            description: String::new(),
            content: "<p>Body</p>".into(),
            authors: Vec::new(),
            date,
            image: None,
        }
    }

    fn parse(bytes: &[u8]) -> Value {
        serde_json::from_slice(bytes).unwrap()
    }

    #[test]
    fn test_top_level_fields() {
        let json = parse(&to_json(&meta(), &[], FEED_URL, false).unwrap());

        assert_eq!(json["version"], VERSION);
        assert_eq!(json["title"], "Engineering");
        assert_eq!(json["home_page_url"], "https://example.com");
        assert_eq!(json["feed_url"], FEED_URL);
        assert_eq!(json["description"], "How we build things");
        assert_eq!(json["favicon"], "https://example.com/favicon.ico");
        assert!(json.get("icon").is_none());
        assert!(json.get("author").is_none());
        assert_eq!(json["items"], Value::Array(Vec::new()));
    }

    #[test]
    fn test_items_keep_order_titles_and_dates() {
        let entries = [
            entry("b", Some(DateTimeUtc::new(2024, 2, 1, 8, 0, 0))),
            entry("a", Some(DateTimeUtc::from_ymd(2024, 1, 1))),
            entry("undated", None),
        ];
        let json = parse(&to_json(&meta(), &entries, FEED_URL, false).unwrap());
        let items = json["items"].as_array().unwrap();

        assert_eq!(items.len(), 3);
        let titles: Vec<_> = items.iter().map(|i| i["title"].as_str().unwrap()).collect();
        assert_eq!(titles, ["B", "A", "UNDATED"]);
        assert_eq!(items[0]["date_published"], "2024-02-01T08:00:00Z");
        assert_eq!(items[1]["date_published"], "2024-01-01T00:00:00Z");
        assert!(items[2].get("date_published").is_none());
        assert_eq!(items[0]["id"], items[0]["url"]);
    }

    #[test]
    fn test_optional_item_fields() {
        let full = FeedEntry {
            description: "<p>Short</p>".into(),
            image: Some("https://example.com/hero.png".into()),
            authors: vec![FeedAuthor {
                name: "Jane Doe".into(),
                link: Some("https://twitter.com/jane".into()),
            }],
            ..entry("a", None)
        };
        let json = parse(&to_json(&meta(), &[full, entry("b", None)], FEED_URL, false).unwrap());
        let items = json["items"].as_array().unwrap();

        assert_eq!(items[0]["summary"], "<p>Short</p>");
        assert_eq!(items[0]["content_html"], "<p>Body</p>");
        assert_eq!(items[0]["image"], "https://example.com/hero.png");
        assert_eq!(items[0]["author"]["name"], "Jane Doe");
        assert_eq!(items[0]["author"]["url"], "https://twitter.com/jane");

        for key in ["summary", "image", "author"] {
            assert!(items[1].get(key).is_none(), "{key} should be omitted");
        }
    }

    #[test]
    fn test_minify() {
        let entries = [entry("a", None)];
        let pretty = to_json(&meta(), &entries, FEED_URL, false).unwrap();
        let compact = to_json(&meta(), &entries, FEED_URL, true).unwrap();

        assert!(!compact.contains(&b'\n'));
        assert!(pretty.contains(&b'\n'));
        assert_eq!(parse(&compact), parse(&pretty));
    }
}
