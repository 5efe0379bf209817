//! Feed generation (RSS, Atom, JSON Feed).
//!
//! Generates syndication feeds from post metadata:
//!
//! - **RSS 2.0**: Standard feed format (`feed.rss`)
//! - **Atom 1.0**: Modern feed format (`feed.atom`)
//! - **JSON Feed 1.0**: JSON equivalent (`feed.json`)
//!
//! All three carry the same entries in the same order: newest first,
//! undated posts last.

pub mod atom;
mod common;
pub mod json;
pub mod rss;

pub(super) use common::sort_posts;

use super::{GenerateError, Output, write_outputs};
use crate::{config::SiteConfig, content::PostRecord, log};
use common::{FeedEntry, FeedMetadata};
use std::path::{Path, PathBuf};

/// Outcome of [`generate_feeds`].
#[derive(Debug)]
pub struct FeedReport {
    /// Entries per feed.
    pub entries: usize,
    /// Written files, in rss, atom, json order.
    pub files: Vec<PathBuf>,
}

/// Generate every feed into `output_dir`.
///
/// All three documents are serialized before the first write, so a
/// serialization failure leaves the output directory untouched.
pub fn generate_feeds(
    config: &SiteConfig,
    output_dir: &Path,
    posts: &[PostRecord],
) -> Result<FeedReport, GenerateError> {
    let mut posts = posts.to_vec();
    sort_posts(&mut posts);

    let meta = FeedMetadata::from_config(config);
    let entries: Vec<FeedEntry> = posts
        .iter()
        .map(|post| FeedEntry::from_post(post, &meta.link))
        .collect();

    let feed = &config.feed;
    let outputs = [
        Output {
            path: feed.rss.clone(),
            bytes: rss::to_xml(&meta, &entries, feed.minify)?,
        },
        Output {
            path: feed.atom.clone(),
            bytes: atom::to_xml(&meta, &entries, &meta.url_of(&feed.atom), feed.minify)?,
        },
        Output {
            path: feed.json.clone(),
            bytes: json::to_json(&meta, &entries, &meta.url_of(&feed.json), feed.minify)?,
        },
    ];

    let files = write_outputs(output_dir, &outputs)?;
    log!(
        "feed";
        "{} entries -> {}",
        entries.len(),
        outputs
            .iter()
            .map(|o| o.path.display().to_string())
            .collect::<Vec<_>>()
            .join(", ")
    );

    Ok(FeedReport {
        entries: entries.len(),
        files,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        config::test_parse_config, generator::tests::post, utils::date::DateTimeUtc,
    };
    use std::fs;
    use tempfile::TempDir;

    fn read(dir: &TempDir, name: &str) -> String {
        fs::read_to_string(dir.path().join(name)).unwrap()
    }

    fn rss_titles(dir: &TempDir) -> Vec<String> {
        let channel = ::rss::Channel::read_from(read(dir, "feed.rss").as_bytes()).unwrap();
        channel
            .items()
            .iter()
            .map(|i| i.title().unwrap_or_default().to_string())
            .collect()
    }

    fn atom_titles(dir: &TempDir) -> Vec<String> {
        let feed = ::atom_syndication::Feed::read_from(read(dir, "feed.atom").as_bytes()).unwrap();
        feed.entries()
            .iter()
            .map(|e| e.title().as_str().to_string())
            .collect()
    }

    fn json_feed(dir: &TempDir, name: &str) -> serde_json::Value {
        serde_json::from_str(&read(dir, name)).unwrap()
    }

    fn json_titles(dir: &TempDir) -> Vec<String> {
        json_feed(dir, "feed.json")["items"]
            .as_array()
            .unwrap()
            .iter()
            .map(|i| i["title"].as_str().unwrap().to_string())
            .collect()
    }

    #[test]
    fn test_scenario_newest_first() {
        let dir = TempDir::new().unwrap();
        let config = test_parse_config("");
        let posts = [
            post("a", "A", Some(DateTimeUtc::from_ymd(2024, 1, 1))),
            post("b", "B", Some(DateTimeUtc::from_ymd(2024, 2, 1))),
        ];

        let report = generate_feeds(&config, dir.path(), &posts).unwrap();
        assert_eq!(report.entries, 2);
        assert_eq!(
            report.files,
            ["feed.rss", "feed.atom", "feed.json"].map(|n| dir.path().join(n))
        );

        for titles in [rss_titles(&dir), atom_titles(&dir), json_titles(&dir)] {
            assert_eq!(titles, ["B", "A"]);
        }

        let json = json_feed(&dir, "feed.json");
        assert_eq!(json["feed_url"], "https://example.com/feed.json");
        assert_eq!(json["items"][0]["id"], "https://example.com/posts/b");
        assert_eq!(json["items"][0]["date_published"], "2024-02-01T00:00:00Z");
    }

    #[test]
    fn test_undated_posts_last() {
        let dir = TempDir::new().unwrap();
        let config = test_parse_config("");
        let posts = [
            post("draft", "Draft", None),
            post("old", "Old", Some(DateTimeUtc::from_ymd(2023, 5, 1))),
            post("new", "New", Some(DateTimeUtc::from_ymd(2024, 5, 1))),
        ];

        generate_feeds(&config, dir.path(), &posts).unwrap();
        for titles in [rss_titles(&dir), atom_titles(&dir), json_titles(&dir)] {
            assert_eq!(titles, ["New", "Old", "Draft"]);
        }
    }

    #[test]
    fn test_zero_posts_give_empty_feeds() {
        let dir = TempDir::new().unwrap();
        let config = test_parse_config("");

        let report = generate_feeds(&config, dir.path(), &[]).unwrap();
        assert_eq!(report.entries, 0);
        assert!(rss_titles(&dir).is_empty());
        assert!(atom_titles(&dir).is_empty());
        assert!(json_titles(&dir).is_empty());
    }

    #[test]
    fn test_zero_width_space_removed() {
        let dir = TempDir::new().unwrap();
        let config = test_parse_config("");
        let posts = [post("a", "A", None)];

        generate_feeds(&config, dir.path(), &posts).unwrap();
        for name in ["feed.rss", "feed.atom", "feed.json"] {
            let text = read(&dir, name);
            assert!(!text.contains('\u{200B}'), "{name}");
            assert!(!text.contains("ZeroWidthSpace"), "{name}");
        }
    }

    #[test]
    fn test_rerun_is_byte_identical() {
        let dir = TempDir::new().unwrap();
        let config = test_parse_config("");
        let posts = [
            post("a", "A", Some(DateTimeUtc::from_ymd(2024, 1, 1))),
            post("b", "B", None),
        ];

        generate_feeds(&config, dir.path(), &posts).unwrap();
        let first: Vec<_> = ["feed.rss", "feed.atom", "feed.json"]
            .map(|n| read(&dir, n))
            .into();
        generate_feeds(&config, dir.path(), &posts).unwrap();
        let second: Vec<_> = ["feed.rss", "feed.atom", "feed.json"]
            .map(|n| read(&dir, n))
            .into();
        assert_eq!(first, second);
    }

    #[test]
    fn test_custom_paths() {
        let dir = TempDir::new().unwrap();
        let config = test_parse_config(
            "[feed]\nrss = \"feeds/rss.xml\"\natom = \"feeds/atom.xml\"\njson = \"feeds/feed.json\"",
        );

        generate_feeds(&config, dir.path(), &[post("a", "A", None)]).unwrap();
        assert!(dir.path().join("feeds/rss.xml").is_file());
        assert!(dir.path().join("feeds/atom.xml").is_file());
        assert_eq!(
            json_feed(&dir, "feeds/feed.json")["feed_url"],
            "https://example.com/feeds/feed.json"
        );
    }

    #[test]
    fn test_dates_round_trip_in_every_format() {
        let dir = TempDir::new().unwrap();
        let config = test_parse_config("");
        let posts = [
            post("a", "A", Some(DateTimeUtc::new(2024, 1, 1, 8, 15, 0))),
            post("draft", "Draft", None),
            post("b", "B", Some(DateTimeUtc::from_ymd(2024, 2, 1))),
        ];
        // newest first, undated last
        let expected = [&posts[2], &posts[0], &posts[1]];

        generate_feeds(&config, dir.path(), &posts).unwrap();

        let json = json_feed(&dir, "feed.json");
        let items = json["items"].as_array().unwrap();
        assert_eq!(items.len(), expected.len());
        for (item, post) in items.iter().zip(expected) {
            assert_eq!(item["title"], post.title.as_str());
            match post.date {
                Some(date) => assert_eq!(item["date_published"], date.to_rfc3339().as_str()),
                None => assert!(item.get("date_published").is_none(), "{}", post.title),
            }
        }

        let channel = ::rss::Channel::read_from(read(&dir, "feed.rss").as_bytes()).unwrap();
        assert_eq!(channel.items().len(), expected.len());
        for (item, post) in channel.items().iter().zip(expected) {
            assert_eq!(item.title(), Some(post.title.as_str()));
            assert_eq!(
                item.pub_date(),
                post.date.map(DateTimeUtc::to_rfc2822).as_deref()
            );
        }

        let feed = ::atom_syndication::Feed::read_from(read(&dir, "feed.atom").as_bytes()).unwrap();
        assert_eq!(feed.entries().len(), expected.len());
        for (entry, post) in feed.entries().iter().zip(expected) {
            assert_eq!(entry.title().as_str(), post.title);
            let timestamp = post.date.map_or(0, DateTimeUtc::unix_timestamp);
            assert_eq!(entry.updated().timestamp(), timestamp);
            assert_eq!(entry.published().map(|d| d.timestamp()), Some(timestamp));
        }
    }

    #[test]
    fn test_hero_images_become_enclosures() {
        let dir = TempDir::new().unwrap();
        let config = test_parse_config("");
        let posts = [
            PostRecord {
                hero_image: Some("https://cdn.example.com/hero.png".into()),
                ..post("a", "A", Some(DateTimeUtc::from_ymd(2024, 2, 1)))
            },
            PostRecord {
                hero_image: Some("/images/hero.jpg".into()),
                ..post("b", "B", Some(DateTimeUtc::from_ymd(2024, 1, 1)))
            },
        ];
        let expected = [
            "https://cdn.example.com/hero.png",
            "https://example.com/images/hero.jpg",
        ];

        let report = generate_feeds(&config, dir.path(), &posts).unwrap();
        assert_eq!(report.entries, 2);

        let channel = ::rss::Channel::read_from(read(&dir, "feed.rss").as_bytes()).unwrap();
        let enclosures: Vec<_> = channel
            .items()
            .iter()
            .map(|i| i.enclosure().unwrap().url().to_string())
            .collect();
        assert_eq!(enclosures, expected);

        let feed = ::atom_syndication::Feed::read_from(read(&dir, "feed.atom").as_bytes()).unwrap();
        let links: Vec<_> = feed
            .entries()
            .iter()
            .map(|e| {
                let link = e.links().iter().find(|l| l.rel() == "enclosure").unwrap();
                link.href().to_string()
            })
            .collect();
        assert_eq!(links, expected);

        let json = json_feed(&dir, "feed.json");
        assert_eq!(json["items"][0]["image"], expected[0]);
        assert_eq!(json["items"][1]["image"], expected[1]);
    }

    #[test]
    fn test_serialization_failure_writes_nothing() {
        let dir = TempDir::new().unwrap();
        let output_dir = dir.path().join("dist");
        let mut config = test_parse_config("");
        // the RSS validator rejects a channel link that is not a URL
        config.site.url = Some("not a url".into());

        let err = generate_feeds(&config, &output_dir, &[post("a", "A", None)]).unwrap_err();
        assert!(matches!(err, GenerateError::Serialization { format: "RSS", .. }));
        assert!(!output_dir.exists());
    }
}
