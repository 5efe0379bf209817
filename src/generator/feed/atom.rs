//! Atom 1.0 feed serialization.

use super::common::{FeedEntry, FeedMetadata};
use crate::{
    generator::GenerateError,
    utils::{date::DateTimeUtc, mime},
};
use atom_syndication::{
    ContentBuilder, Entry, EntryBuilder, Feed, FeedBuilder, FixedDateTime, GeneratorBuilder, Link,
    LinkBuilder, Person, PersonBuilder, Text, WriteConfig,
};

const FORMAT: &str = "Atom";

/// Serialize entries into an Atom 1.0 document.
///
/// `self_url` is the absolute URL the feed itself is published at.
pub fn to_xml(
    meta: &FeedMetadata,
    entries: &[FeedEntry],
    self_url: &str,
    minify: bool,
) -> Result<Vec<u8>, GenerateError> {
    let feed = build_feed(meta, entries, self_url)?;
    let config = WriteConfig {
        write_document_declaration: true,
        indent_size: (!minify).then_some(2),
    };
    feed.write_with_config(Vec::new(), config)
        .map_err(|e| GenerateError::serialization(FORMAT, e))
}

fn build_feed(
    meta: &FeedMetadata,
    entries: &[FeedEntry],
    self_url: &str,
) -> Result<Feed, GenerateError> {
    let atom_entries = entries
        .iter()
        .map(entry_to_atom)
        .collect::<Result<Vec<_>, _>>()?;

    // Newest entry date; no wall clock so reruns stay byte-identical
    let updated = entries
        .iter()
        .filter_map(|e| e.date)
        .max()
        .unwrap_or(DateTimeUtc::EPOCH);

    let self_link: Link = LinkBuilder::default()
        .href(self_url)
        .rel("self".to_string())
        .mime_type(Some(mime::types::ATOM.to_string()))
        .build();

    let alternate_link: Link = LinkBuilder::default()
        .href(&meta.link)
        .rel("alternate".to_string())
        .build();

    let authors: Vec<Person> = meta
        .author
        .iter()
        .map(|name| PersonBuilder::default().name(name.clone()).build())
        .collect();

    Ok(FeedBuilder::default()
        .title(Text::plain(meta.title.clone()))
        .id(&meta.id)
        .updated(fixed_datetime(updated)?)
        .authors(authors)
        .links(vec![self_link, alternate_link])
        .subtitle(Some(Text::plain(meta.description.clone())))
        .icon(meta.favicon.clone())
        .logo(meta.image.clone())
        .rights(meta.copyright.clone().map(Text::plain))
        .generator(Some(
            GeneratorBuilder::default()
                .value(env!("CARGO_PKG_NAME"))
                .version(Some(env!("CARGO_PKG_VERSION").to_string()))
                .build(),
        ))
        .lang(meta.language.clone())
        .entries(atom_entries)
        .build())
}

fn entry_to_atom(entry: &FeedEntry) -> Result<Entry, GenerateError> {
    // Atom requires both timestamps; undated posts fall back to the epoch
    let date = fixed_datetime(entry.date.unwrap_or(DateTimeUtc::EPOCH))?;

    let mut links = vec![
        LinkBuilder::default()
            .href(&entry.link)
            .rel("alternate".to_string())
            .build(),
    ];
    if let Some(image) = &entry.image {
        links.push(
            LinkBuilder::default()
                .href(image)
                .rel("enclosure".to_string())
                .mime_type(Some(mime::from_url(image).to_string()))
                .build(),
        );
    }

    let authors: Vec<Person> = entry
        .authors
        .iter()
        .map(|author| {
            PersonBuilder::default()
                .name(author.name.clone())
                .uri(author.link.clone())
                .build()
        })
        .collect();

    let content = ContentBuilder::default()
        .value(Some(entry.content.clone()))
        .content_type(Some("html".to_string()))
        .build();

    let summary = (!entry.description.is_empty()).then(|| Text::html(entry.description.clone()));

    Ok(EntryBuilder::default()
        .title(Text::plain(entry.title.clone()))
        .id(&entry.id)
        .updated(date)
        .published(Some(date))
        .links(links)
        .summary(summary)
        .content(Some(content))
        .authors(authors)
        .build())
}

fn fixed_datetime(date: DateTimeUtc) -> Result<FixedDateTime, GenerateError> {
    date.to_rfc3339()
        .parse()
        .map_err(|e| GenerateError::serialization(FORMAT, e))
}
