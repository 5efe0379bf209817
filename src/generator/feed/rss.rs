//! RSS 2.0 feed serialization.

use super::common::{FeedEntry, FeedMetadata};
use crate::{
    debug,
    generator::GenerateError,
    utils::{date::DateTimeUtc, mime},
};
use rss::{
    Channel, ChannelBuilder, EnclosureBuilder, GuidBuilder, ImageBuilder, Item, ItemBuilder,
    extension::dublincore::DublinCoreExtensionBuilder, validation::Validate,
};
use std::collections::BTreeMap;

const FORMAT: &str = "RSS";
/// Enclosure size when the real one is unknown; the validator rejects zero.
const UNKNOWN_ENCLOSURE_LENGTH: &str = "1";
const CONTENT_NAMESPACE: &str = "http://purl.org/rss/1.0/modules/content/";

/// Serialize entries into a validated RSS 2.0 document.
pub fn to_xml(
    meta: &FeedMetadata,
    entries: &[FeedEntry],
    minify: bool,
) -> Result<Vec<u8>, GenerateError> {
    let channel = build_channel(meta, entries);

    channel
        .validate()
        .map_err(|e| GenerateError::serialization(FORMAT, e))?;

    let result = if minify {
        channel.write_to(Vec::new())
    } else {
        channel.pretty_write_to(Vec::new(), b' ', 2)
    };
    result.map_err(|e| GenerateError::serialization(FORMAT, e))
}

fn build_channel(meta: &FeedMetadata, entries: &[FeedEntry]) -> Channel {
    // `dc` is declared by the crate itself whenever an item carries creators
    let namespaces = BTreeMap::from([("content".to_string(), CONTENT_NAMESPACE.to_string())]);

    // RSS only allows GIF, JPEG and PNG channel images
    let image = meta
        .image
        .as_deref()
        .filter(|url| {
            let supported = matches!(
                mime::from_url(url),
                mime::types::PNG | mime::types::JPEG | mime::types::GIF
            );
            if !supported {
                debug!("feed"; "skipping RSS channel image `{}`: not gif/jpeg/png", url);
            }
            supported
        })
        .map(|url| {
            ImageBuilder::default()
                .url(url)
                .title(&meta.title)
                .link(&meta.link)
                .build()
        });

    ChannelBuilder::default()
        .title(&meta.title)
        .link(&meta.link)
        .description(&meta.description)
        .language(meta.language.clone())
        .copyright(meta.copyright.clone())
        .image(image)
        .generator(concat!(env!("CARGO_PKG_NAME"), " ", env!("CARGO_PKG_VERSION")).to_string())
        .namespaces(namespaces)
        .items(entries.iter().map(entry_to_item).collect::<Vec<_>>())
        .build()
}

fn entry_to_item(entry: &FeedEntry) -> Item {
    let dublin_core = (!entry.authors.is_empty()).then(|| {
        DublinCoreExtensionBuilder::default()
            .creators(entry.authors.iter().map(|a| a.name.clone()).collect::<Vec<_>>())
            .build()
    });

    let enclosure = entry.image.as_ref().map(|url| {
        EnclosureBuilder::default()
            .url(url)
            .length(UNKNOWN_ENCLOSURE_LENGTH)
            .mime_type(mime::from_url(url))
            .build()
    });

    ItemBuilder::default()
        .title(entry.title.clone())
        .link(entry.link.clone())
        .guid(
            GuidBuilder::default()
                .permalink(true)
                .value(&entry.id)
                .build(),
        )
        .description((!entry.description.is_empty()).then(|| entry.description.clone()))
        .content(entry.content.clone())
        .pub_date(entry.date.map(DateTimeUtc::to_rfc2822))
        .dublin_core_ext(dublin_core)
        .enclosure(enclosure)
        .build()
}
