//! Sitemap generation.
//!
//! Generates a sitemap.xml file listing static routes and posts for search
//! engine indexing.
//!
//! # Sitemap Format
//!
//! ```xml
//! <?xml version="1.0" encoding="UTF-8"?>
//! <urlset xmlns="http://www.sitemaps.org/schemas/sitemap/0.9">
//!   <url>
//!     <loc>https://example.com/</loc>
//!     <changefreq>daily</changefreq>
//!     <priority>1.0</priority>
//!   </url>
//! </urlset>
//! ```

use super::{GenerateError, Output, feed::sort_posts, write_outputs};
use crate::{
    config::{ChangeFreq, SiteConfig, SitemapOrder},
    content::PostRecord,
    log,
    utils::date::DateTimeUtc,
};
use quick_xml::{
    Writer,
    events::{BytesDecl, BytesEnd, BytesStart, BytesText, Event},
};
use std::{
    io,
    path::{Path, PathBuf},
};

const FORMAT: &str = "sitemap";
const SITEMAP_NS: &str = "http://www.sitemaps.org/schemas/sitemap/0.9";

/// One `<url>` of the sitemap.
#[derive(Debug, Clone, PartialEq)]
pub struct SitemapEntry {
    /// Site-relative URL, starting with `/`.
    pub url: String,
    pub changefreq: ChangeFreq,
    pub priority: f32,
    pub lastmod: Option<DateTimeUtc>,
}

/// Outcome of [`generate_sitemap`].
#[derive(Debug)]
pub struct SitemapReport {
    pub urls: usize,
    pub path: PathBuf,
}

/// Generate the sitemap into `output_dir`.
///
/// Static routes come first in configuration order, then one entry per post.
pub fn generate_sitemap(
    config: &SiteConfig,
    output_dir: &Path,
    posts: &[PostRecord],
) -> Result<SitemapReport, GenerateError> {
    let entries = collect_entries(config, posts);
    let output = Output {
        path: config.sitemap.path.clone(),
        bytes: to_xml(config.base_url(), &entries)
            .map_err(|e| GenerateError::serialization(FORMAT, e))?,
    };

    let mut written = write_outputs(output_dir, std::slice::from_ref(&output))?;
    log!("sitemap"; "{} urls -> {}", entries.len(), output.path.display());

    Ok(SitemapReport {
        urls: entries.len(),
        path: written.pop().unwrap_or_default(),
    })
}

fn collect_entries(config: &SiteConfig, posts: &[PostRecord]) -> Vec<SitemapEntry> {
    let sitemap = &config.sitemap;

    let mut posts = posts.to_vec();
    if sitemap.order == SitemapOrder::Date {
        sort_posts(&mut posts);
    }

    let routes = sitemap.routes.iter().map(|route| SitemapEntry {
        url: route.url.clone(),
        changefreq: route.changefreq,
        priority: route.priority,
        lastmod: None,
    });

    let posts = posts.into_iter().map(|post| SitemapEntry {
        url: post.url,
        changefreq: sitemap.changefreq,
        priority: sitemap.priority,
        lastmod: post.date.filter(|_| sitemap.lastmod),
    });

    routes.chain(posts).collect()
}

fn to_xml(base_url: &str, entries: &[SitemapEntry]) -> io::Result<Vec<u8>> {
    let mut writer = Writer::new_with_indent(Vec::new(), b' ', 2);

    writer.write_event(Event::Decl(BytesDecl::new("1.0", Some("UTF-8"), None)))?;
    writer.write_event(Event::Start(
        BytesStart::new("urlset").with_attributes([("xmlns", SITEMAP_NS)]),
    ))?;

    for entry in entries {
        writer.write_event(Event::Start(BytesStart::new("url")))?;
        write_text_element(&mut writer, "loc", &format!("{}{}", base_url, entry.url))?;
        if let Some(lastmod) = entry.lastmod {
            write_text_element(&mut writer, "lastmod", &lastmod.to_date_string())?;
        }
        write_text_element(&mut writer, "changefreq", entry.changefreq.as_str())?;
        write_text_element(&mut writer, "priority", &format_priority(entry.priority))?;
        writer.write_event(Event::End(BytesEnd::new("url")))?;
    }

    writer.write_event(Event::End(BytesEnd::new("urlset")))?;

    let mut xml = writer.into_inner();
    xml.push(b'\n');
    Ok(xml)
}

/// Shortest form of the configured value, with at least one decimal: `1.0`, `0.85`.
fn format_priority(priority: f32) -> String {
    let mut text = priority.to_string();
    if !text.contains('.') {
        text.push_str(".0");
    }
    text
}

fn write_text_element(writer: &mut Writer<Vec<u8>>, name: &str, text: &str) -> io::Result<()> {
    writer.write_event(Event::Start(BytesStart::new(name)))?;
    writer.write_event(Event::Text(BytesText::new(text)))?;
    writer.write_event(Event::End(BytesEnd::new(name)))
}
