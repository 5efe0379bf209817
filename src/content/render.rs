//! Markdown to HTML rendering using pulldown-cmark.
//!
//! Headings get a slug `id` and a trailing permalink anchor in the same
//! shape the site renderer produces:
//!
//! ```html
//! <h2 id="getting-started">Getting started<a class="header-anchor" href="#getting-started"
//!     aria-label="Permalink to &quot;Getting started&quot;">&ZeroWidthSpace;</a></h2>
//! ```

use pulldown_cmark::{CowStr, Event, Options, Parser, Tag, TagEnd};
use regex::Regex;
use std::{collections::HashMap, sync::LazyLock};

/// Separator line between a post's excerpt and the rest of its body.
static RE_EXCERPT_SEPARATOR: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?m)^---[ \t]*\r?$").unwrap());

/// Extensions the blog's markdown relies on.
fn options() -> Options {
    Options::ENABLE_TABLES
        | Options::ENABLE_FOOTNOTES
        | Options::ENABLE_STRIKETHROUGH
        | Options::ENABLE_TASKLISTS
        | Options::ENABLE_HEADING_ATTRIBUTES
}

/// Render a markdown string to HTML.
pub fn render_markdown(markdown: &str) -> String {
    let parser = Parser::new_ext(markdown, options());
    let events = with_header_anchors(parser);

    let mut html = String::with_capacity(markdown.len() * 3 / 2);
    pulldown_cmark::html::push_html(&mut html, events.into_iter());
    html
}

/// Split a body at its excerpt separator.
///
/// Returns `(excerpt, body_without_separator)`; the excerpt is `None` when
/// there is no separator line.
pub fn split_excerpt(body: &str) -> (Option<&str>, String) {
    match RE_EXCERPT_SEPARATOR.find(body) {
        Some(m) => {
            let head = &body[..m.start()];
            let tail = &body[m.end()..];
            (Some(head), format!("{head}\n{tail}"))
        }
        None => (None, body.to_string()),
    }
}

/// Give every heading an id and append the permalink anchor.
fn with_header_anchors<'a>(parser: Parser<'a>) -> Vec<Event<'a>> {
    let mut events = Vec::new();
    let mut slugs = SlugCounter::default();
    let mut heading: Option<(Tag<'a>, Vec<Event<'a>>)> = None;

    for event in parser {
        match event {
            Event::Start(tag @ Tag::Heading { .. }) => heading = Some((tag, Vec::new())),
            Event::End(TagEnd::Heading(level)) => {
                let Some((tag, inner)) = heading.take() else {
                    continue;
                };
                let Tag::Heading {
                    id, classes, attrs, ..
                } = tag
                else {
                    continue;
                };

                let text = plain_text(&inner);
                let slug = match id {
                    Some(id) => id.to_string(),
                    None => slugs.unique(&slugify(&text)),
                };
                let anchor = format!(
                    "<a class=\"header-anchor\" href=\"#{slug}\" aria-label=\"Permalink to &quot;{}&quot;\">&ZeroWidthSpace;</a>",
                    escape_html(&text)
                );

                events.push(Event::Start(Tag::Heading {
                    level,
                    id: Some(CowStr::from(slug)),
                    classes,
                    attrs,
                }));
                events.extend(inner);
                events.push(Event::InlineHtml(CowStr::from(anchor)));
                events.push(Event::End(TagEnd::Heading(level)));
            }
            event => match heading.as_mut() {
                Some((_, inner)) => inner.push(event),
                None => events.push(event),
            },
        }
    }

    events
}

/// Text content of a heading, without markup.
fn plain_text(events: &[Event<'_>]) -> String {
    let mut text = String::new();
    for event in events {
        match event {
            Event::Text(t) | Event::Code(t) => text.push_str(t),
            Event::SoftBreak | Event::HardBreak => text.push(' '),
            _ => {}
        }
    }
    text.trim().to_string()
}

/// ASCII slug: transliterated, lowercased, runs of other characters become `-`.
fn slugify(text: &str) -> String {
    let ascii = deunicode::deunicode(text).to_lowercase();
    let mut slug = String::with_capacity(ascii.len());
    for c in ascii.chars() {
        if c.is_ascii_alphanumeric() || c == '_' {
            slug.push(c);
        } else if !slug.is_empty() && !slug.ends_with('-') {
            slug.push('-');
        }
    }
    let slug = slug.trim_end_matches('-');
    if slug.is_empty() {
        "section".to_string()
    } else {
        slug.to_string()
    }
}

/// Deduplicates slugs within one document: `intro`, `intro-1`, `intro-2`.
#[derive(Default)]
struct SlugCounter {
    seen: HashMap<String, usize>,
}

impl SlugCounter {
    fn unique(&mut self, slug: &str) -> String {
        let count = self.seen.entry(slug.to_string()).or_insert(0);
        let unique = match *count {
            0 => slug.to_string(),
            n => format!("{slug}-{n}"),
        };
        *count += 1;
        unique
    }
}

/// Escape text for use in HTML text or a double-quoted attribute.
pub fn escape_html(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            c => out.push(c),
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_render_paragraph() {
        assert_eq!(render_markdown("Hello *world*"), "<p>Hello <em>world</em></p>\n");
    }

    #[test]
    fn test_heading_anchor() {
        let html = render_markdown("## Getting Started");
        assert_eq!(
            html,
            "<h2 id=\"getting-started\">Getting Started<a class=\"header-anchor\" \
             href=\"#getting-started\" aria-label=\"Permalink to &quot;Getting Started&quot;\">\
             &ZeroWidthSpace;</a></h2>\n"
        );
    }

    #[test]
    fn test_heading_custom_id() {
        let html = render_markdown("# Intro {#custom}");
        assert!(html.starts_with("<h1 id=\"custom\">Intro<a"));
        assert!(html.contains("href=\"#custom\""));
    }

    #[test]
    fn test_duplicate_headings() {
        let html = render_markdown("## Notes\n\n## Notes\n\n## Notes");
        assert!(html.contains("id=\"notes\""));
        assert!(html.contains("id=\"notes-1\""));
        assert!(html.contains("id=\"notes-2\""));
    }

    #[test]
    fn test_heading_with_code_and_quotes() {
        let html = render_markdown("### Using `Vec<T>` \"safely\"");
        assert!(html.contains("id=\"using-vec-t-safely\""));
        assert!(html.contains("Permalink to &quot;Using Vec&lt;T&gt; &quot;safely&quot;&quot;"));
    }

    #[test]
    fn test_extensions_enabled() {
        let html = render_markdown("| a |\n|---|\n| b |\n\n~~gone~~\n\n- [x] done");
        assert!(html.contains("<table>"));
        assert!(html.contains("<del>gone</del>"));
        assert!(html.contains("type=\"checkbox\""));
    }

    #[test]
    fn test_slugify() {
        assert_eq!(slugify("Hello, World!"), "hello-world");
        assert_eq!(slugify("Café crème"), "cafe-creme");
        assert_eq!(slugify("  --  "), "section");
        assert_eq!(slugify("snake_case name"), "snake_case-name");
    }

    #[test]
    fn test_split_excerpt() {
        let (excerpt, body) = split_excerpt("Intro paragraph.\n\n---\n\nRest of post.");
        assert_eq!(excerpt, Some("Intro paragraph.\n\n"));
        assert_eq!(body, "Intro paragraph.\n\n\n\n\nRest of post.");

        let (excerpt, body) = split_excerpt("No separator here.\n--- not alone\n");
        assert!(excerpt.is_none());
        assert_eq!(body, "No separator here.\n--- not alone\n");
    }

    #[test]
    fn test_escape_html() {
        assert_eq!(escape_html("a & <b> \"c\""), "a &amp; &lt;b&gt; &quot;c&quot;");
        assert_eq!(escape_html("plain"), "plain");
    }
}
