//! Configuration section definitions.
//!
//! Each module corresponds to a section in `blog.toml`:
//!
//! | Module    | TOML Section  | Purpose                                   |
//! |-----------|---------------|-------------------------------------------|
//! | `site`    | `[site]`      | Feed metadata and canonical base URL      |
//! | `content` | `[content]`   | Posts directory, post route, output dir   |
//! | `feed`    | `[feed]`      | RSS / Atom / JSON Feed outputs            |
//! | `sitemap` | `[sitemap]`   | Sitemap output, static routes, ordering   |

mod content;
mod feed;
mod site;
mod sitemap;

pub use content::ContentConfig;
pub use feed::FeedConfig;
pub use site::SiteInfoConfig;
pub use sitemap::{ChangeFreq, SitemapConfig, SitemapOrder};
