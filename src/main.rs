//! blogfeed - Feed and sitemap generator for a markdown engineering blog.

mod cli;
mod config;
mod content;
mod generator;
mod logger;
mod utils;

use anyhow::{Context, Result};
use clap::{ColorChoice, Parser};
use cli::{Cli, Commands};
use config::SiteConfig;
use content::MarkdownSource;
use generator::{Generator, Targets};

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Set global color override based on CLI option
    match cli.color {
        ColorChoice::Always => owo_colors::set_override(true),
        ColorChoice::Never => owo_colors::set_override(false),
        ColorChoice::Auto => {} // owo-colors auto-detects TTY
    }

    let config = SiteConfig::load(&cli)?;
    let targets = select_targets(&cli.command, &config);

    let source = MarkdownSource::from_config(&config);
    let output_dir = config.output_dir();
    Generator::new(&config, &source)
        .run(output_dir, targets)
        .with_context(|| format!("generation into `{}` failed", output_dir.display()))?;

    Ok(())
}

/// `build` follows the config toggles unless overridden; the standalone
/// commands always run their generator.
fn select_targets(command: &Commands, config: &SiteConfig) -> Targets {
    match command {
        Commands::Build { feed, sitemap, .. } => Targets {
            feed: feed.unwrap_or(config.feed.enable),
            sitemap: sitemap.unwrap_or(config.sitemap.enable),
        },
        Commands::Feed { .. } => Targets {
            feed: true,
            sitemap: false,
        },
        Commands::Sitemap { .. } => Targets {
            feed: false,
            sitemap: true,
        },
    }
}
