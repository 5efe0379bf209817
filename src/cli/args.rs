//! Command-line interface definitions.

use clap::{ColorChoice, Parser, Subcommand};
use std::path::PathBuf;

/// Feed and sitemap generator for a statically built blog
#[derive(Parser, Debug, Clone)]
#[command(version, about, long_about = None, arg_required_else_help = true)]
pub struct Cli {
    /// Control colored output (auto, always, never)
    #[arg(long, global = true, default_value = "auto")]
    pub color: ColorChoice,

    /// Build output directory (relative to the config file)
    #[arg(short, long, value_hint = clap::ValueHint::DirPath)]
    pub output: Option<PathBuf>,

    /// Markdown posts directory (relative to the config file)
    #[arg(short, long, value_hint = clap::ValueHint::DirPath)]
    pub content: Option<PathBuf>,

    /// Config file path (default: blog.toml)
    #[arg(short = 'C', long, default_value = "blog.toml", value_hint = clap::ValueHint::FilePath)]
    pub config: PathBuf,

    /// subcommands
    #[command(subcommand)]
    pub command: Commands,
}

/// Available subcommands
#[derive(Subcommand, Debug, Clone)]
pub enum Commands {
    /// Generate feeds and sitemap (post-build hook)
    #[command(visible_alias = "b")]
    Build {
        #[command(flatten)]
        build_args: BuildArgs,

        /// Enable feed generation
        #[arg(long, action = clap::ArgAction::Set, num_args = 0..=1, default_missing_value = "true", require_equals = false)]
        feed: Option<bool>,

        /// Enable sitemap generation
        #[arg(short = 'S', long, action = clap::ArgAction::Set, num_args = 0..=1, default_missing_value = "true", require_equals = false)]
        sitemap: Option<bool>,
    },

    /// Generate only the RSS, Atom and JSON feeds
    #[command(visible_alias = "f")]
    Feed {
        #[command(flatten)]
        build_args: BuildArgs,
    },

    /// Generate only the sitemap
    #[command(visible_alias = "s")]
    Sitemap {
        #[command(flatten)]
        build_args: BuildArgs,
    },
}

/// Arguments shared by every generating command
#[derive(clap::Args, Debug, Clone, Default)]
pub struct BuildArgs {
    /// Strip indentation from the feeds
    #[arg(short, long, action = clap::ArgAction::Set, num_args = 0..=1, default_missing_value = "true", require_equals = false)]
    pub minify: Option<bool>,

    /// Override site URL for deployment.
    ///
    /// Useful in CI where the production URL differs from the one in blog.toml.
    ///
    /// Example: blogfeed build --site-url "https://engineering.example.com"
    #[arg(short = 'U', long = "site-url", value_hint = clap::ValueHint::Url)]
    pub site_url: Option<String>,

    /// Enable verbose output for debugging
    #[arg(short = 'V', long)]
    pub verbose: bool,
}

impl Commands {
    pub const fn build_args(&self) -> &BuildArgs {
        match self {
            Self::Build { build_args, .. }
            | Self::Feed { build_args }
            | Self::Sitemap { build_args } => build_args,
        }
    }
}
