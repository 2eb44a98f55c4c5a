//! Command-line interface definitions.
//!
//! Defines all CLI arguments and subcommands using clap.

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Scholar academic website renderer CLI
#[derive(Parser, Debug, Clone)]
#[command(version, about, long_about = None, arg_required_else_help = true)]
pub struct Cli {
    /// Root directory path
    #[arg(short, long)]
    pub root: Option<PathBuf>,

    /// Data source: a directory or an http(s) base URL (relative to project root)
    #[arg(short, long)]
    pub data: Option<String>,

    /// Output directory path (relative to project root)
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Config file name (default: scholar.toml)
    #[arg(short = 'C', long, default_value = "scholar.toml")]
    pub config: PathBuf,

    /// subcommands
    #[command(subcommand)]
    pub command: Commands,
}

/// Shared build arguments for Build and Serve commands
#[derive(clap::Args, Debug, Clone)]
pub struct BuildArgs {
    /// Clean output directory completely before building
    #[arg(long)]
    pub clean: bool,

    /// Minify the html content
    #[arg(short, long, action = clap::ArgAction::Set, num_args = 0..=1, default_missing_value = "true", require_equals = false)]
    pub minify: Option<bool>,

    /// Templates directory path (relative to project root)
    #[arg(short, long)]
    pub templates: Option<PathBuf>,
}

/// Available subcommands
#[derive(Subcommand, Debug, Clone)]
pub enum Commands {
    /// Init a starter site
    Init {
        /// the name(path) of site directory, related to `root`
        name: Option<PathBuf>,
    },

    /// Load the data and render every template into the output directory
    Build {
        #[command(flatten)]
        build_args: BuildArgs,
    },

    /// Build the site, then serve the output directory
    Serve {
        #[command(flatten)]
        build_args: BuildArgs,

        /// Interface to bind on
        #[arg(short, long)]
        interface: Option<String>,

        /// The port you should provide
        #[arg(short, long)]
        port: Option<u16>,
    },

    /// Search publications, projects and courses
    ///
    /// Without a query, opens an interactive prompt
    /// (Ctrl+K toggles the panel, Esc closes it, Enter opens the selected result,
    /// Ctrl+T toggles the theme, Alt+1..5 jumps to a section).
    Search {
        /// one-shot query
        query: Option<String>,
    },

    /// Show or toggle the persisted theme preference
    Theme {
        /// flip between light and dark
        #[arg(long)]
        toggle: bool,
    },
}

#[allow(unused)]
impl Cli {
    pub const fn is_init(&self) -> bool {
        matches!(self.command, Commands::Init { .. })
    }
    pub const fn is_build(&self) -> bool {
        matches!(self.command, Commands::Build { .. })
    }
    pub const fn is_serve(&self) -> bool {
        matches!(self.command, Commands::Serve { .. })
    }

    /// Build arguments of the `build`/`serve` commands, if any.
    pub const fn build_args(&self) -> Option<&BuildArgs> {
        match &self.command {
            Commands::Build { build_args } | Commands::Serve { build_args, .. } => Some(build_args),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_build_with_overrides() {
        let cli = Cli::parse_from(["scholar", "--data", "https://example.com/data", "build", "--minify"]);
        assert!(cli.is_build());
        assert_eq!(cli.data.as_deref(), Some("https://example.com/data"));
        assert_eq!(cli.build_args().and_then(|a| a.minify), Some(true));
    }

    #[test]
    fn test_parse_search_query() {
        let cli = Cli::parse_from(["scholar", "search", "neurips"]);
        match cli.command {
            Commands::Search { query } => assert_eq!(query.as_deref(), Some("neurips")),
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn test_default_config_name() {
        let cli = Cli::parse_from(["scholar", "theme"]);
        assert_eq!(cli.config, PathBuf::from("scholar.toml"));
        assert!(cli.build_args().is_none());
    }
}
