//! Site configuration management for `scholar.toml`.
//!
//! # Sections
//!
//! | Section     | Purpose                                          |
//! |-------------|--------------------------------------------------|
//! | `[site]`    | Owner emphasis, footer year, default theme       |
//! | `[data]`    | Data source (directory or URL) and file names    |
//! | `[build]`   | Templates and output directories, minify         |
//! | `[serve]`   | Preview server (interface, port)                 |
//!
//! # Example
//!
//! ```toml
//! [site]
//! owner = "Smith"
//!
//! [data]
//! source = "data"
//!
//! [build]
//! output = "public"
//! minify = true
//!
//! [serve]
//! port = 5277
//! ```

mod build;
mod data;
pub mod defaults;
mod error;
mod serve;
mod site;

use build::BuildSection;
use data::DataSection;
use error::ConfigError;
use serve::ServeSection;
use site::SiteSection;

use crate::cli::{Cli, Commands};
use anyhow::{Result, bail};
use educe::Educe;
use serde::{Deserialize, Serialize};
use std::{
    fs,
    path::{Path, PathBuf},
};

/// Directory (relative to root) holding local persisted state.
const STATE_DIR: &str = ".scholar";

// ============================================================================
// Root Configuration
// ============================================================================

/// Root configuration structure representing scholar.toml
#[derive(Debug, Clone, Educe, Serialize, Deserialize)]
#[educe(Default)]
#[serde(deny_unknown_fields)]
pub struct SiteConfig {
    /// Absolute path to the config file (set after loading)
    #[serde(skip)]
    pub config_path: PathBuf,

    /// Site owner settings
    #[serde(default)]
    pub site: SiteSection,

    /// Data source settings
    #[serde(default)]
    pub data: DataSection,

    /// Build settings
    #[serde(default)]
    pub build: BuildSection,

    /// Preview server settings
    #[serde(default)]
    pub serve: ServeSection,
}

impl SiteConfig {
    /// Parse configuration from TOML string
    pub fn from_str(content: &str) -> Result<Self> {
        let config: SiteConfig = toml::from_str(content).map_err(ConfigError::from)?;
        Ok(config)
    }

    /// Load configuration from file path
    pub fn from_path(path: &Path) -> Result<Self> {
        let content =
            fs::read_to_string(path).map_err(|cause| ConfigError::Read { path: path.to_path_buf(), cause })?;
        Self::from_str(&content)
    }

    /// Get the root directory path
    pub fn get_root(&self) -> &Path {
        self.build.root.as_deref().unwrap_or(Path::new("./"))
    }

    /// Set the root directory path
    pub fn set_root(&mut self, path: &Path) {
        self.build.root = Some(path.to_path_buf())
    }

    /// File holding the persisted theme preference.
    pub fn theme_state_path(&self) -> PathBuf {
        self.get_root().join(STATE_DIR).join("theme")
    }

    /// Update configuration with CLI arguments
    pub fn update_with_cli(&mut self, cli: &Cli) {
        let base = cli
            .root
            .clone()
            .unwrap_or_else(|| self.get_root().to_owned());
        let root = match &cli.command {
            Commands::Init { name: Some(name) } => base.join(name),
            _ => base,
        };

        Self::update_option(&mut self.data.source, cli.data.as_ref());
        Self::update_option(&mut self.build.output, cli.output.as_ref());

        if let Some(args) = cli.build_args() {
            Self::update_option(&mut self.build.minify, args.minify.as_ref());
            Self::update_option(&mut self.build.templates, args.templates.as_ref());
            self.build.clean |= args.clean;
        }

        if let Commands::Serve {
            interface, port, ..
        } = &cli.command
        {
            Self::update_option(&mut self.serve.interface, interface.as_ref());
            Self::update_option(&mut self.serve.port, port.as_ref());
        }

        self.update_path_with_root(&root, &cli.config);
    }

    /// Update config option if CLI value is provided
    fn update_option<T: Clone>(config_option: &mut T, cli_option: Option<&T>) {
        if let Some(option) = cli_option {
            *config_option = option.clone();
        }
    }

    /// Update all paths relative to root directory and normalize to absolute paths
    fn update_path_with_root(&mut self, root: &Path, config_name: &Path) {
        let root = Self::normalize_path(root);
        self.set_root(&root);

        self.config_path = Self::normalize_path(&root.join(config_name));
        self.build.templates = Self::normalize_path(&root.join(&self.build.templates));
        self.build.output = Self::normalize_path(&root.join(&self.build.output));

        if !self.data.is_remote() {
            let source = Self::normalize_path(&root.join(&self.data.source));
            self.data.source = source.to_string_lossy().into_owned();
        }
    }

    /// Normalize a path to absolute, using canonicalize if the path exists
    fn normalize_path(path: &Path) -> PathBuf {
        path.canonicalize().unwrap_or_else(|_| {
            if path.is_absolute() {
                path.to_path_buf()
            } else {
                std::env::current_dir()
                    .map(|cwd| cwd.join(path))
                    .unwrap_or_else(|_| path.to_path_buf())
            }
        })
    }

    /// Validate configuration for the current command
    pub fn validate(&self, cli: &Cli) -> Result<()> {
        if !self.config_path.exists() {
            bail!("Config file not found");
        }

        if self.data.source.trim().is_empty() {
            bail!(ConfigError::invalid("data", "source", "must not be empty"));
        }

        if !self.data.is_remote() && !Path::new(&self.data.source).is_dir() {
            bail!(ConfigError::invalid(
                "data",
                "source",
                format!("`{}` is neither a directory nor an http(s) URL", self.data.source)
            ));
        }

        if self.data.timeout_secs == Some(0) {
            bail!(ConfigError::invalid("data", "timeout_secs", "must be greater than zero"));
        }

        if (cli.is_build() || cli.is_serve()) && !self.build.templates.is_dir() {
            bail!(ConfigError::invalid(
                "build",
                "templates",
                format!("`{}` not found", self.build.templates.display())
            ));
        }

        Ok(())
    }
}

// ============================================================================
// Tests
// ============================================================================
