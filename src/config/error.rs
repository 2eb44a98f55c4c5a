//! Errors raised while reading or checking `scholar.toml`.

use std::{io, path::PathBuf};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config `{}`", path.display())]
    Read {
        path: PathBuf,
        #[source]
        cause: io::Error,
    },

    #[error("Invalid scholar.toml: {0}")]
    Parse(#[from] toml::de::Error),

    /// A setting that parsed but cannot be used, named by section and key.
    #[error("Invalid `[{section}] {key}`: {reason}")]
    Validation {
        section: &'static str,
        key: &'static str,
        reason: String,
    },
}

impl ConfigError {
    pub fn invalid(section: &'static str, key: &'static str, reason: impl Into<String>) -> Self {
        Self::Validation { section, key, reason: reason.into() }
    }
}
