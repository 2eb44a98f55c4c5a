//! Data loading error types.

use std::{fmt, path::PathBuf};
use thiserror::Error;

/// The four data documents.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SourceKind {
    Personal,
    Publications,
    Courses,
    Projects,
}

impl SourceKind {
    pub const fn name(self) -> &'static str {
        match self {
            Self::Personal => "personal",
            Self::Publications => "publications",
            Self::Courses => "courses",
            Self::Projects => "projects",
        }
    }
}

impl fmt::Display for SourceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Failure to retrieve or parse one of the data documents.
///
/// Never retried; the page shows an error panel instead.
#[derive(Debug, Error)]
pub enum LoadError {
    #[error("Failed to load {kind} data: {status}")]
    Status {
        kind: SourceKind,
        status: u16,
    },

    #[error("Failed to load {kind} data: {cause}")]
    Transport {
        kind: SourceKind,
        #[source]
        cause: reqwest::Error,
    },

    #[error("Failed to read {kind} data from `{}`", path.display())]
    Io {
        kind: SourceKind,
        path: PathBuf,
        #[source]
        cause: std::io::Error,
    },

    #[error("Failed to parse {kind} data: {cause}")]
    Parse {
        kind: SourceKind,
        #[source]
        cause: serde_json::Error,
    },
}

impl LoadError {
    /// The document that failed.
    #[cfg(test)]
    pub const fn kind(&self) -> SourceKind {
        match self {
            Self::Status { kind, .. }
            | Self::Transport { kind, .. }
            | Self::Io { kind, .. }
            | Self::Parse { kind, .. } => *kind,
        }
    }

    /// Message shown to the user and the diagnostic log.
    pub fn user_message(&self) -> String {
        format!("Data loading failed: {self}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_message_names_source() {
        let err = LoadError::Status {
            kind: SourceKind::Projects,
            status: 404,
        };
        assert_eq!(err.to_string(), "Failed to load projects data: 404");
        assert_eq!(
            err.user_message(),
            "Data loading failed: Failed to load projects data: 404"
        );
        assert_eq!(err.kind(), SourceKind::Projects);
    }

    #[test]
    fn test_parse_error_keeps_cause() {
        let cause = serde_json::from_str::<serde_json::Value>("{").unwrap_err();
        let err = LoadError::Parse {
            kind: SourceKind::Courses,
            cause,
        };
        assert!(err.to_string().starts_with("Failed to parse courses data"));
        assert!(std::error::Error::source(&err).is_some());
    }
}
