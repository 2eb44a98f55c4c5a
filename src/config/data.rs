//! `[data]` section configuration.
//!
//! Where the four JSON documents come from.

use super::defaults;
use educe::Educe;
use serde::{Deserialize, Serialize};

/// `[data]` section in scholar.toml.
///
/// # Example
/// ```toml
/// [data]
/// source = "https://example.com/data"   # or a directory such as "data"
/// cache_bust = true
/// timeout_secs = 30
/// ```
#[derive(Debug, Clone, Educe, Serialize, Deserialize)]
#[educe(Default)]
#[serde(deny_unknown_fields)]
pub struct DataSection {
    /// Directory (relative to root) or `http(s)://` base URL.
    #[serde(default = "defaults::data::source")]
    #[educe(Default = defaults::data::source())]
    pub source: String,

    #[serde(default = "defaults::data::personal")]
    #[educe(Default = defaults::data::personal())]
    pub personal: String,

    #[serde(default = "defaults::data::publications")]
    #[educe(Default = defaults::data::publications())]
    pub publications: String,

    #[serde(default = "defaults::data::courses")]
    #[educe(Default = defaults::data::courses())]
    pub courses: String,

    #[serde(default = "defaults::data::projects")]
    #[educe(Default = defaults::data::projects())]
    pub projects: String,

    /// Append `?v=<timestamp>` to remote requests.
    #[serde(default = "defaults::r#true")]
    #[educe(Default = true)]
    pub cache_bust: bool,

    /// Upper bound for each remote request. Unset means wait indefinitely.
    #[serde(default)]
    pub timeout_secs: Option<u64>,
}

impl DataSection {
    /// Whether `source` names a remote base URL.
    pub fn is_remote(&self) -> bool {
        self.source.starts_with("http://") || self.source.starts_with("https://")
    }
}

#[cfg(test)]
mod tests {
    use super::super::SiteConfig;

    #[test]
    fn test_data_config_defaults() {
        let config: SiteConfig = toml::from_str("").unwrap();

        assert_eq!(config.data.source, "data");
        assert_eq!(config.data.personal, "personal.json");
        assert_eq!(config.data.projects, "projects.json");
        assert!(config.data.cache_bust);
        assert_eq!(config.data.timeout_secs, None);
        assert!(!config.data.is_remote());
    }

    #[test]
    fn test_data_config_remote() {
        let config: SiteConfig = toml::from_str(
            r#"
            [data]
            source = "https://example.com/data"
            timeout_secs = 10
            cache_bust = false
        "#,
        )
        .unwrap();

        assert!(config.data.is_remote());
        assert_eq!(config.data.timeout_secs, Some(10));
        assert!(!config.data.cache_bust);
    }
}
