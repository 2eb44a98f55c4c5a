//! `[site]` section configuration.
//!
//! Contains settings about the site owner that the data files do not carry.

use super::defaults;
use crate::interact::theme::Theme;
use educe::Educe;
use serde::{Deserialize, Serialize};

/// `[site]` section in scholar.toml.
///
/// # Example
/// ```toml
/// [site]
/// owner = "Smith"        # authors containing this are emphasized
/// copyright_year = 2023
/// theme = "dark"
/// ```
#[derive(Debug, Clone, Educe, Serialize, Deserialize)]
#[educe(Default)]
#[serde(deny_unknown_fields)]
pub struct SiteSection {
    /// Substring identifying the site owner in publication author lists.
    /// An empty string disables substring matching.
    #[serde(default = "defaults::site::owner")]
    #[educe(Default = defaults::site::owner())]
    pub owner: String,

    /// Fixed year printed in the footer copyright line.
    #[serde(default = "defaults::site::copyright_year")]
    #[educe(Default = defaults::site::copyright_year())]
    pub copyright_year: u16,

    /// Theme used when no preference has been persisted yet.
    #[serde(default = "defaults::site::theme")]
    #[educe(Default = defaults::site::theme())]
    pub theme: Theme,
}
