//! Section populators.
//!
//! Each populator is a pure function from [`PageData`] to a list of
//! [`Patch`]es. Populators do not know which elements the template has; the
//! [`Document`](crate::dom::Document) drops patches whose target is missing,
//! so every sub-section is independently optional.
//!
//! | Populator     | Targets                                                      |
//! |---------------|--------------------------------------------------------------|
//! | [`about`]     | `<title>`, `#page-description`, nav/hero, bio, education, facts |
//! | [`research`]  | `#research-interests-grid`, `#publications-list`              |
//! | [`teaching`]  | `#courses-grid`, `#supervision-stats`                         |
//! | [`projects`]  | `#projects-grid`                                              |
//! | [`contact`]   | `#contact-info`, `#social-links-grid`                         |
//! | [`footer`]    | `#footer-copyright`, `#footer-updated`                        |

pub mod about;
pub mod contact;
pub mod footer;
pub mod projects;
pub mod research;
pub mod teaching;

use crate::{config::SiteConfig, data::PageData, dom::Patch, interact::theme::Theme};
use quick_xml::escape::escape;
use std::borrow::Cow;

/// Settings the populators need beyond the data itself.
#[derive(Debug, Clone)]
pub struct RenderOptions {
    /// Substring marking the site owner in author lists.
    pub owner: String,
    /// Year printed in the footer copyright line.
    pub copyright_year: u16,
    /// Theme the page starts in.
    pub theme: Theme,
    /// Mount the search panel and theme button. Static output leaves them
    /// out: no script ships with it to drive them.
    pub controls: bool,
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self::from_config(&SiteConfig::default())
    }
}

impl RenderOptions {
    pub fn from_config(config: &SiteConfig) -> Self {
        Self {
            owner: config.site.owner.clone(),
            copyright_year: config.site.copyright_year,
            theme: config.site.theme,
            controls: true,
        }
    }
}

/// Run every populator, in page order.
pub fn populate(data: &PageData, options: &RenderOptions) -> Vec<Patch> {
    let mut patches = about::populate(&data.personal);
    patches.extend(research::populate(data, options));
    patches.extend(teaching::populate(data));
    patches.extend(projects::populate(&data.projects));
    patches.extend(contact::populate(&data.personal));
    patches.extend(footer::populate(&data.personal, options));
    patches
}

/// Escape text or attribute values for markup.
#[inline]
pub(crate) fn esc(s: &str) -> Cow<'_, str> {
    escape(s)
}
