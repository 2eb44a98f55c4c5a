//! `[build]` section configuration.

use super::defaults;
use educe::Educe;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// `[build]` section in scholar.toml.
///
/// # Example
/// ```toml
/// [build]
/// templates = "templates"   # every *.html in here is rendered
/// output = "public"
/// minify = true
/// ```
#[derive(Debug, Clone, Educe, Serialize, Deserialize)]
#[educe(Default)]
#[serde(deny_unknown_fields)]
pub struct BuildSection {
    /// Project root, set from the CLI.
    #[serde(skip)]
    #[educe(Default = defaults::build::root())]
    pub root: Option<PathBuf>,

    /// Directory holding the page templates.
    #[serde(default = "defaults::build::templates")]
    #[educe(Default = defaults::build::templates())]
    pub templates: PathBuf,

    /// Output directory for rendered pages.
    #[serde(default = "defaults::build::output")]
    #[educe(Default = defaults::build::output())]
    pub output: PathBuf,

    /// Minify rendered HTML.
    #[serde(default)]
    pub minify: bool,

    /// Remove the output directory before writing.
    #[serde(default)]
    pub clean: bool,
}

#[cfg(test)]
mod tests {
    use super::super::SiteConfig;
    use std::path::PathBuf;

    #[test]
    fn test_build_config_defaults() {
        let config: SiteConfig = toml::from_str("").unwrap();

        assert_eq!(config.build.templates, PathBuf::from("templates"));
        assert_eq!(config.build.output, PathBuf::from("public"));
        assert!(!config.build.minify);
        assert!(!config.build.clean);
    }

    #[test]
    fn test_build_config_override() {
        let config: SiteConfig = toml::from_str(
            r#"
            [build]
            output = "dist"
            minify = true
        "#,
        )
        .unwrap();

        assert_eq!(config.build.output, PathBuf::from("dist"));
        assert!(config.build.minify);
        assert_eq!(config.build.templates, PathBuf::from("templates"));
    }
}
