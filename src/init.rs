//! Site initialization module.
//!
//! Creates a starter site: default configuration, sample data and one page.

use crate::{
    config::SiteConfig,
    embed::{INDEX_TEMPLATE, STARTER_DATA},
    log,
};
use anyhow::{Context, Result, bail};
use std::{fs, path::Path};

/// Default config filename
const CONFIG_FILE: &str = "scholar.toml";

const IGNORE_FILE: &str = ".gitignore";

/// Create a new site at the configured root.
pub fn new_site(config: &SiteConfig, has_name: bool) -> Result<()> {
    let root = config.get_root();

    // Without a name we init in place, which needs an empty directory
    if !has_name && !is_dir_empty(root)? {
        bail!(
            "Current directory is not empty. Use `scholar init <SITE_NAME>` to create in a subdirectory."
        );
    }

    let data = root.join(&SiteConfig::default().data.source);
    let templates = root.join(&SiteConfig::default().build.templates);
    for dir in [&data, &templates] {
        if dir.exists() {
            bail!(
                "Path `{}` already exists. Try `scholar init <SITE_NAME>` instead.",
                dir.display()
            );
        }
        fs::create_dir_all(dir).with_context(|| format!("Failed to create {}", dir.display()))?;
    }

    for (name, content) in STARTER_DATA {
        fs::write(data.join(name), content)?;
    }
    fs::write(templates.join("index.html"), INDEX_TEMPLATE)?;
    init_default_config(root)?;
    init_ignore_file(root)?;

    log!("init"; "created site at {}", root.display());
    Ok(())
}

/// Check if a directory is completely empty
fn is_dir_empty(path: &Path) -> Result<bool> {
    if !path.exists() {
        return Ok(true);
    }
    Ok(fs::read_dir(path)?.next().is_none())
}

/// Write default configuration file
fn init_default_config(root: &Path) -> Result<()> {
    let content = toml::to_string_pretty(&SiteConfig::default())?;
    fs::write(root.join(CONFIG_FILE), content)?;
    Ok(())
}

/// Ignore build output and local state.
fn init_ignore_file(root: &Path) -> Result<()> {
    let path = root.join(IGNORE_FILE);
    if !path.exists() {
        let output = SiteConfig::default().build.output;
        fs::write(&path, format!("/{}/\n/.scholar/\n", output.display()))?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::PageData;
    use crate::dom::Document;

    fn config_at(root: &Path) -> SiteConfig {
        let mut config = SiteConfig::default();
        config.set_root(root);
        config
    }

    #[test]
    fn test_new_site_writes_starter_files() {
        let dir = tempfile::tempdir().unwrap();
        let root = dir.path().join("site");

        new_site(&config_at(&root), true).unwrap();

        let config = SiteConfig::from_path(&root.join("scholar.toml")).unwrap();
        assert_eq!(config.site.owner, "Smith");
        assert!(root.join("templates").join("index.html").is_file());
        assert!(Document::parse(fs::read_to_string(root.join("templates/index.html")).unwrap()).is_ok());
        assert!(fs::read_to_string(root.join(".gitignore")).unwrap().contains("/public/"));

        let read = |name: &str| fs::read_to_string(root.join("data").join(name)).unwrap();
        let data = PageData {
            personal: serde_json::from_str(&read("personal.json")).unwrap(),
            publications: serde_json::from_str(&read("publications.json")).unwrap(),
            courses: serde_json::from_str(&read("courses.json")).unwrap(),
            projects: serde_json::from_str(&read("projects.json")).unwrap(),
        };
        assert_eq!(data.personal.name, "Dr. Alex Smith");
        assert_eq!(data.publications.len(), 2);
    }

    #[test]
    fn test_init_in_place_requires_empty_dir() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("notes.txt"), "").unwrap();
        assert!(new_site(&config_at(dir.path()), false).is_err());
    }

    #[test]
    fn test_init_refuses_existing_data_dir() {
        let dir = tempfile::tempdir().unwrap();
        fs::create_dir(dir.path().join("data")).unwrap();
        assert!(new_site(&config_at(dir.path()), true).is_err());
    }
}
