//! Light/dark theme preference.
//!
//! The preference lives in a single file under the site root and is the only
//! state persisted across runs. A missing or unreadable file falls back to
//! `[site].theme`.

use crate::dom::{Patch, Target};
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::{fmt, fs, path::Path};

/// Class set on `<body>` while the dark theme is active.
const DARK_CLASS: &str = "dark-theme";

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
    #[default]
    Light,
    Dark,
}

impl Theme {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Light => "light",
            Self::Dark => "dark",
        }
    }

    pub const fn toggled(self) -> Self {
        match self {
            Self::Light => Self::Dark,
            Self::Dark => Self::Light,
        }
    }

    /// Glyph shown on the toggle button (the theme it switches to).
    pub const fn icon(self) -> &'static str {
        match self {
            Self::Light => "🌙",
            Self::Dark => "☀️",
        }
    }

    fn parse(s: &str) -> Option<Self> {
        match s.trim() {
            "light" => Some(Self::Light),
            "dark" => Some(Self::Dark),
            _ => None,
        }
    }

    /// Read the persisted preference, or `fallback` when there is none.
    pub fn load(path: &Path, fallback: Self) -> Self {
        fs::read_to_string(path)
            .ok()
            .and_then(|s| Self::parse(&s))
            .unwrap_or(fallback)
    }

    pub fn save(self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create {}", parent.display()))?;
        }
        fs::write(path, self.as_str())
            .with_context(|| format!("Failed to write theme to {}", path.display()))
    }

    /// Patch injecting the toggle button into the page body.
    pub fn mount(self) -> Patch {
        Patch::append(
            Target::tag("body"),
            format!(
                r#"<button id="theme-toggle" class="theme-toggle" data-action="toggle-theme">{}</button>"#,
                self.icon()
            ),
        )
    }

    /// Patches projecting the theme onto `<body>` and the toggle button.
    pub fn patches(self) -> Vec<Patch> {
        let body = match self {
            Self::Light => Patch::remove_class(Target::tag("body"), DARK_CLASS),
            Self::Dark => Patch::add_class(Target::tag("body"), DARK_CLASS),
        };
        vec![body, Patch::text(Target::id("theme-toggle"), self.icon())]
    }
}

impl fmt::Display for Theme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_load_missing_uses_fallback() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(".scholar").join("theme");
        assert_eq!(Theme::load(&path, Theme::Dark), Theme::Dark);
    }

    #[test]
    fn test_save_then_load() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(".scholar").join("theme");

        Theme::Light.toggled().save(&path).unwrap();
        assert_eq!(fs::read_to_string(&path).unwrap(), "dark");
        assert_eq!(Theme::load(&path, Theme::Light), Theme::Dark);
    }

    #[test]
    fn test_garbage_falls_back() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("theme");
        fs::write(&path, "sepia").unwrap();
        assert_eq!(Theme::load(&path, Theme::Light), Theme::Light);
    }

    #[test]
    fn test_dark_patches_body() {
        let patches = Theme::Dark.patches();
        assert_eq!(patches[0], Patch::add_class(Target::tag("body"), "dark-theme"));
        assert_eq!(patches[1], Patch::text(Target::id("theme-toggle"), "☀️"));
    }
}
