//! Default values for configuration fields.
//!
//! These functions are used by serde for default deserialization.

// ============================================================================
// Common Defaults
// ============================================================================

pub fn r#true() -> bool {
    true
}

// ============================================================================
// [site] Section Defaults
// ============================================================================

pub mod site {
    use crate::interact::theme::Theme;

    pub fn owner() -> String {
        "Smith".into()
    }

    pub fn copyright_year() -> u16 {
        2023
    }

    pub fn theme() -> Theme {
        Theme::Light
    }
}

// ============================================================================
// [data] Section Defaults
// ============================================================================

pub mod data {
    pub fn source() -> String {
        "data".into()
    }

    pub fn personal() -> String {
        "personal.json".into()
    }

    pub fn publications() -> String {
        "publications.json".into()
    }

    pub fn courses() -> String {
        "courses.json".into()
    }

    pub fn projects() -> String {
        "projects.json".into()
    }
}

// ============================================================================
// [build] Section Defaults
// ============================================================================

pub mod build {
    use std::path::PathBuf;

    pub fn root() -> Option<PathBuf> {
        None
    }

    pub fn templates() -> PathBuf {
        "templates".into()
    }

    pub fn output() -> PathBuf {
        "public".into()
    }
}

// ============================================================================
// [serve] Section Defaults
// ============================================================================

pub mod serve {
    pub fn interface() -> String {
        "127.0.0.1".into()
    }

    pub fn port() -> u16 {
        5277
    }
}
