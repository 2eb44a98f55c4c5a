//! Navigation: section routing, the mobile menu and navbar styling.

use crate::dom::{Patch, Target};
use std::fmt;

/// Scroll offset (px) past which the navbar turns opaque.
pub const SCROLL_THRESHOLD: f64 = 100.0;

const NAVBAR_SCROLLED: &str = "rgba(255, 255, 255, 0.98)";
const NAVBAR_TOP: &str = "rgba(255, 255, 255, 0.95)";

/// A page of the site.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Section {
    About,
    Research,
    Teaching,
    Projects,
    Contact,
}

impl Section {
    pub const ALL: [Self; 5] = [
        Self::About,
        Self::Research,
        Self::Teaching,
        Self::Projects,
        Self::Contact,
    ];

    pub const fn id(self) -> &'static str {
        match self {
            Self::About => "about",
            Self::Research => "research",
            Self::Teaching => "teaching",
            Self::Projects => "projects",
            Self::Contact => "contact",
        }
    }

    pub fn from_id(id: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|s| s.id() == id)
    }

    /// Page the section lives on.
    pub const fn page(self) -> &'static str {
        match self {
            Self::About => "index.html",
            Self::Research => "research.html",
            Self::Teaching => "teaching.html",
            Self::Projects => "projects.html",
            Self::Contact => "contact.html",
        }
    }
}

impl fmt::Display for Section {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.id())
    }
}

/// Resolve a section id to its page; unknown ids go nowhere.
pub fn route(section: &str) -> Option<&'static str> {
    Section::from_id(section).map(Section::page)
}

/// Navbar background for a scroll offset.
pub fn navbar_background(scroll_y: f64) -> &'static str {
    if scroll_y > SCROLL_THRESHOLD {
        NAVBAR_SCROLLED
    } else {
        NAVBAR_TOP
    }
}

/// Open/closed state shared by `.nav-toggle` and `.nav-menu`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct MobileMenu {
    active: bool,
}

impl MobileMenu {
    #[cfg(test)]
    pub const fn is_active(self) -> bool {
        self.active
    }

    pub fn toggle(&mut self) {
        self.active = !self.active;
    }

    /// Clicking a nav link always closes, never opens.
    pub fn close(&mut self) {
        self.active = false;
    }

    pub fn patches(self) -> Vec<Patch> {
        let op = if self.active { Patch::add_class } else { Patch::remove_class };
        vec![
            op(Target::class("nav-toggle"), "active"),
            op(Target::class("nav-menu"), "active"),
        ]
    }
}

/// Navbar styling driven by the last scroll event.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Navbar {
    /// `None` until the first scroll event; the template's own style stands.
    scroll_y: Option<f64>,
}

impl Navbar {
    /// Record a scroll event. Every event rewrites the background.
    pub fn on_scroll(&mut self, scroll_y: f64) -> &'static str {
        self.scroll_y = Some(scroll_y);
        navbar_background(scroll_y)
    }

    pub fn patches(self) -> Vec<Patch> {
        self.scroll_y
            .map(|y| Patch::style(Target::class("navbar"), "background", navbar_background(y)))
            .into_iter()
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_route_table() {
        assert_eq!(route("about"), Some("index.html"));
        assert_eq!(route("research"), Some("research.html"));
        assert_eq!(route("teaching"), Some("teaching.html"));
        assert_eq!(route("projects"), Some("projects.html"));
        assert_eq!(route("contact"), Some("contact.html"));
        assert_eq!(route("blog"), None);
        assert_eq!(route(""), None);
    }

    #[test]
    fn test_navbar_threshold_is_strict() {
        assert_eq!(navbar_background(0.0), NAVBAR_TOP);
        assert_eq!(navbar_background(100.0), NAVBAR_TOP);
        assert_eq!(navbar_background(100.5), NAVBAR_SCROLLED);

        let mut navbar = Navbar::default();
        assert!(navbar.patches().is_empty());
        navbar.on_scroll(250.0);
        navbar.on_scroll(40.0);
        assert_eq!(
            navbar.patches(),
            [Patch::style(Target::class("navbar"), "background", NAVBAR_TOP)]
        );
    }

    #[test]
    fn test_menu_toggle_and_one_way_close() {
        let mut menu = MobileMenu::default();
        menu.close();
        assert!(!menu.is_active());

        menu.toggle();
        assert!(menu.is_active());
        assert_eq!(menu.patches()[1], Patch::add_class(Target::class("nav-menu"), "active"));

        menu.close();
        menu.close();
        assert!(!menu.is_active());
        assert_eq!(menu.patches()[0], Patch::remove_class(Target::class("nav-toggle"), "active"));
    }
}
