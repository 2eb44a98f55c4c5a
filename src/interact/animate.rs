//! Scroll-triggered reveal of cards and list items.
//!
//! ```text
//!            settle delay            intersect >= threshold
//!   Pending ─────────────► Hidden ─────────────────────────► Revealed
//!                                                            (terminal)
//! ```
//!
//! Elements are addressed as `(role, index)`: the role class and the
//! element's position among elements carrying it.

use crate::dom::{Document, Patch, Target};
use std::time::Duration;

/// Classes whose elements fade in on first sight.
pub const ROLES: [&str; 6] = [
    "interest-card",
    "publication-item",
    "course-card",
    "project-card",
    "contact-item",
    "social-link",
];

/// Wait before observed elements are hidden and watched.
pub const SETTLE_DELAY: Duration = Duration::from_millis(100);

/// Fraction of an element that must be inside the viewport.
pub const THRESHOLD: f64 = 0.1;

/// The viewport's bottom edge is pulled up by this much (a `-50px` root margin).
const BOTTOM_INSET: f64 = 50.0;

const HIDDEN_TRANSITION: &str = "opacity 0.6s ease, transform 0.6s ease";
const IMAGE_TRANSITION: &str = "opacity 0.3s ease";

/// Vertical extent of an element, in page coordinates.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Bounds {
    pub top: f64,
    pub height: f64,
}

/// The visible window: scroll offset and height.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Viewport {
    pub scroll_y: f64,
    pub height: f64,
}

impl Viewport {
    /// A viewport scrolled so that `bounds` sits fully inside it.
    pub fn around(bounds: Bounds) -> Self {
        Self {
            scroll_y: bounds.top,
            height: bounds.height + BOTTOM_INSET,
        }
    }

    /// Fraction of `bounds` inside the viewport after the bottom inset.
    pub fn visible_ratio(&self, bounds: Bounds) -> f64 {
        if bounds.height <= 0.0 {
            return 0.0;
        }
        let top = self.scroll_y;
        let bottom = self.scroll_y + (self.height - BOTTOM_INSET).max(0.0);
        let overlap = (bounds.top + bounds.height).min(bottom) - bounds.top.max(top);
        (overlap / bounds.height).clamp(0.0, 1.0)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    /// Before the settle delay: nothing is hidden or watched.
    Pending,
    Watching,
}

#[derive(Debug, Clone, PartialEq, Eq)]
struct Observed {
    role: &'static str,
    index: usize,
    revealed: bool,
}

/// One-shot reveal state for every role element on a page.
#[derive(Debug, Clone)]
pub struct RevealTracker {
    phase: Phase,
    items: Vec<Observed>,
}

impl RevealTracker {
    /// Collect every role element present in `doc`.
    pub fn new(doc: &Document) -> Self {
        let items = ROLES
            .iter()
            .flat_map(|&role| {
                (0..)
                    .take_while(move |&index| doc.contains(&Target::nth(role, index)))
                    .map(move |index| Observed { role, index, revealed: false })
            })
            .collect();
        Self { phase: Phase::Pending, items }
    }

    #[cfg(test)]
    pub const fn phase(&self) -> Phase {
        self.phase
    }

    #[cfg(test)]
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Elements currently hidden and waiting to intersect, as `(role, index)`.
    pub fn hidden(&self) -> impl Iterator<Item = (&'static str, usize)> + '_ {
        self.items
            .iter()
            .filter(|o| self.phase == Phase::Watching && !o.revealed)
            .map(|o| (o.role, o.index))
    }

    /// Settle delay elapsed: hide everything and start watching.
    pub fn arm(&mut self) {
        self.phase = Phase::Watching;
    }

    /// Report an intersection ratio. Returns `true` when this reveals the element.
    pub fn observe(&mut self, role: &str, index: usize, ratio: f64) -> bool {
        if self.phase == Phase::Pending || ratio < THRESHOLD {
            return false;
        }
        match self
            .items
            .iter_mut()
            .find(|o| o.role == role && o.index == index && !o.revealed)
        {
            Some(item) => {
                item.revealed = true;
                true
            }
            None => false,
        }
    }

    pub fn patches(&self) -> Vec<Patch> {
        if self.phase == Phase::Pending {
            return Vec::new();
        }
        self.items
            .iter()
            .flat_map(|item| {
                let target = || Target::nth(item.role, item.index);
                let (opacity, transform) = if item.revealed {
                    ("1", "translateY(0)")
                } else {
                    ("0", "translateY(20px)")
                };
                [
                    Patch::style(target(), "opacity", opacity),
                    Patch::style(target(), "transform", transform),
                    Patch::style(target(), "transition", HIDDEN_TRANSITION),
                ]
            })
            .collect()
    }
}

/// Fade-in for `<img>` elements still loading when animations start.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ImageFade {
    /// Images were already loaded; nothing to do.
    #[default]
    Complete,
    Loading,
    Loaded,
}

impl ImageFade {
    pub fn on_load(&mut self) {
        if *self == Self::Loading {
            *self = Self::Loaded;
        }
    }

    pub fn patches(self) -> Vec<Patch> {
        let img = || Target::tag("img");
        match self {
            Self::Complete => Vec::new(),
            Self::Loading => vec![
                Patch::style(img(), "opacity", "0"),
                Patch::style(img(), "transition", IMAGE_TRANSITION),
            ],
            Self::Loaded => vec![
                Patch::style(img(), "opacity", "1"),
                Patch::style(img(), "transition", IMAGE_TRANSITION),
            ],
        }
    }
}
