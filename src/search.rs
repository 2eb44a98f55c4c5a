//! Client-side search over publications, projects and courses.
//!
//! Nothing is indexed ahead of time: every query change re-scans the three
//! collections linearly. Results keep scan order (publications, then
//! projects, then courses).
//!
//! ```text
//!          query.len() >= 2
//!   Idle ─────────────────────► Active(hits)
//!    ▲                              │
//!    └──────────────────────────────┘
//!      query.len() < 2 | close()
//! ```

use crate::data::PageData;
use crate::dom::{Patch, Target};
use crate::interact::nav::Section;
use crate::render::esc;
use std::fmt;

/// Queries shorter than this (in characters) clear the results.
pub const MIN_QUERY_LEN: usize = 2;

/// Project and course descriptions are cut to this many characters.
const EXCERPT_LEN: usize = 100;

/// Markup injected once into `<body>` to host the search panel.
const PANEL_MARKUP: &str = concat!(
    r#"<div id="search-container" class="search-container" style="display: none">"#,
    r#"<div class="search-bar"><input type="text" id="search-input" placeholder="Search content..." value="" />"#,
    r#"<button class="search-close" data-action="close-search">×</button></div>"#,
    r#"<div id="search-results"></div>"#,
    "</div>"
);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HitKind {
    Publication,
    Project,
    Course,
}

impl HitKind {
    pub const fn label(self) -> &'static str {
        match self {
            Self::Publication => "Publication",
            Self::Project => "Project",
            Self::Course => "Course",
        }
    }
}

impl fmt::Display for HitKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// A matching record in the uniform result shape.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchHit {
    pub kind: HitKind,
    pub title: String,
    pub section: Section,
    pub description: String,
}

/// Scan all searchable collections for `query` (case-insensitive substring).
pub fn search(data: &PageData, query: &str) -> Vec<SearchHit> {
    let query = query.trim().to_lowercase();
    if query.chars().count() < MIN_QUERY_LEN {
        return Vec::new();
    }
    let hit = |text: &str| text.to_lowercase().contains(&query);

    let publications = data
        .publications
        .iter()
        .filter(|p| hit(&p.title) || p.authors.iter().any(|a| hit(a.name())) || hit(&p.venue))
        .map(|p| SearchHit {
            kind: HitKind::Publication,
            title: p.title.clone(),
            section: Section::Research,
            description: format!("{}, {}", p.venue, p.year),
        });

    let projects = data
        .projects
        .iter()
        .filter(|p| hit(&p.title) || hit(&p.description) || p.technologies.iter().any(|t| hit(t)))
        .map(|p| SearchHit {
            kind: HitKind::Project,
            title: p.title.clone(),
            section: Section::Projects,
            description: excerpt(&p.description),
        });

    let courses = data
        .courses
        .iter()
        .filter(|c| hit(&c.title) || hit(&c.course_code) || hit(&c.description))
        .map(|c| SearchHit {
            kind: HitKind::Course,
            title: format!("{}: {}", c.course_code, c.title),
            section: Section::Teaching,
            description: excerpt(&c.description),
        });

    publications.chain(projects).chain(courses).collect()
}

/// First [`EXCERPT_LEN`] characters followed by `...`.
fn excerpt(text: &str) -> String {
    let mut out: String = text.chars().take(EXCERPT_LEN).collect();
    out.push_str("...");
    out
}

// ============================================================================
// Panel state machine
// ============================================================================

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum PanelState {
    #[default]
    Idle,
    Active(Vec<SearchHit>),
}

/// The search panel: visibility, input text and results.
#[derive(Debug, Clone, Default)]
pub struct SearchPanel {
    visible: bool,
    focused: bool,
    query: String,
    state: PanelState,
}

impl SearchPanel {
    pub fn new() -> Self {
        Self::default()
    }

    pub const fn is_visible(&self) -> bool {
        self.visible
    }

    /// Whether the input has keyboard focus.
    pub const fn is_focused(&self) -> bool {
        self.focused
    }

    pub fn query(&self) -> &str {
        &self.query
    }

    pub const fn state(&self) -> &PanelState {
        &self.state
    }

    /// Current hits; empty while idle.
    pub fn results(&self) -> &[SearchHit] {
        match &self.state {
            PanelState::Idle => &[],
            PanelState::Active(hits) => hits,
        }
    }

    /// Update the input text and re-run the scan.
    pub fn set_query(&mut self, data: &PageData, query: &str) {
        self.query = query.to_owned();
        self.state = if query.trim().chars().count() < MIN_QUERY_LEN {
            PanelState::Idle
        } else {
            PanelState::Active(search(data, query))
        };
    }

    /// Flip visibility; opening focuses the input.
    pub fn toggle(&mut self) {
        self.visible = !self.visible;
        self.focused = self.visible;
    }

    /// Hide the panel and clear the query and results, from any state.
    pub fn close(&mut self) {
        self.visible = false;
        self.focused = false;
        self.query.clear();
        self.state = PanelState::Idle;
    }

    /// Pick a result: closes the panel and yields its section.
    pub fn select(&mut self, index: usize) -> Option<Section> {
        let section = self.results().get(index).map(|hit| hit.section);
        if section.is_some() {
            self.close();
        }
        section
    }

    /// Markup for `#search-results`.
    pub fn results_markup(&self) -> String {
        match &self.state {
            PanelState::Idle => String::new(),
            PanelState::Active(hits) if hits.is_empty() => {
                r#"<div class="search-empty">No results found</div>"#.to_owned()
            }
            PanelState::Active(hits) => hits
                .iter()
                .map(|hit| {
                    format!(
                        concat!(
                            r#"<div class="search-result" data-section="{}">"#,
                            r#"<div class="search-result-title">{}: {}</div>"#,
                            r#"<div class="search-result-description">{}</div>"#,
                            "</div>"
                        ),
                        hit.section.id(),
                        hit.kind,
                        esc(&hit.title),
                        esc(&hit.description)
                    )
                })
                .collect(),
        }
    }

    /// Patch injecting the panel into the page body.
    pub fn mount() -> Patch {
        Patch::append(Target::tag("body"), PANEL_MARKUP)
    }

    /// Patches projecting the current panel state onto the document.
    pub fn patches(&self) -> Vec<Patch> {
        let display = if self.visible { "block" } else { "none" };
        let mut patches = vec![
            Patch::style(Target::id("search-container"), "display", display),
            Patch::attr(Target::id("search-input"), "value", &self.query),
            Patch::html(Target::id("search-results"), self.results_markup()),
        ];
        if self.focused {
            patches.push(Patch::attr(Target::id("search-input"), "autofocus", "autofocus"));
        }
        patches
    }
}
