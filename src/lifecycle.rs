//! Page bootstrap: from a template and a load result to a live page.
//!
//! # Order
//!
//! ```text
//! bootstrap(template, Ok(data))
//!     │
//!     ├── populate          all section patches (+ search panel, theme button)
//!     ├── init navigation   menu, navbar, section routing
//!     ├── init search       Ctrl/Cmd+K, Escape, query, select
//!     ├── init animations   reveal armed after 100ms, image fade
//!     └── hide overlay      opacity 0 at 500ms, display none at 1000ms
//!
//! bootstrap(template, Err(_))
//!     │
//!     └── error panel       replaces #loading-screen content; nothing else
//! ```
//!
//! Populated markup is rendered and re-indexed before interactions are wired,
//! so cards and the search panel are addressable like template elements.
//! The search panel and theme button are only mounted when
//! [`RenderOptions::controls`] is set; a static build has nothing to drive them.

use crate::{
    data::{LoadError, PageData},
    dom::{Document, Patch, Target},
    interact::{
        Action, ActionKind, Dispatcher, Effect, InputEvent,
        animate::{Bounds, ImageFade, RevealTracker, SETTLE_DELAY, Viewport},
        nav::{self, MobileMenu, Navbar},
        theme::Theme,
    },
    render::{self, RenderOptions, esc},
    search::SearchPanel,
};
use anyhow::Result;
use std::time::Duration;

/// Delay before the loading overlay starts fading.
pub const FADE_DELAY: Duration = Duration::from_millis(500);

/// Delay after the fade before the overlay is removed from layout.
pub const HIDE_DELAY: Duration = Duration::from_millis(500);

/// Shown in the error panel; the cause goes to the log.
pub const ERROR_MESSAGE: &str = "Failed to load website content. Please try again later.";

/// Loading overlay visibility.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Overlay {
    #[default]
    Shown,
    Faded,
    Hidden,
}

impl Overlay {
    fn patches(self) -> Vec<Patch> {
        let screen = || Target::id("loading-screen");
        match self {
            Self::Shown => Vec::new(),
            Self::Faded => vec![Patch::style(screen(), "opacity", "0")],
            Self::Hidden => vec![
                Patch::style(screen(), "opacity", "0"),
                Patch::style(screen(), "display", "none"),
            ],
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum TimerKind {
    ArmReveal,
    FadeOverlay,
    HideOverlay,
}

#[derive(Debug, Clone, Copy)]
struct Timer {
    at: Duration,
    kind: TimerKind,
}

/// Everything interaction handlers may change.
#[derive(Debug, Clone)]
pub struct PageState<'a> {
    data: Option<&'a PageData>,
    pub menu: MobileMenu,
    pub navbar: Navbar,
    pub search: SearchPanel,
    pub reveal: RevealTracker,
    pub images: ImageFade,
    pub theme: Theme,
    pub overlay: Overlay,
}

/// A bootstrapped page: its document, interaction state and pending timers.
pub struct Page<'a> {
    document: Document,
    state: PageState<'a>,
    dispatcher: Dispatcher<PageState<'a>>,
    timers: Vec<Timer>,
    elapsed: Duration,
    failed: bool,
}

/// Build a page from `template` and the outcome of the data load.
pub fn bootstrap<'a>(
    template: &str,
    data: Result<&'a PageData, &LoadError>,
    options: &RenderOptions,
) -> Result<Page<'a>> {
    match data {
        Ok(data) => Page::ready(template, data, options),
        Err(_) => Page::failed(template),
    }
}

impl<'a> Page<'a> {
    fn ready(template: &str, data: &'a PageData, options: &RenderOptions) -> Result<Self> {
        let mut populated = Document::parse(template)?;
        populated.apply_all(render::populate(data, options));
        if options.controls {
            populated.apply(SearchPanel::mount());
            populated.apply(options.theme.mount());
        }
        let document = Document::parse(populated.render()?)?;

        let images = if document.contains(&Target::tag("img")) {
            ImageFade::Loading
        } else {
            ImageFade::Complete
        };
        let state = PageState {
            data: Some(data),
            menu: MobileMenu::default(),
            navbar: Navbar::default(),
            search: SearchPanel::new(),
            reveal: RevealTracker::new(&document),
            images,
            theme: options.theme,
            overlay: Overlay::Shown,
        };

        let mut page = Self {
            document,
            state,
            dispatcher: Dispatcher::new(),
            timers: Vec::new(),
            elapsed: Duration::ZERO,
            failed: false,
        };
        page.init_navigation();
        page.init_search();
        page.init_animations();
        page.hide_overlay();
        Ok(page)
    }

    fn failed(template: &str) -> Result<Self> {
        let mut document = Document::parse(template)?;
        document.apply(Patch::html(Target::id("loading-screen"), error_panel(ERROR_MESSAGE)));
        let state = PageState {
            data: None,
            menu: MobileMenu::default(),
            navbar: Navbar::default(),
            search: SearchPanel::new(),
            reveal: RevealTracker::new(&document),
            images: ImageFade::Complete,
            theme: Theme::default(),
            overlay: Overlay::Shown,
        };

        let mut dispatcher: Dispatcher<PageState<'a>> = Dispatcher::new();
        dispatcher.register(ActionKind::Reload, |_, _| Some(Effect::Reload));

        Ok(Self {
            document,
            state,
            dispatcher,
            timers: Vec::new(),
            elapsed: Duration::ZERO,
            failed: true,
        })
    }

    fn init_navigation(&mut self) {
        let d = &mut self.dispatcher;
        d.register(ActionKind::ToggleMenu, |s, _| {
            s.menu.toggle();
            None
        });
        d.register(ActionKind::CloseMenu, |s, _| {
            s.menu.close();
            None
        });
        d.register(ActionKind::Scroll, |s, action| {
            if let Action::Scroll(y) = action {
                s.navbar.on_scroll(*y);
            }
            None
        });
        d.register(ActionKind::Navigate, |s, action| {
            let Action::Navigate(section) = action else {
                return None;
            };
            s.search.close();
            nav::route(section).map(Effect::Location)
        });
        d.register(ActionKind::ToggleTheme, |s, _| {
            s.theme = s.theme.toggled();
            Some(Effect::SaveTheme(s.theme))
        });
    }

    fn init_search(&mut self) {
        let d = &mut self.dispatcher;
        d.register(ActionKind::ToggleSearch, |s, _| {
            s.search.toggle();
            None
        });
        d.register(ActionKind::CloseSearch, |s, _| {
            s.search.close();
            None
        });
        d.register(ActionKind::Query, |s, action| {
            if let (Action::Query(query), Some(data)) = (action, s.data) {
                s.search.set_query(data, query);
            }
            None
        });
        d.register(ActionKind::Select, |s, action| {
            let Action::Select(index) = action else {
                return None;
            };
            s.search.select(*index).map(|section| Effect::Location(section.page()))
        });
    }

    fn init_animations(&mut self) {
        self.schedule(SETTLE_DELAY, TimerKind::ArmReveal);
        let d = &mut self.dispatcher;
        d.register(ActionKind::Reveal, |s, action| {
            if let Action::Reveal { role, index, ratio } = action {
                s.reveal.observe(role, *index, *ratio);
            }
            None
        });
        d.register(ActionKind::ImagesLoaded, |s, _| {
            s.images.on_load();
            None
        });
    }

    fn hide_overlay(&mut self) {
        self.schedule(FADE_DELAY, TimerKind::FadeOverlay);
        self.schedule(FADE_DELAY + HIDE_DELAY, TimerKind::HideOverlay);
    }

    fn schedule(&mut self, delay: Duration, kind: TimerKind) {
        self.timers.push(Timer { at: self.elapsed + delay, kind });
        self.timers.sort_by_key(|t| t.at);
    }

    #[cfg(test)]
    pub const fn is_failed(&self) -> bool {
        self.failed
    }

    pub const fn state(&self) -> &PageState<'a> {
        &self.state
    }

    #[cfg(test)]
    pub const fn elapsed(&self) -> Duration {
        self.elapsed
    }

    /// Feed one input event through the dispatcher.
    pub fn dispatch(&mut self, event: &InputEvent) -> Vec<Effect> {
        self.dispatcher.dispatch(&mut self.state, event)
    }

    /// Let time pass, firing every timer that comes due.
    pub fn advance(&mut self, by: Duration) {
        self.elapsed += by;
        let due = self.timers.partition_point(|t| t.at <= self.elapsed);
        for timer in self.timers.drain(..due) {
            match timer.kind {
                TimerKind::ArmReveal => self.state.reveal.arm(),
                TimerKind::FadeOverlay => self.state.overlay = Overlay::Faded,
                TimerKind::HideOverlay => self.state.overlay = Overlay::Hidden,
            }
        }
    }

    /// Run every timer, finish image loads and bring every element into view.
    ///
    /// This is the state written by `build`.
    pub fn settle(&mut self) {
        if let Some(last) = self.timers.last().map(|t| t.at) {
            self.advance(last.saturating_sub(self.elapsed));
        }
        self.dispatch(&InputEvent::ImagesLoaded);

        // Layout is unknown here: scroll each hidden element fully into view.
        let hidden: Vec<_> = self.state.reveal.hidden().collect();
        for (role, index) in hidden {
            let bounds = Bounds { top: 0.0, height: 1.0 };
            self.dispatch(&InputEvent::Visibility {
                role: role.to_owned(),
                index,
                bounds,
                viewport: Viewport::around(bounds),
            });
        }
    }

    /// Serialize the page in its current state.
    pub fn render(&self) -> Result<String> {
        if self.failed {
            return self.document.render();
        }
        let s = &self.state;
        let mut document = self.document.clone();
        document.apply_all(s.menu.patches());
        document.apply_all(s.navbar.patches());
        document.apply_all(s.search.patches());
        document.apply_all(s.theme.patches());
        document.apply_all(s.reveal.patches());
        document.apply_all(s.images.patches());
        document.apply_all(s.overlay.patches());
        document.render()
    }
}

/// Markup replacing the loading overlay's content on failure.
fn error_panel(message: &str) -> String {
    format!(
        concat!(
            r#"<div class="error-panel" style="text-align: center; color: var(--accent-color);">"#,
            r#"<i class="fas fa-exclamation-triangle" style="font-size: 3rem; margin-bottom: 1rem;"></i>"#,
            "<h2>Error Loading Website</h2>",
            "<p>{}</p>",
            r#"<button class="retry-button" data-action="reload" onclick="location.reload()">Try Again</button>"#,
            "</div>"
        ),
        esc(message)
    )
}
