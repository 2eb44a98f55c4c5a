//! Input events, logical actions and the dispatcher between them.
//!
//! Raw [`InputEvent`]s (clicks, scrolls, key presses, search input) are first
//! translated into [`Action`]s. The [`Dispatcher`] then runs the handlers
//! registered for each action's [`ActionKind`], in registration order.
//! Actions nobody registered for are dropped, which is how a page that never
//! initialized navigation ignores menu clicks.
//!
//! | Event                         | Actions                     |
//! |-------------------------------|-----------------------------|
//! | `Ctrl/Cmd+K`                  | `ToggleSearch`              |
//! | `Escape`                      | `CloseSearch`               |
//! | click `.nav-toggle`           | `ToggleMenu`                |
//! | click `.nav-link`             | `CloseMenu`                 |
//! | click `[data-section]`        | `Navigate`                  |
//! | scroll                        | `Scroll`                    |
//! | type in `#search-input`       | `Query`                     |
//! | pick a search result          | `Select`                    |
//! | element intersects viewport   | `Reveal`                    |

pub mod animate;
pub mod nav;
pub mod theme;

use animate::{Bounds, Viewport};
use rustc_hash::FxHashMap;
use theme::Theme;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Key {
    Char(char),
    Escape,
    Enter,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct KeyPress {
    pub key: Key,
    pub ctrl: bool,
    /// Cmd on macOS.
    pub meta: bool,
}

impl KeyPress {
    pub const fn plain(key: Key) -> Self {
        Self { key, ctrl: false, meta: false }
    }

    pub const fn ctrl(key: Key) -> Self {
        Self { key, ctrl: true, meta: false }
    }
}

/// Clickable controls the page knows about.
///
/// The terminal prompt delivers theme toggles and section jumps; the menu,
/// close and retry buttons only exist for hosts with a pointer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Control {
    #[allow(dead_code)] // Reserved API
    NavToggle,
    #[allow(dead_code)] // Reserved API
    NavLink,
    /// An element carrying `data-section`.
    Section(String),
    #[allow(dead_code)] // Reserved API
    SearchClose,
    ThemeToggle,
    /// The "Try Again" button of the error panel.
    #[allow(dead_code)] // Reserved API
    Retry,
}

#[derive(Debug, Clone, PartialEq)]
pub enum InputEvent {
    Click(Control),
    #[allow(dead_code)] // Reserved API
    Scroll(f64),
    Key(KeyPress),
    SearchInput(String),
    SelectResult(usize),
    Visibility {
        role: String,
        index: usize,
        bounds: Bounds,
        viewport: Viewport,
    },
    ImagesLoaded,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ActionKind {
    ToggleSearch,
    CloseSearch,
    Navigate,
    ToggleMenu,
    CloseMenu,
    Scroll,
    Query,
    Select,
    Reveal,
    ImagesLoaded,
    ToggleTheme,
    Reload,
}

#[derive(Debug, Clone, PartialEq)]
pub enum Action {
    ToggleSearch,
    CloseSearch,
    Navigate(String),
    ToggleMenu,
    CloseMenu,
    Scroll(f64),
    Query(String),
    Select(usize),
    Reveal { role: String, index: usize, ratio: f64 },
    ImagesLoaded,
    ToggleTheme,
    Reload,
}

impl Action {
    pub const fn kind(&self) -> ActionKind {
        match self {
            Self::ToggleSearch => ActionKind::ToggleSearch,
            Self::CloseSearch => ActionKind::CloseSearch,
            Self::Navigate(_) => ActionKind::Navigate,
            Self::ToggleMenu => ActionKind::ToggleMenu,
            Self::CloseMenu => ActionKind::CloseMenu,
            Self::Scroll(_) => ActionKind::Scroll,
            Self::Query(_) => ActionKind::Query,
            Self::Select(_) => ActionKind::Select,
            Self::Reveal { .. } => ActionKind::Reveal,
            Self::ImagesLoaded => ActionKind::ImagesLoaded,
            Self::ToggleTheme => ActionKind::ToggleTheme,
            Self::Reload => ActionKind::Reload,
        }
    }

    /// Translate a raw event. Most events map to one action; some to none.
    pub fn from_event(event: &InputEvent) -> Vec<Self> {
        match event {
            InputEvent::Click(control) => vec![match control {
                Control::NavToggle => Self::ToggleMenu,
                Control::NavLink => Self::CloseMenu,
                Control::Section(id) => Self::Navigate(id.clone()),
                Control::SearchClose => Self::CloseSearch,
                Control::ThemeToggle => Self::ToggleTheme,
                Control::Retry => Self::Reload,
            }],
            InputEvent::Scroll(y) => vec![Self::Scroll(*y)],
            InputEvent::Key(press) => {
                let mut actions = Vec::new();
                if (press.ctrl || press.meta) && press.key == Key::Char('k') {
                    actions.push(Self::ToggleSearch);
                }
                if press.key == Key::Escape {
                    actions.push(Self::CloseSearch);
                }
                actions
            }
            InputEvent::SearchInput(text) => vec![Self::Query(text.clone())],
            InputEvent::SelectResult(index) => vec![Self::Select(*index)],
            InputEvent::Visibility { role, index, bounds, viewport } => vec![Self::Reveal {
                role: role.clone(),
                index: *index,
                ratio: viewport.visible_ratio(*bounds),
            }],
            InputEvent::ImagesLoaded => vec![Self::ImagesLoaded],
        }
    }
}

/// Something a handler asks the host to do outside the page.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Effect {
    /// Load another page.
    Location(&'static str),
    /// Reload the current page.
    Reload,
    /// Persist the theme preference.
    SaveTheme(Theme),
}

/// A registered reaction to an action.
pub type Handler<S> = fn(&mut S, &Action) -> Option<Effect>;

/// Routes actions to the handlers registered for their kind.
pub struct Dispatcher<S> {
    handlers: FxHashMap<ActionKind, Vec<Handler<S>>>,
}

impl<S> Default for Dispatcher<S> {
    fn default() -> Self {
        Self { handlers: FxHashMap::default() }
    }
}

impl<S> Dispatcher<S> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn register(&mut self, kind: ActionKind, handler: Handler<S>) {
        self.handlers.entry(kind).or_default().push(handler);
    }

    #[cfg(test)]
    pub fn handles(&self, kind: ActionKind) -> bool {
        self.handlers.contains_key(&kind)
    }

    /// Run the handlers for one action.
    pub fn run(&self, state: &mut S, action: &Action) -> Vec<Effect> {
        self.handlers
            .get(&action.kind())
            .into_iter()
            .flatten()
            .filter_map(|handler| handler(state, action))
            .collect()
    }

    /// Translate an event and run every resulting action.
    pub fn dispatch(&self, state: &mut S, event: &InputEvent) -> Vec<Effect> {
        Action::from_event(event)
            .iter()
            .flat_map(|action| self.run(state, action))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Default)]
    struct Counter {
        toggles: u32,
        closes: u32,
    }

    fn counting() -> Dispatcher<Counter> {
        let mut dispatcher = Dispatcher::new();
        dispatcher.register(ActionKind::ToggleSearch, |s: &mut Counter, _| {
            s.toggles += 1;
            None
        });
        dispatcher.register(ActionKind::CloseSearch, |s: &mut Counter, _| {
            s.closes += 1;
            None
        });
        dispatcher
    }

    #[test]
    fn test_keyboard_shortcuts() {
        assert_eq!(
            Action::from_event(&InputEvent::Key(KeyPress::ctrl(Key::Char('k')))),
            [Action::ToggleSearch]
        );
        let cmd_k = KeyPress { key: Key::Char('k'), ctrl: false, meta: true };
        assert_eq!(Action::from_event(&InputEvent::Key(cmd_k)), [Action::ToggleSearch]);
        assert_eq!(
            Action::from_event(&InputEvent::Key(KeyPress::plain(Key::Escape))),
            [Action::CloseSearch]
        );
        assert!(Action::from_event(&InputEvent::Key(KeyPress::plain(Key::Char('k')))).is_empty());
    }

    #[test]
    fn test_dispatch_runs_registered_handlers() {
        let dispatcher = counting();
        let mut state = Counter::default();

        dispatcher.dispatch(&mut state, &InputEvent::Key(KeyPress::ctrl(Key::Char('k'))));
        dispatcher.dispatch(&mut state, &InputEvent::Key(KeyPress::plain(Key::Escape)));
        dispatcher.dispatch(&mut state, &InputEvent::Click(Control::SearchClose));

        assert_eq!(state.toggles, 1);
        assert_eq!(state.closes, 2);
    }

    #[test]
    fn test_unregistered_actions_are_dropped() {
        let dispatcher = counting();
        let mut state = Counter::default();

        assert!(!dispatcher.handles(ActionKind::ToggleMenu));
        let effects = dispatcher.dispatch(&mut state, &InputEvent::Click(Control::NavToggle));
        assert!(effects.is_empty());
    }

    #[test]
    fn test_effects_are_collected() {
        let mut dispatcher: Dispatcher<()> = Dispatcher::new();
        dispatcher.register(ActionKind::Reload, |_, _| Some(Effect::Reload));

        let effects = dispatcher.dispatch(&mut (), &InputEvent::Click(Control::Retry));
        assert_eq!(effects, [Effect::Reload]);
    }
}
