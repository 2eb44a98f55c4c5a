//! Interactive terminal search.
//!
//! The prompt hosts a live page: the site's `index.html` template (or the
//! built-in starter page) is bootstrapped with the loaded data, and keys are
//! delivered to it as the same [`InputEvent`]s the browser page receives.
//!
//! | Key            | Effect                               |
//! |----------------|--------------------------------------|
//! | typing         | re-run the query                     |
//! | `Ctrl/Cmd+K`   | show or hide the results panel       |
//! | `Esc`          | close the panel, clearing the query  |
//! | `Up` / `Down`  | move the selection                   |
//! | `Enter`        | open the selected result             |
//! | `Ctrl+T`       | toggle and save the theme            |
//! | `Alt+1`..`5`   | jump to a section                    |
//! | `Ctrl+C`       | quit                                 |

use crate::{
    config::SiteConfig,
    data::PageData,
    embed::INDEX_TEMPLATE,
    interact::{Control, Effect, InputEvent, Key, KeyPress, nav::Section, theme::Theme},
    lifecycle::{self, Page},
    log,
    render::RenderOptions,
    search::PanelState,
};
use anyhow::Result;
use colored::Colorize;
use crossterm::{
    cursor::{MoveToColumn, MoveUp},
    event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers},
    execute,
    terminal::{self, Clear, ClearType},
};
use std::{
    fs,
    io::{Write, stdout},
    path::Path,
    time::Instant,
};

/// What one key press asks the prompt to do.
#[derive(Debug, Clone, PartialEq)]
enum Command {
    Event(InputEvent),
    Move(isize),
    Quit,
    Ignore,
}

/// Translate a key press, editing `input` for printable characters.
fn translate(key: KeyEvent, input: &mut String) -> Command {
    let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);
    let meta = key.modifiers.contains(KeyModifiers::SUPER);
    let alt = key.modifiers.contains(KeyModifiers::ALT);
    match key.code {
        KeyCode::Char('c') if ctrl => Command::Quit,
        KeyCode::Char('t') if ctrl => Command::Event(InputEvent::Click(Control::ThemeToggle)),
        KeyCode::Char(c) if alt => c
            .to_digit(10)
            .and_then(|n| Section::ALL.get((n as usize).checked_sub(1)?))
            .map_or(Command::Ignore, |section| {
                Command::Event(InputEvent::Click(Control::Section(section.id().to_owned())))
            }),
        KeyCode::Char(c) if ctrl || meta => {
            Command::Event(InputEvent::Key(KeyPress { key: Key::Char(c), ctrl, meta }))
        }
        KeyCode::Char(c) => {
            input.push(c);
            Command::Event(InputEvent::SearchInput(input.clone()))
        }
        KeyCode::Backspace => {
            input.pop();
            Command::Event(InputEvent::SearchInput(input.clone()))
        }
        KeyCode::Esc => {
            input.clear();
            Command::Event(InputEvent::Key(KeyPress::plain(Key::Escape)))
        }
        KeyCode::Up => Command::Move(-1),
        KeyCode::Down => Command::Move(1),
        KeyCode::Enter => Command::Event(InputEvent::Key(KeyPress::plain(Key::Enter))),
        _ => Command::Ignore,
    }
}

/// Run the prompt until a page is opened or the user quits.
pub fn run(config: &SiteConfig, data: &PageData) -> Result<()> {
    let template = load_template(config);
    let theme_path = config.theme_state_path();
    let mut options = RenderOptions::from_config(config);
    options.theme = Theme::load(&theme_path, config.site.theme);

    let mut page = lifecycle::bootstrap(&template, Ok(data), &options)?;
    deliver(&mut page, &InputEvent::Key(KeyPress::ctrl(Key::Char('k'))), &theme_path)?;

    terminal::enable_raw_mode()?;
    let outcome = event_loop(&mut page, &theme_path);
    terminal::disable_raw_mode()?;

    if let Some(target) = outcome? {
        log!("search"; "open {target}");
    }
    Ok(())
}

fn load_template(config: &SiteConfig) -> String {
    let path = config.build.templates.join("index.html");
    match fs::read_to_string(&path) {
        Ok(template) => template,
        Err(_) => {
            log!("search"; "{} not found, using the starter page", path.display());
            INDEX_TEMPLATE.to_owned()
        }
    }
}

/// Deliver one event to the page and act on the effects it asks for.
///
/// Returns the page to open when a handler navigates away.
fn deliver(page: &mut Page<'_>, event: &InputEvent, theme_path: &Path) -> Result<Option<&'static str>> {
    for effect in page.dispatch(event) {
        match effect {
            Effect::Location(target) => return Ok(Some(target)),
            Effect::SaveTheme(theme) => theme.save(theme_path)?,
            Effect::Reload => {}
        }
    }
    Ok(None)
}

fn event_loop(page: &mut Page<'_>, theme_path: &Path) -> Result<Option<&'static str>> {
    let mut input = String::new();
    let mut selected = 0usize;
    let mut drawn = draw(page, selected, 0)?;
    let mut last = Instant::now();

    loop {
        let Event::Key(key) = event::read()? else {
            continue;
        };
        if key.kind != KeyEventKind::Press {
            continue;
        }

        let now = Instant::now();
        page.advance(now - last);
        last = now;

        let event = match translate(key, &mut input) {
            Command::Quit => return Ok(None),
            Command::Ignore => continue,
            Command::Move(delta) => {
                let count = page.state().search.results().len();
                if count > 0 {
                    selected = selected.saturating_add_signed(delta).min(count - 1);
                }
                drawn = draw(page, selected, drawn)?;
                continue;
            }
            Command::Event(InputEvent::Key(KeyPress { key: Key::Enter, .. })) => {
                InputEvent::SelectResult(selected)
            }
            Command::Event(event) => event,
        };

        if matches!(event, InputEvent::SearchInput(_)) {
            selected = 0;
        }
        if let Some(target) = deliver(page, &event, theme_path)? {
            clear(drawn)?;
            return Ok(Some(target));
        }
        drawn = draw(page, selected, drawn)?;
    }
}

/// Erase the previous frame (`lines` tall) and draw the current one.
fn draw(page: &Page<'_>, selected: usize, lines: u16) -> Result<u16> {
    clear(lines)?;
    let state = page.state();
    let search = &state.search;
    let mut out = stdout().lock();

    let label = format!("search [{}]>", state.theme);
    let label = if search.is_focused() { label.bright_green().bold() } else { label.dimmed() };
    write!(out, "{label} {}", search.query())?;

    let mut drawn = 0u16;
    if search.is_visible() {
        let rows: Vec<String> = match search.state() {
            PanelState::Idle => Vec::new(),
            PanelState::Active(hits) if hits.is_empty() => vec!["No results found".dimmed().to_string()],
            PanelState::Active(hits) => hits
                .iter()
                .enumerate()
                .map(|(i, hit)| {
                    let marker = if i == selected { ">" } else { " " };
                    format!(
                        "{marker} {}: {}  {}",
                        hit.kind.label().bright_yellow(),
                        hit.title,
                        hit.description.dimmed()
                    )
                })
                .collect(),
        };
        for row in rows {
            write!(out, "\r\n{row}")?;
            drawn += 1;
        }
    }
    out.flush()?;
    Ok(drawn)
}

fn clear(lines: u16) -> Result<()> {
    let mut out = stdout().lock();
    if lines > 0 {
        execute!(out, MoveUp(lines))?;
    }
    execute!(out, MoveToColumn(0), Clear(ClearType::FromCursorDown))?;
    Ok(())
}
