//! Top-level view composing the search panel and the poster marquee.

use cinerec_api::backend::SearchMode;
use crossterm::event::{KeyCode, KeyModifiers};

use crate::marquee::{MarqueeOutcome, PosterMarquee};
use crate::search_panel::{SearchOutcome, SearchPanel};

/// Which widget receives key input.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Focus {
    /// Search mode selector.
    Mode,
    /// Query input (free text or genre choice list).
    #[default]
    Input,
    /// Submit button.
    Button,
}

impl Focus {
    const fn next(self) -> Self {
        match self {
            Self::Mode => Self::Input,
            Self::Input => Self::Button,
            Self::Button => Self::Mode,
        }
    }

    const fn prev(self) -> Self {
        match self {
            Self::Mode => Self::Button,
            Self::Input => Self::Mode,
            Self::Button => Self::Input,
        }
    }
}

/// What the event loop must do after a key press.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppAction {
    /// Nothing beyond redrawing.
    None,
    /// Run the panel's submit.
    Submit,
    /// Leave the application.
    Quit,
}

/// Completed background work delivered to the UI loop.
#[derive(Debug)]
pub enum Message {
    /// A recommendation request finished.
    Search(SearchOutcome),
    /// The popular-movies fetch finished.
    Popular(MarqueeOutcome),
}

/// Application state.
#[derive(Debug, Default)]
pub struct App {
    /// Search form and results.
    pub panel: SearchPanel,
    /// Popular-movie banner.
    pub marquee: PosterMarquee,
    /// Focused widget.
    pub focus: Focus,
}

/// Returns the mode after (or before) `mode` in selector order, wrapping.
fn cycle_mode(mode: SearchMode, forward: bool) -> SearchMode {
    let all = SearchMode::ALL;
    let idx = all.iter().position(|m| *m == mode).unwrap_or(0);
    let next = if forward {
        idx.saturating_add(1).checked_rem(all.len()).unwrap_or(0)
    } else {
        idx.checked_sub(1).unwrap_or(all.len().saturating_sub(1))
    };
    all.get(next).copied().unwrap_or_default()
}

impl App {
    /// Creates the initial application state.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Applies a finished background result.
    pub fn apply(&mut self, message: Message) {
        match message {
            Message::Search(outcome) => self.panel.resolve(outcome),
            Message::Popular(outcome) => self.marquee.load(outcome),
        }
    }

    /// Handles one key press.
    pub fn handle_key(&mut self, key: KeyCode, modifiers: KeyModifiers) -> AppAction {
        match key {
            KeyCode::Esc => return AppAction::Quit,
            KeyCode::Char('c') if modifiers.contains(KeyModifiers::CONTROL) => {
                return AppAction::Quit;
            }
            KeyCode::Tab => {
                self.focus = self.focus.next();
                return AppAction::None;
            }
            KeyCode::BackTab => {
                self.focus = self.focus.prev();
                return AppAction::None;
            }
            _ => {}
        }

        match self.focus {
            Focus::Mode => self.handle_mode_key(key),
            Focus::Input => self.handle_input_key(key, modifiers),
            Focus::Button => self.handle_button_key(key),
        }
    }

    fn handle_mode_key(&mut self, key: KeyCode) -> AppAction {
        match key {
            KeyCode::Left | KeyCode::Up | KeyCode::Char('h' | 'k') => {
                let mode = cycle_mode(self.panel.search_mode(), false);
                self.panel.set_search_mode(mode);
            }
            KeyCode::Right | KeyCode::Down | KeyCode::Char('l' | 'j') => {
                let mode = cycle_mode(self.panel.search_mode(), true);
                self.panel.set_search_mode(mode);
            }
            KeyCode::Enter => self.focus = Focus::Input,
            _ => {}
        }
        AppAction::None
    }

    fn handle_input_key(&mut self, key: KeyCode, modifiers: KeyModifiers) -> AppAction {
        if self.panel.search_mode() == SearchMode::Genre {
            match key {
                KeyCode::Up => self.panel.select_prev_genre(),
                KeyCode::Down => self.panel.select_next_genre(),
                KeyCode::Enter => self.focus = Focus::Button,
                _ => {}
            }
            return AppAction::None;
        }

        match key {
            KeyCode::Enter => return AppAction::Submit,
            KeyCode::Backspace => {
                let mut query = String::from(self.panel.query());
                query.pop();
                self.panel.set_query(query);
            }
            KeyCode::Char(_)
                if modifiers.intersects(KeyModifiers::CONTROL | KeyModifiers::ALT) => {}
            KeyCode::Char(c) => {
                let mut query = String::from(self.panel.query());
                query.push(c);
                self.panel.set_query(query);
            }
            _ => {}
        }
        AppAction::None
    }

    fn handle_button_key(&self, key: KeyCode) -> AppAction {
        match key {
            KeyCode::Enter | KeyCode::Char(' ') if self.panel.button_enabled() => {
                AppAction::Submit
            }
            _ => AppAction::None,
        }
    }
}
