//! TUI rendering logic.

use cinerec_api::backend::SearchMode;
use ratatui::Frame;
use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, List, ListItem, Paragraph};

use crate::app::{App, Focus};
use crate::search_panel::{SearchPanel, input_placeholder, mode_label};

/// Application title shown in the header.
const APP_TITLE: &str = "Movie Recommendation Engine";

/// Width reserved for one poster slot in the marquee strip.
const MARQUEE_SLOT_WIDTH: u16 = 36;

/// Border style for a widget, highlighted when focused.
fn focus_style(focused: bool) -> Style {
    if focused {
        Style::default().fg(Color::Cyan)
    } else {
        Style::default()
    }
}

/// Draws the whole application.
#[allow(clippy::indexing_slicing)]
pub fn draw(frame: &mut Frame, app: &App) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // header
            Constraint::Length(3), // marquee
            Constraint::Length(3), // mode selector
            Constraint::Length(3), // input + button
            Constraint::Min(5),    // results
            Constraint::Length(3), // footer
        ])
        .split(frame.area());

    let header = Paragraph::new(Line::from(Span::styled(
        APP_TITLE,
        Style::default().add_modifier(Modifier::BOLD),
    )))
    .block(Block::default().borders(Borders::ALL));
    frame.render_widget(header, chunks[0]);

    draw_marquee(frame, chunks[1], app);
    draw_modes(frame, chunks[2], app);
    draw_input_row(frame, chunks[3], app);
    draw_results(frame, chunks[4], &app.panel);
    draw_footer(frame, chunks[5], app);
}

/// Short poster reference: the last path segment of the poster URL.
fn poster_ref(path: &str) -> &str {
    path.rsplit('/').next().unwrap_or(path)
}

/// Draws the popular-movie strip.
fn draw_marquee(frame: &mut Frame, area: Rect, app: &App) {
    let slots = usize::from(area.width.saturating_sub(2) / MARQUEE_SLOT_WIDTH).max(1);
    let spans: Vec<Span> = app
        .marquee
        .visible(slots)
        .flat_map(|movie| {
            [
                Span::styled(
                    format!(" {} ", movie.title),
                    Style::default().fg(Color::Yellow),
                ),
                Span::styled(
                    format!("[{}] ", poster_ref(&movie.poster_path)),
                    Style::default().fg(Color::DarkGray),
                ),
                Span::raw("\u{2502}"),
            ]
        })
        .collect();

    let strip = Paragraph::new(Line::from(spans)).block(
        Block::default()
            .borders(Borders::ALL)
            .title(" Popular "),
    );
    frame.render_widget(strip, area);
}

/// Draws the radio-style mode selector.
fn draw_modes(frame: &mut Frame, area: Rect, app: &App) {
    let current = app.panel.search_mode();
    let spans: Vec<Span> = SearchMode::ALL
        .iter()
        .map(|mode| {
            let (marker, style) = if *mode == current {
                (
                    "(\u{2022})",
                    Style::default()
                        .fg(Color::Green)
                        .add_modifier(Modifier::BOLD),
                )
            } else {
                ("( )", Style::default())
            };
            Span::styled(format!(" {marker} {}  ", mode_label(*mode)), style)
        })
        .collect();

    let modes = Paragraph::new(Line::from(spans)).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(focus_style(app.focus == Focus::Mode))
            .title(" Search by "),
    );
    frame.render_widget(modes, area);
}

/// Draws the query input and the submit button.
#[allow(clippy::indexing_slicing)]
fn draw_input_row(frame: &mut Frame, area: Rect, app: &App) {
    let row = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(70), Constraint::Percentage(30)])
        .split(area);

    let panel = &app.panel;
    let input_line = match input_placeholder(panel.search_mode()) {
        Some(placeholder) if panel.query().is_empty() => Line::from(Span::styled(
            placeholder,
            Style::default().fg(Color::DarkGray),
        )),
        Some(_) => Line::from(panel.query()),
        None => {
            let option = SearchPanel::genre_options()
                .nth(panel.genre_cursor())
                .unwrap_or_default();
            Line::from(format!("\u{25c2} {option} \u{25b8}"))
        }
    };

    let input = Paragraph::new(input_line).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(focus_style(app.focus == Focus::Input)),
    );
    frame.render_widget(input, row[0]);

    let button_style = if !panel.button_enabled() {
        Style::default().fg(Color::DarkGray)
    } else if app.focus == Focus::Button {
        Style::default()
            .fg(Color::Cyan)
            .add_modifier(Modifier::BOLD)
    } else {
        Style::default()
    };
    let button = Paragraph::new(Span::styled(panel.button_label(), button_style)).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(focus_style(app.focus == Focus::Button)),
    );
    frame.render_widget(button, row[1]);
}

/// Draws the error line or the result cards.
fn draw_results(frame: &mut Frame, area: Rect, panel: &SearchPanel) {
    if let Some(message) = panel.request_state().error() {
        let error = Paragraph::new(Span::styled(message, Style::default().fg(Color::Red)))
            .block(Block::default().borders(Borders::ALL));
        frame.render_widget(error, area);
        return;
    }

    if !panel.shows_results() {
        frame.render_widget(Block::default().borders(Borders::ALL), area);
        return;
    }

    let items: Vec<ListItem> = panel
        .cards()
        .into_iter()
        .map(|card| {
            ListItem::new(vec![
                Line::from(Span::styled(
                    String::from(card.title),
                    Style::default().add_modifier(Modifier::BOLD),
                )),
                Line::from(Span::styled(
                    format!("  {}", card.poster.text()),
                    Style::default().fg(Color::DarkGray),
                )),
            ])
        })
        .collect();

    let list = List::new(items).block(
        Block::default()
            .borders(Borders::ALL)
            .title(" Results: "),
    );
    frame.render_widget(list, area);
}

/// Draws the footer with key hints.
fn draw_footer(frame: &mut Frame, area: Rect, app: &App) {
    let help_text = match app.focus {
        Focus::Mode => "Tab: next field  \u{2190}\u{2192}: change mode  Esc: quit",
        Focus::Input if app.panel.search_mode() == SearchMode::Genre => {
            "Tab: next field  \u{2191}\u{2193}: choose genre  Enter: go to button  Esc: quit"
        }
        Focus::Input => "Tab: next field  Enter: search  Esc: quit",
        Focus::Button => "Tab: next field  Enter/Space: search  Esc: quit",
    };

    let footer = Paragraph::new(help_text).block(Block::default().borders(Borders::ALL));
    frame.render_widget(footer, area);
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]

    use cinerec_api::backend::{PopularMovie, Recommendation, RequestError};
    use ratatui::Terminal;
    use ratatui::backend::TestBackend;

    use super::*;

    fn render(app: &App) -> String {
        let mut terminal = Terminal::new(TestBackend::new(100, 30)).unwrap();
        terminal.draw(|frame| draw(frame, app)).unwrap();
        terminal
            .backend()
            .buffer()
            .content()
            .iter()
            .map(ratatui::buffer::Cell::symbol)
            .collect()
    }

    #[test]
    fn test_draw_idle_shows_placeholder_and_button() {
        // Arrange
        let app = App::new();

        // Act
        let screen = render(&app);

        // Assert
        assert!(screen.contains("Movie Recommendation Engine"));
        assert!(screen.contains("Enter a movie title..."));
        assert!(screen.contains("Get Recommendations"));
        assert!(screen.contains("For You (User ID)"));
    }

    #[test]
    fn test_draw_results_with_placeholder_poster() {
        // Arrange
        let mut app = App::new();
        app.panel.set_query("Heat");
        app.panel.begin_submit();
        app.panel
            .resolve(Ok(vec![Recommendation::Title(String::from("Ronin"))]));

        // Act
        let screen = render(&app);

        // Assert
        assert!(screen.contains("Results:"));
        assert!(screen.contains("Ronin"));
        assert!(screen.contains("No Poster Available"));
    }

    #[test]
    fn test_draw_error_hides_results() {
        // Arrange
        let mut app = App::new();
        app.panel.set_query("Heat");
        app.panel.begin_submit();
        app.panel.resolve(Err(RequestError::Status {
            status: 404,
            message: String::from("Not found"),
        }));

        // Act
        let screen = render(&app);

        // Assert
        assert!(screen.contains("Not found"));
        assert!(!screen.contains("Results:"));
    }

    #[test]
    fn test_draw_loading_button() {
        // Arrange
        let mut app = App::new();
        app.panel.set_query("Heat");
        app.panel.begin_submit();

        // Act
        let screen = render(&app);

        // Assert
        assert!(screen.contains("Searching..."));
    }

    #[test]
    fn test_draw_marquee_titles() {
        // Arrange
        let mut app = App::new();
        app.marquee.load(Ok(vec![PopularMovie {
            title: String::from("Dune"),
            poster_path: String::from("https://img.example/w500/dune.jpg"),
        }]));

        // Act
        let screen = render(&app);

        // Assert
        assert!(screen.contains("Dune"));
        assert!(screen.contains("[dune.jpg]"));
    }

    #[test]
    fn test_poster_ref() {
        // Assert
        assert_eq!(poster_ref("https://img.example/w500/x.jpg"), "x.jpg");
        assert_eq!(poster_ref("p1"), "p1");
        assert_eq!(poster_ref(""), "");
    }

    #[test]
    fn test_draw_genre_placeholder() {
        // Arrange
        let mut app = App::new();
        app.panel.set_search_mode(SearchMode::Genre);

        // Act
        let screen = render(&app);

        // Assert
        assert!(screen.contains("-- Select a Genre --"));
    }
}
