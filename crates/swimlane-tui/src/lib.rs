//! swimlane-tui: Terminal view for swimlane timelines
//!
//! This crate draws a timeline in the terminal, including:
//! - A lane name column and a bars pane with a month ruler
//! - Vertical scrolling of the bars pane, with the name column following
//! - Tag based bar colors, or plain fill glyphs under `NO_COLOR`

mod app;
mod event;
pub mod theme;
#[cfg(test)]
pub mod test_utils;
mod ui;
pub mod widgets;

pub use app::{PaneScroll, TimelineApp, SCROLL_STEP};
pub use event::{key_to_action, mouse_to_action, Action, Event, EventHandler};
pub use swimlane_engine;
pub use theme::Theme;

use crossterm::{
    cursor::Show as ShowCursor,
    event::{DisableMouseCapture, EnableMouseCapture},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};
use std::io::{self, stdout};
use swimlane_engine::TimelineDocument;
use tracing::debug;

/// RAII guard for terminal state restoration.
struct TerminalGuard;

impl Drop for TerminalGuard {
    fn drop(&mut self) {
        let _ = disable_raw_mode();
        let _ = execute!(stdout(), DisableMouseCapture, LeaveAlternateScreen, ShowCursor);
    }
}

/// Run the TUI application.
///
/// This is the main entry point for the TUI. It sets up the terminal,
/// runs the event loop, and restores the terminal on exit.
pub async fn run_tui(document: TimelineDocument) -> Result<(), Box<dyn std::error::Error>> {
    // Setup terminal with RAII guard for cleanup
    enable_raw_mode()?;
    let _guard = TerminalGuard;

    let mut stdout = stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let mut app = TimelineApp::new(document, Theme::from_env());
    app.resize(terminal.size()?.height);

    // Create event handler (4 Hz tick rate = 250ms)
    let mut events = EventHandler::new(250);

    let result = run_loop(&mut terminal, &mut app, &mut events).await;

    // Restore cursor before guard drops
    terminal.show_cursor()?;

    result
}

async fn run_loop(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    app: &mut TimelineApp,
    events: &mut EventHandler,
) -> Result<(), Box<dyn std::error::Error>> {
    loop {
        terminal.draw(|frame| {
            let area = frame.area();
            ui::render(app, area, frame.buffer_mut());
        })?;

        match events.next().await {
            Some(Event::Key(key)) => app.handle_action(key_to_action(key)),
            Some(Event::Mouse(mouse)) => app.handle_action(mouse_to_action(mouse)),
            Some(Event::Resize(width, height)) => {
                debug!(width, height, "terminal resized");
                app.resize(height);
            }
            Some(Event::Tick) => {}
            None => break,
        }

        if app.should_quit {
            break;
        }
    }

    Ok(())
}

/// Get the TUI version.
pub fn tui_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tui_version() {
        let version = tui_version();
        assert!(!version.is_empty());
        assert!(version.starts_with("0."));
    }
}

#[cfg(test)]
mod snapshot_tests {
    use super::*;
    use crate::test_utils::*;
    use insta::assert_snapshot;

    #[test]
    fn test_snapshot_small_timeline() {
        let app = create_test_app(small_document(), 10);
        let result = render_app_to_string(&app, 36, 10);
        assert_snapshot!("small_timeline", result);
    }

    #[test]
    fn test_scrolled_panes_stay_aligned() {
        let mut app = create_test_app(small_document(), 6);
        // 8 content rows, 4 visible.
        app.handle_action(Action::Bottom);
        assert_eq!(app.bars_offset(), 4);

        let result = render_app_to_string(&app, 36, 6);
        let lines: Vec<&str> = result.lines().collect();
        // Ops (content row 6) lands on the third viewport row, next to its bar.
        assert!(lines[3].starts_with("Ops"));
        assert!(lines[3].contains('C'));
        assert!(!result.contains("Web"));
    }

    #[test]
    fn test_sample_timeline_renders_every_lane_header() {
        let app = create_test_app(TimelineDocument::sample(), 40);
        let result = render_app_to_string(&app, 100, 40);
        for name in ["E-Comm", "Mobile", "Infrastructure", "Infrastructure2", "Infrastructure3"] {
            assert!(result.contains(name), "missing lane {name}");
        }
        assert!(result.contains("Jan"));
        assert!(result.contains("Dec"));
        assert!(result.contains("q quit"));
    }
}
