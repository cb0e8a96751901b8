//! Test utilities for swimlane-tui snapshot and integration testing.
//!
//! This module provides helper functions for building small timelines,
//! rendering them, and converting buffers to strings for snapshot testing.

use chrono::NaiveDate;
use ratatui::{backend::TestBackend, buffer::Buffer, layout::Rect, Terminal};
use swimlane_engine::{Epic, LayoutConstants, PackOrder, Swimlane, TimelineDocument, TimelineWindow};

use crate::app::TimelineApp;
use crate::theme::Theme;

/// Default terminal width for tests.
pub const TEST_WIDTH: u16 = 80;

/// Default terminal height for tests.
pub const TEST_HEIGHT: u16 = 24;

/// Create a test terminal with custom dimensions.
pub fn create_test_terminal_sized(width: u16, height: u16) -> Terminal<TestBackend> {
    let backend = TestBackend::new(width, height);
    Terminal::new(backend).expect("Failed to create test terminal")
}

fn jan(day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(2023, 1, day).expect("valid date")
}

/// A ten-day timeline with two lanes, small enough to check by eye.
///
/// "Web" packs into two rows; "Ops" has a single item.
pub fn small_document() -> TimelineDocument {
    TimelineDocument {
        window: TimelineWindow::new(jan(1), jan(10)).expect("valid window"),
        layout: LayoutConstants::default(),
        pack_order: PackOrder::Insertion,
        lanes: vec![
            Swimlane::new("Web")
                .with_item(Epic::new("A", jan(1), jan(5), "blue"))
                .with_item(Epic::new("B", jan(3), jan(8), "orange")),
            Swimlane::new("Ops").with_item(Epic::new("C", jan(6), jan(10), "yellow")),
        ],
    }
}

/// Create a monochrome test app sized for a `width` x `height` terminal.
pub fn create_test_app(document: TimelineDocument, height: u16) -> TimelineApp {
    let mut app = TimelineApp::new(document, Theme::monochrome());
    app.resize(height);
    app
}

/// Convert a buffer to a string representation for snapshot testing.
///
/// This produces a simple text representation of the buffer content,
/// suitable for snapshot comparison.
pub fn buffer_to_string(buffer: &Buffer) -> String {
    let area = buffer.area;
    let mut result = String::new();

    for y in area.y..area.y + area.height {
        for x in area.x..area.x + area.width {
            let cell = buffer.cell((x, y)).unwrap();
            result.push_str(cell.symbol());
        }
        // Trim trailing whitespace from each line
        while result.ends_with(' ') {
            result.pop();
        }
        result.push('\n');
    }

    // Remove trailing newline
    if result.ends_with('\n') {
        result.pop();
    }

    result
}

/// Render the timeline screen to a buffer and return it as a string.
pub fn render_app_to_string(app: &TimelineApp, width: u16, height: u16) -> String {
    let area = Rect::new(0, 0, width, height);
    let mut buffer = Buffer::empty(area);
    crate::ui::render(app, area, &mut buffer);
    buffer_to_string(&buffer)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_create_test_terminal() {
        let terminal = create_test_terminal_sized(TEST_WIDTH, TEST_HEIGHT);
        let size = terminal.size().unwrap();
        assert_eq!(size.width, TEST_WIDTH);
        assert_eq!(size.height, TEST_HEIGHT);
    }

    #[test]
    fn test_small_document_shape() {
        let app = create_test_app(small_document(), 10);
        let layout = app.layout();
        assert_eq!(layout.lanes[0].row_count, 2);
        assert_eq!(layout.lanes[1].offset_px, 5);
        assert_eq!(layout.total_height_px, 8);
    }

    #[test]
    fn test_buffer_to_string() {
        let area = Rect::new(0, 0, 10, 3);
        let mut buffer = Buffer::empty(area);
        buffer.set_string(0, 0, "Hello", ratatui::style::Style::default());
        buffer.set_string(0, 1, "World", ratatui::style::Style::default());

        let result = buffer_to_string(&buffer);
        assert_eq!(result, "Hello\nWorld\n");
    }
}
