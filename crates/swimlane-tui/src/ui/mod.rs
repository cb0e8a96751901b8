//! Top-level layout of the timeline screen.

use ratatui::{
    buffer::Buffer,
    layout::{Constraint, Direction, Layout, Rect},
    widgets::Widget,
};

use crate::app::TimelineApp;
use crate::widgets::{default_hints, BarsPane, FooterHints, LabelsPane};

/// Width of the lane name column, including its right border.
pub const LABEL_WIDTH: u16 = 16;

/// Areas of the timeline screen.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScreenAreas {
    pub labels: Rect,
    pub bars: Rect,
    pub footer: Rect,
}

/// Split `area` into the label column, the bars pane and the footer line.
pub fn split(area: Rect) -> ScreenAreas {
    let [body, footer] = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(1), Constraint::Length(1)])
        .areas(area);
    let [labels, bars] = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Length(LABEL_WIDTH), Constraint::Min(1)])
        .areas(body);
    ScreenAreas {
        labels,
        bars,
        footer,
    }
}

/// Draw the whole timeline screen.
pub fn render(app: &TimelineApp, area: Rect, buf: &mut Buffer) {
    let areas = split(area);
    let layout = app.layout();

    LabelsPane::new(&layout, &app.theme)
        .scroll(app.labels_offset())
        .render(areas.labels, buf);
    BarsPane::new(&layout, &app.theme)
        .scroll(app.bars_offset())
        .render(areas.bars, buf);

    let hints = default_hints();
    FooterHints::new(&hints, &app.theme).render(areas.footer, buf);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_split_areas() {
        let areas = split(Rect::new(0, 0, 80, 24));
        assert_eq!(areas.labels, Rect::new(0, 0, LABEL_WIDTH, 23));
        assert_eq!(areas.bars, Rect::new(LABEL_WIDTH, 0, 80 - LABEL_WIDTH, 23));
        assert_eq!(areas.footer, Rect::new(0, 23, 80, 1));
    }
}
