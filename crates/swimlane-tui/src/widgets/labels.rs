//! Lane name column.

use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::Style,
    widgets::{Block, Borders, Widget},
};
use swimlane_engine::TimelineLayout;

use super::bars::{clip_to_width, row_in_viewport};
use crate::theme::Theme;

const HEADER: &str = "Lanes";

/// Lane names, each drawn on its lane's first bar row.
///
/// The first line of the area is a header aligned with the month ruler; the
/// rest is the scrolled viewport.
pub struct LabelsPane<'a> {
    layout: &'a TimelineLayout,
    theme: &'a Theme,
    scroll: u32,
}

impl<'a> LabelsPane<'a> {
    /// Create a new labels pane.
    pub fn new(layout: &'a TimelineLayout, theme: &'a Theme) -> Self {
        Self {
            layout,
            theme,
            scroll: 0,
        }
    }

    /// Set the vertical scroll offset.
    #[must_use]
    pub fn scroll(mut self, offset: u32) -> Self {
        self.scroll = offset;
        self
    }
}

impl Widget for LabelsPane<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let block = Block::default()
            .borders(Borders::RIGHT)
            .border_style(Style::default().fg(self.theme.border));
        let inner = block.inner(area);
        block.render(area, buf);

        if inner.height == 0 || inner.width == 0 {
            return;
        }

        let header_style = Style::default().fg(self.theme.primary);
        buf.set_string(
            inner.x,
            inner.y,
            clip_to_width(HEADER, inner.width),
            header_style,
        );

        let viewport = Rect::new(inner.x, inner.y + 1, inner.width, inner.height - 1);
        let name_style = Style::default().fg(self.theme.text);
        for lane in &self.layout.lanes {
            // Name sits on the first bar row, below the lane's top padding.
            let first_row = lane
                .items
                .iter()
                .map(|item| item.top_px)
                .min()
                .unwrap_or(lane.height_px / 2);
            let content_row = lane.offset_px.saturating_add(first_row);
            let Some(y) = row_in_viewport(content_row, self.scroll, viewport) else {
                continue;
            };
            buf.set_string(
                viewport.x,
                y,
                clip_to_width(&lane.name, viewport.width),
                name_style,
            );
        }
    }
}
