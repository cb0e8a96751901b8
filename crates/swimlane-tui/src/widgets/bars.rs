//! Month ruler and epic bars.

use ratatui::{buffer::Buffer, layout::Rect, style::Style, widgets::Widget};
use swimlane_engine::{ItemGeometry, Percent, TimelineLayout};
use unicode_width::UnicodeWidthChar;

use crate::theme::Theme;

/// Fill glyph for bars when drawing without colors.
pub const BAR_FILL: char = '\u{2591}'; // ░

/// Convert a percentage of the window into a column count within `width`.
#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
pub fn percent_to_cells(percent: Percent, width: u16) -> u16 {
    let cells = (percent.value() / 100.0 * f64::from(width)).floor();
    cells.clamp(0.0, f64::from(width)) as u16
}

#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
fn width_to_cells(percent: Percent, width: u16) -> u16 {
    let cells = (percent.value() / 100.0 * f64::from(width)).round();
    // Zero-length items still get a one-cell marker.
    cells.clamp(1.0, f64::from(u16::MAX)) as u16
}

/// Truncate `text` to at most `width` terminal columns.
pub(crate) fn clip_to_width(text: &str, width: u16) -> String {
    let mut used = 0usize;
    text.chars()
        .take_while(|c| {
            used += c.width().unwrap_or(0);
            used <= usize::from(width)
        })
        .collect()
}

/// Screen row for a content row, if it falls inside the scrolled viewport.
pub(crate) fn row_in_viewport(content_row: u32, scroll: u32, viewport: Rect) -> Option<u16> {
    let relative = content_row.checked_sub(scroll)?;
    let relative = u16::try_from(relative).ok()?;
    (relative < viewport.height).then(|| viewport.y + relative)
}

/// Bars pane: month ruler on the first line, bars below it.
pub struct BarsPane<'a> {
    layout: &'a TimelineLayout,
    theme: &'a Theme,
    scroll: u32,
}

impl<'a> BarsPane<'a> {
    /// Create a new bars pane.
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

    fn render_ruler(&self, area: Rect, buf: &mut Buffer) {
        let style = Style::default().fg(self.theme.muted);
        let mut next_free = area.x;
        for tick in &self.layout.months {
            let x = area.x + percent_to_cells(tick.left_percent, area.width);
            if x < next_free || x >= area.right() {
                continue;
            }
            let label = clip_to_width(&tick.label, area.right() - x);
            buf.set_string(x, area.y, &label, style);
            let label_width = u16::try_from(label.chars().count()).unwrap_or(u16::MAX);
            next_free = x.saturating_add(label_width).saturating_add(1);
        }
    }

    fn render_bar(&self, item: &ItemGeometry, y: u16, area: Rect, buf: &mut Buffer) {
        let start = percent_to_cells(item.left_percent, area.width);
        if start >= area.width {
            return;
        }
        let end = start
            .saturating_add(width_to_cells(item.width_percent, area.width))
            .min(area.width);
        let bar_width = end - start;

        let (fill, fill_style, text_style) = if self.theme.monochrome {
            (BAR_FILL, Style::default(), Style::default())
        } else {
            let color = self.theme.tag_color(&item.tag);
            (
                ' ',
                Style::default().bg(color),
                Style::default().fg(self.theme.base).bg(color),
            )
        };

        let x = area.x + start;
        for col in x..x + bar_width {
            if let Some(cell) = buf.cell_mut((col, y)) {
                cell.set_char(fill).set_style(fill_style);
            }
        }
        buf.set_string(x, y, clip_to_width(&item.label, bar_width), text_style);
    }
}

impl Widget for BarsPane<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        if area.height == 0 || area.width == 0 {
            return;
        }

        self.render_ruler(Rect::new(area.x, area.y, area.width, 1), buf);

        let viewport = Rect::new(area.x, area.y + 1, area.width, area.height - 1);
        for lane in &self.layout.lanes {
            for item in &lane.items {
                let content_row = lane.offset_px.saturating_add(item.top_px);
                if let Some(y) = row_in_viewport(content_row, self.scroll, viewport) {
                    self.render_bar(item, y, viewport, buf);
                }
            }
        }
    }
}
