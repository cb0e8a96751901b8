//! Application state for the timeline view.

use std::cell::RefCell;
use std::rc::Rc;

use swimlane_engine::{
    LayoutConstants, Pane, ScrollBinding, ScrollBus, ScrollSurface, ScrollSync, SyncDirection,
    TimelineDocument, TimelineLayout, TimelineModel,
};

use crate::event::Action;
use crate::theme::Theme;

/// Lines scrolled per key press or wheel tick.
pub const SCROLL_STEP: u32 = 1;

/// Rows taken by the month ruler and the footer.
const CHROME_ROWS: u16 = 2;

/// Vertical scroll position of one pane, in terminal rows.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct PaneScroll {
    offset: u32,
    max_offset: u32,
}

impl PaneScroll {
    /// Largest reachable offset.
    pub fn max_offset(&self) -> u32 {
        self.max_offset
    }

    /// Update the scroll range, pulling the offset back inside it.
    pub fn set_max_offset(&mut self, max_offset: u32) {
        self.max_offset = max_offset;
        self.offset = self.offset.min(max_offset);
    }

    /// Move by `delta` rows, clamped to the scroll range.
    pub fn scroll_by(&mut self, delta: i64) {
        let target = i64::from(self.offset) + delta;
        let clamped = target.clamp(0, i64::from(self.max_offset));
        self.offset = u32::try_from(clamped).unwrap_or(self.max_offset);
    }
}

impl ScrollSurface for PaneScroll {
    fn scroll_top(&self) -> u32 {
        self.offset
    }

    fn set_scroll_top(&mut self, offset: u32) {
        self.offset = offset.min(self.max_offset);
    }
}

/// Timeline view state.
///
/// Lane heights are measured in terminal rows: one row per bar, one blank
/// row between bars and around each lane.
pub struct TimelineApp {
    model: TimelineModel,
    pub theme: Theme,
    bus: ScrollBus,
    labels: Rc<RefCell<PaneScroll>>,
    bars: Rc<RefCell<PaneScroll>>,
    binding: Option<ScrollBinding>,
    viewport_rows: u16,
    /// Should the app quit?
    pub should_quit: bool,
}

impl TimelineApp {
    /// Build the view for a document, rescaling its layout to terminal rows.
    pub fn new(document: TimelineDocument, theme: Theme) -> Self {
        let model = TimelineDocument {
            layout: LayoutConstants::cells(),
            ..document
        }
        .into_model();

        let bus = ScrollBus::new();
        let labels = Rc::new(RefCell::new(PaneScroll::default()));
        let bars = Rc::new(RefCell::new(PaneScroll::default()));
        let binding = ScrollSync::new(SyncDirection::BarsDriveLabels).bind(
            &bus,
            Some(Rc::clone(&labels)),
            Some(Rc::clone(&bars)),
        );

        Self {
            model,
            theme,
            bus,
            labels,
            bars,
            binding,
            viewport_rows: 0,
            should_quit: false,
        }
    }

    /// The model backing this view.
    pub fn model(&self) -> &TimelineModel {
        &self.model
    }

    /// Fresh layout of every lane.
    pub fn layout(&self) -> TimelineLayout {
        self.model.layout()
    }

    /// Whether the label column follows the bars pane.
    pub fn is_synced(&self) -> bool {
        self.binding.is_some()
    }

    pub fn labels_offset(&self) -> u32 {
        self.labels.borrow().scroll_top()
    }

    pub fn bars_offset(&self) -> u32 {
        self.bars.borrow().scroll_top()
    }

    /// Rows available for lanes.
    pub fn viewport_rows(&self) -> u16 {
        self.viewport_rows
    }

    /// Recompute scroll ranges for a terminal of `height` rows.
    pub fn resize(&mut self, height: u16) {
        self.viewport_rows = height.saturating_sub(CHROME_ROWS);
        let total = self.layout().total_height_px;
        let max_offset = total.saturating_sub(u32::from(self.viewport_rows));
        self.labels.borrow_mut().set_max_offset(max_offset);
        self.bars.borrow_mut().set_max_offset(max_offset);
    }

    /// Scroll the bars pane as if by the user; the label column follows.
    pub fn scroll_bars(&mut self, delta: i64) {
        self.bars.borrow_mut().scroll_by(delta);
        self.bus.notify(Pane::Bars);
    }

    /// Apply a key or mouse action.
    pub fn handle_action(&mut self, action: Action) {
        let page = i64::from(self.viewport_rows.max(1));
        match action {
            Action::Quit => self.should_quit = true,
            Action::ScrollUp => self.scroll_bars(-i64::from(SCROLL_STEP)),
            Action::ScrollDown => self.scroll_bars(i64::from(SCROLL_STEP)),
            Action::PageUp => self.scroll_bars(-page),
            Action::PageDown => self.scroll_bars(page),
            Action::Top => self.scroll_bars(i64::MIN / 2),
            Action::Bottom => self.scroll_bars(i64::MAX / 2),
            Action::None => {}
        }
    }
}
