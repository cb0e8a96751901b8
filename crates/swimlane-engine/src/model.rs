//! Timeline model: the window, the lanes, and the geometry derived from them.
//!
//! Nothing here is cached. Every query packs and maps from the current lane
//! data, so callers can mutate lanes freely between queries.

use serde::Serialize;

use crate::lane::{LaneLayout, LayoutConstants, Swimlane};
use crate::packer::PackOrder;
use crate::window::{MonthTick, Percent, TimelineWindow};

/// Placement of one epic.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ItemGeometry {
    pub label: String,
    pub tag: String,
    /// Lane-local row.
    pub row: usize,
    pub left_percent: Percent,
    pub width_percent: Percent,
    /// Offset from the top of the lane.
    pub top_px: u32,
}

/// Placement of one lane and its items.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LaneGeometry {
    pub name: String,
    pub row_count: usize,
    pub height_px: u32,
    /// Offset of the lane from the top of the view (sum of earlier lane heights).
    pub offset_px: u32,
    pub items: Vec<ItemGeometry>,
}

/// Full layout of a timeline view.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TimelineLayout {
    pub window: TimelineWindow,
    pub months: Vec<MonthTick>,
    pub lanes: Vec<LaneGeometry>,
    pub total_height_px: u32,
}

/// Owns the timeline window and lanes, and derives geometry on demand.
#[derive(Debug, Clone)]
pub struct TimelineModel {
    window: TimelineWindow,
    constants: LayoutConstants,
    order: PackOrder,
    lanes: Vec<Swimlane>,
}

impl TimelineModel {
    /// Create a model over `lanes` using insertion-order packing.
    pub fn new(window: TimelineWindow, constants: LayoutConstants, lanes: Vec<Swimlane>) -> Self {
        Self {
            window,
            constants,
            order: PackOrder::default(),
            lanes,
        }
    }

    /// Set the packing order.
    #[must_use]
    pub fn with_pack_order(mut self, order: PackOrder) -> Self {
        self.order = order;
        self
    }

    pub fn window(&self) -> TimelineWindow {
        self.window
    }

    pub fn constants(&self) -> LayoutConstants {
        self.constants
    }

    pub fn pack_order(&self) -> PackOrder {
        self.order
    }

    pub fn lanes(&self) -> &[Swimlane] {
        &self.lanes
    }

    /// Mutable access to the lanes. The next query sees the changes.
    pub fn lanes_mut(&mut self) -> &mut Vec<Swimlane> {
        &mut self.lanes
    }

    /// Append a lane.
    pub fn push_lane(&mut self, lane: Swimlane) {
        self.lanes.push(lane);
    }

    /// Swap in a new visible range.
    pub fn replace_window(&mut self, window: TimelineWindow) {
        self.window = window;
    }

    /// Vertical layout of the lane at `index`.
    pub fn lane_layout(&self, index: usize) -> Option<LaneLayout> {
        self.lanes
            .get(index)
            .map(|lane| LaneLayout::compute(lane, &self.constants, self.order))
    }

    /// Height of the lane at `index`.
    pub fn lane_height_px(&self, index: usize) -> Option<u32> {
        self.lane_layout(index).map(|layout| layout.height_px())
    }

    /// Row count of the lane at `index` (at least 1).
    pub fn lane_row_count(&self, index: usize) -> Option<usize> {
        self.lane_layout(index).map(|layout| layout.row_count())
    }

    /// Geometry of one item.
    pub fn item_geometry(&self, lane: usize, item: usize) -> Option<ItemGeometry> {
        let layout = self.lane_layout(lane)?;
        let epic = self.lanes[lane].items.get(item)?;
        let mapper = self.window.mapper();
        Some(ItemGeometry {
            label: epic.label.clone(),
            tag: epic.tag.clone(),
            row: layout.row(item)?,
            left_percent: mapper.left_percent(epic.start),
            width_percent: mapper.width_percent(epic.start, epic.end),
            top_px: layout.top_px(item)?,
        })
    }

    /// Geometry of every lane and item, top to bottom.
    pub fn layout(&self) -> TimelineLayout {
        let mapper = self.window.mapper();
        let mut offset_px = 0u32;
        let mut lanes = Vec::with_capacity(self.lanes.len());

        for lane in &self.lanes {
            let layout = LaneLayout::compute(lane, &self.constants, self.order);
            let items = lane
                .items
                .iter()
                .enumerate()
                .map(|(i, epic)| ItemGeometry {
                    label: epic.label.clone(),
                    tag: epic.tag.clone(),
                    row: layout.row(i).unwrap_or_default(),
                    left_percent: mapper.left_percent(epic.start),
                    width_percent: mapper.width_percent(epic.start, epic.end),
                    top_px: layout.top_px(i).unwrap_or_default(),
                })
                .collect();

            lanes.push(LaneGeometry {
                name: lane.name.clone(),
                row_count: layout.row_count(),
                height_px: layout.height_px(),
                offset_px,
                items,
            });
            offset_px = offset_px.saturating_add(layout.height_px());
        }

        TimelineLayout {
            window: self.window,
            months: self.window.month_ticks(),
            lanes,
            total_height_px: offset_px,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::lane::Epic;
    use chrono::NaiveDate;

    fn date(m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2023, m, d).unwrap()
    }

    fn model(lanes: Vec<Swimlane>) -> TimelineModel {
        let window = TimelineWindow::new(date(1, 1), date(12, 31)).unwrap();
        TimelineModel::new(window, LayoutConstants::default(), lanes)
    }

    fn staggered_lane() -> Swimlane {
        Swimlane::new("Web")
            .with_item(Epic::new("A", date(1, 1), date(1, 5), "blue"))
            .with_item(Epic::new("B", date(1, 3), date(1, 8), "blue"))
            .with_item(Epic::new("C", date(1, 6), date(1, 10), "blue"))
    }

    #[test]
    fn test_empty_model() {
        let layout = model(Vec::new()).layout();
        assert!(layout.lanes.is_empty());
        assert_eq!(layout.total_height_px, 0);
        assert_eq!(layout.months.len(), 12);
    }

    #[test]
    fn test_empty_lane_has_minimum_height() {
        let m = model(vec![Swimlane::new("Nothing yet")]);
        assert_eq!(m.lane_height_px(0), Some(80));
        assert_eq!(m.lane_row_count(0), Some(1));
    }

    #[test]
    fn test_item_geometry() {
        let m = model(vec![staggered_lane()]);
        let b = m.item_geometry(0, 1).unwrap();
        assert_eq!(b.label, "B");
        assert_eq!(b.row, 1);
        assert_eq!(b.top_px, 80);
        assert_eq!(b.left_percent.to_string(), "0.55%");
        assert_eq!(b.width_percent.to_string(), "1.37%");

        assert!(m.item_geometry(0, 3).is_none());
        assert!(m.item_geometry(1, 0).is_none());
    }

    #[test]
    fn test_lane_offsets_stack() {
        let m = model(vec![staggered_lane(), Swimlane::new("Empty"), staggered_lane()]);
        let layout = m.layout();
        let offsets: Vec<u32> = layout.lanes.iter().map(|l| l.offset_px).collect();
        assert_eq!(offsets, vec![0, 150, 230]);
        assert_eq!(layout.total_height_px, 380);
    }

    #[test]
    fn test_rows_are_lane_local() {
        let single = Swimlane::new("Solo").with_item(Epic::new("X", date(1, 2), date(1, 4), "red"));
        let layout = model(vec![staggered_lane(), single]).layout();
        assert_eq!(layout.lanes[0].row_count, 2);
        assert_eq!(layout.lanes[1].row_count, 1);
        assert_eq!(layout.lanes[1].items[0].row, 0);
    }

    #[test]
    fn test_queries_see_mutations() {
        let mut m = model(vec![staggered_lane()]);
        assert_eq!(m.lane_row_count(0), Some(2));

        m.lanes_mut()[0]
            .items
            .push(Epic::new("D", date(1, 4), date(1, 7), "blue"));
        assert_eq!(m.lane_row_count(0), Some(3));

        m.push_lane(Swimlane::new("New"));
        assert_eq!(m.layout().lanes.len(), 2);
    }

    #[test]
    fn test_pack_order_is_applied() {
        let lane = Swimlane::new("Ordered")
            .with_item(Epic::new("a", date(1, 1), date(1, 2), ""))
            .with_item(Epic::new("b", date(1, 5), date(1, 6), ""))
            .with_item(Epic::new("c", date(1, 3), date(1, 7), ""))
            .with_item(Epic::new("d", date(1, 1), date(1, 4), ""));
        let insertion = model(vec![lane.clone()]);
        assert_eq!(insertion.lane_row_count(0), Some(3));

        let sorted = model(vec![lane]).with_pack_order(PackOrder::ByStart);
        assert_eq!(sorted.lane_row_count(0), Some(2));
    }

    #[test]
    fn test_out_of_window_items() {
        let lane = Swimlane::new("Edges")
            .with_item(Epic::new(
                "before",
                NaiveDate::from_ymd_opt(2022, 10, 1).unwrap(),
                NaiveDate::from_ymd_opt(2022, 11, 1).unwrap(),
                "",
            ))
            .with_item(Epic::new(
                "after",
                NaiveDate::from_ymd_opt(2024, 2, 1).unwrap(),
                NaiveDate::from_ymd_opt(2024, 3, 1).unwrap(),
                "",
            ));
        let layout = model(vec![lane]).layout();
        let items = &layout.lanes[0].items;
        assert_eq!(items[0].left_percent.value(), 0.0);
        assert_eq!(items[1].left_percent.value(), 100.0);
        assert!(items[0].width_percent.value() > 0.0);
    }

    #[test]
    fn test_oversized_lanes_do_not_overflow() {
        let window = TimelineWindow::new(date(1, 1), date(12, 31)).unwrap();
        let constants = LayoutConstants::new(2_000_000_000, 10, 10).unwrap();
        let m = TimelineModel::new(window, constants, vec![staggered_lane(), staggered_lane()]);

        // Two rows: 10 + 2_000_000_000 + 10 + 2_000_000_000 + 10.
        assert_eq!(m.lane_height_px(0), Some(4_000_000_030));
        let layout = m.layout();
        assert_eq!(layout.lanes[1].offset_px, 4_000_000_030);
        assert_eq!(layout.total_height_px, u32::MAX);
    }

    #[test]
    fn test_replace_window() {
        let mut m = model(vec![staggered_lane()]);
        let narrow = TimelineWindow::new(date(1, 1), date(1, 10)).unwrap();
        m.replace_window(narrow);
        let c = m.item_geometry(0, 2).unwrap();
        assert_eq!(c.left_percent.to_string(), "50.00%");
        assert_eq!(c.width_percent.to_string(), "40.00%");
    }

    #[test]
    fn test_layout_serializes() {
        let json = serde_json::to_value(model(vec![staggered_lane()]).layout()).unwrap();
        assert_eq!(json["lanes"][0]["height_px"], 150);
        assert_eq!(json["lanes"][0]["items"][2]["row"], 0);
        assert_eq!(json["window"]["start"], "2023-01-01");
    }
}
