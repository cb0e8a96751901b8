//! Swimlanes, their items, and the vertical layout of one lane.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, warn};

use crate::interval::Interval;
use crate::packer::{assign_rows, PackOrder, RowAssignment};

/// A date-ranged item drawn as a bar inside a lane.
///
/// The layout engine only reads `start` and `end`; row placement is
/// returned separately and never stored here.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Epic {
    pub label: String,
    pub start: NaiveDate,
    pub end: NaiveDate,
    /// Opaque styling tag handed through to renderers.
    #[serde(default, alias = "color")]
    pub tag: String,
}

impl Epic {
    /// Create a new epic.
    pub fn new(
        label: impl Into<String>,
        start: NaiveDate,
        end: NaiveDate,
        tag: impl Into<String>,
    ) -> Self {
        Self {
            label: label.into(),
            start,
            end,
            tag: tag.into(),
        }
    }

    /// The item's date range.
    pub fn interval(&self) -> Interval {
        Interval::new(self.start, self.end)
    }
}

/// A named track of epics. Item order is display order and packing order.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Swimlane {
    pub name: String,
    #[serde(default)]
    pub items: Vec<Epic>,
}

impl Swimlane {
    /// Create an empty lane.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            items: Vec::new(),
        }
    }

    /// Builder-style item append.
    #[must_use]
    pub fn with_item(mut self, epic: Epic) -> Self {
        self.items.push(epic);
        self
    }

    /// Intervals of all items, in lane order.
    pub fn intervals(&self) -> Vec<Interval> {
        self.items.iter().map(Epic::interval).collect()
    }
}

/// Error type for invalid layout constants.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum LayoutError {
    #[error("Layout constant `{0}` must be positive")]
    NonPositive(&'static str),
}

/// Pixel sizing shared by every lane of a timeline.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "RawConstants")]
pub struct LayoutConstants {
    item_height: u32,
    row_gap: u32,
    lane_padding: u32,
}

#[derive(Deserialize)]
struct RawConstants {
    #[serde(default = "default_item_height")]
    item_height: u32,
    #[serde(default = "default_row_gap")]
    row_gap: u32,
    #[serde(default = "default_lane_padding")]
    lane_padding: u32,
}

fn default_item_height() -> u32 {
    60
}

fn default_row_gap() -> u32 {
    10
}

fn default_lane_padding() -> u32 {
    10
}

impl TryFrom<RawConstants> for LayoutConstants {
    type Error = LayoutError;

    fn try_from(raw: RawConstants) -> Result<Self, Self::Error> {
        Self::new(raw.item_height, raw.row_gap, raw.lane_padding)
    }
}

impl Default for LayoutConstants {
    fn default() -> Self {
        Self {
            item_height: default_item_height(),
            row_gap: default_row_gap(),
            lane_padding: default_lane_padding(),
        }
    }
}

impl LayoutConstants {
    /// Create layout constants. Every value must be non-zero.
    pub fn new(item_height: u32, row_gap: u32, lane_padding: u32) -> Result<Self, LayoutError> {
        if item_height == 0 {
            return Err(LayoutError::NonPositive("item_height"));
        }
        if row_gap == 0 {
            return Err(LayoutError::NonPositive("row_gap"));
        }
        if lane_padding == 0 {
            return Err(LayoutError::NonPositive("lane_padding"));
        }
        Ok(Self {
            item_height,
            row_gap,
            lane_padding,
        })
    }

    /// One unit per bar, gap and padding, for character-cell renderers.
    pub fn cells() -> Self {
        Self {
            item_height: 1,
            row_gap: 1,
            lane_padding: 1,
        }
    }

    pub fn item_height(&self) -> u32 {
        self.item_height
    }

    pub fn row_gap(&self) -> u32 {
        self.row_gap
    }

    /// Padding applied both above the first row and below the last.
    pub fn lane_padding(&self) -> u32 {
        self.lane_padding
    }

    /// Total lane height for `row_count` rows. Saturates at `u32::MAX`.
    pub fn lane_height(&self, row_count: usize) -> u32 {
        let rows = u32::try_from(row_count.max(1)).unwrap_or(u32::MAX);
        self.lane_padding
            .saturating_mul(2)
            .saturating_add(rows.saturating_mul(self.item_height))
            .saturating_add((rows - 1).saturating_mul(self.row_gap))
    }

    /// Offset of `row` from the top of its lane. Saturates at `u32::MAX`.
    pub fn row_top(&self, row: usize) -> u32 {
        let row = u32::try_from(row).unwrap_or(u32::MAX);
        let pitch = self.item_height.saturating_add(self.row_gap);
        self.lane_padding.saturating_add(row.saturating_mul(pitch))
    }
}

/// Vertical layout of a single lane.
///
/// Rows are lane-local; two lanes never share a grid. Computing the layout
/// again for an unchanged lane gives the same rows, but reordering the lane's
/// items may move them.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LaneLayout {
    assignment: RowAssignment,
    row_count: usize,
    height_px: u32,
    tops_px: Vec<u32>,
}

impl LaneLayout {
    /// Pack `lane` and derive its height and per-item offsets.
    pub fn compute(lane: &Swimlane, constants: &LayoutConstants, order: PackOrder) -> Self {
        for epic in lane.items.iter().filter(|e| e.interval().is_inverted()) {
            warn!(
                lane = %lane.name,
                label = %epic.label,
                start = %epic.start,
                end = %epic.end,
                "epic ends before it starts"
            );
        }

        let assignment = assign_rows(&lane.intervals(), order);
        let row_count = assignment.row_count().max(1);
        let height_px = constants.lane_height(row_count);
        let tops_px = assignment
            .rows()
            .iter()
            .map(|&row| constants.row_top(row))
            .collect();

        debug!(
            lane = %lane.name,
            items = lane.items.len(),
            rows = row_count,
            height_px,
            %order,
            "laid out lane"
        );

        Self {
            assignment,
            row_count,
            height_px,
            tops_px,
        }
    }

    /// Number of rows, at least 1 even for an empty lane.
    pub fn row_count(&self) -> usize {
        self.row_count
    }

    /// Total lane height in pixels.
    pub fn height_px(&self) -> u32 {
        self.height_px
    }

    /// Row of the item at `index`.
    pub fn row(&self, index: usize) -> Option<usize> {
        self.assignment.row(index)
    }

    /// Top offset of the item at `index`, relative to the lane.
    pub fn top_px(&self, index: usize) -> Option<u32> {
        self.tops_px.get(index).copied()
    }

    /// Raw row assignment.
    pub fn assignment(&self) -> &RowAssignment {
        &self.assignment
    }
}
