//! swimlane-engine: Layout engine for multi-lane timeline views
//!
//! This crate computes where date-ranged items ("epics") sit on a
//! Gantt-style timeline, including:
//! - First-fit row packing so overlapping items in a lane never share a row
//! - Date to percentage mapping against a fixed timeline window
//! - Lane heights and item offsets from row occupancy
//! - Vertical scroll synchronization between the label and bar panes
//! - Timeline documents (JSON) with validated windows and layout constants

pub mod config;
pub mod interval;
pub mod lane;
pub mod model;
pub mod packer;
pub mod scroll;
pub mod window;

// Re-export commonly used types
pub use config::{ConfigError, TimelineDocument};
pub use interval::Interval;
pub use lane::{Epic, LaneLayout, LayoutConstants, LayoutError, Swimlane};
pub use model::{ItemGeometry, LaneGeometry, TimelineLayout, TimelineModel};
pub use packer::{assign_rows, PackOrder, RowAssignment};
pub use scroll::{
    sync_offsets, Pane, ScrollBinding, ScrollBus, ScrollSurface, ScrollSync, Subscription,
    SyncDirection,
};
pub use window::{CoordinateMapper, MonthTick, Percent, TimelineWindow, WindowError};

/// Returns the engine version.
pub fn engine_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
