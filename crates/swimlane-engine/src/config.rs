//! Timeline documents: the JSON input describing a window, layout constants
//! and lanes.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::lane::{Epic, LayoutConstants, LayoutError, Swimlane};
use crate::model::TimelineModel;
use crate::packer::PackOrder;
use crate::window::{TimelineWindow, WindowError};

/// A timeline as stored on disk.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TimelineDocument {
    /// Visible range.
    pub window: TimelineWindow,

    /// Pixel sizing for rows and lanes.
    #[serde(default)]
    pub layout: LayoutConstants,

    /// Order in which items are packed into rows.
    #[serde(default)]
    pub pack_order: PackOrder,

    /// Lanes, top to bottom.
    #[serde(default)]
    pub lanes: Vec<Swimlane>,
}

impl TimelineDocument {
    /// Load a document from a file.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(ConfigError::Io)?;
        Self::from_json(&content)
    }

    /// Parse a document from JSON text.
    pub fn from_json(content: &str) -> Result<Self, ConfigError> {
        serde_json::from_str(content).map_err(ConfigError::Parse)
    }

    /// Save the document to a file.
    pub fn save(&self, path: &Path) -> Result<(), ConfigError> {
        let content = serde_json::to_string_pretty(self).map_err(ConfigError::Serialize)?;
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).map_err(ConfigError::Io)?;
        }
        std::fs::write(path, content).map_err(ConfigError::Io)
    }

    /// Build a model from this document.
    pub fn into_model(self) -> TimelineModel {
        TimelineModel::new(self.window, self.layout, self.lanes).with_pack_order(self.pack_order)
    }

    /// Replace the visible range.
    pub fn with_window(mut self, start: NaiveDate, end: NaiveDate) -> Result<Self, ConfigError> {
        self.window = TimelineWindow::new(start, end)?;
        Ok(self)
    }

    /// Replace the layout constants.
    pub fn with_layout(
        mut self,
        item_height: u32,
        row_gap: u32,
        lane_padding: u32,
    ) -> Result<Self, ConfigError> {
        self.layout = LayoutConstants::new(item_height, row_gap, lane_padding)?;
        Ok(self)
    }

    /// Items whose end precedes their start, as `(lane, item)` labels.
    pub fn inverted_items(&self) -> Vec<(&str, &str)> {
        self.lanes
            .iter()
            .flat_map(|lane| {
                lane.items
                    .iter()
                    .filter(|epic| epic.interval().is_inverted())
                    .map(move |epic| (lane.name.as_str(), epic.label.as_str()))
            })
            .collect()
    }

    /// A year of product roadmap across seven lanes.
    pub fn sample() -> Self {
        let ecomm = || {
            Swimlane::new("E-Comm")
                .with_item(epic("Core Pages", "2023-02-01", "2023-05-30", "blue"))
                .with_item(epic("Purchase Flow", "2023-04-01", "2023-08-15", "blue"))
                .with_item(epic("Localization", "2023-09-01", "2023-11-30", "blue"))
        };
        let mobile = || {
            Swimlane::new("Mobile")
                .with_item(epic("Mobile API", "2023-03-01", "2023-06-30", "orange"))
                .with_item(epic("Push Notifications", "2023-07-01", "2023-10-31", "orange"))
                .with_item(epic("App Refresh", "2023-11-01", "2023-12-20", "orange"))
        };
        let infra = |name: &str, backbone_start: &str| {
            Swimlane::new(name)
                .with_item(epic("Data Backbone", backbone_start, "2023-03-15", "yellow"))
                .with_item(epic("Cloud Connect", "2023-04-01", "2023-06-15", "yellow"))
                .with_item(epic("Real-time Stream", "2023-07-01", "2023-11-30", "yellow"))
                .with_item(epic("Disaster Recovery", "2023-12-01", "2023-12-31", "red"))
        };

        Self {
            window: TimelineWindow::new(ymd(2023, 1, 1), ymd(2023, 12, 31))
                .unwrap_or_else(|_| unreachable!("sample window is ordered")),
            layout: LayoutConstants::default(),
            pack_order: PackOrder::Insertion,
            lanes: vec![
                ecomm(),
                mobile(),
                infra("Infrastructure", "2023-01-25"),
                infra("Infrastructure2", "2023-01-15"),
                infra("Infrastructure3", "2023-01-15"),
                ecomm(),
                mobile(),
            ],
        }
    }
}

fn ymd(year: i32, month: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(year, month, day).unwrap_or_default()
}

fn epic(label: &str, start: &str, end: &str, tag: &str) -> Epic {
    let parse = |s: &str| NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap_or_default();
    Epic::new(label, parse(start), parse(end), tag)
}

/// Errors that can occur when working with timeline documents.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// I/O error reading or writing a document.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Error parsing document JSON. Invalid windows and constants surface here too.
    #[error("Parse error: {0}")]
    Parse(#[source] serde_json::Error),

    /// Error serializing a document to JSON.
    #[error("Serialize error: {0}")]
    Serialize(#[source] serde_json::Error),

    /// Invalid timeline window.
    #[error(transparent)]
    Window(#[from] WindowError),

    /// Invalid layout constants.
    #[error(transparent)]
    Layout(#[from] LayoutError),
}
