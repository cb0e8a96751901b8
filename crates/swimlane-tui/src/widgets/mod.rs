//! Widgets for the timeline view.
//!
//! - [`LabelsPane`] - lane name column
//! - [`BarsPane`] - month ruler and epic bars
//! - [`FooterHints`] - key binding hints

mod bars;
mod footer_hints;
mod labels;

pub use bars::{percent_to_cells, BarsPane, BAR_FILL};
pub use footer_hints::{default_hints, FooterHints, KeyHint};
pub use labels::LabelsPane;
