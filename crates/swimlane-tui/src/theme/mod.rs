//! Theme components for the TUI.
//!
//! This module provides:
//! - [`Theme`] - Color palette (Catppuccin Mocha, Monochrome)
//! - Tag to bar color mapping

mod colors;

pub use colors::Theme;
