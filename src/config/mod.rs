//! Config module - Colors, render options and dashboard files

mod color;
mod dashboard;
mod render;

pub use color::Color;
pub use dashboard::{DashboardConfig, DashboardSettings, PanelConfig, DEFAULT_POLL_INTERVAL_MS};
pub use render::{RenderConfig, Theme, DEFAULT_MAX_POINTS, DEFAULT_PADDING};
