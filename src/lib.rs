//! TinyChart - Rolling line charts for live system metrics
//!
//! A chart widget that keeps a bounded window of timestamped samples, draws
//! it onto a pixel surface with gridlines and labels, and resolves pointer
//! hover to the nearest sample for tooltips.

pub mod charts;
pub mod config;
pub mod error;
pub mod host;
pub mod logging;
pub mod surface;

pub use charts::{ChartWidget, Sample, SampleWindow};
pub use config::{Color, RenderConfig};
pub use error::{ChartError, Result};
pub use surface::{BitmapSurface, PointerEvent, RecordingSurface, Surface};
