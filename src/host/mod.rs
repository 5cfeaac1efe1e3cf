//! Host module - Feeds charts from backend snapshots and exports them

mod export;
mod metrics;
mod registry;
mod replay;

pub use export::{export_pngs, export_samples, samples_json, write_samples};
pub use metrics::{extract_readings, parse_leading_float, parse_leading_int, MetricKind, Reading};
pub use registry::ChartRegistry;
pub use replay::{load_snapshots, parse_snapshots, replay, ReplayClock, ReplaySummary};
