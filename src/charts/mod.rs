//! Charts module - Rolling line chart widget

mod labels;
mod mapper;
mod tooltip;
mod widget;
mod window;

pub use labels::{axis_label, round_half_up, time_of_day, tooltip_value};
pub use mapper::{CoordinateMapper, PlotArea, ValueRange};
pub use tooltip::{Tooltip, TooltipContent, EDGE_MARGIN, POINTER_OFFSET};
pub use widget::{ChartWidget, Hit, ViewportGeometry, HIT_RADIUS, POINT_RADIUS};
pub use window::{Sample, SampleWindow};
