//! Label formatting for axes and tooltips.

use chrono::{Local, TimeZone};

/// Nearest integer, halves toward positive infinity (`2.5 -> 3`, `-2.5 -> -2`).
pub fn round_half_up(value: f64) -> f64 {
    let floor = value.floor();
    if value - floor >= 0.5 {
        floor + 1.0
    } else {
        floor
    }
}

pub fn axis_label(value: f64, is_integer: bool) -> String {
    if is_integer {
        format!("{}", round_half_up(value))
    } else {
        format!("{:.1}", value)
    }
}

pub fn tooltip_value(value: f64, is_integer: bool) -> String {
    if is_integer {
        format!("{}", round_half_up(value))
    } else {
        format!("{:.2}", value)
    }
}

/// Local wall-clock time of a millisecond timestamp, `HH:MM:SS`.
pub fn time_of_day(timestamp_ms: i64) -> String {
    Local
        .timestamp_millis_opt(timestamp_ms)
        .single()
        .map(|t| t.format("%H:%M:%S").to_string())
        .unwrap_or_else(|| "--:--:--".to_string())
}
