//! Metric Extraction
//! Turns a backend system-info snapshot into chart readings.

use crate::config::{Color, RenderConfig, Theme};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fmt;
use std::str::FromStr;
use tracing::warn;

/// The system metrics the dashboard charts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MetricKind {
    Memory,
    Threads,
    Events,
    Heap,
}

impl MetricKind {
    pub const ALL: [MetricKind; 4] = [
        MetricKind::Memory,
        MetricKind::Threads,
        MetricKind::Events,
        MetricKind::Heap,
    ];

    pub fn key(self) -> &'static str {
        match self {
            MetricKind::Memory => "memory",
            MetricKind::Threads => "threads",
            MetricKind::Events => "events",
            MetricKind::Heap => "heap",
        }
    }

    pub fn default_title(self) -> &'static str {
        match self {
            MetricKind::Memory => "Memory Usage (MB)",
            MetricKind::Threads => "Thread Count",
            MetricKind::Events => "Total Events",
            MetricKind::Heap => "Heap Usage (%)",
        }
    }

    fn series_color(self) -> Color {
        match self {
            MetricKind::Memory => Color::rgb(0x28, 0xa7, 0x45),
            MetricKind::Threads => Color::rgb(0xff, 0xc1, 0x07),
            MetricKind::Events => Color::rgb(0x17, 0xa2, 0xb8),
            MetricKind::Heap => Color::rgb(0xdc, 0x35, 0x45),
        }
    }

    /// Counts are charted as whole numbers.
    pub fn is_integer(self) -> bool {
        matches!(self, MetricKind::Threads | MetricKind::Events)
    }

    pub fn default_render_config(self, theme: Theme) -> RenderConfig {
        RenderConfig::themed(theme)
            .with_title(self.default_title())
            .with_line_color(self.series_color())
            .with_point_color(self.series_color())
            .with_integer_values(self.is_integer())
    }
}

impl fmt::Display for MetricKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

impl FromStr for MetricKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        MetricKind::ALL
            .iter()
            .copied()
            .find(|kind| kind.key().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| format!("unknown metric {s:?}, expected one of memory, threads, events, heap"))
    }
}

/// One value headed for a chart.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Reading {
    pub metric: MetricKind,
    pub value: f64,
}

/// Pull every chartable metric out of a system-info object:
///
/// - memory: `usedMemory` such as `"512.4 MB"`, unit stripped
/// - threads: `threadsNano + threadsActive`, only when both are present
/// - events: `totalEvents` as an integer, unparsable counts read as 0
/// - heap: `heapMemory` fraction scaled to a percentage
pub fn extract_readings(snapshot: &Value) -> Vec<Reading> {
    let mut readings = Vec::new();
    let mut push = |metric, value| readings.push(Reading { metric, value });

    if let Some(raw) = snapshot.get("usedMemory").filter(|v| !is_blank(v)) {
        let parsed = match raw {
            Value::String(text) => parse_leading_float(&text.replacen(" MB", "", 1)),
            other => other.as_f64(),
        };
        match parsed {
            Some(mb) => push(MetricKind::Memory, mb),
            None => warn!(value = %raw, "usedMemory is not a number, skipping"),
        }
    }

    if let (Some(nano), Some(active)) = (snapshot.get("threadsNano"), snapshot.get("threadsActive")) {
        match (as_number(nano), as_number(active)) {
            (Some(nano), Some(active)) => push(MetricKind::Threads, nano + active),
            _ => warn!(%nano, %active, "thread counts are not numbers, skipping"),
        }
    }

    if let Some(raw) = snapshot.get("totalEvents") {
        let count = match raw {
            Value::String(text) => parse_leading_int(text),
            other => other.as_f64().filter(|v| v.is_finite()).map(f64::trunc),
        };
        push(MetricKind::Events, count.unwrap_or(0.0));
    }

    if let Some(raw) = snapshot.get("heapMemory") {
        match as_number(raw) {
            Some(fraction) => push(MetricKind::Heap, fraction * 100.0),
            None => warn!(value = %raw, "heapMemory is not a number, skipping"),
        }
    }

    readings
}

fn is_blank(value: &Value) -> bool {
    match value {
        Value::Null => true,
        Value::String(s) => s.is_empty(),
        _ => false,
    }
}

fn as_number(value: &Value) -> Option<f64> {
    match value {
        Value::String(text) => text.trim().parse().ok().filter(|v: &f64| v.is_finite()),
        other => other.as_f64(),
    }
}

/// Longest numeric prefix of `text` (after leading whitespace), e.g. `"12.5abc" -> 12.5`.
/// Infinite values (`inf`, `1e999`) are rejected.
pub fn parse_leading_float(text: &str) -> Option<f64> {
    let text = text.trim_start();
    text.char_indices()
        .map(|(i, c)| i + c.len_utf8())
        .rev()
        .find_map(|end| text[..end].parse::<f64>().ok())
        .filter(|v| v.is_finite())
}

/// Leading base-10 integer of `text`, e.g. `" 42 events" -> 42`.
pub fn parse_leading_int(text: &str) -> Option<f64> {
    let text = text.trim_start();
    let sign_len = usize::from(text.starts_with(&['+', '-'][..]));
    let digits = text[sign_len..]
        .find(|c: char| !c.is_ascii_digit())
        .unwrap_or(text.len() - sign_len);
    if digits == 0 {
        return None;
    }
    text[..sign_len + digits].parse::<f64>().ok()
}
