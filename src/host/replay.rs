//! Snapshot Replay
//! Feeds recorded backend snapshots (JSON lines) through a chart registry.

use super::registry::ChartRegistry;
use crate::config::DEFAULT_POLL_INTERVAL_MS;
use crate::error::{ChartError, Result};
use crate::surface::Surface;
use serde_json::Value;
use std::path::Path;
use tracing::{debug, info};

/// Parse one snapshot object per non-blank line.
pub fn parse_snapshots(text: &str) -> Result<Vec<Value>> {
    text.lines()
        .enumerate()
        .filter(|(_, line)| !line.trim().is_empty())
        .map(|(i, line)| {
            serde_json::from_str(line).map_err(|source| ChartError::Snapshot { line: i + 1, source })
        })
        .collect()
}

pub fn load_snapshots(path: &Path) -> Result<Vec<Value>> {
    let text = std::fs::read_to_string(path)?;
    let snapshots = parse_snapshots(&text)?;
    debug!(path = %path.display(), count = snapshots.len(), "loaded snapshots");
    Ok(snapshots)
}

/// Timestamps for snapshots that do not carry their own `timestamp` field:
/// the i-th snapshot is stamped `start_ms + i * interval_ms`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ReplayClock {
    pub start_ms: i64,
    pub interval_ms: i64,
}

impl ReplayClock {
    pub fn new(start_ms: i64, interval_ms: i64) -> Self {
        Self {
            start_ms,
            interval_ms,
        }
    }

    /// Clock whose last synthesized tick lands on the current time.
    pub fn ending_now(count: usize, interval_ms: i64) -> Self {
        let now = chrono::Utc::now().timestamp_millis();
        let span = interval_ms.saturating_mul(count.saturating_sub(1) as i64);
        Self::new(now.saturating_sub(span), interval_ms)
    }

    pub fn timestamp(&self, index: usize, snapshot: &Value) -> i64 {
        snapshot
            .get("timestamp")
            .and_then(Value::as_i64)
            .unwrap_or_else(|| {
                self.start_ms
                    .saturating_add(self.interval_ms.saturating_mul(index as i64))
            })
    }
}

impl Default for ReplayClock {
    fn default() -> Self {
        Self::new(0, DEFAULT_POLL_INTERVAL_MS)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ReplaySummary {
    pub snapshots: usize,
    pub samples: usize,
}

pub fn replay<S: Surface>(
    registry: &mut ChartRegistry<S>,
    snapshots: &[Value],
    clock: ReplayClock,
) -> ReplaySummary {
    let mut summary = ReplaySummary::default();
    for (i, snapshot) in snapshots.iter().enumerate() {
        summary.samples += registry.dispatch(snapshot, clock.timestamp(i, snapshot));
        summary.snapshots += 1;
    }
    info!(
        snapshots = summary.snapshots,
        samples = summary.samples,
        "replay finished"
    );
    summary
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::DashboardConfig;
    use crate::host::MetricKind;
    use crate::surface::RecordingSurface;
    use serde_json::json;

    #[test]
    fn test_parse_skips_blank_lines() {
        let text = "{\"heapMemory\": 0.1}\n\n  \n{\"heapMemory\": 0.2}\n";
        assert_eq!(parse_snapshots(text).unwrap().len(), 2);
    }

    #[test]
    fn test_parse_reports_line_number() {
        let text = "{\"heapMemory\": 0.1}\n{oops\n";
        match parse_snapshots(text) {
            Err(ChartError::Snapshot { line, .. }) => assert_eq!(line, 2),
            other => panic!("expected snapshot error, got {other:?}"),
        }
    }

    #[test]
    fn test_clock_prefers_embedded_timestamp() {
        let clock = ReplayClock::new(1_000, 2_000);
        assert_eq!(clock.timestamp(3, &json!({})), 7_000);
        assert_eq!(clock.timestamp(3, &json!({ "timestamp": 42 })), 42);
    }

    #[test]
    fn test_ending_now_spans_interval() {
        let clock = ReplayClock::ending_now(3, 2_000);
        let last = clock.timestamp(2, &json!({}));
        assert!(chrono::Utc::now().timestamp_millis() - last < 60_000);
        assert_eq!(last - clock.timestamp(0, &json!({})), 4_000);
    }

    #[test]
    fn test_replay_keeps_last_window() {
        let config = DashboardConfig::from_toml_str(
            "[[panels]]\nmetric = \"events\"\nmax_points = 3",
        )
        .unwrap();
        let mut registry =
            ChartRegistry::from_config(&config, |_| RecordingSurface::new(400.0, 200.0));
        let snapshots: Vec<Value> = (1..=5).map(|i| json!({ "totalEvents": i * 10 })).collect();

        let summary = replay(&mut registry, &snapshots, ReplayClock::new(0, 2_000));
        assert_eq!(summary, ReplaySummary { snapshots: 5, samples: 5 });

        let events = registry.get(MetricKind::Events).unwrap().samples().to_vec();
        let pairs: Vec<(f64, i64)> = events.iter().map(|s| (s.value, s.timestamp)).collect();
        assert_eq!(pairs, vec![(30.0, 4_000), (40.0, 6_000), (50.0, 8_000)]);
    }
}
