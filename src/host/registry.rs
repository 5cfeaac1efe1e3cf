//! Chart Registry
//! Named chart handles owned by the host, used to route incoming metrics.

use super::metrics::{extract_readings, MetricKind};
use crate::charts::ChartWidget;
use crate::config::{DashboardConfig, PanelConfig};
use crate::surface::Surface;
use serde_json::Value;
use std::collections::BTreeMap;
use tracing::{debug, trace};

pub struct ChartRegistry<S: Surface> {
    charts: BTreeMap<MetricKind, ChartWidget<S>>,
}

impl<S: Surface> Default for ChartRegistry<S> {
    fn default() -> Self {
        Self::new()
    }
}

impl<S: Surface> ChartRegistry<S> {
    pub fn new() -> Self {
        Self {
            charts: BTreeMap::new(),
        }
    }

    /// One chart per configured panel, on surfaces made by `make_surface`.
    /// A later panel for the same metric replaces an earlier one.
    pub fn from_config<F>(config: &DashboardConfig, mut make_surface: F) -> Self
    where
        F: FnMut(&PanelConfig) -> S,
    {
        let mut registry = Self::new();
        for panel in config.panels() {
            let render = panel.render_config(config.dashboard.theme);
            let chart = ChartWidget::new(make_surface(&panel), render);
            if let Some(mut replaced) = registry.insert(panel.metric, chart) {
                replaced.destroy();
            }
        }
        debug!(charts = registry.len(), "chart registry built");
        registry
    }

    pub fn insert(&mut self, metric: MetricKind, chart: ChartWidget<S>) -> Option<ChartWidget<S>> {
        self.charts.insert(metric, chart)
    }

    pub fn get(&self, metric: MetricKind) -> Option<&ChartWidget<S>> {
        self.charts.get(&metric)
    }

    pub fn get_mut(&mut self, metric: MetricKind) -> Option<&mut ChartWidget<S>> {
        self.charts.get_mut(&metric)
    }

    pub fn len(&self) -> usize {
        self.charts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.charts.is_empty()
    }

    pub fn charts(&self) -> &BTreeMap<MetricKind, ChartWidget<S>> {
        &self.charts
    }

    pub fn iter(&self) -> impl Iterator<Item = (MetricKind, &ChartWidget<S>)> + '_ {
        self.charts.iter().map(|(k, v)| (*k, v))
    }

    /// Feed one snapshot to the matching charts, all stamped with `timestamp`.
    /// Returns how many charts received a sample.
    pub fn dispatch(&mut self, snapshot: &Value, timestamp: i64) -> usize {
        let mut updated = 0;
        for reading in extract_readings(snapshot) {
            match self.charts.get_mut(&reading.metric) {
                Some(chart) => {
                    chart.add_point_at(reading.value, timestamp);
                    updated += 1;
                }
                None => trace!(metric = %reading.metric, "no chart for metric"),
            }
        }
        updated
    }

    pub fn destroy_all(&mut self) {
        for chart in self.charts.values_mut() {
            chart.destroy();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::surface::RecordingSurface;
    use serde_json::json;

    fn registry(config: &DashboardConfig) -> ChartRegistry<RecordingSurface> {
        ChartRegistry::from_config(config, |_| RecordingSurface::new(400.0, 200.0))
    }

    #[test]
    fn test_default_dashboard_has_four_charts() {
        let registry = registry(&DashboardConfig::default());
        let metrics: Vec<_> = registry.iter().map(|(k, _)| k).collect();
        assert_eq!(metrics, MetricKind::ALL.to_vec());
        let threads = registry.get(MetricKind::Threads).unwrap();
        assert_eq!(threads.config().title.as_deref(), Some("Thread Count"));
    }

    #[test]
    fn test_dispatch_routes_by_metric() {
        let mut registry = registry(&DashboardConfig::default());
        let updated = registry.dispatch(
            &json!({ "usedMemory": "100 MB", "threadsNano": 1.4, "threadsActive": 2 }),
            1_000,
        );
        assert_eq!(updated, 2);

        let memory = registry.get(MetricKind::Memory).unwrap();
        assert_eq!(memory.samples().to_vec()[0].value, 100.0);
        assert_eq!(memory.samples().to_vec()[0].timestamp, 1_000);
        // Thread chart is integer-valued
        let threads = registry.get(MetricKind::Threads).unwrap();
        assert_eq!(threads.samples().to_vec()[0].value, 3.0);
        assert!(registry.get(MetricKind::Heap).unwrap().samples().is_empty());
    }

    #[test]
    fn test_dispatch_skips_unconfigured_metrics() {
        let config = DashboardConfig::from_toml_str("[[panels]]\nmetric = \"heap\"").unwrap();
        let mut registry = registry(&config);
        assert_eq!(registry.len(), 1);
        let updated = registry.dispatch(&json!({ "usedMemory": "1 MB", "heapMemory": 0.5 }), 0);
        assert_eq!(updated, 1);
    }

    #[test]
    fn test_destroy_all() {
        let mut registry = registry(&DashboardConfig::default());
        registry.destroy_all();
        assert!(registry.iter().all(|(_, chart)| chart.is_destroyed()));
    }
}
