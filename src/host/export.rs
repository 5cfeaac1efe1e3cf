//! Chart Export
//! PNG snapshots of rendered charts and JSON dumps of their sample windows.

use super::metrics::MetricKind;
use super::registry::ChartRegistry;
use crate::charts::{ChartWidget, SampleWindow};
use crate::error::Result;
use crate::surface::{BitmapSurface, Surface};
use rayon::prelude::*;
use std::fs::File;
use std::io::BufWriter;
use std::path::{Path, PathBuf};
use tracing::debug;

/// Write `<metric>.png` for every chart into `dir`, encoding in parallel.
pub fn export_pngs(registry: &ChartRegistry<BitmapSurface>, dir: &Path) -> Result<Vec<PathBuf>> {
    std::fs::create_dir_all(dir)?;
    registry
        .charts()
        .par_iter()
        .map(|(metric, chart)| -> Result<PathBuf> {
            let path = output_path(dir, *metric, "png");
            chart.surface().save_png(&path)?;
            debug!(path = %path.display(), "chart image written");
            Ok(path)
        })
        .collect()
}

/// Write `<metric>.json` holding each chart's current window.
pub fn export_samples<S: Surface>(registry: &ChartRegistry<S>, dir: &Path) -> Result<Vec<PathBuf>> {
    std::fs::create_dir_all(dir)?;
    registry
        .iter()
        .map(|(metric, chart)| -> Result<PathBuf> {
            let path = output_path(dir, metric, "json");
            write_samples(chart, &path)?;
            debug!(path = %path.display(), "chart samples written");
            Ok(path)
        })
        .collect()
}

pub fn write_samples<S: Surface>(chart: &ChartWidget<S>, path: &Path) -> Result<()> {
    let writer = BufWriter::new(File::create(path)?);
    serde_json::to_writer_pretty(writer, &chart.samples().to_vec())?;
    Ok(())
}

pub fn samples_json(window: &SampleWindow) -> Result<String> {
    Ok(serde_json::to_string(&window.to_vec())?)
}

fn output_path(dir: &Path, metric: MetricKind, extension: &str) -> PathBuf {
    dir.join(format!("{}.{}", metric.key(), extension))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::charts::Sample;

    #[test]
    fn test_samples_json_shape() {
        let mut window = SampleWindow::new(2);
        window.replace(vec![Sample::new(1.5, 10), Sample::new(2.0, 20)]);
        assert_eq!(
            samples_json(&window).unwrap(),
            r#"[{"value":1.5,"timestamp":10},{"value":2.0,"timestamp":20}]"#
        );
    }

    #[test]
    fn test_output_path() {
        let path = output_path(Path::new("out"), MetricKind::Heap, "png");
        assert_eq!(path, Path::new("out").join("heap.png"));
    }
}
