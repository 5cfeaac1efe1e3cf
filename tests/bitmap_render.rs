//! Rasterizing charts into pixels and writing them out as PNG.

use std::path::PathBuf;
use tinychart::config::Theme;
use tinychart::host::{self, ChartRegistry, MetricKind};
use tinychart::{BitmapSurface, ChartWidget, RenderConfig, Sample};

fn scratch_dir(name: &str) -> PathBuf {
    let dir = std::env::temp_dir().join(format!("tinychart-{}-{}", name, std::process::id()));
    let _ = std::fs::remove_dir_all(&dir);
    dir
}

fn high_dpi_chart() -> ChartWidget<BitmapSurface> {
    let surface = BitmapSurface::new(400, 200).with_device_pixel_ratio(Some(2.0));
    let mut chart = ChartWidget::new(surface, RenderConfig::default());
    // (40, 160) and (360, 40) in display units
    chart.set_data(vec![Sample::new(10.0, 1_000), Sample::new(30.0, 2_000)]);
    chart
}

#[test]
fn test_high_dpi_chart_pixels() {
    let chart = high_dpi_chart();
    let config = chart.config().clone();
    let image = chart.surface().image();
    assert_eq!(image.dimensions(), (800, 400));

    // Outside the plot area only the background is painted
    assert_eq!(image.get_pixel(10, 10).0, config.background_color.to_rgba());

    // Midpoint of the polyline, (200, 100) in display units
    assert_eq!(image.get_pixel(400, 200).0, config.line_color.to_rgba());

    // Point fill at the center, white outline one radius to the right
    assert_eq!(image.get_pixel(80, 320).0, config.point_color.to_rgba());
    assert_eq!(image.get_pixel(90, 320).0, [255, 255, 255, 255]);
}

#[test]
fn test_thick_line_covers_both_sides() {
    let chart = high_dpi_chart();
    let line = chart.config().line_color.to_rgba();
    let image = chart.surface().image();
    // 2 display units wide at ratio 2 spans more than one pixel row
    let covered = (198..=202)
        .filter(|&y| image.get_pixel(400, y).0 == line)
        .count();
    assert!(covered >= 2, "line covers {} rows", covered);
}

#[test]
fn test_save_png_round_trips_dimensions() {
    let chart = high_dpi_chart();
    let dir = scratch_dir("save");
    std::fs::create_dir_all(&dir).unwrap();
    let path = dir.join("chart.png");
    chart.surface().save_png(&path).unwrap();

    let decoded = image::open(&path).unwrap().to_rgba8();
    assert_eq!(decoded.dimensions(), (800, 400));
    assert_eq!(decoded.get_pixel(400, 200), chart.surface().image().get_pixel(400, 200));
    std::fs::remove_dir_all(&dir).unwrap();
}

#[test]
fn test_export_pngs_writes_one_file_per_chart() {
    let mut registry = ChartRegistry::new();
    for metric in [MetricKind::Memory, MetricKind::Heap] {
        let config = metric.default_render_config(Theme::Light);
        let mut chart = ChartWidget::new(BitmapSurface::new(200, 100), config);
        chart.add_point_at(1.0, 1);
        chart.add_point_at(2.0, 2);
        registry.insert(metric, chart);
    }

    let dir = scratch_dir("export");
    let mut written = host::export_pngs(&registry, &dir).unwrap();
    written.sort();
    assert_eq!(written, vec![dir.join("heap.png"), dir.join("memory.png")]);
    for path in &written {
        assert!(path.is_file());
        assert_eq!(image::open(path).unwrap().to_rgba8().dimensions(), (200, 100));
    }
    std::fs::remove_dir_all(&dir).unwrap();
}
