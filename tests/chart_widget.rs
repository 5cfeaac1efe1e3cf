//! End-to-end behaviour of the chart widget through its public API.

use tinychart::charts::{ChartWidget, CoordinateMapper, Sample, HIT_RADIUS};
use tinychart::config::RenderConfig;
use tinychart::surface::{DrawCommand, Point, PointerEvent, RecordingSurface, Size};

fn chart(config: RenderConfig) -> ChartWidget<RecordingSurface> {
    ChartWidget::new(RecordingSurface::new(400.0, 200.0), config)
}

fn drawn_points(surface: &RecordingSurface) -> Vec<Point> {
    surface
        .commands()
        .iter()
        .filter_map(|c| match c {
            DrawCommand::FillCircle { center, .. } => Some(*center),
            _ => None,
        })
        .collect()
}

#[test]
fn test_window_keeps_last_max_points() {
    let mut chart = chart(RenderConfig::default().with_max_points(3));
    chart.add_point_at(10.0, 1);
    chart.add_point_at(20.0, 2);
    chart.add_point_at(30.0, 3);
    chart.add_point_at(40.0, 4);

    let window = chart.samples().to_vec();
    assert_eq!(
        window,
        vec![Sample::new(20.0, 2), Sample::new(30.0, 3), Sample::new(40.0, 4)]
    );
}

#[test]
fn test_capacity_holds_for_long_runs() {
    let mut chart = chart(RenderConfig::default());
    for i in 0..137 {
        chart.add_point_at(i as f64, i);
        assert!(chart.samples().len() <= 50);
    }
    let values: Vec<f64> = chart.samples().iter().map(|s| s.value).collect();
    let expected: Vec<f64> = (87..137).map(|i| i as f64).collect();
    assert_eq!(values, expected);
}

#[test]
fn test_set_data_keeps_most_recent() {
    let mut chart = chart(RenderConfig::default().with_max_points(2));
    chart.set_data((0..5).map(|i| Sample::new(i as f64, i)));
    assert_eq!(
        chart.samples().to_vec(),
        vec![Sample::new(3.0, 3), Sample::new(4.0, 4)]
    );
}

#[test]
fn test_single_sample_scenario() {
    let mut chart = chart(RenderConfig::default());
    chart.set_data(vec![Sample::new(5.0, 1_700_000_000_000)]);
    assert_eq!(drawn_points(chart.surface()), vec![Point::new(200.0, 160.0)]);
}

#[test]
fn test_constant_values_share_one_row() {
    let mut chart = chart(RenderConfig::default());
    for i in 0..6 {
        chart.add_point_at(12.0, i);
    }
    let last_frame: Vec<Point> = drawn_points(chart.surface()).into_iter().rev().take(6).collect();
    assert!(last_frame.iter().all(|p| p.y == 160.0));
}

#[test]
fn test_hit_test_matches_drawn_points() {
    let mut chart = chart(RenderConfig::default());
    let values = [3.0, 9.5, -2.0, 14.0, 7.25];
    for (i, v) in values.iter().enumerate() {
        chart.add_point_at(*v, i as i64);
    }

    let drawn: Vec<Point> = drawn_points(chart.surface())
        .into_iter()
        .rev()
        .take(values.len())
        .rev()
        .collect();
    let mapper = CoordinateMapper::new(Size::new(400.0, 200.0), 40.0, chart.samples()).unwrap();
    assert_eq!(mapper.points(chart.samples()), drawn);

    for (i, point) in drawn.iter().enumerate() {
        let hit = chart.hit_test(*point).unwrap();
        assert_eq!(hit.index, i);
        assert_eq!(hit.point, *point);
        assert_eq!(hit.distance, 0.0);
    }
}

#[test]
fn test_pointer_out_of_reach_never_hits() {
    let mut chart = chart(RenderConfig::default());
    chart.set_data(vec![Sample::new(1.0, 1), Sample::new(2.0, 2)]);
    // Points sit at (40, 160) and (360, 40)
    assert!(chart.hit_test(Point::new(40.0, 160.0 + HIT_RADIUS)).is_none());
    assert!(chart.hit_test(Point::new(200.0, 100.0)).is_none());
    assert!(chart.hit_test(Point::new(40.0, 160.0 + HIT_RADIUS - 0.5)).is_some());
}

#[test]
fn test_integer_chart_tooltip() {
    let mut chart = chart(RenderConfig::default().with_integer_values(true).with_title("Thread Count"));
    chart.add_point_at(3.7, 0);
    assert_eq!(chart.samples().to_vec()[0].value, 4.0);

    chart.handle_pointer(PointerEvent::Move {
        client_x: 200.0,
        client_y: 160.0,
    });
    let content = chart.tooltip().and_then(|t| t.content()).unwrap();
    assert_eq!(content.title, "Thread Count");
    assert_eq!(content.value, "4");
}

#[test]
fn test_high_dpi_surface_draws_in_display_units() {
    let surface = RecordingSurface::new(400.0, 200.0).with_device_pixel_ratio(3.0);
    let mut chart = ChartWidget::new(surface, RenderConfig::default());
    chart.add_point_at(5.0, 0);
    let commands = chart.surface().commands();
    assert_eq!(
        commands[0],
        DrawCommand::Configure {
            backing_width: 1200,
            backing_height: 600,
            scale: 3.0,
        }
    );
    assert_eq!(drawn_points(chart.surface()), vec![Point::new(200.0, 160.0)]);
}
