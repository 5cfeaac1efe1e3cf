//! Coordinate Mapper
//! Maps window samples to display-space points. Drawing and hit-testing both
//! go through here so a tooltip always lines up with the rendered point.

use super::window::{Sample, SampleWindow};
use crate::surface::{Point, Size};

/// Inner rectangle of the chart, inside the padding margins.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PlotArea {
    pub padding: f64,
    pub width: f64,
    pub height: f64,
}

impl PlotArea {
    pub fn new(display: Size, padding: f64) -> Self {
        Self {
            padding,
            width: display.width - padding * 2.0,
            height: display.height - padding * 2.0,
        }
    }

    /// y of the `i`-th of the 5 horizontal gridlines, top to bottom.
    pub fn grid_y(&self, i: usize) -> f64 {
        self.padding + self.height * i as f64 / 4.0
    }

    /// x of the `i`-th of the 5 vertical gridlines, left to right.
    pub fn grid_x(&self, i: usize) -> f64 {
        self.padding + self.width * i as f64 / 4.0
    }

    pub fn left(&self) -> f64 {
        self.padding
    }

    pub fn right(&self) -> f64 {
        self.padding + self.width
    }

    pub fn top(&self) -> f64 {
        self.padding
    }

    pub fn bottom(&self) -> f64 {
        self.padding + self.height
    }
}

/// Value extent of a window. A zero (or NaN) span is replaced by 1 so flat
/// and single-sample windows still map to a horizontal line.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ValueRange {
    pub min: f64,
    pub max: f64,
    pub span: f64,
}

impl ValueRange {
    pub fn of(window: &SampleWindow) -> Option<Self> {
        let (min, max) = window.value_bounds()?;
        let span = max - min;
        let span = if span == 0.0 || span.is_nan() { 1.0 } else { span };
        Some(Self { min, max, span })
    }

    /// Value shown at the `i`-th horizontal gridline label.
    pub fn grid_value(&self, i: usize) -> f64 {
        self.max - self.span * i as f64 / 4.0
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CoordinateMapper {
    area: PlotArea,
    range: ValueRange,
    len: usize,
}

impl CoordinateMapper {
    /// `None` for an empty window.
    pub fn new(display: Size, padding: f64, window: &SampleWindow) -> Option<Self> {
        Some(Self {
            area: PlotArea::new(display, padding),
            range: ValueRange::of(window)?,
            len: window.len(),
        })
    }

    pub fn area(&self) -> &PlotArea {
        &self.area
    }

    pub fn range(&self) -> &ValueRange {
        &self.range
    }

    /// Index-based x: samples are evenly spaced regardless of timestamps.
    pub fn x(&self, index: usize) -> f64 {
        if self.len == 1 {
            self.area.padding + self.area.width / 2.0
        } else {
            self.area.padding + self.area.width * index as f64 / (self.len - 1) as f64
        }
    }

    pub fn y(&self, value: f64) -> f64 {
        self.area.padding + self.area.height
            - (value - self.range.min) / self.range.span * self.area.height
    }

    pub fn point(&self, index: usize, sample: &Sample) -> Point {
        Point::new(self.x(index), self.y(sample.value))
    }

    /// Mapped points in window order.
    pub fn points(&self, window: &SampleWindow) -> Vec<Point> {
        window
            .iter()
            .enumerate()
            .map(|(i, sample)| self.point(i, sample))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn window_of(values: &[f64]) -> SampleWindow {
        let mut window = SampleWindow::new(values.len());
        window.replace(
            values
                .iter()
                .enumerate()
                .map(|(i, &v)| Sample::new(v, i as i64)),
        );
        window
    }

    #[test]
    fn test_empty_window_has_no_mapper() {
        let window = SampleWindow::new(5);
        assert!(CoordinateMapper::new(Size::new(400.0, 200.0), 40.0, &window).is_none());
    }

    #[test]
    fn test_singleton_is_centered() {
        let window = window_of(&[5.0]);
        let mapper = CoordinateMapper::new(Size::new(400.0, 200.0), 40.0, &window).unwrap();
        assert_eq!(mapper.points(&window), vec![Point::new(200.0, 160.0)]);
    }

    #[test]
    fn test_flat_window_maps_to_one_row() {
        let window = window_of(&[7.0, 7.0, 7.0, 7.0]);
        let mapper = CoordinateMapper::new(Size::new(400.0, 200.0), 40.0, &window).unwrap();
        assert_eq!(mapper.range().span, 1.0);
        let ys: Vec<f64> = mapper.points(&window).iter().map(|p| p.y).collect();
        assert!(ys.iter().all(|&y| y == 160.0));
    }

    #[test]
    fn test_extremes_hit_plot_edges() {
        let window = window_of(&[0.0, 50.0, 100.0]);
        let mapper = CoordinateMapper::new(Size::new(400.0, 200.0), 40.0, &window).unwrap();
        assert_eq!(
            mapper.points(&window),
            vec![
                Point::new(40.0, 160.0),
                Point::new(200.0, 100.0),
                Point::new(360.0, 40.0),
            ]
        );
    }

    #[test]
    fn test_all_nan_window_gets_unit_span() {
        let window = window_of(&[f64::NAN, f64::NAN]);
        let range = ValueRange::of(&window).unwrap();
        assert_eq!(range.span, 1.0);
        assert!(range.min.is_nan());
    }

    #[test]
    fn test_infinite_span_is_kept() {
        let window = window_of(&[-f64::MAX, f64::MAX]);
        let range = ValueRange::of(&window).unwrap();
        assert_eq!(range.span, f64::INFINITY);
    }

    #[test]
    fn test_gridlines_and_labels() {
        let window = window_of(&[10.0, 30.0]);
        let mapper = CoordinateMapper::new(Size::new(400.0, 200.0), 40.0, &window).unwrap();
        let area = mapper.area();
        assert_eq!((0..5).map(|i| area.grid_y(i)).collect::<Vec<_>>(), vec![40.0, 70.0, 100.0, 130.0, 160.0]);
        assert_eq!((0..5).map(|i| area.grid_x(i)).collect::<Vec<_>>(), vec![40.0, 120.0, 200.0, 280.0, 360.0]);
        let labels: Vec<f64> = (0..5).map(|i| mapper.range().grid_value(i)).collect();
        assert_eq!(labels, vec![30.0, 25.0, 20.0, 15.0, 10.0]);
    }
}
