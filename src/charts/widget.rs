//! Chart Widget
//! Rolling line chart: owns its sample window and surface, redraws on every
//! change and answers pointer hover with a tooltip.

use super::labels::{axis_label, round_half_up, time_of_day, tooltip_value};
use super::mapper::CoordinateMapper;
use super::tooltip::{Tooltip, TooltipContent};
use super::window::{Sample, SampleWindow};
use crate::config::{Color, RenderConfig};
use crate::surface::{
    effective_pixel_ratio, Cursor, ListenerId, Point, PointerEvent, Rect, Size, Surface, TextStyle,
};
use tracing::{debug, trace};

/// A pointer must be closer than this to a point (display units) to hit it.
pub const HIT_RADIUS: f64 = 25.0;
pub const POINT_RADIUS: f64 = 5.0;
const POINT_OUTLINE_WIDTH: f64 = 2.0;
const LINE_WIDTH: f64 = 2.0;
const GRID_WIDTH: f64 = 1.0;
const GRID_DIVISIONS: usize = 4;
const LABEL_STYLE: TextStyle = TextStyle::regular(12.0);
const LABEL_X: f64 = 5.0;
const LABEL_BASELINE_OFFSET: f64 = 4.0;
const TITLE_STYLE: TextStyle = TextStyle::bold(14.0).centered();
const TITLE_BASELINE: f64 = 20.0;
const FALLBACK_TITLE: &str = "Value";

/// Display size and pixel ratio captured from the surface.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ViewportGeometry {
    pub display: Size,
    pub pixel_ratio: f64,
}

impl ViewportGeometry {
    fn measure<S: Surface>(surface: &S) -> Self {
        Self {
            display: surface.bounding_rect().size(),
            pixel_ratio: effective_pixel_ratio(surface.device_pixel_ratio()),
        }
    }

    /// Backing buffer size in physical pixels.
    pub fn backing_size(&self) -> (u32, u32) {
        (
            (self.display.width * self.pixel_ratio) as u32,
            (self.display.height * self.pixel_ratio) as u32,
        )
    }
}

/// The sample nearest to the pointer.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Hit {
    pub index: usize,
    pub sample: Sample,
    pub point: Point,
    pub distance: f64,
}

pub struct ChartWidget<S: Surface> {
    surface: S,
    config: RenderConfig,
    window: SampleWindow,
    geometry: ViewportGeometry,
    tooltip: Option<Tooltip>,
    listener: Option<ListenerId>,
}

impl<S: Surface> ChartWidget<S> {
    /// Attach a chart to `surface`: size the backing buffer for the device
    /// pixel ratio and subscribe to pointer events.
    pub fn new(mut surface: S, config: RenderConfig) -> Self {
        let geometry = Self::attach(&mut surface);
        let listener = surface.add_pointer_listener();
        debug!(
            title = config.title.as_deref().unwrap_or(FALLBACK_TITLE),
            width = geometry.display.width,
            height = geometry.display.height,
            ratio = geometry.pixel_ratio,
            "chart attached"
        );
        Self {
            surface,
            window: SampleWindow::new(config.capacity()),
            config,
            geometry,
            tooltip: None,
            listener: Some(listener),
        }
    }

    fn attach(surface: &mut S) -> ViewportGeometry {
        let geometry = ViewportGeometry::measure(surface);
        let (width, height) = geometry.backing_size();
        surface.configure(width, height, geometry.pixel_ratio);
        geometry
    }

    pub fn config(&self) -> &RenderConfig {
        &self.config
    }

    pub fn geometry(&self) -> ViewportGeometry {
        self.geometry
    }

    pub fn samples(&self) -> &SampleWindow {
        &self.window
    }

    pub fn surface(&self) -> &S {
        &self.surface
    }

    /// Direct surface access for hosts that forward layout changes.
    pub fn surface_mut(&mut self) -> &mut S {
        &mut self.surface
    }

    pub fn into_surface(self) -> S {
        self.surface
    }

    pub fn tooltip(&self) -> Option<&Tooltip> {
        self.tooltip.as_ref()
    }

    /// Replace the window with the newest `max_points` of `samples` and redraw.
    pub fn set_data<I>(&mut self, samples: I)
    where
        I: IntoIterator<Item = Sample>,
    {
        self.window.replace(samples);
        self.draw();
    }

    /// Append a sample stamped with the current time.
    pub fn add_point(&mut self, value: f64) {
        self.add_point_at(value, chrono::Utc::now().timestamp_millis());
    }

    pub fn add_point_at(&mut self, value: f64, timestamp: i64) {
        let value = if self.config.is_integer {
            round_half_up(value)
        } else {
            value
        };
        if let Some(evicted) = self.window.push(Sample::new(value, timestamp)) {
            trace!(timestamp = evicted.timestamp, "evicted oldest sample");
        }
        self.draw();
    }

    /// Drop every sample and hide the tooltip. The surface keeps its last frame.
    pub fn reset(&mut self) {
        self.window.clear();
        self.hide_tooltip();
    }

    /// Re-read layout and pixel ratio from the surface and redraw at the new size.
    pub fn resize(&mut self) {
        self.geometry = Self::attach(&mut self.surface);
        debug!(
            width = self.geometry.display.width,
            height = self.geometry.display.height,
            ratio = self.geometry.pixel_ratio,
            "chart resized"
        );
        self.draw();
    }

    fn mapper(&self) -> Option<CoordinateMapper> {
        CoordinateMapper::new(self.geometry.display, self.config.padding, &self.window)
    }

    /// Full redraw. Does nothing while the window is empty.
    pub fn draw(&mut self) {
        let Some(mapper) = self.mapper() else {
            return;
        };
        let config = &self.config;
        let surface = &mut self.surface;
        let display = self.geometry.display;
        let area = *mapper.area();
        let range = *mapper.range();

        surface.fill_rect(
            Rect::new(0.0, 0.0, display.width, display.height),
            config.background_color,
        );

        for i in 0..=GRID_DIVISIONS {
            let y = area.grid_y(i);
            surface.stroke_line(
                Point::new(area.left(), y),
                Point::new(area.right(), y),
                GRID_WIDTH,
                config.grid_color,
            );
            surface.fill_text(
                &axis_label(range.grid_value(i), config.is_integer),
                Point::new(LABEL_X, y + LABEL_BASELINE_OFFSET),
                LABEL_STYLE,
                config.text_color,
            );
        }

        for i in 0..=GRID_DIVISIONS {
            let x = area.grid_x(i);
            surface.stroke_line(
                Point::new(x, area.top()),
                Point::new(x, area.bottom()),
                GRID_WIDTH,
                config.grid_color,
            );
        }

        let points = mapper.points(&self.window);
        if points.len() > 1 {
            surface.stroke_polyline(&points, LINE_WIDTH, config.line_color);
        }

        for point in &points {
            surface.fill_circle(*point, POINT_RADIUS, config.point_color);
            surface.stroke_circle(*point, POINT_RADIUS, POINT_OUTLINE_WIDTH, Color::WHITE);
        }

        if let Some(title) = &config.title {
            surface.fill_text(
                title,
                Point::new(display.width / 2.0, TITLE_BASELINE),
                TITLE_STYLE,
                config.text_color,
            );
        }

        trace!(samples = points.len(), "chart drawn");
    }

    /// Nearest sample strictly within [`HIT_RADIUS`] of `pointer` (display
    /// units). Ties go to the lower index.
    pub fn hit_test(&self, pointer: Point) -> Option<Hit> {
        let mapper = self.mapper()?;
        let mut best: Option<Hit> = None;
        for (index, sample) in self.window.iter().enumerate() {
            let point = mapper.point(index, sample);
            let distance = point.distance_to(pointer);
            let closer = best.map_or(true, |b| distance < b.distance);
            if distance < HIT_RADIUS && closer {
                best = Some(Hit {
                    index,
                    sample: *sample,
                    point,
                    distance,
                });
            }
        }
        trace!(x = pointer.x, y = pointer.y, hit = ?best.map(|h| h.index), "hit test");
        best
    }

    /// Route a pointer event from the host. Ignored once the chart is destroyed.
    pub fn handle_pointer(&mut self, event: PointerEvent) -> Option<Hit> {
        if self.is_destroyed() {
            return None;
        }
        match event {
            PointerEvent::Move { client_x, client_y } => {
                let rect = self.surface.bounding_rect();
                self.pointer_move(Point::new(client_x - rect.left, client_y - rect.top))
            }
            PointerEvent::Leave => {
                self.hide_tooltip();
                None
            }
        }
    }

    /// Hover at `pointer` in display units: show the tooltip for the nearest
    /// sample, or hide it. An empty chart ignores the pointer.
    pub fn pointer_move(&mut self, pointer: Point) -> Option<Hit> {
        if self.window.is_empty() {
            return None;
        }
        match self.hit_test(pointer) {
            Some(hit) => {
                self.show_tooltip(&hit.sample, pointer);
                self.surface.set_cursor(Cursor::Pointer);
                Some(hit)
            }
            None => {
                self.hide_tooltip();
                None
            }
        }
    }

    fn show_tooltip(&mut self, sample: &Sample, pointer: Point) {
        let content = TooltipContent {
            title: self
                .config
                .title
                .clone()
                .unwrap_or_else(|| FALLBACK_TITLE.to_string()),
            value: tooltip_value(sample.value, self.config.is_integer),
            time: time_of_day(sample.timestamp),
        };
        let rect = self.surface.bounding_rect();
        let client = Point::new(rect.left + pointer.x, rect.top + pointer.y);
        let viewport = self.surface.viewport_size();
        self.tooltip
            .get_or_insert_with(Tooltip::new)
            .show(content, client, viewport);
    }

    fn hide_tooltip(&mut self) {
        if let Some(tooltip) = &mut self.tooltip {
            tooltip.hide();
        }
        self.surface.set_cursor(Cursor::Default);
    }

    /// Remove the tooltip overlay and unsubscribe from pointer events.
    pub fn destroy(&mut self) {
        self.tooltip = None;
        if let Some(listener) = self.listener.take() {
            self.surface.remove_pointer_listener(listener);
            debug!(listener = listener.0, "chart destroyed");
        }
    }

    pub fn is_destroyed(&self) -> bool {
        self.listener.is_none()
    }
}
