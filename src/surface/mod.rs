//! Surface module - Drawing surfaces charts render onto
//!
//! Coordinates passed to drawing calls are display units. A surface maps them
//! to its backing buffer with the scale given to [`Surface::configure`].

mod bitmap;
mod recording;

pub use bitmap::{BitmapSurface, FontSet};
pub use recording::{DrawCommand, RecordingSurface};

use crate::config::Color;

#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    pub fn distance_to(self, other: Point) -> f64 {
        ((self.x - other.x).powi(2) + (self.y - other.y).powi(2)).sqrt()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Size {
    pub width: f64,
    pub height: f64,
}

impl Size {
    pub const fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }
}

/// Axis-aligned rectangle. For a surface's bounding rect, `left`/`top` are
/// viewport coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Rect {
    pub left: f64,
    pub top: f64,
    pub width: f64,
    pub height: f64,
}

impl Rect {
    pub const fn new(left: f64, top: f64, width: f64, height: f64) -> Self {
        Self {
            left,
            top,
            width,
            height,
        }
    }

    pub fn size(&self) -> Size {
        Size::new(self.width, self.height)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TextAlign {
    #[default]
    Left,
    Center,
}

/// Font request for [`Surface::fill_text`]. The anchor point is the text baseline.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TextStyle {
    pub size: f64,
    pub bold: bool,
    pub align: TextAlign,
}

impl TextStyle {
    pub const fn regular(size: f64) -> Self {
        Self {
            size,
            bold: false,
            align: TextAlign::Left,
        }
    }

    pub const fn bold(size: f64) -> Self {
        Self {
            size,
            bold: true,
            align: TextAlign::Left,
        }
    }

    pub const fn centered(mut self) -> Self {
        self.align = TextAlign::Center;
        self
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Cursor {
    #[default]
    Default,
    /// Clickable affordance shown while a sample is under the pointer
    Pointer,
}

/// Pointer input as delivered by the host, in viewport coordinates.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PointerEvent {
    Move { client_x: f64, client_y: f64 },
    Leave,
}

/// Handle returned by [`Surface::add_pointer_listener`]; pass it back to
/// [`Surface::remove_pointer_listener`] to unsubscribe.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ListenerId(pub u64);

/// The drawing operations a chart needs from its host.
pub trait Surface {
    /// Current layout box of the surface, in display units.
    fn bounding_rect(&self) -> Rect;

    /// Physical pixels per display unit, if the host reports one.
    fn device_pixel_ratio(&self) -> Option<f64>;

    /// Size of the viewport the surface lives in (tooltip clamping bounds).
    fn viewport_size(&self) -> Size;

    /// Reallocate the backing buffer and reset the drawing scale.
    fn configure(&mut self, backing_width: u32, backing_height: u32, scale: f64);

    fn fill_rect(&mut self, rect: Rect, color: Color);

    fn stroke_polyline(&mut self, points: &[Point], width: f64, color: Color);

    fn stroke_line(&mut self, from: Point, to: Point, width: f64, color: Color) {
        self.stroke_polyline(&[from, to], width, color);
    }

    fn fill_circle(&mut self, center: Point, radius: f64, color: Color);

    fn stroke_circle(&mut self, center: Point, radius: f64, width: f64, color: Color);

    fn fill_text(&mut self, text: &str, at: Point, style: TextStyle, color: Color);

    fn set_cursor(&mut self, cursor: Cursor);

    /// Subscribe to pointer move/leave events for this surface.
    fn add_pointer_listener(&mut self) -> ListenerId;

    fn remove_pointer_listener(&mut self, id: ListenerId);
}

/// Ratio used when the host reports none or a nonsensical one.
pub(crate) fn effective_pixel_ratio(reported: Option<f64>) -> f64 {
    match reported {
        Some(ratio) if ratio.is_finite() && ratio > 0.0 => ratio,
        _ => 1.0,
    }
}
