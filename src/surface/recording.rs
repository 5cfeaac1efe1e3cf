//! Recording Surface
//! Keeps every drawing call as a command instead of rasterizing it.

use super::{Cursor, ListenerId, Point, Rect, Size, Surface, TextStyle};
use crate::config::Color;

#[derive(Debug, Clone, PartialEq)]
pub enum DrawCommand {
    Configure {
        backing_width: u32,
        backing_height: u32,
        scale: f64,
    },
    FillRect {
        rect: Rect,
        color: Color,
    },
    StrokePolyline {
        points: Vec<Point>,
        width: f64,
        color: Color,
    },
    FillCircle {
        center: Point,
        radius: f64,
        color: Color,
    },
    StrokeCircle {
        center: Point,
        radius: f64,
        width: f64,
        color: Color,
    },
    FillText {
        text: String,
        at: Point,
        style: TextStyle,
        color: Color,
    },
}

/// Headless surface with a fixed layout box.
#[derive(Debug, Clone)]
pub struct RecordingSurface {
    rect: Rect,
    viewport: Size,
    pixel_ratio: Option<f64>,
    commands: Vec<DrawCommand>,
    cursor: Cursor,
    listeners: Vec<ListenerId>,
    next_listener: u64,
}

impl RecordingSurface {
    /// A `width` x `height` surface at the viewport origin, in a viewport of the same size.
    pub fn new(width: f64, height: f64) -> Self {
        Self {
            rect: Rect::new(0.0, 0.0, width, height),
            viewport: Size::new(width, height),
            pixel_ratio: None,
            commands: Vec::new(),
            cursor: Cursor::Default,
            listeners: Vec::new(),
            next_listener: 0,
        }
    }

    pub fn with_device_pixel_ratio(mut self, ratio: f64) -> Self {
        self.pixel_ratio = Some(ratio);
        self
    }

    pub fn with_origin(mut self, left: f64, top: f64) -> Self {
        self.rect.left = left;
        self.rect.top = top;
        self
    }

    pub fn with_viewport(mut self, width: f64, height: f64) -> Self {
        self.viewport = Size::new(width, height);
        self
    }

    /// Simulate a layout change; the chart picks it up on `resize()`.
    pub fn set_layout(&mut self, width: f64, height: f64) {
        self.rect.width = width;
        self.rect.height = height;
    }

    pub fn set_device_pixel_ratio(&mut self, ratio: Option<f64>) {
        self.pixel_ratio = ratio;
    }

    pub fn commands(&self) -> &[DrawCommand] {
        &self.commands
    }

    pub fn take_commands(&mut self) -> Vec<DrawCommand> {
        std::mem::take(&mut self.commands)
    }

    pub fn cursor(&self) -> Cursor {
        self.cursor
    }

    pub fn listener_count(&self) -> usize {
        self.listeners.len()
    }
}

impl Surface for RecordingSurface {
    fn bounding_rect(&self) -> Rect {
        self.rect
    }

    fn device_pixel_ratio(&self) -> Option<f64> {
        self.pixel_ratio
    }

    fn viewport_size(&self) -> Size {
        self.viewport
    }

    fn configure(&mut self, backing_width: u32, backing_height: u32, scale: f64) {
        self.commands.push(DrawCommand::Configure {
            backing_width,
            backing_height,
            scale,
        });
    }

    fn fill_rect(&mut self, rect: Rect, color: Color) {
        self.commands.push(DrawCommand::FillRect { rect, color });
    }

    fn stroke_polyline(&mut self, points: &[Point], width: f64, color: Color) {
        self.commands.push(DrawCommand::StrokePolyline {
            points: points.to_vec(),
            width,
            color,
        });
    }

    fn fill_circle(&mut self, center: Point, radius: f64, color: Color) {
        self.commands.push(DrawCommand::FillCircle {
            center,
            radius,
            color,
        });
    }

    fn stroke_circle(&mut self, center: Point, radius: f64, width: f64, color: Color) {
        self.commands.push(DrawCommand::StrokeCircle {
            center,
            radius,
            width,
            color,
        });
    }

    fn fill_text(&mut self, text: &str, at: Point, style: TextStyle, color: Color) {
        self.commands.push(DrawCommand::FillText {
            text: text.to_string(),
            at,
            style,
            color,
        });
    }

    fn set_cursor(&mut self, cursor: Cursor) {
        self.cursor = cursor;
    }

    fn add_pointer_listener(&mut self) -> ListenerId {
        let id = ListenerId(self.next_listener);
        self.next_listener += 1;
        self.listeners.push(id);
        id
    }

    fn remove_pointer_listener(&mut self, id: ListenerId) {
        self.listeners.retain(|l| *l != id);
    }
}
