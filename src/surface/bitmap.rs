//! Bitmap Surface
//! Rasterizes chart drawing calls into an RGBA pixel buffer.
//!
//! Shapes are drawn with imageproc, text with rusttype. Fonts are optional;
//! without them labels and titles are skipped.

use super::{Cursor, ListenerId, Point, Rect, Size, Surface, TextAlign, TextStyle};
use crate::config::Color;
use crate::error::{ChartError, Result};
use image::{ImageBuffer, ImageFormat, Rgba, RgbaImage};
use imageproc::drawing::{
    draw_filled_circle_mut, draw_filled_rect_mut, draw_hollow_circle_mut, draw_line_segment_mut,
};
use imageproc::rect::Rect as PixelRect;
use rusttype::{point, Font, Scale};
use std::path::Path;
use tracing::debug;

/// Regular face plus an optional bold face for titles. Cloning shares the font data.
#[derive(Clone)]
pub struct FontSet {
    regular: Font<'static>,
    bold: Option<Font<'static>>,
}

impl FontSet {
    pub fn load(regular: &Path, bold: Option<&Path>) -> Result<Self> {
        Ok(Self {
            regular: Self::read_font(regular)?,
            bold: bold.map(Self::read_font).transpose()?,
        })
    }

    fn read_font(path: &Path) -> Result<Font<'static>> {
        let bytes = std::fs::read(path)?;
        Font::try_from_vec(bytes).ok_or_else(|| ChartError::FontParse(path.to_path_buf()))
    }

    fn face(&self, bold: bool) -> &Font<'static> {
        match (&self.bold, bold) {
            (Some(bold), true) => bold,
            _ => &self.regular,
        }
    }
}

pub struct BitmapSurface {
    image: RgbaImage,
    rect: Rect,
    viewport: Size,
    pixel_ratio: Option<f64>,
    scale: f64,
    cursor: Cursor,
    fonts: Option<FontSet>,
    listeners: Vec<ListenerId>,
    next_listener: u64,
}

impl BitmapSurface {
    /// A surface laid out as `width` x `height` display units.
    pub fn new(width: u32, height: u32) -> Self {
        let (width, height) = (width as f64, height as f64);
        Self {
            image: RgbaImage::new(0, 0),
            rect: Rect::new(0.0, 0.0, width, height),
            viewport: Size::new(width, height),
            pixel_ratio: None,
            scale: 1.0,
            cursor: Cursor::Default,
            fonts: None,
            listeners: Vec::new(),
            next_listener: 0,
        }
    }

    pub fn with_device_pixel_ratio(mut self, ratio: Option<f64>) -> Self {
        self.pixel_ratio = ratio;
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

    pub fn with_fonts(mut self, fonts: FontSet) -> Self {
        self.fonts = Some(fonts);
        self
    }

    /// Change the layout box; the chart picks it up on `resize()`.
    pub fn set_layout(&mut self, width: u32, height: u32) {
        self.rect.width = width as f64;
        self.rect.height = height as f64;
    }

    pub fn image(&self) -> &RgbaImage {
        &self.image
    }

    pub fn cursor(&self) -> Cursor {
        self.cursor
    }

    pub fn save_png(&self, path: &Path) -> Result<()> {
        self.image.save_with_format(path, ImageFormat::Png)?;
        Ok(())
    }

    fn px(&self, p: Point) -> (f32, f32) {
        ((p.x * self.scale) as f32, (p.y * self.scale) as f32)
    }

    fn stroke_px(&self, width: f64) -> i32 {
        ((width * self.scale).round() as i32).max(1)
    }

    /// Line of `width` pixels made of parallel 1px lines along the segment normal.
    fn draw_thick_segment(&mut self, from: (f32, f32), to: (f32, f32), width: i32, color: Rgba<u8>) {
        if width <= 1 {
            draw_line_segment_mut(&mut self.image, from, to, color);
            return;
        }

        let (dx, dy) = (to.0 - from.0, to.1 - from.1);
        let len = (dx * dx + dy * dy).sqrt();
        if len == 0.0 {
            return;
        }
        let (nx, ny) = (-dy / len, dx / len);

        // Half-pixel steps so diagonal strokes have no gaps
        let half = (width - 1) as f32 / 2.0;
        for step in 0..(2 * width - 1) {
            let offset = step as f32 * 0.5 - half;
            draw_line_segment_mut(
                &mut self.image,
                (from.0 + nx * offset, from.1 + ny * offset),
                (to.0 + nx * offset, to.1 + ny * offset),
                color,
            );
        }
    }

    fn draw_glyphs(&mut self, text: &str, at: Point, style: TextStyle, color: Color) {
        let Some(fonts) = &self.fonts else {
            debug!(text, "no fonts loaded, skipping text");
            return;
        };
        let font = fonts.face(style.bold);
        let scale = Scale::uniform((style.size * self.scale) as f32);
        let (mut x, y) = self.px(at);

        if style.align == TextAlign::Center {
            let width = font
                .layout(text, scale, point(0.0, 0.0))
                .last()
                .map(|g| g.position().x + g.unpositioned().h_metrics().advance_width)
                .unwrap_or(0.0);
            x -= width / 2.0;
        }

        let (img_w, img_h) = self.image.dimensions();
        let rgba = color.to_rgba();
        let glyphs: Vec<_> = font.layout(text, scale, point(x, y)).collect();
        for glyph in glyphs {
            let Some(bb) = glyph.pixel_bounding_box() else {
                continue;
            };
            let image = &mut self.image;
            glyph.draw(|gx, gy, v| {
                let px = bb.min.x + gx as i32;
                let py = bb.min.y + gy as i32;
                if px < 0 || py < 0 || px as u32 >= img_w || py as u32 >= img_h {
                    return;
                }
                let alpha = (v * 255.0) as u16;
                if alpha == 0 {
                    return;
                }
                let pixel = image.get_pixel_mut(px as u32, py as u32);
                for c in 0..3 {
                    let blended = rgba[c] as u16 * alpha + pixel[c] as u16 * (255 - alpha);
                    pixel[c] = (blended / 255) as u8;
                }
                pixel[3] = pixel[3].max(alpha as u8);
            });
        }
    }
}

fn finite(p: Point) -> bool {
    p.x.is_finite() && p.y.is_finite()
}

impl Surface for BitmapSurface {
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
        self.image = ImageBuffer::from_pixel(backing_width, backing_height, Rgba([0, 0, 0, 0]));
        self.scale = scale;
    }

    fn fill_rect(&mut self, rect: Rect, color: Color) {
        let x0 = (rect.left * self.scale).floor();
        let y0 = (rect.top * self.scale).floor();
        let x1 = ((rect.left + rect.width) * self.scale).ceil();
        let y1 = ((rect.top + rect.height) * self.scale).ceil();
        if !(x1 > x0 && y1 > y0) {
            return;
        }
        draw_filled_rect_mut(
            &mut self.image,
            PixelRect::at(x0 as i32, y0 as i32).of_size((x1 - x0) as u32, (y1 - y0) as u32),
            Rgba(color.to_rgba()),
        );
    }

    fn stroke_polyline(&mut self, points: &[Point], width: f64, color: Color) {
        let stroke = self.stroke_px(width);
        let rgba = Rgba(color.to_rgba());
        for pair in points.windows(2) {
            if !finite(pair[0]) || !finite(pair[1]) {
                continue;
            }
            let (from, to) = (self.px(pair[0]), self.px(pair[1]));
            self.draw_thick_segment(from, to, stroke, rgba);
        }

        // Round joins
        if stroke > 1 && points.len() > 2 {
            for p in &points[1..points.len() - 1] {
                if finite(*p) {
                    let (x, y) = self.px(*p);
                    let center = (x.round() as i32, y.round() as i32);
                    draw_filled_circle_mut(&mut self.image, center, stroke / 2, rgba);
                }
            }
        }
    }

    fn fill_circle(&mut self, center: Point, radius: f64, color: Color) {
        if !finite(center) {
            return;
        }
        let (x, y) = self.px(center);
        let r = (radius * self.scale).round() as i32;
        let center = (x.round() as i32, y.round() as i32);
        draw_filled_circle_mut(&mut self.image, center, r, Rgba(color.to_rgba()));
    }

    fn stroke_circle(&mut self, center: Point, radius: f64, width: f64, color: Color) {
        if !finite(center) {
            return;
        }
        let (x, y) = self.px(center);
        let center = (x.round() as i32, y.round() as i32);
        let half = width * self.scale / 2.0;
        let inner = ((radius * self.scale - half).round() as i32).max(0);
        let outer = (radius * self.scale + half).round() as i32;
        for r in inner..=outer {
            draw_hollow_circle_mut(&mut self.image, center, r, Rgba(color.to_rgba()));
        }
    }

    fn fill_text(&mut self, text: &str, at: Point, style: TextStyle, color: Color) {
        if !finite(at) {
            return;
        }
        self.draw_glyphs(text, at, style, color);
    }

    fn set_cursor(&mut self, cursor: Cursor) {
        self.cursor = cursor;
    }

    fn add_pointer_listener(&mut self) -> ListenerId {
        let id = ListenerId(self.next_listener);
        self.next_listener += 1;
        self.listeners.push(id);
        debug!(listener = id.0, "pointer listener added");
        id
    }

    fn remove_pointer_listener(&mut self, id: ListenerId) {
        self.listeners.retain(|l| *l != id);
        debug!(listener = id.0, "pointer listener removed");
    }
}
