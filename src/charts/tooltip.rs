//! Tooltip overlay state for a chart.
//!
//! The overlay lives in viewport coordinates. Its box size is estimated from
//! the text it holds (13px font, 14/10px padding).

use crate::surface::{Point, Size};

/// Distance from the pointer to the overlay's top-left corner.
pub const POINTER_OFFSET: Point = Point::new(15.0, -10.0);
/// Minimum gap between the overlay and any viewport edge.
pub const EDGE_MARGIN: f64 = 10.0;

const CHAR_WIDTH: f64 = 7.0;
const LINE_HEIGHT: f64 = 18.0;
const TITLE_GAP: f64 = 4.0;
const PADDING_X: f64 = 14.0;
const PADDING_Y: f64 = 10.0;
const BORDER: f64 = 1.0;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TooltipContent {
    pub title: String,
    pub value: String,
    pub time: String,
}

impl TooltipContent {
    pub fn lines(&self) -> [String; 3] {
        [
            self.title.clone(),
            format!("Value: {}", self.value),
            format!("Time: {}", self.time),
        ]
    }

    pub fn estimated_size(&self) -> Size {
        let widest = self
            .lines()
            .iter()
            .map(|line| line.chars().count())
            .max()
            .unwrap_or(0);
        Size::new(
            widest as f64 * CHAR_WIDTH + 2.0 * (PADDING_X + BORDER),
            3.0 * LINE_HEIGHT + TITLE_GAP + 2.0 * (PADDING_Y + BORDER),
        )
    }
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct Tooltip {
    visible: bool,
    content: Option<TooltipContent>,
    position: Point,
}

impl Tooltip {
    pub fn new() -> Self {
        Self::default()
    }

    /// Update content and place the overlay near `pointer` (viewport
    /// coordinates), kept inside `viewport`.
    pub fn show(&mut self, content: TooltipContent, pointer: Point, viewport: Size) {
        let size = content.estimated_size();
        let anchor = Point::new(pointer.x + POINTER_OFFSET.x, pointer.y + POINTER_OFFSET.y);
        let max_left = viewport.width - size.width - EDGE_MARGIN;
        let max_top = viewport.height - size.height - EDGE_MARGIN;

        self.position = Point::new(
            anchor.x.min(max_left).max(EDGE_MARGIN),
            anchor.y.min(max_top).max(EDGE_MARGIN),
        );
        self.content = Some(content);
        self.visible = true;
    }

    pub fn hide(&mut self) {
        self.visible = false;
    }

    pub fn is_visible(&self) -> bool {
        self.visible
    }

    pub fn content(&self) -> Option<&TooltipContent> {
        self.content.as_ref()
    }

    /// Top-left corner in viewport coordinates.
    pub fn position(&self) -> Point {
        self.position
    }

    pub fn size(&self) -> Size {
        self.content
            .as_ref()
            .map(TooltipContent::estimated_size)
            .unwrap_or_default()
    }
}
