//! Render Configuration
//! Visual options fixed at chart construction.

use super::color::Color;
use serde::{Deserialize, Serialize};

pub const DEFAULT_PADDING: f64 = 40.0;
pub const DEFAULT_MAX_POINTS: usize = 50;

/// Dashboard color theme. Only changes the default grid, text and background colors.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
    #[default]
    Light,
    Dark,
}

impl Theme {
    pub fn grid_color(self) -> Color {
        match self {
            Theme::Light => Color::rgb(0xe0, 0xe0, 0xe0),
            Theme::Dark => Color::rgb(0x3a, 0x3a, 0x3a),
        }
    }

    pub fn text_color(self) -> Color {
        match self {
            Theme::Light => Color::rgb(0x33, 0x33, 0x33),
            Theme::Dark => Color::rgb(0xe0, 0xe0, 0xe0),
        }
    }

    pub fn background_color(self) -> Color {
        match self {
            Theme::Light => Color::WHITE,
            Theme::Dark => Color::rgb(0x1e, 0x1e, 0x1e),
        }
    }
}

/// Options supplied once when a chart is built.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RenderConfig {
    /// Margin around the plot area, in display units
    pub padding: f64,
    pub grid_color: Color,
    pub line_color: Color,
    pub point_color: Color,
    pub text_color: Color,
    pub background_color: Color,
    /// Round stored values and format labels as whole numbers
    pub is_integer: bool,
    pub title: Option<String>,
    /// Capacity of the sample window; 0 means the default
    pub max_points: usize,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self::themed(Theme::Light)
    }
}

impl RenderConfig {
    pub fn themed(theme: Theme) -> Self {
        Self {
            padding: DEFAULT_PADDING,
            grid_color: theme.grid_color(),
            line_color: Color::rgb(0x00, 0x7b, 0xff),
            point_color: Color::rgb(0xff, 0x6b, 0x6b),
            text_color: theme.text_color(),
            background_color: theme.background_color(),
            is_integer: false,
            title: None,
            max_points: DEFAULT_MAX_POINTS,
        }
    }

    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    pub fn with_line_color(mut self, color: Color) -> Self {
        self.line_color = color;
        self
    }

    pub fn with_point_color(mut self, color: Color) -> Self {
        self.point_color = color;
        self
    }

    pub fn with_integer_values(mut self, is_integer: bool) -> Self {
        self.is_integer = is_integer;
        self
    }

    pub fn with_max_points(mut self, max_points: usize) -> Self {
        self.max_points = max_points;
        self
    }

    pub fn with_padding(mut self, padding: f64) -> Self {
        self.padding = padding;
        self
    }

    /// Window capacity actually used by the chart.
    pub fn capacity(&self) -> usize {
        if self.max_points == 0 {
            DEFAULT_MAX_POINTS
        } else {
            self.max_points
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = RenderConfig::default();
        assert_eq!(config.padding, 40.0);
        assert_eq!(config.grid_color, "#e0e0e0".parse().unwrap());
        assert_eq!(config.line_color, "#007bff".parse().unwrap());
        assert_eq!(config.point_color, "#ff6b6b".parse().unwrap());
        assert_eq!(config.text_color, "#333".parse().unwrap());
        assert_eq!(config.background_color, "#fff".parse().unwrap());
        assert!(!config.is_integer);
        assert!(config.title.is_none());
        assert_eq!(config.capacity(), 50);
    }

    #[test]
    fn test_zero_capacity_falls_back() {
        let config = RenderConfig::default().with_max_points(0);
        assert_eq!(config.capacity(), DEFAULT_MAX_POINTS);
        assert_eq!(RenderConfig::default().with_max_points(3).capacity(), 3);
    }

    #[test]
    fn test_dark_theme_keeps_series_colors() {
        let light = RenderConfig::themed(Theme::Light);
        let dark = RenderConfig::themed(Theme::Dark);
        assert_eq!(light.line_color, dark.line_color);
        assert_ne!(light.background_color, dark.background_color);
    }
}
