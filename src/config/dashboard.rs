//! Dashboard Configuration
//! TOML file describing chart surfaces and panels.

use super::color::Color;
use super::render::{RenderConfig, Theme};
use crate::error::Result;
use crate::host::MetricKind;
use serde::Deserialize;
use std::path::{Path, PathBuf};
use tracing::debug;

pub const DEFAULT_POLL_INTERVAL_MS: i64 = 2000;

#[derive(Debug, Deserialize, Clone, Default)]
#[serde(default)]
pub struct DashboardConfig {
    pub dashboard: DashboardSettings,
    pub panels: Vec<PanelConfig>,
}

#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct DashboardSettings {
    /// Display width of every chart surface
    pub width: u32,
    pub height: u32,
    pub device_pixel_ratio: Option<f64>,
    pub poll_interval_ms: i64,
    pub theme: Theme,
    pub font: Option<PathBuf>,
    pub bold_font: Option<PathBuf>,
}

impl Default for DashboardSettings {
    fn default() -> Self {
        Self {
            width: 400,
            height: 200,
            device_pixel_ratio: None,
            poll_interval_ms: DEFAULT_POLL_INTERVAL_MS,
            theme: Theme::default(),
            font: None,
            bold_font: None,
        }
    }
}

/// One chart on the dashboard. Unset fields come from the metric's defaults.
#[derive(Debug, Deserialize, Clone)]
pub struct PanelConfig {
    pub metric: MetricKind,
    pub title: Option<String>,
    pub line_color: Option<Color>,
    pub point_color: Option<Color>,
    pub grid_color: Option<Color>,
    pub text_color: Option<Color>,
    pub background_color: Option<Color>,
    pub is_integer: Option<bool>,
    pub max_points: Option<usize>,
    pub padding: Option<f64>,
}

impl PanelConfig {
    pub fn for_metric(metric: MetricKind) -> Self {
        Self {
            metric,
            title: None,
            line_color: None,
            point_color: None,
            grid_color: None,
            text_color: None,
            background_color: None,
            is_integer: None,
            max_points: None,
            padding: None,
        }
    }

    /// Resolve overrides on top of the metric defaults for the given theme.
    pub fn render_config(&self, theme: Theme) -> RenderConfig {
        let base = self.metric.default_render_config(theme);
        RenderConfig {
            padding: self.padding.unwrap_or(base.padding),
            grid_color: self.grid_color.unwrap_or(base.grid_color),
            line_color: self.line_color.unwrap_or(base.line_color),
            point_color: self.point_color.unwrap_or(base.point_color),
            text_color: self.text_color.unwrap_or(base.text_color),
            background_color: self.background_color.unwrap_or(base.background_color),
            is_integer: self.is_integer.unwrap_or(base.is_integer),
            title: self.title.clone().or(base.title),
            max_points: self.max_points.unwrap_or(base.max_points),
        }
    }
}

impl DashboardConfig {
    pub fn from_toml_str(text: &str) -> Result<Self> {
        Ok(toml::from_str(text)?)
    }

    /// Load a dashboard file, or the built-in dashboard when `path` is `None`.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let Some(path) = path else {
            debug!("no dashboard file given, using defaults");
            return Ok(Self::default());
        };
        let text = std::fs::read_to_string(path)?;
        let config = Self::from_toml_str(&text)?;
        debug!(path = %path.display(), panels = config.panels.len(), "loaded dashboard config");
        Ok(config)
    }

    /// Configured panels, or one default panel per metric when none are listed.
    pub fn panels(&self) -> Vec<PanelConfig> {
        if self.panels.is_empty() {
            MetricKind::ALL
                .iter()
                .copied()
                .map(PanelConfig::for_metric)
                .collect()
        } else {
            self.panels.clone()
        }
    }
}
