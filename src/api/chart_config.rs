use serde::{Deserialize, Serialize};

use crate::core::{DEFAULT_MITER_LIMIT, DEFAULT_SMOOTHING_STEPS, RawSample, Viewport};
use crate::error::{ChartError, ChartResult};
use crate::render::Rgb;

/// Device pixels per retained point when the downsample target is automatic.
pub const AUTO_DOWNSAMPLE_PX_PER_POINT: f64 = 15.0;

/// Downsampling policy.
///
/// Serialized as `true` (automatic), `false` (disabled) or an explicit
/// target point count.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(from = "DownsampleRepr", into = "DownsampleRepr")]
pub enum DownsampleMode {
    Disabled,
    /// One point per [`AUTO_DOWNSAMPLE_PX_PER_POINT`] device pixels of width.
    #[default]
    Auto,
    Target(usize),
}

impl DownsampleMode {
    /// Target output size for a surface `device_width` pixels wide.
    #[must_use]
    pub fn threshold(self, device_width: u32) -> Option<usize> {
        match self {
            Self::Disabled => None,
            Self::Auto => {
                let points = (f64::from(device_width) / AUTO_DOWNSAMPLE_PX_PER_POINT).floor();
                Some((points as usize).max(2))
            }
            Self::Target(target) => Some(target),
        }
    }
}

#[derive(Serialize, Deserialize)]
#[serde(untagged)]
enum DownsampleRepr {
    Flag(bool),
    Target(usize),
}

impl From<DownsampleRepr> for DownsampleMode {
    fn from(repr: DownsampleRepr) -> Self {
        match repr {
            DownsampleRepr::Flag(true) => Self::Auto,
            DownsampleRepr::Flag(false) => Self::Disabled,
            DownsampleRepr::Target(target) => Self::Target(target),
        }
    }
}

impl From<DownsampleMode> for DownsampleRepr {
    fn from(mode: DownsampleMode) -> Self {
        match mode {
            DownsampleMode::Auto => Self::Flag(true),
            DownsampleMode::Disabled => Self::Flag(false),
            DownsampleMode::Target(target) => Self::Target(target),
        }
    }
}

/// Public chart bootstrap configuration.
///
/// This type is serializable so hosts can load chart setup from JSON; hover
/// and leave handlers are registered on the chart itself.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChartConfig {
    /// Layout box of the drawing surface in logical pixels.
    pub viewport: Viewport,
    pub data: Vec<RawSample>,
    #[serde(default = "default_pixel_ratio")]
    pub pixel_ratio: f64,
    #[serde(default)]
    pub downsample: DownsampleMode,
    #[serde(default)]
    pub smoothing: bool,
    #[serde(default = "default_smoothing_steps")]
    pub smoothing_steps: usize,
    #[serde(default = "default_line_color")]
    pub color: Rgb,
    #[serde(default = "default_background_color")]
    pub background_color: Rgb,
    #[serde(default = "default_fill_color")]
    pub fill_color: Rgb,
    #[serde(default = "default_marker_color")]
    pub marker_color: Rgb,
    /// Per-side offset of the stroke in device pixels.
    #[serde(default = "default_thickness")]
    pub thickness: f64,
    /// `None` disables the miter clamp.
    #[serde(default = "default_miter_limit")]
    pub miter_limit: Option<f64>,
    #[serde(default)]
    pub interactive: bool,
    #[serde(default)]
    pub padding_x: f64,
    #[serde(default)]
    pub padding_y: f64,
    #[serde(default)]
    pub show_markers: bool,
    #[serde(default = "default_marker_size")]
    pub marker_size: f64,
    #[serde(default = "default_hover_line_width")]
    pub hover_line_width: f64,
}

impl ChartConfig {
    #[must_use]
    pub fn new(viewport: Viewport, data: Vec<RawSample>) -> Self {
        Self {
            viewport,
            data,
            pixel_ratio: default_pixel_ratio(),
            downsample: DownsampleMode::default(),
            smoothing: false,
            smoothing_steps: default_smoothing_steps(),
            color: default_line_color(),
            background_color: default_background_color(),
            fill_color: default_fill_color(),
            marker_color: default_marker_color(),
            thickness: default_thickness(),
            miter_limit: default_miter_limit(),
            interactive: false,
            padding_x: 0.0,
            padding_y: 0.0,
            show_markers: false,
            marker_size: default_marker_size(),
            hover_line_width: default_hover_line_width(),
        }
    }

    /// Config over bare y values.
    #[must_use]
    pub fn from_values(viewport: Viewport, values: &[f64]) -> Self {
        Self::new(viewport, values.iter().copied().map(RawSample::from).collect())
    }

    /// Config over explicit `(x, y)` pairs.
    #[must_use]
    pub fn from_pairs(viewport: Viewport, pairs: &[(f64, f64)]) -> Self {
        Self::new(viewport, pairs.iter().copied().map(RawSample::from).collect())
    }

    #[must_use]
    pub fn with_pixel_ratio(mut self, pixel_ratio: f64) -> Self {
        self.pixel_ratio = pixel_ratio;
        self
    }

    #[must_use]
    pub fn with_downsample(mut self, mode: DownsampleMode) -> Self {
        self.downsample = mode;
        self
    }

    #[must_use]
    pub fn with_smoothing(mut self, enabled: bool) -> Self {
        self.smoothing = enabled;
        self
    }

    #[must_use]
    pub fn with_smoothing_steps(mut self, steps: usize) -> Self {
        self.smoothing_steps = steps;
        self
    }

    #[must_use]
    pub fn with_colors(mut self, line: Rgb, background: Rgb) -> Self {
        self.color = line;
        self.background_color = background;
        self
    }

    #[must_use]
    pub fn with_thickness(mut self, thickness: f64) -> Self {
        self.thickness = thickness;
        self
    }

    #[must_use]
    pub fn with_miter_limit(mut self, limit: Option<f64>) -> Self {
        self.miter_limit = limit;
        self
    }

    #[must_use]
    pub fn with_interactive(mut self, interactive: bool) -> Self {
        self.interactive = interactive;
        self
    }

    #[must_use]
    pub fn with_padding(mut self, padding_x: f64, padding_y: f64) -> Self {
        self.padding_x = padding_x;
        self.padding_y = padding_y;
        self
    }

    #[must_use]
    pub fn with_markers(mut self, show: bool) -> Self {
        self.show_markers = show;
        self
    }

    /// Device surface size after applying the pixel ratio.
    #[must_use]
    pub fn device_size(&self) -> (u32, u32) {
        self.viewport.device_size(self.pixel_ratio)
    }

    pub fn validate(&self) -> ChartResult<()> {
        if !self.viewport.is_valid() {
            return Err(ChartError::InvalidViewport {
                width: self.viewport.width,
                height: self.viewport.height,
            });
        }
        ensure_positive("pixel ratio", self.pixel_ratio)?;
        ensure_positive("line thickness", self.thickness)?;
        ensure_positive("marker size", self.marker_size)?;
        ensure_positive("hover line width", self.hover_line_width)?;
        if let Some(limit) = self.miter_limit {
            if !limit.is_finite() || limit < 1.0 {
                return Err(ChartError::InvalidData(
                    "miter limit must be finite and >= 1".to_owned(),
                ));
            }
        }

        let (width, height) = self.device_size();
        for (name, padding, extent) in [
            ("padding_x", self.padding_x, width),
            ("padding_y", self.padding_y, height),
        ] {
            if !padding.is_finite() || padding < 0.0 || padding * 2.0 >= f64::from(extent) {
                return Err(ChartError::InvalidData(format!(
                    "{name} must be finite, >= 0 and leave a non-empty plot area"
                )));
            }
        }
        Ok(())
    }

    pub fn from_json_str(input: &str) -> ChartResult<Self> {
        serde_json::from_str(input)
            .map_err(|e| ChartError::InvalidData(format!("failed to parse chart config json: {e}")))
    }

    pub fn to_json_pretty(&self) -> ChartResult<String> {
        serde_json::to_string_pretty(self).map_err(|e| {
            ChartError::InvalidData(format!("failed to serialize chart config json: {e}"))
        })
    }
}

fn ensure_positive(name: &str, value: f64) -> ChartResult<()> {
    if !value.is_finite() || value <= 0.0 {
        return Err(ChartError::InvalidData(format!(
            "{name} must be finite and > 0"
        )));
    }
    Ok(())
}

fn default_pixel_ratio() -> f64 {
    2.0
}

fn default_smoothing_steps() -> usize {
    DEFAULT_SMOOTHING_STEPS
}

fn default_line_color() -> Rgb {
    Rgb::from_hex(0xdf0054)
}

fn default_background_color() -> Rgb {
    Rgb::from_hex(0xffffff)
}

fn default_fill_color() -> Rgb {
    Rgb::from_hex(0xffece2)
}

fn default_marker_color() -> Rgb {
    Rgb::from_hex(0x480032)
}

fn default_thickness() -> f64 {
    2.0
}

fn default_miter_limit() -> Option<f64> {
    Some(DEFAULT_MITER_LIMIT)
}

fn default_marker_size() -> f64 {
    6.0
}

fn default_hover_line_width() -> f64 {
    2.0
}
