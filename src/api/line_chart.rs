use indexmap::IndexMap;
use tracing::{debug, warn};

use crate::core::{LinearScale, RawSample, Sample, SampleKind, Viewport, normalize_samples};
use crate::error::{ChartError, ChartResult};
use crate::interaction::{HoverState, HoverValue, InteractionState};
use crate::render::{DrawableHandle, MeshLayer, MeshPaint, Renderer};

use super::{ChartConfig, ChartGeometry, build_geometry};

pub type HoverHandler = Box<dyn FnMut(HoverValue)>;
pub type LeaveHandler = Box<dyn FnMut()>;

/// Single-series thick-line chart bound to one rendering backend.
///
/// The chart owns its scales, meshes and every backend handle it creates.
/// Geometry is rebuilt wholesale on data or size changes; pointer moves only
/// replace the hover indicator.
pub struct LineChart<R: Renderer> {
    pub(super) renderer: R,
    pub(super) config: ChartConfig,
    samples: Vec<Sample>,
    pub(super) kind: SampleKind,
    pub(super) geometry: Option<ChartGeometry>,
    pub(super) drawables: IndexMap<MeshLayer, DrawableHandle>,
    pub(super) interaction: InteractionState,
    pub(super) on_hover: Option<HoverHandler>,
    pub(super) on_leave: Option<LeaveHandler>,
}

impl<R: Renderer> LineChart<R> {
    /// Validates the config, acquires the drawing surface and draws once.
    ///
    /// Series shorter than two samples are accepted; nothing but the
    /// background is drawn for them.
    pub fn new(mut renderer: R, config: ChartConfig) -> ChartResult<Self> {
        config.validate()?;
        let (samples, kind) = normalize_samples(&config.data)?;
        let geometry = build_geometry(&samples, &config)?;
        let (width, height) = config.device_size();
        renderer.prepare(width, height).map_err(into_backend_unavailable)?;

        let mut chart = Self {
            renderer,
            config,
            samples,
            kind,
            geometry: None,
            drawables: IndexMap::new(),
            interaction: InteractionState::default(),
            on_hover: None,
            on_leave: None,
        };
        chart.install(geometry)?;
        Ok(chart)
    }

    /// Registers the hover callback. Only invoked for interactive charts.
    pub fn on_hover(&mut self, handler: impl FnMut(HoverValue) + 'static) {
        self.on_hover = Some(Box::new(handler));
    }

    /// Registers the leave callback. Only invoked for interactive charts.
    pub fn on_leave(&mut self, handler: impl FnMut() + 'static) {
        self.on_leave = Some(Box::new(handler));
    }

    /// Replaces the series and redraws.
    ///
    /// On error the previous series, geometry and drawables stay in place.
    pub fn set_data(&mut self, data: Vec<RawSample>) -> ChartResult<()> {
        let (samples, kind) = normalize_samples(&data)?;
        let geometry = build_geometry(&samples, &self.config)?;
        debug!(count = samples.len(), ?kind, "set chart data");
        self.config.data = data;
        self.samples = samples;
        self.kind = kind;
        self.install(geometry)
    }

    /// Re-acquires the surface for a new layout box and redraws.
    ///
    /// On error the previous viewport and geometry stay in place.
    pub fn resize(&mut self, viewport: Viewport) -> ChartResult<()> {
        let mut config = self.config.clone();
        config.viewport = viewport;
        config.validate()?;
        let geometry = build_geometry(&self.samples, &config)?;
        let (width, height) = config.device_size();
        self.renderer
            .prepare(width, height)
            .map_err(into_backend_unavailable)?;
        self.config = config;
        self.install(geometry)
    }

    /// Clears to the background and draws every live layer back to front.
    pub fn draw(&mut self) -> ChartResult<()> {
        self.renderer.clear(self.config.background_color.to_color())?;
        for layer in MeshLayer::DRAW_ORDER {
            if let Some(handle) = self.drawables.get(&layer).copied() {
                self.renderer.draw(handle)?;
            }
        }
        self.renderer.present()
    }

    #[must_use]
    pub fn config(&self) -> &ChartConfig {
        &self.config
    }

    #[must_use]
    pub fn samples(&self) -> &[Sample] {
        &self.samples
    }

    #[must_use]
    pub fn sample_kind(&self) -> SampleKind {
        self.kind
    }

    /// Geometry of the current pass; `None` for degenerate series.
    #[must_use]
    pub fn geometry(&self) -> Option<&ChartGeometry> {
        self.geometry.as_ref()
    }

    #[must_use]
    pub fn hover_state(&self) -> HoverState {
        self.interaction.hover()
    }

    #[must_use]
    pub fn renderer(&self) -> &R {
        &self.renderer
    }

    #[must_use]
    pub fn device_size(&self) -> (u32, u32) {
        self.config.device_size()
    }

    pub fn map_x_to_pixel(&self, x: f64) -> ChartResult<f64> {
        Ok(self.x_scale()?.forward(x))
    }

    pub fn map_pixel_to_x(&self, pixel: f64) -> ChartResult<f64> {
        Ok(self.x_scale()?.inverse(pixel))
    }

    pub fn map_y_to_pixel(&self, y: f64) -> ChartResult<f64> {
        Ok(self.y_scale()?.forward(y))
    }

    pub fn map_pixel_to_y(&self, pixel: f64) -> ChartResult<f64> {
        Ok(self.y_scale()?.inverse(pixel))
    }

    fn x_scale(&self) -> ChartResult<LinearScale> {
        self.geometry
            .as_ref()
            .map(|geometry| geometry.scale_x)
            .ok_or_else(no_geometry)
    }

    fn y_scale(&self) -> ChartResult<LinearScale> {
        self.geometry
            .as_ref()
            .map(|geometry| geometry.scale_y)
            .ok_or_else(no_geometry)
    }

    /// Swaps in freshly built geometry: releases every backend handle,
    /// submits the new layers and redraws.
    fn install(&mut self, geometry: Option<ChartGeometry>) -> ChartResult<()> {
        self.release_all()?;
        self.interaction.reset_hover();
        self.geometry = geometry;

        if let Some(geometry) = self.geometry.as_ref() {
            let fill_paint = MeshPaint::VerticalGradient {
                top: self.config.fill_color.to_color(),
                bottom: self.config.background_color.to_color(),
            };
            let stroke_paint = MeshPaint::Solid(self.config.color.to_color());

            let fill = self.renderer.submit(&geometry.meshes.fill, fill_paint)?;
            self.drawables.insert(MeshLayer::Fill, fill);
            let stroke = self.renderer.submit(&geometry.meshes.stroke, stroke_paint)?;
            self.drawables.insert(MeshLayer::Stroke, stroke);
            if let Some(markers) = geometry.markers.as_ref() {
                let paint = MeshPaint::Solid(self.config.marker_color.to_color());
                let handle = self.renderer.submit(markers, paint)?;
                self.drawables.insert(MeshLayer::Markers, handle);
            }
        }

        self.draw()
    }

    pub(super) fn release_layer(&mut self, layer: MeshLayer) -> ChartResult<bool> {
        match self.drawables.shift_remove(&layer) {
            Some(handle) => {
                self.renderer.release(handle)?;
                Ok(true)
            }
            None => Ok(false),
        }
    }

    fn release_all(&mut self) -> ChartResult<()> {
        for (_, handle) in self.drawables.drain(..) {
            self.renderer.release(handle)?;
        }
        Ok(())
    }
}

impl<R: Renderer> Drop for LineChart<R> {
    fn drop(&mut self) {
        if let Err(err) = self.release_all() {
            warn!(error = %err, "failed to release chart drawables");
        }
    }
}

fn no_geometry() -> ChartError {
    ChartError::InvalidData("chart has fewer than two samples".to_owned())
}

fn into_backend_unavailable(err: ChartError) -> ChartError {
    match err {
        ChartError::BackendUnavailable(_) => err,
        other => ChartError::BackendUnavailable(other.to_string()),
    }
}
