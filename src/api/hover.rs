use tracing::trace;

use crate::core::{Hit, Vertex, build_hover_mesh, nearest};
use crate::error::ChartResult;
use crate::interaction::{HoverState, HoverValue};
use crate::render::{MeshLayer, MeshPaint, Renderer};

use super::LineChart;

impl<R: Renderer> LineChart<R> {
    /// Handles a pointer move at layout coordinates `(x, y)`.
    ///
    /// Finds the nearest reduced sample, replaces the hover indicator, redraws
    /// and invokes the hover callback. A pointer outside the data range clears
    /// the indicator without calling the leave callback. Non-interactive
    /// charts ignore pointer input entirely.
    pub fn pointer_move(&mut self, x: f64, y: f64) -> ChartResult<Option<Hit>> {
        if !self.config.interactive {
            return Ok(None);
        }

        let device_x = x * self.config.pixel_ratio;
        let hit = self.geometry.as_ref().and_then(|geometry| {
            nearest(&geometry.reduced, geometry.scale_x, device_x)
                .map(|hit| (hit, geometry.scale_y.forward(hit.sample.y)))
        });

        let Some((hit, indicator_y)) = hit else {
            trace!(x, device_x, "pointer outside data range");
            let previous = self.interaction.on_pointer_move(x, y, HoverState::None);
            if self.release_layer(MeshLayer::Hover)? || previous.is_active() {
                self.draw()?;
            }
            return Ok(None);
        };

        let (_, height) = self.device_size();
        let mesh = build_hover_mesh(
            Vertex::new(hit.indicator_x, indicator_y),
            f64::from(height),
            self.config.hover_line_width,
            self.config.marker_size * 2.0,
        )?;
        self.release_layer(MeshLayer::Hover)?;
        let handle = self
            .renderer
            .submit(&mesh, MeshPaint::Solid(self.config.color.to_color()))?;
        self.drawables.insert(MeshLayer::Hover, handle);
        self.interaction.on_pointer_move(
            x,
            y,
            HoverState::Active {
                index: hit.index,
                device_x: hit.indicator_x,
            },
        );
        trace!(index = hit.index, device_x = hit.indicator_x, "hover moved");
        self.draw()?;

        let value = HoverValue::from_sample(hit.sample, self.kind);
        if let Some(handler) = self.on_hover.as_mut() {
            handler(value);
        }
        Ok(Some(hit))
    }

    /// Handles the pointer leaving the surface.
    pub fn pointer_leave(&mut self) -> ChartResult<()> {
        if !self.config.interactive {
            return Ok(());
        }

        self.interaction.on_pointer_leave();
        self.release_layer(MeshLayer::Hover)?;
        self.draw()?;
        if let Some(handler) = self.on_leave.as_mut() {
            handler();
        }
        Ok(())
    }
}
