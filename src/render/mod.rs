mod layer;
mod null_renderer;
mod primitives;

pub use layer::MeshLayer;
pub use null_renderer::{NullRenderer, SubmittedMesh};
pub use primitives::{Color, MeshPaint, Rgb};

use serde::{Deserialize, Serialize};

use crate::core::Mesh;
use crate::error::ChartResult;

/// Backend-owned resource created by [`Renderer::submit`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct DrawableHandle(u64);

impl DrawableHandle {
    #[must_use]
    pub const fn new(id: u64) -> Self {
        Self(id)
    }

    #[must_use]
    pub const fn id(self) -> u64 {
        self.0
    }
}

/// Capability interface implemented by any rendering backend.
///
/// The chart only hands over finished triangle meshes; backends own every
/// resource they create and must free it on [`Renderer::release`].
pub trait Renderer {
    /// Acquires (or resizes) the drawing surface in device pixels.
    ///
    /// Failing here is fatal for the chart instance.
    fn prepare(&mut self, width: u32, height: u32) -> ChartResult<()>;

    fn clear(&mut self, color: Color) -> ChartResult<()>;

    fn submit(&mut self, mesh: &Mesh, paint: MeshPaint) -> ChartResult<DrawableHandle>;

    fn draw(&mut self, handle: DrawableHandle) -> ChartResult<()>;

    fn release(&mut self, handle: DrawableHandle) -> ChartResult<()>;

    /// Called once after every layer of a pass has been drawn.
    fn present(&mut self) -> ChartResult<()> {
        Ok(())
    }
}

#[cfg(feature = "cairo-backend")]
mod cairo_backend;
#[cfg(feature = "cairo-backend")]
pub use cairo_backend::{CairoRenderStats, CairoRenderer};
