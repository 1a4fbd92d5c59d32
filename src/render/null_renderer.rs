use indexmap::IndexMap;

use crate::core::Mesh;
use crate::error::{ChartError, ChartResult};
use crate::render::{Color, DrawableHandle, MeshPaint, Renderer};

/// Mesh summary kept for every live handle.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SubmittedMesh {
    pub triangle_count: usize,
    pub vertex_count: usize,
    pub paint: MeshPaint,
}

/// Headless renderer used by tests and non-graphical hosts.
///
/// It still validates every submitted mesh and tracks live handles, so tests
/// can catch invalid geometry and leaked resources without a real backend.
#[derive(Debug, Default)]
pub struct NullRenderer {
    pub surface_size: Option<(u32, u32)>,
    pub last_clear_color: Option<Color>,
    pub drawn_since_clear: Vec<DrawableHandle>,
    pub submit_count: usize,
    pub release_count: usize,
    pub present_count: usize,
    unavailable: bool,
    next_handle: u64,
    live: IndexMap<DrawableHandle, SubmittedMesh>,
}

impl NullRenderer {
    /// A renderer whose surface can never be acquired.
    #[must_use]
    pub fn unavailable() -> Self {
        Self {
            unavailable: true,
            ..Self::default()
        }
    }

    #[must_use]
    pub fn live_handles(&self) -> Vec<DrawableHandle> {
        self.live.keys().copied().collect()
    }

    #[must_use]
    pub fn mesh(&self, handle: DrawableHandle) -> Option<SubmittedMesh> {
        self.live.get(&handle).copied()
    }

    /// Triangles drawn since the last clear.
    #[must_use]
    pub fn drawn_triangle_count(&self) -> usize {
        self.drawn_since_clear
            .iter()
            .filter_map(|handle| self.live.get(handle))
            .map(|mesh| mesh.triangle_count)
            .sum()
    }

    fn ensure_live(&self, handle: DrawableHandle) -> ChartResult<()> {
        if self.live.contains_key(&handle) {
            Ok(())
        } else {
            Err(ChartError::Backend(format!(
                "unknown drawable handle {}",
                handle.id()
            )))
        }
    }
}

impl Renderer for NullRenderer {
    fn prepare(&mut self, width: u32, height: u32) -> ChartResult<()> {
        if self.unavailable {
            return Err(ChartError::BackendUnavailable(
                "null renderer configured as unavailable".to_owned(),
            ));
        }
        self.surface_size = Some((width, height));
        Ok(())
    }

    fn clear(&mut self, color: Color) -> ChartResult<()> {
        color.validate()?;
        self.last_clear_color = Some(color);
        self.drawn_since_clear.clear();
        Ok(())
    }

    fn submit(&mut self, mesh: &Mesh, paint: MeshPaint) -> ChartResult<DrawableHandle> {
        mesh.validate()?;
        paint.validate()?;
        let handle = DrawableHandle::new(self.next_handle);
        self.next_handle += 1;
        self.live.insert(
            handle,
            SubmittedMesh {
                triangle_count: mesh.triangle_count(),
                vertex_count: mesh.vertices.len(),
                paint,
            },
        );
        self.submit_count += 1;
        Ok(handle)
    }

    fn draw(&mut self, handle: DrawableHandle) -> ChartResult<()> {
        self.ensure_live(handle)?;
        self.drawn_since_clear.push(handle);
        Ok(())
    }

    fn release(&mut self, handle: DrawableHandle) -> ChartResult<()> {
        self.ensure_live(handle)?;
        self.live.shift_remove(&handle);
        self.release_count += 1;
        Ok(())
    }

    fn present(&mut self) -> ChartResult<()> {
        self.present_count += 1;
        Ok(())
    }
}
