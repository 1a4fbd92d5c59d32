use std::fs::File;
use std::path::Path;

use cairo::{Context, Format, ImageSurface, LinearGradient};
use indexmap::IndexMap;

use crate::core::Mesh;
use crate::error::{ChartError, ChartResult};
use crate::render::{Color, DrawableHandle, MeshPaint, Renderer};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct CairoRenderStats {
    pub meshes_drawn: usize,
    pub triangles_drawn: usize,
}

/// Cairo image-surface renderer.
///
/// Submitted meshes are retained on the CPU side and rasterized triangle by
/// triangle on every draw.
#[derive(Debug, Default)]
pub struct CairoRenderer {
    surface: Option<ImageSurface>,
    meshes: IndexMap<DrawableHandle, (Mesh, MeshPaint)>,
    next_handle: u64,
    last_stats: CairoRenderStats,
}

impl CairoRenderer {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn backend_name(&self) -> &'static str {
        "cairo"
    }

    #[must_use]
    pub fn surface(&self) -> Option<&ImageSurface> {
        self.surface.as_ref()
    }

    #[must_use]
    pub fn last_stats(&self) -> CairoRenderStats {
        self.last_stats
    }

    pub fn write_png(&self, path: impl AsRef<Path>) -> ChartResult<()> {
        let surface = self.prepared_surface()?;
        let mut file = File::create(path.as_ref())
            .map_err(|err| ChartError::Backend(format!("failed to create png file: {err}")))?;
        surface
            .write_to_png(&mut file)
            .map_err(|err| ChartError::Backend(format!("failed to write png: {err}")))
    }

    fn prepared_surface(&self) -> ChartResult<&ImageSurface> {
        self.surface.as_ref().ok_or_else(|| {
            ChartError::BackendUnavailable("cairo surface has not been prepared".to_owned())
        })
    }

    fn context(&self) -> ChartResult<Context> {
        Context::new(self.prepared_surface()?)
            .map_err(|err| map_backend_error("failed to create cairo context", err))
    }
}

impl Renderer for CairoRenderer {
    fn prepare(&mut self, width: u32, height: u32) -> ChartResult<()> {
        let (width, height) = match (i32::try_from(width), i32::try_from(height)) {
            (Ok(w), Ok(h)) if w > 0 && h > 0 => (w, h),
            _ => return Err(ChartError::InvalidViewport { width, height }),
        };
        let surface = ImageSurface::create(Format::ARgb32, width, height).map_err(|err| {
            ChartError::BackendUnavailable(format!("failed to create cairo surface: {err}"))
        })?;
        self.surface = Some(surface);
        Ok(())
    }

    fn clear(&mut self, color: Color) -> ChartResult<()> {
        color.validate()?;
        let context = self.context()?;
        apply_color(&context, color);
        context
            .paint()
            .map_err(|err| map_backend_error("failed to clear surface", err))?;
        self.last_stats = CairoRenderStats::default();
        Ok(())
    }

    fn submit(&mut self, mesh: &Mesh, paint: MeshPaint) -> ChartResult<DrawableHandle> {
        mesh.validate()?;
        paint.validate()?;
        let handle = DrawableHandle::new(self.next_handle);
        self.next_handle += 1;
        self.meshes.insert(handle, (mesh.clone(), paint));
        Ok(handle)
    }

    fn draw(&mut self, handle: DrawableHandle) -> ChartResult<()> {
        let context = self.context()?;
        let (mesh, paint) = self.meshes.get(&handle).ok_or_else(|| {
            ChartError::Backend(format!("unknown drawable handle {}", handle.id()))
        })?;

        apply_paint(&context, mesh, *paint)?;
        for triangle in mesh.indices.chunks_exact(3) {
            let a = mesh.vertices[triangle[0] as usize];
            let b = mesh.vertices[triangle[1] as usize];
            let c = mesh.vertices[triangle[2] as usize];
            context.move_to(a.x, a.y);
            context.line_to(b.x, b.y);
            context.line_to(c.x, c.y);
            context.close_path();
        }
        context
            .fill()
            .map_err(|err| map_backend_error("failed to fill mesh", err))?;

        self.last_stats.meshes_drawn += 1;
        self.last_stats.triangles_drawn += mesh.triangle_count();
        Ok(())
    }

    fn release(&mut self, handle: DrawableHandle) -> ChartResult<()> {
        self.meshes
            .shift_remove(&handle)
            .map(|_| ())
            .ok_or_else(|| ChartError::Backend(format!("unknown drawable handle {}", handle.id())))
    }

    fn present(&mut self) -> ChartResult<()> {
        self.prepared_surface()?.flush();
        Ok(())
    }
}

fn apply_color(context: &Context, color: Color) {
    context.set_source_rgba(color.red, color.green, color.blue, color.alpha);
}

fn apply_paint(context: &Context, mesh: &Mesh, paint: MeshPaint) -> ChartResult<()> {
    match paint {
        MeshPaint::Solid(color) => apply_color(context, color),
        MeshPaint::VerticalGradient { top, bottom } => {
            let Some((min_y, max_y)) = mesh.y_extent() else {
                apply_color(context, top);
                return Ok(());
            };
            let gradient = LinearGradient::new(0.0, min_y, 0.0, max_y);
            gradient.add_color_stop_rgba(0.0, top.red, top.green, top.blue, top.alpha);
            gradient.add_color_stop_rgba(1.0, bottom.red, bottom.green, bottom.blue, bottom.alpha);
            context
                .set_source(&gradient)
                .map_err(|err| map_backend_error("failed to set gradient source", err))?;
        }
    }
    Ok(())
}

fn map_backend_error(prefix: &str, err: cairo::Error) -> ChartError {
    ChartError::Backend(format!("{prefix}: {err}"))
}
