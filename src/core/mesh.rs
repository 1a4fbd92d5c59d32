use serde::{Deserialize, Serialize};
use tracing::trace;

use crate::core::{LinearScale, Sample};
use crate::error::{ChartError, ChartResult};

/// Default miter length cap, in multiples of the line thickness.
pub const DEFAULT_MITER_LIMIT: f64 = 4.0;

/// Tangent sums shorter than this are treated as a full reversal.
const REVERSAL_EPSILON: f64 = 1e-9;

/// Vertex in device-pixel space (y grows downwards).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Vertex {
    pub x: f64,
    pub y: f64,
}

impl Vertex {
    #[must_use]
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    fn offset(self, direction: (f64, f64), length: f64) -> Self {
        Self::new(self.x + direction.0 * length, self.y + direction.1 * length)
    }
}

/// Indexed triangle list.
///
/// Every quad is emitted as `(b, a, c), (b, c, d)` so winding is consistent
/// across stroke, fill, marker and hover meshes.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Mesh {
    pub vertices: Vec<Vertex>,
    pub indices: Vec<u32>,
}

impl Mesh {
    #[must_use]
    pub fn with_capacity(vertices: usize, indices: usize) -> Self {
        Self {
            vertices: Vec::with_capacity(vertices),
            indices: Vec::with_capacity(indices),
        }
    }

    #[must_use]
    pub fn triangle_count(&self) -> usize {
        self.indices.len() / 3
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.indices.is_empty()
    }

    pub fn validate(&self) -> ChartResult<()> {
        if self.indices.len() % 3 != 0 {
            return Err(ChartError::InvalidData(
                "mesh index count must be a multiple of 3".to_owned(),
            ));
        }
        if let Some(index) = self
            .indices
            .iter()
            .find(|index| **index as usize >= self.vertices.len())
        {
            return Err(ChartError::InvalidData(format!(
                "mesh index {index} is out of bounds for {} vertices",
                self.vertices.len()
            )));
        }
        if self
            .vertices
            .iter()
            .any(|vertex| !vertex.x.is_finite() || !vertex.y.is_finite())
        {
            return Err(ChartError::InvalidData(
                "mesh vertices must be finite".to_owned(),
            ));
        }
        Ok(())
    }

    /// Vertical extent of the mesh as `(min_y, max_y)`.
    #[must_use]
    pub fn y_extent(&self) -> Option<(f64, f64)> {
        let first = self.vertices.first()?;
        Some(
            self.vertices
                .iter()
                .fold((first.y, first.y), |(lo, hi), v| (lo.min(v.y), hi.max(v.y))),
        )
    }

    /// Interleaved `x, y` positions for GPU vertex buffers.
    #[must_use]
    pub fn positions_f32(&self) -> Vec<f32> {
        self.vertices
            .iter()
            .flat_map(|vertex| [vertex.x as f32, vertex.y as f32])
            .collect()
    }

    /// Indices narrowed to `u16`, failing when the mesh is too large.
    pub fn indices_u16(&self) -> ChartResult<Vec<u16>> {
        self.indices
            .iter()
            .map(|index| {
                u16::try_from(*index).map_err(|_| {
                    ChartError::InvalidData(format!("mesh index {index} does not fit in u16"))
                })
            })
            .collect()
    }

    /// Appends a quad whose corners pair up as `(a, b)` then `(c, d)`.
    pub(crate) fn push_quad(
        &mut self,
        a: Vertex,
        b: Vertex,
        c: Vertex,
        d: Vertex,
    ) -> ChartResult<()> {
        let base = vertex_index(self.vertices.len())?;
        vertex_index(self.vertices.len() + 3)?;
        self.vertices.extend([a, b, c, d]);
        self.indices
            .extend([base + 1, base, base + 2, base + 1, base + 2, base + 3]);
        Ok(())
    }
}

/// Converts a vertex position into a `u32` mesh index.
fn vertex_index(position: usize) -> ChartResult<u32> {
    u32::try_from(position).map_err(|_| {
        ChartError::InvalidData(format!("mesh vertex {position} does not fit in a u32 index"))
    })
}

/// How interior miter joins are bounded.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum MiterPolicy {
    /// Caps the miter length at `limit * thickness`.
    Clamp { limit: f64 },
    /// Unbounded miters; sharp reversals produce long spikes.
    Unclamped,
}

impl Default for MiterPolicy {
    fn default() -> Self {
        Self::Clamp {
            limit: DEFAULT_MITER_LIMIT,
        }
    }
}

impl MiterPolicy {
    #[must_use]
    pub fn from_limit(limit: Option<f64>) -> Self {
        match limit {
            Some(limit) => Self::Clamp { limit },
            None => Self::Unclamped,
        }
    }
}

/// Stroke and fill meshes built from one polyline.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LineMeshes {
    pub stroke: Mesh,
    pub fill: Mesh,
}

/// Maps samples into device space.
#[must_use]
pub fn project_samples(samples: &[Sample], x: LinearScale, y: LinearScale) -> Vec<Vertex> {
    #[cfg(feature = "parallel-projection")]
    {
        use rayon::prelude::*;

        samples
            .par_iter()
            .map(|sample| Vertex::new(x.forward(sample.x), y.forward(sample.y)))
            .collect()
    }

    #[cfg(not(feature = "parallel-projection"))]
    {
        samples
            .iter()
            .map(|sample| Vertex::new(x.forward(sample.x), y.forward(sample.y)))
            .collect()
    }
}

/// Builds the miter-joined stroke strip and the fill-to-baseline mesh.
///
/// Each point is offset by `±thickness` along its join normal, so the stroke
/// is `2 * thickness` wide. The stroke has exactly `2 * (n - 1)` triangles.
/// Returns `Ok(None)` for fewer than two points.
pub fn build_line_meshes(
    points: &[Vertex],
    thickness: f64,
    baseline_y: f64,
    miter: MiterPolicy,
) -> ChartResult<Option<LineMeshes>> {
    if !thickness.is_finite() || thickness <= 0.0 {
        return Err(ChartError::InvalidData(
            "line thickness must be finite and > 0".to_owned(),
        ));
    }
    if let MiterPolicy::Clamp { limit } = miter {
        if !limit.is_finite() || limit < 1.0 {
            return Err(ChartError::InvalidData(
                "miter limit must be finite and >= 1".to_owned(),
            ));
        }
    }
    if points.len() < 2 {
        return Ok(None);
    }

    let offsets = join_offsets(points, thickness, miter);
    let fill_edge: Vec<(Vertex, Vertex)> = offsets
        .iter()
        .map(|(plus, minus)| {
            let top = upper(*plus, *minus);
            (top, Vertex::new(top.x, baseline_y))
        })
        .collect();

    let stroke = strip_mesh(&offsets)?;
    let fill = strip_mesh(&fill_edge)?;

    Ok(Some(LineMeshes { stroke, fill }))
}

/// Shared-vertex strip: pair `i` occupies vertices `2i` and `2i + 1`.
fn strip_mesh(pairs: &[(Vertex, Vertex)]) -> ChartResult<Mesh> {
    let quad_count = pairs.len().saturating_sub(1);
    vertex_index(pairs.len() * 2)?;
    let mut mesh = Mesh::with_capacity(pairs.len() * 2, quad_count * 6);
    for (a, b) in pairs {
        mesh.vertices.push(*a);
        mesh.vertices.push(*b);
    }
    for quad in 0..vertex_index(quad_count)? {
        let (a, b, c, d) = (2 * quad, 2 * quad + 1, 2 * quad + 2, 2 * quad + 3);
        mesh.indices.extend([b, a, c, b, c, d]);
    }
    Ok(mesh)
}

/// Square marker centered on every point, two triangles each.
pub fn build_marker_mesh(points: &[Vertex], size: f64) -> ChartResult<Mesh> {
    let half = size * 0.5;
    let mut mesh = Mesh::with_capacity(points.len() * 4, points.len() * 6);
    for point in points {
        push_square(&mut mesh, *point, half)?;
    }
    Ok(mesh)
}

/// Full-height vertical guide at `center.x` plus a marker at `center`.
pub fn build_hover_mesh(
    center: Vertex,
    height: f64,
    line_width: f64,
    dot_size: f64,
) -> ChartResult<Mesh> {
    let half_line = line_width * 0.5;
    let mut mesh = Mesh::with_capacity(8, 12);
    mesh.push_quad(
        Vertex::new(center.x - half_line, 0.0),
        Vertex::new(center.x - half_line, height),
        Vertex::new(center.x + half_line, 0.0),
        Vertex::new(center.x + half_line, height),
    )?;
    push_square(&mut mesh, center, dot_size * 0.5)?;
    Ok(mesh)
}

fn push_square(mesh: &mut Mesh, center: Vertex, half: f64) -> ChartResult<()> {
    mesh.push_quad(
        Vertex::new(center.x - half, center.y - half),
        Vertex::new(center.x - half, center.y + half),
        Vertex::new(center.x + half, center.y - half),
        Vertex::new(center.x + half, center.y + half),
    )
}

fn upper(a: Vertex, b: Vertex) -> Vertex {
    if a.y <= b.y { a } else { b }
}

/// Offset pair `(+normal side, -normal side)` for every point.
fn join_offsets(points: &[Vertex], thickness: f64, miter: MiterPolicy) -> Vec<(Vertex, Vertex)> {
    let tangents = segment_tangents(points);
    let last = points.len() - 1;

    let mut offsets = Vec::with_capacity(points.len());
    for (index, point) in points.iter().copied().enumerate() {
        let (direction, length) = if index == 0 {
            (perpendicular(tangents[0]), thickness)
        } else if index == last {
            (perpendicular(tangents[last - 1]), thickness)
        } else {
            miter_join(tangents[index - 1], tangents[index], thickness, miter)
        };
        offsets.push((point.offset(direction, length), point.offset(direction, -length)));
    }
    offsets
}

fn miter_join(
    incoming: (f64, f64),
    outgoing: (f64, f64),
    thickness: f64,
    miter: MiterPolicy,
) -> ((f64, f64), f64) {
    let normal = perpendicular(incoming);
    let sum = (incoming.0 + outgoing.0, incoming.1 + outgoing.1);
    let Some(tangent) = normalize(sum, REVERSAL_EPSILON) else {
        return (normal, thickness);
    };

    let direction = perpendicular(tangent);
    let length = thickness / dot(direction, normal);
    match miter {
        MiterPolicy::Clamp { limit } if length > limit * thickness => {
            trace!(length, limit, "clamping miter join");
            (direction, limit * thickness)
        }
        _ => (direction, length),
    }
}

/// Unit tangent per segment; zero-length segments borrow a neighbor's.
fn segment_tangents(points: &[Vertex]) -> Vec<(f64, f64)> {
    let raw: Vec<Option<(f64, f64)>> = points
        .windows(2)
        .map(|pair| normalize((pair[1].x - pair[0].x, pair[1].y - pair[0].y), 0.0))
        .collect();

    let mut tangents = Vec::with_capacity(raw.len());
    let mut previous = None;
    for (index, tangent) in raw.iter().enumerate() {
        let resolved = tangent
            .or(previous)
            .or_else(|| raw[index..].iter().flatten().next().copied())
            .unwrap_or((1.0, 0.0));
        tangents.push(resolved);
        previous = Some(resolved);
    }
    tangents
}

fn normalize(v: (f64, f64), epsilon: f64) -> Option<(f64, f64)> {
    let length = v.0.hypot(v.1);
    if length <= epsilon || !length.is_finite() {
        return None;
    }
    Some((v.0 / length, v.1 / length))
}

fn perpendicular(v: (f64, f64)) -> (f64, f64) {
    (-v.1, v.0)
}

fn dot(a: (f64, f64), b: (f64, f64)) -> f64 {
    a.0 * b.0 + a.1 * b.1
}
