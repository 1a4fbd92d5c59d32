pub mod bounds;
pub mod downsample;
pub mod mesh;
pub mod scale;
pub mod smooth;
pub mod types;

pub use bounds::{NiceBounds, TARGET_TICK_COUNT, nice_bounds};
pub use downsample::downsample;
pub use hit_test::{BOUNDARY_SNAP_PX, Hit, nearest};
pub use mesh::{
    DEFAULT_MITER_LIMIT, LineMeshes, Mesh, MiterPolicy, Vertex, build_hover_mesh,
    build_line_meshes, build_marker_mesh, project_samples,
};
pub use scale::LinearScale;
pub use smooth::{DEFAULT_SMOOTHING_STEPS, smooth};
pub use types::{RawSample, Sample, SampleKind, Viewport, normalize_samples};
