use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::core::{
    LineMeshes, LinearScale, Mesh, MiterPolicy, NiceBounds, Sample, Vertex, build_line_meshes,
    build_marker_mesh, downsample, nice_bounds, project_samples, smooth,
};
use crate::error::ChartResult;

use super::ChartConfig;

/// Everything one geometry pass produces for a chart.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChartGeometry {
    /// Samples after downsampling; hit-testing and markers use these.
    pub reduced: Vec<Sample>,
    /// Samples the stroke follows (reduced, then optionally smoothed).
    pub rendered: Vec<Sample>,
    pub bounds: NiceBounds,
    pub scale_x: LinearScale,
    pub scale_y: LinearScale,
    /// `rendered` mapped into device space.
    pub points: Vec<Vertex>,
    pub meshes: LineMeshes,
    pub markers: Option<Mesh>,
}

/// Runs the data-to-geometry pipeline over normalized samples.
///
/// Returns `Ok(None)` when fewer than two samples are available, in which
/// case there is no line to draw.
pub fn build_geometry(
    samples: &[Sample],
    config: &ChartConfig,
) -> ChartResult<Option<ChartGeometry>> {
    if samples.len() < 2 {
        debug!(count = samples.len(), "skipping geometry for degenerate series");
        return Ok(None);
    }

    let (device_width, device_height) = config.device_size();
    let (width, height) = (f64::from(device_width), f64::from(device_height));

    let reduced = match config.downsample.threshold(device_width) {
        Some(threshold) if threshold < samples.len() => {
            debug!(threshold, count = samples.len(), "downsampling series");
            downsample(samples, threshold)
        }
        _ => samples.to_vec(),
    };
    let rendered = if config.smoothing {
        smooth(&reduced, config.smoothing_steps)
    } else {
        reduced.clone()
    };

    let Some(bounds) = nice_bounds(&rendered) else {
        return Ok(None);
    };
    let first = rendered[0];
    let last = rendered[rendered.len() - 1];
    let scale_x =
        LinearScale::new_widened(first.x, last.x, config.padding_x, width - config.padding_x)?;
    let scale_y = LinearScale::new_widened(
        bounds.lower,
        bounds.upper,
        height - config.padding_y,
        config.padding_y,
    )?;

    let points = project_samples(&rendered, scale_x, scale_y);
    let Some(meshes) = build_line_meshes(
        &points,
        config.thickness,
        height,
        MiterPolicy::from_limit(config.miter_limit),
    )?
    else {
        return Ok(None);
    };

    let markers = config
        .show_markers
        .then(|| {
            build_marker_mesh(&project_samples(&reduced, scale_x, scale_y), config.marker_size)
        })
        .transpose()?;

    debug!(
        input_count = samples.len(),
        reduced_count = reduced.len(),
        rendered_count = rendered.len(),
        stroke_triangles = meshes.stroke.triangle_count(),
        lower = bounds.lower,
        upper = bounds.upper,
        "built chart geometry"
    );

    Ok(Some(ChartGeometry {
        reduced,
        rendered,
        bounds,
        scale_x,
        scale_y,
        points,
        meshes,
        markers,
    }))
}
