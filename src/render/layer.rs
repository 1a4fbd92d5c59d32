use serde::{Deserialize, Serialize};

/// Drawable layers of one chart, back to front.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum MeshLayer {
    Fill,
    Stroke,
    Markers,
    Hover,
}

impl MeshLayer {
    pub const DRAW_ORDER: [MeshLayer; 4] = [
        MeshLayer::Fill,
        MeshLayer::Stroke,
        MeshLayer::Markers,
        MeshLayer::Hover,
    ];
}
