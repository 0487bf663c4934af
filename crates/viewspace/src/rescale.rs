use tracing::debug;

use crate::types::{Margins, Position, Spatial, Viewport};

/// Keeps the scale finite when every node sits on the same point.
pub const EPSILON: f64 = 1e-20;

/// Map an arbitrary-bounds layout into the viewport, preserving aspect ratio.
///
/// Both axes get the same scale (the smaller of the two candidates), so the
/// bounding box keeps its proportions. Logical and display coordinates are
/// both set to the rescaled values; callers reapply this on every backend
/// response since raw backend coordinates are in an unrelated scale.
pub fn fit_to_viewport<N: Spatial>(nodes: &mut [N], viewport: &Viewport, margins: &Margins) {
    if nodes.is_empty() {
        return;
    }

    let avail_w = viewport.width - (margins.chrome + 2.0 * margins.frame);
    let avail_h = viewport.height - 2.0 * margins.frame;

    let mut min_x = f64::INFINITY;
    let mut max_x = f64::NEG_INFINITY;
    let mut min_y = f64::INFINITY;
    let mut max_y = f64::NEG_INFINITY;

    for node in nodes.iter() {
        let pos = node.position();
        min_x = min_x.min(pos.x);
        max_x = max_x.max(pos.x);
        min_y = min_y.min(pos.y);
        max_y = max_y.max(pos.y);
    }

    let scale = (avail_w / (max_x - min_x + EPSILON)).min(avail_h / (max_y - min_y + EPSILON));
    debug!(scale, min_x, max_x, min_y, max_y, "rescaling layout into viewport");

    for node in nodes.iter_mut() {
        let pos = node.position();
        let fitted = Position {
            x: (pos.x - min_x) * scale + margins.chrome + margins.frame,
            y: (pos.y - min_y) * scale + margins.frame,
        };
        node.set_position(fitted);
        node.set_display_position(fitted);
    }
}
