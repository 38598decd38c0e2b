//! Distance-field growth by iterative relaxation.

use tracing::debug;

use crate::raster::ScalarRaster;

/// Grow edge strength outward into a distance field.
///
/// Runs `passes` relaxation passes. Each pass computes every pixel from
/// the previous pass's snapshot only (no intra-pass feedback): a pixel
/// may rise to `neighbor - decrement`, where the decrement is
/// `1 / passes` for the four axis neighbors and `sqrt(2)` times that for
/// the four diagonal neighbors, matching their longer step. Off-raster
/// neighbors contribute nothing. Once the pass count exceeds the field
/// radius the result is stable.
///
/// The result ramps from 1.0 at strong edges down to 0.0 at pixels more
/// than `passes` steps from any edge.
#[must_use]
#[allow(clippy::cast_precision_loss)]
// Precision loss: pass counts are far below f32's integer range
pub fn grow_edge_field(edges: &ScalarRaster, passes: usize) -> ScalarRaster {
    let passes = passes.max(1);
    let axis_step = 1.0 / passes as f32;
    let diagonal_step = axis_step * std::f32::consts::SQRT_2;

    debug!(passes, axis_step, "growing edge field");

    let width = edges.width();
    let height = edges.height();
    let mut current = edges.clone();
    let mut next = ScalarRaster::new(width, height);

    for _ in 0..passes {
        for y in 0..height {
            for x in 0..width {
                let mut best = current.get(x, y);

                let left = x > 0;
                let right = x + 1 < width;
                let up = y > 0;
                let down = y + 1 < height;

                if left {
                    best = best.max(current.get(x - 1, y) - axis_step);
                }
                if right {
                    best = best.max(current.get(x + 1, y) - axis_step);
                }
                if up {
                    best = best.max(current.get(x, y - 1) - axis_step);
                }
                if down {
                    best = best.max(current.get(x, y + 1) - axis_step);
                }
                if left && up {
                    best = best.max(current.get(x - 1, y - 1) - diagonal_step);
                }
                if right && up {
                    best = best.max(current.get(x + 1, y - 1) - diagonal_step);
                }
                if left && down {
                    best = best.max(current.get(x - 1, y + 1) - diagonal_step);
                }
                if right && down {
                    best = best.max(current.get(x + 1, y + 1) - diagonal_step);
                }

                next.set(x, y, best);
            }
        }
        std::mem::swap(&mut current, &mut next);
    }

    current
}

/// Invert a grown field into blend weights: low near discontinuities,
/// high in interior regions.
#[must_use]
pub fn to_blend_weights(field: &ScalarRaster) -> ScalarRaster {
    let mut out = field.clone();
    for value in out.as_mut_slice() {
        *value = 1.0 - *value;
    }
    out
}
