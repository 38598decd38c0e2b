//! Depth-discontinuity detection.

use crate::raster::{ScalarRaster, BACKGROUND};

/// Compute per-pixel edge strength from a normalized depth map.
///
/// For each pixel the maximum absolute difference against its four
/// axis-aligned neighbors is taken, scaled by `magnification`, and
/// clamped to [0, 1]. Off-raster neighbors read as [`BACKGROUND`], so the
/// silhouette against empty space registers as a strong edge. Background
/// pixels themselves are forced to full strength, which later makes the
/// grower treat everything outside the model as discontinuity.
#[must_use]
pub fn edge_strength(depth: &ScalarRaster, magnification: f32) -> ScalarRaster {
    let mut out = ScalarRaster::new(depth.width(), depth.height());

    for y in 0..depth.height() {
        for x in 0..depth.width() {
            let own = depth.get(x, y);
            if own == BACKGROUND {
                out.set(x, y, 1.0);
                continue;
            }

            #[allow(clippy::cast_possible_wrap)]
            let (sx, sy) = (x as isize, y as isize);
            let mut best = 0.0f32;
            for (nx, ny) in [(sx, sy - 1), (sx, sy + 1), (sx - 1, sy), (sx + 1, sy)] {
                let diff = (depth.sample(nx, ny) - own).abs();
                if diff > best {
                    best = diff;
                }
            }

            out.set(x, y, (best * magnification).min(1.0));
        }
    }

    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    /// 3x3 raster of a uniform foreground depth.
    fn flat(value: f32) -> ScalarRaster {
        let Ok(raster) = ScalarRaster::from_vec(3, 3, vec![value; 9]) else {
            panic!("raster");
        };
        raster
    }

    #[test]
    fn interior_of_flat_region_has_no_edge() {
        let edges = edge_strength(&flat(0.5), 3.0);
        assert_relative_eq!(edges.get(1, 1), 0.0);
    }

    #[test]
    fn border_pixels_see_background_outside() {
        // the raster edge borders on BACKGROUND (2.0): |2.0 - 0.5| * 3
        // saturates the clamp
        let edges = edge_strength(&flat(0.5), 3.0);
        assert_relative_eq!(edges.get(0, 0), 1.0);
        assert_relative_eq!(edges.get(2, 1), 1.0);
    }

    #[test]
    fn background_pixels_forced_to_full_strength() {
        let mut depth = flat(0.5);
        depth.set(1, 1, BACKGROUND);
        let edges = edge_strength(&depth, 3.0);
        assert_relative_eq!(edges.get(1, 1), 1.0);
    }

    #[test]
    fn magnification_scales_small_steps() {
        let Ok(mut depth) = ScalarRaster::from_vec(5, 5, vec![0.5; 25]) else {
            panic!("raster");
        };
        depth.set(2, 2, 0.6);
        let edges = edge_strength(&depth, 3.0);
        // |0.6 - 0.5| * 3 = 0.3 at the stepped pixel and its 4-neighbors
        assert_relative_eq!(edges.get(2, 2), 0.3, epsilon = 1e-6);
        assert_relative_eq!(edges.get(2, 1), 0.3, epsilon = 1e-6);
        // a diagonal neighbor of the step sees no 4-connected change
        assert_relative_eq!(edges.get(1, 1), 0.0);
    }

    #[test]
    fn strength_is_clamped() {
        let mut depth = flat(0.0);
        depth.set(1, 1, 1.0);
        let edges = edge_strength(&depth, 3.0);
        assert_relative_eq!(edges.get(1, 1), 1.0);
    }
}
