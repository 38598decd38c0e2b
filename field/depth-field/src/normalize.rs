//! Depth raster normalization.
//!
//! Raw device depth from an infinite-far-plane perspective projection is
//! non-linear and reads exactly 1.0 for background pixels. Normalization
//! produces values comparable across the image: foreground in [0, 1],
//! background at the [`BACKGROUND`] sentinel.

use tracing::debug;

use crate::raster::{ScalarRaster, BACKGROUND};

/// Marks background pixels between the two normalization passes.
const PENDING_BACKGROUND: f32 = -1.0;

/// Normalize a raw device-depth raster.
///
/// Pass 1 marks background pixels (raw value exactly 1.0) and linearizes
/// the rest via `1 / (1 - v)`, tracking the global min/max of linearized
/// values. Pass 2 rescales foreground pixels to [0, 1] and writes the
/// [`BACKGROUND`] sentinel.
///
/// A degenerate raster (all background, or perfectly flat so max == min)
/// normalizes foreground pixels to 0.0 rather than dividing by zero.
#[must_use]
pub fn normalize_depth(raw: &ScalarRaster) -> ScalarRaster {
    let mut out = raw.clone();

    let mut min = f32::INFINITY;
    let mut max = f32::NEG_INFINITY;
    for value in out.as_mut_slice() {
        if *value == 1.0 {
            *value = PENDING_BACKGROUND;
        } else {
            *value = 1.0 / (1.0 - *value);
            min = min.min(*value);
            max = max.max(*value);
        }
    }

    let range = max - min;
    let flat = range <= 0.0;
    if flat {
        debug!("degenerate depth raster: no foreground depth range");
    }
    for value in out.as_mut_slice() {
        if *value == PENDING_BACKGROUND {
            *value = BACKGROUND;
        } else if flat {
            *value = 0.0;
        } else {
            *value = (*value - min) / range;
        }
    }

    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn background_becomes_sentinel() {
        let raw = ScalarRaster::from_vec(2, 1, vec![1.0, 0.5]);
        let Ok(raw) = raw else { panic!("raster") };
        let depth = normalize_depth(&raw);
        assert_eq!(depth.get(0, 0), BACKGROUND);
    }

    #[test]
    fn foreground_rescaled_to_unit_range() {
        // raw 0.0 -> linear 1.0 (near), raw 0.9 -> linear 10.0 (far)
        let raw = ScalarRaster::from_vec(3, 1, vec![0.0, 0.9, 0.5]);
        let Ok(raw) = raw else { panic!("raster") };
        let depth = normalize_depth(&raw);

        assert_relative_eq!(depth.get(0, 0), 0.0);
        assert_relative_eq!(depth.get(1, 0), 1.0);
        // raw 0.5 -> linear 2.0 -> (2-1)/(10-1)
        assert_relative_eq!(depth.get(2, 0), 1.0 / 9.0, epsilon = 1e-6);
    }

    #[test]
    fn flat_foreground_is_zero_not_nan() {
        let raw = ScalarRaster::from_vec(4, 1, vec![0.5, 0.5, 1.0, 0.5]);
        let Ok(raw) = raw else { panic!("raster") };
        let depth = normalize_depth(&raw);

        for &v in depth.as_slice() {
            assert!(v.is_finite());
        }
        assert_eq!(depth.get(0, 0), 0.0);
        assert_eq!(depth.get(1, 0), 0.0);
        assert_eq!(depth.get(2, 0), BACKGROUND);
        assert_eq!(depth.get(3, 0), 0.0);
    }

    #[test]
    fn all_background_raster() {
        let raw = ScalarRaster::from_vec(2, 2, vec![1.0; 4]);
        let Ok(raw) = raw else { panic!("raster") };
        let depth = normalize_depth(&raw);
        assert!(depth.as_slice().iter().all(|&v| v == BACKGROUND));
    }

    #[test]
    fn nearer_is_smaller_after_normalization() {
        // device depth grows toward 1.0 with distance; normalized depth
        // must preserve that ordering
        let raw = ScalarRaster::from_vec(3, 1, vec![0.2, 0.6, 0.95]);
        let Ok(raw) = raw else { panic!("raster") };
        let depth = normalize_depth(&raw);
        assert!(depth.get(0, 0) < depth.get(1, 0));
        assert!(depth.get(1, 0) < depth.get(2, 0));
    }
}
