//! Post-decode finalization.
//!
//! Runs once after all elements have decoded: trim unreferenced trailing
//! vertices, capture the bounding box, recenter on the block-averaged
//! centroid, and synthesize smooth normals when the file declared none.

use mesh_types::{Aabb, TriangleMesh};
use tracing::debug;

/// Finalize a freshly decoded mesh.
///
/// Returns the mesh together with its bounding box. The box is computed
/// after trimming but before recentering, so it reflects the model's
/// as-authored extents (callers use it for camera placement).
pub(crate) fn finalize(mut mesh: TriangleMesh, has_normals: bool) -> (TriangleMesh, Aabb) {
    let decoded_vertices = mesh.vertex_count();
    mesh.trim_unreferenced();
    if mesh.vertex_count() < decoded_vertices {
        debug!(
            decoded = decoded_vertices,
            kept = mesh.vertex_count(),
            "trimmed unreferenced trailing vertices"
        );
    }

    let bounds = mesh.bounds();

    let centroid = mesh.centroid();
    mesh.translate(-centroid.coords);

    if !has_normals {
        mesh.compute_smooth_normals();
    }

    (mesh, bounds)
}
