//! Vertex type and channel defaults.

use nalgebra::{Point3, Vector2, Vector3, Vector4};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// A vertex in 3D space with the full attribute set used for rendering.
///
/// Unlike sparse attribute schemes, every channel is always present with a
/// well-defined default, because mesh files may populate any subset of the
/// channels record by record:
///
/// - `position`: origin
/// - `uv`: (0.5, 0.5) — center of the texture
/// - `color`: opaque white RGBA
/// - `normal`: zero (meaning "not yet computed")
///
/// # Example
///
/// ```
/// use mesh_types::Vertex;
///
/// let v = Vertex::from_coords(1.0, 2.0, 3.0);
/// assert_eq!(v.position.x, 1.0);
/// assert_eq!(v.uv.x, 0.5);
/// assert_eq!(v.color.w, 1.0);
/// assert_eq!(v.normal.norm(), 0.0);
/// ```
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Vertex {
    /// 3D position.
    pub position: Point3<f32>,

    /// Texture coordinates (U, V).
    pub uv: Vector2<f32>,

    /// RGBA color, each component in [0, 1].
    pub color: Vector4<f32>,

    /// Vertex normal. Zero until computed or loaded.
    pub normal: Vector3<f32>,
}

impl Vertex {
    /// Create a vertex at the given position with default attributes.
    #[inline]
    #[must_use]
    pub fn new(position: Point3<f32>) -> Self {
        Self {
            position,
            uv: Vector2::new(0.5, 0.5),
            color: Vector4::new(1.0, 1.0, 1.0, 1.0),
            normal: Vector3::zeros(),
        }
    }

    /// Create a vertex from raw coordinates.
    ///
    /// # Example
    ///
    /// ```
    /// use mesh_types::Vertex;
    ///
    /// let v = Vertex::from_coords(1.0, 2.0, 3.0);
    /// assert_eq!(v.position.y, 2.0);
    /// ```
    #[inline]
    #[must_use]
    pub fn from_coords(x: f32, y: f32, z: f32) -> Self {
        Self::new(Point3::new(x, y, z))
    }

    /// Create a vertex with position and normal.
    #[inline]
    #[must_use]
    pub fn with_normal(position: Point3<f32>, normal: Vector3<f32>) -> Self {
        Self {
            normal,
            ..Self::new(position)
        }
    }
}

impl Default for Vertex {
    fn default() -> Self {
        Self::new(Point3::origin())
    }
}

impl From<Point3<f32>> for Vertex {
    fn from(position: Point3<f32>) -> Self {
        Self::new(position)
    }
}

impl From<[f32; 3]> for Vertex {
    fn from([x, y, z]: [f32; 3]) -> Self {
        Self::from_coords(x, y, z)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_channels() {
        let v = Vertex::default();
        assert_eq!(v.position, Point3::origin());
        assert_eq!(v.uv, Vector2::new(0.5, 0.5));
        assert_eq!(v.color, Vector4::new(1.0, 1.0, 1.0, 1.0));
        assert_eq!(v.normal, Vector3::zeros());
    }

    #[test]
    fn from_coords() {
        let v = Vertex::from_coords(1.0, 2.0, 3.0);
        assert!((v.position.x - 1.0).abs() < f32::EPSILON);
        assert!((v.position.y - 2.0).abs() < f32::EPSILON);
        assert!((v.position.z - 3.0).abs() < f32::EPSILON);
    }

    #[test]
    fn with_normal() {
        let v = Vertex::with_normal(Point3::origin(), Vector3::z());
        assert_eq!(v.normal, Vector3::z());
        // Other channels keep their defaults
        assert_eq!(v.uv, Vector2::new(0.5, 0.5));
    }

    #[test]
    fn from_array() {
        let v: Vertex = [1.0, 2.0, 3.0].into();
        assert!((v.position.z - 3.0).abs() < f32::EPSILON);
    }
}
