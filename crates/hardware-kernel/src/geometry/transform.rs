use serde::{Deserialize, Serialize};

use super::point::Point3d;
use super::rotation::AxisAngle;

/// Position and orientation of a hardware item in the door-local frame.
///
/// Computed once per placement call and never mutated afterwards.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Transform3D {
    pub position: Point3d,
    pub rotation: AxisAngle,
}

impl Transform3D {
    pub fn new(position: Point3d, rotation: AxisAngle) -> Self {
        Self { position, rotation }
    }

    /// Translation only.
    pub fn at(position: Point3d) -> Self {
        Self::new(position, AxisAngle::identity())
    }

    /// Map a point from the hardware body's frame into the door frame.
    pub fn apply_point(&self, p: &Point3d) -> Point3d {
        self.position + self.rotation.rotate_vector(&p.to_vec3())
    }

    /// 4x4 affine matrix in column-major order, as instancing buffers expect.
    pub fn to_column_major(&self) -> [f64; 16] {
        let r = self.rotation.to_matrix();
        let p = &self.position;
        #[rustfmt::skip]
        let m = [
            r[(0, 0)], r[(1, 0)], r[(2, 0)], 0.0,
            r[(0, 1)], r[(1, 1)], r[(2, 1)], 0.0,
            r[(0, 2)], r[(1, 2)], r[(2, 2)], 0.0,
            p.x,       p.y,       p.z,       1.0,
        ];
        m
    }
}

impl Default for Transform3D {
    fn default() -> Self {
        Self::at(Point3d::ORIGIN)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use std::f64::consts::FRAC_PI_2;

    #[test]
    fn test_translation_only() {
        let t = Transform3D::at(Point3d::new(900.0, 150.0, 0.0));
        let p = t.apply_point(&Point3d::new(1.0, 2.0, 3.0));
        assert_eq!(p, Point3d::new(901.0, 152.0, 3.0));
    }

    #[test]
    fn test_rotation_then_translation() {
        let t = Transform3D::new(Point3d::new(0.0, 150.0, 0.0), AxisAngle::about_y(FRAC_PI_2));
        let p = t.apply_point(&Point3d::new(10.0, 0.0, 0.0));
        assert_relative_eq!(p.x, 0.0, epsilon = 1e-12);
        assert_relative_eq!(p.y, 150.0, epsilon = 1e-12);
        assert_relative_eq!(p.z, -10.0, epsilon = 1e-12);
    }

    #[test]
    fn test_column_major_layout() {
        let t = Transform3D::at(Point3d::new(5.0, -3.0, 7.0));
        let m = t.to_column_major();
        assert_eq!(&m[12..16], &[5.0, -3.0, 7.0, 1.0]);
        assert_eq!(m[0], 1.0);
        assert_eq!(m[5], 1.0);
        assert_eq!(m[10], 1.0);
    }

    #[test]
    fn test_column_major_rotation_matches_apply() {
        let t = Transform3D::new(Point3d::new(1.0, 2.0, 3.0), AxisAngle::about_z(0.3));
        let m = t.to_column_major();
        let local = Point3d::new(4.0, -1.0, 2.0);
        let x = m[0] * local.x + m[4] * local.y + m[8] * local.z + m[12];
        let y = m[1] * local.x + m[5] * local.y + m[9] * local.z + m[13];
        let z = m[2] * local.x + m[6] * local.y + m[10] * local.z + m[14];
        let expected = t.apply_point(&local);
        assert_relative_eq!(x, expected.x, epsilon = 1e-12);
        assert_relative_eq!(y, expected.y, epsilon = 1e-12);
        assert_relative_eq!(z, expected.z, epsilon = 1e-12);
    }
}
