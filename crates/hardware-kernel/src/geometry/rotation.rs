//! Axis-angle orientation of a hardware body.

use nalgebra::{Matrix3, Vector3};
use serde::{Deserialize, Serialize};

use super::vector::Vec3;

/// Rotation by `angle` radians about a unit `axis` (right-hand rule).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AxisAngle {
    pub axis: Vec3,
    pub angle: f64,
}

impl AxisAngle {
    /// No rotation. The axis is vertical so an unrotated hinge barrel stays
    /// aligned with the leaf edge.
    pub fn identity() -> Self {
        Self {
            axis: Vec3::Y,
            angle: 0.0,
        }
    }

    /// Rotation about an arbitrary axis. Returns `None` for a zero axis.
    pub fn new(axis: Vec3, angle: f64) -> Option<Self> {
        axis.normalized().map(|axis| Self { axis, angle })
    }

    pub fn about_y(angle: f64) -> Self {
        Self { axis: Vec3::Y, angle }
    }

    pub fn about_z(angle: f64) -> Self {
        Self { axis: Vec3::Z, angle }
    }

    /// Compact rotation vector: axis scaled by angle.
    pub fn to_rotation_vector(&self) -> [f64; 3] {
        (self.axis * self.angle).to_array()
    }

    /// Rotation matrix via Rodrigues' formula:
    /// R = I + sin(theta) K + (1 - cos(theta)) K^2, K = skew(axis).
    pub fn to_matrix(&self) -> Matrix3<f64> {
        if self.angle.abs() < 1e-14 {
            return Matrix3::identity();
        }
        let k = skew(&Vector3::new(self.axis.x, self.axis.y, self.axis.z));
        Matrix3::identity() + self.angle.sin() * k + (1.0 - self.angle.cos()) * (k * k)
    }

    pub fn rotate_vector(&self, v: &Vec3) -> Vec3 {
        let r = self.to_matrix() * Vector3::new(v.x, v.y, v.z);
        Vec3::new(r.x, r.y, r.z)
    }
}

impl Default for AxisAngle {
    fn default() -> Self {
        Self::identity()
    }
}

/// Skew-symmetric matrix for cross product: skew(a) * b = a x b.
fn skew(v: &Vector3<f64>) -> Matrix3<f64> {
    Matrix3::new(
        0.0, -v.z, v.y,
        v.z, 0.0, -v.x,
        -v.y, v.x, 0.0,
    )
}
