//! Placement engine for door hardware.
//!
//! Computes door-local transforms for hinges, locks, handles and bolts from a
//! leaf configuration and hardware selections. Every calculator is a pure
//! function of its inputs: validate first, then build an immutable placement
//! list, never a partial one.

pub mod conflict;
pub mod geometry;
pub mod placement;
pub mod validation;
pub mod weight;

pub use conflict::{ConflictDetector, ConflictReport, HardwareConflict};
pub use geometry::{AxisAngle, Point3d, Transform3D, Vec3};
pub use placement::{
    BoltCalculator, HandleCalculator, HardwareMetadata, HardwarePlacement, HardwareVariant,
    HingeCalculator, LockCalculator,
};
pub use validation::{
    audit_placements, AuditFinding, AuditReport, ErrorCode, PlacementError, PlacementRules,
    Severity, ValidationResult,
};
pub use weight::{estimate_leaf_weight, MaterialDensity};

use serde::{Deserialize, Serialize};

/// Tolerances for comparing computed lengths and angles.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Tolerance {
    /// Lengths closer than this are equal (millimetres).
    pub linear: f64,
    /// Angles smaller than this (radians) are considered zero.
    pub angular: f64,
}

impl Default for Tolerance {
    fn default() -> Self {
        Self {
            linear: 1e-9,
            angular: 1e-12,
        }
    }
}

impl Tolerance {
    pub fn same_length(&self, a: f64, b: f64) -> bool {
        (a - b).abs() < self.linear.max(self.linear * a.abs().max(b.abs()))
    }

    pub fn is_zero_angle(&self, angle: f64) -> bool {
        angle.abs() < self.angular
    }
}
