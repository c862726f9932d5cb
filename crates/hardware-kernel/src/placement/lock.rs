//! Lock placement, validated against the hinges already placed on the leaf.

use std::f64::consts::FRAC_PI_2;

use door_types::{DoorLeafConfig, HardwareKind, LockSpec, LockType};
use tracing::{debug, info, instrument};

use super::{HardwareMetadata, HardwarePlacement, HardwareVariant};
use crate::geometry::{AxisAngle, Point3d, Transform3D, Vec3};
use crate::validation::{validate_leaf, LengthRange, LockRules, PlacementError, ValidationResult};

#[derive(Debug, Clone, Default)]
pub struct LockCalculator {
    rules: LockRules,
}

impl LockCalculator {
    pub fn new(rules: LockRules) -> Self {
        Self { rules }
    }

    pub fn validate(
        &self,
        leaf: &DoorLeafConfig,
        spec: &LockSpec,
        hinges: &[HardwarePlacement],
    ) -> ValidationResult {
        let mut result = validate_leaf(leaf);
        if !result.is_valid() {
            return result;
        }

        let height_range = self.rules.height_range.capped(leaf.height);
        if !height_range.contains(spec.height) {
            result.push(PlacementError::HeightOutOfRange {
                kind: HardwareKind::Lock,
                height: spec.height,
                min: height_range.min,
                max: height_range.max,
            });
        }

        let offset_range = self.rules.edge_offset_range;
        if !offset_range.contains(spec.edge_offset) {
            result.push(PlacementError::EdgeOffsetOutOfRange {
                parameter: "edge_offset",
                value: spec.edge_offset,
                min: offset_range.min,
                max: offset_range.max,
            });
        }

        if let Some(backset) = spec.backset {
            let backset_range = LengthRange::new(0.0, leaf.width / 2.0);
            if backset <= 0.0 || !backset_range.contains(backset) {
                result.push(PlacementError::EdgeOffsetOutOfRange {
                    parameter: "backset",
                    value: backset,
                    min: backset_range.min,
                    max: backset_range.max,
                });
            }
        }

        let min_thickness = self.rules.min_thickness.for_type(spec.lock_type);
        if leaf.leaf_thickness < min_thickness {
            result.push(PlacementError::ThicknessInsufficient {
                hardware: format!("{} lock", spec.lock_type),
                thickness: leaf.leaf_thickness,
                required: min_thickness,
            });
        }

        // Continuous hinges run the full edge; only discrete hinges have a
        // height to keep clear of.
        for hinge in hinges
            .iter()
            .filter(|p| p.kind == HardwareKind::Hinge && !p.is_continuous())
        {
            let distance = (spec.height - hinge.metadata.y_position).abs();
            if distance < self.rules.hinge_clearance {
                result.push(PlacementError::HingeProximityViolation {
                    hinge_id: hinge.id.clone(),
                    hinge_y: hinge.metadata.y_position,
                    lock_height: spec.height,
                    distance,
                    required: self.rules.hinge_clearance,
                });
            }
        }

        result
    }

    /// Horizontal distance from the lock edge to the lock centre.
    pub fn backset(&self, spec: &LockSpec) -> f64 {
        match spec.lock_type {
            LockType::Cylinder => spec.backset.unwrap_or(spec.edge_offset),
            LockType::Mortise => {
                let wanted = spec.backset.unwrap_or(spec.edge_offset);
                self.rules
                    .standard_mortise_backsets
                    .iter()
                    .copied()
                    .min_by(|a, b| (a - wanted).abs().total_cmp(&(b - wanted).abs()))
                    .unwrap_or(wanted)
            }
            LockType::Deadbolt | LockType::Smart => spec.edge_offset,
        }
    }

    /// Depth of the lock centre below the exterior face (negative).
    pub fn depth(&self, leaf: &DoorLeafConfig, lock_type: LockType) -> f64 {
        match lock_type {
            LockType::Cylinder | LockType::Deadbolt => -leaf.leaf_thickness / 2.0,
            LockType::Mortise => -(self.rules.mortise_recess_ratio * leaf.leaf_thickness)
                .min(self.rules.mortise_recess_cap),
            LockType::Smart => -self.rules.smart_panel_inset,
        }
    }

    #[instrument(skip(self, leaf, spec, hinges), fields(lock_type = %spec.lock_type, height = spec.height))]
    pub fn place(
        &self,
        leaf: &DoorLeafConfig,
        spec: &LockSpec,
        hinges: &[HardwarePlacement],
    ) -> Result<HardwarePlacement, PlacementError> {
        self.validate(leaf, spec, hinges).into_result()?;

        let backset = self.backset(spec);
        let x = spec.edge.x_inset(leaf.width, backset);
        let z = self.depth(leaf, spec.lock_type);
        debug!(backset, x, z, "lock position resolved");

        let metadata = HardwareMetadata {
            index: 0,
            variant: HardwareVariant::Lock(spec.lock_type),
            edge: spec.edge,
            face: None,
            y_position: spec.height,
            length: None,
            body_offset: Vec3::ZERO,
        };
        let placement = HardwarePlacement::new(
            "lock",
            Transform3D::new(
                Point3d::new(x, spec.height, z),
                AxisAngle::about_y(spec.edge.sign() * FRAC_PI_2),
            ),
            metadata,
        );

        info!(x, y = spec.height, z, "lock placement complete");
        Ok(placement)
    }
}
