//! Top and bottom bolts securing the inactive leaf of a double door.

use std::f64::consts::PI;

use door_types::{BoltPosition, BoltSpec, BoltType, DoorLeafConfig};
use tracing::{info, instrument};

use super::{HardwareMetadata, HardwarePlacement, HardwareVariant};
use crate::geometry::{AxisAngle, Point3d, Transform3D, Vec3};
use crate::validation::{validate_leaf, BoltRules, PlacementError, ValidationResult};

#[derive(Debug, Clone, Default)]
pub struct BoltCalculator {
    rules: BoltRules,
}

impl BoltCalculator {
    pub fn new(rules: BoltRules) -> Self {
        Self { rules }
    }

    /// Offsets are only checked for the positions actually requested.
    pub fn validate(&self, leaf: &DoorLeafConfig, spec: &BoltSpec) -> ValidationResult {
        let mut result = validate_leaf(leaf);
        if !result.is_valid() {
            return result;
        }

        if spec.positions.is_empty() {
            result.push(PlacementError::NoPositionsSpecified);
        }

        let range = self.rules.offset_range.capped(leaf.height);
        for position in &spec.positions {
            let (parameter, value) = match position {
                BoltPosition::Top => ("top_offset", spec.top_offset),
                BoltPosition::Bottom => ("bottom_offset", spec.bottom_offset),
            };
            if !range.contains(value) {
                result.push(PlacementError::OffsetOutOfRange {
                    parameter,
                    value,
                    min: range.min,
                    max: range.max,
                });
            }
        }

        if spec.bolt_type.is_recessed() && leaf.leaf_thickness < self.rules.min_recessed_thickness {
            let name = match spec.bolt_type {
                BoltType::Automatic => "automatic bolt",
                _ => "flush bolt",
            };
            result.push(PlacementError::ThicknessInsufficient {
                hardware: name.into(),
                thickness: leaf.leaf_thickness,
                required: self.rules.min_recessed_thickness,
            });
        }

        result
    }

    #[instrument(skip(self, leaf, spec), fields(bolt_type = ?spec.bolt_type, positions = spec.positions.len()))]
    pub fn place(
        &self,
        leaf: &DoorLeafConfig,
        spec: &BoltSpec,
    ) -> Result<Vec<HardwarePlacement>, PlacementError> {
        self.validate(leaf, spec).into_result()?;

        let x = spec.meeting_edge.x_inset(leaf.width, self.rules.edge_inset);
        let z = if spec.bolt_type.is_recessed() {
            -leaf.leaf_thickness / 2.0
        } else {
            0.0
        };

        let placements: Vec<HardwarePlacement> = spec
            .positions
            .iter()
            .enumerate()
            .map(|(index, &position)| {
                let (id, y) = match position {
                    BoltPosition::Top => ("bolt-top", leaf.height - spec.top_offset),
                    BoltPosition::Bottom => ("bolt-bottom", spec.bottom_offset),
                };
                // Recessed bolts extend into the frame: up for the top bolt,
                // down for the bottom one.
                let rotation = match (spec.bolt_type.is_recessed(), position) {
                    (true, BoltPosition::Bottom) => AxisAngle::about_z(PI),
                    _ => AxisAngle::identity(),
                };
                let metadata = HardwareMetadata {
                    index,
                    variant: HardwareVariant::Bolt {
                        bolt_type: spec.bolt_type,
                        position,
                    },
                    edge: spec.meeting_edge,
                    face: None,
                    y_position: y,
                    length: None,
                    body_offset: Vec3::ZERO,
                };
                HardwarePlacement::new(id, Transform3D::new(Point3d::new(x, y, z), rotation), metadata)
            })
            .collect();

        info!(placed = placements.len(), "bolt placement complete");
        Ok(placements)
    }
}
