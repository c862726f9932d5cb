//! Handle placement, one item per mounting face, coordinated with the lock.

use std::f64::consts::{FRAC_PI_2, PI};

use door_types::{DoorLeafConfig, HandleSpec, HandleType, HardwareKind, MountSide};
use tracing::{debug, info, instrument};

use super::{HardwareMetadata, HardwarePlacement, HardwareVariant};
use crate::geometry::{AxisAngle, Point3d, Transform3D, Vec3};
use crate::validation::{validate_leaf, HandleRules, PlacementError, ValidationResult};

#[derive(Debug, Clone, Default)]
pub struct HandleCalculator {
    rules: HandleRules,
}

impl HandleCalculator {
    pub fn new(rules: HandleRules) -> Self {
        Self { rules }
    }

    /// Grip height: the explicit override, else the lock height, else the
    /// configured default.
    pub fn resolved_height(&self, spec: &HandleSpec, lock: Option<&HardwarePlacement>) -> f64 {
        spec.height
            .or_else(|| lock.map(|l| l.metadata.y_position))
            .unwrap_or(self.rules.default_height)
    }

    pub fn resolved_edge_offset(&self, spec: &HandleSpec, lock: Option<&HardwarePlacement>) -> f64 {
        spec.edge_offset.unwrap_or(if lock.is_some() {
            self.rules.edge_offset_with_lock
        } else {
            self.rules.edge_offset_without_lock
        })
    }

    pub fn validate(
        &self,
        leaf: &DoorLeafConfig,
        spec: &HandleSpec,
        lock: Option<&HardwarePlacement>,
    ) -> ValidationResult {
        let mut result = validate_leaf(leaf);
        if !result.is_valid() {
            return result;
        }

        let height = self.resolved_height(spec, lock);
        if !(0.0..=leaf.height).contains(&height) {
            result.push(PlacementError::HeightOutOfRange {
                kind: HardwareKind::Handle,
                height,
                min: 0.0,
                max: leaf.height,
            });
        }

        let offset = self.resolved_edge_offset(spec, lock);
        if !(offset > 0.0 && offset < leaf.width) {
            result.push(PlacementError::EdgeOffsetOutOfRange {
                parameter: "handle_edge_offset",
                value: offset,
                min: 0.0,
                max: leaf.width,
            });
        }

        result
    }

    /// Depth of the handle on one face: flush for lever and knob, standing
    /// off the face for pull and bar handles.
    pub fn depth(&self, leaf: &DoorLeafConfig, handle_type: HandleType, side: MountSide) -> f64 {
        let standoff = match handle_type {
            HandleType::Lever | HandleType::Knob => 0.0,
            HandleType::Pull => self.rules.pull_standoff,
            HandleType::Bar => self.rules.bar_standoff,
        };
        match side {
            MountSide::Exterior => standoff,
            MountSide::Interior => -leaf.leaf_thickness - standoff,
        }
    }

    fn rotation(&self, spec: &HandleSpec, side: MountSide) -> AxisAngle {
        match spec.handle_type {
            HandleType::Lever | HandleType::Knob => {
                AxisAngle::about_y(spec.edge.sign() * side.sign() * FRAC_PI_2)
            }
            HandleType::Pull | HandleType::Bar => match side {
                MountSide::Exterior => AxisAngle::identity(),
                MountSide::Interior => AxisAngle::about_y(PI),
            },
        }
    }

    #[instrument(skip(self, leaf, spec, lock), fields(handle_type = ?spec.handle_type, side = ?spec.side))]
    pub fn place(
        &self,
        leaf: &DoorLeafConfig,
        spec: &HandleSpec,
        lock: Option<&HardwarePlacement>,
    ) -> Result<Vec<HardwarePlacement>, PlacementError> {
        self.validate(leaf, spec, lock).into_result()?;

        let height = self.resolved_height(spec, lock);
        let x = spec.edge.x_inset(leaf.width, self.resolved_edge_offset(spec, lock));
        debug!(
            height,
            x,
            coordinated = spec.height.is_none() && lock.is_some(),
            "handle grip line resolved"
        );

        let placements: Vec<HardwarePlacement> = spec
            .side
            .mount_sides()
            .iter()
            .enumerate()
            .map(|(index, &side)| {
                let z = self.depth(leaf, spec.handle_type, side);
                let metadata = HardwareMetadata {
                    index,
                    variant: HardwareVariant::Handle(spec.handle_type),
                    edge: spec.edge,
                    face: Some(side),
                    y_position: height,
                    length: None,
                    body_offset: Vec3::ZERO,
                };
                let id = match side {
                    MountSide::Exterior => "handle-exterior",
                    MountSide::Interior => "handle-interior",
                };
                HardwarePlacement::new(
                    id,
                    Transform3D::new(Point3d::new(x, height, z), self.rotation(spec, side)),
                    metadata,
                )
            })
            .collect();

        info!(placed = placements.len(), "handle placement complete");
        Ok(placements)
    }
}
