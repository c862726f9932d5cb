//! Hinge placement: vertical distribution along the hinge edge plus
//! per-type depth and body offsets.

use std::f64::consts::FRAC_PI_2;

use door_types::{DistributionMode, DoorLeafConfig, HingeSpec, HingeType};
use tracing::{debug, info, instrument};

use super::{HardwareMetadata, HardwarePlacement, HardwareVariant};
use crate::geometry::{AxisAngle, Point3d, Transform3D, Vec3};
use crate::validation::{validate_leaf, HingeRules, PlacementError, ValidationResult};

#[derive(Debug, Clone, Default)]
pub struct HingeCalculator {
    rules: HingeRules,
}

impl HingeCalculator {
    pub fn new(rules: HingeRules) -> Self {
        Self { rules }
    }

    /// Fewest hinges a leaf of this height and weight may hang on.
    pub fn minimum_count(&self, height: f64, weight_kg: Option<f64>) -> u32 {
        let weight = weight_kg.unwrap_or(0.0);
        if weight > self.rules.very_heavy_door_weight {
            4
        } else if height > self.rules.tall_door_height || weight > self.rules.heavy_door_weight {
            3
        } else {
            2
        }
    }

    /// Top offset, bottom offset and distribution mode, falling back to the
    /// configured defaults when the selection carries no overrides.
    pub fn resolved_offsets(&self, spec: &HingeSpec) -> (f64, f64, DistributionMode) {
        match spec.placement_rules {
            Some(r) => (r.top_offset, r.bottom_offset, r.distribution_mode),
            None => (
                self.rules.default_top_offset,
                self.rules.default_bottom_offset,
                DistributionMode::Even,
            ),
        }
    }

    pub fn validate(
        &self,
        leaf: &DoorLeafConfig,
        spec: &HingeSpec,
        weight_kg: Option<f64>,
    ) -> ValidationResult {
        let mut result = validate_leaf(leaf);
        if let Some(value) = weight_kg {
            if !(value.is_finite() && value >= 0.0) {
                result.push(PlacementError::InvalidDimension {
                    parameter: "weight_kg",
                    value,
                });
            }
        }
        if !result.is_valid() {
            return result;
        }

        // A piano hinge is one continuous item; count and offsets do not apply.
        if spec.hinge_type == HingeType::Piano {
            return result;
        }

        let required = self.minimum_count(leaf.height, weight_kg);
        if spec.count < required {
            result.push(PlacementError::MinimumHingeCountViolation {
                required,
                actual: spec.count,
                height: leaf.height,
                weight: weight_kg,
            });
        }

        let (top, bottom, _) = self.resolved_offsets(spec);
        for (parameter, value) in [("top_offset", top), ("bottom_offset", bottom)] {
            if value.is_nan() || value < self.rules.min_offset {
                result.push(PlacementError::InsufficientOffsetSpace {
                    parameter,
                    value,
                    required: self.rules.min_offset,
                });
            }
        }

        let span = leaf.height - top - bottom;
        let needed = f64::from(spec.count.saturating_sub(2)) * self.rules.min_intermediate_spacing;
        if span.is_nan() || span <= 0.0 || span < needed {
            result.push(PlacementError::InsufficientOffsetSpace {
                parameter: "available_span",
                value: span,
                required: needed,
            });
        }

        result
    }

    /// Y positions for `count` hinges from `first` to `last`, ascending.
    ///
    /// The outermost hinges sit exactly on `first` and `last`; intermediate
    /// hinges are spread by the distribution mode over t = i / (count - 1).
    pub fn y_positions(&self, count: u32, first: f64, last: f64, mode: DistributionMode) -> Vec<f64> {
        let n = count as usize;
        let span = last - first;
        let mut ys: Vec<f64> = (0..n)
            .map(|i| {
                if i == 0 {
                    first
                } else if i == n - 1 {
                    last
                } else {
                    let t = i as f64 / (n - 1) as f64;
                    let f = match mode {
                        DistributionMode::Even => t,
                        DistributionMode::Weighted => t.powf(self.rules.weighted_exponent),
                    };
                    first + f * span
                }
            })
            .collect();
        ys.sort_by(f64::total_cmp);
        ys
    }

    #[instrument(skip(self, leaf, spec), fields(count = spec.count, hinge_type = ?spec.hinge_type))]
    pub fn place(
        &self,
        leaf: &DoorLeafConfig,
        spec: &HingeSpec,
        weight_kg: Option<f64>,
    ) -> Result<Vec<HardwarePlacement>, PlacementError> {
        self.validate(leaf, spec, weight_kg).into_result()?;

        let edge = leaf.hinge_side;
        let x = edge.x_on(leaf.width);
        let rotation = AxisAngle::about_y(edge.sign() * FRAC_PI_2);
        let variant = HardwareVariant::Hinge(spec.hinge_type);

        if spec.hinge_type == HingeType::Piano {
            let y = leaf.height / 2.0;
            let metadata = HardwareMetadata {
                index: 0,
                variant,
                edge,
                face: None,
                y_position: y,
                length: Some(leaf.height),
                body_offset: Vec3::ZERO,
            };
            info!(placed = 1, length = leaf.height, "piano hinge placed");
            return Ok(vec![HardwarePlacement::new(
                "hinge-0",
                Transform3D::new(Point3d::new(x, y, 0.0), rotation),
                metadata,
            )]);
        }

        let (top, bottom, mode) = self.resolved_offsets(spec);
        let ys = self.y_positions(spec.count, bottom, leaf.height - top, mode);
        debug!(?ys, ?mode, "hinge y positions");

        let (z, body_offset) = match spec.hinge_type {
            HingeType::Butt => (
                0.0,
                Vec3::new(edge.inward() * self.rules.butt_barrel_diameter / 2.0, 0.0, 0.0),
            ),
            HingeType::Concealed => (
                -(leaf.leaf_thickness - self.rules.concealed_back_face_margin),
                Vec3::new(
                    edge.inward() * self.rules.concealed_edge_inset,
                    0.0,
                    -self.rules.concealed_cup_depth / 2.0,
                ),
            ),
            HingeType::Piano => (0.0, Vec3::ZERO),
        };

        let placements: Vec<HardwarePlacement> = ys
            .iter()
            .enumerate()
            .map(|(index, &y)| {
                let metadata = HardwareMetadata {
                    index,
                    variant,
                    edge,
                    face: None,
                    y_position: y,
                    length: None,
                    body_offset,
                };
                HardwarePlacement::new(
                    format!("hinge-{index}"),
                    Transform3D::new(Point3d::new(x, y, z), rotation),
                    metadata,
                )
            })
            .collect();

        info!(placed = placements.len(), edge = ?edge, "hinge placement complete");
        Ok(placements)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::validation::ErrorCode;
    use approx::assert_relative_eq;
    use door_types::Edge;

    fn leaf(height: f64, hinge_side: Edge) -> DoorLeafConfig {
        DoorLeafConfig::new(height, 900.0, 40.0, hinge_side)
    }

    fn ys(placements: &[HardwarePlacement]) -> Vec<f64> {
        placements.iter().map(|p| p.metadata.y_position).collect()
    }

    #[test]
    fn test_two_hinges_at_offsets() {
        let calc = HingeCalculator::default();
        let spec = HingeSpec::new(2, HingeType::Butt).with_offsets(150.0, 150.0, DistributionMode::Even);
        let placed = calc.place(&leaf(2000.0, Edge::Left), &spec, None).unwrap();
        assert_eq!(ys(&placed), vec![150.0, 1850.0]);
    }

    #[test]
    fn test_three_hinges_even_split() {
        let calc = HingeCalculator::default();
        let spec = HingeSpec::new(3, HingeType::Butt).with_offsets(150.0, 150.0, DistributionMode::Even);
        let placed = calc.place(&leaf(2400.0, Edge::Left), &spec, None).unwrap();
        assert_eq!(ys(&placed), vec![150.0, 1200.0, 2250.0]);
        let indices: Vec<usize> = placed.iter().map(|p| p.metadata.index).collect();
        assert_eq!(indices, vec![0, 1, 2]);
    }

    #[test]
    fn test_weighted_biases_toward_top() {
        let calc = HingeCalculator::default();
        let even = calc.y_positions(4, 150.0, 2250.0, DistributionMode::Even);
        let weighted = calc.y_positions(4, 150.0, 2250.0, DistributionMode::Weighted);
        assert_eq!(weighted[0], 150.0);
        assert_eq!(weighted[3], 2250.0);
        assert!(weighted[1] > even[1]);
        assert!(weighted[2] > even[2]);
        assert_relative_eq!(weighted[1], 150.0 + (1.0f64 / 3.0).powf(0.8) * 2100.0);
        assert!(weighted.windows(2).all(|w| w[0] <= w[1]));
    }

    #[test]
    fn test_x_pinned_to_hinge_edge() {
        let calc = HingeCalculator::default();
        let spec = HingeSpec::new(3, HingeType::Concealed);
        let left = calc.place(&leaf(2000.0, Edge::Left), &spec, None).unwrap();
        let right = calc.place(&leaf(2000.0, Edge::Right), &spec, None).unwrap();
        assert!(left.iter().all(|p| p.position().x == 0.0));
        assert!(right.iter().all(|p| p.position().x == 900.0));
    }

    #[test]
    fn test_depth_and_body_offset_by_type() {
        let calc = HingeCalculator::default();
        let l = leaf(2000.0, Edge::Right);

        let butt = calc.place(&l, &HingeSpec::new(2, HingeType::Butt), None).unwrap();
        assert_eq!(butt[0].position().z, 0.0);
        assert_eq!(butt[0].metadata.body_offset, Vec3::new(-6.5, 0.0, 0.0));

        let concealed = calc.place(&l, &HingeSpec::new(2, HingeType::Concealed), None).unwrap();
        assert_eq!(concealed[0].position().z, -30.0);
        assert_eq!(concealed[0].metadata.body_offset, Vec3::new(-5.0, 0.0, -6.0));
    }

    #[test]
    fn test_rotation_mirrors_by_side() {
        let calc = HingeCalculator::default();
        let spec = HingeSpec::new(2, HingeType::Butt);
        let left = calc.place(&leaf(2000.0, Edge::Left), &spec, None).unwrap();
        let right = calc.place(&leaf(2000.0, Edge::Right), &spec, None).unwrap();
        assert_eq!(left[0].transform.rotation, AxisAngle::about_y(FRAC_PI_2));
        assert_eq!(right[0].transform.rotation, AxisAngle::about_y(-FRAC_PI_2));
    }

    #[test]
    fn test_piano_is_single_continuous_placement() {
        let calc = HingeCalculator::default();
        let placed = calc
            .place(&leaf(2100.0, Edge::Left), &HingeSpec::new(1, HingeType::Piano), None)
            .unwrap();
        assert_eq!(placed.len(), 1);
        assert_eq!(placed[0].metadata.y_position, 1050.0);
        assert_eq!(placed[0].metadata.length, Some(2100.0));
        assert!(placed[0].is_continuous());
    }

    #[test]
    fn test_minimum_count_rules() {
        let calc = HingeCalculator::default();
        assert_eq!(calc.minimum_count(2000.0, None), 2);
        assert_eq!(calc.minimum_count(2100.0, None), 2);
        assert_eq!(calc.minimum_count(2101.0, None), 3);
        assert_eq!(calc.minimum_count(2000.0, Some(50.5)), 3);
        assert_eq!(calc.minimum_count(2000.0, Some(81.0)), 4);
    }

    #[test]
    fn test_too_few_hinges_for_tall_leaf() {
        let calc = HingeCalculator::default();
        let err = calc
            .place(&leaf(2400.0, Edge::Left), &HingeSpec::new(2, HingeType::Butt), None)
            .unwrap_err();
        assert_eq!(err.code(), ErrorCode::MinimumHingeCountViolation);
    }

    #[test]
    fn test_offset_below_minimum() {
        let calc = HingeCalculator::default();
        let spec = HingeSpec::new(2, HingeType::Butt).with_offsets(90.0, 150.0, DistributionMode::Even);
        let result = calc.validate(&leaf(2000.0, Edge::Left), &spec, None);
        assert!(matches!(
            result.violations_of(ErrorCode::InsufficientOffsetSpace)[0],
            PlacementError::InsufficientOffsetSpace { parameter: "top_offset", .. }
        ));
    }

    #[test]
    fn test_span_too_small_for_intermediate_hinges() {
        let calc = HingeCalculator::default();
        // 1000 - 300 - 300 = 400mm of span, 4 intermediate hinges need 600mm.
        let spec = HingeSpec::new(6, HingeType::Butt).with_offsets(300.0, 300.0, DistributionMode::Even);
        let err = calc.place(&leaf(1000.0, Edge::Left), &spec, None).unwrap_err();
        assert_eq!(
            err,
            PlacementError::InsufficientOffsetSpace {
                parameter: "available_span",
                value: 400.0,
                required: 600.0,
            }
        );
    }

    #[test]
    fn test_concealed_on_thin_leaf() {
        let calc = HingeCalculator::default();
        let thin = DoorLeafConfig::new(2000.0, 600.0, 18.0, Edge::Left);
        let spec = HingeSpec::new(2, HingeType::Concealed);
        assert!(calc.validate(&thin, &spec, None).is_valid());
        let placed = calc.place(&thin, &spec, None).unwrap();
        assert!(placed.iter().all(|p| p.position().z == -8.0));
    }

    #[test]
    fn test_nan_offset_rejected() {
        let calc = HingeCalculator::default();
        let spec = HingeSpec::new(2, HingeType::Butt).with_offsets(f64::NAN, 150.0, DistributionMode::Even);
        let result = calc.validate(&leaf(2000.0, Edge::Left), &spec, None);
        let violations = result.violations_of(ErrorCode::InsufficientOffsetSpace);
        assert!(matches!(
            violations[0],
            PlacementError::InsufficientOffsetSpace { parameter: "top_offset", .. }
        ));
        assert!(matches!(
            violations[1],
            PlacementError::InsufficientOffsetSpace { parameter: "available_span", .. }
        ));

        let spec = HingeSpec::new(2, HingeType::Butt).with_offsets(150.0, f64::NAN, DistributionMode::Even);
        let err = calc.place(&leaf(2000.0, Edge::Left), &spec, None).unwrap_err();
        assert_eq!(err.code(), ErrorCode::InsufficientOffsetSpace);
    }

    #[test]
    fn test_weight_must_be_finite_and_non_negative() {
        let calc = HingeCalculator::default();
        let l = leaf(2000.0, Edge::Left);
        let spec = HingeSpec::new(2, HingeType::Butt);
        for weight in [-1.0, f64::NAN, f64::INFINITY] {
            let err = calc.place(&l, &spec, Some(weight)).unwrap_err();
            assert!(matches!(
                err,
                PlacementError::InvalidDimension { parameter: "weight_kg", .. }
            ));
        }
        assert!(calc.validate(&l, &spec, Some(0.0)).is_valid());
        assert!(calc
            .validate(&l, &HingeSpec::new(1, HingeType::Piano), Some(-5.0))
            .has(ErrorCode::InvalidDimension));
    }
}
