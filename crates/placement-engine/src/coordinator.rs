//! Double doors: two leafs placed as one assembly.

use door_types::{AstragalType, DoorLeafConfig, Edge, LeafRole};
use hardware_kernel::{PlacementError, PlacementRules};
use serde::{Deserialize, Serialize};
use tracing::{debug, info, instrument};

use crate::pipeline::place_leaf;
use crate::types::{DoorLayout, DoubleDoorPlacement, DoubleDoorRequest, LeafRequest};

/// Seam width at rest for each astragal type (mm). Negative values overlap.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MeetingGaps {
    pub none: f64,
    pub surface: f64,
    pub overlap: f64,
}

impl Default for MeetingGaps {
    fn default() -> Self {
        Self {
            none: 3.0,
            surface: 0.0,
            overlap: -10.0,
        }
    }
}

impl MeetingGaps {
    pub fn for_astragal(&self, astragal: AstragalType) -> f64 {
        match astragal {
            AstragalType::None => self.none,
            AstragalType::Surface => self.surface,
            AstragalType::Overlap => self.overlap,
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct DoubleDoorCoordinator {
    rules: PlacementRules,
    gaps: MeetingGaps,
}

impl DoubleDoorCoordinator {
    pub fn new(rules: PlacementRules) -> Self {
        Self {
            rules,
            gaps: MeetingGaps::default(),
        }
    }

    pub fn with_gaps(mut self, gaps: MeetingGaps) -> Self {
        self.gaps = gaps;
        self
    }

    pub fn meeting_gap(&self, astragal: AstragalType) -> f64 {
        self.gaps.for_astragal(astragal)
    }

    /// The inactive leaf as it will be placed: hung from the edge opposite
    /// the active leaf when both leafs are the same width.
    pub fn resolved_inactive(&self, request: &DoubleDoorRequest) -> DoorLeafConfig {
        let mut inactive = request.inactive;
        let same_width = self.rules.tolerance.same_length(request.active.width, inactive.width);
        let mirrored = request.active.hinge_side.opposite();
        if same_width && inactive.hinge_side != mirrored {
            debug!(
                requested = ?inactive.hinge_side,
                resolved = ?mirrored,
                "inactive hinge side mirrored from active leaf"
            );
            inactive.hinge_side = mirrored;
        }
        inactive
    }

    fn layout(&self, active: &DoorLeafConfig, inactive: &DoorLeafConfig, gap: f64) -> DoorLayout {
        let overall_width = active.width + gap + inactive.width;
        // The leaf hung from the left jamb is the left-hand leaf.
        let (active_origin_x, inactive_origin_x, meeting_line_x) = match active.hinge_side {
            Edge::Left => (0.0, active.width + gap, active.width + gap / 2.0),
            Edge::Right => (inactive.width + gap, 0.0, inactive.width + gap / 2.0),
        };
        DoorLayout {
            active_origin_x,
            inactive_origin_x,
            meeting_line_x,
            overall_width,
        }
    }

    #[instrument(skip(self, request), fields(astragal = ?request.astragal))]
    pub fn place(&self, request: &DoubleDoorRequest) -> Result<DoubleDoorPlacement, PlacementError> {
        let active = request.active;
        if !self.rules.tolerance.same_length(active.height, request.inactive.height) {
            return Err(PlacementError::LeafHeightMismatch {
                active: active.height,
                inactive: request.inactive.height,
            });
        }
        let inactive = self.resolved_inactive(request);

        // Lock and handles always sit on the active leaf's free edge, bolts on
        // the inactive leaf's free edge.
        let active_edge = active.opening_edge();
        let inactive_edge = inactive.opening_edge();
        if request.lock.edge != active_edge || request.handles.edge != active_edge {
            debug!(resolved = ?active_edge, "lock and handle edge taken from active leaf");
        }
        if request.bolts.meeting_edge != inactive_edge {
            debug!(resolved = ?inactive_edge, "bolt meeting edge taken from inactive leaf");
        }

        let mut lock = request.lock;
        lock.edge = active_edge;
        let mut handles = request.handles;
        handles.edge = active_edge;
        let mut bolts = request.bolts.clone();
        bolts.meeting_edge = inactive_edge;

        let mut active_request = LeafRequest::new(active, request.hinges)
            .with_role(LeafRole::Active)
            .with_lock(lock)
            .with_handles(handles);
        active_request.weight_kg = request.active_weight_kg;

        let mut inactive_request = LeafRequest::new(inactive, request.hinges)
            .with_role(LeafRole::Inactive)
            .with_bolts(bolts);
        inactive_request.weight_kg = request.inactive_weight_kg;

        let active_placement = place_leaf(&active_request, &self.rules)?;
        let inactive_placement = place_leaf(&inactive_request, &self.rules)?;

        let meeting_gap = self.meeting_gap(request.astragal);
        let layout = self.layout(&active, &inactive, meeting_gap);

        let placement = DoubleDoorPlacement {
            active: active_placement,
            inactive: inactive_placement,
            meeting_gap,
            layout,
        };
        info!(
            active_items = placement.active.len(),
            inactive_items = placement.inactive.len(),
            meeting_gap,
            blocking = placement.has_blocking_conflicts(),
            "double door placement complete"
        );
        Ok(placement)
    }
}

/// Place both leafs of a double door with default meeting gaps.
pub fn place_double_door(
    request: &DoubleDoorRequest,
    rules: &PlacementRules,
) -> Result<DoubleDoorPlacement, PlacementError> {
    DoubleDoorCoordinator::new(rules.clone()).place(request)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use door_types::{
        BoltSpec, BoltType, HandleSide, HandleSpec, HandleType, HardwareKind, HingeSpec, HingeType,
        LockSpec, LockType,
    };
    use hardware_kernel::ErrorCode;

    fn request(active_width: f64, inactive_width: f64, astragal: AstragalType) -> DoubleDoorRequest {
        DoubleDoorRequest {
            active: DoorLeafConfig::new(2100.0, active_width, 45.0, Edge::Left),
            inactive: DoorLeafConfig::new(2100.0, inactive_width, 45.0, Edge::Left),
            active_weight_kg: None,
            inactive_weight_kg: None,
            hinges: HingeSpec::new(2, HingeType::Butt),
            lock: LockSpec::new(LockType::Mortise, 1050.0, 60.0, Edge::Right),
            handles: HandleSpec::new(HandleType::Lever, HandleSide::Both, Edge::Right),
            bolts: BoltSpec::pair(BoltType::Flush, 200.0, 200.0, Edge::Left),
            astragal,
        }
    }

    #[test]
    fn test_equal_leafs_mirror_hinge_side() {
        let placed = place_double_door(&request(800.0, 800.0, AstragalType::None), &PlacementRules::default())
            .unwrap();
        assert_eq!(placed.active.leaf.hinge_side, Edge::Left);
        assert_eq!(placed.inactive.leaf.hinge_side, Edge::Right);
        assert!(placed.inactive.hinges.iter().all(|h| h.position().x == 800.0));
    }

    #[test]
    fn test_unequal_leafs_keep_requested_side() {
        let mut req = request(900.0, 450.0, AstragalType::None);
        req.inactive.hinge_side = Edge::Right;
        let coordinator = DoubleDoorCoordinator::default();
        assert_eq!(coordinator.resolved_inactive(&req).hinge_side, Edge::Right);
        req.inactive.hinge_side = Edge::Left;
        assert_eq!(coordinator.resolved_inactive(&req).hinge_side, Edge::Left);
    }

    #[test]
    fn test_hardware_split_between_leafs() {
        let placed = place_double_door(&request(800.0, 800.0, AstragalType::Surface), &PlacementRules::default())
            .unwrap();
        assert!(placed.active.lock.is_some());
        assert_eq!(placed.active.handles.len(), 2);
        assert!(placed.active.bolts.is_empty());
        assert!(placed.inactive.lock.is_none());
        assert!(placed.inactive.handles.is_empty());
        assert_eq!(placed.inactive.by_kind(HardwareKind::Bolt).len(), 2);
    }

    #[test]
    fn test_edges_follow_leaf_hinge_sides() {
        let placed = place_double_door(&request(800.0, 800.0, AstragalType::None), &PlacementRules::default())
            .unwrap();
        // Active hinged left: lock on its right edge, mortise backset snaps to 57.
        assert_eq!(placed.active.lock.as_ref().unwrap().position().x, 743.0);
        // Inactive hinged right: bolts 40mm in from its left edge.
        assert!(placed.inactive.bolts.iter().all(|b| b.position().x == 40.0));
        assert_eq!(placed.meeting_edge(), Edge::Right);
    }

    #[test]
    fn test_meeting_gap_per_astragal() {
        let c = DoubleDoorCoordinator::default();
        assert_eq!(c.meeting_gap(AstragalType::None), 3.0);
        assert_eq!(c.meeting_gap(AstragalType::Surface), 0.0);
        assert_eq!(c.meeting_gap(AstragalType::Overlap), -10.0);
    }

    #[test]
    fn test_layout_and_symmetry() {
        let placed = place_double_door(&request(800.0, 800.0, AstragalType::None), &PlacementRules::default())
            .unwrap();
        assert_eq!(placed.layout.active_origin_x, 0.0);
        assert_eq!(placed.layout.inactive_origin_x, 803.0);
        assert_eq!(placed.layout.meeting_line_x, 801.5);
        assert_eq!(placed.layout.overall_width, 1603.0);
        let (active, inactive) = placed.hinge_offsets_from_meeting_line().unwrap();
        assert_relative_eq!(active, -801.5);
        assert_relative_eq!(active, -inactive);
    }

    #[test]
    fn test_right_hung_active_leaf_sits_right() {
        let mut req = request(800.0, 800.0, AstragalType::Overlap);
        req.active.hinge_side = Edge::Right;
        let placed = place_double_door(&req, &PlacementRules::default()).unwrap();
        assert_eq!(placed.layout.inactive_origin_x, 0.0);
        assert_eq!(placed.layout.active_origin_x, 790.0);
        assert_eq!(placed.layout.meeting_line_x, 795.0);
        let (active, inactive) = placed.hinge_offsets_from_meeting_line().unwrap();
        assert_relative_eq!(active, 795.0);
        assert_relative_eq!(inactive, -795.0);
    }

    #[test]
    fn test_height_mismatch_rejected() {
        let mut req = request(800.0, 800.0, AstragalType::None);
        req.inactive.height = 2000.0;
        let err = place_double_door(&req, &PlacementRules::default()).unwrap_err();
        assert_eq!(err.code(), ErrorCode::LeafHeightMismatch);
    }

    #[test]
    fn test_inactive_leaf_failure_propagates() {
        let mut req = request(800.0, 800.0, AstragalType::None);
        req.bolts.top_offset = 400.0;
        let err = place_double_door(&req, &PlacementRules::default()).unwrap_err();
        assert_eq!(err.code(), ErrorCode::OffsetOutOfRange);
    }
}
