use door_types::{
    AstragalType, BoltSpec, DoorLeafConfig, Edge, HandleSpec, HardwareKind, HardwareSpec, HingeSpec,
    LeafRole, LockSpec,
};
use hardware_kernel::geometry::Point3d;
use hardware_kernel::{ConflictReport, HardwarePlacement};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Everything needed to place hardware on one leaf.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LeafRequest {
    pub role: LeafRole,
    pub leaf: DoorLeafConfig,
    /// Leaf weight in kg, used only by the minimum hinge count rule.
    #[serde(default)]
    pub weight_kg: Option<f64>,
    pub hinges: HingeSpec,
    #[serde(default)]
    pub lock: Option<LockSpec>,
    #[serde(default)]
    pub handles: Option<HandleSpec>,
    #[serde(default)]
    pub bolts: Option<BoltSpec>,
}

impl LeafRequest {
    pub fn new(leaf: DoorLeafConfig, hinges: HingeSpec) -> Self {
        Self {
            role: LeafRole::Single,
            leaf,
            weight_kg: None,
            hinges,
            lock: None,
            handles: None,
            bolts: None,
        }
    }

    pub fn with_role(mut self, role: LeafRole) -> Self {
        self.role = role;
        self
    }

    pub fn with_weight(mut self, weight_kg: f64) -> Self {
        self.weight_kg = Some(weight_kg);
        self
    }

    pub fn with_lock(mut self, lock: LockSpec) -> Self {
        self.lock = Some(lock);
        self
    }

    pub fn with_handles(mut self, handles: HandleSpec) -> Self {
        self.handles = Some(handles);
        self
    }

    pub fn with_bolts(mut self, bolts: BoltSpec) -> Self {
        self.bolts = Some(bolts);
        self
    }

    /// Put a selection from the configuration layer into its slot,
    /// replacing any earlier selection of the same kind.
    pub fn with_spec(self, spec: HardwareSpec) -> Self {
        match spec {
            HardwareSpec::Hinge(hinges) => Self { hinges, ..self },
            HardwareSpec::Lock(lock) => self.with_lock(lock),
            HardwareSpec::Handle(handles) => self.with_handles(handles),
            HardwareSpec::Bolt(bolts) => self.with_bolts(bolts),
        }
    }
}

/// Placement result for one leaf, one list per hardware kind.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LeafPlacement {
    pub role: LeafRole,
    pub leaf: DoorLeafConfig,
    /// Bottom to top.
    pub hinges: Vec<HardwarePlacement>,
    pub lock: Option<HardwarePlacement>,
    /// Exterior before interior.
    pub handles: Vec<HardwarePlacement>,
    /// Top before bottom.
    pub bolts: Vec<HardwarePlacement>,
    pub conflicts: ConflictReport,
}

impl LeafPlacement {
    /// Every placement in calculation order: hinges, lock, handles, bolts.
    pub fn all(&self) -> impl Iterator<Item = &HardwarePlacement> {
        self.hinges
            .iter()
            .chain(self.lock.iter())
            .chain(self.handles.iter())
            .chain(self.bolts.iter())
    }

    pub fn by_kind(&self, kind: HardwareKind) -> Vec<&HardwarePlacement> {
        self.all().filter(|p| p.kind == kind).collect()
    }

    pub fn get(&self, id: &str) -> Option<&HardwarePlacement> {
        self.all().find(|p| p.id == id)
    }

    pub fn len(&self) -> usize {
        self.all().count()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn has_blocking_conflicts(&self) -> bool {
        self.conflicts.is_blocking()
    }

    /// Stable instancing keys for every placement on this leaf.
    pub fn instance_keys(&self) -> Vec<(Uuid, &HardwarePlacement)> {
        self.all().map(|p| (p.instance_key(self.role), p)).collect()
    }
}

/// A double door: an active leaf with lock and handles, an inactive leaf
/// held by bolts.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DoubleDoorRequest {
    pub active: DoorLeafConfig,
    pub inactive: DoorLeafConfig,
    #[serde(default)]
    pub active_weight_kg: Option<f64>,
    #[serde(default)]
    pub inactive_weight_kg: Option<f64>,
    /// Hinge selection shared by both leafs.
    pub hinges: HingeSpec,
    pub lock: LockSpec,
    pub handles: HandleSpec,
    pub bolts: BoltSpec,
    #[serde(default)]
    pub astragal: AstragalType,
}

/// Where each leaf sits in the assembly frame. Assembly X runs across the
/// whole opening, 0 at the left jamb.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DoorLayout {
    pub active_origin_x: f64,
    pub inactive_origin_x: f64,
    /// Centre of the seam between the leafs.
    pub meeting_line_x: f64,
    pub overall_width: f64,
}

impl DoorLayout {
    pub fn origin_x(&self, role: LeafRole) -> f64 {
        match role {
            LeafRole::Inactive => self.inactive_origin_x,
            LeafRole::Single | LeafRole::Active => self.active_origin_x,
        }
    }

    /// Position of a leaf-local placement in the assembly frame.
    pub fn to_assembly(&self, role: LeafRole, placement: &HardwarePlacement) -> Point3d {
        let p = placement.position();
        Point3d::new(p.x + self.origin_x(role), p.y, p.z)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DoubleDoorPlacement {
    pub active: LeafPlacement,
    pub inactive: LeafPlacement,
    /// Seam width at rest: positive is a gap, negative an overlap.
    pub meeting_gap: f64,
    pub layout: DoorLayout,
}

impl DoubleDoorPlacement {
    /// Signed X offset of each leaf's hinge line from the meeting line,
    /// as (active, inactive). Mirrored leafs of equal width give offsets of
    /// equal magnitude and opposite sign.
    pub fn hinge_offsets_from_meeting_line(&self) -> Option<(f64, f64)> {
        let offset = |leaf: &LeafPlacement| {
            leaf.hinges
                .first()
                .map(|h| self.layout.to_assembly(leaf.role, h).x - self.layout.meeting_line_x)
        };
        Some((offset(&self.active)?, offset(&self.inactive)?))
    }

    pub fn has_blocking_conflicts(&self) -> bool {
        self.active.has_blocking_conflicts() || self.inactive.has_blocking_conflicts()
    }

    pub fn leaf(&self, role: LeafRole) -> &LeafPlacement {
        match role {
            LeafRole::Inactive => &self.inactive,
            LeafRole::Single | LeafRole::Active => &self.active,
        }
    }

    /// Edge of the active leaf that meets the inactive one.
    pub fn meeting_edge(&self) -> Edge {
        self.active.leaf.opening_edge()
    }
}
