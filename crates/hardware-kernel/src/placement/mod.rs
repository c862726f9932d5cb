//! Per-kind placement calculators and the placement value they produce.

pub mod bolt;
pub mod handle;
pub mod hinge;
pub mod lock;

pub use bolt::BoltCalculator;
pub use handle::HandleCalculator;
pub use hinge::HingeCalculator;
pub use lock::LockCalculator;

use door_types::{
    BoltPosition, BoltType, Edge, HandleType, HardwareKind, HingeType, LeafRole, LockType,
    MountSide,
};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::geometry::{Point3d, Transform3D, Vec3};

/// Namespace for name-based instance keys.
const PLACEMENT_NAMESPACE: Uuid = Uuid::from_u128(0x5d0c_a7e1_9b42_4f6e_8a1d_3c2b_7e90_41f5);

/// The concrete hardware model behind a placement.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum HardwareVariant {
    Hinge(HingeType),
    Lock(LockType),
    Handle(HandleType),
    Bolt {
        bolt_type: BoltType,
        position: BoltPosition,
    },
}

impl HardwareVariant {
    pub fn kind(&self) -> HardwareKind {
        match self {
            HardwareVariant::Hinge(_) => HardwareKind::Hinge,
            HardwareVariant::Lock(_) => HardwareKind::Lock,
            HardwareVariant::Handle(_) => HardwareKind::Handle,
            HardwareVariant::Bolt { .. } => HardwareKind::Bolt,
        }
    }
}

/// Descriptive data carried alongside a placement's transform.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct HardwareMetadata {
    /// Position within its kind's ordered list (hinges: bottom to top).
    pub index: usize,
    pub variant: HardwareVariant,
    /// The leaf edge the item is mounted on or measured from.
    pub edge: Edge,
    /// Leaf face for items mounted on one face only.
    pub face: Option<MountSide>,
    pub y_position: f64,
    /// Length of continuous hardware such as piano hinges.
    pub length: Option<f64>,
    /// Centre of the hardware body relative to its mounting point.
    pub body_offset: Vec3,
}

/// One placed hardware item.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HardwarePlacement {
    /// Unique within one placement call, e.g. `hinge-0` or `handle-interior`.
    pub id: String,
    pub kind: HardwareKind,
    pub transform: Transform3D,
    pub metadata: HardwareMetadata,
}

impl HardwarePlacement {
    pub fn new(id: impl Into<String>, transform: Transform3D, metadata: HardwareMetadata) -> Self {
        Self {
            id: id.into(),
            kind: metadata.variant.kind(),
            transform,
            metadata,
        }
    }

    pub fn position(&self) -> &Point3d {
        &self.transform.position
    }

    /// Whether the item runs along the leaf instead of sitting at one point.
    pub fn is_continuous(&self) -> bool {
        self.metadata.length.is_some()
    }

    /// Stable key for the instancing layer. Identical inputs give identical
    /// keys, so meshes can be reused across recomputations.
    pub fn instance_key(&self, role: LeafRole) -> Uuid {
        let name = format!("{}/{}", role.as_str(), self.id);
        Uuid::new_v5(&PLACEMENT_NAMESPACE, name.as_bytes())
    }
}
