use std::collections::BTreeSet;
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::leaf::Edge;

/// The kind of hardware item placed on a leaf.
///
/// The derived ordering is what the clearance table sorts kind pairs by.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum HardwareKind {
    Hinge,
    Lock,
    Handle,
    Bolt,
}

impl fmt::Display for HardwareKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            HardwareKind::Hinge => "hinge",
            HardwareKind::Lock => "lock",
            HardwareKind::Handle => "handle",
            HardwareKind::Bolt => "bolt",
        };
        f.write_str(name)
    }
}

/// Which face of the leaf a handle is mounted on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MountSide {
    Exterior,
    Interior,
}

impl MountSide {
    /// +1 on the exterior face, -1 on the interior face.
    pub fn sign(self) -> f64 {
        match self {
            MountSide::Exterior => 1.0,
            MountSide::Interior => -1.0,
        }
    }
}

// ── Hinges ──────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum HingeType {
    /// Surface-mounted leaf-and-barrel hinge.
    Butt,
    /// Cup hinge embedded near the back face.
    Concealed,
    /// One continuous hinge running the full leaf height.
    Piano,
}

/// How intermediate hinges are spread between the first and last hinge.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DistributionMode {
    #[default]
    Even,
    /// Power-law spacing that packs hinges toward the top of heavy leafs.
    Weighted,
}

/// User overrides for hinge placement. Offsets are measured from the top and
/// bottom of the leaf to the outermost hinges.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct HingePlacementRules {
    pub top_offset: f64,
    pub bottom_offset: f64,
    #[serde(default)]
    pub distribution_mode: DistributionMode,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct HingeSpec {
    pub count: u32,
    pub hinge_type: HingeType,
    #[serde(default)]
    pub placement_rules: Option<HingePlacementRules>,
}

impl HingeSpec {
    pub fn new(count: u32, hinge_type: HingeType) -> Self {
        Self {
            count,
            hinge_type,
            placement_rules: None,
        }
    }

    pub fn with_offsets(mut self, top_offset: f64, bottom_offset: f64, mode: DistributionMode) -> Self {
        self.placement_rules = Some(HingePlacementRules {
            top_offset,
            bottom_offset,
            distribution_mode: mode,
        });
        self
    }
}

// ── Locks ───────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LockType {
    Cylinder,
    Mortise,
    Deadbolt,
    Smart,
}

impl fmt::Display for LockType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            LockType::Cylinder => "cylinder",
            LockType::Mortise => "mortise",
            LockType::Deadbolt => "deadbolt",
            LockType::Smart => "smart",
        };
        f.write_str(name)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LockSpec {
    pub lock_type: LockType,
    /// Height of the lock centre above the bottom of the leaf.
    pub height: f64,
    /// Distance from `edge` to the lock centre.
    pub edge_offset: f64,
    pub edge: Edge,
    /// Explicit backset. Cylinder locks use it in place of `edge_offset`;
    /// mortise locks snap it to the nearest standard backset.
    #[serde(default)]
    pub backset: Option<f64>,
}

impl LockSpec {
    pub fn new(lock_type: LockType, height: f64, edge_offset: f64, edge: Edge) -> Self {
        Self {
            lock_type,
            height,
            edge_offset,
            edge,
            backset: None,
        }
    }

    pub fn with_backset(mut self, backset: f64) -> Self {
        self.backset = Some(backset);
        self
    }
}

// ── Handles ─────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum HandleType {
    Lever,
    Knob,
    Pull,
    Bar,
}

/// Which faces receive a handle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum HandleSide {
    Both,
    Exterior,
    Interior,
}

impl HandleSide {
    /// Mounting faces in output order: exterior first.
    pub fn mount_sides(self) -> &'static [MountSide] {
        match self {
            HandleSide::Both => &[MountSide::Exterior, MountSide::Interior],
            HandleSide::Exterior => &[MountSide::Exterior],
            HandleSide::Interior => &[MountSide::Interior],
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct HandleSpec {
    pub handle_type: HandleType,
    /// Explicit grip height. When absent the handle follows the lock height,
    /// or the configured default when there is no lock.
    #[serde(default)]
    pub height: Option<f64>,
    pub side: HandleSide,
    pub edge: Edge,
    /// Explicit distance from `edge`; overrides the lock-dependent default.
    #[serde(default)]
    pub edge_offset: Option<f64>,
}

impl HandleSpec {
    pub fn new(handle_type: HandleType, side: HandleSide, edge: Edge) -> Self {
        Self {
            handle_type,
            height: None,
            side,
            edge,
            edge_offset: None,
        }
    }

    pub fn with_height(mut self, height: f64) -> Self {
        self.height = Some(height);
        self
    }

    pub fn with_edge_offset(mut self, edge_offset: f64) -> Self {
        self.edge_offset = Some(edge_offset);
        self
    }
}

// ── Bolts ───────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BoltType {
    /// Recessed into the meeting edge.
    Flush,
    /// Face-mounted barrel bolt.
    Surface,
    /// Self-latching flush bolt.
    Automatic,
}

impl BoltType {
    /// Whether the bolt body is mortised into the leaf.
    pub fn is_recessed(self) -> bool {
        matches!(self, BoltType::Flush | BoltType::Automatic)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BoltPosition {
    Top,
    Bottom,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BoltSpec {
    pub bolt_type: BoltType,
    pub positions: BTreeSet<BoltPosition>,
    pub top_offset: f64,
    pub bottom_offset: f64,
    pub meeting_edge: Edge,
}

impl BoltSpec {
    /// Top and bottom bolts at the given offsets.
    pub fn pair(bolt_type: BoltType, top_offset: f64, bottom_offset: f64, meeting_edge: Edge) -> Self {
        Self {
            bolt_type,
            positions: [BoltPosition::Top, BoltPosition::Bottom].into_iter().collect(),
            top_offset,
            bottom_offset,
            meeting_edge,
        }
    }

    pub fn only(mut self, position: BoltPosition) -> Self {
        self.positions = std::iter::once(position).collect();
        self
    }
}

/// Hardware selection for one item kind, as handed over by the configuration
/// layer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum HardwareSpec {
    Hinge(HingeSpec),
    Lock(LockSpec),
    Handle(HandleSpec),
    Bolt(BoltSpec),
}

impl HardwareSpec {
    pub fn kind(&self) -> HardwareKind {
        match self {
            HardwareSpec::Hinge(_) => HardwareKind::Hinge,
            HardwareSpec::Lock(_) => HardwareKind::Lock,
            HardwareSpec::Handle(_) => HardwareKind::Handle,
            HardwareSpec::Bolt(_) => HardwareKind::Bolt,
        }
    }
}
