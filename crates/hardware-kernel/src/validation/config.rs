//! Placement rules: every empirical constant the calculators use.
//!
//! All values are millimetres unless noted. `PlacementRules::default()`
//! reproduces the standard rule set; hosts may persist or override any field.

use door_types::{HardwareKind, LockType};
use serde::{Deserialize, Serialize};

use crate::Tolerance;

/// Inclusive range of permitted lengths.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LengthRange {
    pub min: f64,
    pub max: f64,
}

impl LengthRange {
    pub const fn new(min: f64, max: f64) -> Self {
        Self { min, max }
    }

    pub fn contains(&self, value: f64) -> bool {
        value >= self.min && value <= self.max
    }

    /// The same range with its upper bound capped.
    pub fn capped(&self, max: f64) -> Self {
        Self {
            min: self.min,
            max: self.max.min(max),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct HingeRules {
    /// Smallest allowed top or bottom offset.
    pub min_offset: f64,
    /// Span needed per intermediate hinge.
    pub min_intermediate_spacing: f64,
    pub default_top_offset: f64,
    pub default_bottom_offset: f64,
    /// Leafs taller than this need a third hinge.
    pub tall_door_height: f64,
    /// Leafs heavier than this (kg) need a third hinge.
    pub heavy_door_weight: f64,
    /// Leafs heavier than this (kg) need a fourth hinge.
    pub very_heavy_door_weight: f64,
    /// Exponent of the weighted distribution, t^k.
    pub weighted_exponent: f64,
    pub butt_barrel_diameter: f64,
    pub concealed_edge_inset: f64,
    pub concealed_cup_depth: f64,
    /// Distance from the back face to a concealed hinge's mounting plane.
    pub concealed_back_face_margin: f64,
}

impl Default for HingeRules {
    fn default() -> Self {
        Self {
            min_offset: 100.0,
            min_intermediate_spacing: 150.0,
            default_top_offset: 150.0,
            default_bottom_offset: 150.0,
            tall_door_height: 2100.0,
            heavy_door_weight: 50.0,
            very_heavy_door_weight: 80.0,
            weighted_exponent: 0.8,
            butt_barrel_diameter: 13.0,
            concealed_edge_inset: 5.0,
            concealed_cup_depth: 12.0,
            concealed_back_face_margin: 10.0,
        }
    }
}

/// Minimum leaf thickness per lock type.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LockThickness {
    pub cylinder: f64,
    pub mortise: f64,
    pub deadbolt: f64,
    pub smart: f64,
}

impl LockThickness {
    pub fn for_type(&self, lock_type: LockType) -> f64 {
        match lock_type {
            LockType::Cylinder => self.cylinder,
            LockType::Mortise => self.mortise,
            LockType::Deadbolt => self.deadbolt,
            LockType::Smart => self.smart,
        }
    }
}

impl Default for LockThickness {
    fn default() -> Self {
        Self {
            cylinder: 35.0,
            mortise: 40.0,
            deadbolt: 38.0,
            smart: 40.0,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LockRules {
    pub height_range: LengthRange,
    pub edge_offset_range: LengthRange,
    pub min_thickness: LockThickness,
    /// Minimum vertical distance between the lock and any hinge.
    pub hinge_clearance: f64,
    /// Mortise recess depth is min(cap, ratio * thickness).
    pub mortise_recess_cap: f64,
    pub mortise_recess_ratio: f64,
    pub smart_panel_inset: f64,
    /// Backsets a mortise lock body is manufactured in.
    pub standard_mortise_backsets: Vec<f64>,
}

impl Default for LockRules {
    fn default() -> Self {
        Self {
            height_range: LengthRange::new(800.0, 1200.0),
            edge_offset_range: LengthRange::new(50.0, 90.0),
            min_thickness: LockThickness::default(),
            hinge_clearance: 150.0,
            mortise_recess_cap: 40.0,
            mortise_recess_ratio: 0.7,
            smart_panel_inset: 5.0,
            standard_mortise_backsets: vec![44.0, 57.0],
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct HandleRules {
    /// Grip height when there is neither an override nor a lock.
    pub default_height: f64,
    pub edge_offset_with_lock: f64,
    pub edge_offset_without_lock: f64,
    pub pull_standoff: f64,
    pub bar_standoff: f64,
}

impl Default for HandleRules {
    fn default() -> Self {
        Self {
            default_height: 1000.0,
            edge_offset_with_lock: 60.0,
            edge_offset_without_lock: 70.0,
            pull_standoff: 40.0,
            bar_standoff: 50.0,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BoltRules {
    pub offset_range: LengthRange,
    /// Inset from the meeting edge.
    pub edge_inset: f64,
    /// Minimum leaf thickness for recessed (flush, automatic) bolts.
    pub min_recessed_thickness: f64,
}

impl Default for BoltRules {
    fn default() -> Self {
        Self {
            offset_range: LengthRange::new(150.0, 300.0),
            edge_inset: 40.0,
            min_recessed_thickness: 40.0,
        }
    }
}

/// Required clearance between one pair of hardware kinds.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ClearanceRule {
    pub kinds: [HardwareKind; 2],
    pub clearance: f64,
}

impl ClearanceRule {
    pub fn new(a: HardwareKind, b: HardwareKind, clearance: f64) -> Self {
        Self {
            kinds: sorted_pair(a, b),
            clearance,
        }
    }
}

/// Minimum centroid distances between hardware kinds.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ClearanceTable {
    pub rules: Vec<ClearanceRule>,
    /// Clearance for pairs without a rule.
    pub default_clearance: f64,
    /// A conflict is an error below this fraction of the required clearance.
    pub error_ratio: f64,
}

impl ClearanceTable {
    /// Required clearance for a pair of kinds, independent of order.
    pub fn required(&self, a: HardwareKind, b: HardwareKind) -> f64 {
        let key = sorted_pair(a, b);
        self.rules
            .iter()
            .find(|r| sorted_pair(r.kinds[0], r.kinds[1]) == key)
            .map_or(self.default_clearance, |r| r.clearance)
    }
}

impl Default for ClearanceTable {
    fn default() -> Self {
        use HardwareKind::*;
        Self {
            rules: vec![
                ClearanceRule::new(Hinge, Lock, 150.0),
                ClearanceRule::new(Hinge, Handle, 100.0),
                ClearanceRule::new(Hinge, Bolt, 200.0),
                ClearanceRule::new(Lock, Handle, 50.0),
                ClearanceRule::new(Lock, Bolt, 300.0),
                ClearanceRule::new(Handle, Bolt, 200.0),
            ],
            default_clearance: 100.0,
            error_ratio: 0.5,
        }
    }
}

fn sorted_pair(a: HardwareKind, b: HardwareKind) -> [HardwareKind; 2] {
    if a <= b { [a, b] } else { [b, a] }
}

/// The complete rule set handed to every calculator.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct PlacementRules {
    pub hinge: HingeRules,
    pub lock: LockRules,
    pub handle: HandleRules,
    pub bolt: BoltRules,
    pub clearance: ClearanceTable,
    pub tolerance: Tolerance,
}
