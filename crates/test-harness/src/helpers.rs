//! Helper functions: error type, standard fixtures, placement accessors.

use door_types::{
    BoltSpec, BoltType, DistributionMode, DoorLeafConfig, Edge, HandleSide, HandleSpec, HandleType,
    HingeSpec, HingeType, LockSpec, LockType,
};
use hardware_kernel::{HardwarePlacement, PlacementError};

// ── Error Type ──────────────────────────────────────────────────────────────

/// Unified error type for the test harness.
#[derive(Debug, thiserror::Error)]
pub enum HarnessError {
    #[error("placement failed: {0}")]
    Placement(#[from] PlacementError),

    #[error("placement not found: {id}")]
    PlacementNotFound { id: String },

    #[error("assertion failed: {detail}")]
    AssertionFailed { detail: String },

    #[error("oracle failure ({oracle}): {detail}")]
    OracleFailure { oracle: String, detail: String },

    #[error("serialization failed: {0}")]
    Serialization(#[from] serde_json::Error),
}

// ── Fixtures ────────────────────────────────────────────────────────────────

/// A 2000 x 900 x 40mm leaf, the most common interior door.
pub fn standard_leaf(hinge_side: Edge) -> DoorLeafConfig {
    DoorLeafConfig::new(2000.0, 900.0, 40.0, hinge_side)
}

/// Butt hinges at 150mm from top and bottom, evenly spread.
pub fn butt_hinges(count: u32) -> HingeSpec {
    HingeSpec::new(count, HingeType::Butt).with_offsets(150.0, 150.0, DistributionMode::Even)
}

/// Cylinder lock 60mm in from the given edge.
pub fn cylinder_lock(height: f64, edge: Edge) -> LockSpec {
    LockSpec::new(LockType::Cylinder, height, 60.0, edge)
}

/// Lever handles on both faces.
pub fn lever_handles(edge: Edge) -> HandleSpec {
    HandleSpec::new(HandleType::Lever, HandleSide::Both, edge)
}

/// Top and bottom flush bolts 200mm from the leaf ends.
pub fn flush_bolts(meeting_edge: Edge) -> BoltSpec {
    BoltSpec::pair(BoltType::Flush, 200.0, 200.0, meeting_edge)
}

// ── Placement Accessors ─────────────────────────────────────────────────────

/// Y positions in list order.
pub fn y_positions<'a>(placements: impl IntoIterator<Item = &'a HardwarePlacement>) -> Vec<f64> {
    placements.into_iter().map(|p| p.position().y).collect()
}

/// X positions in list order.
pub fn x_positions<'a>(placements: impl IntoIterator<Item = &'a HardwarePlacement>) -> Vec<f64> {
    placements.into_iter().map(|p| p.position().x).collect()
}

pub fn find<'a>(
    placements: impl IntoIterator<Item = &'a HardwarePlacement>,
    id: &str,
) -> Result<&'a HardwarePlacement, HarnessError> {
    placements
        .into_iter()
        .find(|p| p.id == id)
        .ok_or_else(|| HarnessError::PlacementNotFound { id: id.to_string() })
}

/// The JSON the geometry layer receives for a placement.
pub fn placement_json(placement: &HardwarePlacement) -> Result<serde_json::Value, HarnessError> {
    Ok(serde_json::to_value(placement)?)
}
