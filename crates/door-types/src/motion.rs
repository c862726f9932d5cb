use serde::{Deserialize, Serialize};

/// Role of a leaf within a door assembly.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LeafRole {
    /// The only leaf of a single door.
    Single,
    /// The leaf carrying the lock and handles in a double door.
    Active,
    /// The secondary leaf of a double door, secured by bolts.
    Inactive,
}

impl LeafRole {
    pub fn as_str(self) -> &'static str {
        match self {
            LeafRole::Single => "single",
            LeafRole::Active => "active",
            LeafRole::Inactive => "inactive",
        }
    }
}

/// Strip closing the seam between two meeting leafs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AstragalType {
    #[default]
    None,
    Surface,
    Overlap,
}

/// Motion state of a leaf as reported by the animation layer.
///
/// Placement never owns this value; it only reads it to decide whether a
/// dependent leaf may start moving.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "state", rename_all = "snake_case")]
pub enum LeafState {
    Closed,
    Opening { progress: f64 },
    Open,
    Closing { progress: f64 },
}

impl LeafState {
    pub fn is_fully_open(&self) -> bool {
        matches!(self, LeafState::Open)
    }
}
