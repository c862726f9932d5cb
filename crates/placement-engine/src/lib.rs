//! Whole-door placement on top of the per-kind calculators.
//!
//! [`place_leaf`] runs one leaf through hinges, lock, handles and bolts and
//! then checks clearances; [`DoubleDoorCoordinator`] does the same for both
//! leafs of a double door and keeps them consistent with each other.

pub mod coordinator;
pub mod pipeline;
pub mod sequencing;
pub mod types;

pub use coordinator::{place_double_door, DoubleDoorCoordinator, MeetingGaps};
pub use pipeline::place_leaf;
pub use sequencing::inactive_leaf_may_open;
pub use types::{DoorLayout, DoubleDoorPlacement, DoubleDoorRequest, LeafPlacement, LeafRequest};

use hardware_kernel::{PlacementError, PlacementRules};

/// The placement engine.
///
/// Holds the rule set so hosts can configure it once and place any number
/// of doors against it. Stateless between calls.
#[derive(Debug, Clone, Default)]
pub struct PlacementEngine {
    rules: PlacementRules,
    gaps: MeetingGaps,
}

impl PlacementEngine {
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

    pub fn rules(&self) -> &PlacementRules {
        &self.rules
    }

    pub fn place_leaf(&self, request: &LeafRequest) -> Result<LeafPlacement, PlacementError> {
        place_leaf(request, &self.rules)
    }

    pub fn place_double_door(
        &self,
        request: &DoubleDoorRequest,
    ) -> Result<DoubleDoorPlacement, PlacementError> {
        DoubleDoorCoordinator::new(self.rules.clone())
            .with_gaps(self.gaps)
            .place(request)
    }
}
