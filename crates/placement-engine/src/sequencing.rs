//! Opening order of double-door leafs, as a pure check over motion state
//! owned by the animation layer.

use door_types::LeafState;

/// The inactive leaf may only start opening once the active leaf reports
/// itself fully open.
pub fn inactive_leaf_may_open(active: LeafState) -> bool {
    active.is_fully_open()
}
