//! Single-leaf placement: every calculator in dependency order, then the
//! clearance check over the combined set.

use hardware_kernel::{
    BoltCalculator, ConflictDetector, HandleCalculator, HingeCalculator, LockCalculator,
    PlacementError, PlacementRules,
};
use tracing::{info, instrument};

use crate::types::{LeafPlacement, LeafRequest};

/// Place all requested hardware on one leaf.
///
/// Hinges come first because the lock is validated against them, the lock
/// before the handles because handles follow its height. The first failing
/// calculator aborts the whole leaf; conflicts never do.
#[instrument(skip(request, rules), fields(role = request.role.as_str()))]
pub fn place_leaf(
    request: &LeafRequest,
    rules: &PlacementRules,
) -> Result<LeafPlacement, PlacementError> {
    let leaf = &request.leaf;

    let hinges = HingeCalculator::new(rules.hinge).place(leaf, &request.hinges, request.weight_kg)?;

    let lock = request
        .lock
        .as_ref()
        .map(|spec| LockCalculator::new(rules.lock.clone()).place(leaf, spec, &hinges))
        .transpose()?;

    let handles = match &request.handles {
        Some(spec) => HandleCalculator::new(rules.handle).place(leaf, spec, lock.as_ref())?,
        None => Vec::new(),
    };

    let bolts = match &request.bolts {
        Some(spec) => BoltCalculator::new(rules.bolt).place(leaf, spec)?,
        None => Vec::new(),
    };

    let mut placement = LeafPlacement {
        role: request.role,
        leaf: *leaf,
        hinges,
        lock,
        handles,
        bolts,
        conflicts: Default::default(),
    };
    let all: Vec<_> = placement.all().cloned().collect();
    placement.conflicts = ConflictDetector::from_rules(rules).detect(&all);

    info!(
        placed = placement.len(),
        conflicts = placement.conflicts.len(),
        blocking = placement.has_blocking_conflicts(),
        "leaf placement complete"
    );
    Ok(placement)
}
