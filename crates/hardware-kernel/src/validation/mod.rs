pub mod audit;
pub mod config;
pub mod types;

pub use audit::*;
pub use config::*;
pub use types::*;

use door_types::DoorLeafConfig;

/// Reject leafs whose dimensions no rule can be evaluated against.
pub fn validate_leaf(leaf: &DoorLeafConfig) -> ValidationResult {
    let mut result = ValidationResult::ok();
    for (parameter, value) in [
        ("height", leaf.height),
        ("width", leaf.width),
        ("leaf_thickness", leaf.leaf_thickness),
    ] {
        if !(value.is_finite() && value > 0.0) {
            result.push(PlacementError::InvalidDimension { parameter, value });
        }
    }
    result
}
