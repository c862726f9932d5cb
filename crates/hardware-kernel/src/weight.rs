//! Leaf weight estimation for the hinge count rule.

use door_types::DoorLeafConfig;
use serde::{Deserialize, Serialize};

/// Bulk density of common leaf constructions.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MaterialDensity {
    HollowCore,
    SolidWood,
    SteelClad,
    /// Any other construction, in kg/m³.
    Custom(f64),
}

impl MaterialDensity {
    pub fn kg_per_m3(self) -> f64 {
        match self {
            MaterialDensity::HollowCore => 300.0,
            MaterialDensity::SolidWood => 700.0,
            MaterialDensity::SteelClad => 1100.0,
            MaterialDensity::Custom(d) => d,
        }
    }
}

/// Leaf weight in kilograms. Dimensions are millimetres.
pub fn estimate_leaf_weight(leaf: &DoorLeafConfig, density: MaterialDensity) -> f64 {
    let volume_m3 = leaf.height * leaf.width * leaf.leaf_thickness * 1e-9;
    volume_m3 * density.kg_per_m3()
}
