pub mod point;
pub mod rotation;
pub mod transform;
pub mod vector;

pub use point::Point3d;
pub use rotation::AxisAngle;
pub use transform::Transform3D;
pub use vector::Vec3;
