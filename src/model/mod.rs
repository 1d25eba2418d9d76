pub mod geometry;
pub mod link;
pub mod tree;

pub use geometry::AstraGeometry;
pub use link::{AstraCollision, AstraInertial, AstraLink, AstraVisual};
pub use tree::{AstraJoint, AstraJointKind, AstraMaterialDef, AstraModel};
