pub mod dump;
pub mod joint;
pub mod material;
pub mod node;
pub mod scene;

pub use dump::AstraDebugDump;
pub use joint::{AstraJointData, AstraJointType};
pub use material::{AstraMaterialData, FALLBACK_MATERIAL_NAME};
pub use node::{AstraGeometryData, AstraNodeData, AstraShapeKind, DEFAULT_COLLISION_MASK};
pub use scene::AstraSceneDescriptors;
