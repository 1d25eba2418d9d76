use glam::{DQuat, DVec3};
use serde::{Deserialize, Serialize};

use super::material::AstraMaterialData;

/// The engine's shape-kind tag.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum AstraShapeKind {
  Sphere,
  Box,
  Cylinder,
  Mesh,
}

/// Collision mask applied to nodes whose collision came from the document.
/// Synthesized placeholder collisions get mask 0 instead and never collide.
pub const DEFAULT_COLLISION_MASK: u32 = 0xFFFF;

/// Engine-native geometry fields for one representation of a node.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct AstraGeometryData {
  pub shape: AstraShapeKind,
  pub extent: DVec3,
  pub scale: DVec3,
  pub filename: Option<String>,
}

impl Default for AstraGeometryData {
  fn default() -> Self {
    Self {
      shape: AstraShapeKind::Box,
      extent: DVec3::ZERO,
      scale: DVec3::ONE,
      filename: None,
    }
  }
}

/// One simulation node in its pre-commit descriptor form.
///
/// Both geometry records are always populated: links without a visual or
/// collision element get synthesized placeholders, so every node resolves to
/// renderable and physically addressable geometry.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct AstraNodeData {
  /// Sequential index, unique within one load.
  pub index: u64,
  pub name: String,
  /// 0 = ungrouped; nonzero ids tie split siblings into one rigid cluster.
  pub group_id: u64,
  /// Node index of the placement parent, 0 for the root node.
  pub relative_id: u64,
  /// Pose relative to the parent's resolved frame.
  pub position: DVec3,
  pub rotation: DQuat,
  pub mass: f64,
  pub density: f64,
  /// Symmetric inertia tensor, present when the source link declared one.
  pub inertia: Option<[[f64; 3]; 3]>,
  /// Physical (collision) representation.
  pub physical: AstraGeometryData,
  pub collision_mask: u32,
  /// Set on visual-only children that never take part in collision response.
  pub no_physical: bool,
  /// Visual representation.
  pub visual: AstraGeometryData,
  /// Visual offset relative to the node pose.
  pub visual_position: DVec3,
  pub visual_rotation: DQuat,
  pub material_name: String,
  /// Resolved by the committer right before the node is handed to the engine.
  pub material: Option<AstraMaterialData>,
}

impl Default for AstraNodeData {
  fn default() -> Self {
    Self {
      index: 0,
      name: String::new(),
      group_id: 0,
      relative_id: 0,
      position: DVec3::ZERO,
      rotation: DQuat::IDENTITY,
      mass: 0.0,
      density: 1.0,
      inertia: None,
      physical: AstraGeometryData::default(),
      collision_mask: DEFAULT_COLLISION_MASK,
      no_physical: false,
      visual: AstraGeometryData::default(),
      visual_position: DVec3::ZERO,
      visual_rotation: DQuat::IDENTITY,
      material_name: String::new(),
      material: None,
    }
  }
}
