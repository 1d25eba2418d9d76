use serde::{Deserialize, Serialize};

use crate::math::AstraPose;
use super::geometry::AstraGeometry;

/// The inertial properties of a link.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct AstraInertial {
  pub origin: AstraPose,
  pub mass: f64,
  /// Symmetric 3x3 inertia tensor, row major.
  pub inertia: [[f64; 3]; 3],
}

/// One visual element of a link.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct AstraVisual {
  pub name: Option<String>,
  pub origin: AstraPose,
  pub geometry: AstraGeometry,
  pub material_name: Option<String>,
}

/// One collision element of a link.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct AstraCollision {
  pub name: Option<String>,
  pub origin: AstraPose,
  pub geometry: AstraGeometry,
}

/// One rigid body of the description tree, stored in the model arena.
/// Parent and child relations are arena indices, see [`super::AstraModel`].
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct AstraLink {
  pub name: String,
  pub inertial: Option<AstraInertial>,
  pub visuals: Vec<AstraVisual>,
  pub collisions: Vec<AstraCollision>,
  /// Index of the joint connecting this link to its parent, if any.
  pub parent_joint: Option<usize>,
  /// Indices of the child links, in document order.
  pub children: Vec<usize>,
}

/// The implementation of the link record.
impl AstraLink {
  pub fn primary_visual(&self) -> Option<&AstraVisual> {
    self.visuals.first()
  }

  pub fn primary_collision(&self) -> Option<&AstraCollision> {
    self.collisions.first()
  }
}
