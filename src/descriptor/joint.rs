use glam::DVec3;
use serde::{Deserialize, Serialize};

use crate::model::AstraJointKind;

/// The joint kinds the engine simulates.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum AstraJointType {
  Hinge,
  Slider,
  Fixed,
}

/// Total mapping from source joint kinds to engine kinds. Everything the
/// engine cannot simulate degrades to a fixed joint.
impl std::convert::From<AstraJointKind> for AstraJointType {
  fn from(kind: AstraJointKind) -> Self {
    match kind {
      AstraJointKind::Revolute => Self::Hinge,
      AstraJointKind::Prismatic => Self::Slider,
      AstraJointKind::Fixed => Self::Fixed,
      _ => Self::Fixed,
    }
  }
}

/// One simulation joint in its pre-commit descriptor form.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct AstraJointData {
  /// Sequential index, counted from 1 within one load.
  pub index: u64,
  pub name: String,
  /// Node index of the parent-side endpoint.
  pub node_index1: u64,
  /// Node index of the child-side endpoint.
  pub node_index2: u64,
  pub joint_type: AstraJointType,
  /// Rotation or translation axis, meaningful for hinge and slider joints.
  pub axis: DVec3,
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn kind_mapping_is_total() {
    let cases = [
      (AstraJointKind::Revolute, AstraJointType::Hinge),
      (AstraJointKind::Prismatic, AstraJointType::Slider),
      (AstraJointKind::Fixed, AstraJointType::Fixed),
      (AstraJointKind::Continuous, AstraJointType::Fixed),
      (AstraJointKind::Planar, AstraJointType::Fixed),
      (AstraJointKind::Floating, AstraJointType::Fixed),
      (AstraJointKind::Spherical, AstraJointType::Fixed),
    ];
    for (kind, expected) in cases {
      assert_eq!(AstraJointType::from(kind), expected);
    }
  }
}
