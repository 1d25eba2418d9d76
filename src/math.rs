use glam::{DQuat, DVec3, EulerRot};
use serde::{Deserialize, Serialize};

/// Absolute per-component tolerance below which two poses count as equal.
pub const POSE_EPSILON: f64 = 1e-11;

/// A rigid transform: a position and a unit rotation.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct AstraPose {
  pub position: DVec3,
  pub rotation: DQuat,
}

impl Default for AstraPose {
  fn default() -> Self {
    Self::IDENTITY
  }
}

/// The implementation of the pose.
impl AstraPose {
  pub const IDENTITY: Self = Self {
    position: DVec3::ZERO,
    rotation: DQuat::IDENTITY,
  };

  pub fn new(position: DVec3, rotation: DQuat) -> Self {
    Self { position, rotation }
  }

  /// Create a pose from a translation and fixed-axis roll/pitch/yaw angles.
  /// param xyz: The translation.
  /// param rpy: The roll, pitch and yaw angles in radians.
  /// return: The pose.
  pub fn from_xyz_rpy(xyz: [f64; 3], rpy: [f64; 3]) -> Self {
    Self {
      position: DVec3::from_array(xyz),
      rotation: DQuat::from_euler(EulerRot::ZYX, rpy[2], rpy[1], rpy[0]),
    }
  }

  /// Re-express this pose relative to an anchor pose.
  /// param reference: The anchor pose.
  /// return: The pose measured in the anchor's local axes.
  pub fn relative_to(&self, reference: &AstraPose) -> AstraPose {
    let inverse_rotation = reference.rotation.inverse();
    AstraPose {
      position: inverse_rotation * (self.position - reference.position),
      rotation: inverse_rotation * self.rotation,
    }
  }

  /// Component-wise pose equality within [`POSE_EPSILON`].
  pub fn approx_eq(&self, other: &AstraPose) -> bool {
    (self.position.x - other.position.x).abs() <= POSE_EPSILON
      && (self.position.y - other.position.y).abs() <= POSE_EPSILON
      && (self.position.z - other.position.z).abs() <= POSE_EPSILON
      && (self.rotation.x - other.rotation.x).abs() <= POSE_EPSILON
      && (self.rotation.y - other.rotation.y).abs() <= POSE_EPSILON
      && (self.rotation.z - other.rotation.z).abs() <= POSE_EPSILON
      && (self.rotation.w - other.rotation.w).abs() <= POSE_EPSILON
  }
}

/// Compose a child's node pose relative to its parent's resolved frame.
/// param joint: The static parent-to-child origin transform.
/// param parent_reference: The parent's resolved reference pose.
/// param child_reference: The child's own resolved reference pose.
/// return: The child's pose in the parent reference's local axes.
pub fn compose_child_pose(
  joint: &AstraPose,
  parent_reference: &AstraPose,
  child_reference: &AstraPose,
) -> AstraPose {
  let inverse_rotation = parent_reference.rotation.inverse();
  AstraPose {
    position: inverse_rotation
      * (joint.position - parent_reference.position + joint.rotation * child_reference.position),
    rotation: inverse_rotation * child_reference.rotation * joint.rotation,
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use std::f64::consts::FRAC_PI_2;

  #[test]
  fn identity_composition_yields_child_reference() {
    let child = AstraPose::from_xyz_rpy([0.0, 0.0, 0.2], [0.0, 0.0, 0.0]);
    let pose = compose_child_pose(&AstraPose::IDENTITY, &AstraPose::IDENTITY, &child);
    assert!(pose.approx_eq(&child));
  }

  #[test]
  fn translated_parent_reference_is_subtracted() {
    let joint = AstraPose::from_xyz_rpy([0.0, 0.0, 0.1], [0.0, 0.0, 0.0]);
    let parent = AstraPose::from_xyz_rpy([0.0, 0.0, 0.05], [0.0, 0.0, 0.0]);
    let child = AstraPose::from_xyz_rpy([0.0, 0.0, 0.2], [0.0, 0.0, 0.0]);
    let pose = compose_child_pose(&joint, &parent, &child);
    assert!(pose.approx_eq(&AstraPose::from_xyz_rpy([0.0, 0.0, 0.25], [0.0, 0.0, 0.0])));
  }

  #[test]
  fn rotated_parent_reference_rotates_the_offset_back() {
    // The parent reference is yawed a quarter turn, so a +X joint offset
    // reads as -Y in the parent reference's local axes.
    let joint = AstraPose::from_xyz_rpy([1.0, 0.0, 0.0], [0.0, 0.0, 0.0]);
    let parent = AstraPose::from_xyz_rpy([0.0, 0.0, 0.0], [0.0, 0.0, FRAC_PI_2]);
    let pose = compose_child_pose(&joint, &parent, &AstraPose::IDENTITY);
    assert!((pose.position.x).abs() < 1e-9);
    assert!((pose.position.y + 1.0).abs() < 1e-9);
  }

  #[test]
  fn relative_to_inverts_the_anchor() {
    let anchor = AstraPose::from_xyz_rpy([1.0, 2.0, 3.0], [0.0, 0.0, FRAC_PI_2]);
    let pose = anchor.relative_to(&anchor);
    assert!(pose.approx_eq(&AstraPose::IDENTITY));
  }

  #[test]
  fn approx_eq_honors_the_epsilon() {
    let base = AstraPose::IDENTITY;
    let mut nudged = base;
    nudged.position.x = 0.5 * POSE_EPSILON;
    assert!(base.approx_eq(&nudged));
    nudged.position.x = 10.0 * POSE_EPSILON;
    assert!(!base.approx_eq(&nudged));
  }

  #[test]
  fn rpy_follows_the_fixed_axis_convention() {
    let pose = AstraPose::from_xyz_rpy([0.0, 0.0, 0.0], [0.0, 0.0, FRAC_PI_2]);
    let rotated = pose.rotation * DVec3::X;
    assert!((rotated.x).abs() < 1e-9);
    assert!((rotated.y - 1.0).abs() < 1e-9);
  }
}
