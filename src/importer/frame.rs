//! Reference-frame resolution for links.

use crate::math::{compose_child_pose, AstraPose};
use crate::model::{AstraLink, AstraModel};

/// Pick the authoritative anchor pose for a link's geometry.
///
/// The inertial origin wins when present. Links without mass properties fall
/// back to their first collision's origin, and purely structural links with
/// neither anchor at the identity pose.
pub fn reference_origin(link: &AstraLink) -> AstraPose {
  if let Some(inertial) = link.inertial.as_ref() {
    inertial.origin
  } else if let Some(collision) = link.primary_collision() {
    collision.origin
  } else {
    AstraPose::IDENTITY
  }
}

/// Compute a link's node pose relative to its parent's resolved frame.
/// The root link has no parent joint and sits at its own reference origin.
pub fn resolve_link_pose(model: &AstraModel, link: &AstraLink) -> AstraPose {
  match link.parent_joint {
    Some(joint_index) => {
      let joint = &model.joints[joint_index];
      let parent = &model.links[joint.parent];
      compose_child_pose(
        &joint.origin,
        &reference_origin(parent),
        &reference_origin(link),
      )
    }
    None => reference_origin(link),
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::math::AstraPose;
  use crate::model::AstraModel;

  fn model_from(source: &str) -> AstraModel {
    let robot = urdf_rs::read_from_string(source).unwrap();
    AstraModel::from_urdf(&robot).unwrap()
  }

  #[test]
  fn reference_falls_back_to_collision_then_identity() {
    let model = model_from(
      r#"
      <robot name="r">
        <link name="root">
          <collision>
            <origin xyz="0 0 0.5" rpy="0 0 0"/>
            <geometry><box size="1 1 1"/></geometry>
          </collision>
        </link>
        <joint name="j" type="fixed">
          <parent link="root"/>
          <child link="bare"/>
        </joint>
        <link name="bare"/>
      </robot>
      "#,
    );

    let with_collision = reference_origin(&model.links[0]);
    assert!(with_collision.approx_eq(&AstraPose::from_xyz_rpy([0.0, 0.0, 0.5], [0.0; 3])));

    let bare = reference_origin(&model.links[1]);
    assert!(bare.approx_eq(&AstraPose::IDENTITY));
  }

  #[test]
  fn child_pose_composes_joint_and_both_references() {
    let model = model_from(
      r#"
      <robot name="r">
        <link name="base">
          <inertial>
            <origin xyz="0 0 0.05" rpy="0 0 0"/>
            <mass value="4.0"/>
            <inertia ixx="0.1" ixy="0" ixz="0" iyy="0.1" iyz="0" izz="0.1"/>
          </inertial>
        </link>
        <joint name="lift" type="prismatic">
          <parent link="base"/>
          <child link="carriage"/>
          <origin xyz="0 0 0.1" rpy="0 0 0"/>
          <axis xyz="0 0 1"/>
          <limit lower="0" upper="0.5" effort="10" velocity="1"/>
        </joint>
        <link name="carriage">
          <inertial>
            <origin xyz="0 0 0.2" rpy="0 0 0"/>
            <mass value="1.0"/>
            <inertia ixx="0.01" ixy="0" ixz="0" iyy="0.01" iyz="0" izz="0.01"/>
          </inertial>
        </link>
      </robot>
      "#,
    );

    let pose = resolve_link_pose(&model, &model.links[1]);
    // 0.1 joint offset - 0.05 parent anchor + 0.2 own anchor.
    assert!(pose.approx_eq(&AstraPose::from_xyz_rpy([0.0, 0.0, 0.25], [0.0; 3])));
  }
}
