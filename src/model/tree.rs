use std::collections::BTreeMap;

use glam::DVec3;
use serde::{Deserialize, Serialize};

use crate::error::AstraImporterError;
use crate::math::AstraPose;
use super::geometry::AstraGeometry;
use super::link::{AstraCollision, AstraInertial, AstraLink, AstraVisual};

/// The joint kind as declared by the source document.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum AstraJointKind {
  Revolute,
  Continuous,
  Prismatic,
  Fixed,
  Floating,
  Planar,
  Spherical,
}

impl std::convert::From<&urdf_rs::JointType> for AstraJointKind {
  fn from(joint_type: &urdf_rs::JointType) -> Self {
    match joint_type {
      urdf_rs::JointType::Revolute => Self::Revolute,
      urdf_rs::JointType::Continuous => Self::Continuous,
      urdf_rs::JointType::Prismatic => Self::Prismatic,
      urdf_rs::JointType::Fixed => Self::Fixed,
      urdf_rs::JointType::Floating => Self::Floating,
      urdf_rs::JointType::Planar => Self::Planar,
      urdf_rs::JointType::Spherical => Self::Spherical,
    }
  }
}

/// One joint of the description tree. Endpoints are link arena indices.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct AstraJoint {
  pub name: String,
  pub kind: AstraJointKind,
  /// Static parent-to-child origin transform.
  pub origin: AstraPose,
  pub axis: DVec3,
  pub parent: usize,
  pub child: usize,
}

/// One entry of the document's flat material table.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct AstraMaterialDef {
  pub name: String,
  /// Diffuse color as r, g, b, a.
  pub color: [f64; 4],
  pub texture: Option<String>,
}

/// The description document as an arena of link records.
///
/// Links reference each other by index instead of by shared pointers, so the
/// tree has no ownership cycles and the importer can walk it read-only.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct AstraModel {
  pub name: String,
  pub links: Vec<AstraLink>,
  pub joints: Vec<AstraJoint>,
  pub materials: Vec<AstraMaterialDef>,
  /// Arena index of the single root link.
  pub root: usize,
}

/// The implementation of the model arena.
impl AstraModel {
  /// Build the arena tree from a parsed robot description.
  /// param robot: The parsed description document.
  /// return: The model, or an error if the document is not a single tree.
  pub fn from_urdf(robot: &urdf_rs::Robot) -> Result<Self, AstraImporterError> {
    let mut links = Vec::with_capacity(robot.links.len());
    let mut indices_by_name = BTreeMap::new();
    for (index, link) in robot.links.iter().enumerate() {
      indices_by_name.insert(link.name.clone(), index);
      links.push(convert_link(link));
    }

    let mut joints = Vec::with_capacity(robot.joints.len());
    for joint in robot.joints.iter() {
      let parent = *indices_by_name.get(&joint.parent.link).ok_or_else(|| {
        AstraImporterError::new(
          &format!(
            "Joint \"{}\" references unknown parent link \"{}\".",
            joint.name, joint.parent.link
          ),
          None,
        )
      })?;
      let child = *indices_by_name.get(&joint.child.link).ok_or_else(|| {
        AstraImporterError::new(
          &format!(
            "Joint \"{}\" references unknown child link \"{}\".",
            joint.name, joint.child.link
          ),
          None,
        )
      })?;
      if links[child].parent_joint.is_some() {
        return Err(AstraImporterError::new(
          &format!("Link \"{}\" has more than one parent joint.", joint.child.link),
          None,
        ));
      }
      links[child].parent_joint = Some(joints.len());
      links[parent].children.push(child);
      joints.push(AstraJoint {
        name: joint.name.clone(),
        kind: AstraJointKind::from(&joint.joint_type),
        origin: convert_pose(&joint.origin),
        axis: DVec3::new(joint.axis.xyz[0], joint.axis.xyz[1], joint.axis.xyz[2]),
        parent,
        child,
      });
    }

    let mut roots = links
      .iter()
      .enumerate()
      .filter(|(_, link)| link.parent_joint.is_none())
      .map(|(index, _)| index);
    let root = roots.next().ok_or_else(|| {
      AstraImporterError::new("Description has no root link.", None)
    })?;
    if roots.next().is_some() {
      return Err(AstraImporterError::new(
        "Description has more than one root link.",
        None,
      ));
    }

    let model = Self {
      name: robot.name.clone(),
      links,
      joints,
      materials: collect_materials(robot),
      root,
    };
    model.check_connected()?;
    Ok(model)
  }

  pub fn root_link(&self) -> &AstraLink {
    &self.links[self.root]
  }

  /// Every link must be reachable from the root.
  fn check_connected(&self) -> Result<(), AstraImporterError> {
    let mut visited = vec![false; self.links.len()];
    let mut pending = vec![self.root];
    while let Some(index) = pending.pop() {
      if !visited[index] {
        visited[index] = true;
        pending.extend(&self.links[index].children);
      }
    }
    match visited.iter().position(|seen| !seen) {
      Some(index) => Err(AstraImporterError::new(
        &format!(
          "Link \"{}\" is not reachable from the root link.",
          self.links[index].name
        ),
        None,
      )),
      None => Ok(()),
    }
  }
}

fn convert_pose(pose: &urdf_rs::Pose) -> AstraPose {
  AstraPose::from_xyz_rpy(
    [pose.xyz[0], pose.xyz[1], pose.xyz[2]],
    [pose.rpy[0], pose.rpy[1], pose.rpy[2]],
  )
}

fn convert_link(link: &urdf_rs::Link) -> AstraLink {
  AstraLink {
    name: link.name.clone(),
    inertial: convert_inertial(&link.inertial),
    visuals: link.visual.iter().map(convert_visual).collect(),
    collisions: link.collision.iter().map(convert_collision).collect(),
    parent_joint: None,
    children: Vec::new(),
  }
}

/// The parser fills an omitted inertial block with zeros; treat that as the
/// link having no inertial record at all.
fn convert_inertial(inertial: &urdf_rs::Inertial) -> Option<AstraInertial> {
  let i = &inertial.inertia;
  let all_zero = inertial.mass.value == 0.0
    && i.ixx == 0.0
    && i.ixy == 0.0
    && i.ixz == 0.0
    && i.iyy == 0.0
    && i.iyz == 0.0
    && i.izz == 0.0;
  if all_zero {
    return None;
  }
  Some(AstraInertial {
    origin: convert_pose(&inertial.origin),
    mass: inertial.mass.value,
    inertia: [
      [i.ixx, i.ixy, i.ixz],
      [i.ixy, i.iyy, i.iyz],
      [i.ixz, i.iyz, i.izz],
    ],
  })
}

fn convert_visual(visual: &urdf_rs::Visual) -> AstraVisual {
  AstraVisual {
    name: visual.name.clone(),
    origin: convert_pose(&visual.origin),
    geometry: AstraGeometry::from(&visual.geometry),
    material_name: visual
      .material
      .as_ref()
      .map(|material| material.name.clone()),
  }
}

fn convert_collision(collision: &urdf_rs::Collision) -> AstraCollision {
  AstraCollision {
    name: collision.name.clone(),
    origin: convert_pose(&collision.origin),
    geometry: AstraGeometry::from(&collision.geometry),
  }
}

/// The flat material table, extended by materials defined inline on visuals.
/// Name-only references to already listed materials are not duplicated.
fn collect_materials(robot: &urdf_rs::Robot) -> Vec<AstraMaterialDef> {
  let mut materials: Vec<AstraMaterialDef> =
    robot.materials.iter().map(convert_material).collect();
  for link in robot.links.iter() {
    for visual in link.visual.iter() {
      let Some(material) = visual.material.as_ref() else {
        continue;
      };
      if material.name.is_empty()
        || (material.color.is_none() && material.texture.is_none())
        || materials.iter().any(|m| m.name == material.name)
      {
        continue;
      }
      materials.push(convert_material(material));
    }
  }
  materials
}

fn convert_material(material: &urdf_rs::Material) -> AstraMaterialDef {
  AstraMaterialDef {
    name: material.name.clone(),
    color: material.color.as_ref().map_or([0.0, 0.0, 0.0, 1.0], |color| {
      [
        color.rgba[0],
        color.rgba[1],
        color.rgba[2],
        color.rgba[3],
      ]
    }),
    texture: material
      .texture
      .as_ref()
      .map(|texture| texture.filename.clone()),
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  const TWO_LINK_ARM: &str = r#"
    <robot name="arm">
      <material name="steel"><color rgba="0.6 0.6 0.6 1.0"/></material>
      <link name="base">
        <inertial>
          <origin xyz="0 0 0.05" rpy="0 0 0"/>
          <mass value="4.0"/>
          <inertia ixx="0.1" ixy="0" ixz="0" iyy="0.1" iyz="0" izz="0.1"/>
        </inertial>
        <visual>
          <geometry><box size="0.2 0.2 0.1"/></geometry>
          <material name="steel"/>
        </visual>
      </link>
      <joint name="shoulder" type="revolute">
        <parent link="base"/>
        <child link="upper_arm"/>
        <origin xyz="0 0 0.1" rpy="0 0 0"/>
        <axis xyz="0 0 1"/>
        <limit lower="-1.57" upper="1.57" effort="10" velocity="1"/>
      </joint>
      <link name="upper_arm"/>
    </robot>
  "#;

  #[test]
  fn builds_the_arena_from_a_flat_document() {
    let robot = urdf_rs::read_from_string(TWO_LINK_ARM).unwrap();
    let model = AstraModel::from_urdf(&robot).unwrap();

    assert_eq!(model.links.len(), 2);
    assert_eq!(model.joints.len(), 1);
    assert_eq!(model.root_link().name, "base");
    assert_eq!(model.links[model.root].children, vec![1]);
    assert_eq!(model.links[1].parent_joint, Some(0));
    assert_eq!(model.joints[0].kind, AstraJointKind::Revolute);
    assert_eq!(model.joints[0].parent, 0);
    assert_eq!(model.joints[0].child, 1);
  }

  #[test]
  fn zeroed_inertial_counts_as_absent() {
    let robot = urdf_rs::read_from_string(TWO_LINK_ARM).unwrap();
    let model = AstraModel::from_urdf(&robot).unwrap();

    assert!(model.root_link().inertial.is_some());
    assert!(model.links[1].inertial.is_none());
  }

  #[test]
  fn material_table_comes_from_the_document() {
    let robot = urdf_rs::read_from_string(TWO_LINK_ARM).unwrap();
    let model = AstraModel::from_urdf(&robot).unwrap();

    assert_eq!(model.materials.len(), 1);
    assert_eq!(model.materials[0].name, "steel");
    assert_eq!(model.materials[0].color, [0.6, 0.6, 0.6, 1.0]);
  }

  #[test]
  fn inline_material_definitions_extend_the_table() {
    let source = r#"
      <robot name="r">
        <link name="only">
          <visual>
            <geometry><sphere radius="0.1"/></geometry>
            <material name="glow"><color rgba="0 1 0 1"/></material>
          </visual>
        </link>
      </robot>
    "#;
    let robot = urdf_rs::read_from_string(source).unwrap();
    let model = AstraModel::from_urdf(&robot).unwrap();

    assert_eq!(model.materials.len(), 1);
    assert_eq!(model.materials[0].name, "glow");
    assert_eq!(model.materials[0].color, [0.0, 1.0, 0.0, 1.0]);
  }

  #[test]
  fn unknown_joint_endpoint_fails() {
    let source = r#"
      <robot name="r">
        <link name="a"/>
        <joint name="j" type="fixed">
          <parent link="a"/>
          <child link="missing"/>
        </joint>
      </robot>
    "#;
    let robot = urdf_rs::read_from_string(source).unwrap();
    let result = AstraModel::from_urdf(&robot);
    assert!(result.is_err());
  }

  #[test]
  fn two_roots_fail() {
    let source = r#"
      <robot name="r">
        <link name="a"/>
        <link name="b"/>
      </robot>
    "#;
    let robot = urdf_rs::read_from_string(source).unwrap();
    assert!(AstraModel::from_urdf(&robot).is_err());
  }
}
