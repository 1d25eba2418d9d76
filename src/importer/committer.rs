//! Second phase: turn descriptor lists into live engine objects.

use std::collections::BTreeMap;

use crate::descriptor::{
  AstraJointData, AstraMaterialData, AstraNodeData, AstraSceneDescriptors, FALLBACK_MATERIAL_NAME,
};
use crate::error::AstraImporterError;
use crate::interfaces::{AstraEngineContext, AstraMapKind};

/// Commits one descriptor set in material, node, joint order.
///
/// The commit stops at the first descriptor a manager rejects; everything
/// committed before it stands. The layered managers do not roll back, so
/// neither does the committer. Retrying means reloading from the caller.
pub struct AstraSceneCommitter<'a> {
  map_index: u64,
  robot_name: Option<&'a str>,
}

/// The implementation of the scene committer.
impl<'a> AstraSceneCommitter<'a> {
  /// Create a committer for one load.
  /// param map_index: The scene's mapping index in the load registry.
  /// return: The committer.
  pub fn new(map_index: u64) -> Self {
    Self {
      map_index,
      robot_name: None,
    }
  }

  /// Also report every committed node and joint to the entity collaborator
  /// under the given logical robot name.
  pub fn with_robot_name(mut self, robot_name: &'a str) -> Self {
    self.robot_name = Some(robot_name);
    self
  }

  /// Commit all descriptors against the engine collaborators.
  /// param descriptors: The descriptor set to commit.
  /// param ctx: The engine collaborators.
  /// return: Nothing, or the first rejection reported by a manager.
  pub fn commit(
    &self,
    descriptors: &AstraSceneDescriptors,
    ctx: &mut AstraEngineContext,
  ) -> Result<(), AstraImporterError> {
    // Materials only feed the node descriptors; the engine never addresses
    // them by id, so they stay out of the load registry.
    let mut materials_by_name: BTreeMap<&str, &AstraMaterialData> = BTreeMap::new();
    for material in descriptors.materials.iter() {
      materials_by_name.insert(material.name.as_str(), material);
    }

    for node in descriptors.nodes.iter() {
      self.commit_node(node, &materials_by_name, ctx)?;
    }
    for joint in descriptors.joints.iter() {
      self.commit_joint(joint, ctx)?;
    }
    Ok(())
  }

  fn commit_node(
    &self,
    node: &AstraNodeData,
    materials_by_name: &BTreeMap<&str, &AstraMaterialData>,
    ctx: &mut AstraEngineContext,
  ) -> Result<(), AstraImporterError> {
    let mut node = node.clone();
    node.material = materials_by_name
      .get(node.material_name.as_str())
      .or_else(|| materials_by_name.get(FALLBACK_MATERIAL_NAME))
      .map(|material| (*material).clone());

    let old_id = node.index;
    let new_id = ctx.nodes.add_node(&node);
    if new_id == 0 {
      log::error!("The node manager rejected node \"{}\".", node.name);
      return Err(AstraImporterError::new(
        &format!("Adding node \"{}\" to the engine failed.", node.name),
        None,
      ));
    }
    ctx
      .registry
      .set_mapped_id(old_id, new_id, AstraMapKind::Node, self.map_index);

    if let (Some(entities), Some(robot_name)) = (ctx.entities.as_deref_mut(), self.robot_name) {
      entities.add_node(robot_name, new_id, &node.name);
    }
    Ok(())
  }

  fn commit_joint(
    &self,
    joint: &AstraJointData,
    ctx: &mut AstraEngineContext,
  ) -> Result<(), AstraImporterError> {
    let old_id = joint.index;
    let new_id = ctx.joints.add_joint(joint);
    if new_id == 0 {
      log::error!("The joint manager rejected joint \"{}\".", joint.name);
      return Err(AstraImporterError::new(
        &format!("Adding joint \"{}\" to the engine failed.", joint.name),
        None,
      ));
    }
    ctx
      .registry
      .set_mapped_id(old_id, new_id, AstraMapKind::Joint, self.map_index);

    if let (Some(entities), Some(robot_name)) = (ctx.entities.as_deref_mut(), self.robot_name) {
      entities.add_joint(robot_name, new_id, &joint.name);
    }
    Ok(())
  }
}
