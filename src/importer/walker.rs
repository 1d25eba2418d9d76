//! Depth-first descriptor construction over a model tree.

use std::collections::BTreeMap;

use crate::descriptor::{
  AstraDebugDump, AstraJointData, AstraJointType, AstraMaterialData, AstraNodeData,
  AstraSceneDescriptors,
};
use crate::error::AstraImporterError;
use crate::model::{AstraJointKind, AstraModel};
use super::frame::resolve_link_pose;
use super::synthesizer::AstraNodeSynthesizer;

/// Sequential id state threaded through one walk.
///
/// Node ids continue from the engine's current maximum so a scene can merge
/// into a pre-existing one; joint and material ids are scene local and both
/// count from 1.
pub(crate) struct AstraIdAllocator {
  next_node_id: u64,
  next_joint_id: u64,
  next_material_id: u64,
  next_group_id: u64,
}

impl AstraIdAllocator {
  pub fn new(first_node_id: u64, first_group_id: u64) -> Self {
    Self {
      next_node_id: first_node_id,
      next_joint_id: 1,
      next_material_id: 1,
      next_group_id: first_group_id,
    }
  }

  pub fn node_id(&mut self) -> u64 {
    let id = self.next_node_id;
    self.next_node_id += 1;
    id
  }

  pub fn joint_id(&mut self) -> u64 {
    let id = self.next_joint_id;
    self.next_joint_id += 1;
    id
  }

  pub fn material_id(&mut self) -> u64 {
    let id = self.next_material_id;
    self.next_material_id += 1;
    id
  }

  pub fn group_id(&mut self) -> u64 {
    let id = self.next_group_id;
    self.next_group_id += 1;
    id
  }
}

/// Pre-order walker turning a model tree into ordered descriptor lists.
pub struct AstraTreeWalker<'m> {
  model: &'m AstraModel,
  ids: AstraIdAllocator,
  node_ids_by_name: BTreeMap<String, u64>,
  materials: Vec<AstraMaterialData>,
  nodes: Vec<AstraNodeData>,
  joints: Vec<AstraJointData>,
  debug: AstraDebugDump,
}

/// The implementation of the tree walker.
impl<'m> AstraTreeWalker<'m> {
  /// Create a walker for one model.
  /// param model: The model tree to convert.
  /// param first_node_id: The first node index to assign.
  /// param first_group_id: The first group id to assign.
  /// return: The walker.
  pub fn new(model: &'m AstraModel, first_node_id: u64, first_group_id: u64) -> Self {
    Self {
      model,
      ids: AstraIdAllocator::new(first_node_id, first_group_id),
      node_ids_by_name: BTreeMap::new(),
      materials: Vec::new(),
      nodes: Vec::new(),
      joints: Vec::new(),
      debug: AstraDebugDump::default(),
    }
  }

  /// Build the complete descriptor set for the model.
  ///
  /// Materials are converted up front from the document's flat table, the
  /// fallback material always first. Nodes and joints follow from a pre-order
  /// walk, so every link's node index exists before its children need it.
  pub fn walk(mut self) -> Result<AstraSceneDescriptors, AstraImporterError> {
    self.convert_materials();
    self.walk_link(self.model.root, 0)?;
    Ok(AstraSceneDescriptors {
      materials: self.materials,
      nodes: self.nodes,
      joints: self.joints,
      node_ids_by_name: self.node_ids_by_name,
      debug: self.debug,
    })
  }

  fn convert_materials(&mut self) {
    let fallback = AstraMaterialData::fallback(self.ids.material_id());
    self.debug.materials.push(fallback.clone());
    self.materials.push(fallback);

    let model = self.model;
    for definition in model.materials.iter() {
      log::debug!("Converting material \"{}\".", definition.name);
      let material = AstraMaterialData {
        index: self.ids.material_id(),
        name: definition.name.clone(),
        diffuse: definition.color,
        texture: definition.texture.clone(),
        exists: true,
      };
      self.debug.materials.push(material.clone());
      self.materials.push(material);
    }
  }

  fn walk_link(&mut self, link_index: usize, parent_node_id: u64) -> Result<(), AstraImporterError> {
    let model = self.model;
    let link = &model.links[link_index];
    log::debug!("Converting link \"{}\".", link.name);

    let pose = resolve_link_pose(model, link);
    let (primary, children) =
      AstraNodeSynthesizer::new(&mut self.ids).synthesize(link, pose, parent_node_id);
    let primary_id = primary.index;

    self.node_ids_by_name.insert(link.name.clone(), primary_id);
    self.debug.links.push(primary.clone());
    self.nodes.push(primary);
    for child in children {
      self.debug.child_nodes.push(child.clone());
      self.nodes.push(child);
    }

    if let Some(joint_index) = link.parent_joint {
      self.convert_joint(joint_index)?;
    }

    for &child_link in link.children.iter() {
      self.walk_link(child_link, primary_id)?;
    }
    Ok(())
  }

  fn convert_joint(&mut self, joint_index: usize) -> Result<(), AstraImporterError> {
    let model = self.model;
    let joint = &model.joints[joint_index];
    log::debug!("Converting joint \"{}\".", joint.name);

    let joint_type = AstraJointType::from(joint.kind);
    if !matches!(
      joint.kind,
      AstraJointKind::Revolute | AstraJointKind::Prismatic | AstraJointKind::Fixed
    ) {
      log::warn!(
        "Joint \"{}\" has unsupported kind {:?}; loading it as a fixed joint.",
        joint.name,
        joint.kind
      );
    }

    let data = AstraJointData {
      index: self.ids.joint_id(),
      name: joint.name.clone(),
      node_index1: self.endpoint_id(&model.links[joint.parent].name, &joint.name)?,
      node_index2: self.endpoint_id(&model.links[joint.child].name, &joint.name)?,
      joint_type,
      axis: joint.axis,
    };
    self.debug.joints.push(data.clone());
    self.joints.push(data);
    Ok(())
  }

  /// Node index previously assigned to a link. Pre-order id assignment
  /// guarantees both endpoints exist by the time their joint is converted.
  fn endpoint_id(&self, link_name: &str, joint_name: &str) -> Result<u64, AstraImporterError> {
    self.node_ids_by_name.get(link_name).copied().ok_or_else(|| {
      AstraImporterError::new(
        &format!(
          "Joint \"{}\" references link \"{}\" before a node was assigned to it.",
          joint_name, link_name
        ),
        None,
      )
    })
  }
}
