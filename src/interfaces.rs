//! Boundary traits for the engine collaborators the committer talks to.
//! The importer owns none of these; the simulation core implements them.

use serde::{Deserialize, Serialize};

use crate::descriptor::{AstraJointData, AstraNodeData};

/// Identity spaces tracked by the load registry.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum AstraMapKind {
  Node,
  Joint,
}

/// The engine's node manager.
pub trait AstraNodeManager {
  /// Instantiate a node from its descriptor.
  /// return: The engine-assigned node id, or 0 if the descriptor was rejected.
  fn add_node(&mut self, node: &AstraNodeData) -> u64;
  /// Highest node id currently alive in the engine.
  fn max_node_id(&self) -> u64;
  /// Highest group id currently alive in the engine.
  fn max_group_id(&self) -> u64;
}

/// The engine's joint manager.
pub trait AstraJointManager {
  /// Instantiate a joint from its descriptor.
  /// return: The engine-assigned joint id, or 0 if the descriptor was rejected.
  fn add_joint(&mut self, joint: &AstraJointData) -> u64;
}

/// The process-wide registry translating between descriptor-local ids and
/// engine-assigned runtime ids, scoped per loaded scene.
pub trait AstraLoadRegistry {
  /// Mapping index of a previously registered scene name, 0 if unknown.
  fn scene_index_by_name(&self, scene_name: &str) -> u64;
  fn register_scene_name(&mut self, scene_name: &str);
  fn set_mapped_id(&mut self, old_id: u64, new_id: u64, kind: AstraMapKind, scene_index: u64);
  /// Runtime id registered for a descriptor-local id, 0 if unmapped.
  fn mapped_id(&self, old_id: u64, kind: AstraMapKind, scene_index: u64) -> u64;
}

/// Optional collaborator grouping a multi-node robot under one logical handle.
pub trait AstraEntityManager {
  fn add_entity(&mut self, name: &str);
  fn add_node(&mut self, entity: &str, id: u64, node_name: &str);
  fn add_joint(&mut self, entity: &str, id: u64, joint_name: &str);
}

/// The engine collaborators bundled for one load call.
pub struct AstraEngineContext<'a> {
  pub nodes: &'a mut dyn AstraNodeManager,
  pub joints: &'a mut dyn AstraJointManager,
  pub registry: &'a mut dyn AstraLoadRegistry,
  pub entities: Option<&'a mut dyn AstraEntityManager>,
}
