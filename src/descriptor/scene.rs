use std::collections::BTreeMap;

use super::dump::AstraDebugDump;
use super::joint::AstraJointData;
use super::material::AstraMaterialData;
use super::node::AstraNodeData;

/// The pure output of the descriptor-building phase.
///
/// Building it has no side effects, so a failed or aborted commit can be
/// retried from the same descriptor set without re-parsing the document.
#[derive(Clone, Debug, Default)]
pub struct AstraSceneDescriptors {
  /// Materials in commit order, the reserved fallback material first.
  pub materials: Vec<AstraMaterialData>,
  /// Nodes in walk order: each primary node directly followed by its
  /// split-off children.
  pub nodes: Vec<AstraNodeData>,
  pub joints: Vec<AstraJointData>,
  /// Link name to assigned node index, as built during the walk.
  pub node_ids_by_name: BTreeMap<String, u64>,
  pub debug: AstraDebugDump,
}
