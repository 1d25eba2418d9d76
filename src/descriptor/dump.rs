use serde::Serialize;

use crate::error::AstraImporterError;
use super::joint::AstraJointData;
use super::material::AstraMaterialData;
use super::node::AstraNodeData;

/// All descriptors of one load in their pre-commit form, keyed by category.
/// Purely diagnostic; the commit phase never reads it.
#[derive(Clone, Debug, Default, Serialize)]
pub struct AstraDebugDump {
  pub materials: Vec<AstraMaterialData>,
  pub links: Vec<AstraNodeData>,
  pub child_nodes: Vec<AstraNodeData>,
  pub joints: Vec<AstraJointData>,
}

/// The implementation of the descriptor dump.
impl AstraDebugDump {
  /// Serialize the dump to pretty JSON.
  /// return: The JSON text.
  pub fn to_json(&self) -> Result<String, AstraImporterError> {
    serde_json::to_string_pretty(self).map_err(|err| {
      AstraImporterError::new("Serializing the descriptor dump failed.", Some(Box::new(err)))
    })
  }
}
